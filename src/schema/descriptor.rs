//! Declarative shape descriptors.
//!
//! A [`Shape`] is a static table of [`Field`]s. Shapes are plain data so
//! they can live in `static` items and reference each other. List element
//! kinds that point at another shape go through a named `static`:
//!
//! ```
//! use haunted_client::schema::{Field, Kind, Shape};
//!
//! static POINT: Shape = Shape {
//!     name: "Point",
//!     fields: &[
//!         Field::new("x", Kind::INTEGER),
//!         Field::new("y", Kind::INTEGER),
//!     ],
//! };
//! static POINT_ITEM: Kind = Kind::Object(&POINT);
//!
//! static SEGMENT: Shape = Shape {
//!     name: "Segment",
//!     fields: &[
//!         Field::new("label", Kind::NON_EMPTY_STRING).nullable(),
//!         Field::new("points", Kind::List(&POINT_ITEM)),
//!     ],
//! };
//! # let _ = &SEGMENT;
//! ```

/// String formats checked by pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `YYYY-MM-DDTHH:MM:SS[.fff…](Z|+HH:MM)`
    IsoDateTime,
}

/// The type and refinements of a field value.
#[derive(Debug, Clone, Copy)]
pub enum Kind {
    Boolean,
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    String {
        min_len: Option<usize>,
        max_len: Option<usize>,
        format: Option<Format>,
    },
    Object(&'static Shape),
    List(&'static Kind),
}

impl Kind {
    pub const BOOLEAN: Kind = Kind::Boolean;

    pub const INTEGER: Kind = Kind::Integer {
        min: None,
        max: None,
    };

    pub const NON_NEGATIVE: Kind = Kind::Integer {
        min: Some(0),
        max: None,
    };

    pub const STRING: Kind = Kind::String {
        min_len: None,
        max_len: None,
        format: None,
    };

    pub const NON_EMPTY_STRING: Kind = Kind::String {
        min_len: Some(1),
        max_len: None,
        format: None,
    };

    pub const DATE_TIME: Kind = Kind::String {
        min_len: None,
        max_len: None,
        format: Some(Format::IsoDateTime),
    };

    pub const fn string_max(max_len: usize) -> Kind {
        Kind::String {
            min_len: None,
            max_len: Some(max_len),
            format: None,
        }
    }

    /// Human-readable name of the expected JSON type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Integer { .. } => "integer",
            Kind::String { .. } => "string",
            Kind::Object(_) => "object",
            Kind::List(_) => "array",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub nullable: bool,
}

impl Field {
    pub const fn new(name: &'static str, kind: Kind) -> Self {
        Self {
            name,
            kind,
            nullable: false,
        }
    }

    /// Allow an explicit `null`. The key must still be present.
    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }
}

/// A named record type with its field table.
#[derive(Debug)]
pub struct Shape {
    pub name: &'static str,
    pub fields: &'static [Field],
}

impl Shape {
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
