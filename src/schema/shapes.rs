//! Request and response payloads of the ghost sharing API.
//!
//! Each payload is a serde struct paired with a static [`Shape`] that
//! describes the same record for the structural validator. Field names are
//! the wire names, and fields are declared in wire (alphabetical) order so
//! validation reports the same first failure the server would.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::descriptor::{Field, Kind, Shape};
use super::error::{SchemaError, Violation};
use super::validator::validate;

/// Maximum length of a session description.
pub const MAX_DESCRIPTION_LEN: usize = 512;

/// A payload with a declared wire shape.
pub trait Validated: Serialize + DeserializeOwned {
    const SHAPE: &'static Shape;

    /// Validate this value as it would appear on the wire.
    fn validate(&self) -> Result<(), SchemaError> {
        let value = serde_json::to_value(self)
            .map_err(|_| SchemaError::new(Self::SHAPE.name, Violation::InvalidType))?;
        validate(Self::SHAPE, &value)
    }
}

macro_rules! validated {
    ($($ty:ty => $shape:ident),* $(,)?) => {
        $(
            impl Validated for $ty {
                const SHAPE: &'static Shape = &$shape;
            }
        )*
    };
}

// ---------------------------------------------------------------------------
// Common records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub end: String,
    pub start: String,
}

pub static TIME_SPAN: Shape = Shape {
    name: "TimeSpan",
    fields: &[
        Field::new("end", Kind::DATE_TIME),
        Field::new("start", Kind::DATE_TIME),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub description: String,
    pub id: i64,
    pub name: String,
}

pub static TAG: Shape = Shape {
    name: "Tag",
    fields: &[
        Field::new("description", Kind::STRING),
        Field::new("id", Kind::INTEGER),
        Field::new("name", Kind::NON_EMPTY_STRING),
    ],
};
static TAG_ITEM: Kind = Kind::Object(&TAG);

/// A tag as embedded in a session, without its server id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTag {
    pub description: String,
    pub name: String,
}

pub static SESSION_TAG: Shape = Shape {
    name: "SessionTag",
    fields: &[
        Field::new("description", Kind::STRING),
        Field::new("name", Kind::NON_EMPTY_STRING),
    ],
};
static SESSION_TAG_ITEM: Kind = Kind::Object(&SESSION_TAG);

impl From<Tag> for SessionTag {
    fn from(tag: Tag) -> Self {
        Self {
            description: tag.description,
            name: tag.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Empty {}

pub static EMPTY: Shape = Shape {
    name: "Empty",
    fields: &[],
};

/// Outcome of a write operation.
///
/// `success == false` is a business failure, not an error: `message` says
/// why and callers are expected to check it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub message: String,
    pub success: bool,
}

pub static SUCCESS_RESPONSE: Shape = Shape {
    name: "SuccessResponse",
    fields: &[
        Field::new("message", Kind::STRING),
        Field::new("success", Kind::BOOLEAN),
    ],
};

// ---------------------------------------------------------------------------
// Site
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfoResponse {
    pub coop_url: String,
    pub total_ghost_duration: u64,
    pub total_ghosts: u64,
    pub total_sessions: u64,
    pub total_users: u64,
}

pub static SERVER_INFO_RESPONSE: Shape = Shape {
    name: "ServerInfoResponse",
    fields: &[
        Field::new("coop_url", Kind::NON_EMPTY_STRING),
        Field::new("total_ghost_duration", Kind::NON_NEGATIVE),
        Field::new("total_ghosts", Kind::NON_NEGATIVE),
        Field::new("total_sessions", Kind::NON_NEGATIVE),
        Field::new("total_users", Kind::NON_NEGATIVE),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementEntry {
    pub background_color: String,
    pub message: String,
    pub text_color: String,
}

pub static ANNOUNCEMENT_ENTRY: Shape = Shape {
    name: "AnnouncementEntry",
    fields: &[
        Field::new("background_color", Kind::NON_EMPTY_STRING),
        Field::new("message", Kind::NON_EMPTY_STRING),
        Field::new("text_color", Kind::NON_EMPTY_STRING),
    ],
};
static ANNOUNCEMENT_ENTRY_ITEM: Kind = Kind::Object(&ANNOUNCEMENT_ENTRY);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementsResponse {
    pub announcements: Vec<AnnouncementEntry>,
}

pub static ANNOUNCEMENTS_RESPONSE: Shape = Shape {
    name: "AnnouncementsResponse",
    fields: &[Field::new("announcements", Kind::List(&ANNOUNCEMENT_ENTRY_ITEM))],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagsResponse {
    pub tags: Vec<Tag>,
}

pub static TAGS_RESPONSE: Shape = Shape {
    name: "TagsResponse",
    fields: &[Field::new("tags", Kind::List(&TAG_ITEM))],
};

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub description: String,
    pub id: String,
    pub owner: String,
    pub players: Vec<String>,
    pub private: bool,
    pub tags: Vec<SessionTag>,
    pub time: Option<TimeSpan>,
}

pub static SESSION: Shape = Shape {
    name: "Session",
    fields: &[
        Field::new("description", Kind::string_max(MAX_DESCRIPTION_LEN)),
        Field::new("id", Kind::NON_EMPTY_STRING),
        Field::new("owner", Kind::NON_EMPTY_STRING),
        Field::new("players", Kind::List(&Kind::NON_EMPTY_STRING)),
        Field::new("private", Kind::BOOLEAN),
        Field::new("tags", Kind::List(&SESSION_TAG_ITEM)),
        Field::new("time", Kind::Object(&TIME_SPAN)).nullable(),
    ],
};
static SESSION_ITEM: Kind = Kind::Object(&SESSION);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session: Option<Session>,
}

pub static SESSION_RESPONSE: Shape = Shape {
    name: "SessionResponse",
    fields: &[Field::new("session", Kind::Object(&SESSION)).nullable()],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<Session>,
}

pub static SESSIONS_RESPONSE: Shape = Shape {
    name: "SessionsResponse",
    fields: &[Field::new("sessions", Kind::List(&SESSION_ITEM))],
};

/// Body of both session creation and session edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub description: String,
    pub private: bool,
    pub tags: Vec<i64>,
    pub time: Option<TimeSpan>,
}

pub static CREATE_SESSION_REQUEST: Shape = Shape {
    name: "CreateSessionRequest",
    fields: &[
        Field::new("description", Kind::string_max(MAX_DESCRIPTION_LEN)),
        Field::new("private", Kind::BOOLEAN),
        Field::new("tags", Kind::List(&Kind::INTEGER)),
        Field::new("time", Kind::Object(&TIME_SPAN)).nullable(),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionAccessRequest {
    pub api_key: String,
    pub auth_token: String,
    pub session_id: String,
    pub username: String,
}

pub static SESSION_ACCESS_REQUEST: Shape = Shape {
    name: "SessionAccessRequest",
    fields: &[
        Field::new("api_key", Kind::NON_EMPTY_STRING),
        Field::new("auth_token", Kind::NON_EMPTY_STRING),
        Field::new("session_id", Kind::NON_EMPTY_STRING),
        Field::new("username", Kind::NON_EMPTY_STRING),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPlayers {
    pub session_id: String,
    pub usernames: Vec<String>,
}

pub static SESSION_PLAYERS: Shape = Shape {
    name: "SessionPlayers",
    fields: &[
        Field::new("session_id", Kind::NON_EMPTY_STRING),
        Field::new("usernames", Kind::List(&Kind::NON_EMPTY_STRING)),
    ],
};
static SESSION_PLAYERS_ITEM: Kind = Kind::Object(&SESSION_PLAYERS);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionsPlayersRequest {
    pub api_key: String,
    pub sessions: Vec<SessionPlayers>,
}

pub static SESSIONS_PLAYERS_REQUEST: Shape = Shape {
    name: "SessionsPlayersRequest",
    fields: &[
        Field::new("api_key", Kind::NON_EMPTY_STRING),
        Field::new("sessions", Kind::List(&SESSION_PLAYERS_ITEM)),
    ],
};

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub password: String,
    pub username: String,
}

pub static LOGIN_REQUEST: Shape = Shape {
    name: "LoginRequest",
    fields: &[
        Field::new("password", Kind::NON_EMPTY_STRING),
        Field::new("username", Kind::NON_EMPTY_STRING),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

pub static REGISTER_REQUEST: Shape = Shape {
    name: "RegisterRequest",
    fields: &[
        Field::new("email", Kind::NON_EMPTY_STRING),
        Field::new("password", Kind::NON_EMPTY_STRING),
        Field::new("username", Kind::NON_EMPTY_STRING),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeUsernameRequest {
    pub username: String,
}

pub static CHANGE_USERNAME_REQUEST: Shape = Shape {
    name: "ChangeUsernameRequest",
    fields: &[Field::new("username", Kind::NON_EMPTY_STRING)],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeEmailRequest {
    pub email: String,
}

pub static CHANGE_EMAIL_REQUEST: Shape = Shape {
    name: "ChangeEmailRequest",
    fields: &[Field::new("email", Kind::NON_EMPTY_STRING)],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub password: String,
}

pub static CHANGE_PASSWORD_REQUEST: Shape = Shape {
    name: "ChangePasswordRequest",
    fields: &[Field::new("password", Kind::NON_EMPTY_STRING)],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInfoResponse {
    pub auth_token: Option<String>,
    pub authenticated: bool,
    pub email: Option<String>,
    pub is_staff: bool,
    pub username: String,
    pub verified: bool,
}

pub static PROFILE_INFO_RESPONSE: Shape = Shape {
    name: "ProfileInfoResponse",
    fields: &[
        Field::new("auth_token", Kind::NON_EMPTY_STRING).nullable(),
        Field::new("authenticated", Kind::BOOLEAN),
        Field::new("email", Kind::NON_EMPTY_STRING).nullable(),
        Field::new("is_staff", Kind::BOOLEAN),
        Field::new("username", Kind::NON_EMPTY_STRING),
        Field::new("verified", Kind::BOOLEAN),
    ],
};

// ---------------------------------------------------------------------------
// Ghosts and levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostFileResponseEntry {
    pub description: String,
    pub downloads: u64,
    /// Ghost length in seconds.
    pub duration: u64,
    pub finish_type: String,
    pub id: i64,
    pub level_display: String,
    pub level_id: i64,
    pub level_identifier: String,
    pub published: bool,
    /// Bundle size in bytes.
    pub size: u64,
    pub tags: Vec<Tag>,
    pub username: String,
}

pub static GHOST_FILE_RESPONSE_ENTRY: Shape = Shape {
    name: "GhostFileResponseEntry",
    fields: &[
        Field::new("description", Kind::STRING),
        Field::new("downloads", Kind::NON_NEGATIVE),
        Field::new("duration", Kind::NON_NEGATIVE),
        Field::new("finish_type", Kind::STRING),
        Field::new("id", Kind::INTEGER),
        Field::new("level_display", Kind::NON_EMPTY_STRING),
        Field::new("level_id", Kind::INTEGER),
        Field::new("level_identifier", Kind::NON_EMPTY_STRING),
        Field::new("published", Kind::BOOLEAN),
        Field::new("size", Kind::NON_NEGATIVE),
        Field::new("tags", Kind::List(&TAG_ITEM)),
        Field::new("username", Kind::NON_EMPTY_STRING),
    ],
};
static GHOST_FILE_RESPONSE_ENTRY_ITEM: Kind = Kind::Object(&GHOST_FILE_RESPONSE_ENTRY);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostFileResponse {
    pub ghost: Option<GhostFileResponseEntry>,
}

pub static GHOST_FILE_RESPONSE: Shape = Shape {
    name: "GhostFileResponse",
    fields: &[Field::new("ghost", Kind::Object(&GHOST_FILE_RESPONSE_ENTRY)).nullable()],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostFilesResponse {
    pub files: Vec<GhostFileResponseEntry>,
}

pub static GHOST_FILES_RESPONSE: Shape = Shape {
    name: "GhostFilesResponse",
    fields: &[Field::new("files", Kind::List(&GHOST_FILE_RESPONSE_ENTRY_ITEM))],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GhostInfoRequest {
    pub description: String,
    pub level_id: i64,
    pub published: bool,
    pub tags: Vec<i64>,
}

pub static GHOST_INFO_REQUEST: Shape = Shape {
    name: "GhostInfoRequest",
    fields: &[
        Field::new("description", Kind::STRING),
        Field::new("level_id", Kind::INTEGER),
        Field::new("published", Kind::BOOLEAN),
        Field::new("tags", Kind::List(&Kind::INTEGER)),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaResponse {
    pub current: u64,
    pub max: u64,
}

pub static QUOTA_RESPONSE: Shape = Shape {
    name: "QuotaResponse",
    fields: &[
        Field::new("current", Kind::NON_NEGATIVE),
        Field::new("max", Kind::NON_NEGATIVE),
    ],
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub id: i64,
    pub identifier: String,
    pub title: String,
}

pub static LEVEL_INFO: Shape = Shape {
    name: "LevelInfo",
    fields: &[
        Field::new("id", Kind::INTEGER),
        Field::new("identifier", Kind::NON_EMPTY_STRING),
        Field::new("title", Kind::NON_EMPTY_STRING),
    ],
};
static LEVEL_INFO_ITEM: Kind = Kind::Object(&LEVEL_INFO);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelsResponse {
    pub levels: Vec<LevelInfo>,
}

pub static LEVELS_RESPONSE: Shape = Shape {
    name: "LevelsResponse",
    fields: &[Field::new("levels", Kind::List(&LEVEL_INFO_ITEM))],
};

validated! {
    AnnouncementEntry => ANNOUNCEMENT_ENTRY,
    AnnouncementsResponse => ANNOUNCEMENTS_RESPONSE,
    ChangeEmailRequest => CHANGE_EMAIL_REQUEST,
    ChangePasswordRequest => CHANGE_PASSWORD_REQUEST,
    ChangeUsernameRequest => CHANGE_USERNAME_REQUEST,
    CreateSessionRequest => CREATE_SESSION_REQUEST,
    Empty => EMPTY,
    GhostFileResponse => GHOST_FILE_RESPONSE,
    GhostFileResponseEntry => GHOST_FILE_RESPONSE_ENTRY,
    GhostFilesResponse => GHOST_FILES_RESPONSE,
    GhostInfoRequest => GHOST_INFO_REQUEST,
    LevelInfo => LEVEL_INFO,
    LevelsResponse => LEVELS_RESPONSE,
    LoginRequest => LOGIN_REQUEST,
    ProfileInfoResponse => PROFILE_INFO_RESPONSE,
    QuotaResponse => QUOTA_RESPONSE,
    RegisterRequest => REGISTER_REQUEST,
    ServerInfoResponse => SERVER_INFO_RESPONSE,
    Session => SESSION,
    SessionAccessRequest => SESSION_ACCESS_REQUEST,
    SessionPlayers => SESSION_PLAYERS,
    SessionResponse => SESSION_RESPONSE,
    SessionsPlayersRequest => SESSIONS_PLAYERS_REQUEST,
    SessionsResponse => SESSIONS_RESPONSE,
    SessionTag => SESSION_TAG,
    SuccessResponse => SUCCESS_RESPONSE,
    Tag => TAG,
    TagsResponse => TAGS_RESPONSE,
    TimeSpan => TIME_SPAN,
}

/// Every shape of the wire contract, by name.
pub static ALL_SHAPES: &[&Shape] = &[
    &ANNOUNCEMENT_ENTRY,
    &ANNOUNCEMENTS_RESPONSE,
    &CHANGE_EMAIL_REQUEST,
    &CHANGE_PASSWORD_REQUEST,
    &CHANGE_USERNAME_REQUEST,
    &CREATE_SESSION_REQUEST,
    &EMPTY,
    &GHOST_FILE_RESPONSE,
    &GHOST_FILE_RESPONSE_ENTRY,
    &GHOST_FILES_RESPONSE,
    &GHOST_INFO_REQUEST,
    &LEVEL_INFO,
    &LEVELS_RESPONSE,
    &LOGIN_REQUEST,
    &PROFILE_INFO_RESPONSE,
    &QUOTA_RESPONSE,
    &REGISTER_REQUEST,
    &SERVER_INFO_RESPONSE,
    &SESSION,
    &SESSION_ACCESS_REQUEST,
    &SESSION_PLAYERS,
    &SESSION_RESPONSE,
    &SESSIONS_PLAYERS_REQUEST,
    &SESSIONS_RESPONSE,
    &SESSION_TAG,
    &SUCCESS_RESPONSE,
    &TAG,
    &TAGS_RESPONSE,
    &TIME_SPAN,
];

/// Look up a shape by its wire name.
pub fn shape_by_name(name: &str) -> Option<&'static Shape> {
    ALL_SHAPES.iter().copied().find(|shape| shape.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn shape_names_are_unique() {
        let mut names: Vec<_> = ALL_SHAPES.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_SHAPES.len());
    }

    #[test]
    fn typed_request_is_validated_as_wire_json() {
        let request = CreateSessionRequest {
            description: "x".repeat(MAX_DESCRIPTION_LEN + 1),
            private: false,
            tags: vec![],
            time: None,
        };
        let err = request.validate().expect_err("description is too long");
        assert_eq!(err.to_string(), "CreateSessionRequest.description is too long");
    }

    #[test]
    fn session_tags_ignore_server_ids() {
        let value = json!({
            "session": {
                "description": "",
                "id": "abc",
                "owner": "ghost",
                "players": ["ghost"],
                "private": false,
                "tags": [{ "id": 3, "name": "any%", "description": "" }],
                "time": null,
            }
        });
        validate(SessionResponse::SHAPE, &value).expect("valid shape");
        let response: SessionResponse = serde_json::from_value(value).expect("valid types");
        let session = response.session.expect("session present");
        assert_eq!(session.tags[0].name, "any%");
    }

    #[test]
    fn lookup_by_name() {
        assert!(shape_by_name("TimeSpan").is_some());
        assert!(shape_by_name("Nope").is_none());
    }
}
