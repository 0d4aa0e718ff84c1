/// Size of one header block, and the alignment of every payload.
pub const HEADER_SIZE: usize = 512;

pub const NAME_OFFSET: usize = 0;
pub const NAME_SIZE: usize = 100;
pub const SIZE_OFFSET: usize = 124;
pub const SIZE_SIZE: usize = 12;
pub const TYPE_OFFSET: usize = 156;

/// Tar type flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    File,
    HardLink,
    Symlink,
    CharDevice,
    BlockDevice,
    Directory,
    Fifo,
    Contiguous,
    Unknown(u8),
}

impl EntryType {
    /// Decode the single-byte type flag.
    ///
    /// Only ASCII digits are recognised. A NUL flag (pre-POSIX regular file)
    /// is reported as `Unknown(0)` and is therefore not surfaced as a file.
    pub fn from_u8(value: u8) -> Self {
        match value {
            b'0' => EntryType::File,
            b'1' => EntryType::HardLink,
            b'2' => EntryType::Symlink,
            b'3' => EntryType::CharDevice,
            b'4' => EntryType::BlockDevice,
            b'5' => EntryType::Directory,
            b'6' => EntryType::Fifo,
            b'7' => EntryType::Contiguous,
            _ => EntryType::Unknown(value),
        }
    }

    pub fn as_u8(&self) -> u8 {
        match self {
            EntryType::File => b'0',
            EntryType::HardLink => b'1',
            EntryType::Symlink => b'2',
            EntryType::CharDevice => b'3',
            EntryType::BlockDevice => b'4',
            EntryType::Directory => b'5',
            EntryType::Fifo => b'6',
            EntryType::Contiguous => b'7',
            EntryType::Unknown(v) => *v,
        }
    }
}

/// The three header fields this reader trusts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarHeader {
    pub name: String,
    pub size: usize,
    pub entry_type: EntryType,
}

impl TarHeader {
    /// Decode a header block.
    ///
    /// Returns `None` when the block marks the end of the archive: an empty
    /// name, or a size field that is not octal. Checksums and magic numbers
    /// are not looked at.
    pub fn from_bytes(block: &[u8]) -> Option<Self> {
        if block.len() < HEADER_SIZE {
            return None;
        }

        let name = parse_name(&block[NAME_OFFSET..NAME_OFFSET + NAME_SIZE]);
        if name.is_empty() {
            return None;
        }

        let size = parse_octal(&block[SIZE_OFFSET..SIZE_OFFSET + SIZE_SIZE])?;

        Some(Self {
            name,
            size,
            entry_type: EntryType::from_u8(block[TYPE_OFFSET]),
        })
    }
}

/// A regular file inside an archive buffer.
///
/// `offset` is the position of the entry's header; the payload starts
/// [`HEADER_SIZE`] bytes later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TarEntry {
    pub name: String,
    pub size: usize,
    pub offset: usize,
}

impl TarEntry {
    pub fn data_offset(&self) -> usize {
        self.offset + HEADER_SIZE
    }
}

/// Name field: bytes up to the first NUL, or the whole field.
pub(crate) fn parse_name(field: &[u8]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    // Use lossy conversion to handle non-UTF8 names gracefully
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Size field: ASCII octal, optionally space-padded in front and
/// terminated by NUL or space.
pub(crate) fn parse_octal(field: &[u8]) -> Option<usize> {
    let mut rest = field.iter().skip_while(|&&b| b == b' ').peekable();

    let mut value: usize = 0;
    let mut digits = 0;
    while let Some(&&b) = rest.peek() {
        if !(b'0'..=b'7').contains(&b) {
            break;
        }
        value = value.checked_mul(8)?.checked_add(usize::from(b - b'0'))?;
        digits += 1;
        rest.next();
    }

    if digits > 0 {
        return Some(value);
    }

    // An all-NUL (or blank) field is a zero-length entry
    match rest.next() {
        None | Some(&0) => Some(0),
        Some(_) => None,
    }
}
