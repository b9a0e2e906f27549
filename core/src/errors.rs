//! Errors produced while building, indexing, mutating, or loading arrays and
//! grids.

use std::convert::Infallible;
use std::error::Error;
use std::fmt;

/// Result type returned by fallible routines in this crate.
pub type BlocksResult<T> = Result<T, BlocksError>;

/// Broad class of a `BlocksError`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// A value was rejected before anything was changed.
    Validation,
    /// An index or selector does not address anything in the array.
    Index,
    /// A selector is structurally wrong for positional indexing.
    Type,
    /// Text input is malformed.
    Parse,
}

/// Error encountered while working with arrays or grids.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlocksError {
    BadColorArity(usize),
    ChannelOutOfRange { channel: &'static str, value: i64 },
    BadCssColor(String),
    ZeroBlockSize,
    BadStep(isize),
    ReadOnlyAttribute(String),
    UnknownAttribute(String),
    WrongAttributeType { name: String, expected: &'static str },
    UnknownFormat(String),

    TooManyIndices { ndim: usize, got: usize },
    IndexOutOfBounds { index: isize, len: usize },
    UnsupportedSelector(String),
    NotSingleItem(String),
    DanglingSelector,

    Parse { line: usize, msg: String },
}

impl fmt::Display for BlocksError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadColorArity(n) => {
                write!(f, "Expected exactly three color channels; got {}", n)
            }
            Self::ChannelOutOfRange { channel, value } => write!(
                f,
                "Color channel {} must be in the range 0-255; got {}",
                channel, value,
            ),
            Self::BadCssColor(s) => write!(f, "Unable to parse color: {:?}", s),
            Self::ZeroBlockSize => write!(f, "Block size must be positive"),
            Self::BadStep(step) => write!(f, "Slice step must be positive; got {}", step),
            Self::ReadOnlyAttribute(name) => write!(f, "Attribute {:?} is read-only", name),
            Self::UnknownAttribute(name) => write!(f, "Unknown attribute {:?}", name),
            Self::WrongAttributeType { name, expected } => {
                write!(f, "Attribute {:?} must be {}", name, expected)
            }
            Self::UnknownFormat(s) => write!(f, "Unknown output format {:?}", s),
            Self::TooManyIndices { ndim, got } => write!(
                f,
                "Too many indices for {}-dimensional array; got {}",
                ndim, got,
            ),
            Self::IndexOutOfBounds { index, len } => {
                write!(f, "Index {} out of bounds for axis of length {}", index, len)
            }
            Self::UnsupportedSelector(s) => {
                write!(f, "Selector {:?} is neither an integer nor a slice", s)
            }
            Self::NotSingleItem(s) => {
                write!(f, "Selection [{}] does not address a single item", s)
            }
            Self::DanglingSelector => write!(f, "Selector has a dangling trailing comma"),
            Self::Parse { line, msg } => write!(f, "Line {}: {}", line, msg),
        }
    }
}
impl Error for BlocksError {}

impl From<Infallible> for BlocksError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}

impl BlocksError {
    /// Returns the broad class of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadColorArity(_)
            | Self::ChannelOutOfRange { .. }
            | Self::BadCssColor(_)
            | Self::ZeroBlockSize
            | Self::BadStep(_)
            | Self::ReadOnlyAttribute(_)
            | Self::UnknownAttribute(_)
            | Self::WrongAttributeType { .. }
            | Self::UnknownFormat(_) => ErrorKind::Validation,

            Self::TooManyIndices { .. }
            | Self::IndexOutOfBounds { .. }
            | Self::UnsupportedSelector(_)
            | Self::NotSingleItem(_) => ErrorKind::Index,

            Self::DanglingSelector => ErrorKind::Type,

            Self::Parse { .. } => ErrorKind::Parse,
        }
    }

    /// Constructs a parse error at a 1-based line number.
    pub(crate) fn parse(line: usize, msg: impl ToString) -> Self {
        Self::Parse {
            line,
            msg: msg.to_string(),
        }
    }
}
