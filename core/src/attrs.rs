//! Access to item and grid attributes by name.
//!
//! Statically typed code should use the accessor methods directly. This
//! interface exists for callers that only have a name and a loosely typed
//! value, such as the command line front end, and is where read-only and
//! type checks surface as errors.

use std::fmt;

use crate::errors::{BlocksError, BlocksResult};

/// Loosely typed attribute value.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// No value, such as the row of an item without one.
    None,
    Bool(bool),
    Int(i64),
    Str(String),
}
impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Str(s) => write!(f, "{:?}", s),
        }
    }
}
impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}
impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}
impl From<usize> for AttrValue {
    fn from(i: usize) -> Self {
        Self::Int(i as i64)
    }
}
impl From<u8> for AttrValue {
    fn from(i: u8) -> Self {
        Self::Int(i as i64)
    }
}
impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(x: Option<T>) -> Self {
        x.map_or(Self::None, Into::into)
    }
}
impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}
impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl AttrValue {
    /// Parses a command-line style value: `true`/`false`, an integer, or else
    /// a string.
    pub fn parse_loose(s: &str) -> Self {
        match s {
            "true" => Self::Bool(true),
            "false" => Self::Bool(false),
            _ => s
                .parse()
                .map(Self::Int)
                .unwrap_or_else(|_| Self::Str(s.to_owned())),
        }
    }

    /// Returns the boolean value, or an error naming the attribute if this is
    /// not a boolean.
    pub fn expect_bool(&self, name: &str) -> BlocksResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(wrong_type(name, "a boolean")),
        }
    }

    /// Returns the integer value, or an error naming the attribute if this is
    /// not an integer.
    pub fn expect_int(&self, name: &str) -> BlocksResult<i64> {
        match self {
            Self::Int(i) => Ok(*i),
            _ => Err(wrong_type(name, "an integer")),
        }
    }
}

fn wrong_type(name: &str, expected: &'static str) -> BlocksError {
    BlocksError::WrongAttributeType {
        name: name.to_owned(),
        expected,
    }
}

/// Attribute access by name.
pub trait Attributes {
    /// Returns the value of an attribute.
    fn get_attr(&self, name: &str) -> BlocksResult<AttrValue>;
    /// Sets the value of an attribute. On error, nothing is changed.
    fn set_attr(&mut self, name: &str, value: AttrValue) -> BlocksResult<()>;
}

/// Payloads without any attributes.
impl Attributes for () {
    fn get_attr(&self, name: &str) -> BlocksResult<AttrValue> {
        Err(BlocksError::UnknownAttribute(name.to_owned()))
    }
    fn set_attr(&mut self, name: &str, _value: AttrValue) -> BlocksResult<()> {
        Err(BlocksError::UnknownAttribute(name.to_owned()))
    }
}
