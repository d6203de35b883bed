// Attribute values of the MSE interchange format
//
// MSE strings are delimited by single quotes and have no escape syntax, so a
// string value is only constructible when it does not contain the delimiter.

use crate::error::{Error, Result};
use std::fmt;

/// The MSE string delimiter
pub const DELIMITER: char = '\'';

/// Unique identity of a node in the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A string that is safe to emit between MSE delimiters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MseString(String);

impl MseString {
    /// Validate a string, failing if it contains the delimiter
    pub fn new(s: impl Into<String>) -> Result<Self> {
        let s = s.into();
        if s.contains(DELIMITER) {
            return Err(Error::invalid_string(s));
        }
        Ok(Self(s))
    }

    /// Build a string by removing every delimiter character
    pub fn stripped(s: &str) -> Self {
        Self(s.replace(DELIMITER, ""))
    }

    /// Validate or strip depending on `strip`
    pub fn with_policy(s: impl Into<String>, strip: bool) -> Result<Self> {
        let s = s.into();
        if strip {
            Ok(Self::stripped(&s))
        } else {
            Self::new(s)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MseString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0)
    }
}

impl PartialEq<str> for MseString {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MseString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum MseValue {
    Ref(NodeId),
    Id(NodeId),
    Str(MseString),
    Bool(bool),
    Int(i64),
}

impl fmt::Display for MseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MseValue::Ref(id) => write!(f, "(ref: {})", id),
            MseValue::Id(id) => write!(f, "(id: {})", id),
            MseValue::Str(s) => write!(f, "{}", s),
            MseValue::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            MseValue::Int(i) => write!(f, "{}", i),
        }
    }
}

impl From<MseString> for MseValue {
    fn from(s: MseString) -> Self {
        MseValue::Str(s)
    }
}
