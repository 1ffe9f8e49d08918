use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Ways in which a class or member name can be rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    Empty,
    EmptySegment { name: String },
    IllegalCharacter { name: String, character: char },
}

impl Display for NameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            NameError::Empty => write!(f, "Empty name"),
            NameError::EmptySegment { name } => {
                write!(f, "Name '{}' contains an empty segment", name)
            }
            NameError::IllegalCharacter { name, character } => {
                write!(f, "Name '{}' contains illegal character '{}'", name, character)
            }
        }
    }
}

impl Error for NameError {}

/// Ways in which a type or method descriptor can be malformed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// Input ended in the middle of a descriptor (or was empty outright)
    UnexpectedEnd,

    /// A complete descriptor was followed by extra characters
    TrailingInput(char),

    /// A character that starts no valid field or return type
    InvalidTypeCode(char),

    /// `L…` object descriptor with no closing `;`
    UnterminatedObject(String),

    /// The class name inside an object descriptor is not a valid binary name
    InvalidName(NameError),

    /// Method descriptor not starting with `(`
    MissingOpenParen,

    /// Method descriptor with no closing `)`
    MissingCloseParen,

    /// `void` used as a parameter type (only valid as a return type)
    VoidParameter(usize),
}

impl Display for DescriptorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DescriptorError::UnexpectedEnd => write!(f, "Unexpected end of descriptor"),
            DescriptorError::TrailingInput(c) => {
                write!(f, "Unexpected leftover input starting at '{}'", c)
            }
            DescriptorError::InvalidTypeCode(c) => write!(f, "Invalid type code '{}'", c),
            DescriptorError::UnterminatedObject(name) => {
                write!(f, "Missing terminator for 'L{}'", name)
            }
            DescriptorError::InvalidName(err) => write!(f, "Invalid class name: {}", err),
            DescriptorError::MissingOpenParen => write!(f, "Expected '(' for method descriptor"),
            DescriptorError::MissingCloseParen => write!(f, "Expected ')' for method descriptor"),
            DescriptorError::VoidParameter(index) => {
                write!(f, "Void parameter #{} in method descriptor", index)
            }
        }
    }
}

impl Error for DescriptorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DescriptorError::InvalidName(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NameError> for DescriptorError {
    fn from(err: NameError) -> DescriptorError {
        DescriptorError::InvalidName(err)
    }
}
