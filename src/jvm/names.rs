use super::NameError;
use crate::util::StringInterner;
use std::fmt::{Debug, Display, Error as FmtError, Formatter};

/// Names of methods and fields
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.2>
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub struct UnqualifiedName<'p>(&'p str);

/// Names of classes and interfaces, in internal (slash-separated) form
///
/// See <https://docs.oracle.com/javase/specs/jvms/se16/html/jvms-4.html#jvms-4.2.1>
#[derive(Copy, Clone, Hash, Eq, PartialEq)]
pub struct BinaryName<'p>(&'p str);

pub trait Name<'p>: Sized + Copy {
    /// Check if a string would be a valid name
    fn check_valid(name: &str) -> Result<(), NameError>;

    /// Extract the raw underlying string name
    fn as_str(&self) -> &'p str;

    /// Try to construct a name, interning it into `pool`
    fn from_string(pool: &'p StringInterner, name: &str) -> Result<Self, NameError> {
        Self::check_valid(name)?;
        Ok(Self::from_interned(pool.intern(name)))
    }

    /// Wrap an already-validated, already-interned string
    fn from_interned(name: &'p str) -> Self;
}

impl<'p> Name<'p> for UnqualifiedName<'p> {
    fn check_valid(name: &str) -> Result<(), NameError> {
        if name.is_empty() {
            Err(NameError::Empty)
        } else if let Some(character) = name.chars().find(|c| matches!(c, '.' | ';' | '[' | '/')) {
            Err(NameError::IllegalCharacter {
                name: name.to_owned(),
                character,
            })
        } else {
            Ok(())
        }
    }

    fn as_str(&self) -> &'p str {
        self.0
    }

    fn from_interned(name: &'p str) -> UnqualifiedName<'p> {
        UnqualifiedName(name)
    }
}

impl<'p> Name<'p> for BinaryName<'p> {
    fn check_valid(name: &str) -> Result<(), NameError> {
        if name.is_empty() {
            return Err(NameError::Empty);
        }
        for segment in name.split('/') {
            if segment.is_empty() {
                return Err(NameError::EmptySegment {
                    name: name.to_owned(),
                });
            }
            if let Some(character) = segment.chars().find(|c| matches!(c, '.' | ';' | '[')) {
                return Err(NameError::IllegalCharacter {
                    name: name.to_owned(),
                    character,
                });
            }
        }
        Ok(())
    }

    fn as_str(&self) -> &'p str {
        self.0
    }

    fn from_interned(name: &'p str) -> BinaryName<'p> {
        BinaryName(name)
    }
}

impl Debug for UnqualifiedName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0)
    }
}

impl Debug for BinaryName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0)
    }
}

impl Display for UnqualifiedName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0)
    }
}

impl Display for BinaryName<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.write_str(self.0)
    }
}
