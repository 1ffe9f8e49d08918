use super::{BinaryName, MethodSignature, UnqualifiedName};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Identity of a method: declaring class, name, and signature
///
/// Equality and hashing follow the identifying tuple
/// `(class, name, signature descriptor)`, so two values built independently
/// from the same mapping data compare equal. The declaring class is always a
/// plain class, never an array or primitive, which the field type enforces.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MethodData<'p> {
    pub class: BinaryName<'p>,
    pub name: UnqualifiedName<'p>,
    pub signature: MethodSignature<'p>,
}

/// Identity of a field: declaring class and name
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FieldData<'p> {
    pub class: BinaryName<'p>,
    pub name: UnqualifiedName<'p>,
}

impl Display for MethodData<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}/{} {}",
            self.class,
            self.name,
            self.signature.descriptor()
        )
    }
}

impl Display for FieldData<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.class, self.name)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::jvm::{Name, ParseDescriptor};
    use crate::util::StringInterner;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn identity_is_structural() {
        let pool = StringInterner::new();
        let class = BinaryName::from_string(&pool, "foo/Bar").unwrap();
        let name = UnqualifiedName::from_string(&pool, "baz").unwrap();

        let first = MethodData {
            class,
            name,
            signature: MethodSignature::parse(&pool, "(I)V").unwrap(),
        };
        let second = MethodData {
            class,
            name,
            signature: MethodSignature::parse(&pool, "(I)V").unwrap(),
        };
        assert_eq!(first, second);
        assert_eq!(hash_of(&first), hash_of(&second));

        let other_signature = MethodData {
            signature: MethodSignature::parse(&pool, "(J)V").unwrap(),
            ..first.clone()
        };
        assert_ne!(first, other_signature);

        let field = FieldData { class, name };
        assert_eq!(field, FieldData { class, name });
        assert_eq!(format!("{}", field), "foo/Bar/baz");
        assert_eq!(format!("{}", first), "foo/Bar/baz (I)V");
    }
}
