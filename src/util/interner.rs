use elsa::sync::FrozenMap;

/// Deduplicating pool of strings
///
/// Internal class names, member names, and descriptors repeat constantly in
/// mapping data, so they are stored once here and handed out as `&str`
/// references that live as long as the pool itself. Every name type in this
/// crate borrows from a pool, which makes the sharing (and the lifetime of
/// that sharing) explicit in signatures instead of relying on some ambient
/// global table.
///
/// Interning is append-only: entries are never removed or moved, so handing
/// out references through a shared `&StringInterner` is safe. The pool can be
/// shared across threads; a racing insert of the same string just returns the
/// copy that won.
pub struct StringInterner {
    strings: FrozenMap<String, Box<str>>,
}

impl StringInterner {
    pub fn new() -> StringInterner {
        StringInterner {
            strings: FrozenMap::new(),
        }
    }

    /// Get the pool's copy of `value`, inserting it on first sight
    pub fn intern<'p>(&'p self, value: &str) -> &'p str {
        if let Some(interned) = self.strings.get(value) {
            return interned;
        }
        self.strings.insert(value.to_owned(), Box::from(value))
    }

    /// Number of distinct strings interned so far
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for StringInterner {
    fn default() -> StringInterner {
        StringInterner::new()
    }
}
