//! Mappings between obfuscated and deobfuscated JVM symbol names
//!
//! The [`jvm`] module models the symbols themselves: parsed type and method
//! descriptors plus the class, method, and field identities that renames key
//! off of. The [`mappings`] module holds the rename tables and the binary
//! format they are stored in. Every string lives in a caller-owned
//! [`util::StringInterner`], so the symbol types are small `Copy`-able
//! handles that compare by pointer-sized data.
//!
//! ```
//! use supersrg::jvm::{BinaryName, MethodSignature, Name, ParseDescriptor};
//! use supersrg::mappings::MappingsBuilder;
//! use supersrg::util::StringInterner;
//!
//! let pool = StringInterner::new();
//! let obfuscated = BinaryName::from_string(&pool, "a/b").unwrap();
//! let clear = BinaryName::from_string(&pool, "com/example/Widget").unwrap();
//!
//! let mut builder = MappingsBuilder::new();
//! builder.insert_class(obfuscated, clear);
//! let mappings = builder.build(&pool);
//!
//! let signature = MethodSignature::parse(&pool, "(La/b;I)La/b;").unwrap();
//! let revised = mappings.remap_signature(&signature);
//! assert_eq!(revised.descriptor(), "(Lcom/example/Widget;I)Lcom/example/Widget;");
//! ```

pub mod jvm;
pub mod mappings;
pub mod util;
