//! Model of JVM type descriptors and symbol identities
//!
//! Everything here is keyed off strings interned in an explicit
//! [`StringInterner`](crate::util::StringInterner): the model types are thin
//! `Copy`-able (or cheaply clonable) handles borrowing from the pool, so a
//! whole mapping table shares one allocation per distinct name.

mod descriptors;
mod errors;
mod members;
mod names;

pub use descriptors::*;
pub use errors::*;
pub use members::*;
pub use names::*;
