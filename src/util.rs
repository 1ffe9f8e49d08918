mod interner;

pub use interner::StringInterner;
