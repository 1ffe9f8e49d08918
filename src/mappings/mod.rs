//! Renaming tables for JVM symbols
//!
//! A [`MappingsBuilder`] is populated incrementally (usually by the binary
//! decoder in [`binary`]), possibly merged with other builders, and then
//! consumed once into an immutable [`Mappings`]. Lookups on a `Mappings` fall
//! back to the identity everywhere: mapping data is allowed to be partial,
//! and an absent entry uniformly means "unchanged", both for direct lookups
//! and when reconstructing composite types (array element classes, signature
//! parameter and return classes).

mod binary;

pub use binary::{
    BinaryMappingsError, CompressionFormat, EncodeError, MappingsDecoder, MappingsEncoder,
    FORMAT_VERSION, MAGIC_HEADER,
};

use crate::jvm::{
    ArrayType, BinaryName, ElementType, FieldData, JavaType, MethodData, MethodSignature,
    UnqualifiedName,
};
use crate::util::StringInterner;
use elsa::sync::FrozenMap;
use indexmap::IndexMap;

/// Mutable accumulator for rename data
///
/// The builder records exactly what its sources (decoded files, programmatic
/// inserts) said, without cross-checking the three tables against each other;
/// any interaction between them is resolved when the builder is consumed by
/// [`MappingsBuilder::build`].
#[derive(Default, Clone, Debug)]
pub struct MappingsBuilder<'p> {
    /// Original class → revised class
    pub classes: IndexMap<BinaryName<'p>, BinaryName<'p>>,

    /// Original method identity → revised method name
    pub method_names: IndexMap<MethodData<'p>, UnqualifiedName<'p>>,

    /// Original field identity → revised field name
    pub field_names: IndexMap<FieldData<'p>, UnqualifiedName<'p>>,
}

impl<'p> MappingsBuilder<'p> {
    pub fn new() -> MappingsBuilder<'p> {
        MappingsBuilder::default()
    }

    pub fn insert_class(&mut self, original: BinaryName<'p>, revised: BinaryName<'p>) {
        self.classes.insert(original, revised);
    }

    pub fn insert_method(&mut self, original: MethodData<'p>, revised_name: UnqualifiedName<'p>) {
        self.method_names.insert(original, revised_name);
    }

    pub fn insert_field(&mut self, original: FieldData<'p>, revised_name: UnqualifiedName<'p>) {
        self.field_names.insert(original, revised_name);
    }

    /// Fold another builder's entries into this one (later entries win)
    pub fn merge(&mut self, other: MappingsBuilder<'p>) {
        self.classes.extend(other.classes);
        self.method_names.extend(other.method_names);
        self.field_names.extend(other.field_names);
    }

    /// Consume the builder into an immutable, queryable table
    ///
    /// Revised member identities are materialized here, against the complete
    /// class table: the declaring class is resolved through it and method
    /// signatures are rewritten structurally. After this point explicit
    /// entries are returned verbatim by lookups, never re-derived.
    pub fn build(self, pool: &'p StringInterner) -> Mappings<'p> {
        let mut mappings = Mappings {
            pool,
            classes: self.classes,
            methods: IndexMap::new(),
            fields: IndexMap::new(),
            signature_cache: FrozenMap::new(),
        };

        let mut methods = IndexMap::with_capacity(self.method_names.len());
        for (original, revised_name) in self.method_names {
            let revised = MethodData {
                class: mappings.remap_class(original.class),
                name: revised_name,
                signature: mappings.remap_signature(&original.signature).clone(),
            };
            methods.insert(original, revised);
        }

        let mut fields = IndexMap::with_capacity(self.field_names.len());
        for (original, revised_name) in self.field_names {
            let revised = FieldData {
                class: mappings.remap_class(original.class),
                name: revised_name,
            };
            fields.insert(original, revised);
        }

        mappings.methods = methods;
        mappings.fields = fields;
        mappings
    }
}

/// Any key that can be resolved against a [`Mappings`] table
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub enum MappingKey<'p> {
    Type(JavaType<'p>),
    Method(MethodData<'p>),
    Field(FieldData<'p>),
}

/// Immutable renaming table
///
/// The only mutable state is a private memoization cache for signature
/// rewrites; it can only ever make repeat lookups cheaper, never change what
/// they return, and it takes no part in comparing or serializing mappings.
pub struct Mappings<'p> {
    pool: &'p StringInterner,
    classes: IndexMap<BinaryName<'p>, BinaryName<'p>>,
    methods: IndexMap<MethodData<'p>, MethodData<'p>>,
    fields: IndexMap<FieldData<'p>, FieldData<'p>>,
    signature_cache: FrozenMap<&'p str, Box<MethodSignature<'p>>>,
}

impl<'p> Mappings<'p> {
    /// Table with no renames at all (every lookup is the identity)
    pub fn empty(pool: &'p StringInterner) -> Mappings<'p> {
        MappingsBuilder::new().build(pool)
    }

    /// Resolve a class, falling back to the original if it has no rename
    pub fn remap_class(&self, class: BinaryName<'p>) -> BinaryName<'p> {
        self.classes.get(&class).copied().unwrap_or(class)
    }

    /// Resolve a type: primitives pass through, object classes are looked up,
    /// and arrays of objects are rebuilt around the resolved element class
    pub fn remap_type(&self, typ: JavaType<'p>) -> JavaType<'p> {
        match typ {
            JavaType::Base(_) => typ,
            JavaType::Object(class) => JavaType::Object(self.remap_class(class)),
            JavaType::Array(ArrayType {
                dimensions,
                element_type: ElementType::Object(class),
            }) => JavaType::Array(ArrayType {
                dimensions,
                element_type: ElementType::Object(self.remap_class(class)),
            }),
            JavaType::Array(_) => typ,
        }
    }

    /// Rewrite a signature, resolving its return and parameter types
    ///
    /// Rewrites are memoized per original descriptor, scoped to this table:
    /// repeat queries return a reference to the cached value without
    /// re-deriving anything.
    pub fn remap_signature<'m>(
        &'m self,
        original: &MethodSignature<'p>,
    ) -> &'m MethodSignature<'p> {
        if let Some(cached) = self.signature_cache.get(original.descriptor()) {
            return cached;
        }
        let return_type = self.remap_type(original.return_type());
        let parameter_types = original
            .parameter_types()
            .iter()
            .map(|&typ| self.remap_type(typ))
            .collect();
        // Remapping never introduces void, so assembly cannot fail
        let revised = MethodSignature::assemble(self.pool, return_type, parameter_types);
        self.signature_cache
            .insert(original.descriptor(), Box::new(revised))
    }

    /// Resolve a method identity
    ///
    /// An explicit entry is trusted as-is; otherwise the result is synthesized
    /// from the class table and the signature rewriter, keeping the name.
    pub fn remap_method(&self, method: &MethodData<'p>) -> MethodData<'p> {
        if let Some(revised) = self.methods.get(method) {
            return revised.clone();
        }
        MethodData {
            class: self.remap_class(method.class),
            name: method.name,
            signature: self.remap_signature(&method.signature).clone(),
        }
    }

    /// Resolve a field identity
    pub fn remap_field(&self, field: &FieldData<'p>) -> FieldData<'p> {
        if let Some(revised) = self.fields.get(field) {
            return *revised;
        }
        FieldData {
            class: self.remap_class(field.class),
            name: field.name,
        }
    }

    /// Resolve any kind of key through the one table
    pub fn remap(&self, key: &MappingKey<'p>) -> MappingKey<'p> {
        match key {
            MappingKey::Type(typ) => MappingKey::Type(self.remap_type(*typ)),
            MappingKey::Method(method) => MappingKey::Method(self.remap_method(method)),
            MappingKey::Field(field) => MappingKey::Field(self.remap_field(field)),
        }
    }

    /// Class renames, in insertion order
    pub fn classes(&self) -> impl Iterator<Item = (BinaryName<'p>, BinaryName<'p>)> + '_ {
        self.classes.iter().map(|(original, revised)| (*original, *revised))
    }

    /// Explicit method renames, in insertion order
    pub fn methods(&self) -> impl Iterator<Item = (&MethodData<'p>, &MethodData<'p>)> + '_ {
        self.methods.iter()
    }

    /// Explicit field renames, in insertion order
    pub fn fields(&self) -> impl Iterator<Item = (&FieldData<'p>, &FieldData<'p>)> + '_ {
        self.fields.iter()
    }

    /// True if no renames are recorded (lookups are still well-defined)
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.methods.is_empty() && self.fields.is_empty()
    }
}
