use super::{BinaryName, DescriptorError, Name};
use crate::util::StringInterner;
use std::hash::{Hash, Hasher};
use std::iter::Peekable;
use std::str::Chars;

/// Utility trait for converting descriptors to and from string representations
pub trait RenderDescriptor {
    /// Turn the descriptor into a string
    fn render(&self) -> String {
        let mut string = String::new();
        self.render_to(&mut string);
        string
    }

    /// Write the descriptor to a string
    fn render_to(&self, write_to: &mut String);
}

pub trait ParseDescriptor<'p>: Sized {
    /// Parse a descriptor from a string
    ///
    /// New strings produced along the way (class names, canonical method
    /// descriptors) are interned into `pool`.
    fn parse(pool: &'p StringInterner, source: &str) -> Result<Self, DescriptorError> {
        let mut chars = source.chars().peekable();
        let ret = Self::parse_from(pool, &mut chars)?;
        match chars.next() {
            None => Ok(ret),
            Some(c) => Err(DescriptorError::TrailingInput(c)),
        }
    }

    /// Read one descriptor prefix from a character buffer
    ///
    /// Leaves the buffer positioned just past the characters consumed.
    fn parse_from(
        pool: &'p StringInterner,
        source: &mut Peekable<Chars>,
    ) -> Result<Self, DescriptorError>;
}

/// Primitive value types
///
/// `Void` is a legal return type but never a field, parameter, or array
/// element in well-formed class files.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
    Void,
}

impl RenderDescriptor for BaseType {
    fn render_to(&self, write_to: &mut String) {
        let c = match self {
            BaseType::Byte => 'B',
            BaseType::Char => 'C',
            BaseType::Double => 'D',
            BaseType::Float => 'F',
            BaseType::Int => 'I',
            BaseType::Long => 'J',
            BaseType::Short => 'S',
            BaseType::Boolean => 'Z',
            BaseType::Void => 'V',
        };
        write_to.push(c);
    }
}

impl<'p> ParseDescriptor<'p> for BaseType {
    fn parse_from(
        _pool: &'p StringInterner,
        source: &mut Peekable<Chars>,
    ) -> Result<Self, DescriptorError> {
        let typ = match source.next() {
            Some('B') => BaseType::Byte,
            Some('C') => BaseType::Char,
            Some('D') => BaseType::Double,
            Some('F') => BaseType::Float,
            Some('I') => BaseType::Int,
            Some('J') => BaseType::Long,
            Some('S') => BaseType::Short,
            Some('Z') => BaseType::Boolean,
            Some('V') => BaseType::Void,
            Some(c) => return Err(DescriptorError::InvalidTypeCode(c)),
            None => return Err(DescriptorError::UnexpectedEnd),
        };
        Ok(typ)
    }
}

impl RenderDescriptor for BinaryName<'_> {
    fn render_to(&self, write_to: &mut String) {
        write_to.push('L');
        write_to.push_str(self.as_str());
        write_to.push(';');
    }
}

impl<'p> ParseDescriptor<'p> for BinaryName<'p> {
    fn parse_from(
        pool: &'p StringInterner,
        source: &mut Peekable<Chars>,
    ) -> Result<Self, DescriptorError> {
        match source.next() {
            Some('L') => {}
            Some(c) => return Err(DescriptorError::InvalidTypeCode(c)),
            None => return Err(DescriptorError::UnexpectedEnd),
        }
        let mut class_name = String::new();
        loop {
            match source.next() {
                None => return Err(DescriptorError::UnterminatedObject(class_name)),
                Some(';') => {
                    return BinaryName::from_string(pool, &class_name).map_err(Into::into)
                }
                Some(c) => class_name.push(c),
            }
        }
    }
}

/// Element type of an array
///
/// Multi-dimensional arrays are expressed purely through the dimension count
/// of [`ArrayType`], so an element is never itself an array.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ElementType<'p> {
    Base(BaseType),
    Object(BinaryName<'p>),
}

impl RenderDescriptor for ElementType<'_> {
    fn render_to(&self, write_to: &mut String) {
        match self {
            ElementType::Base(base_type) => base_type.render_to(write_to),
            ElementType::Object(class_name) => class_name.render_to(write_to),
        }
    }
}

impl<'p> ParseDescriptor<'p> for ElementType<'p> {
    fn parse_from(
        pool: &'p StringInterner,
        source: &mut Peekable<Chars>,
    ) -> Result<Self, DescriptorError> {
        match source.peek().copied() {
            Some('L') => BinaryName::parse_from(pool, source).map(ElementType::Object),
            _ => BaseType::parse_from(pool, source).map(ElementType::Base),
        }
    }
}

/// Array type
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ArrayType<'p> {
    /// Number of dimensions (`A[]` has 1, `A[][][]` has 3), always at least 1
    pub dimensions: usize,

    /// Underlying element type (`A` is the underlying element type of `A[][]`)
    pub element_type: ElementType<'p>,
}

impl RenderDescriptor for ArrayType<'_> {
    fn render_to(&self, write_to: &mut String) {
        for _ in 0..self.dimensions {
            write_to.push('[');
        }
        self.element_type.render_to(write_to);
    }
}

impl<'p> ParseDescriptor<'p> for ArrayType<'p> {
    fn parse_from(
        pool: &'p StringInterner,
        source: &mut Peekable<Chars>,
    ) -> Result<Self, DescriptorError> {
        let mut dimensions = 0;
        while source.next_if_eq(&'[').is_some() {
            dimensions += 1;
        }
        if dimensions < 1 {
            let c = source.peek().copied().ok_or(DescriptorError::UnexpectedEnd)?;
            return Err(DescriptorError::InvalidTypeCode(c));
        }
        Ok(ArrayType {
            dimensions,
            element_type: ElementType::parse_from(pool, source)?,
        })
    }
}

/// Type of a field, parameter, return value, or array element
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum JavaType<'p> {
    Base(BaseType),
    Object(BinaryName<'p>),
    Array(ArrayType<'p>),
}

impl<'p> JavaType<'p> {
    pub const fn object(class_name: BinaryName<'p>) -> JavaType<'p> {
        JavaType::Object(class_name)
    }

    pub const fn array(dimensions: usize, element_type: ElementType<'p>) -> JavaType<'p> {
        JavaType::Array(ArrayType {
            dimensions,
            element_type,
        })
    }

    pub const fn int() -> JavaType<'p> {
        JavaType::Base(BaseType::Int)
    }

    pub const fn long() -> JavaType<'p> {
        JavaType::Base(BaseType::Long)
    }

    pub const fn double() -> JavaType<'p> {
        JavaType::Base(BaseType::Double)
    }

    pub const fn boolean() -> JavaType<'p> {
        JavaType::Base(BaseType::Boolean)
    }

    pub const fn void() -> JavaType<'p> {
        JavaType::Base(BaseType::Void)
    }
}

impl<'p> From<ElementType<'p>> for JavaType<'p> {
    fn from(element_type: ElementType<'p>) -> JavaType<'p> {
        match element_type {
            ElementType::Base(base_type) => JavaType::Base(base_type),
            ElementType::Object(class_name) => JavaType::Object(class_name),
        }
    }
}

impl RenderDescriptor for JavaType<'_> {
    fn render_to(&self, write_to: &mut String) {
        match self {
            JavaType::Base(base_type) => base_type.render_to(write_to),
            JavaType::Object(class_name) => class_name.render_to(write_to),
            JavaType::Array(array_type) => array_type.render_to(write_to),
        }
    }
}

impl<'p> ParseDescriptor<'p> for JavaType<'p> {
    fn parse_from(
        pool: &'p StringInterner,
        source: &mut Peekable<Chars>,
    ) -> Result<Self, DescriptorError> {
        match source.peek().copied() {
            None => Err(DescriptorError::UnexpectedEnd),
            Some('[') => ArrayType::parse_from(pool, source).map(JavaType::Array),
            Some('L') => BinaryName::parse_from(pool, source).map(JavaType::Object),
            Some(_) => BaseType::parse_from(pool, source).map(JavaType::Base),
        }
    }
}

/// Signature of a method
///
/// The canonical descriptor string is derived once at construction and is the
/// sole basis for equality and hashing: two signatures with the same
/// descriptor are the same signature.
#[derive(Clone, Debug)]
pub struct MethodSignature<'p> {
    descriptor: &'p str,
    return_type: JavaType<'p>,
    parameter_types: Vec<JavaType<'p>>,
}

impl<'p> MethodSignature<'p> {
    /// Construct a signature, deriving and interning its canonical descriptor
    pub fn new(
        pool: &'p StringInterner,
        return_type: JavaType<'p>,
        parameter_types: Vec<JavaType<'p>>,
    ) -> Result<MethodSignature<'p>, DescriptorError> {
        if let Some(index) = parameter_types
            .iter()
            .position(|typ| *typ == JavaType::Base(BaseType::Void))
        {
            return Err(DescriptorError::VoidParameter(index));
        }
        Ok(MethodSignature::assemble(pool, return_type, parameter_types))
    }

    /// Assemble a signature whose parameters are already known to be non-void
    pub(crate) fn assemble(
        pool: &'p StringInterner,
        return_type: JavaType<'p>,
        parameter_types: Vec<JavaType<'p>>,
    ) -> MethodSignature<'p> {
        debug_assert!(!parameter_types.contains(&JavaType::Base(BaseType::Void)));
        let mut descriptor = String::from("(");
        for parameter in &parameter_types {
            parameter.render_to(&mut descriptor);
        }
        descriptor.push(')');
        return_type.render_to(&mut descriptor);
        MethodSignature {
            descriptor: pool.intern(&descriptor),
            return_type,
            parameter_types,
        }
    }

    /// Canonical descriptor string (e.g. `(ILjava/lang/String;)V`)
    pub fn descriptor(&self) -> &'p str {
        self.descriptor
    }

    pub fn return_type(&self) -> JavaType<'p> {
        self.return_type
    }

    pub fn parameter_types(&self) -> &[JavaType<'p>] {
        &self.parameter_types
    }
}

impl PartialEq for MethodSignature<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor
    }
}

impl Eq for MethodSignature<'_> {}

impl Hash for MethodSignature<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.descriptor.hash(state);
    }
}

impl RenderDescriptor for MethodSignature<'_> {
    fn render_to(&self, write_to: &mut String) {
        write_to.push_str(self.descriptor);
    }
}

impl<'p> ParseDescriptor<'p> for MethodSignature<'p> {
    fn parse_from(
        pool: &'p StringInterner,
        source: &mut Peekable<Chars>,
    ) -> Result<Self, DescriptorError> {
        if source.next() != Some('(') {
            return Err(DescriptorError::MissingOpenParen);
        }

        let mut parameter_types = vec![];
        loop {
            match source.peek().copied() {
                None => return Err(DescriptorError::MissingCloseParen),
                Some(')') => {
                    source.next();
                    break;
                }
                Some(_) => {
                    let parameter = JavaType::parse_from(pool, source)?;
                    if parameter == JavaType::Base(BaseType::Void) {
                        return Err(DescriptorError::VoidParameter(parameter_types.len()));
                    }
                    parameter_types.push(parameter);
                }
            }
        }

        let return_type = JavaType::parse_from(pool, source)?;
        Ok(MethodSignature::assemble(pool, return_type, parameter_types))
    }
}
