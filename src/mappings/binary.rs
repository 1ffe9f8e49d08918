//! SuperSrg binary mappings format
//!
//! All multi-byte values are big-endian. Strings carry a `u16` length prefix
//! and are UTF-8. The layout is:
//!
//! - magic header `SuperSrg binary mappings\0`
//! - `version` (`u32`), currently 1
//! - `compression` (string): `""` for none, `"lz4-block"` for a single LZ4
//!   block (with prepended size) covering everything that follows. `"lzma2"`
//!   and `"gzip"` are part of the format but deliberately not implemented
//!   here; any other token is rejected outright.
//! - `num_classes` (`u64`), then per class:
//!   - original and revised internal names (revised may be empty for
//!     "unchanged")
//!   - `num_methods` (`u32`), then per method: original name, revised name,
//!     original descriptor, revised descriptor (written empty, skipped on
//!     read)
//!   - `num_fields` (`u32`), then per field: original and revised names

use super::{Mappings, MappingsBuilder};
use crate::jvm::{
    BinaryName, DescriptorError, FieldData, MethodData, MethodSignature, Name, NameError,
    ParseDescriptor, UnqualifiedName,
};
use crate::util::StringInterner;
use byteorder::{BigEndian, ByteOrder, WriteBytesExt};
use indexmap::IndexMap;
use std::borrow::Cow;
use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::io::{self, Write};
use std::str::Utf8Error;

pub const MAGIC_HEADER: &str = "SuperSrg binary mappings";
pub const FORMAT_VERSION: u32 = 1;

/// Compression applied to everything after the negotiation preamble
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CompressionFormat {
    Uncompressed,
    /// One LZ4 block with a prepended uncompressed size
    Lz4Block,
    /// Recognized by the format, deliberately unimplemented here
    Lzma2,
    /// Recognized by the format, deliberately unimplemented here
    Gzip,
}

impl CompressionFormat {
    pub fn token(&self) -> &'static str {
        match self {
            CompressionFormat::Uncompressed => "",
            CompressionFormat::Lz4Block => "lz4-block",
            CompressionFormat::Lzma2 => "lzma2",
            CompressionFormat::Gzip => "gzip",
        }
    }

    /// Distinguishes recognized tokens from forbidden ones; whether a
    /// recognized format is actually decodable is decided by the caller
    fn from_token(token: &str) -> Result<CompressionFormat, BinaryMappingsError> {
        match token {
            "" => Ok(CompressionFormat::Uncompressed),
            "lz4-block" => Ok(CompressionFormat::Lz4Block),
            "lzma2" => Ok(CompressionFormat::Lzma2),
            "gzip" => Ok(CompressionFormat::Gzip),
            _ => Err(BinaryMappingsError::ForbiddenCompression(token.to_owned())),
        }
    }
}

/// Failure decoding binary mappings
///
/// Every variant is a hard error: decoding aborts wholesale rather than
/// returning a partially-populated builder, since a silently-partial rename
/// table produces incorrect renames downstream.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum BinaryMappingsError {
    /// A read ran past the end of the buffer
    UnexpectedEndOfData,
    /// A string's bytes were not valid UTF-8
    InvalidEncoding(Utf8Error),
    /// The magic header did not match
    InvalidHeader(String),
    UnsupportedVersion(u32),
    /// The data uses a compression this build cannot decode
    UnavailableCompression(CompressionFormat),
    /// The compression is part of the format but not implemented
    UnsupportedCompression(CompressionFormat),
    /// The compression token is not part of the format at all
    ForbiddenCompression(String),
    InvalidCompressedData(String),
    MalformedDescriptor(DescriptorError),
    InvalidName(NameError),
    /// A field entry renames a field to its own name
    RedundantFieldRename { class: String, name: String },
}

impl Display for BinaryMappingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            BinaryMappingsError::UnexpectedEndOfData => write!(f, "Unexpected end of data"),
            BinaryMappingsError::InvalidEncoding(err) => write!(f, "Invalid string: {}", err),
            BinaryMappingsError::InvalidHeader(header) => {
                write!(f, "Unexpected header: {:?}", header)
            }
            BinaryMappingsError::UnsupportedVersion(version) => {
                write!(f, "Unexpected version: {}", version)
            }
            BinaryMappingsError::UnavailableCompression(format) => {
                write!(f, "No decoder available for compression: {}", format.token())
            }
            BinaryMappingsError::UnsupportedCompression(format) => {
                write!(f, "Unsupported compression: {}", format.token())
            }
            BinaryMappingsError::ForbiddenCompression(token) => {
                write!(f, "Forbidden compression: {}", token)
            }
            BinaryMappingsError::InvalidCompressedData(message) => {
                write!(f, "Invalid compressed data: {}", message)
            }
            BinaryMappingsError::MalformedDescriptor(err) => {
                write!(f, "Malformed descriptor: {}", err)
            }
            BinaryMappingsError::InvalidName(err) => write!(f, "Invalid name: {}", err),
            BinaryMappingsError::RedundantFieldRename { class, name } => {
                write!(f, "Redundant field rename: {}/{}", class, name)
            }
        }
    }
}

impl Error for BinaryMappingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BinaryMappingsError::InvalidEncoding(err) => Some(err),
            BinaryMappingsError::MalformedDescriptor(err) => Some(err),
            BinaryMappingsError::InvalidName(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DescriptorError> for BinaryMappingsError {
    fn from(err: DescriptorError) -> BinaryMappingsError {
        BinaryMappingsError::MalformedDescriptor(err)
    }
}

impl From<NameError> for BinaryMappingsError {
    fn from(err: NameError) -> BinaryMappingsError {
        BinaryMappingsError::InvalidName(err)
    }
}

/// Single-use decoder for one binary mappings buffer
///
/// The cursor only ever moves forward; the one exception is the switch to a
/// freshly decompressed buffer, which restarts reads at its offset 0. Strings
/// are interned into the supplied pool as they are read, so everything the
/// resulting builder holds borrows from `pool`, not from the input buffer.
pub struct MappingsDecoder<'p, 'a> {
    pool: &'p StringInterner,
    data: Cow<'a, [u8]>,
    index: usize,
}

impl<'p, 'a> MappingsDecoder<'p, 'a> {
    pub fn new(pool: &'p StringInterner, data: &'a [u8]) -> MappingsDecoder<'p, 'a> {
        MappingsDecoder {
            pool,
            data: Cow::Borrowed(data),
            index: 0,
        }
    }

    /// Take the next `length` bytes, or fail without consuming anything
    fn take(&mut self, length: usize) -> Result<&[u8], BinaryMappingsError> {
        let end = self
            .index
            .checked_add(length)
            .filter(|&end| end <= self.data.len())
            .ok_or(BinaryMappingsError::UnexpectedEndOfData)?;
        let bytes = &self.data[self.index..end];
        self.index = end;
        Ok(bytes)
    }

    /// Big-endian unsigned integer from the next `bytes` bytes (at most 8)
    fn read_uint(&mut self, bytes: usize) -> Result<u64, BinaryMappingsError> {
        let raw = self.take(bytes)?;
        Ok(BigEndian::read_uint(raw, bytes))
    }

    fn read_u32(&mut self) -> Result<u32, BinaryMappingsError> {
        Ok(self.read_uint(4)? as u32)
    }

    fn read_u64(&mut self) -> Result<u64, BinaryMappingsError> {
        self.read_uint(8)
    }

    /// Length-prefixed UTF-8 string, interned into the pool
    fn read_string(&mut self) -> Result<&'p str, BinaryMappingsError> {
        let pool = self.pool;
        let length = self.read_uint(2)? as usize;
        let raw = self.take(length)?;
        let text = std::str::from_utf8(raw).map_err(BinaryMappingsError::InvalidEncoding)?;
        Ok(pool.intern(text))
    }

    /// UTF-8 string running up to (and consuming) the next NUL byte
    fn read_nullterminated(&mut self) -> Result<&'p str, BinaryMappingsError> {
        let pool = self.pool;
        let length = self.data[self.index..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(BinaryMappingsError::UnexpectedEndOfData)?;
        let raw = self.take(length)?;
        let text = std::str::from_utf8(raw).map_err(BinaryMappingsError::InvalidEncoding)?;
        let text = pool.intern(text);
        self.index += 1; // skip the terminator itself
        Ok(text)
    }

    #[cfg(feature = "lz4")]
    fn switch_to_decompressed(&mut self) -> Result<(), BinaryMappingsError> {
        let decompressed = lz4_flex::block::decompress_size_prepended(&self.data[self.index..])
            .map_err(|err| BinaryMappingsError::InvalidCompressedData(err.to_string()))?;
        self.data = Cow::Owned(decompressed);
        self.index = 0;
        Ok(())
    }

    #[cfg(not(feature = "lz4"))]
    fn switch_to_decompressed(&mut self) -> Result<(), BinaryMappingsError> {
        Err(BinaryMappingsError::UnavailableCompression(
            CompressionFormat::Lz4Block,
        ))
    }

    /// Decode the whole buffer into a builder
    ///
    /// The builder is returned rather than a built [`Mappings`] so callers
    /// can merge several sources before constructing the immutable table.
    pub fn decode(mut self) -> Result<MappingsBuilder<'p>, BinaryMappingsError> {
        let header = self.read_nullterminated()?;
        if header != MAGIC_HEADER {
            return Err(BinaryMappingsError::InvalidHeader(header.to_owned()));
        }
        let version = self.read_u32()?;
        if version != FORMAT_VERSION {
            return Err(BinaryMappingsError::UnsupportedVersion(version));
        }
        let compression = CompressionFormat::from_token(self.read_string()?)?;
        match compression {
            CompressionFormat::Uncompressed => {}
            CompressionFormat::Lz4Block => self.switch_to_decompressed()?,
            CompressionFormat::Lzma2 | CompressionFormat::Gzip => {
                return Err(BinaryMappingsError::UnsupportedCompression(compression));
            }
        }

        let mut builder = MappingsBuilder::new();
        let num_classes = self.read_u64()?;
        log::debug!(
            "Decoding {} classes ({} compression)",
            num_classes,
            if compression == CompressionFormat::Uncompressed { "no" } else { "lz4-block" },
        );
        for _ in 0..num_classes {
            let original_class = BinaryName::from_string(self.pool, self.read_string()?)?;
            let revised_name = self.read_string()?;
            if !revised_name.is_empty() {
                let revised_class = BinaryName::from_string(self.pool, revised_name)?;
                builder.insert_class(original_class, revised_class);
            }

            let num_methods = self.read_u32()?;
            for _ in 0..num_methods {
                let original_name = UnqualifiedName::from_string(self.pool, self.read_string()?)?;
                let revised_name = UnqualifiedName::from_string(self.pool, self.read_string()?)?;
                let signature = MethodSignature::parse(self.pool, self.read_string()?)?;
                self.read_string()?; // revised descriptor: present for symmetry, never checked
                builder.insert_method(
                    MethodData {
                        class: original_class,
                        name: original_name,
                        signature,
                    },
                    revised_name,
                );
            }

            let num_fields = self.read_u32()?;
            for _ in 0..num_fields {
                let original_name = UnqualifiedName::from_string(self.pool, self.read_string()?)?;
                let revised_name = UnqualifiedName::from_string(self.pool, self.read_string()?)?;
                if original_name == revised_name {
                    return Err(BinaryMappingsError::RedundantFieldRename {
                        class: original_class.as_str().to_owned(),
                        name: original_name.as_str().to_owned(),
                    });
                }
                builder.insert_field(
                    FieldData {
                        class: original_class,
                        name: original_name,
                    },
                    revised_name,
                );
            }
            log::trace!("Decoded class {}", original_class);
        }
        Ok(builder)
    }
}

/// Failure encoding binary mappings
#[derive(Debug)]
pub enum EncodeError {
    Io(io::Error),
    /// A string longer than the `u16` length prefix can carry
    OversizedString(usize),
    /// More member entries for one class than the `u32` count can carry
    OversizedTable(usize),
    /// The requested compression cannot be produced by this build
    UnsupportedCompression(CompressionFormat),
}

impl Display for EncodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            EncodeError::Io(err) => write!(f, "IO error: {}", err),
            EncodeError::OversizedString(length) => {
                write!(f, "String of {} bytes exceeds the u16 length prefix", length)
            }
            EncodeError::OversizedTable(length) => {
                write!(f, "Member table of {} entries exceeds the u32 count", length)
            }
            EncodeError::UnsupportedCompression(format) => {
                write!(f, "Cannot encode with compression: {}", format.token())
            }
        }
    }
}

impl Error for EncodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EncodeError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for EncodeError {
    fn from(err: io::Error) -> EncodeError {
        EncodeError::Io(err)
    }
}

/// Encoder producing the exact inverse of [`MappingsDecoder`]
pub struct MappingsEncoder<W: Write> {
    writer: W,
    compression: CompressionFormat,
}

impl<W: Write> MappingsEncoder<W> {
    /// Encoder with the default compression: `lz4-block` when this build can
    /// produce it, uncompressed otherwise
    pub fn new(writer: W) -> MappingsEncoder<W> {
        let compression = if cfg!(feature = "lz4") {
            CompressionFormat::Lz4Block
        } else {
            CompressionFormat::Uncompressed
        };
        MappingsEncoder {
            writer,
            compression,
        }
    }

    pub fn compression(mut self, compression: CompressionFormat) -> MappingsEncoder<W> {
        self.compression = compression;
        self
    }

    pub fn encode(mut self, mappings: &Mappings<'_>) -> Result<W, EncodeError> {
        let mut body = vec![];
        encode_body(&mut body, mappings)?;
        let body = match self.compression {
            CompressionFormat::Uncompressed => body,
            CompressionFormat::Lz4Block => compress_lz4(&body, self.compression)?,
            CompressionFormat::Lzma2 | CompressionFormat::Gzip => {
                return Err(EncodeError::UnsupportedCompression(self.compression));
            }
        };

        self.writer.write_all(MAGIC_HEADER.as_bytes())?;
        self.writer.write_u8(0)?;
        self.writer.write_u32::<BigEndian>(FORMAT_VERSION)?;
        write_string(&mut self.writer, self.compression.token())?;
        self.writer.write_all(&body)?;
        Ok(self.writer)
    }
}

#[cfg(feature = "lz4")]
fn compress_lz4(body: &[u8], _format: CompressionFormat) -> Result<Vec<u8>, EncodeError> {
    Ok(lz4_flex::block::compress_prepend_size(body))
}

#[cfg(not(feature = "lz4"))]
fn compress_lz4(_body: &[u8], format: CompressionFormat) -> Result<Vec<u8>, EncodeError> {
    Err(EncodeError::UnsupportedCompression(format))
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), EncodeError> {
    let length =
        u16::try_from(value.len()).map_err(|_| EncodeError::OversizedString(value.len()))?;
    writer.write_u16::<BigEndian>(length)?;
    writer.write_all(value.as_bytes())?;
    Ok(())
}

fn write_count<W: Write>(writer: &mut W, count: usize) -> Result<(), EncodeError> {
    let count = u32::try_from(count).map_err(|_| EncodeError::OversizedTable(count))?;
    writer.write_u32::<BigEndian>(count)?;
    Ok(())
}

fn encode_body<W: Write>(writer: &mut W, mappings: &Mappings<'_>) -> Result<(), EncodeError> {
    #[derive(Default)]
    struct ClassEntry<'m, 'p> {
        revised: Option<BinaryName<'p>>,
        methods: Vec<(&'m MethodData<'p>, &'m MethodData<'p>)>,
        fields: Vec<(&'m FieldData<'p>, &'m FieldData<'p>)>,
    }

    let mut by_class: IndexMap<BinaryName<'_>, ClassEntry<'_, '_>> = IndexMap::new();
    for (original, revised) in mappings.classes() {
        by_class.entry(original).or_default().revised = Some(revised);
    }
    for (original, revised) in mappings.methods() {
        by_class
            .entry(original.class)
            .or_default()
            .methods
            .push((original, revised));
    }
    for (original, revised) in mappings.fields() {
        by_class
            .entry(original.class)
            .or_default()
            .fields
            .push((original, revised));
    }

    writer.write_u64::<BigEndian>(by_class.len() as u64)?;
    for (original, entry) in &by_class {
        write_string(writer, original.as_str())?;
        write_string(writer, entry.revised.map(|name| name.as_str()).unwrap_or(""))?;

        write_count(writer, entry.methods.len())?;
        for (original, revised) in &entry.methods {
            write_string(writer, original.name.as_str())?;
            write_string(writer, revised.name.as_str())?;
            write_string(writer, original.signature.descriptor())?;
            write_string(writer, "")?; // revised descriptor is recoverable, skip it
        }

        write_count(writer, entry.fields.len())?;
        for (original, revised) in &entry.fields {
            write_string(writer, original.name.as_str())?;
            write_string(writer, revised.name.as_str())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn push_string(buf: &mut Vec<u8>, value: &str) {
        buf.extend_from_slice(&(value.len() as u16).to_be_bytes());
        buf.extend_from_slice(value.as_bytes());
    }

    /// Header + version + compression token
    fn preamble(compression: &str) -> Vec<u8> {
        let mut buf = vec![];
        buf.extend_from_slice(MAGIC_HEADER.as_bytes());
        buf.push(0);
        buf.extend_from_slice(&FORMAT_VERSION.to_be_bytes());
        push_string(&mut buf, compression);
        buf
    }

    #[test]
    fn empty_mappings_decode() {
        let pool = StringInterner::new();
        let mut buf = preamble("");
        buf.extend_from_slice(&0u64.to_be_bytes());

        let builder = MappingsDecoder::new(&pool, &buf).decode().unwrap();
        assert!(builder.classes.is_empty());
        assert!(builder.method_names.is_empty());
        assert!(builder.field_names.is_empty());
    }

    #[test]
    fn full_class_entry_decodes() {
        let pool = StringInterner::new();
        let mut buf = preamble("");
        buf.extend_from_slice(&1u64.to_be_bytes());
        push_string(&mut buf, "a/B");
        push_string(&mut buf, "x/Y");
        buf.extend_from_slice(&1u32.to_be_bytes());
        push_string(&mut buf, "run");
        push_string(&mut buf, "go");
        push_string(&mut buf, "(La/B;I)La/B;");
        push_string(&mut buf, ""); // revised descriptor, ignored
        buf.extend_from_slice(&1u32.to_be_bytes());
        push_string(&mut buf, "f");
        push_string(&mut buf, "g");

        let builder = MappingsDecoder::new(&pool, &buf).decode().unwrap();
        assert_eq!(builder.classes.len(), 1);
        assert_eq!(builder.method_names.len(), 1);
        assert_eq!(builder.field_names.len(), 1);

        let mappings = builder.build(&pool);
        let a_b = BinaryName::from_string(&pool, "a/B").unwrap();
        assert_eq!(mappings.remap_class(a_b).as_str(), "x/Y");

        let revised = mappings.remap_method(&MethodData {
            class: a_b,
            name: UnqualifiedName::from_string(&pool, "run").unwrap(),
            signature: MethodSignature::parse(&pool, "(La/B;I)La/B;").unwrap(),
        });
        assert_eq!(revised.class.as_str(), "x/Y");
        assert_eq!(revised.name.as_str(), "go");
        assert_eq!(revised.signature.descriptor(), "(Lx/Y;I)Lx/Y;");

        let revised = mappings.remap_field(&FieldData {
            class: a_b,
            name: UnqualifiedName::from_string(&pool, "f").unwrap(),
        });
        assert_eq!(revised.name.as_str(), "g");
    }

    #[test]
    fn empty_revised_class_means_unchanged() {
        let pool = StringInterner::new();
        let mut buf = preamble("");
        buf.extend_from_slice(&1u64.to_be_bytes());
        push_string(&mut buf, "a/B");
        push_string(&mut buf, "");
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&0u32.to_be_bytes());

        let builder = MappingsDecoder::new(&pool, &buf).decode().unwrap();
        assert!(builder.classes.is_empty());
    }

    #[test]
    fn truncated_buffers_fail_cleanly() {
        let pool = StringInterner::new();

        // Header bytes with no terminator (let alone a version or tables)
        let result = MappingsDecoder::new(&pool, MAGIC_HEADER.as_bytes()).decode();
        assert_eq!(result.unwrap_err(), BinaryMappingsError::UnexpectedEndOfData);

        // Terminated header but nothing after it
        let mut buf = MAGIC_HEADER.as_bytes().to_vec();
        buf.push(0);
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(result.unwrap_err(), BinaryMappingsError::UnexpectedEndOfData);

        // Class count promising more than the buffer holds
        let mut buf = preamble("");
        buf.extend_from_slice(&2u64.to_be_bytes());
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(result.unwrap_err(), BinaryMappingsError::UnexpectedEndOfData);

        // String length prefix promising more than the buffer holds
        let mut buf = preamble("");
        buf.extend_from_slice(&1u64.to_be_bytes());
        buf.extend_from_slice(&100u16.to_be_bytes());
        buf.push(b'a');
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(result.unwrap_err(), BinaryMappingsError::UnexpectedEndOfData);
    }

    #[test]
    fn header_and_version_are_checked() {
        let pool = StringInterner::new();

        let mut buf = b"Some other format".to_vec();
        buf.push(0);
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(
            result.unwrap_err(),
            BinaryMappingsError::InvalidHeader(String::from("Some other format")),
        );

        let mut buf = MAGIC_HEADER.as_bytes().to_vec();
        buf.push(0);
        buf.extend_from_slice(&2u32.to_be_bytes());
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(result.unwrap_err(), BinaryMappingsError::UnsupportedVersion(2));
    }

    #[test]
    fn compression_negotiation() {
        let pool = StringInterner::new();

        for token in ["gzip", "lzma2"] {
            let buf = preamble(token);
            let result = MappingsDecoder::new(&pool, &buf).decode();
            assert!(matches!(
                result.unwrap_err(),
                BinaryMappingsError::UnsupportedCompression(_),
            ));
        }

        let buf = preamble("zstd");
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(
            result.unwrap_err(),
            BinaryMappingsError::ForbiddenCompression(String::from("zstd")),
        );
    }

    #[test]
    fn malformed_strings_and_descriptors_fail() {
        let pool = StringInterner::new();

        let mut buf = preamble("");
        buf.extend_from_slice(&1u64.to_be_bytes());
        buf.extend_from_slice(&2u16.to_be_bytes());
        buf.extend_from_slice(&[0xFF, 0xFE]);
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert!(matches!(
            result.unwrap_err(),
            BinaryMappingsError::InvalidEncoding(_),
        ));

        let mut buf = preamble("");
        buf.extend_from_slice(&1u64.to_be_bytes());
        push_string(&mut buf, "a/B");
        push_string(&mut buf, "");
        buf.extend_from_slice(&1u32.to_be_bytes());
        push_string(&mut buf, "run");
        push_string(&mut buf, "go");
        push_string(&mut buf, "(I"); // descriptor missing its ')'
        push_string(&mut buf, "");
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(
            result.unwrap_err(),
            BinaryMappingsError::MalformedDescriptor(DescriptorError::MissingCloseParen),
        );

        let mut buf = preamble("");
        buf.extend_from_slice(&1u64.to_be_bytes());
        push_string(&mut buf, "a.b"); // dotted, not internal form
        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert!(matches!(
            result.unwrap_err(),
            BinaryMappingsError::InvalidName(NameError::IllegalCharacter { .. }),
        ));
    }

    #[test]
    fn redundant_field_rename_is_rejected() {
        let pool = StringInterner::new();
        let mut buf = preamble("");
        buf.extend_from_slice(&1u64.to_be_bytes());
        push_string(&mut buf, "a/B");
        push_string(&mut buf, "");
        buf.extend_from_slice(&0u32.to_be_bytes());
        buf.extend_from_slice(&1u32.to_be_bytes());
        push_string(&mut buf, "same");
        push_string(&mut buf, "same");

        let result = MappingsDecoder::new(&pool, &buf).decode();
        assert_eq!(
            result.unwrap_err(),
            BinaryMappingsError::RedundantFieldRename {
                class: String::from("a/B"),
                name: String::from("same"),
            },
        );
    }

    #[test]
    fn uncompressed_encode_decode_round_trip() {
        let pool = StringInterner::new();
        let mut builder = MappingsBuilder::new();
        let a_b = BinaryName::from_string(&pool, "a/B").unwrap();
        builder.insert_class(a_b, BinaryName::from_string(&pool, "x/Y").unwrap());
        builder.insert_method(
            MethodData {
                class: a_b,
                name: UnqualifiedName::from_string(&pool, "run").unwrap(),
                signature: MethodSignature::parse(&pool, "(La/B;)V").unwrap(),
            },
            UnqualifiedName::from_string(&pool, "go").unwrap(),
        );
        builder.insert_field(
            FieldData {
                class: a_b,
                name: UnqualifiedName::from_string(&pool, "f").unwrap(),
            },
            UnqualifiedName::from_string(&pool, "g").unwrap(),
        );
        let mappings = builder.build(&pool);

        let buf = MappingsEncoder::new(vec![])
            .compression(CompressionFormat::Uncompressed)
            .encode(&mappings)
            .unwrap();

        let decoded = MappingsDecoder::new(&pool, &buf).decode().unwrap().build(&pool);
        assert_eq!(decoded.remap_class(a_b).as_str(), "x/Y");
        let revised = decoded.remap_method(&MethodData {
            class: a_b,
            name: UnqualifiedName::from_string(&pool, "run").unwrap(),
            signature: MethodSignature::parse(&pool, "(La/B;)V").unwrap(),
        });
        assert_eq!(revised.name.as_str(), "go");
        assert_eq!(revised.signature.descriptor(), "(Lx/Y;)V");
    }

    #[cfg(feature = "lz4")]
    #[test]
    fn lz4_encode_decode_round_trip() {
        let pool = StringInterner::new();
        let mut builder = MappingsBuilder::new();
        for i in 0..50 {
            let original = BinaryName::from_string(&pool, &format!("obf/a{}", i)).unwrap();
            let revised = BinaryName::from_string(&pool, &format!("com/example/Clear{}", i)).unwrap();
            builder.insert_class(original, revised);
        }
        let mappings = builder.build(&pool);

        let buf = MappingsEncoder::new(vec![]).encode(&mappings).unwrap();

        let decoded = MappingsDecoder::new(&pool, &buf).decode().unwrap().build(&pool);
        let expected: Vec<(String, String)> = mappings
            .classes()
            .map(|(a, b)| (a.as_str().to_owned(), b.as_str().to_owned()))
            .collect();
        let actual: Vec<(String, String)> = decoded
            .classes()
            .map(|(a, b)| (a.as_str().to_owned(), b.as_str().to_owned()))
            .collect();
        assert_eq!(expected, actual);
    }
}
