//! The in-memory GFF document.

use std::io::{Cursor, Read, Seek, Write};

use crate::error::Result;
use crate::field::Struct;

/// Struct type tag conventionally carried by a document's root struct.
pub const TOP_LEVEL_STRUCT_TYPE: u32 = 0xFFFF_FFFF;

/// Format version tag stamped on freshly created documents.
pub const DEFAULT_VERSION: [u8; 4] = *b"V3.2";

/// An in-memory GFF document: type and version tags plus the root struct.
///
/// ```
/// use aurora_gff::{Gff, Value};
///
/// # fn doit() -> aurora_gff::error::Result<()> {
/// let mut gff = Gff::new(*b"UTI ");
/// gff.root_mut().add("Tag", Value::String("shortsword".into()))?;
///
/// let mut buffer = std::io::Cursor::new(Vec::new());
/// gff.write(&mut buffer)?;
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Gff {
    file_type: [u8; 4],
    version: [u8; 4],
    root: Struct,
}

impl Gff {
    /// Create an empty document with the given file type tag.
    pub fn new(file_type: [u8; 4]) -> Self {
        Self {
            file_type,
            version: DEFAULT_VERSION,
            root: Struct::new(TOP_LEVEL_STRUCT_TYPE),
        }
    }

    pub(crate) fn from_parts(file_type: [u8; 4], version: [u8; 4], root: Struct) -> Self {
        Self {
            file_type,
            version,
            root,
        }
    }

    /// The document's four character file type tag.
    pub fn file_type(&self) -> [u8; 4] {
        self.file_type
    }

    /// Replace the document's file type tag.
    pub fn set_file_type(&mut self, file_type: [u8; 4]) {
        self.file_type = file_type;
    }

    /// The document's four character version tag.
    ///
    /// Carried through parse and write untouched; only `V3.2` semantics are
    /// implemented.
    pub fn version(&self) -> [u8; 4] {
        self.version
    }

    /// The root struct.
    pub fn root(&self) -> &Struct {
        &self.root
    }

    /// Mutable access to the root struct.
    pub fn root_mut(&mut self) -> &mut Struct {
        &mut self.root
    }

    /// Consume the document, returning the root struct.
    pub fn into_root(self) -> Struct {
        self.root
    }

    /// Parse a document from a byte source.
    ///
    /// Parsing is eager; the document is fully materialized before this
    /// returns, and a failure constructs nothing.
    pub fn read<R: Read + Seek>(reader: R) -> Result<Gff> {
        crate::read::read_document(reader)
    }

    /// Serialize the document.
    ///
    /// Writing never mutates the tree, and the same tree always produces the
    /// same bytes.
    pub fn write<W: Write + Seek>(&self, writer: W) -> Result<()> {
        crate::write::write_document(self, writer)
    }

    /// Serialize the document into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}
