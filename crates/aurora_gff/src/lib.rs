//! This library handles reading from and creating **GFF** documents used by
//! BioWare's *Aurora* engine.
//!
//! # GFF Document Format Documentation
//!
//! This crate provides utilities to read and modify data stored in the
//! **GFF** (Generic File Format) structured document format. GFF is the
//! container behind most of the engine's game data: object templates
//! (`.uti`, `.utc`, ...), dialogues (`.dlg`), areas (`.are`, `.git`), and
//! module metadata (`.ifo`) are all GFF documents with different file type
//! tags.
//!
//! ## File Structure
//!
//! A GFF file consists of a header followed by six sections that
//! cross-reference each other by table row and byte offset: a struct table,
//! a field table, a label table, a field data block, a field indices block,
//! and a list indices block.
//!
//! | Offset (bytes) | Field                  | Description                                    |
//! |----------------|------------------------|------------------------------------------------|
//! | 0x0000         | File Type              | 4 bytes: record kind tag, e.g. `"UTI "`        |
//! | 0x0004         | Version                | 4 bytes: format version tag, `"V3.2"`          |
//! | 0x0008         | Struct Offset          | 4 bytes: offset of the struct table            |
//! | 0x000C         | Struct Count           | 4 bytes: entries in the struct table           |
//! | 0x0010         | Field Offset           | 4 bytes: offset of the field table             |
//! | 0x0014         | Field Count            | 4 bytes: entries in the field table            |
//! | 0x0018         | Label Offset           | 4 bytes: offset of the label table             |
//! | 0x001C         | Label Count            | 4 bytes: entries in the label table            |
//! | 0x0020         | Field Data Offset      | 4 bytes: offset of the field data block        |
//! | 0x0024         | Field Data Size        | 4 bytes: byte size of the field data block     |
//! | 0x0028         | Field Indices Offset   | 4 bytes: offset of the field indices block     |
//! | 0x002C         | Field Indices Size     | 4 bytes: byte size of the field indices block  |
//! | 0x0030         | List Indices Offset    | 4 bytes: offset of the list indices block      |
//! | 0x0034         | List Indices Size      | 4 bytes: byte size of the list indices block   |
//!
//! ### Struct Table
//!
//! Each 12-byte entry holds an engine-defined type tag, a data slot, and a
//! field count. The data slot is overloaded on the field count: `0xFFFFFFFF`
//! for zero fields, a field table row for exactly one, and a byte offset
//! into the field indices block (where that many consecutive u32 rows live)
//! for more than one. The document's root struct is always row 0 and
//! conventionally carries type `0xFFFFFFFF`.
//!
//! ### Field Table
//!
//! Each 12-byte entry holds a numeric type code, a label table row, and a
//! data slot. *Simple* types store their value directly in the data slot;
//! *complex* types store a byte offset into the field data block; struct
//! fields store a struct table row; list fields store a byte offset into the
//! list indices block.
//!
//! | Code | Kind        | Storage | Encoding in the field data block          |
//! |------|-------------|---------|-------------------------------------------|
//! | 0    | Byte        | inline  |                                           |
//! | 1    | Char        | inline  |                                           |
//! | 2    | Word        | inline  |                                           |
//! | 3    | Short       | inline  |                                           |
//! | 4    | Dword       | inline  |                                           |
//! | 5    | Int         | inline  |                                           |
//! | 6    | Dword64     | complex | 8 bytes                                   |
//! | 7    | Int64       | complex | 8 bytes                                   |
//! | 8    | Float       | inline  |                                           |
//! | 9    | Double      | complex | 8 bytes                                   |
//! | 10   | String      | complex | u32 length + bytes                        |
//! | 11   | ResRef      | complex | u8 length + bytes                         |
//! | 12   | LocString   | complex | u32 total + u32 strref + u32 count + subs |
//! | 13   | Void        | complex | u32 length + bytes                        |
//! | 14   | Struct      | struct table row                                    |
//! | 15   | List        | list indices offset                                 |
//! | 16   | Orientation | complex | 4 × f32                                   |
//! | 17   | Vector      | complex | 3 × f32                                   |
//! | 18   | StrRef      | complex | 2 × i32                                   |
//!
//! ### Label Table
//!
//! Fixed 16-byte entries holding NUL-padded label text. Labels are
//! deduplicated document-wide; fields reference them by row.
//!
//! ### List Indices Block
//!
//! For every list field, a u32 struct count followed by that many u32 struct
//! table rows, at the byte offset stored in the field's data slot.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte values
//! - **Version**: `V3.2`; the version tag is round-tripped but not
//!   interpreted
//!

pub mod document;
pub mod error;
pub mod field;
pub mod types;

mod read;
mod write;

pub use document::{Gff, DEFAULT_VERSION, TOP_LEVEL_STRUCT_TYPE};
pub use field::{Field, Label, LocString, LocSubString, ResRef, Struct, Value};
