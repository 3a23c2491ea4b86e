//! Base types for the on-disk structure of a GFF document.

use binrw::{BinRead, BinWrite};

/// Byte size of [`GffHeader`].
pub const HEADER_SIZE: u32 = 56;

/// Byte size of one [`StructRecord`] table entry.
pub const STRUCT_SIZE: u32 = 12;

/// Byte size of one [`FieldRecord`] table entry.
pub const FIELD_SIZE: u32 = 12;

/// Byte size of one label table entry.
pub const LABEL_SIZE: u32 = 16;

/// Sentinel stored in a struct record's data slot when it has no fields.
pub const NO_FIELDS: u32 = 0xFFFF_FFFF;

/// GFF file header
///
/// 56 bytes: the document's own type and version tags followed by the offset
/// and size of each of the six layout sections. All offsets are from the
/// start of the file and all data is stored in little endian format.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct GffHeader {
    /// Four character tag naming the kind of record this document stores
    pub file_type: [u8; 4],

    /// Four character format version tag
    pub version: [u8; 4],

    /// Offset of the struct table
    pub struct_offset: u32,

    /// Number of entries in the struct table
    pub struct_count: u32,

    /// Offset of the field table
    pub field_offset: u32,

    /// Number of entries in the field table
    pub field_count: u32,

    /// Offset of the label table
    pub label_offset: u32,

    /// Number of entries in the label table
    pub label_count: u32,

    /// Offset of the field data block
    pub field_data_offset: u32,

    /// Size in bytes of the field data block
    pub field_data_size: u32,

    /// Offset of the field indices block
    pub field_indices_offset: u32,

    /// Size in bytes of the field indices block
    pub field_indices_size: u32,

    /// Offset of the list indices block
    pub list_indices_offset: u32,

    /// Size in bytes of the list indices block
    pub list_indices_size: u32,
}

/// Struct table entry
///
/// The data slot holds, depending on the field count: [`NO_FIELDS`] for zero
/// fields, a field table row for exactly one field, or a byte offset into
/// the field indices block for more than one.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct StructRecord {
    /// Engine defined struct type tag, opaque to this library
    pub struct_type: u32,

    /// Field row, field indices offset, or [`NO_FIELDS`]
    pub data: u32,

    /// Number of fields belonging to this struct
    pub field_count: u32,
}

/// Field table entry
///
/// The data slot holds the raw value for simple field types, a byte offset
/// into the field data block for complex ones, a struct table row for nested
/// structs, and a byte offset into the list indices block for lists.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct FieldRecord {
    /// Numeric field type code
    pub field_type: u32,

    /// Row of this field's label in the label table
    pub label_index: u32,

    /// Inline value or section reference, depending on the field type
    pub data: u32,
}
