//! Two-phase serialization of GFF documents.
//!
//! The on-disk layout cross-references five tables by row and byte offset,
//! none of which exist while the data is still a tree. Writing therefore
//! runs in two phases: a depth-first collection pass that assigns every
//! struct and field its final table row and flattens complex payloads, then
//! a layout pass that emits the tables and resolves the remaining
//! cross-references from the rows recorded during collection.

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use indexmap::IndexSet;
use std::io::{Seek, Write};
use tracing::instrument;

use crate::document::Gff;
use crate::error::{Error, Result};
use crate::field::{Field, Label, LocString, Struct, Value};
use crate::types::{
    FieldRecord, GffHeader, StructRecord, FIELD_SIZE, HEADER_SIZE, LABEL_SIZE, NO_FIELDS,
    STRUCT_SIZE,
};

/// A struct table row captured during collection.
struct CollectedStruct {
    struct_type: u32,
    field_rows: Vec<u32>,
}

/// A field table row captured during collection, with its data slot already
/// resolved to an inline value, data offset, struct row, or list offset.
struct CollectedField {
    type_code: u32,
    label_index: u32,
    data: u32,
}

/// A list field's reservation in the list indices block.
struct ListSlot {
    offset: u32,
    struct_rows: Vec<u32>,
}

#[derive(Default)]
struct Collector {
    structs: Vec<CollectedStruct>,
    fields: Vec<CollectedField>,
    labels: IndexSet<Label>,
    field_data: Vec<u8>,
    lists: Vec<ListSlot>,
    list_bytes: u32,
}

impl Collector {
    /// Record a struct and everything below it, returning its table row.
    ///
    /// Rows are assigned in visitation order, so the row doubles as the
    /// identity other records use to point back at this struct.
    fn collect_struct(&mut self, source: &Struct) -> Result<u32> {
        let row = self.structs.len() as u32;
        self.structs.push(CollectedStruct {
            struct_type: source.struct_type(),
            field_rows: Vec::new(),
        });

        let mut field_rows = Vec::with_capacity(source.len());
        for field in source.fields() {
            field_rows.push(self.collect_field(field)?);
        }
        self.structs[row as usize].field_rows = field_rows;

        Ok(row)
    }

    /// Record a field, returning its table row.
    fn collect_field(&mut self, field: &Field) -> Result<u32> {
        let row = self.fields.len() as u32;
        let (label_index, _) = self.labels.insert_full(field.label().clone());

        // Reserve the row before descending so parents always precede their
        // children in the field table.
        self.fields.push(CollectedField {
            type_code: field.value().type_code(),
            label_index: label_index as u32,
            data: 0,
        });

        let data = match field.value() {
            Value::Byte(v) => u32::from(*v),
            Value::Char(v) => u32::from(*v as u8),
            Value::Word(v) => u32::from(*v),
            Value::Short(v) => u32::from(*v as u16),
            Value::Dword(v) => *v,
            Value::Int(v) => *v as u32,
            Value::Float(v) => v.to_bits(),
            Value::Dword64(v) => self.append_u64(*v)?,
            Value::Int64(v) => self.append_u64(*v as u64)?,
            Value::Double(v) => self.append_u64(v.to_bits())?,
            Value::String(v) => {
                let offset = self.data_offset();
                self.field_data.write_u32::<LittleEndian>(v.len() as u32)?;
                self.field_data.extend_from_slice(v.as_bytes());
                offset
            }
            Value::ResRef(v) => {
                let offset = self.data_offset();
                self.field_data.write_u8(v.as_str().len() as u8)?;
                self.field_data.extend_from_slice(v.as_str().as_bytes());
                offset
            }
            Value::LocString(v) => self.append_loc_string(v)?,
            Value::Void(v) => {
                let offset = self.data_offset();
                self.field_data.write_u32::<LittleEndian>(v.len() as u32)?;
                self.field_data.extend_from_slice(v);
                offset
            }
            Value::Orientation(quat) => {
                let offset = self.data_offset();
                for component in quat {
                    self.field_data.write_f32::<LittleEndian>(*component)?;
                }
                offset
            }
            Value::Vector(vec) => {
                let offset = self.data_offset();
                for component in vec {
                    self.field_data.write_f32::<LittleEndian>(*component)?;
                }
                offset
            }
            Value::StrRef(a, b) => {
                let offset = self.data_offset();
                self.field_data.write_i32::<LittleEndian>(*a)?;
                self.field_data.write_i32::<LittleEndian>(*b)?;
                offset
            }
            Value::Struct(nested) => self.collect_struct(nested)?,
            Value::List(items) => self.collect_list(items)?,
        };
        self.fields[row as usize].data = data;

        Ok(row)
    }

    /// Reserve the list's slot in the list indices block before descending,
    /// then record the rows its structs were assigned.
    fn collect_list(&mut self, items: &[Struct]) -> Result<u32> {
        let offset = self.list_bytes;
        self.list_bytes += 4 + 4 * items.len() as u32;

        let slot = self.lists.len();
        self.lists.push(ListSlot {
            offset,
            struct_rows: Vec::new(),
        });

        let struct_rows = items
            .iter()
            .map(|item| self.collect_struct(item))
            .collect::<Result<Vec<_>>>()?;
        self.lists[slot].struct_rows = struct_rows;

        Ok(offset)
    }

    fn data_offset(&self) -> u32 {
        self.field_data.len() as u32
    }

    fn append_u64(&mut self, value: u64) -> Result<u32> {
        let offset = self.data_offset();
        self.field_data.write_u64::<LittleEndian>(value)?;
        Ok(offset)
    }

    fn append_loc_string(&mut self, value: &LocString) -> Result<u32> {
        let offset = self.data_offset();

        let total: u32 = 8 + value
            .strings
            .iter()
            .map(|sub| 8 + sub.text.len() as u32)
            .sum::<u32>();
        self.field_data.write_u32::<LittleEndian>(total)?;
        self.field_data.write_u32::<LittleEndian>(value.str_ref)?;
        self.field_data
            .write_u32::<LittleEndian>(value.strings.len() as u32)?;
        for sub in &value.strings {
            self.field_data.write_i32::<LittleEndian>(sub.language)?;
            self.field_data
                .write_u32::<LittleEndian>(sub.text.len() as u32)?;
            self.field_data.extend_from_slice(sub.text.as_bytes());
        }

        Ok(offset)
    }
}

#[instrument(skip_all, err)]
pub(crate) fn write_document<W: Write + Seek>(gff: &Gff, mut writer: W) -> Result<()> {
    let mut collector = Collector::default();
    collector.collect_struct(gff.root())?;

    // Lay out the struct table, growing the field indices block for every
    // struct with more than one field.
    let mut field_indices: Vec<u8> = Vec::new();
    let mut struct_records = Vec::with_capacity(collector.structs.len());
    for collected in &collector.structs {
        let data = match collected.field_rows.as_slice() {
            [] => NO_FIELDS,
            [row] => *row,
            rows => {
                let offset = field_indices.len() as u32;
                for row in rows {
                    field_indices.write_u32::<LittleEndian>(*row)?;
                }
                offset
            }
        };
        struct_records.push(StructRecord {
            struct_type: collected.struct_type,
            data,
            field_count: collected.field_rows.len() as u32,
        });
    }

    // Fill the reservations made during collection, in the same order they
    // were made. Any divergence means the two phases disagreed about the
    // tree and the output would be corrupt.
    let mut list_indices: Vec<u8> = Vec::with_capacity(collector.list_bytes as usize);
    for slot in &collector.lists {
        if list_indices.len() as u32 != slot.offset {
            return Err(Error::InternalConsistency(
                "list block position diverged from its reservation",
            ));
        }
        list_indices.write_u32::<LittleEndian>(slot.struct_rows.len() as u32)?;
        for row in &slot.struct_rows {
            list_indices.write_u32::<LittleEndian>(*row)?;
        }
    }
    if list_indices.len() as u32 != collector.list_bytes {
        return Err(Error::InternalConsistency(
            "list block size diverged from its reservation",
        ));
    }

    let struct_offset = HEADER_SIZE;
    let field_offset = struct_offset + STRUCT_SIZE * struct_records.len() as u32;
    let label_offset = field_offset + FIELD_SIZE * collector.fields.len() as u32;
    let field_data_offset = label_offset + LABEL_SIZE * collector.labels.len() as u32;
    let field_indices_offset = field_data_offset + collector.field_data.len() as u32;
    let list_indices_offset = field_indices_offset + field_indices.len() as u32;

    let header = GffHeader {
        file_type: gff.file_type(),
        version: gff.version(),
        struct_offset,
        struct_count: struct_records.len() as u32,
        field_offset,
        field_count: collector.fields.len() as u32,
        label_offset,
        label_count: collector.labels.len() as u32,
        field_data_offset,
        field_data_size: collector.field_data.len() as u32,
        field_indices_offset,
        field_indices_size: field_indices.len() as u32,
        list_indices_offset,
        list_indices_size: list_indices.len() as u32,
    };

    header.write(&mut writer)?;
    for record in &struct_records {
        record.write(&mut writer)?;
    }
    for collected in &collector.fields {
        FieldRecord {
            field_type: collected.type_code,
            label_index: collected.label_index,
            data: collected.data,
        }
        .write(&mut writer)?;
    }
    for label in &collector.labels {
        writer.write_all(&label.to_padded())?;
    }
    writer.write_all(&collector.field_data)?;
    writer.write_all(&field_indices)?;
    writer.write_all(&list_indices)?;

    Ok(())
}
