//! Parsing of GFF documents into the in-memory tree.

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};
use tracing::instrument;

use crate::document::Gff;
use crate::error::{Error, Result};
use crate::field::{Field, Label, LocString, LocSubString, ResRef, Struct, Value, MAX_LABEL_LEN};
use crate::types::{FieldRecord, GffHeader, StructRecord};

/// The five cross-referencing sections of a document, slurped up front.
struct Tables {
    structs: Vec<StructRecord>,
    fields: Vec<FieldRecord>,
    labels: Vec<Label>,
    field_data: Vec<u8>,
    field_indices: Vec<u8>,
    list_indices: Vec<u8>,
}

#[instrument(skip(reader), err)]
pub(crate) fn read_document<R: Read + Seek>(mut reader: R) -> Result<Gff> {
    let header = GffHeader::read(&mut reader)?;
    let tables = read_tables(&mut reader, &header)?;

    // The root always lives at struct table row 0.
    let root = materialize_struct(&tables, 0)?;

    Ok(Gff::from_parts(header.file_type, header.version, root))
}

fn read_tables<R: Read + Seek>(reader: &mut R, header: &GffHeader) -> Result<Tables> {
    reader.seek(SeekFrom::Start(u64::from(header.struct_offset)))?;
    let structs = (0..header.struct_count)
        .map(|_| StructRecord::read(reader).map_err(Error::from))
        .collect::<Result<Vec<_>>>()?;

    reader.seek(SeekFrom::Start(u64::from(header.field_offset)))?;
    let fields = (0..header.field_count)
        .map(|_| FieldRecord::read(reader).map_err(Error::from))
        .collect::<Result<Vec<_>>>()?;

    reader.seek(SeekFrom::Start(u64::from(header.label_offset)))?;
    let labels = (0..header.label_count)
        .map(|_| {
            let mut raw = [0u8; MAX_LABEL_LEN];
            reader.read_exact(&mut raw)?;
            Ok(Label::from_padded(&raw))
        })
        .collect::<Result<Vec<_>>>()?;

    let field_data = read_block(reader, header.field_data_offset, header.field_data_size)?;
    let field_indices = read_block(
        reader,
        header.field_indices_offset,
        header.field_indices_size,
    )?;
    let list_indices = read_block(reader, header.list_indices_offset, header.list_indices_size)?;

    Ok(Tables {
        structs,
        fields,
        labels,
        field_data,
        field_indices,
        list_indices,
    })
}

fn read_block<R: Read + Seek>(reader: &mut R, offset: u32, size: u32) -> Result<Vec<u8>> {
    reader.seek(SeekFrom::Start(u64::from(offset)))?;
    let mut block = vec![0u8; size as usize];
    reader.read_exact(&mut block)?;
    Ok(block)
}

fn materialize_struct(tables: &Tables, index: usize) -> Result<Struct> {
    let record = tables
        .structs
        .get(index)
        .ok_or(Error::StructIndexOutOfRange(index))?;

    let mut result = Struct::new(record.struct_type);
    match record.field_count {
        0 => {}
        1 => {
            // A lone field lives directly in the field table.
            result.push(materialize_field(tables, record.data as usize, index)?);
        }
        count => {
            let mut rows = section(&tables.field_indices, record.data)
                .ok_or(Error::FieldIndicesOutOfRange(record.data))?;
            for _ in 0..count {
                let row = rows.read_u32::<LittleEndian>()? as usize;
                result.push(materialize_field(tables, row, index)?);
            }
        }
    }

    Ok(result)
}

fn materialize_field(tables: &Tables, row: usize, struct_index: usize) -> Result<Field> {
    let record = tables
        .fields
        .get(row)
        .ok_or(Error::FieldIndexOutOfRange(row))?;
    let label = tables
        .labels
        .get(record.label_index as usize)
        .ok_or(Error::LabelIndexOutOfRange(record.label_index as usize))?
        .clone();

    let value = match record.field_type {
        0 => Value::Byte(record.data as u8),
        1 => Value::Char(record.data as u8 as i8),
        2 => Value::Word(record.data as u16),
        3 => Value::Short(record.data as u16 as i16),
        4 => Value::Dword(record.data),
        5 => Value::Int(record.data as i32),
        6 => Value::Dword64(field_data(tables, record.data)?.read_u64::<LittleEndian>()?),
        7 => Value::Int64(field_data(tables, record.data)?.read_i64::<LittleEndian>()?),
        8 => Value::Float(f32::from_bits(record.data)),
        9 => Value::Double(field_data(tables, record.data)?.read_f64::<LittleEndian>()?),
        10 => read_string(tables, record.data)?,
        11 => read_resref(tables, record.data)?,
        12 => read_loc_string(tables, record.data)?,
        13 => read_void(tables, record.data)?,
        14 => Value::Struct(materialize_struct(tables, record.data as usize)?),
        15 => read_list(tables, record.data)?,
        16 => {
            let mut data = field_data(tables, record.data)?;
            let mut quat = [0f32; 4];
            data.read_f32_into::<LittleEndian>(&mut quat)?;
            Value::Orientation(quat)
        }
        17 => {
            let mut data = field_data(tables, record.data)?;
            let mut vec = [0f32; 3];
            data.read_f32_into::<LittleEndian>(&mut vec)?;
            Value::Vector(vec)
        }
        18 => {
            let mut data = field_data(tables, record.data)?;
            Value::StrRef(
                data.read_i32::<LittleEndian>()?,
                data.read_i32::<LittleEndian>()?,
            )
        }
        field_type => {
            return Err(Error::UnknownFieldType {
                field_type,
                struct_index,
            })
        }
    };

    Ok(Field::with_label(label, value))
}

/// Slice a cross-referenced block from the given byte offset onward.
fn section(block: &[u8], offset: u32) -> Option<&[u8]> {
    block.get(offset as usize..)
}

fn field_data(tables: &Tables, offset: u32) -> Result<&[u8]> {
    section(&tables.field_data, offset).ok_or(Error::FieldDataOutOfRange(offset))
}

fn read_string(tables: &Tables, offset: u32) -> Result<Value> {
    let mut data = field_data(tables, offset)?;
    let length = data.read_u32::<LittleEndian>()? as usize;
    let mut raw = vec![0u8; length];
    data.read_exact(&mut raw)?;
    Ok(Value::String(String::from_utf8_lossy(&raw).into_owned()))
}

fn read_resref(tables: &Tables, offset: u32) -> Result<Value> {
    let mut data = field_data(tables, offset)?;
    let length = data.read_u8()? as usize;
    let mut raw = vec![0u8; length];
    data.read_exact(&mut raw)?;
    Ok(Value::ResRef(ResRef::new(
        String::from_utf8_lossy(&raw).into_owned(),
    )?))
}

fn read_loc_string(tables: &Tables, offset: u32) -> Result<Value> {
    let mut data = field_data(tables, offset)?;
    let _total_size = data.read_u32::<LittleEndian>()?;
    let str_ref = data.read_u32::<LittleEndian>()?;
    let count = data.read_u32::<LittleEndian>()?;

    let mut strings = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let language = data.read_i32::<LittleEndian>()?;
        let length = data.read_u32::<LittleEndian>()? as usize;
        let mut raw = vec![0u8; length];
        data.read_exact(&mut raw)?;
        strings.push(LocSubString {
            language,
            text: String::from_utf8_lossy(&raw).into_owned(),
        });
    }

    Ok(Value::LocString(LocString { str_ref, strings }))
}

fn read_void(tables: &Tables, offset: u32) -> Result<Value> {
    let mut data = field_data(tables, offset)?;
    let length = data.read_u32::<LittleEndian>()? as usize;
    let mut raw = vec![0u8; length];
    data.read_exact(&mut raw)?;
    Ok(Value::Void(raw))
}

fn read_list(tables: &Tables, offset: u32) -> Result<Value> {
    let mut rows = section(&tables.list_indices, offset)
        .ok_or(Error::ListIndicesOutOfRange(offset))?;
    let count = rows.read_u32::<LittleEndian>()?;

    let mut structs = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let index = rows.read_u32::<LittleEndian>()? as usize;
        structs.push(materialize_struct(tables, index)?);
    }

    Ok(Value::List(structs))
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::document::Gff;
    use crate::error::{Error, Result};
    use crate::field::Value;

    #[traced_test]
    #[test]
    fn read_single_byte_field_document() -> Result<()> {
        #[rustfmt::skip]
        let input = [
            // Header (56)
            b'X', b'X', b'X', b' ',
            b'V', b'1', b'.', b'0',
            0x38, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, // structs
            0x44, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, // fields
            0x50, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, // labels
            0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // field data
            0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // field indices
            0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // list indices
            // Struct table (12)
            0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            // Field table (12)
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            // Label table (16)
            b'F', b'l', b'a', b'g', 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let gff = Gff::read(Cursor::new(input))?;
        assert_eq!(gff.file_type(), *b"XXX ");
        assert_eq!(gff.version(), *b"V1.0");
        assert_eq!(gff.root().struct_type(), 0xFFFF_FFFF);
        assert_eq!(gff.root().len(), 1);

        let field = gff.root().field("Flag").unwrap();
        assert_eq!(field.value(), &Value::Byte(1));

        Ok(())
    }

    #[traced_test]
    #[test]
    fn read_unknown_field_type() {
        #[rustfmt::skip]
        let input = [
            // Header (56)
            b'X', b'X', b'X', b' ',
            b'V', b'1', b'.', b'0',
            0x38, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x44, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x50, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x60, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            // Struct table
            0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            // Field table, type code 99
            0x63, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00,
            // Label table
            b'F', b'l', b'a', b'g', 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let result = Gff::read(Cursor::new(input));
        assert!(matches!(
            result,
            Err(Error::UnknownFieldType {
                field_type: 99,
                struct_index: 0
            })
        ));
    }

    #[test]
    fn read_truncated_header() {
        let input = [b'G', b'F', b'F', b' ', b'V', b'3', b'.', b'2', 0x38, 0x00];
        assert!(Gff::read(Cursor::new(input)).is_err());
    }

    #[test]
    fn read_struct_reference_out_of_range() {
        #[rustfmt::skip]
        let input = [
            // Header claiming one struct, but the table is empty.
            b'X', b'X', b'X', b' ',
            b'V', b'1', b'.', b'0',
            0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x38, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        let result = Gff::read(Cursor::new(input));
        assert!(matches!(result, Err(Error::StructIndexOutOfRange(0))));
    }
}
