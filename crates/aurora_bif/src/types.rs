//! Base types for the on-disk structure of KEY and BIF archives.

use binrw::{BinRead, BinWrite};

/// Byte size of [`KeyHeader`], including the magic.
pub const KEY_HEADER_SIZE: u32 = 64;

/// Byte size of one [`KeyFileEntry`].
pub const FILE_ENTRY_SIZE: u32 = 12;

/// Byte size of one [`KeyResRecord`].
pub const KEY_ENTRY_SIZE: u32 = 22;

/// Byte size of [`BifHeader`], including the magic.
pub const BIF_HEADER_SIZE: u32 = 20;

/// Byte size of one [`BifVariableRecord`].
pub const VARIABLE_ENTRY_SIZE: u32 = 16;

/// Archive half of a composite resource id.
pub const fn archive_index(res_id: u32) -> u32 {
    res_id >> 20
}

/// Local half of a composite resource id.
pub const fn local_index(res_id: u32) -> u32 {
    res_id & 0x000F_FFFF
}

/// Compose an archive index and a local index into a resource id.
pub const fn compose_id(archive: u32, local: u32) -> u32 {
    (archive << 20) | local
}

/// KEY file header
///
/// Defines the header of the KEY catalog, which always starts with "KEY "
/// followed by the version "V1  ". All data is stored in little endian
/// format.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"KEY V1  ", little)]
pub struct KeyHeader {
    /// Number of archives this catalog indexes
    pub bif_count: u32,

    /// Number of resources this catalog locates
    pub key_count: u32,

    /// Offset from the start of the file to the archive file table
    pub offset_to_file_table: u32,

    /// Offset from the start of the file to the key table
    pub offset_to_key_table: u32,

    /// Build year, counted from 1900
    pub build_year: u32,

    /// Build day, counted from January 1st
    pub build_day: u32,

    /// Reserved block, written as zeros
    pub reserved: [u8; 32],
}

impl Default for KeyHeader {
    fn default() -> Self {
        Self {
            bif_count: 0,
            key_count: 0,
            offset_to_file_table: KEY_HEADER_SIZE,
            offset_to_key_table: KEY_HEADER_SIZE,
            build_year: 0,
            build_day: 0,
            reserved: [0; 32],
        }
    }
}

/// Archive file table entry
///
/// Points at one archive's filename in the packed filename block. The drives
/// field encoded multi-disk installs and is round-tripped verbatim.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct KeyFileEntry {
    /// Byte size of the referenced archive
    pub file_size: u32,

    /// Offset from the start of the file to this archive's filename
    pub filename_offset: u32,

    /// Byte length of the filename, which is not NUL terminated
    pub filename_size: u16,

    /// Legacy drive mask with no modern meaning
    pub drives: u16,
}

/// Key table entry
///
/// Binds a resource identity to a composite id naming the archive and the
/// local position inside it.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct KeyResRecord {
    /// Resource name, NUL padded to 16 bytes
    pub name: [u8; 16],

    /// Numeric resource type code
    pub res_type: u16,

    /// Composite id, see [`archive_index`] and [`local_index`]
    pub res_id: u32,
}

/// BIF file header
///
/// Defines the header of the BIF blob store, which always starts with
/// "BIFF" followed by the version "V1  ". All data is stored in little
/// endian format.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(magic = b"BIFFV1  ", little)]
pub struct BifHeader {
    /// Number of variable sized resources
    pub variable_count: u32,

    /// Number of fixed sized resources, always zero in practice
    pub fixed_count: u32,

    /// Offset from the start of the file to the variable resource table
    pub variable_table_offset: u32,
}

/// Variable resource table entry
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct BifVariableRecord {
    /// Composite id; the local half is this entry's own table row
    pub id: u32,

    /// Offset from the start of the file to the payload
    pub offset: u32,

    /// Payload size in bytes
    pub size: u32,

    /// Numeric resource type code
    pub res_type: u32,
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{
        archive_index, compose_id, local_index, BifHeader, KeyHeader, KeyResRecord,
    };

    #[test]
    fn composite_id_round_trip() {
        let id = compose_id(3, 77);
        assert_eq!(archive_index(id), 3);
        assert_eq!(local_index(id), 77);
        assert_eq!(id, (3 << 20) | 77);
    }

    #[test]
    fn read_key_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            b'K', b'E', b'Y', b' ', b'V', b'1', b' ', b' ',
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
            0x4C, 0x00, 0x00, 0x00,
            0x68, 0x00, 0x00, 0x00,
            0xC9, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ]);

        let expected = KeyHeader {
            bif_count: 1,
            key_count: 2,
            offset_to_file_table: 64,
            offset_to_key_table: 76,
            build_year: 104,
            build_day: 201,
            reserved: [0; 32],
        };

        assert_eq!(KeyHeader::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_key_header_invalid_magic() {
        let mut input = Cursor::new(vec![0u8; 64]);
        assert!(KeyHeader::read(&mut input).is_err());
    }

    #[test]
    fn write_bif_header() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            b'B', b'I', b'F', b'F', b'V', b'1', b' ', b' ',
            0x02, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x14, 0x00, 0x00, 0x00,
        ];

        let header = BifHeader {
            variable_count: 2,
            fixed_count: 0,
            variable_table_offset: 20,
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn key_record_round_trip() -> Result<()> {
        let mut record = KeyResRecord {
            res_type: 2025,
            res_id: compose_id(1, 4),
            ..Default::default()
        };
        record.name[..5].copy_from_slice(b"sword");

        let mut buffer = Cursor::new(Vec::new());
        record.write(&mut buffer)?;
        assert_eq!(buffer.get_ref().len(), 22);

        buffer.set_position(0);
        assert_eq!(KeyResRecord::read(&mut buffer)?, record);

        Ok(())
    }
}
