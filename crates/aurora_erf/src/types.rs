//! Base types for the on-disk structure of an ERF container.

use binrw::{BinRead, BinWrite};

/// Byte size of [`ErfHeader`].
pub const HEADER_SIZE: u32 = 160;

/// Byte size of one [`ErfKeyEntry`].
pub const KEY_SIZE: u32 = 24;

/// Byte size of one [`ErfResourceEntry`].
pub const RESOURCE_SIZE: u32 = 8;

/// ERF file header
///
/// 160 bytes; the same layout backs the `ERF`, `MOD`, `SAV`, and `HAK`
/// container kinds, distinguished only by the leading tag. All data is
/// stored in little endian format.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct ErfHeader {
    /// Container kind tag, e.g. `"ERF "` or `"MOD "`
    pub file_type: [u8; 4],

    /// Format version tag, always `"V1.0"`
    pub version: [u8; 4],

    /// Number of localized description strings
    pub language_count: u32,

    /// Byte size of the localized description string block
    pub localized_string_size: u32,

    /// Number of resources stored in the container
    pub entry_count: u32,

    /// Offset from the start of the file to the description string block
    pub offset_to_localized_strings: u32,

    /// Offset from the start of the file to the key list
    pub offset_to_keys: u32,

    /// Offset from the start of the file to the resource list
    pub offset_to_resources: u32,

    /// Build year, counted from 1900
    pub build_year: u32,

    /// Build day, counted from January 1st
    pub build_day: u32,

    /// Talk table line describing the container, `0xFFFFFFFF` for none
    pub description_str_ref: u32,

    /// Reserved block, written as zeros
    pub reserved: [u8; 116],
}

impl Default for ErfHeader {
    fn default() -> Self {
        Self {
            file_type: *b"ERF ",
            version: *b"V1.0",
            language_count: 0,
            localized_string_size: 0,
            entry_count: 0,
            offset_to_localized_strings: HEADER_SIZE,
            offset_to_keys: HEADER_SIZE,
            offset_to_resources: HEADER_SIZE,
            build_year: 0,
            build_day: 0,
            description_str_ref: 0xFFFF_FFFF,
            reserved: [0; 116],
        }
    }
}

/// Key list entry
///
/// Carries a resource's identity: its NUL-padded name, its position in the
/// resource list, and its numeric type code. The trailing field is unused by
/// the engine and round-tripped verbatim.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct ErfKeyEntry {
    /// Resource name, NUL padded to 16 bytes
    pub name: [u8; 16],

    /// Row of this resource in the resource list
    pub resource_id: u32,

    /// Numeric resource type code
    pub res_type: u16,

    /// Legacy field with no modern meaning
    pub unused: u16,
}

/// Resource list entry
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq)]
#[brw(little)]
pub struct ErfResourceEntry {
    /// Offset from the start of the file to the resource's payload
    pub offset: u32,

    /// Payload size in bytes
    pub size: u32,
}

/// One localized description string.
#[derive(Debug, Clone, PartialEq)]
pub struct ErfDescription {
    /// Engine locale identifier
    pub language: u32,

    /// Description text for that locale
    pub text: String,
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{ErfHeader, ErfKeyEntry, ErfResourceEntry};

    #[test]
    fn read_key_entry() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            b'f', b'l', b'a', b'g', 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0xE9, 0x07,
            0x00, 0x00,
        ]);

        let mut expected = ErfKeyEntry {
            resource_id: 2,
            res_type: 2025,
            ..Default::default()
        };
        expected.name[..4].copy_from_slice(b"flag");

        assert_eq!(ErfKeyEntry::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn write_resource_entry() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0xA0, 0x00, 0x00, 0x00,
            0x0B, 0x00, 0x00, 0x00,
        ];

        let entry = ErfResourceEntry {
            offset: 160,
            size: 11,
        };

        let mut actual = Vec::new();
        entry.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn header_round_trip() -> Result<()> {
        let header = ErfHeader {
            file_type: *b"MOD ",
            entry_count: 3,
            build_year: 104,
            build_day: 201,
            ..Default::default()
        };

        let mut buffer = Cursor::new(Vec::new());
        header.write(&mut buffer)?;
        assert_eq!(buffer.get_ref().len(), 160);

        buffer.set_position(0);
        assert_eq!(ErfHeader::read(&mut buffer)?, header);

        Ok(())
    }
}
