//! Parsing of ERF containers.

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};
use tracing::instrument;

use crate::erf::{Erf, ErfResource};
use crate::error::{Error, Result};
use crate::types::{ErfDescription, ErfHeader, ErfKeyEntry, ErfResourceEntry};

impl Erf {
    /// Read an ERF container, collecting the resources it contains.
    ///
    /// Parsing is eager: descriptions, key list, resource list, and every
    /// payload are consumed before this returns. Duplicate identities in the
    /// key list are preserved as-is.
    #[instrument(skip(reader), err)]
    pub fn read<R: Read + Seek>(mut reader: R) -> Result<Erf> {
        let header = ErfHeader::read(&mut reader)?;
        if &header.version != b"V1.0" {
            return Err(Error::InvalidArchive);
        }

        let descriptions = Self::get_descriptions(&mut reader, &header)?;
        let keys = Self::get_keys(&mut reader, &header)?;
        let resources = Self::get_resources(&mut reader, &header)?;

        let mut entries = Vec::with_capacity(header.entry_count as usize);
        for (key, resource) in keys.into_iter().zip(resources) {
            reader.seek(SeekFrom::Start(u64::from(resource.offset)))?;
            let mut data = vec![0u8; resource.size as usize];
            reader.read_exact(&mut data)?;

            entries.push(ErfResource {
                name: trim_name(&key.name),
                res_type: key.res_type,
                unused: key.unused,
                data,
            });
        }

        Ok(Erf {
            file_type: header.file_type,
            version: header.version,
            build_year: header.build_year,
            build_day: header.build_day,
            description_str_ref: header.description_str_ref,
            descriptions,
            entries,
        })
    }

    fn get_descriptions<R: Read + Seek>(
        reader: &mut R,
        header: &ErfHeader,
    ) -> Result<Vec<ErfDescription>> {
        reader.seek(SeekFrom::Start(u64::from(header.offset_to_localized_strings)))?;

        (0..header.language_count)
            .map(|_| {
                let language = reader.read_u32::<LittleEndian>()?;
                let size = reader.read_u32::<LittleEndian>()? as usize;
                let mut raw = vec![0u8; size];
                reader.read_exact(&mut raw)?;
                Ok(ErfDescription {
                    language,
                    text: String::from_utf8_lossy(&raw).into_owned(),
                })
            })
            .collect()
    }

    fn get_keys<R: Read + Seek>(reader: &mut R, header: &ErfHeader) -> Result<Vec<ErfKeyEntry>> {
        reader.seek(SeekFrom::Start(u64::from(header.offset_to_keys)))?;

        (0..header.entry_count)
            .map(|_| ErfKeyEntry::read(reader).map_err(Error::from))
            .collect()
    }

    fn get_resources<R: Read + Seek>(
        reader: &mut R,
        header: &ErfHeader,
    ) -> Result<Vec<ErfResourceEntry>> {
        reader.seek(SeekFrom::Start(u64::from(header.offset_to_resources)))?;

        (0..header.entry_count)
            .map(|_| ErfResourceEntry::read(reader).map_err(Error::from))
            .collect()
    }
}

fn trim_name(raw: &[u8; 16]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::erf::Erf;
    use crate::error::Result;

    fn single_entry_archive() -> Vec<u8> {
        let mut input = Vec::new();

        // Header (160)
        input.extend_from_slice(b"ERF V1.0");
        input.extend_from_slice(&1u32.to_le_bytes()); // language count
        input.extend_from_slice(&13u32.to_le_bytes()); // localized string size
        input.extend_from_slice(&1u32.to_le_bytes()); // entry count
        input.extend_from_slice(&160u32.to_le_bytes()); // descriptions
        input.extend_from_slice(&173u32.to_le_bytes()); // keys
        input.extend_from_slice(&197u32.to_le_bytes()); // resources
        input.extend_from_slice(&104u32.to_le_bytes()); // build year
        input.extend_from_slice(&33u32.to_le_bytes()); // build day
        input.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes()); // description strref
        input.extend_from_slice(&[0u8; 116]);

        // Descriptions (13)
        input.extend_from_slice(&0u32.to_le_bytes());
        input.extend_from_slice(&5u32.to_le_bytes());
        input.extend_from_slice(b"hello");

        // Key list (24)
        input.extend_from_slice(b"hello\0\0\0\0\0\0\0\0\0\0\0");
        input.extend_from_slice(&0u32.to_le_bytes());
        input.extend_from_slice(&10u16.to_le_bytes());
        input.extend_from_slice(&0u16.to_le_bytes());

        // Resource list (8)
        input.extend_from_slice(&205u32.to_le_bytes());
        input.extend_from_slice(&11u32.to_le_bytes());

        // Data (11)
        input.extend_from_slice(b"Hello World");

        input
    }

    #[traced_test]
    #[test]
    fn read_archive_with_entry() -> Result<()> {
        let erf = Erf::read(Cursor::new(single_entry_archive()))?;

        assert_eq!(erf.file_type(), *b"ERF ");
        assert_eq!(erf.build_year(), 104);
        assert_eq!(erf.build_day(), 33);
        assert_eq!(erf.len(), 1);

        assert_eq!(erf.descriptions().len(), 1);
        assert_eq!(erf.descriptions()[0].language, 0);
        assert_eq!(erf.descriptions()[0].text, "hello");

        let resource = erf.by_name("hello")?;
        assert_eq!(resource.res_type(), 10);
        assert_eq!(resource.data(), b"Hello World");

        Ok(())
    }

    #[traced_test]
    #[test]
    fn read_invalid_version() {
        let mut input = single_entry_archive();
        input[4..8].copy_from_slice(b"V2.0");

        let result = Erf::read(Cursor::new(input));
        assert!(result.is_err());
    }

    #[test]
    fn read_truncated_archive() {
        let input = b"ERF V1.0\x00\x00";
        assert!(Erf::read(Cursor::new(input)).is_err());
    }
}
