//! Writing of ERF containers.

use binrw::BinWrite;
use byteorder::{LittleEndian, WriteBytesExt};
use std::io::{Cursor, Seek, Write};
use tracing::instrument;

use crate::erf::{Erf, MAX_NAME_LEN};
use crate::error::Result;
use crate::types::{ErfHeader, ErfKeyEntry, ErfResourceEntry, HEADER_SIZE, KEY_SIZE, RESOURCE_SIZE};

impl Erf {
    /// Write the container.
    ///
    /// The layout is deterministic: header, description strings, key list,
    /// resource list, then every payload concatenated in container order.
    /// Offsets are recomputed from the current entries, so writing after an
    /// append re-addresses earlier resources without touching their bytes.
    #[instrument(skip_all, err)]
    pub fn write<W: Write + Seek>(&self, mut writer: W) -> Result<()> {
        let localized_string_size: u32 = self
            .descriptions
            .iter()
            .map(|d| 8 + d.text.len() as u32)
            .sum();

        let entry_count = self.entries.len() as u32;
        let offset_to_localized_strings = HEADER_SIZE;
        let offset_to_keys = offset_to_localized_strings + localized_string_size;
        let offset_to_resources = offset_to_keys + KEY_SIZE * entry_count;
        let data_start = offset_to_resources + RESOURCE_SIZE * entry_count;

        let header = ErfHeader {
            file_type: self.file_type,
            version: self.version,
            language_count: self.descriptions.len() as u32,
            localized_string_size,
            entry_count,
            offset_to_localized_strings,
            offset_to_keys,
            offset_to_resources,
            build_year: self.build_year,
            build_day: self.build_day,
            description_str_ref: self.description_str_ref,
            reserved: [0; 116],
        };
        header.write(&mut writer)?;

        for description in &self.descriptions {
            writer.write_u32::<LittleEndian>(description.language)?;
            writer.write_u32::<LittleEndian>(description.text.len() as u32)?;
            writer.write_all(description.text.as_bytes())?;
        }

        for (index, entry) in self.entries.iter().enumerate() {
            let mut name = [0u8; MAX_NAME_LEN];
            name[..entry.name.len()].copy_from_slice(entry.name.as_bytes());
            ErfKeyEntry {
                name,
                resource_id: index as u32,
                res_type: entry.res_type,
                unused: entry.unused,
            }
            .write(&mut writer)?;
        }

        let mut offset = data_start;
        for entry in &self.entries {
            ErfResourceEntry {
                offset,
                size: entry.data.len() as u32,
            }
            .write(&mut writer)?;
            offset += entry.data.len() as u32;
        }

        for entry in &self.entries {
            writer.write_all(&entry.data)?;
        }

        Ok(())
    }

    /// Write the container into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}
