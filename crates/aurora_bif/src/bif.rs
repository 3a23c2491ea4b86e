//! Types for reading and rebuilding BIF blob stores.

use binrw::{BinRead, BinWrite};
use std::io::{self, Cursor, Read, Seek, SeekFrom, Write};
use std::sync::Arc;
use tracing::instrument;

use crate::error::{Error, NotFoundError, Result};
use crate::key::Key;
use crate::types::{local_index, BifHeader, BifVariableRecord, VARIABLE_ENTRY_SIZE};

/// Metadata for one stored resource.
#[derive(Debug, Clone, Default)]
pub struct BifEntryData {
    /// Composite id as declared by the store
    pub id: u32,

    /// Numeric resource type code
    pub res_type: u32,

    /// Payload size in bytes
    pub size: u64,

    /// Offset from the start of the file to the payload
    pub data_start: u64,
}

#[derive(Debug)]
struct Shared {
    header: BifHeader,
    entries: Vec<BifEntryData>,
}

/// BIF blob store reader
///
/// The offset and size tables are read up front; payload bytes are read
/// lazily, one entry at a time. A store is usable on its own, but entries
/// only gain names once a [`Key`] catalog is attached.
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_bif_contents(reader: impl Read + Seek) -> aurora_bif::error::Result<()> {
///     let mut bif = aurora_bif::BifArchive::new(reader)?;
///
///     for i in 0..bif.len() {
///         let mut resource = bif.by_index(i)?;
///         println!("type: {}", resource.res_type());
///         std::io::copy(&mut resource, &mut std::io::sink())?;
///     }
///
///     Ok(())
/// }
/// ```
pub struct BifArchive<R> {
    reader: R,
    shared: Arc<Shared>,
    names: Vec<Option<Box<str>>>,
}

/// A struct for reading one resource out of a BIF store
pub struct BifResource<'a, R: Read + Seek> {
    data: BifEntryData,
    name: Option<&'a str>,
    reader: io::Take<&'a mut R>,
}

impl<R: Read + Seek> BifResource<'_, R> {
    /// Name resolved from an attached catalog, if any.
    pub fn name(&self) -> Option<&str> {
        self.name
    }

    /// The resource's numeric type code.
    pub fn res_type(&self) -> u32 {
        self.data.res_type
    }

    /// The payload size in bytes.
    pub fn size(&self) -> u64 {
        self.data.size
    }

    /// The starting offset of the payload within the store.
    pub fn data_start(&self) -> u64 {
        self.data.data_start
    }

    /// The local half of the declared composite id.
    pub fn local_index(&self) -> u32 {
        local_index(self.data.id)
    }
}

impl<R: Read + Seek> Read for BifResource<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl<R: Read + Seek> BifArchive<R> {
    /// Read a BIF store's tables, collecting the entries it declares.
    pub fn new(mut reader: R) -> Result<BifArchive<R>> {
        let shared = Self::get_metadata(&mut reader)?;
        let names = vec![None; shared.entries.len()];

        Ok(BifArchive {
            reader,
            shared: shared.into(),
            names,
        })
    }

    /// Number of entries contained in this store.
    pub fn len(&self) -> usize {
        self.shared.entries.len()
    }

    /// Whether this store contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata for the entry at the given position.
    pub fn entry(&self, index: usize) -> Option<&BifEntryData> {
        self.shared.entries.get(index)
    }

    /// Name of the entry at the given position, if a catalog resolved one.
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.names.get(index).and_then(|n| n.as_deref())
    }

    /// Get a contained resource by index.
    pub fn by_index(&mut self, index: usize) -> Result<BifResource<'_, R>> {
        let data = self
            .shared
            .entries
            .get(index)
            .ok_or(Error::ResourceNotFound(NotFoundError::Index(index)))?
            .clone();
        let name = self.names.get(index).and_then(|n| n.as_deref());

        self.reader.seek(SeekFrom::Start(data.data_start))?;
        let reader = self.reader.by_ref().take(data.size);

        Ok(BifResource { data, name, reader })
    }

    /// Resolve entry names from a catalog.
    ///
    /// `filename` is the name this store is registered under in the catalog,
    /// matched in full or by final path component. Every catalog entry for
    /// that archive copies its name onto the local entry it points at;
    /// entries the catalog does not mention keep no name, which is a valid
    /// degraded state rather than an error. Returns how many names resolved.
    #[instrument(skip(self, key), err)]
    pub fn attach_key(&mut self, key: &Key, filename: &str) -> Result<usize> {
        let archive = key
            .archive_index_for(filename)
            .ok_or_else(|| Error::ResourceNotFound(NotFoundError::Name(filename.to_owned())))?;

        let mut resolved = 0;
        for resource in key.resources() {
            if resource.archive != archive {
                continue;
            }
            if let Some(slot) = self.names.get_mut(resource.local as usize) {
                *slot = Some(resource.name.clone().into_boxed_str());
                resolved += 1;
            }
        }

        Ok(resolved)
    }

    /// Re-emit the store from its parsed entries.
    ///
    /// Header, table, and payloads land at their original offsets and the
    /// gaps between them are zero filled, so the output length always equals
    /// the parsed source's data extent.
    #[instrument(skip_all, err)]
    pub fn rebuild<W: Write>(&mut self, mut writer: W) -> Result<()> {
        let header = self.shared.header;
        let table_end = u64::from(header.variable_table_offset)
            + u64::from(VARIABLE_ENTRY_SIZE) * self.shared.entries.len() as u64;
        let total = self
            .shared
            .entries
            .iter()
            .map(|e| e.data_start + e.size)
            .fold(table_end, u64::max);

        let mut out = vec![0u8; total as usize];
        {
            let mut cursor = Cursor::new(out.as_mut_slice());
            header.write(&mut cursor)?;
            cursor.set_position(u64::from(header.variable_table_offset));
            for entry in &self.shared.entries {
                BifVariableRecord {
                    id: entry.id,
                    offset: entry.data_start as u32,
                    size: entry.size as u32,
                    res_type: entry.res_type,
                }
                .write(&mut cursor)?;
            }
        }

        for entry in &self.shared.entries {
            self.reader.seek(SeekFrom::Start(entry.data_start))?;
            let start = entry.data_start as usize;
            let end = start + entry.size as usize;
            self.reader.read_exact(&mut out[start..end])?;
        }

        writer.write_all(&out)?;
        Ok(())
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn get_metadata(reader: &mut R) -> Result<Shared> {
        let header = BifHeader::read(reader).map_err(|_| Error::InvalidArchive)?;
        if header.fixed_count != 0 {
            return Err(Error::FixedResourcesUnsupported(header.fixed_count));
        }

        reader.seek(SeekFrom::Start(u64::from(header.variable_table_offset)))?;
        let entries = (0..header.variable_count)
            .map(|_| {
                let record = BifVariableRecord::read(reader)?;
                Ok(BifEntryData {
                    id: record.id,
                    res_type: record.res_type,
                    size: u64::from(record.size),
                    data_start: u64::from(record.offset),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Shared { header, entries })
    }
}

#[cfg(test)]
mod test {
    use std::io::{Cursor, Read};

    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    use crate::bif::BifArchive;
    use crate::error::{Error, NotFoundError, Result};

    fn two_entry_store() -> Vec<u8> {
        let mut input = Vec::new();

        // Header (20)
        input.extend_from_slice(b"BIFFV1  ");
        input.extend_from_slice(&2u32.to_le_bytes());
        input.extend_from_slice(&0u32.to_le_bytes());
        input.extend_from_slice(&20u32.to_le_bytes());

        // Variable table (32)
        input.extend_from_slice(&0u32.to_le_bytes());
        input.extend_from_slice(&52u32.to_le_bytes());
        input.extend_from_slice(&11u32.to_le_bytes());
        input.extend_from_slice(&10u32.to_le_bytes());

        input.extend_from_slice(&1u32.to_le_bytes());
        input.extend_from_slice(&64u32.to_le_bytes());
        input.extend_from_slice(&11u32.to_le_bytes());
        input.extend_from_slice(&10u32.to_le_bytes());

        // Payloads, with one byte of conventional zero padding between them
        input.extend_from_slice(b"Hello World");
        input.push(0);
        input.extend_from_slice(b"World Hello");

        input
    }

    #[traced_test]
    #[test]
    fn read_store_with_entries() -> Result<()> {
        let mut bif = BifArchive::new(Cursor::new(two_entry_store()))?;
        assert_eq!(bif.len(), 2);

        let mut buffer = Vec::new();

        let mut first = bif.by_index(0)?;
        assert_eq!(first.data_start(), 52);
        assert_eq!(first.res_type(), 10);
        assert_eq!(first.name(), None);
        first.read_to_end(&mut buffer)?;
        assert_eq!(buffer, b"Hello World");
        buffer.clear();

        let mut second = bif.by_index(1)?;
        assert_eq!(second.data_start(), 64);
        assert_eq!(second.local_index(), 1);
        second.read_to_end(&mut buffer)?;
        assert_eq!(buffer, b"World Hello");

        Ok(())
    }

    #[test]
    fn read_index_out_of_range() -> Result<()> {
        let mut bif = BifArchive::new(Cursor::new(two_entry_store()))?;
        assert!(matches!(
            bif.by_index(5),
            Err(Error::ResourceNotFound(NotFoundError::Index(5)))
        ));
        Ok(())
    }

    #[test]
    fn read_invalid_magic() {
        let archive = BifArchive::new(Cursor::new(vec![0u8; 20]));
        assert!(matches!(archive, Err(Error::InvalidArchive)));
    }

    #[test]
    fn read_fixed_resources_unsupported() {
        let mut input = Vec::new();
        input.extend_from_slice(b"BIFFV1  ");
        input.extend_from_slice(&0u32.to_le_bytes());
        input.extend_from_slice(&3u32.to_le_bytes());
        input.extend_from_slice(&20u32.to_le_bytes());

        let archive = BifArchive::new(Cursor::new(input));
        assert!(matches!(archive, Err(Error::FixedResourcesUnsupported(3))));
    }

    #[traced_test]
    #[test]
    fn rebuild_reproduces_source_bytes() -> Result<()> {
        let original = two_entry_store();
        let mut bif = BifArchive::new(Cursor::new(original.clone()))?;

        let mut rebuilt = Vec::new();
        bif.rebuild(&mut rebuilt)?;

        assert_eq!(rebuilt.len(), original.len());
        assert_eq!(rebuilt, original);

        Ok(())
    }
}
