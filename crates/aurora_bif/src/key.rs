//! The KEY catalog document.

use binrw::{BinRead, BinWrite};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use tracing::instrument;

use crate::error::{Error, NotFoundError, Result};
use crate::types::{
    archive_index, compose_id, local_index, KeyFileEntry, KeyHeader, KeyResRecord,
    FILE_ENTRY_SIZE, KEY_HEADER_SIZE,
};

/// Maximum byte length of a resource name.
pub const MAX_NAME_LEN: usize = 16;

/// One archive referenced by a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBifEntry {
    /// Byte size of the referenced archive
    pub file_size: u32,

    /// Filename as stored, usually a backslash separated relative path
    pub filename: String,

    /// Legacy drive mask, round-tripped verbatim
    pub drives: u16,
}

/// One resource located by a catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyResource {
    /// Resource name, at most 16 bytes
    pub name: String,

    /// Numeric resource type code
    pub res_type: u16,

    /// Index into the catalog's archive list
    pub archive: u32,

    /// Position of the resource inside that archive
    pub local: u32,
}

/// KEY catalog
///
/// Maps resource identities to a location inside one of the archives the
/// catalog references. The catalog holds no resource bytes itself.
///
/// ```
/// use aurora_bif::Key;
///
/// # fn doit() -> aurora_bif::error::Result<()> {
/// let mut key = Key::new(104, 201);
/// let archive = key.add_bif("data\\misc.bif", 1024, 1);
/// key.add_resource("doortypes", 2017, archive, 0)?;
///
/// let (found_archive, local) = key.lookup("doortypes", 2017)?;
/// assert_eq!((found_archive, local), (archive, 0));
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Key {
    build_year: u32,
    build_day: u32,
    bifs: Vec<KeyBifEntry>,
    resources: Vec<KeyResource>,
}

impl Key {
    /// Create an empty catalog.
    pub fn new(build_year: u32, build_day: u32) -> Self {
        Self {
            build_year,
            build_day,
            bifs: Vec::new(),
            resources: Vec::new(),
        }
    }

    /// Build year, counted from 1900.
    pub fn build_year(&self) -> u32 {
        self.build_year
    }

    /// Build day, counted from January 1st.
    pub fn build_day(&self) -> u32 {
        self.build_day
    }

    /// The archives this catalog references.
    pub fn bifs(&self) -> &[KeyBifEntry] {
        &self.bifs
    }

    /// The resources this catalog locates.
    pub fn resources(&self) -> &[KeyResource] {
        &self.resources
    }

    /// Register an archive, returning its index for use in resource entries.
    pub fn add_bif(&mut self, filename: impl Into<String>, file_size: u32, drives: u16) -> u32 {
        self.bifs.push(KeyBifEntry {
            file_size,
            filename: filename.into(),
            drives,
        });
        (self.bifs.len() - 1) as u32
    }

    /// Register a resource at a location.
    pub fn add_resource(
        &mut self,
        name: impl Into<String>,
        res_type: u16,
        archive: u32,
        local: u32,
    ) -> Result<()> {
        let name = name.into();
        if name.len() > MAX_NAME_LEN {
            return Err(Error::NameTooLong(name));
        }
        if local_index(local) != local {
            return Err(Error::LocalIndexTooLarge(local));
        }
        self.resources.push(KeyResource {
            name,
            res_type,
            archive,
            local,
        });
        Ok(())
    }

    /// Locate a resource by name and type code.
    ///
    /// Names compare ASCII case-insensitively, matching the engine. Returns
    /// the archive index and the local position inside that archive.
    pub fn lookup(&self, name: &str, res_type: u16) -> Result<(u32, u32)> {
        self.resources
            .iter()
            .find(|r| r.res_type == res_type && r.name.eq_ignore_ascii_case(name))
            .map(|r| (r.archive, r.local))
            .ok_or_else(|| {
                Error::ResourceNotFound(NotFoundError::NameAndType(name.to_owned(), res_type))
            })
    }

    /// Index of the referenced archive whose filename matches.
    ///
    /// Matches the stored name in full or by its final path component,
    /// ASCII case-insensitively.
    pub fn archive_index_for(&self, filename: &str) -> Option<u32> {
        self.bifs
            .iter()
            .position(|b| matches_filename(&b.filename, filename))
            .map(|index| index as u32)
    }

    /// Read a KEY catalog.
    #[instrument(skip(reader), err)]
    pub fn read<R: Read + Seek>(mut reader: R) -> Result<Key> {
        let header = KeyHeader::read(&mut reader)?;

        reader.seek(SeekFrom::Start(u64::from(header.offset_to_file_table)))?;
        let file_entries = (0..header.bif_count)
            .map(|_| KeyFileEntry::read(&mut reader).map_err(Error::from))
            .collect::<Result<Vec<_>>>()?;

        let mut bifs = Vec::with_capacity(file_entries.len());
        for entry in &file_entries {
            reader.seek(SeekFrom::Start(u64::from(entry.filename_offset)))?;
            let mut raw = vec![0u8; entry.filename_size as usize];
            reader.read_exact(&mut raw)?;
            bifs.push(KeyBifEntry {
                file_size: entry.file_size,
                filename: String::from_utf8_lossy(&raw).into_owned(),
                drives: entry.drives,
            });
        }

        reader.seek(SeekFrom::Start(u64::from(header.offset_to_key_table)))?;
        let resources = (0..header.key_count)
            .map(|_| {
                let record = KeyResRecord::read(&mut reader)?;
                Ok(KeyResource {
                    name: trim_name(&record.name),
                    res_type: record.res_type,
                    archive: archive_index(record.res_id),
                    local: local_index(record.res_id),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Key {
            build_year: header.build_year,
            build_day: header.build_day,
            bifs,
            resources,
        })
    }

    /// Write the catalog.
    ///
    /// The layout is deterministic: header, archive file table, packed
    /// filenames, key table. Offsets are recomputed from the current
    /// entries.
    #[instrument(skip_all, err)]
    pub fn write<W: Write + Seek>(&self, mut writer: W) -> Result<()> {
        let offset_to_file_table = KEY_HEADER_SIZE;
        let filenames_start = offset_to_file_table + FILE_ENTRY_SIZE * self.bifs.len() as u32;
        let filenames_size: u32 = self.bifs.iter().map(|b| b.filename.len() as u32).sum();
        let offset_to_key_table = filenames_start + filenames_size;

        let header = KeyHeader {
            bif_count: self.bifs.len() as u32,
            key_count: self.resources.len() as u32,
            offset_to_file_table,
            offset_to_key_table,
            build_year: self.build_year,
            build_day: self.build_day,
            reserved: [0; 32],
        };
        header.write(&mut writer)?;

        let mut filename_offset = filenames_start;
        for bif in &self.bifs {
            KeyFileEntry {
                file_size: bif.file_size,
                filename_offset,
                filename_size: bif.filename.len() as u16,
                drives: bif.drives,
            }
            .write(&mut writer)?;
            filename_offset += bif.filename.len() as u32;
        }

        for bif in &self.bifs {
            writer.write_all(bif.filename.as_bytes())?;
        }

        for resource in &self.resources {
            let mut name = [0u8; MAX_NAME_LEN];
            name[..resource.name.len()].copy_from_slice(resource.name.as_bytes());
            KeyResRecord {
                name,
                res_type: resource.res_type,
                res_id: compose_id(resource.archive, resource.local),
            }
            .write(&mut writer)?;
        }

        Ok(())
    }

    /// Write the catalog into a fresh buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());
        self.write(&mut buffer)?;
        Ok(buffer.into_inner())
    }
}

fn trim_name(raw: &[u8; 16]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

pub(crate) fn matches_filename(stored: &str, candidate: &str) -> bool {
    if stored.eq_ignore_ascii_case(candidate) {
        return true;
    }
    let base = stored.rsplit(['\\', '/']).next().unwrap_or(stored);
    base.eq_ignore_ascii_case(candidate)
}
