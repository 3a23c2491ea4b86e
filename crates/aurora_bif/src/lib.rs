//! This library handles reading from and rebuilding the **KEY** and **BIF**
//! archive pair used by BioWare's *Aurora* engine.
//!
//! # KEY / BIF Format Documentation
//!
//! The engine's core game data ships as a handful of large **BIF** blob
//! stores holding raw resource bytes, indexed by a single **KEY** catalog
//! that maps each resource's name and type to a location inside one of those
//! stores. The catalog holds no payload bytes; a store holds no names. The
//! two halves are bound together by composite resource ids: the upper 12
//! bits select an archive from the catalog's file table, the lower 20 bits a
//! position inside that archive.
//!
//! ## KEY File Structure
//!
//! | Offset (bytes) | Field                  | Description                                      |
//! |----------------|------------------------|--------------------------------------------------|
//! | 0x0000         | Magic                  | 8 bytes: `"KEY "` then version `"V1  "`          |
//! | 0x0008         | BIF Count              | 4 bytes: number of referenced archives           |
//! | 0x000C         | Key Count              | 4 bytes: number of located resources             |
//! | 0x0010         | File Table Offset      | 4 bytes: offset to the archive file table        |
//! | 0x0014         | Key Table Offset       | 4 bytes: offset to the key table                 |
//! | 0x0018         | Build Year             | 4 bytes: years since 1900                        |
//! | 0x001C         | Build Day              | 4 bytes: days since January 1st                  |
//! | 0x0020         | Reserved               | 32 bytes: zero filled                            |
//!
//! The file table holds one 12-byte entry per archive (byte size, filename
//! offset, filename length, legacy drive mask), pointing into a packed block
//! of filenames that are not NUL terminated. The key table holds one 22-byte
//! entry per resource: a NUL-padded 16-byte name, a 2-byte type code, and
//! the 4-byte composite id.
//!
//! ## BIF File Structure
//!
//! | Offset (bytes) | Field                  | Description                                      |
//! |----------------|------------------------|--------------------------------------------------|
//! | 0x0000         | Magic                  | 8 bytes: `"BIFF"` then version `"V1  "`          |
//! | 0x0008         | Variable Count         | 4 bytes: number of variable sized resources      |
//! | 0x000C         | Fixed Count            | 4 bytes: always zero in practice                 |
//! | 0x0010         | Variable Table Offset  | 4 bytes: offset to the variable resource table   |
//!
//! The variable table holds one 16-byte entry per resource: composite id,
//! payload offset, payload size, and type code. Payload bytes follow at the
//! offsets the table declares; any padding between them is zero filled and
//! preserved when a store is rebuilt.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte values
//! - **Attachment**: name resolution is optional; a store reads fine without
//!   its catalog, entries simply stay nameless
//!

pub mod bif;
pub mod error;
pub mod key;
pub mod types;

pub use bif::{BifArchive, BifEntryData, BifResource};
pub use key::{Key, KeyBifEntry, KeyResource, MAX_NAME_LEN};
