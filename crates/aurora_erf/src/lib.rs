//! This library handles reading from and creating **ERF** resource
//! containers used by BioWare's *Aurora* engine.
//!
//! # ERF Container Format Documentation
//!
//! The ERF (Encapsulated Resource File) format stores a flat list of named,
//! typed byte payloads. The same layout backs plain resource packs (`.erf`),
//! modules (`.mod`), hak packs (`.hak`), and save games (`.sav`); only the
//! leading file type tag differs.
//!
//! ## File Structure
//!
//! An ERF file consists of a header, a localized description string block, a
//! key list carrying each resource's identity, a resource list carrying each
//! payload's location, and the raw payload bytes.
//!
//! | Offset (bytes) | Field                  | Description                                      |
//! |----------------|------------------------|--------------------------------------------------|
//! | 0x0000         | File Type              | 4 bytes: `"ERF "`, `"MOD "`, `"SAV "`, `"HAK "`  |
//! | 0x0004         | Version                | 4 bytes: fixed value `"V1.0"`                    |
//! | 0x0008         | Language Count         | 4 bytes: number of description strings           |
//! | 0x000C         | Localized String Size  | 4 bytes: byte size of the description block      |
//! | 0x0010         | Entry Count            | 4 bytes: number of resources                     |
//! | 0x0014         | Description Offset     | 4 bytes: offset to the description block         |
//! | 0x0018         | Key List Offset        | 4 bytes: offset to the key list                  |
//! | 0x001C         | Resource List Offset   | 4 bytes: offset to the resource list             |
//! | 0x0020         | Build Year             | 4 bytes: years since 1900                        |
//! | 0x0024         | Build Day              | 4 bytes: days since January 1st                  |
//! | 0x0028         | Description StrRef     | 4 bytes: talk table line for the description     |
//! | 0x002C         | Reserved               | 116 bytes: zero filled                           |
//!
//! ### Localized Description Strings
//!
//! `Language Count` elements, each a 4-byte locale identifier, a 4-byte byte
//! length, and the text itself.
//!
//! ### Key List
//!
//! One 24-byte entry per resource: a NUL-padded 16-byte name, the 4-byte row
//! of the resource in the resource list, a 2-byte type code, and a 2-byte
//! legacy field that is round-tripped but carries no meaning.
//!
//! ### Resource List
//!
//! One 8-byte entry per resource: a 4-byte offset from the start of the file
//! and a 4-byte payload size. Payloads are stored back to back after the
//! resource list.
//!
//! ## Additional Information
//!
//! - **Endianness**: Little-endian for all multi-byte values
//! - **Identity**: name + type code; the format does not enforce uniqueness
//!   and neither does this library — lookups return the first match
//!

pub mod erf;
pub mod error;
pub mod types;

mod read;
mod write;

pub use erf::{Erf, ErfOptions, ErfResource, MAX_NAME_LEN};
pub use types::ErfDescription;
