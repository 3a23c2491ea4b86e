//! Static catalog of the resource types used by the *Aurora* engine's
//! container formats.
//!
//! Every resource stored in an ERF container or a KEY/BIF pair is identified
//! by a 16-bit numeric type code. The same code maps to a canonical file
//! extension (used when extracting resources to disk) and, for the
//! GFF-carried record formats, to the four-character tag the resource carries
//! at offset 0 of its own payload.
//!
//! | Kind   | Examples                          | Identified by                 |
//! |--------|-----------------------------------|-------------------------------|
//! | Binary | `bmp`, `tga`, `wav`, `nss`, `2da` | type code only                |
//! | Gff    | `uti`, `utc`, `dlg`, `are`, `ifo` | type code + 4-byte header tag |
//! | Erf    | `mod`, `sav`, `hak`, `nwm`        | type code + 4-byte header tag |
//!
//! The catalog is a fixed table; lookups are by code, extension, header tag,
//! or directly from a raw payload via [`detect`]. Type code `0xFFFF` is the
//! engine's invalid sentinel and is deliberately absent from the table.

/// Invalid resource type sentinel used by the engine.
pub const INVALID_CODE: u16 = 0xFFFF;

/// Broad classification of a resource type's on-disk shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Raw binary or text payload with no common header.
    Binary,
    /// A GFF structured document; the payload starts with the 4-byte tag.
    Gff,
    /// An ERF container; the payload starts with the 4-byte tag.
    Erf,
}

/// One catalog row describing a known resource type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeInfo {
    /// Numeric type code as stored in ERF key lists and KEY tables.
    pub code: u16,

    /// Canonical file extension, lower case, without the dot.
    pub extension: &'static str,

    /// Four-character tag found at offset 0 of the resource's own payload,
    /// for types that carry one.
    pub tag: Option<[u8; 4]>,

    /// On-disk shape of the payload.
    pub category: Category,
}

impl TypeInfo {
    /// Whether this type is a struct-bearing GFF document.
    pub const fn is_container(&self) -> bool {
        matches!(self.category, Category::Gff)
    }
}

const fn binary(code: u16, extension: &'static str) -> TypeInfo {
    TypeInfo {
        code,
        extension,
        tag: None,
        category: Category::Binary,
    }
}

const fn gff(code: u16, extension: &'static str, tag: [u8; 4]) -> TypeInfo {
    TypeInfo {
        code,
        extension,
        tag: Some(tag),
        category: Category::Gff,
    }
}

const fn erf(code: u16, extension: &'static str, tag: [u8; 4]) -> TypeInfo {
    TypeInfo {
        code,
        extension,
        tag: Some(tag),
        category: Category::Erf,
    }
}

/// The full type table, ordered by code.
pub const TYPES: &[TypeInfo] = &[
    binary(0, "res"),
    binary(1, "bmp"),
    binary(2, "mve"),
    binary(3, "tga"),
    binary(4, "wav"),
    binary(6, "plt"),
    binary(7, "ini"),
    binary(8, "bmu"),
    binary(9, "mpg"),
    binary(10, "txt"),
    binary(2000, "plh"),
    binary(2001, "tex"),
    binary(2002, "mdl"),
    binary(2003, "thg"),
    binary(2005, "fnt"),
    binary(2007, "lua"),
    binary(2008, "slt"),
    binary(2009, "nss"),
    binary(2010, "ncs"),
    erf(2011, "mod", *b"MOD "),
    gff(2012, "are", *b"ARE "),
    binary(2013, "set"),
    gff(2014, "ifo", *b"IFO "),
    gff(2015, "bic", *b"BIC "),
    binary(2016, "wok"),
    binary(2017, "2da"),
    binary(2018, "tlk"),
    binary(2022, "txi"),
    gff(2023, "git", *b"GIT "),
    gff(2025, "uti", *b"UTI "),
    gff(2027, "utc", *b"UTC "),
    gff(2029, "dlg", *b"DLG "),
    gff(2030, "itp", *b"ITP "),
    gff(2032, "utt", *b"UTT "),
    binary(2033, "dds"),
    gff(2035, "uts", *b"UTS "),
    binary(2036, "ltr"),
    gff(2037, "gff", *b"GFF "),
    gff(2038, "fac", *b"FAC "),
    gff(2040, "ute", *b"UTE "),
    gff(2042, "utd", *b"UTD "),
    gff(2044, "utp", *b"UTP "),
    binary(2045, "dft"),
    gff(2046, "gic", *b"GIC "),
    gff(2047, "gui", *b"GUI "),
    gff(2051, "utm", *b"UTM "),
    binary(2052, "dwk"),
    binary(2053, "pwk"),
    gff(2056, "jrl", *b"JRL "),
    erf(2057, "sav", *b"SAV "),
    gff(2058, "utw", *b"UTW "),
    binary(2060, "ssf"),
    erf(2061, "hak", *b"HAK "),
    erf(2062, "nwm", *b"MOD "),
    binary(2063, "bik"),
    binary(2064, "ndb"),
    gff(2065, "ptm", *b"PTM "),
    gff(2066, "ptt", *b"PTT "),
];

/// Look up a type by its numeric code.
pub fn lookup(code: u16) -> Option<&'static TypeInfo> {
    TYPES.iter().find(|t| t.code == code)
}

/// Look up a type by its file extension, ASCII case-insensitive.
pub fn from_extension(extension: &str) -> Option<&'static TypeInfo> {
    TYPES
        .iter()
        .find(|t| t.extension.eq_ignore_ascii_case(extension))
}

/// Look up a type by the four-character tag its payload starts with.
///
/// Where several codes share a tag (`mod` and `nwm` are both `MOD `), the
/// lowest code wins.
pub fn from_tag(tag: &[u8; 4]) -> Option<&'static TypeInfo> {
    TYPES.iter().find(|t| t.tag.as_ref() == Some(tag))
}

/// Classify a raw resource payload by its own leading tag.
///
/// Returns `None` for payloads shorter than 4 bytes or with an unknown tag.
pub fn detect(data: &[u8]) -> Option<&'static TypeInfo> {
    let tag: [u8; 4] = data.get(..4)?.try_into().ok()?;
    from_tag(&tag)
}

/// Extension for a code, falling back to `"res"` for unknown codes.
pub fn extension_for(code: u16) -> &'static str {
    lookup(code).map_or("res", |t| t.extension)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::{detect, from_extension, from_tag, lookup, Category, INVALID_CODE};

    #[test]
    fn lookup_by_code() {
        let info = lookup(2025).unwrap();
        assert_eq!(info.extension, "uti");
        assert_eq!(info.tag, Some(*b"UTI "));
        assert!(info.is_container());
    }

    #[test]
    fn lookup_invalid_code() {
        assert_eq!(lookup(INVALID_CODE), None);
        assert_eq!(lookup(999), None);
    }

    #[test]
    fn lookup_by_extension_is_case_insensitive() {
        assert_eq!(from_extension("DLG").unwrap().code, 2029);
        assert_eq!(from_extension("dlg").unwrap().code, 2029);
        assert_eq!(from_extension("exe"), None);
    }

    #[test]
    fn lookup_by_tag() {
        assert_eq!(from_tag(b"UTC ").unwrap().code, 2027);
        // Shared tag resolves to the lowest code.
        assert_eq!(from_tag(b"MOD ").unwrap().code, 2011);
        assert_eq!(from_tag(b"ZZZZ"), None);
    }

    #[test]
    fn erf_types_are_not_struct_bearing() {
        let info = lookup(2061).unwrap();
        assert_eq!(info.category, Category::Erf);
        assert!(!info.is_container());
    }

    #[test]
    fn detect_from_payload() {
        let payload = b"UTI V3.2\x00\x00\x00\x00";
        assert_eq!(detect(payload).unwrap().extension, "uti");

        assert_eq!(detect(b"ab"), None);
        assert_eq!(detect(b"\x00\x01\x02\x03"), None);
    }
}
