//! The in-memory ERF container.

use bon::Builder;

use crate::error::{Error, NotFoundError, Result};
use crate::types::ErfDescription;

/// Maximum byte length of a resource name.
pub const MAX_NAME_LEN: usize = 16;

/// Options for creating a fresh container.
#[derive(Debug, Clone, Copy, Builder)]
pub struct ErfOptions {
    /// Container kind tag
    #[builder(default = *b"ERF ")]
    pub file_type: [u8; 4],

    /// Build year, counted from 1900
    #[builder(default)]
    pub build_year: u32,

    /// Build day, counted from January 1st
    #[builder(default)]
    pub build_day: u32,

    /// Talk table line describing the container, `0xFFFFFFFF` for none
    #[builder(default = 0xFFFF_FFFF)]
    pub description_str_ref: u32,
}

/// One named, typed resource held by a container.
#[derive(Debug, Clone, PartialEq)]
pub struct ErfResource {
    pub(crate) name: String,
    pub(crate) res_type: u16,
    pub(crate) unused: u16,
    pub(crate) data: Vec<u8>,
}

impl ErfResource {
    /// The resource's name, at most 16 bytes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resource's numeric type code.
    pub fn res_type(&self) -> u16 {
        self.res_type
    }

    /// The legacy per-resource field, round-tripped but never interpreted.
    pub fn unused(&self) -> u16 {
        self.unused
    }

    /// The raw payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

/// ERF resource container
///
/// A flat list of named, typed byte payloads, together with the container's
/// localized description strings. The container owns every payload; offsets
/// only exist on disk and are recomputed whenever the container is written.
///
/// ```
/// use aurora_erf::{Erf, ErfOptions};
///
/// # fn doit() -> aurora_erf::error::Result<()> {
/// let mut erf = Erf::new(ErfOptions::builder().file_type(*b"HAK ").build());
/// erf.add_typed("readme", 10, b"hello".to_vec())?;
///
/// let mut buffer = std::io::Cursor::new(Vec::new());
/// erf.write(&mut buffer)?;
/// # Ok(())
/// # }
/// # doit().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Erf {
    pub(crate) file_type: [u8; 4],
    pub(crate) version: [u8; 4],
    pub(crate) build_year: u32,
    pub(crate) build_day: u32,
    pub(crate) description_str_ref: u32,
    pub(crate) descriptions: Vec<ErfDescription>,
    pub(crate) entries: Vec<ErfResource>,
}

impl Erf {
    /// Create an empty container.
    pub fn new(options: ErfOptions) -> Self {
        Self {
            file_type: options.file_type,
            version: *b"V1.0",
            build_year: options.build_year,
            build_day: options.build_day,
            description_str_ref: options.description_str_ref,
            descriptions: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// The container kind tag.
    pub fn file_type(&self) -> [u8; 4] {
        self.file_type
    }

    /// The format version tag.
    pub fn version(&self) -> [u8; 4] {
        self.version
    }

    /// Build year, counted from 1900.
    pub fn build_year(&self) -> u32 {
        self.build_year
    }

    /// Build day, counted from January 1st.
    pub fn build_day(&self) -> u32 {
        self.build_day
    }

    /// Talk table line describing the container.
    pub fn description_str_ref(&self) -> u32 {
        self.description_str_ref
    }

    /// The localized description strings.
    pub fn descriptions(&self) -> &[ErfDescription] {
        &self.descriptions
    }

    /// Append a localized description string.
    pub fn add_description(&mut self, language: u32, text: impl Into<String>) {
        self.descriptions.push(ErfDescription {
            language,
            text: text.into(),
        });
    }

    /// Number of resources in the container.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether this container holds no resources.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The resources in their container order.
    pub fn resources(&self) -> &[ErfResource] {
        &self.entries
    }

    /// Returns an iterator over all the resource names in this container.
    pub fn resource_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Append a resource, detecting its type code from the payload's own
    /// leading tag.
    ///
    /// Payloads with no recognizable tag get the invalid type sentinel.
    pub fn add(&mut self, name: impl Into<String>, data: Vec<u8>) -> Result<()> {
        let res_type =
            aurora_types::detect(&data).map_or(aurora_types::INVALID_CODE, |info| info.code);
        self.add_typed(name, res_type, data)
    }

    /// Append a resource with an explicit type code.
    ///
    /// Duplicate identities are allowed, matching what the format itself
    /// tolerates; lookups return the first match.
    pub fn add_typed(
        &mut self,
        name: impl Into<String>,
        res_type: u16,
        data: Vec<u8>,
    ) -> Result<()> {
        let name = name.into();
        if name.len() > MAX_NAME_LEN {
            return Err(Error::NameTooLong(name));
        }
        self.entries.push(ErfResource {
            name,
            res_type,
            unused: 0,
            data,
        });
        Ok(())
    }

    /// Get the index of a resource by name, if it's present.
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }

    /// Search for a resource by name, returning the first match.
    pub fn by_name(&self, name: &str) -> Result<&ErfResource> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| Error::ResourceNotFound(NotFoundError::Name(name.to_owned())))
    }

    /// Search for a resource by name and type code, returning the first match.
    pub fn by_name_and_type(&self, name: &str, res_type: u16) -> Result<&ErfResource> {
        self.entries
            .iter()
            .find(|e| e.name == name && e.res_type == res_type)
            .ok_or_else(|| {
                Error::ResourceNotFound(NotFoundError::NameAndType(name.to_owned(), res_type))
            })
    }

    /// Get a contained resource by index.
    pub fn by_index(&self, index: usize) -> Result<&ErfResource> {
        self.entries
            .get(index)
            .ok_or(Error::ResourceNotFound(NotFoundError::Index(index)))
    }

    /// Remove and return the resource at the given index.
    pub fn remove(&mut self, index: usize) -> Result<ErfResource> {
        if index >= self.entries.len() {
            return Err(Error::ResourceNotFound(NotFoundError::Index(index)));
        }
        Ok(self.entries.remove(index))
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::erf::{Erf, ErfOptions};
    use crate::error::{Error, NotFoundError};

    #[test]
    fn add_detects_gff_payload_type() {
        let mut erf = Erf::new(ErfOptions::builder().build());
        erf.add("sword", b"UTI V3.2\x00\x00\x00\x00".to_vec()).unwrap();
        erf.add("notes", b"plain text".to_vec()).unwrap();

        assert_eq!(erf.by_index(0).unwrap().res_type(), 2025);
        assert_eq!(erf.by_index(1).unwrap().res_type(), 0xFFFF);
    }

    #[test]
    fn add_rejects_overlong_name() {
        let mut erf = Erf::new(ErfOptions::builder().build());
        let result = erf.add_typed("a_name_that_is_too_long", 10, Vec::new());
        assert!(matches!(result, Err(Error::NameTooLong(_))));
        assert!(erf.is_empty());
    }

    #[test]
    fn lookup_returns_first_match() {
        let mut erf = Erf::new(ErfOptions::builder().build());
        erf.add_typed("dup", 10, b"one".to_vec()).unwrap();
        erf.add_typed("dup", 10, b"two".to_vec()).unwrap();

        assert_eq!(erf.by_name("dup").unwrap().data(), b"one");
        assert_eq!(erf.index_for_name("dup"), Some(0));
    }

    #[test]
    fn lookup_misses_are_distinct_errors() {
        let erf = Erf::new(ErfOptions::builder().build());

        assert!(matches!(
            erf.by_name("missing"),
            Err(Error::ResourceNotFound(NotFoundError::Name(_)))
        ));
        assert!(matches!(
            erf.by_index(3),
            Err(Error::ResourceNotFound(NotFoundError::Index(3)))
        ));
        assert!(matches!(
            erf.by_name_and_type("missing", 10),
            Err(Error::ResourceNotFound(NotFoundError::NameAndType(_, 10)))
        ));
    }
}
