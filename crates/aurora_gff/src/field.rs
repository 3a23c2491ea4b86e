//! In-memory model of GFF structs, fields, and their values.

use derive_more::derive::Display;

use crate::error::{Error, Result};

/// Maximum byte length of a [`Label`].
pub const MAX_LABEL_LEN: usize = 16;

/// Maximum byte length of a [`ResRef`].
pub const MAX_RESREF_LEN: usize = 255;

/// A field label.
///
/// Labels are at most 16 bytes long, identify a field within its containing
/// struct, and are deduplicated document-wide into a shared table when the
/// document is written.
#[derive(Display, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    /// Create a label, rejecting text longer than [`MAX_LABEL_LEN`] bytes.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.len() > MAX_LABEL_LEN {
            return Err(Error::LabelTooLong(text));
        }
        Ok(Self(text))
    }

    /// View the label as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode a NUL padded label table entry, trimming the padding.
    pub(crate) fn from_padded(raw: &[u8; MAX_LABEL_LEN]) -> Self {
        let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
        Self(String::from_utf8_lossy(&raw[..end]).into_owned())
    }

    /// The NUL padded form written to the label table.
    pub(crate) fn to_padded(&self) -> [u8; MAX_LABEL_LEN] {
        let mut out = [0u8; MAX_LABEL_LEN];
        out[..self.0.len()].copy_from_slice(self.0.as_bytes());
        out
    }
}

impl TryFrom<&str> for Label {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// A resource reference string.
///
/// Stored on disk with a one byte length prefix, so at most 255 bytes.
#[derive(Display, Debug, Clone, Default, PartialEq, Eq)]
pub struct ResRef(String);

impl ResRef {
    /// Create a resref, rejecting text longer than [`MAX_RESREF_LEN`] bytes.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.len() > MAX_RESREF_LEN {
            return Err(Error::ResRefTooLong(text));
        }
        Ok(Self(text))
    }

    /// View the resref as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for ResRef {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

/// One localized substring of a [`LocString`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocSubString {
    /// Engine locale identifier
    pub language: i32,
    /// The text for that locale
    pub text: String,
}

/// A localized string.
///
/// Carries a talk table reference plus zero or more inline per-locale
/// strings, kept in their on-disk order.
#[derive(Debug, Clone, PartialEq)]
pub struct LocString {
    /// Talk table line referenced by this string, `0xFFFFFFFF` for none
    pub str_ref: u32,
    /// Inline per-locale strings
    pub strings: Vec<LocSubString>,
}

impl LocString {
    /// A localized string resolved purely through the talk table.
    pub fn from_str_ref(str_ref: u32) -> Self {
        Self {
            str_ref,
            strings: Vec::new(),
        }
    }

    /// Append an inline string for a locale.
    pub fn add(&mut self, language: i32, text: impl Into<String>) {
        self.strings.push(LocSubString {
            language,
            text: text.into(),
        });
    }
}

/// A single field value, one of the nineteen kinds the format defines.
///
/// The discriminant order follows the numeric type codes stored in the field
/// table, see [`Value::type_code`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Unsigned 8 bit integer
    Byte(u8),
    /// Signed 8 bit integer
    Char(i8),
    /// Unsigned 16 bit integer
    Word(u16),
    /// Signed 16 bit integer
    Short(i16),
    /// Unsigned 32 bit integer
    Dword(u32),
    /// Signed 32 bit integer
    Int(i32),
    /// Unsigned 64 bit integer
    Dword64(u64),
    /// Signed 64 bit integer
    Int64(i64),
    /// 32 bit float
    Float(f32),
    /// 64 bit float
    Double(f64),
    /// Length prefixed string
    String(String),
    /// Short resource reference string
    ResRef(ResRef),
    /// Localized string
    LocString(LocString),
    /// Opaque byte blob
    Void(Vec<u8>),
    /// Nested struct
    Struct(Struct),
    /// Homogeneous ordered list of structs
    List(Vec<Struct>),
    /// Orientation quaternion, four floats
    Orientation([f32; 4]),
    /// Position vector, three floats
    Vector([f32; 3]),
    /// Talk table string reference pair
    StrRef(i32, i32),
}

impl Value {
    /// Numeric type code as stored in the field table.
    pub fn type_code(&self) -> u32 {
        match self {
            Value::Byte(_) => 0,
            Value::Char(_) => 1,
            Value::Word(_) => 2,
            Value::Short(_) => 3,
            Value::Dword(_) => 4,
            Value::Int(_) => 5,
            Value::Dword64(_) => 6,
            Value::Int64(_) => 7,
            Value::Float(_) => 8,
            Value::Double(_) => 9,
            Value::String(_) => 10,
            Value::ResRef(_) => 11,
            Value::LocString(_) => 12,
            Value::Void(_) => 13,
            Value::Struct(_) => 14,
            Value::List(_) => 15,
            Value::Orientation(_) => 16,
            Value::Vector(_) => 17,
            Value::StrRef(..) => 18,
        }
    }

    /// Whether the value is stored inline in the field table entry rather
    /// than out of line in one of the data sections.
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            Value::Byte(_)
                | Value::Char(_)
                | Value::Word(_)
                | Value::Short(_)
                | Value::Dword(_)
                | Value::Int(_)
                | Value::Float(_)
        )
    }
}

/// One labeled value inside a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    label: Label,
    value: Value,
}

impl Field {
    /// Create a field, validating the label length.
    pub fn new(label: impl Into<String>, value: Value) -> Result<Self> {
        Ok(Self {
            label: Label::new(label)?,
            value,
        })
    }

    /// Create a field from an already validated label.
    pub fn with_label(label: Label, value: Value) -> Self {
        Self { label, value }
    }

    /// The field's label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// The field's value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Mutable access to the field's value.
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    /// Replace the field's value in place.
    pub fn set_value(&mut self, value: Value) {
        self.value = value;
    }
}

/// An ordered collection of labeled fields plus an engine defined type tag.
///
/// Structs nest arbitrarily through [`Value::Struct`] and [`Value::List`]
/// fields; a whole document is one root struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Struct {
    struct_type: u32,
    fields: Vec<Field>,
}

impl Struct {
    /// Create an empty struct with the given type tag.
    pub fn new(struct_type: u32) -> Self {
        Self {
            struct_type,
            fields: Vec::new(),
        }
    }

    /// The engine defined type tag.
    pub fn struct_type(&self) -> u32 {
        self.struct_type
    }

    /// Replace the engine defined type tag.
    pub fn set_struct_type(&mut self, struct_type: u32) {
        self.struct_type = struct_type;
    }

    /// The fields in their on-disk order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Mutable iteration over the fields.
    pub fn fields_mut(&mut self) -> impl Iterator<Item = &mut Field> {
        self.fields.iter_mut()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether this struct has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Append a field.
    pub fn push(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Append a new field built from a label and value.
    pub fn add(&mut self, label: impl Into<String>, value: Value) -> Result<()> {
        self.push(Field::new(label, value)?);
        Ok(())
    }

    /// First field carrying the given label, if any.
    pub fn field(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.label().as_str() == label)
    }

    /// Mutable access to the first field carrying the given label.
    pub fn field_mut(&mut self, label: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.label().as_str() == label)
    }

    /// Remove and return the first field carrying the given label.
    pub fn remove(&mut self, label: &str) -> Option<Field> {
        let index = self.fields.iter().position(|f| f.label().as_str() == label)?;
        Some(self.fields.remove(index))
    }
}
