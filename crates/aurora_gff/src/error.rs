//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// struct table reference points past the end of the table
    #[error("struct index {0} is out of range")]
    StructIndexOutOfRange(usize),

    /// field table reference points past the end of the table
    #[error("field index {0} is out of range")]
    FieldIndexOutOfRange(usize),

    /// label table reference points past the end of the table
    #[error("label index {0} is out of range")]
    LabelIndexOutOfRange(usize),

    /// field data reference points past the end of the data block
    #[error("field data offset {0} is out of range")]
    FieldDataOutOfRange(u32),

    /// field indices reference points past the end of the block
    #[error("field indices offset {0} is out of range")]
    FieldIndicesOutOfRange(u32),

    /// list indices reference points past the end of the block
    #[error("list indices offset {0} is out of range")]
    ListIndicesOutOfRange(u32),

    /// field type code not defined by the format
    #[error("unknown field type {field_type} in struct {struct_index}")]
    UnknownFieldType {
        /// The unrecognized type code as stored in the field table
        field_type: u32,
        /// The struct whose materialization hit the code
        struct_index: usize,
    },

    /// label exceeds the 16 byte limit
    #[error("label {0:?} is longer than 16 bytes")]
    LabelTooLong(String),

    /// resref exceeds the 255 byte limit
    #[error("resref {0:?} is longer than 255 bytes")]
    ResRefTooLong(String),

    /// serializer bookkeeping diverged between the collect and layout phases
    #[error("serializer consistency failure: {0}")]
    InternalConsistency(&'static str),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
