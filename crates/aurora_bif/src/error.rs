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

    /// file is an invalid key or bif archive
    #[error("file is an invalid key or bif archive")]
    InvalidArchive,

    /// fixed resource tables never occur in practice and are not supported
    #[error("bif declares {0} fixed resources, which is not supported")]
    FixedResourcesUnsupported(u32),

    /// resource name exceeds the 16 byte limit
    #[error("resource name {0:?} is longer than 16 bytes")]
    NameTooLong(String),

    /// local index does not fit the 20 bit half of a composite id
    #[error("local index {0} does not fit a composite id")]
    LocalIndexTooLarge(u32),

    /// unable to find requested resource
    #[error("unable to find requested resource")]
    ResourceNotFound(#[from] NotFoundError),
}

/// Error type to provide further information when a resource has not been found
#[derive(Error, Diagnostic, Debug)]
#[error("unable to find requested resource")]
pub enum NotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),

    /// by name {0} and type {1}
    #[error("by name {0} and type {1}")]
    NameAndType(String, u16),
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
