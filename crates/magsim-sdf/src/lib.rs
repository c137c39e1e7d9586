//! SDF-style XML parameter loading for magnet pairs.
//!
//! Parses the `<plugin>` parameter block describing a magnet pair (body
//! names, dipole moments, mounting offsets, publish settings) and converts
//! it into [`magsim_dipole::Magnet`] descriptors.

mod parser;

pub use parser::PairConfig;

use thiserror::Error;

/// Errors raised while loading a magnet-pair parameter block.
#[derive(Debug, Error)]
pub enum SdfError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing required element <{0}>")]
    MissingElement(&'static str),

    #[error("invalid value for <{element}>: {value:?}")]
    InvalidValue {
        /// Element whose text failed to parse.
        element: String,
        /// The offending text content.
        value: String,
    },
}

/// Result type for parameter loading.
pub type Result<T> = std::result::Result<T, SdfError>;
