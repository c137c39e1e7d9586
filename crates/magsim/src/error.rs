//! Error types for the magnet pair model.

use thiserror::Error;

/// Errors raised while loading or stepping a magnet pair model.
#[derive(Debug, Error)]
pub enum Error {
    /// A configured body name could not be resolved in the host engine.
    /// Fatal at setup: the model refuses to build.
    #[error("body not found in host engine: {0}")]
    BodyNotFound(String),

    /// Parameter block loading failed.
    #[error(transparent)]
    Config(#[from] magsim_sdf::SdfError),

    /// Per-tick physics failure (coincident dipoles).
    #[error(transparent)]
    Dipole(#[from] magsim_dipole::DipoleError),
}

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, Error>;
