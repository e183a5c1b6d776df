//! Error kinds for the synthesis engine.
//!
//! One `#[non_exhaustive]` `thiserror` enum with a variant per failure
//! mode, rather than a type per component.

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("bad argument `{name}`: {message}")]
    BadArgument { name: String, message: String },

    #[error("material {0:?} was never loaded; call load_impact/load_scrape first")]
    MaterialNotLoaded(&'static str),

    #[error("unknown material `{0}`")]
    UnknownMaterial(String),

    #[error("material bundle is corrupt: {0}")]
    BundleCorrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
