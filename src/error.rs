use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuilderError {
    #[error("Draft not found at {0}. Run 'invoice-builder init' to create one.")]
    DraftNotFound(PathBuf),

    #[error("Failed to parse draft {path}: {source}")]
    DraftParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Draft already exists at {0}")]
    DraftExists(PathBuf),

    #[error("Invalid --set expression '{0}'. Expected 'field=value' (e.g., 'tax_rate=8.5')")]
    InvalidSetExpr(String),

    #[error("Unknown field '{0}' in --set expression")]
    UnknownField(String),

    #[error("Invalid --item format '{0}'. Expected 'description:quantity:price' (e.g., 'Design work:3:120')")]
    InvalidItemFormat(String),

    #[error("Failed to read logo file {path}: {source}")]
    LogoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid logo data URI: {0}")]
    InvalidLogo(String),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BuilderError>;
