//! Error types for the endoc library.

use std::io;
use thiserror::Error;

/// Result type alias for endoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during template processing and document generation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error parsing template XML.
    #[error("XML parse error: {0}")]
    XmlParse(String),

    /// Error writing the output ZIP package.
    #[error("ZIP archive error: {0}")]
    ZipArchive(String),

    /// A required attribute is absent from a template element.
    #[error("element <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Element the attribute belongs to.
        element: String,
        /// Name of the absent attribute.
        attribute: String,
    },

    /// An attribute value could not be interpreted.
    #[error("element <{element}> has invalid '{attribute}' value '{value}': {reason}")]
    InvalidAttribute {
        /// Element the attribute belongs to.
        element: String,
        /// Name of the offending attribute.
        attribute: String,
        /// The raw value as written in the template.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The template ended without a `<proposal>` root element, so no output
    /// path was ever recorded.
    #[error("template has no <proposal> root element")]
    MissingRoot,
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::XmlParse(err.to_string())
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        Error::ZipArchive(err.to_string())
    }
}
