//! Error types for loading phylogeny groups and test suites.

use crate::parser::ParsingError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Tree file format, used to report which reader failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeFormat {
    Newick,
    NeXml,
}

impl fmt::Display for TreeFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TreeFormat::Newick => write!(f, "Newick"),
            TreeFormat::NeXml => write!(f, "NeXML"),
        }
    }
}

/// Errors while loading phylogeny groups and test suites.
///
/// Every error is fatal to the load it occurs in.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The NeXML file referenced by a group does not exist.
    #[error("ERROR in phylogeny {group_id}: tree file '{}' could not be loaded!", .path.display())]
    MissingFile { group_id: String, path: PathBuf },

    /// The tree source could not be parsed.
    #[error("Could not parse {format} while reading phylogeny {group_id}: {source}")]
    Parse {
        group_id: String,
        format: TreeFormat,
        #[source]
        source: ParsingError,
    },

    /// The same label occurs in more than one labeled node data entry.
    #[error("Duplicate label '{label}' in labeled node data of phylogeny {group_id}")]
    DuplicateLabel { group_id: String, label: String },

    /// The input JSON does not have the expected shape.
    #[error("Invalid input for {context}: {message}")]
    InvalidInput { context: String, message: String },

    /// A test suite document lacks a usable `@id`.
    #[error("Document does not contain required key '@id'")]
    MissingDocumentId,

    /// I/O error while reading input or writing output.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    pub fn missing_file(group_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::MissingFile {
            group_id: group_id.into(),
            path: path.into(),
        }
    }

    pub fn parse(group_id: impl Into<String>, format: TreeFormat, source: ParsingError) -> Self {
        Self::Parse {
            group_id: group_id.into(),
            format,
            source,
        }
    }

    pub fn duplicate_label(group_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::DuplicateLabel {
            group_id: group_id.into(),
            label: label.into(),
        }
    }

    pub fn invalid_input(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            context: context.into(),
            message: message.into(),
        }
    }
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;
