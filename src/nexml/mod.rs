//! NeXML reader for phylogenetic trees.
//!
//! NeXML is the XML format used by TreeBASE and most phyloreferencing test
//! cases that come with published phylogenies. Only the parts needed for
//! trees are read:
//! * `otus/otu` - id, label, `meta`
//! * `trees/tree` - id, label, `meta`, `node` and `edge`/`rootedge` elements
//!
//! Character matrices and networks are ignored.
//!
//! # Quick API
//! * [`parse_str`] - parses a NeXML document given as string
//! * [`parse_file`] - reads and parses a NeXML file

mod parser;

pub use self::parser::NexmlParser;

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use std::fs;
use std::path::Path;

/// Parses all trees of a NeXML document.
///
/// # Returns
/// * `Vec<PhyloTree>` - All trees in document order
/// * [`ParsingError`] - If the XML is malformed or not valid NeXML
pub fn parse_str<S: AsRef<str>>(xml: S) -> Result<Vec<PhyloTree>, ParsingError> {
    NexmlParser::new().parse_str(xml.as_ref())
}

/// Reads a NeXML file and parses all its trees.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<PhyloTree>` - All trees in document order
/// * [`ParsingError`] - If file reading fails, or the content is not valid NeXML
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<PhyloTree>, ParsingError> {
    let xml = fs::read_to_string(path)?;
    parse_str(xml)
}
