//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [`NewickParser`] to parse Newick format strings
//! into [`PhyloTree`]s, and [`to_newick`] to write them back.
//!
//! # Quick API
//! For simple use cases with default settings:
//! * [`parse_str`] - parses all trees of a string
//! * [`parse_file`] - parses all trees of a file
//!
//! # Full API
//! For more control, configure a [`NewickParser`] and provide a [`ByteParser`]:
//! * [`NewickParser::parse_str`] - parse a single tree
//! * [`NewickParser::parse_all`] - parse all trees until EOF
//!
//! # Format
//! The Newick format has the following grammar:
//! * `tree ::= vertex ';'`
//! * `vertex ::= leaf | internal_vertex`
//! * `internal_vertex ::= '(' vertex {',' vertex} ')' [label] [branch_length]`
//! * `leaf ::= [label] [branch_length]`
//! * `branch_length ::= ':' number`
//!
//! Furthermore:
//! * Whitespace can occur between elements,
//!   just not within an unquoted label or a branch_length
//! * Comments are square brackets and can occur anywhere where whitespace is allowed
//! * Underscores in unquoted labels stand for spaces
//! * Quoted labels use single quotes, with `''` for a literal quote
//!
//! In the extended Newick format, there can be comment-like annotations
//! after a label or branch length:
//! * `[&pop_size=0.543,color=blue]`
//! * `[&&NHX:S=human:D=N]`
//!
//! These are skipped as comments unless the parser is configured
//! [with annotations](NewickParser::with_annotations).

mod defs;
mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::to_newick;

use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::InMemoryByteSource;
use std::fs::File;
use std::io::Read;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses all trees of a semicolon-separated list of Newick strings,
/// using default settings.
///
/// # Arguments
/// * `newick` - One or more Newick trees, each terminated by `;`
///
/// # Returns
/// * `Vec<PhyloTree>` - All parsed trees in order; empty for blank input
/// * [`ParsingError`] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use phylogroup::newick::parse_str;
///
/// let trees = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));").unwrap();
/// assert_eq!(trees.len(), 1);
/// assert_eq!(trees[0].num_leaves(), 3);
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Vec<PhyloTree>, ParsingError> {
    NewickParser::new().parse_all(ByteParser::for_str(newick.as_ref()))
}

/// Parses a file containing a semicolon-separated list of Newick strings
/// using default settings.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * `Vec<PhyloTree>` - All parsed trees in order
/// * [`ParsingError`] - If file reading fails or Newick format is invalid
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Vec<PhyloTree>, ParsingError> {
    let mut contents = Vec::new();
    let mut file = File::open(path)?;
    file.read_to_end(&mut contents)?;
    let byte_parser = ByteParser::new(InMemoryByteSource::from_vec(contents));

    NewickParser::new().parse_all(byte_parser)
}
