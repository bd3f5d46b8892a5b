//! Basic low-level parsing functionality shared by the tree readers.
//!
//! This module provides the byte-level [ByteParser] used by the Newick
//! reader, the [ParsingError] reported by both the Newick and the NeXML
//! reader, and label escaping helpers.

pub mod byte_parser;
pub mod byte_source;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
