//! Constants for Newick parsing.

/// Newick label delimiters: parentheses, brackets, comma, colon, semicolon, whitespace
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Opening of an extended Newick annotation block, e.g. `[&rate=0.5]`
pub(crate) const ANNOTATION_START: &[u8] = b"[&";

/// Prefix of New Hampshire eXtended annotations, e.g. `[&&NHX:S=human]`
pub(crate) const NHX_PREFIX: &str = "&NHX";

/// Rooting markers written as `[&R]` or `[&U]`; they carry no key-value pair
pub(crate) const ROOTING_MARKERS: [&str; 2] = ["R", "U"];
