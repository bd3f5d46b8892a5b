//! Utility functions for label escaping in Newick output.
//!
//! Labels held by the tree model are always unescaped (quotes removed,
//! underscores already turned into spaces where applicable). These functions
//! turn them back into tokens that a Newick reader maps to the same label.

/// Characters that force a label into single quotes.
const NEWICK_SPECIAL_CHARS: &[char] = &[
    ',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'', '_',
];

/// Checks whether a label can be written without quotes, that is, it
/// contains no special character. Spaces are fine, since they are written
/// as underscores.
///
/// # Examples
/// ```
/// # use phylogroup::parser::utils::needs_quotes;
/// assert!(!needs_quotes("Pukeko"));
/// assert!(!needs_quotes("Porphyrio melanotus"));
/// assert!(needs_quotes("Pu[ke]ko"));
/// assert!(needs_quotes("Baillon's Crake"));
/// assert!(needs_quotes("Porphyrio_melanotus"));
/// ```
pub fn needs_quotes(label: &str) -> bool {
    label.contains(NEWICK_SPECIAL_CHARS)
}

/// Escapes a label for use in a Newick string.
///
/// Labels containing special characters (punctuation, delimiters, quotes,
/// underscores) are wrapped in single quotes, with internal single quotes
/// doubled. Otherwise spaces are replaced with underscores.
///
/// # Examples
/// ```
/// # use phylogroup::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label("A_b"), "'A_b'");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quotes(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}

/// Converts underscores of an unquoted Newick label into spaces.
///
/// # Examples
/// ```
/// # use phylogroup::parser::utils::underscores_to_spaces;
/// assert_eq!(underscores_to_spaces("Homo_sapiens"), "Homo sapiens");
/// assert_eq!(underscores_to_spaces("Pan"), "Pan");
/// ```
pub fn underscores_to_spaces(label: &str) -> String {
    label.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_label_round_trip_characters() {
        assert_eq!(escape_label("a:b"), "'a:b'");
        assert_eq!(escape_label("a,b"), "'a,b'");
        assert_eq!(escape_label("it's"), "'it''s'");
        assert_eq!(escape_label("two words"), "two_words");
    }
}
