//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which offers methods
//! to parse single trees or all trees of a semicolon-separated list.

use crate::model::{Annotation, AnnotationValue, BranchLength, PhyloTree, Taxon, VertexIndex};
use crate::newick::defs::{ANNOTATION_START, NEWICK_LABEL_DELIMITERS, NHX_PREFIX, ROOTING_MARKERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::byte_source::ByteSource;
use crate::parser::parsing_error::ParsingError;
use crate::parser::utils::underscores_to_spaces;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser (configuration) for Newick format phylogenetic trees.
///
/// Trees may be multifurcating, and internal vertices may carry labels.
/// Leaf labels become [Taxon]s, internal labels become node labels.
///
/// # Configuration
/// * [`with_annotations()`](Self::with_annotations)
///     - Parse vertex annotations (e.g. `[&rate=0.5,pop_size=1.2]` or
///       `[&&NHX:S=human]`) instead of treating them as comments.
/// * [`with_preserve_underscores()`](Self::with_preserve_underscores)
///     - Keep underscores of unquoted labels; by default they become spaces.
///
/// # Parsing
/// * [`parse_str`](Self::parse_str) - Parse single tree
/// * [`parse_all`](Self::parse_all) - Parse all trees until EOF
///
/// # Example
/// ```
/// use phylogroup::newick::NewickParser;
/// use phylogroup::parser::ByteParser;
///
/// let input = "((Acryllium_vulturinum:1.0,Numida_meleagris:1.0)Numididae:0.5,Gallus_gallus:1.5);";
/// let mut byte_parser = ByteParser::for_str(input);
/// let tree = NewickParser::new().parse_str(&mut byte_parser).unwrap();
///
/// assert_eq!(tree.num_leaves(), 3);
/// let root = tree.root().unwrap();
/// assert_eq!(tree[root.children()[0]].label(), Some("Numididae"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewickParser {
    parse_annotations: bool,
    preserve_underscores: bool,
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings:
    /// annotations are skipped as comments and underscores become spaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the parser to parse vertex annotations.
    pub fn with_annotations(mut self) -> Self {
        self.parse_annotations = true;
        self
    }

    /// Configures the parser to keep underscores in unquoted labels.
    pub fn with_preserve_underscores(mut self) -> Self {
        self.preserve_underscores = true;
        self
    }
}

// ============================================================================
// API Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses all Newick trees from the byte source until EOF.
    ///
    /// # Arguments
    /// * `byte_parser` - A byte parser with underlying source containing only
    ///   Newick strings, except for whitespace and `[...]` comments.
    ///
    /// # Returns
    /// * `Ok(Vec<PhyloTree>)` - All parsed trees, empty if input was blank
    /// * `Err(ParsingError)` - If any tree fails to parse
    pub fn parse_all<B: ByteSource>(
        &self,
        mut byte_parser: ByteParser<B>,
    ) -> Result<Vec<PhyloTree>, ParsingError> {
        let mut trees = Vec::new();
        loop {
            byte_parser.skip_comment_and_whitespace()?;
            if byte_parser.is_eof() {
                break;
            }
            trees.push(self.parse_str(&mut byte_parser)?);
        }
        Ok(trees)
    }

    /// Parses a single Newick tree from the given [ByteParser],
    /// including its terminating semicolon.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick tree string
    ///
    /// # Returns
    /// * `Ok(PhyloTree)` - The parsed phylogenetic tree
    /// * `Err(ParsingError)` - If the Newick format is invalid
    pub fn parse_str<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<PhyloTree, ParsingError> {
        // Leading comments, such as rooting hints `[&R]`, are skipped
        parser.skip_comment_and_whitespace()?;

        let mut tree = PhyloTree::new();
        let root_index = self.parse_vertex(parser, &mut tree)?;

        // Consume the terminating semicolon
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            let next_char = parser.peek().map(char::from);
            return Err(ParsingError::invalid_newick_string(
                parser,
                format!("Expected ';' at end of tree but found {:?}", next_char),
            ));
        }

        tree.set_root(root_index);
        Ok(tree)
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NewickParser {
    /// Parses a vertex with all its descendants and returns its index.
    ///
    /// Nesting is tracked on an explicit stack of open internal vertices,
    /// each holding the children parsed so far, so deep trees do not grow
    /// the call stack:
    /// - Every `(` opens an internal vertex
    /// - A leaf is added to the innermost open vertex
    /// - `,` continues with the next child, `)` closes the innermost vertex
    ///   and reads its label, annotations and branch length
    fn parse_vertex<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        let mut open: Vec<Vec<VertexIndex>> = Vec::new();

        loop {
            // Descend to the next leaf
            parser.skip_comment_and_whitespace()?;
            while parser.consume_if(b'(') {
                open.push(Vec::new());
                parser.skip_comment_and_whitespace()?;
            }
            if parser.is_eof() {
                return Err(ParsingError::unexpected_eof(parser));
            }
            let mut index = self.parse_leaf(parser, tree)?;

            // Close finished internal vertices
            loop {
                let Some(mut children) = open.pop() else {
                    return Ok(index);
                };
                children.push(index);

                parser.skip_comment_and_whitespace()?;
                if parser.consume_if(b',') {
                    open.push(children);
                    break;
                }
                if !parser.consume_if(b')') {
                    let next_char = parser.peek().map(char::from);
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", next_char),
                    ));
                }
                index = self.finish_internal_vertex(parser, tree, children)?;
            }
        }
    }

    /// Adds an internal vertex whose children list was just closed,
    /// and returns its index:
    /// - `(child, ...)[label][annotation][:branch_length]`
    fn finish_internal_vertex<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
        children: Vec<VertexIndex>,
    ) -> Result<VertexIndex, ParsingError> {
        let label = self.parse_optional_label(parser)?;
        let mut annotations = Vec::new();
        let branch_length = self.parse_branch_length(parser, &mut annotations)?;

        let index = tree.add_internal(children, label, branch_length);
        for annotation in annotations {
            tree.vertex_mut(index).add_annotation(annotation);
        }

        Ok(index)
    }

    /// Parses leaf vertex and adds it to tree:
    /// - `[label][annotation][:branch_length]`
    /// - A leaf without label gets no taxon
    fn parse_leaf<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        tree: &mut PhyloTree,
    ) -> Result<VertexIndex, ParsingError> {
        let label = self.parse_optional_label(parser)?;
        let mut annotations = Vec::new();
        let branch_length = self.parse_branch_length(parser, &mut annotations)?;

        let index = match label {
            Some(label) => tree.add_leaf(Taxon::new(label), branch_length),
            None => {
                let index = tree.add_vertex(None, None);
                tree.vertex_mut(index).set_branch_length(branch_length);
                index
            }
        };
        for annotation in annotations {
            tree.vertex_mut(index).add_annotation(annotation);
        }

        Ok(index)
    }

    /// Parses an optional label directly following a vertex.
    ///
    /// Unlike [ByteParser::parse_label], comments are not skipped here,
    /// since a bracket right after a vertex may be an annotation.
    fn parse_optional_label<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Option<String>, ParsingError> {
        parser.skip_whitespace();
        let label = if parser.peek() == Some(b'\'') {
            parser.parse_quoted_label()?
        } else {
            let raw = parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS)?;
            if self.preserve_underscores {
                raw
            } else {
                underscores_to_spaces(&raw)
            }
        };

        Ok((!label.is_empty()).then_some(label))
    }

    /// Parses optional branch length `[:number]`, collecting any annotations
    /// found before or after it:
    /// - Supports scientific notation (e.g., `1.5e-10`)
    ///
    /// # Returns
    /// - `Ok(Some(branch_length))` if found a branch length and was able to parse it
    /// - `Ok(None)` if no branch length found
    /// - [ParsingError] if it couldn't parse branch length value
    fn parse_branch_length<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        annotations: &mut Vec<Annotation>,
    ) -> Result<Option<BranchLength>, ParsingError> {
        self.parse_comments(parser, annotations)?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        self.parse_comments(parser, annotations)?;

        // Find end of branch length substring
        let mut branch_length_str = String::new();
        while let Some(b) = parser.peek() {
            // Valid characters for a float: digits, '.', '-', '+', 'e', 'E'
            if b.is_ascii_digit() || b == b'.' || b == b'-' || b == b'+' || b == b'e' || b == b'E' {
                branch_length_str.push(b as char);
                parser.next_byte();
            } else {
                break; // Hit a delimiter like ',', ')', ';', or whitespace
            }
        }

        let branch_length = branch_length_str
            .parse::<f64>()
            .ok()
            .and_then(BranchLength::new)
            .ok_or_else(|| {
                ParsingError::invalid_newick_string(
                    parser,
                    format!("Invalid branch length: '{}'", branch_length_str),
                )
            })?;

        self.parse_comments(parser, annotations)?;
        Ok(Some(branch_length))
    }

    /// Skips whitespace and comments, parsing annotation blocks into
    /// `annotations` if so configured.
    fn parse_comments<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
        annotations: &mut Vec<Annotation>,
    ) -> Result<(), ParsingError> {
        loop {
            parser.skip_whitespace();
            if self.parse_annotations && parser.peek_is_sequence(ANNOTATION_START) {
                annotations.extend(self.parse_annotation_block(parser)?);
            } else if !parser.skip_comment()? {
                return Ok(());
            }
        }
    }

    /// Parses an annotation block `[&key=value,...]` or `[&&NHX:key=value:...]`.
    ///
    /// Expects the parser at `[&`. Values are read as integers, floats or
    /// strings (surrounding quotes removed); set values such as `{1,2}`
    /// are kept as strings.
    fn parse_annotation_block<B: ByteSource>(
        &self,
        parser: &mut ByteParser<B>,
    ) -> Result<Vec<Annotation>, ParsingError> {
        parser.consume_if_sequence(ANNOTATION_START);

        let mut content = Vec::new();
        loop {
            match parser.next_byte() {
                Some(b']') => break,
                Some(b) => content.push(b),
                None => return Err(ParsingError::unclosed_comment(parser)),
            }
        }
        let content = String::from_utf8_lossy(&content).into_owned();

        let (body, separator) = match content.strip_prefix(NHX_PREFIX) {
            Some(nhx) => (nhx.trim_start_matches(':'), ':'),
            None => (content.as_str(), ','),
        };

        let mut annotations = Vec::new();
        for item in split_top_level(body, separator) {
            let item = item.trim();
            if item.is_empty() || ROOTING_MARKERS.iter().any(|m| item.eq_ignore_ascii_case(m)) {
                continue;
            }

            let Some((key, value)) = item.split_once('=') else {
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected '=' in annotation '{}'", item),
                ));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    "Empty annotation key".to_string(),
                ));
            }

            let value = value.trim().trim_matches(|c| c == '"' || c == '\'');
            annotations.push(Annotation::new(key, AnnotationValue::parse(value)));
        }

        Ok(annotations)
    }
}

/// Splits `body` at `separator`, ignoring separators nested in braces or quotes.
fn split_top_level(body: &str, separator: char) -> Vec<&str> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (pos, c) in body.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '{') => depth += 1,
            (None, '}') => depth = depth.saturating_sub(1),
            (None, c) if c == separator && depth == 0 => {
                items.push(&body[start..pos]);
                start = pos + c.len_utf8();
            }
            _ => {}
        }
    }
    items.push(&body[start..]);

    items
}
