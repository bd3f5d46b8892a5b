//! Structs and logic to read NeXML documents.
//!
//! The document is parsed into a DOM by `roxmltree`; [NexmlParser] then walks
//! the `otus` and `trees` blocks and builds one [PhyloTree] per `tree` element.

use crate::model::{Annotation, AnnotationValue, BranchLength, PhyloTree, Taxon, VertexIndex};
use crate::parser::parsing_error::ParsingError;
use roxmltree::{Document, Node};
use std::collections::HashMap;

/// Local names of the NeXML elements read by the parser
const OTU: &str = "otu";
const TREE: &str = "tree";
const NODE: &str = "node";
const EDGE: &str = "edge";
const ROOT_EDGE: &str = "rootedge";
const META: &str = "meta";

// =#========================================================================#=
// NEXML PARSER
// =#========================================================================#=
/// Parser for NeXML documents.
///
/// Elements are matched by local name, so documents work with or without
/// the `nex:` prefix. For every `tree` element:
/// - each `node` becomes a vertex, carrying its `label` attribute as node
///   label and the referenced `otu` as [Taxon]
/// - each `edge` attaches its `target` to its `source`, with optional `length`
/// - the root is the node marked `root="true"`, or else the only node without
///   incoming edge
/// - `meta` children of `otu`, `tree` and `node` become [Annotation]s
///
/// # Example
/// ```
/// use phylogroup::nexml::NexmlParser;
///
/// let xml = r#"<nexml>
///   <otus id="taxa"><otu id="t1" label="Crex crex"/><otu id="t2" label="Rallus aquaticus"/></otus>
///   <trees otus="taxa"><tree id="tree1">
///     <node id="n1" root="true"/><node id="n2" otu="t1"/><node id="n3" otu="t2"/>
///     <edge id="e1" source="n1" target="n2"/><edge id="e2" source="n1" target="n3" length="0.5"/>
///   </tree></trees>
/// </nexml>"#;
///
/// let trees = NexmlParser::new().parse_str(xml).unwrap();
/// assert_eq!(trees.len(), 1);
/// assert_eq!(trees[0].num_leaves(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NexmlParser {}

// ============================================================================
// Construction & API Parsing (pub)
// ============================================================================
impl NexmlParser {
    /// Creates a new [NexmlParser].
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses all trees of a NeXML document, in document order.
    ///
    /// # Returns
    /// * `Ok(Vec<PhyloTree>)` - All trees; empty if the document has none
    /// * `Err(ParsingError)` - If the XML is malformed or not valid NeXML
    pub fn parse_str(&self, xml: &str) -> Result<Vec<PhyloTree>, ParsingError> {
        let document = Document::parse(xml)?;
        let root = document.root_element();

        let taxa = self.parse_otus(root)?;
        root.descendants()
            .filter(|n| is_element(n, TREE))
            .map(|tree| self.parse_tree(tree, &taxa))
            .collect()
    }
}

// ============================================================================
// Parsing
// ============================================================================
impl NexmlParser {
    /// Collects all `otu` elements of the document, keyed by id.
    fn parse_otus(&self, root: Node) -> Result<HashMap<String, Taxon>, ParsingError> {
        let mut taxa = HashMap::new();
        for otu in root.descendants().filter(|n| is_element(n, OTU)) {
            let id = required_attribute(otu, "id")?;
            let label = otu.attribute("label").unwrap_or(id);
            let taxon = Taxon::new(label).with_annotations(parse_meta(otu));
            if taxa.insert(id.to_string(), taxon).is_some() {
                return Err(ParsingError::invalid_nexml(format!(
                    "Duplicate otu id '{id}'"
                )));
            }
        }
        Ok(taxa)
    }

    /// Builds a single tree from a `tree` element.
    fn parse_tree(
        &self,
        element: Node,
        taxa: &HashMap<String, Taxon>,
    ) -> Result<PhyloTree, ParsingError> {
        let tree_id = element.attribute("id").unwrap_or("(unnamed)");
        let nodes: Vec<Node> = element.children().filter(|n| is_element(n, NODE)).collect();
        let mut tree = PhyloTree::with_capacity(nodes.len());

        // Vertices
        let mut indices: HashMap<&str, VertexIndex> = HashMap::with_capacity(nodes.len());
        let mut marked_roots = Vec::new();
        for node in &nodes {
            let id = required_attribute(*node, "id")?;
            let taxon = match node.attribute("otu") {
                Some(otu) => Some(taxa.get(otu).cloned().ok_or_else(|| {
                    ParsingError::invalid_nexml(format!(
                        "Node '{id}' in tree '{tree_id}' references unknown otu '{otu}'"
                    ))
                })?),
                None => None,
            };
            let label = node.attribute("label").map(str::to_string);

            let index = tree.add_vertex(label, taxon);
            for annotation in parse_meta(*node) {
                tree.vertex_mut(index).add_annotation(annotation);
            }
            if indices.insert(id, index).is_some() {
                return Err(ParsingError::invalid_nexml(format!(
                    "Duplicate node id '{id}' in tree '{tree_id}'"
                )));
            }
            if node.attribute("root") == Some("true") {
                marked_roots.push(index);
            }
        }

        // Edges
        let lookup = |attribute: &str, edge: Node| -> Result<VertexIndex, ParsingError> {
            let id = required_attribute(edge, attribute)?;
            indices.get(id).copied().ok_or_else(|| {
                ParsingError::invalid_nexml(format!(
                    "Edge in tree '{tree_id}' references unknown node '{id}'"
                ))
            })
        };
        let mut root_edge_length = None;
        for edge in element.children().filter(|n| n.is_element()) {
            match edge.tag_name().name() {
                EDGE => {
                    let source = lookup("source", edge)?;
                    let target = lookup("target", edge)?;
                    if tree[target].parent().is_some() {
                        return Err(ParsingError::invalid_nexml(format!(
                            "Node '{}' in tree '{tree_id}' has more than one parent",
                            required_attribute(edge, "target")?
                        )));
                    }
                    tree.attach(source, target);
                    tree.vertex_mut(target)
                        .set_branch_length(parse_length(edge, tree_id)?);
                }
                ROOT_EDGE => root_edge_length = Some(parse_length(edge, tree_id)?),
                _ => {}
            }
        }

        // Root
        let root_index = match marked_roots.as_slice() {
            [root] => *root,
            [] => {
                let parentless: Vec<VertexIndex> = tree
                    .vertices()
                    .iter()
                    .filter(|v| v.is_root())
                    .map(|v| v.index())
                    .collect();
                match parentless.as_slice() {
                    [root] => *root,
                    [] => {
                        return Err(ParsingError::invalid_nexml(format!(
                            "Tree '{tree_id}' has no root"
                        )));
                    }
                    _ => {
                        return Err(ParsingError::invalid_nexml(format!(
                            "Tree '{tree_id}' has {} root candidates but none is marked as root",
                            parentless.len()
                        )));
                    }
                }
            }
            _ => {
                return Err(ParsingError::invalid_nexml(format!(
                    "Tree '{tree_id}' has {} nodes marked as root",
                    marked_roots.len()
                )));
            }
        };
        tree.set_root(root_index);
        if let Some(length) = root_edge_length {
            tree.vertex_mut(root_index).set_branch_length(length);
        }
        if !tree.is_valid() {
            return Err(ParsingError::invalid_nexml(format!(
                "Tree '{tree_id}' is not connected"
            )));
        }

        tree.set_name(element.attribute("label").unwrap_or(tree_id).to_string());
        for annotation in parse_meta(element) {
            tree.add_annotation(annotation);
        }

        Ok(tree)
    }
}

// ============================================================================
// Helpers
// ============================================================================
fn is_element(node: &Node, local_name: &str) -> bool {
    node.is_element() && node.tag_name().name() == local_name
}

fn required_attribute<'a>(node: Node<'a, '_>, name: &str) -> Result<&'a str, ParsingError> {
    node.attribute(name).ok_or_else(|| {
        ParsingError::invalid_nexml(format!(
            "Element '{}' is missing attribute '{name}'",
            node.tag_name().name()
        ))
    })
}

/// Parses the optional `length` attribute of an edge.
fn parse_length(edge: Node, tree_id: &str) -> Result<Option<BranchLength>, ParsingError> {
    let Some(raw) = edge.attribute("length") else {
        return Ok(None);
    };
    raw.trim()
        .parse::<f64>()
        .ok()
        .and_then(BranchLength::new)
        .map(Some)
        .ok_or_else(|| {
            ParsingError::invalid_nexml(format!(
                "Invalid edge length '{raw}' in tree '{tree_id}'"
            ))
        })
}

/// Reads the direct `meta` children of an element.
///
/// Literal metadata (`property` + `content` or text) keeps its parsed value;
/// resource metadata (`rel` + `href`) keeps the IRI as string. Names drop
/// their namespace prefix, so `skos:closeMatch` becomes `closeMatch`.
fn parse_meta(element: Node) -> Vec<Annotation> {
    element
        .children()
        .filter(|n| is_element(n, META))
        .filter_map(|meta| {
            if let Some(rel) = meta.attribute("rel") {
                let href = meta.attribute("href").unwrap_or_default();
                Some(Annotation::new(local_part(rel), href))
            } else {
                let property = meta.attribute("property")?;
                let content = meta
                    .attribute("content")
                    .or_else(|| meta.text())
                    .unwrap_or_default()
                    .trim();
                Some(Annotation::new(
                    local_part(property),
                    AnnotationValue::parse(content),
                ))
            }
        })
        .collect()
}

fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_part() {
        assert_eq!(local_part("skos:closeMatch"), "closeMatch");
        assert_eq!(local_part("label"), "label");
    }

    #[test]
    fn test_rootedge_sets_root_branch_length() {
        let xml = r#"<nexml><trees><tree id="t">
            <node id="a"/><node id="b" label="B"/>
            <rootedge id="re" target="a" length="2.5"/>
            <edge id="e" source="a" target="b"/>
        </tree></trees></nexml>"#;
        let trees = NexmlParser::new().parse_str(xml).unwrap();
        let root = trees[0].root().unwrap();
        assert_eq!(root.branch_length().map(|b| *b), Some(2.5));
        assert_eq!(trees[0].name(), Some("t"));
    }
}
