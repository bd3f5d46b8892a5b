//! Vertex module for phylogenetic tree representation.

use crate::model::annotation::Annotation;
use crate::model::tree::VertexIndex;
use std::ops::Deref;

// =#========================================================================#=
// VERTEX
// =#========================================================================#=
/// Represents a vertex (node) in a phylogenetic tree.
///
/// Trees read for phyloreference testing are not necessarily binary and may
/// carry labels on internal vertices, so a vertex holds an ordered list of
/// children and two independent labels:
/// - a [Taxon], for vertices that represent an operational taxonomic unit
///   (Newick leaves, NeXML nodes with an `otu` reference), and
/// - a plain node label (Newick internal labels, NeXML `label` attributes).
///
/// # Invariants
/// - `index` is the position of this vertex in the tree arena
/// - `parent` is `None` only for the root (and during construction)
/// - `children` keep the order in which they appeared in the source
#[derive(PartialEq, Debug, Clone)]
pub struct Vertex {
    /// Index of this vertex in the tree arena
    index: VertexIndex,
    /// Index of the parent vertex
    parent: Option<VertexIndex>,
    /// Indices of child vertices, in source order
    children: Vec<VertexIndex>,
    /// Label of the vertex itself
    label: Option<String>,
    /// Taxon represented by this vertex
    taxon: Option<Taxon>,
    /// Distance to parent node
    branch_length: Option<BranchLength>,
    /// Annotations of this vertex
    annotations: Vec<Annotation>,
}

impl Vertex {
    /// Creates a new vertex without parent, children, or branch length.
    ///
    /// # Arguments
    /// * `index` - The unique index of this vertex in the tree (arena)
    /// * `label` - Optional node label
    /// * `taxon` - Optional taxon
    pub fn new(index: VertexIndex, label: Option<String>, taxon: Option<Taxon>) -> Self {
        Vertex {
            index,
            parent: None,
            children: Vec::new(),
            label,
            taxon,
            branch_length: None,
            annotations: Vec::new(),
        }
    }

    /// Returns the index of this vertex.
    pub fn index(&self) -> VertexIndex {
        self.index
    }

    /// Returns the index of the parent, or `None` for the root.
    pub fn parent(&self) -> Option<VertexIndex> {
        self.parent
    }

    /// Returns the children of this vertex, in source order.
    pub fn children(&self) -> &[VertexIndex] {
        &self.children
    }

    /// Returns the node label, if any.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the taxon, if any.
    pub fn taxon(&self) -> Option<&Taxon> {
        self.taxon.as_ref()
    }

    /// Returns the label this vertex is known by: its taxon label,
    /// or its node label if it has no taxon.
    pub fn display_label(&self) -> Option<&str> {
        match &self.taxon {
            Some(taxon) => Some(taxon.label()),
            None => self.label.as_deref(),
        }
    }

    /// Returns the branch length, if set.
    pub fn branch_length(&self) -> Option<BranchLength> {
        self.branch_length
    }

    /// Returns the annotations of this vertex.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns `true` if this vertex has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this vertex has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub(crate) fn set_parent(&mut self, parent: VertexIndex) {
        self.parent = Some(parent);
    }

    pub(crate) fn push_child(&mut self, child: VertexIndex) {
        self.children.push(child);
    }

    /// Sets the node label.
    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    /// Sets the branch length.
    pub fn set_branch_length(&mut self, branch_length: Option<BranchLength>) {
        self.branch_length = branch_length;
    }

    /// Adds an annotation to this vertex.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }
}

// =#========================================================================#=
// TAXON
// =#========================================================================#=
/// An operational taxonomic unit referenced by a vertex.
#[derive(PartialEq, Debug, Clone)]
pub struct Taxon {
    label: String,
    annotations: Vec<Annotation>,
}

impl Taxon {
    /// Creates a taxon with the given label and no annotations.
    pub fn new(label: impl Into<String>) -> Self {
        Taxon {
            label: label.into(),
            annotations: Vec::new(),
        }
    }

    /// Attaches annotations to this taxon.
    pub fn with_annotations(mut self, annotations: Vec<Annotation>) -> Self {
        self.annotations = annotations;
        self
    }

    /// Returns the taxon label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the annotations of this taxon.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the values of all annotations with the given name.
    ///
    /// # Example
    /// ```
    /// use phylogroup::model::{Annotation, Taxon};
    ///
    /// let taxon = Taxon::new("Rallus aquaticus")
    ///     .with_annotations(vec![Annotation::new("closeMatch", "Rallus")]);
    /// assert_eq!(taxon.find_all("closeMatch"), vec!["Rallus".to_string()]);
    /// ```
    pub fn find_all(&self, name: &str) -> Vec<String> {
        self.annotations
            .iter()
            .filter(|a| a.name() == name)
            .map(|a| a.value().to_string())
            .collect()
    }
}

// =#========================================================================#=
// BRANCH LENGTH
// =#========================================================================#=
/// Branch length in a phylogenetic tree, enforced finite.
///
/// Negative lengths are kept as given, since distance-based trees may
/// contain them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLength(f64);

impl BranchLength {
    /// Creates a new branch length.
    ///
    /// # Returns
    /// `None` if `length` is not finite.
    pub fn new(length: f64) -> Option<Self> {
        length.is_finite().then_some(BranchLength(length))
    }
}

impl Deref for BranchLength {
    type Target = f64;
    fn deref(&self) -> &f64 {
        &self.0
    }
}
