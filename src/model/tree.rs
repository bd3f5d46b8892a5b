//! Tree module for phylogenetic tree representation.
//!
//! This module provides the core data structure for representing phylogenetic trees:
//! - [PhyloTree]: The tree structure using the arena pattern.
//! - [VertexIndex] is used to index vertices.

use crate::model::annotation::Annotation;
use crate::model::vertex::{BranchLength, Taxon, Vertex};
use std::ops::Index;

/// Index of a vertex in a tree (arena).
pub type VertexIndex = usize;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A rooted phylogenetic tree represented using the arena pattern on [Vertex].
///
/// Vertices are stored in a contiguous vector and referenced by [VertexIndex].
/// Vertices may have any number of children and labels on any vertex.
///
/// # Construction
/// Add vertices one by one, either bottom-up with [add_leaf](Self::add_leaf)
/// and [add_internal](Self::add_internal) (as the Newick parser does) or
/// with [add_vertex](Self::add_vertex) plus [attach](Self::attach) when edges
/// are only known later (as the NeXML parser does). Finally set the root.
/// Test validity with [PhyloTree::is_valid].
///
/// # Example
/// ```
/// use phylogroup::model::{BranchLength, PhyloTree, Taxon};
///
/// // Create a tree: ((A:0.2,B:0.2)AB:0.2,C:0.4);
/// let mut tree = PhyloTree::new();
/// let a = tree.add_leaf(Taxon::new("A"), BranchLength::new(0.2));
/// let b = tree.add_leaf(Taxon::new("B"), BranchLength::new(0.2));
/// let c = tree.add_leaf(Taxon::new("C"), BranchLength::new(0.4));
/// let ab = tree.add_internal(vec![a, b], Some("AB".to_string()), BranchLength::new(0.2));
/// let root = tree.add_internal(vec![ab, c], None, None);
/// tree.set_root(root);
///
/// assert!(tree.is_valid());
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhyloTree {
    /// Vertices of this tree (arena pattern)
    vertices: Vec<Vertex>,

    /// Index of the root of this tree
    root_index: Option<VertexIndex>,

    /// Name of tree; optional, e.g. when parsed from NeXML
    name: Option<String>,

    /// Annotations on the tree as a whole
    annotations: Vec<Annotation>,
}

// ============================================================================
// New, Construction (pub)
// ============================================================================
impl PhyloTree {
    /// Creates a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty tree with room for `num_vertices` vertices.
    pub fn with_capacity(num_vertices: usize) -> Self {
        PhyloTree {
            vertices: Vec::with_capacity(num_vertices),
            ..Self::default()
        }
    }

    /// Adds an unconnected vertex, assigning a unique index, which gets returned.
    pub fn add_vertex(&mut self, label: Option<String>, taxon: Option<Taxon>) -> VertexIndex {
        let index = self.vertices.len();
        self.vertices.push(Vertex::new(index, label, taxon));
        index
    }

    /// Adds a leaf for the given taxon.
    ///
    /// # Returns
    /// The index of the newly created leaf vertex.
    pub fn add_leaf(&mut self, taxon: Taxon, branch_length: Option<BranchLength>) -> VertexIndex {
        let index = self.add_vertex(None, Some(taxon));
        self.vertices[index].set_branch_length(branch_length);
        index
    }

    /// Adds an internal vertex with the given children (in order).
    ///
    /// # Returns
    /// The index of the newly created internal vertex.
    ///
    /// # Panics
    /// Panics if a child index is out of bounds.
    pub fn add_internal(
        &mut self,
        children: Vec<VertexIndex>,
        label: Option<String>,
        branch_length: Option<BranchLength>,
    ) -> VertexIndex {
        let index = self.add_vertex(label, None);
        self.vertices[index].set_branch_length(branch_length);
        for child in children {
            self.attach(index, child);
        }
        index
    }

    /// Connects `child` as the next child of `parent`.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    pub fn attach(&mut self, parent: VertexIndex, child: VertexIndex) {
        self.vertices[child].set_parent(parent);
        self.vertices[parent].push_child(child);
    }

    /// Marks the vertex at `index` as the root.
    pub fn set_root(&mut self, index: VertexIndex) {
        self.root_index = Some(index);
    }

    /// Attaches a name to this tree.
    pub fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Adds a tree-level annotation.
    pub fn add_annotation(&mut self, annotation: Annotation) {
        self.annotations.push(annotation);
    }

    /// Returns a mutable reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex_mut(&mut self, index: VertexIndex) -> &mut Vertex {
        &mut self.vertices[index]
    }
}

// ============================================================================
// Getters, Validation (pub)
// ============================================================================
impl PhyloTree {
    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root index is set, in bounds, and the root has no parent
    /// - All vertex indices match their position in the arena
    /// - Every child points back to its parent, and every non-root vertex
    ///   is listed among its parent's children
    /// - All vertices are reachable from the root (hence no cycles)
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let Some(root_index) = self.root_index else {
            return false;
        };
        if root_index >= self.vertices.len() || self.vertices[root_index].parent().is_some() {
            return false;
        }

        for (index, vertex) in self.vertices.iter().enumerate() {
            if vertex.index() != index {
                return false;
            }

            for &child in vertex.children() {
                if child >= self.vertices.len() || self.vertices[child].parent() != Some(index) {
                    return false;
                }
            }

            if index != root_index {
                match vertex.parent() {
                    None => return false,
                    Some(parent) => {
                        if parent >= self.vertices.len()
                            || !self.vertices[parent].children().contains(&index)
                        {
                            return false;
                        }
                    }
                }
            }
        }

        self.pre_order().len() == self.vertices.len()
    }

    /// Returns reference to name of this tree, or `None` if not set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the tree-level annotations.
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Returns the index of the root, or `None` if not set yet.
    pub fn root_index(&self) -> Option<VertexIndex> {
        self.root_index
    }

    /// Returns a reference to the root vertex, or `None` if not set yet.
    pub fn root(&self) -> Option<&Vertex> {
        self.root_index.map(|index| &self.vertices[index])
    }

    /// Returns a reference to the vertex at the given index.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn vertex(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }

    /// Returns all vertices in arena order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Returns the number of vertices in this tree.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of leaves in this tree.
    pub fn num_leaves(&self) -> usize {
        self.vertices.iter().filter(|v| v.is_leaf()).count()
    }

    /// Returns the number of non-leaf vertices in this tree (root included).
    pub fn num_internal(&self) -> usize {
        self.vertices.iter().filter(|v| !v.is_leaf()).count()
    }

    /// Returns the indices of the other children of this vertex's parent,
    /// in the parent's child order. The root has no siblings.
    pub fn siblings(&self, index: VertexIndex) -> Vec<VertexIndex> {
        match self.vertices[index].parent() {
            Some(parent) => self.vertices[parent]
                .children()
                .iter()
                .copied()
                .filter(|&child| child != index)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Returns vertex indices in pre-order (parents before children,
    /// children in source order), starting at the root.
    ///
    /// Returns an empty list if no root is set.
    ///
    /// # Example
    /// ```
    /// use phylogroup::model::{PhyloTree, Taxon};
    ///
    /// let mut tree = PhyloTree::new();
    /// let a = tree.add_leaf(Taxon::new("A"), None);
    /// let b = tree.add_leaf(Taxon::new("B"), None);
    /// let root = tree.add_internal(vec![a, b], None, None);
    /// tree.set_root(root);
    ///
    /// assert_eq!(tree.pre_order(), vec![root, a, b]);
    /// ```
    pub fn pre_order(&self) -> Vec<VertexIndex> {
        let mut order = Vec::with_capacity(self.vertices.len());
        let Some(root_index) = self.root_index else {
            return order;
        };

        let mut visited = vec![false; self.vertices.len()];
        let mut stack = vec![root_index];
        while let Some(index) = stack.pop() {
            // Guards against malformed trees with cycles
            if std::mem::replace(&mut visited[index], true) {
                continue;
            }
            order.push(index);
            stack.extend(self.vertices[index].children().iter().rev());
        }

        order
    }
}

impl Index<VertexIndex> for PhyloTree {
    type Output = Vertex;

    fn index(&self, index: VertexIndex) -> &Vertex {
        &self.vertices[index]
    }
}
