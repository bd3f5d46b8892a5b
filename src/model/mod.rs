//! Data model for parsed phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [PhyloTree], which uses the arena pattern to store
//! [Vertex] nodes referenced by [VertexIndex]. Unlike strictly binary tree
//! models, vertices may have any number of children, and any vertex may
//! carry a label:
//!
//! | Field | Source (Newick) | Source (NeXML) |
//! |-------|-----------------|----------------|
//! | [Taxon] | leaf label | `otu` reference (label + `<meta>`) |
//! | node label | internal label | `label` attribute |
//! | [Annotation]s | `[&key=value]` comments | `<meta>` elements |
//!
//! Trees are produced by the readers in [crate::newick] and [crate::nexml]
//! and consumed by [Phylogeny](crate::phyloref::Phylogeny).

pub mod annotation;
pub mod tree;
pub mod vertex;

pub use annotation::{Annotation, AnnotationValue};
pub use tree::{PhyloTree, VertexIndex};
pub use vertex::{BranchLength, Taxon, Vertex};
