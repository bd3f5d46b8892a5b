//! Phylogeny groups with labeled node data, and their JSON-LD export.
//!
//! # Overview
//! * [PhyloreferenceTestSuite] - a whole test suite document
//! * [PhylogenyGroup] - the trees of one tree source, sharing [LabeledNodeData]
//! * [Phylogeny] - a single tree with addressable node ids
//! * [TaxonomicUnit] - taxonomic units derived from node labels
//! * [Phyloreference] - a clade definition through [Specifier]s
//!
//! Trees are loaded through a [TreeLoader], which hands Newick strings and
//! NeXML files to [crate::newick] and [crate::nexml].
//!
//! # Identifiers
//! | Entity | Id |
//! |--------|----|
//! | phylogeny group in suite `S` | `{S}phylogenies{n}` |
//! | phylogeny in group `G` | `{G}_phylogeny{n}` |
//! | node in phylogeny `P` | `{P}_node{n}` (from 0, children numbered when their parent is visited) |
//! | taxonomic unit of node `N` | `{N}_tunit{k}` |
//! | phyloreference in suite `S` | `{S}_phyloref{n}` |
//! | specifier of phyloreference `R` | `{R}_specifier{n}` |
//! | additional class of phyloreference `R` | `{R}_additional{n}` (from 0) |

pub mod labeled_data;
pub mod loader;
pub mod phylogeny;
pub mod phylogeny_group;
pub mod phyloreference;
pub mod specifier;
pub mod taxonomic_unit;
pub mod test_suite;

pub use labeled_data::{LabelField, LabeledNodeData, NodeData, read_labeled_node_data};
pub use loader::{TreeLoader, TreeSource};
pub use phylogeny::Phylogeny;
pub use phylogeny_group::PhylogenyGroup;
pub use phyloreference::{Malformation, Phyloreference};
pub use specifier::{Specifier, SpecifierKind};
pub use taxonomic_unit::{ScientificName, TaxonomicUnit};
pub use test_suite::PhyloreferenceTestSuite;
