//! Phylogroup loads phylogenies for phyloreference testing and exports them
//! as JSON-LD.
//!
//! A phylogeny group is described in JSON by a Newick string or a NeXML file
//! plus optional labeled node data: metadata records keyed by node label.
//! Loading parses the trees, attaches the labeled node data, and assigns
//! stable ids to every phylogeny and node, so that the exported JSON-LD
//! can be addressed by phyloreference reasoners.
//!
//! Core functionality provided:
//! - Newick: Parse multifurcating trees with internal labels, quoted labels,
//!   comments and `[&key=value]` annotations; write trees back to Newick.
//! - NeXML: Parse `otus` and `trees` blocks, including `meta` annotations.
//! - Phylogeny groups: Merge labeled node data into tree nodes and export
//!   JSON-LD. See [crate::phyloref].
//! - Test suites: Load and export whole phyloreference test suite documents,
//!   turning phyloreference specifiers into OWL class expressions.
//!
//! Tree parsing is self-contained in [crate::parser], [crate::newick],
//! [crate::nexml] and [crate::model]; it knows nothing about phyloreferences.
//!
//! # Usage patterns
//! 1. Quick access with default settings: [load_phylogeny_group],
//!    [parse_newick_str], [parse_nexml_file].
//! 2. Configure a [TreeLoader](crate::phyloref::TreeLoader) (base directory for
//!    NeXML files, underscore handling) and use
//!    [PhylogenyGroup::load_with_loader](crate::phyloref::PhylogenyGroup::load_with_loader)
//!    or [PhyloreferenceTestSuite::load_from_document](crate::phyloref::PhyloreferenceTestSuite::load_from_document).
//!
//! ## Example
//! ```
//! use phylogroup::load_phylogeny_group;
//! use serde_json::json;
//!
//! let group = load_phylogeny_group(
//!     "fisher2007",
//!     &json!({
//!         "newick": "((Anas_platyrhynchos,Aythya_ferina)Anatidae,Anser_anser);",
//!         "labeledNodeData": [{"label": "Anatidae", "expected": "ducks"}]
//!     }),
//! )
//! .unwrap();
//!
//! let doc = group.export_to_jsonld_document();
//! assert_eq!(doc["phylogenies"][0]["@id"], "fisher2007_phylogeny1");
//! assert_eq!(doc["phylogenies"][0]["nodes"][1]["expected"], "ducks");
//! ```

pub mod error;
pub mod model;
pub mod newick;
pub mod nexml;
pub mod owlterms;
pub mod parser;
pub mod phyloref;

use crate::error::LoadResult;
use crate::model::PhyloTree;
use crate::parser::ParsingError;
use crate::phyloref::PhylogenyGroup;
use serde_json::Value;
use std::path::Path;

// ============================================================================
// Quick Phylogeny Group API
// ============================================================================
/// Loads a phylogeny group from its JSON description using default settings.
///
/// See [`PhylogenyGroup::load_from_json`] for full documentation.
pub fn load_phylogeny_group(id: impl Into<String>, json: &Value) -> LoadResult<PhylogenyGroup> {
    PhylogenyGroup::load_from_json(id, json)
}

// ============================================================================
// Quick Tree API
// ============================================================================
/// Parses all trees of a Newick string using default settings.
///
/// See [`newick::parse_str`] for full documentation.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Vec<PhyloTree>, ParsingError> {
    newick::parse_str(newick)
}

/// Parses all trees of a NeXML file.
///
/// See [`nexml::parse_file`] for full documentation.
pub fn parse_nexml_file<P: AsRef<Path>>(path: P) -> Result<Vec<PhyloTree>, ParsingError> {
    nexml::parse_file(path)
}
