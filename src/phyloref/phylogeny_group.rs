//! Phylogeny groups: the trees of one tree source sharing labeled node data.

use crate::error::{LoadError, LoadResult};
use crate::owlterms;
use crate::phyloref::labeled_data::{LabeledNodeData, read_labeled_node_data};
use crate::phyloref::loader::{TreeLoader, TreeSource};
use crate::phyloref::phylogeny::Phylogeny;
use log::{debug, warn};
use serde_json::{Value, json};
use std::sync::Arc;

/// Key of the labeled node data array in a phylogeny group description.
pub const LABELED_NODE_DATA_KEY: &str = "labeledNodeData";

// =#========================================================================#=
// PHYLOGENY GROUP
// =#========================================================================#=
/// The phylogenies read from one Newick string or NeXML file, together with
/// the labeled node data that applies to all of them.
///
/// A group is described in JSON by
/// * `filename` - path to a NeXML file, or
/// * `newick` - one or more Newick trees (ignored if `filename` is given)
/// * `labeledNodeData` - optional array of entries keyed by their `label` field
///
/// # Example
/// ```
/// use phylogroup::phyloref::PhylogenyGroup;
/// use serde_json::json;
///
/// let description = json!({
///     "newick": "((Rallus_aquaticus,Crex_crex),Gallinula_chloropus);",
///     "labeledNodeData": [{"label": "Crex crex", "specimen": "NHMUK 1"}]
/// });
/// let group = PhylogenyGroup::load_from_json("rails", &description).unwrap();
///
/// assert_eq!(group.phylogenies()[0].id(), "rails_phylogeny1");
/// assert_eq!(group.labeled_data().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct PhylogenyGroup {
    id: String,
    phylogenies: Vec<Phylogeny>,
    labeled_data: Arc<LabeledNodeData>,
}

// ============================================================================
// Construction & Loading (pub)
// ============================================================================
impl PhylogenyGroup {
    /// Creates an empty group.
    pub fn new(id: impl Into<String>) -> Self {
        PhylogenyGroup {
            id: id.into(),
            phylogenies: Vec::new(),
            labeled_data: Arc::new(LabeledNodeData::new()),
        }
    }

    /// Loads a group from its JSON description with a default [TreeLoader].
    ///
    /// See [`load_with_loader`](Self::load_with_loader).
    pub fn load_from_json(id: impl Into<String>, json: &Value) -> LoadResult<Self> {
        Self::load_with_loader(id, json, &TreeLoader::new())
    }

    /// Loads a group from its JSON description:
    /// 1. reads `labeledNodeData` (empty if absent)
    /// 2. loads the trees of `filename` or `newick` with the given loader
    /// 3. wraps every tree into a [Phylogeny] with id `{id}_phylogeny{n}`,
    ///    `n` counting from 1, all sharing the labeled node data
    ///
    /// # Errors
    /// * [LoadError::InvalidInput] - If `json` is not an object, or
    ///   `labeledNodeData` is not an array
    /// * [LoadError::DuplicateLabel] - If a label occurs in more than one entry
    /// * [LoadError::MissingFile], [LoadError::Parse] - If the trees cannot be loaded
    pub fn load_with_loader(
        id: impl Into<String>,
        json: &Value,
        loader: &TreeLoader,
    ) -> LoadResult<Self> {
        let id = id.into();
        let Some(description) = json.as_object() else {
            return Err(LoadError::invalid_input(
                format!("phylogeny {id}"),
                "expected a JSON object",
            ));
        };

        let labeled_data = match description.get(LABELED_NODE_DATA_KEY) {
            None => LabeledNodeData::new(),
            Some(Value::Array(entries)) => read_labeled_node_data(&id, entries)?,
            Some(other) => {
                return Err(LoadError::invalid_input(
                    format!("phylogeny {id}"),
                    format!("'{LABELED_NODE_DATA_KEY}' must be an array, found {other}"),
                ));
            }
        };
        let labeled_data = Arc::new(labeled_data);

        let source = TreeSource::from_json(&id, description)?;
        if source == TreeSource::Absent {
            warn!("Phylogeny {id} has neither 'filename' nor 'newick'; it contains no trees");
        }
        let trees = loader.load(&id, &source)?;

        let phylogenies: Vec<Phylogeny> = trees
            .into_iter()
            .enumerate()
            .map(|(n, tree)| {
                Phylogeny::new(format!("{id}_phylogeny{}", n + 1), tree, Arc::clone(&labeled_data))
            })
            .collect();

        debug!(
            "Loaded phylogeny group {id} with {} phylogenies and {} labeled nodes",
            phylogenies.len(),
            labeled_data.len()
        );

        Ok(PhylogenyGroup {
            id,
            phylogenies,
            labeled_data,
        })
    }
}

// ============================================================================
// Getters & Export (pub)
// ============================================================================
impl PhylogenyGroup {
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the phylogenies in load order.
    pub fn phylogenies(&self) -> &[Phylogeny] {
        &self.phylogenies
    }

    /// Returns the number of phylogenies.
    pub fn len(&self) -> usize {
        self.phylogenies.len()
    }

    /// Returns `true` if the group has no phylogenies.
    pub fn is_empty(&self) -> bool {
        self.phylogenies.is_empty()
    }

    /// Returns the labeled node data shared by all phylogenies.
    pub fn labeled_data(&self) -> &Arc<LabeledNodeData> {
        &self.labeled_data
    }

    /// Exports this group as a JSON-LD document, with its phylogenies in load order.
    pub fn export_to_jsonld_document(&self) -> Value {
        let phylogenies: Vec<Value> = self
            .phylogenies
            .iter()
            .map(Phylogeny::export_to_jsonld_document)
            .collect();

        json!({
            "@id": self.id,
            "@type": owlterms::PHYLOREFERENCE_TEST_PHYLOGENY_GROUP,
            "phylogenies": phylogenies,
        })
    }
}
