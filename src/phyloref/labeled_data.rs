//! Labeled node data: metadata records keyed by node label.
//!
//! A phylogeny group may come with a `labeledNodeData` array. Each entry is
//! a JSON object naming one or more node labels in its `label` field, e.g.
//! ```json
//! { "label": ["Rallus aquaticus", "Rallus_aquaticus"], "specimen": "USNM 12345" }
//! ```
//! Every label is registered once, pointing at the shared entry.

use crate::error::{LoadError, LoadResult};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Key of the label field in labeled node data entries.
pub const LABEL_KEY: &str = "label";

/// A labeled node data entry.
pub type NodeData = Map<String, Value>;

// =#========================================================================#=
// LABEL FIELD
// =#========================================================================#=
/// The `label` field of an entry: a single label or a list of labels.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LabelField {
    Single(String),
    Multiple(Vec<String>),
}

impl LabelField {
    /// Returns the labels as a uniform list.
    pub fn into_labels(self) -> Vec<String> {
        match self {
            LabelField::Single(label) => vec![label],
            LabelField::Multiple(labels) => labels,
        }
    }
}

// =#========================================================================#=
// LABELED NODE DATA
// =#========================================================================#=
/// Mapping from node label to its metadata entry.
///
/// Entries listing several labels are stored once and shared, so
/// [`get`](Self::get) returns the same [Arc] for each of their labels.
#[derive(Debug, Clone, Default)]
pub struct LabeledNodeData {
    entries: HashMap<String, Arc<NodeData>>,
}

impl LabeledNodeData {
    /// Creates an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the entry registered for `label`, if any.
    pub fn get(&self, label: &str) -> Option<&Arc<NodeData>> {
        self.entries.get(label)
    }

    /// Returns `true` if an entry is registered for `label`.
    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Returns the number of registered labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no label is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns all registered labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Reads the `labeledNodeData` array of a phylogeny group.
///
/// Entries that are not objects or have no `label` field are skipped.
///
/// # Arguments
/// * `group_id` - Id of the phylogeny group, used in error messages
/// * `entries` - The entries of the `labeledNodeData` array
///
/// # Errors
/// * [LoadError::DuplicateLabel] - If a label is listed by more than one entry
///   (or twice by the same entry)
/// * [LoadError::InvalidInput] - If a `label` field is neither a string nor
///   an array of strings
///
/// # Example
/// ```
/// use phylogroup::phyloref::read_labeled_node_data;
/// use serde_json::json;
///
/// let entries = json!([{"label": ["x", "y"], "note": "shared"}, {"note": "unlabeled"}]);
/// let data = read_labeled_node_data("g", entries.as_array().unwrap()).unwrap();
/// assert_eq!(data.len(), 2);
/// assert!(std::sync::Arc::ptr_eq(data.get("x").unwrap(), data.get("y").unwrap()));
/// ```
pub fn read_labeled_node_data(group_id: &str, entries: &[Value]) -> LoadResult<LabeledNodeData> {
    let mut data = LabeledNodeData::new();

    for entry in entries {
        let Some(object) = entry.as_object() else {
            continue;
        };
        let Some(label_value) = object.get(LABEL_KEY) else {
            continue;
        };

        let labels = LabelField::deserialize(label_value)
            .map_err(|_| {
                LoadError::invalid_input(
                    format!("labeled node data of phylogeny {group_id}"),
                    format!("'label' must be a string or an array of strings, found {label_value}"),
                )
            })?
            .into_labels();

        let shared = Arc::new(object.clone());
        for label in labels {
            if data.entries.contains_key(&label) {
                return Err(LoadError::duplicate_label(group_id, label));
            }
            data.entries.insert(label, Arc::clone(&shared));
        }
    }

    Ok(data)
}
