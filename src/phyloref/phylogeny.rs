//! A single phylogeny of a phylogeny group, and its JSON-LD export.

use crate::model::{Annotation, PhyloTree, VertexIndex};
use crate::newick::to_newick;
use crate::owlterms;
use crate::phyloref::labeled_data::{LABEL_KEY, LabeledNodeData, NodeData};
use crate::phyloref::taxonomic_unit::TaxonomicUnit;
use log::debug;
use serde_json::{Map, Value, json};
use std::sync::Arc;

/// Name of taxon annotations whose values name further taxonomic units.
const CLOSE_MATCH: &str = "closeMatch";

/// Entry keys that are never copied onto nodes.
const RESERVED_KEYS: [&str; 2] = [LABEL_KEY, "@id"];

// =#========================================================================#=
// PHYLOGENY
// =#========================================================================#=
/// A parsed tree together with the labeled node data of its group.
///
/// Node ids are `{id}_node{n}`, with the root as `node0`. Vertices are
/// visited in pre-order, and a visited vertex numbers all of its children
/// before the walk descends into them, so for `((A,B),C);` the ids are
/// root, `(A,B)`, `C`, `A`, `B`. They are assigned once, on construction.
#[derive(Debug, Clone)]
pub struct Phylogeny {
    id: String,
    tree: PhyloTree,
    labeled_data: Arc<LabeledNodeData>,
    /// Node id per vertex index
    node_ids: Vec<String>,
}

impl Phylogeny {
    /// Creates a phylogeny and assigns its node ids.
    pub fn new(id: impl Into<String>, tree: PhyloTree, labeled_data: Arc<LabeledNodeData>) -> Self {
        let id = id.into();
        let mut node_ids = vec![String::new(); tree.num_vertices()];
        let mut count = 0;
        let mut assign = |index: VertexIndex, node_ids: &mut Vec<String>| {
            if node_ids[index].is_empty() {
                node_ids[index] = format!("{id}_node{count}");
                count += 1;
            }
        };

        // A vertex numbers all of its children when it is visited
        for index in tree.pre_order() {
            assign(index, &mut node_ids);
            for &child in tree[index].children() {
                assign(child, &mut node_ids);
            }
        }

        Phylogeny {
            id,
            tree,
            labeled_data,
            node_ids,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree(&self) -> &PhyloTree {
        &self.tree
    }

    /// Returns the labeled node data shared with the other phylogenies of the group.
    pub fn labeled_data(&self) -> &Arc<LabeledNodeData> {
        &self.labeled_data
    }

    /// Returns the id of the vertex at `index`, or `None` if it is out of
    /// bounds or not reachable from the root.
    pub fn node_id(&self, index: VertexIndex) -> Option<&str> {
        self.node_ids
            .get(index)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Returns the taxonomic units of the vertex at `index`: one for its
    /// label, followed by one per `closeMatch` annotation of its taxon.
    pub fn taxonomic_units(&self, index: VertexIndex) -> Vec<TaxonomicUnit> {
        let vertex = &self.tree[index];
        let node_id = &self.node_ids[index];

        let mut names: Vec<String> = vertex.display_label().map(str::to_string).into_iter().collect();
        if let Some(taxon) = vertex.taxon() {
            names.extend(taxon.find_all(CLOSE_MATCH));
        }

        names
            .into_iter()
            .enumerate()
            .map(|(k, name)| {
                TaxonomicUnit::from_scientific_name(format!("{node_id}_tunit{}", k + 1), name)
            })
            .collect()
    }

    /// Exports this phylogeny as a JSON-LD document with its Newick string,
    /// its nodes in pre-order and its annotations.
    pub fn export_to_jsonld_document(&self) -> Value {
        let order = self.tree.pre_order();
        let nodes: Vec<Value> = order.iter().map(|&index| self.export_node(index)).collect();

        let mut annotations: Vec<Value> = self
            .tree
            .annotations()
            .iter()
            .map(|annotation| export_annotation(annotation, &self.id))
            .collect();
        for &index in &order {
            let target = &self.node_ids[index];
            annotations.extend(
                self.tree[index]
                    .annotations()
                    .iter()
                    .map(|annotation| export_annotation(annotation, target)),
            );
        }

        json!({
            "@id": self.id,
            "@type": owlterms::PHYLOREFERENCE_PHYLOGENY,
            "newick": to_newick(&self.tree),
            "nodes": nodes,
            "annotations": annotations,
        })
    }

    fn export_node(&self, index: VertexIndex) -> Value {
        let vertex = &self.tree[index];
        let ids = |indices: &[VertexIndex]| -> Vec<Value> {
            indices
                .iter()
                .map(|&i| Value::String(self.node_ids[i].clone()))
                .collect()
        };

        let mut node = Map::new();
        node.insert("@id".to_string(), json!(self.node_ids[index]));
        node.insert("@type".to_string(), json!(owlterms::CDAO_NODE));
        node.insert("inPhylogeny".to_string(), json!(self.id));

        let label = vertex.display_label();
        if let Some(label) = label {
            node.insert("labels".to_string(), json!([label]));
        }
        node.insert("taxa".to_string(), json!(self.taxonomic_units(index)));
        node.insert("children".to_string(), Value::Array(ids(vertex.children())));
        node.insert("siblings".to_string(), Value::Array(ids(&self.tree.siblings(index))));

        // Labeled node data
        if let Some(label) = label {
            match self.labeled_data.get(label) {
                Some(entry) => merge_entry(&mut node, entry),
                None => debug!(
                    "No labeled node data for label '{}' of node {}",
                    label, self.node_ids[index]
                ),
            }
        }

        Value::Object(node)
    }
}

/// Copies the keys of a labeled node data entry onto a node.
///
/// A key the node already has is turned into an array holding the old and
/// new values, without duplicates and in order of appearance.
fn merge_entry(node: &mut Map<String, Value>, entry: &NodeData) {
    for (key, value) in entry {
        if RESERVED_KEYS.contains(&key.as_str()) {
            continue;
        }

        match node.remove(key) {
            None => {
                node.insert(key.clone(), value.clone());
            }
            Some(existing) => {
                let mut combined = Vec::new();
                for v in into_values(existing).into_iter().chain(into_values(value.clone())) {
                    if !combined.contains(&v) {
                        combined.push(v);
                    }
                }
                node.insert(key.clone(), Value::Array(combined));
            }
        }
    }
}

fn into_values(value: Value) -> Vec<Value> {
    match value {
        Value::Array(values) => values,
        other => vec![other],
    }
}

fn export_annotation(annotation: &Annotation, target: &str) -> Value {
    json!({
        "@type": owlterms::OA_ANNOTATION,
        "annotationName": annotation.name(),
        "annotationTarget": target,
        "annotationBody": annotation.value().to_string(),
    })
}
