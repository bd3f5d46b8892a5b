//! Phyloreference test suites: one JSON document with phylogeny groups and
//! the phyloreferences to be tested on them.

use crate::error::{LoadError, LoadResult};
use crate::owlterms;
use crate::phyloref::loader::TreeLoader;
use crate::phyloref::phyloreference::Phyloreference;
use crate::phyloref::phylogeny_group::PhylogenyGroup;
use serde_json::{Map, Value, json};

/// Document keys whose values may be a single value or a list of values.
const CITATION: &str = "citation";
const URL: &str = "url";
const YEAR: &str = "year";
const CURATOR: &str = "curator";
const COMMENTS: &str = "comments";

// =#========================================================================#=
// TEST SUITE
// =#========================================================================#=
/// A phyloreference test suite, typically describing a single publication.
///
/// # Example
/// ```
/// use phylogroup::phyloref::{PhyloreferenceTestSuite, TreeLoader};
/// use serde_json::json;
///
/// let doc = json!({
///     "@id": "http://example.org/rails",
///     "phylogenies": [{"newick": "(Rallus_aquaticus,Crex_crex);"}],
///     "phylorefs": [{"label": "Rallidae"}]
/// });
/// let suite = PhyloreferenceTestSuite::load_from_document(&doc, &TreeLoader::new()).unwrap();
///
/// assert_eq!(suite.id(), "http://example.org/rails#");
/// assert_eq!(suite.phylogeny_groups()[0].id(), "http://example.org/rails#phylogenies1");
/// ```
#[derive(Debug, Clone)]
pub struct PhyloreferenceTestSuite {
    id: String,
    types: Vec<Value>,
    owl_imports: Vec<Value>,
    citation: Vec<Value>,
    url: Vec<Value>,
    year: Vec<Value>,
    curator: Vec<Value>,
    comments: Vec<Value>,
    phylogeny_groups: Vec<PhylogenyGroup>,
    phylorefs: Vec<Phyloreference>,
}

impl PhyloreferenceTestSuite {
    /// Creates an empty test suite.
    ///
    /// The id is completed with `#` unless it already ends in `#` or `/`.
    pub fn new(id: impl Into<String>) -> Self {
        let mut id = id.into();
        if !id.ends_with('#') && !id.ends_with('/') {
            id.push('#');
        }

        PhyloreferenceTestSuite {
            id,
            types: vec![
                json!(owlterms::PHYLOREFERENCE_TEST_CASE),
                json!(owlterms::OWL_ONTOLOGY),
            ],
            owl_imports: owlterms::OWL_IMPORTS.iter().map(|iri| json!(iri)).collect(),
            citation: Vec::new(),
            url: Vec::new(),
            year: Vec::new(),
            curator: Vec::new(),
            comments: Vec::new(),
            phylogeny_groups: Vec::new(),
            phylorefs: Vec::new(),
        }
    }

    /// Loads a test suite from a JSON document.
    ///
    /// Phylogeny groups get the ids `{id}phylogenies{n}`, phyloreferences
    /// without `@id` get `{id}_phyloref{n}`, both counting from 1.
    ///
    /// # Errors
    /// * [LoadError::MissingDocumentId] - If `@id` is missing, empty or not a string
    /// * [LoadError::InvalidInput] - If the document, `phylogenies` or
    ///   `phylorefs` have the wrong shape
    /// * Any error of [PhylogenyGroup::load_with_loader] or
    ///   [Phyloreference::load_from_json]
    pub fn load_from_document(doc: &Value, loader: &TreeLoader) -> LoadResult<Self> {
        let Some(doc) = doc.as_object() else {
            return Err(LoadError::invalid_input("test suite", "expected a JSON object"));
        };
        let id = match doc.get("@id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => id,
            _ => return Err(LoadError::MissingDocumentId),
        };

        let mut suite = PhyloreferenceTestSuite::new(id);
        append_or_extend(&mut suite.types, doc, "@type");
        append_or_extend(&mut suite.owl_imports, doc, "owl:imports");
        append_or_extend(&mut suite.citation, doc, CITATION);
        append_or_extend(&mut suite.url, doc, URL);
        append_or_extend(&mut suite.year, doc, YEAR);
        append_or_extend(&mut suite.curator, doc, CURATOR);
        append_or_extend(&mut suite.comments, doc, COMMENTS);

        for (n, group) in array_entries(doc, "phylogenies")?.iter().enumerate() {
            let group_id = format!("{}phylogenies{}", suite.id, n + 1);
            suite
                .phylogeny_groups
                .push(PhylogenyGroup::load_with_loader(group_id, group, loader)?);
        }

        for (n, phyloref) in array_entries(doc, "phylorefs")?.iter().enumerate() {
            let phyloref_id = format!("{}_phyloref{}", suite.id, n + 1);
            suite
                .phylorefs
                .push(Phyloreference::load_from_json(phyloref_id, phyloref)?);
        }

        Ok(suite)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn phylogeny_groups(&self) -> &[PhylogenyGroup] {
        &self.phylogeny_groups
    }

    pub fn phylorefs(&self) -> &[Phyloreference] {
        &self.phylorefs
    }

    /// Exports this test suite as a JSON-LD ontology document.
    ///
    /// Metadata lists with a single value are exported as that value,
    /// empty ones are left out.
    pub fn export_to_jsonld_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("@id".to_string(), json!(self.id));
        doc.insert("@type".to_string(), Value::Array(self.types.clone()));
        doc.insert("owl:imports".to_string(), Value::Array(self.owl_imports.clone()));

        for (key, values) in [
            (CITATION, &self.citation),
            (URL, &self.url),
            (YEAR, &self.year),
            (CURATOR, &self.curator),
            (COMMENTS, &self.comments),
        ] {
            match values.as_slice() {
                [] => {}
                [single] => {
                    doc.insert(key.to_string(), single.clone());
                }
                _ => {
                    doc.insert(key.to_string(), Value::Array(values.clone()));
                }
            }
        }

        if !self.phylogeny_groups.is_empty() {
            let groups = self
                .phylogeny_groups
                .iter()
                .map(PhylogenyGroup::export_to_jsonld_document)
                .collect();
            doc.insert("phylogenies".to_string(), Value::Array(groups));
        }
        if !self.phylorefs.is_empty() {
            let phylorefs = self
                .phylorefs
                .iter()
                .map(Phyloreference::export_to_jsonld_document)
                .collect();
            doc.insert("phylorefs".to_string(), Value::Array(phylorefs));
        }

        Value::Object(doc)
    }
}

/// Appends a single value, or all values of a list, stored under `key`.
fn append_or_extend(property: &mut Vec<Value>, doc: &Map<String, Value>, key: &str) {
    match doc.get(key) {
        None => {}
        Some(Value::Array(values)) => property.extend(values.iter().cloned()),
        Some(value) => property.push(value.clone()),
    }
}

/// Returns the entries of an optional array under `key`.
fn array_entries<'a>(doc: &'a Map<String, Value>, key: &str) -> LoadResult<&'a [Value]> {
    match doc.get(key) {
        None => Ok(&[][..]),
        Some(Value::Array(entries)) => Ok(entries.as_slice()),
        Some(other) => Err(LoadError::invalid_input(
            "test suite",
            format!("'{key}' must be an array, found {other}"),
        )),
    }
}
