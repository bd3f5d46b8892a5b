//! Phyloreferences and the OWL class expressions they are exported as.
//!
//! A phyloreference names a clade through its specifiers. With internal
//! specifiers only, it refers to their most recent common ancestor. With one
//! external specifier, it refers to the node that includes all internal
//! specifiers and has the external one as sibling of an ancestor.

use crate::error::{LoadError, LoadResult};
use crate::owlterms;
use crate::phyloref::specifier::{Specifier, SpecifierKind};
use serde_json::{Map, Value, json};
use std::fmt;

/// Key of the internal specifiers in a phyloreference description.
pub const INTERNAL_SPECIFIERS_KEY: &str = "internalSpecifiers";
/// Key of the external specifiers in a phyloreference description.
pub const EXTERNAL_SPECIFIERS_KEY: &str = "externalSpecifiers";

// =#========================================================================#=
// MALFORMATION
// =#========================================================================#=
/// Specifier combinations that cannot be turned into a class expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformation {
    NoSpecifiers,
    NoInternalSpecifiers,
    MultipleExternalSpecifiers,
    SingleInternalSpecifier,
}

impl fmt::Display for Malformation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let message = match self {
            Malformation::NoSpecifiers => "No specifiers provided",
            Malformation::NoInternalSpecifiers => "No internal specifiers provided",
            Malformation::MultipleExternalSpecifiers => "More than one external specifier provided",
            Malformation::SingleInternalSpecifier => "Single internal specifier provided",
        };
        write!(f, "{message}")
    }
}

// =#========================================================================#=
// PHYLOREFERENCE
// =#========================================================================#=
/// A phyloreference with its specifiers.
///
/// Specifier ids are `{id}_specifier{n}`, counting internal specifiers
/// first, then external ones, from 1. Most recent common ancestor classes
/// of three or more internal specifiers are built pairwise and stored as
/// additional classes `{id}_additional{n}`, counting from 0.
///
/// # Example
/// ```
/// use phylogroup::phyloref::Phyloreference;
/// use serde_json::json;
///
/// let json = json!({
///     "label": "Rallinae",
///     "internalSpecifiers": [{"scientificName": "Rallus aquaticus"}, {"scientificName": "Crex crex"}]
/// });
/// let phyloref = Phyloreference::load_from_json("suite#_phyloref1", &json).unwrap();
/// assert_eq!(phyloref.internal_specifiers()[1].id(), "suite#_phyloref1_specifier2");
///
/// let doc = phyloref.export_to_jsonld_document();
/// assert_eq!(doc["equivalentClass"], json!({"@id": "suite#_phyloref1_additional0"}));
/// assert_eq!(doc["label"], json!("Rallinae"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Phyloreference {
    id: String,
    types: Vec<Value>,
    internal_specifiers: Vec<Specifier>,
    external_specifiers: Vec<Specifier>,
    /// Remaining properties, exported as given
    properties: Map<String, Value>,
}

impl Phyloreference {
    /// Loads a phyloreference from its JSON description.
    ///
    /// # Arguments
    /// * `default_id` - Id used unless the description has an `@id`
    /// * `json` - The phyloreference description
    ///
    /// # Errors
    /// [LoadError::InvalidInput] if the description is not an object, its
    /// `@id` is not a string, or its specifiers are not arrays of objects.
    pub fn load_from_json(default_id: impl Into<String>, json: &Value) -> LoadResult<Self> {
        let default_id = default_id.into();
        let Some(json) = json.as_object() else {
            return Err(LoadError::invalid_input(
                default_id,
                "phyloreference must be a JSON object",
            ));
        };

        let mut properties = json.clone();
        let id = match properties.remove("@id") {
            None => default_id,
            Some(Value::String(id)) => id,
            Some(other) => {
                return Err(LoadError::invalid_input(
                    default_id,
                    format!("'@id' must be a string, found {other}"),
                ));
            }
        };

        let mut types = match properties.remove("@type") {
            None => Vec::new(),
            Some(Value::Array(types)) => types,
            Some(other) => vec![other],
        };
        for owl_type in [owlterms::PHYLOREFERENCE, owlterms::OWL_CLASS] {
            if !types.iter().any(|t| t == owl_type) {
                types.push(json!(owl_type));
            }
        }

        let mut count = 0;
        let internal_specifiers = read_specifiers(
            &id,
            &mut properties,
            INTERNAL_SPECIFIERS_KEY,
            SpecifierKind::Internal,
            &mut count,
        )?;
        let external_specifiers = read_specifiers(
            &id,
            &mut properties,
            EXTERNAL_SPECIFIERS_KEY,
            SpecifierKind::External,
            &mut count,
        )?;

        Ok(Phyloreference {
            id,
            types,
            internal_specifiers,
            external_specifiers,
            properties,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn internal_specifiers(&self) -> &[Specifier] {
        &self.internal_specifiers
    }

    pub fn external_specifiers(&self) -> &[Specifier] {
        &self.external_specifiers
    }

    /// Returns why the specifiers cannot define a clade, if they cannot.
    pub fn malformation(&self) -> Option<Malformation> {
        match (self.internal_specifiers.len(), self.external_specifiers.len()) {
            (0, 0) => Some(Malformation::NoSpecifiers),
            (0, _) => Some(Malformation::NoInternalSpecifiers),
            (_, external) if external > 1 => Some(Malformation::MultipleExternalSpecifiers),
            (1, 0) => Some(Malformation::SingleInternalSpecifier),
            _ => None,
        }
    }

    /// Exports this phyloreference as an OWL class in JSON-LD.
    ///
    /// Besides the given properties, the document holds the exported
    /// specifiers, the `equivalentClass` expression, the additional classes
    /// it refers to and, for malformed phyloreferences, the reason under
    /// `malformedPhyloreference`.
    pub fn export_to_jsonld_document(&self) -> Value {
        let mut doc = self.properties.clone();
        doc.insert("@id".to_string(), json!(self.id));
        doc.insert("@type".to_string(), Value::Array(self.types.clone()));
        doc.insert(
            "hasInternalSpecifier".to_string(),
            self.internal_specifiers
                .iter()
                .map(Specifier::export_to_jsonld_document)
                .collect(),
        );
        doc.insert(
            "hasExternalSpecifier".to_string(),
            self.external_specifiers
                .iter()
                .map(Specifier::export_to_jsonld_document)
                .collect(),
        );

        let mut additional_classes = Vec::new();
        match self.malformation() {
            Some(malformation) => {
                doc.insert("malformedPhyloreference".to_string(), json!(malformation.to_string()));
                if malformation == Malformation::NoSpecifiers {
                    doc.insert("equivalentClass".to_string(), json!({"@type": owlterms::CDAO_NODE}));
                    doc.insert("manchesterSyntax".to_string(), json!("Node"));
                }
            }
            None if self.external_specifiers.is_empty() => {
                let mut references = self.internal_specifiers.iter().map(Specifier::reference);
                if let Some(first) = references.next() {
                    let mrca = references.fold(first, |class, next| {
                        self.mrca_class(class, next, &mut additional_classes)
                    });
                    doc.insert("equivalentClass".to_string(), mrca);
                }
            }
            None => {
                let internal = self
                    .internal_specifiers
                    .iter()
                    .map(|s| internal_specifier_class(&s.reference()));
                let external = self
                    .external_specifiers
                    .iter()
                    .map(|s| external_specifier_class(&s.reference()));
                let intersection: Vec<Value> = internal.chain(external).collect();
                doc.insert(
                    "equivalentClass".to_string(),
                    json!({"@type": owlterms::OWL_CLASS, "intersectionOf": intersection}),
                );
            }
        }
        doc.insert("hasAdditionalClass".to_string(), Value::Array(additional_classes));

        Value::Object(doc)
    }

    /// Stores the most recent common ancestor of two classes as an
    /// additional class and returns a reference to it.
    ///
    /// Either class may itself be that ancestor, when the other descends
    /// from it.
    fn mrca_class(&self, class1: Value, class2: Value, additional_classes: &mut Vec<Value>) -> Value {
        let descends = |ancestor: &Value, descendant: &Value| {
            json!({
                "@type": owlterms::OWL_CLASS,
                "intersectionOf": [
                    ancestor,
                    {
                        "@type": owlterms::OWL_RESTRICTION,
                        "onProperty": owlterms::CDAO_HAS_DESCENDANT,
                        "someValuesFrom": [descendant],
                    }
                ]
            })
        };
        let child_with = |inside: &Value, outside: &Value| {
            json!({
                "@type": owlterms::OWL_RESTRICTION,
                "onProperty": owlterms::CDAO_HAS_CHILD,
                "someValuesFrom": {
                    "@type": owlterms::OWL_CLASS,
                    "intersectionOf": [
                        internal_specifier_class(inside),
                        external_specifier_class(outside),
                    ]
                }
            })
        };

        let expression = json!({
            "@type": owlterms::OWL_CLASS,
            "unionOf": [
                descends(&class1, &class2),
                descends(&class2, &class1),
                {
                    "@type": owlterms::OWL_CLASS,
                    "intersectionOf": [child_with(&class1, &class2), child_with(&class2, &class1)],
                }
            ]
        });

        let id = format!("{}_additional{}", self.id, additional_classes.len());
        additional_classes.push(json!({
            "@id": id,
            "@type": owlterms::OWL_CLASS,
            "equivalentClass": expression,
        }));
        json!({"@id": id})
    }
}

/// Nodes that are, or have as descendant, a node of `class`.
fn internal_specifier_class(class: &Value) -> Value {
    json!({
        "@type": owlterms::OWL_RESTRICTION,
        "unionOf": [
            class,
            {
                "@type": owlterms::OWL_RESTRICTION,
                "onProperty": owlterms::CDAO_HAS_DESCENDANT,
                "someValuesFrom": class,
            }
        ]
    })
}

/// Nodes with a sibling that is, or has as descendant, a node of `class`.
fn external_specifier_class(class: &Value) -> Value {
    json!({
        "@type": owlterms::OWL_RESTRICTION,
        "onProperty": owlterms::PHYLOREF_HAS_SIBLING,
        "someValuesFrom": {
            "@type": owlterms::OWL_CLASS,
            "unionOf": [internal_specifier_class(class)],
        }
    })
}

/// Removes the specifier list under `key` and numbers its specifiers,
/// continuing from `count`.
fn read_specifiers(
    phyloref_id: &str,
    properties: &mut Map<String, Value>,
    key: &str,
    kind: SpecifierKind,
    count: &mut usize,
) -> LoadResult<Vec<Specifier>> {
    let entries = match properties.remove(key) {
        None => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            return Err(LoadError::invalid_input(
                phyloref_id,
                format!("'{key}' must be an array, found {other}"),
            ));
        }
    };

    entries
        .iter()
        .map(|entry| {
            *count += 1;
            Specifier::from_json(format!("{phyloref_id}_specifier{count}"), kind, entry)
        })
        .collect()
}
