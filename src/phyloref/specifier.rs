//! Specifiers: the properties a phyloreference uses to pick out nodes.

use crate::error::{LoadError, LoadResult};
use crate::owlterms;
use serde_json::{Map, Value, json};

/// Key of a specifier property that describes it instead of matching nodes.
const DESCRIPTION_KEY: &str = "dc:description";

/// Whether a specifier must be inside or outside the referenced clade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecifierKind {
    Internal,
    External,
}

impl SpecifierKind {
    /// Returns the ontology class of specifiers of this kind.
    pub fn owl_type(self) -> &'static str {
        match self {
            SpecifierKind::Internal => owlterms::INTERNAL_SPECIFIER,
            SpecifierKind::External => owlterms::EXTERNAL_SPECIFIER,
        }
    }
}

/// Matches the nodes of a phylogeny that carry all given property values.
///
/// # Example
/// ```
/// use phylogroup::phyloref::{Specifier, SpecifierKind};
/// use serde_json::json;
///
/// let match_on = json!({"scientificName": "Crex crex"});
/// let specifier = Specifier::from_json("p_specifier1", SpecifierKind::Internal, &match_on).unwrap();
///
/// assert_eq!(specifier.reference(), json!({"@id": "p_specifier1"}));
/// let doc = specifier.export_to_jsonld_document();
/// assert_eq!(doc["unionOf"][0]["intersectionOf"][1]["hasValue"], json!("Crex crex"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Specifier {
    id: String,
    kind: SpecifierKind,
    match_on: Map<String, Value>,
}

impl Specifier {
    pub fn new(id: impl Into<String>, kind: SpecifierKind, match_on: Map<String, Value>) -> Self {
        Specifier {
            id: id.into(),
            kind,
            match_on,
        }
    }

    /// Creates a specifier from its JSON description.
    ///
    /// # Errors
    /// [LoadError::InvalidInput] if `json` is not an object.
    pub fn from_json(id: impl Into<String>, kind: SpecifierKind, json: &Value) -> LoadResult<Self> {
        let id = id.into();
        match json.as_object() {
            Some(match_on) => Ok(Specifier::new(id, kind, match_on.clone())),
            None => Err(LoadError::invalid_input(
                format!("specifier {id}"),
                format!("expected a JSON object, found {json}"),
            )),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> SpecifierKind {
        self.kind
    }

    pub fn match_on(&self) -> &Map<String, Value> {
        &self.match_on
    }

    /// Returns a JSON-LD reference to this specifier.
    pub fn reference(&self) -> Value {
        json!({"@id": self.id})
    }

    /// Exports this specifier as an OWL class: the union of one
    /// `Node and (<key> value <value>)` restriction per matched property.
    pub fn export_to_jsonld_document(&self) -> Value {
        let restrictions: Vec<Value> = self
            .match_on
            .iter()
            .filter(|(key, _)| key.as_str() != DESCRIPTION_KEY)
            .map(|(key, value)| {
                json!({
                    "@type": owlterms::OWL_CLASS,
                    "intersectionOf": [
                        {"@id": owlterms::CDAO_NODE},
                        {
                            "@type": owlterms::OWL_RESTRICTION,
                            "onProperty": key,
                            "hasValue": value,
                        }
                    ]
                })
            })
            .collect();

        json!({
            "@id": self.id,
            "@type": [owlterms::OWL_CLASS, self.kind.owl_type()],
            "unionOf": restrictions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_description_is_not_matched() {
        let match_on = json!({"dc:description": "the duck", "scientificName": "Anas"});
        let specifier = Specifier::from_json("s", SpecifierKind::External, &match_on).unwrap();
        let doc = specifier.export_to_jsonld_document();

        assert_eq!(doc["@type"], json!([owlterms::OWL_CLASS, owlterms::EXTERNAL_SPECIFIER]));
        let union = doc["unionOf"].as_array().unwrap();
        assert_eq!(union.len(), 1);
        assert_eq!(union[0]["intersectionOf"][1]["onProperty"], json!("scientificName"));
    }

    #[test]
    fn test_specifier_must_be_object() {
        assert!(matches!(
            Specifier::from_json("s", SpecifierKind::Internal, &json!("Anas")),
            Err(LoadError::InvalidInput { .. })
        ));
    }
}
