//! Taxonomic units and scientific names derived from node labels.

use crate::owlterms;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static UNINOMIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+)$").expect("valid uninomial regex"));
static BINOMIAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\w+) ([\w\-]+)\b").expect("valid binomial regex"));

// =#========================================================================#=
// SCIENTIFIC NAME
// =#========================================================================#=
/// A scientific name, split into its components where it looks like a
/// uninomial (`Rallus`) or starts like a binomial (`Rallus aquaticus ...`).
///
/// # Example
/// ```
/// use phylogroup::phyloref::ScientificName;
///
/// let name = ScientificName::new("Rallus aquaticus Linnaeus, 1758");
/// assert_eq!(name.genus(), Some("Rallus"));
/// assert_eq!(name.specific_epithet(), Some("aquaticus"));
/// assert_eq!(name.binomial_name(), Some("Rallus aquaticus"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScientificName {
    #[serde(rename = "@type")]
    owl_type: &'static str,
    #[serde(rename = "scientific_name")]
    verbatim_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    binomial_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    genus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    specific_epithet: Option<String>,
}

impl ScientificName {
    /// Parses a verbatim name.
    pub fn new(verbatim_name: impl Into<String>) -> Self {
        let verbatim_name = verbatim_name.into();
        let mut name = ScientificName {
            owl_type: owlterms::DWC_TAXON,
            verbatim_name,
            binomial_name: None,
            genus: None,
            specific_epithet: None,
        };

        if let Some(caps) = UNINOMIAL_RE.captures(&name.verbatim_name) {
            name.binomial_name = Some(caps[1].to_string());
            name.genus = Some(caps[1].to_string());
        } else if let Some(caps) = BINOMIAL_RE.captures(&name.verbatim_name) {
            name.binomial_name = Some(format!("{} {}", &caps[1], &caps[2]));
            name.genus = Some(caps[1].to_string());
            name.specific_epithet = Some(caps[2].to_string());
        }

        name
    }

    pub fn verbatim_name(&self) -> &str {
        &self.verbatim_name
    }

    pub fn genus(&self) -> Option<&str> {
        self.genus.as_deref()
    }

    pub fn specific_epithet(&self) -> Option<&str> {
        self.specific_epithet.as_deref()
    }

    pub fn binomial_name(&self) -> Option<&str> {
        self.binomial_name.as_deref()
    }
}

// =#========================================================================#=
// TAXONOMIC UNIT
// =#========================================================================#=
/// A taxonomic unit attached to a phylogeny node, identified by its
/// scientific names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomicUnit {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "@type")]
    owl_types: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    scientific_names: Vec<ScientificName>,
}

impl TaxonomicUnit {
    /// Creates a taxonomic unit for a single scientific name.
    pub fn from_scientific_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        TaxonomicUnit {
            id: id.into(),
            owl_types: vec![owlterms::CDAO_TAXONOMIC_UNIT],
            scientific_names: vec![ScientificName::new(name)],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scientific_names(&self) -> &[ScientificName] {
        &self.scientific_names
    }
}
