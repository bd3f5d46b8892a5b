//! Ontology terms used in exported JSON-LD documents.

/// Ontologies imported by every exported test suite.
pub const OWL_IMPORTS: [&str; 3] = [
    "https://raw.githubusercontent.com/phyloref/curation-workflow/develop/ontologies/phyloref_testcase.owl",
    "https://raw.githubusercontent.com/phyloref/phyloref-ontology/master/phyloref.owl",
    "http://purl.obolibrary.org/obo/bco.owl",
];

// CDAO
pub const CDAO_NODE: &str = "obo:CDAO_0000140";
pub const CDAO_TAXONOMIC_UNIT: &str = "obo:CDAO_0000138";
pub const CDAO_HAS_CHILD: &str = "obo:CDAO_0000149";
pub const CDAO_HAS_DESCENDANT: &str = "obo:CDAO_0000174";

// Phyloreferencing
pub const PHYLOREFERENCE: &str = "http://phyloinformatics.net/phyloref.owl#Phyloreference";
pub const PHYLOREFERENCE_TEST_CASE: &str = "testcase:PhyloreferenceTestCase";
pub const PHYLOREFERENCE_TEST_PHYLOGENY_GROUP: &str = "testcase:PhyloreferenceTestPhylogenyGroup";
pub const PHYLOREFERENCE_PHYLOGENY: &str = "testcase:PhyloreferenceTestPhylogeny";
pub const PHYLOREF_HAS_SIBLING: &str = "http://phyloinformatics.net/phyloref.owl#has_Sibling";

// Specifiers
pub const INTERNAL_SPECIFIER: &str = "testcase:InternalSpecifier";
pub const EXTERNAL_SPECIFIER: &str = "testcase:ExternalSpecifier";

/// Web Annotation Data Model
pub const OA_ANNOTATION: &str = "http://www.w3.org/ns/oa#Annotation";

/// Darwin Core taxon, used for scientific names
pub const DWC_TAXON: &str = "dwc:Taxon";

pub const OWL_ONTOLOGY: &str = "owl:Ontology";
pub const OWL_CLASS: &str = "owl:Class";
pub const OWL_RESTRICTION: &str = "owl:Restriction";
