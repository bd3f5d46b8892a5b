use phylogroup::error::LoadError;
use phylogroup::owlterms;
use phylogroup::phyloref::{PhyloreferenceTestSuite, TreeLoader};
use serde_json::json;

#[test]
fn test_load_and_export_suite() {
    let doc = json!({
        "@id": "http://example.org/fisher2007",
        "@type": "owl:Thing",
        "citation": "Fisher et al. (2007)",
        "url": ["http://example.org/a", "http://example.org/b"],
        "phylogenies": [
            {"newick": "((Anas_platyrhynchos,Aythya_ferina),Anser_anser);"},
            {"newick": "(A,B);(C,D);", "labeledNodeData": [{"label": "A", "expected": "x"}]}
        ],
        "phylorefs": [
            {"label": "Anatinae"},
            {"@id": "#anserinae", "@type": ["owl:Class"]}
        ]
    });
    let suite = PhyloreferenceTestSuite::load_from_document(&doc, &TreeLoader::new()).unwrap();

    assert_eq!(suite.id(), "http://example.org/fisher2007#");
    let groups = suite.phylogeny_groups();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].id(), "http://example.org/fisher2007#phylogenies1");
    assert_eq!(groups[1].len(), 2);
    assert_eq!(groups[1].phylogenies()[1].id(), "http://example.org/fisher2007#phylogenies2_phylogeny2");

    let exported = suite.export_to_jsonld_document();
    assert_eq!(
        exported["@type"],
        json!([owlterms::PHYLOREFERENCE_TEST_CASE, owlterms::OWL_ONTOLOGY, "owl:Thing"])
    );
    assert_eq!(exported["owl:imports"].as_array().unwrap().len(), owlterms::OWL_IMPORTS.len());
    assert_eq!(exported["citation"], json!("Fisher et al. (2007)"));
    assert_eq!(exported["url"], json!(["http://example.org/a", "http://example.org/b"]));
    assert!(exported.get("year").is_none());
    assert_eq!(exported["phylogenies"].as_array().unwrap().len(), 2);

    let phylorefs = exported["phylorefs"].as_array().unwrap();
    assert_eq!(phylorefs[0]["@id"], json!("http://example.org/fisher2007#_phyloref1"));
    assert_eq!(phylorefs[0]["@type"], json!([owlterms::PHYLOREFERENCE, owlterms::OWL_CLASS]));
    assert_eq!(phylorefs[0]["label"], json!("Anatinae"));
    assert_eq!(phylorefs[1]["@id"], json!("#anserinae"));
    assert_eq!(phylorefs[1]["@type"], json!(["owl:Class", owlterms::PHYLOREFERENCE]));
}

#[test]
fn test_phyloref_with_external_specifier() {
    let doc = json!({
        "@id": "urn:x",
        "phylorefs": [{
            "label": "P",
            "internalSpecifiers": [{"scientificName": "Anas platyrhynchos"}, {"scientificName": "Aythya ferina"}],
            "externalSpecifiers": [{"scientificName": "Anser anser", "dc:description": "goose"}]
        }]
    });
    let suite = PhyloreferenceTestSuite::load_from_document(&doc, &TreeLoader::new()).unwrap();
    let phyloref = &suite.export_to_jsonld_document()["phylorefs"][0];

    assert_eq!(phyloref["@id"], json!("urn:x#_phyloref1"));
    assert_eq!(phyloref["label"], json!("P"));
    assert!(phyloref.get("internalSpecifiers").is_none());
    assert!(phyloref.get("externalSpecifiers").is_none());
    assert!(phyloref.get("malformedPhyloreference").is_none());

    let internal = phyloref["hasInternalSpecifier"].as_array().unwrap();
    assert_eq!(internal[0]["@id"], json!("urn:x#_phyloref1_specifier1"));
    assert_eq!(internal[1]["@id"], json!("urn:x#_phyloref1_specifier2"));
    assert_eq!(internal[0]["@type"], json!([owlterms::OWL_CLASS, owlterms::INTERNAL_SPECIFIER]));
    let external = &phyloref["hasExternalSpecifier"][0];
    assert_eq!(external["@id"], json!("urn:x#_phyloref1_specifier3"));
    assert_eq!(external["unionOf"].as_array().unwrap().len(), 1);

    let class = &phyloref["equivalentClass"];
    assert_eq!(class["@type"], json!(owlterms::OWL_CLASS));
    let parts = class["intersectionOf"].as_array().unwrap();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[0]["unionOf"][0], json!({"@id": "urn:x#_phyloref1_specifier1"}));
    assert_eq!(
        parts[0]["unionOf"][1]["onProperty"],
        json!(owlterms::CDAO_HAS_DESCENDANT)
    );
    assert_eq!(parts[2]["onProperty"], json!(owlterms::PHYLOREF_HAS_SIBLING));
    assert_eq!(
        parts[2]["someValuesFrom"]["unionOf"][0]["unionOf"][0],
        json!({"@id": "urn:x#_phyloref1_specifier3"})
    );
    assert_eq!(phyloref["hasAdditionalClass"], json!([]));
}

#[test]
fn test_malformed_phylorefs() {
    let specifier = json!({"scientificName": "Anas"});
    let doc = json!({
        "@id": "urn:x",
        "phylorefs": [
            {},
            {"externalSpecifiers": [specifier]},
            {"internalSpecifiers": [specifier, specifier], "externalSpecifiers": [specifier, specifier]},
            {"internalSpecifiers": [specifier]}
        ]
    });
    let suite = PhyloreferenceTestSuite::load_from_document(&doc, &TreeLoader::new()).unwrap();
    let exported = suite.export_to_jsonld_document();
    let phylorefs = exported["phylorefs"].as_array().unwrap();

    let reasons: Vec<&str> = phylorefs
        .iter()
        .map(|p| p["malformedPhyloreference"].as_str().unwrap())
        .collect();
    assert_eq!(
        reasons,
        vec![
            "No specifiers provided",
            "No internal specifiers provided",
            "More than one external specifier provided",
            "Single internal specifier provided"
        ]
    );

    // Without specifiers the phyloreference matches every node
    assert_eq!(phylorefs[0]["equivalentClass"], json!({"@type": owlterms::CDAO_NODE}));
    for phyloref in &phylorefs[1..] {
        assert!(phyloref.get("equivalentClass").is_none());
    }
}

#[test]
fn test_invalid_specifiers() {
    let loader = TreeLoader::new();
    for phyloref in [json!({"internalSpecifiers": "Anas"}), json!({"externalSpecifiers": ["Anas"]})] {
        let doc = json!({"@id": "urn:x", "phylorefs": [phyloref]});
        assert!(matches!(
            PhyloreferenceTestSuite::load_from_document(&doc, &loader),
            Err(LoadError::InvalidInput { .. })
        ));
    }
}

#[test]
fn test_minimal_suite_omits_empty_lists() {
    let doc = json!({"@id": "http://example.org/empty/"});
    let suite = PhyloreferenceTestSuite::load_from_document(&doc, &TreeLoader::new()).unwrap();
    let exported = suite.export_to_jsonld_document();

    assert_eq!(exported["@id"], json!("http://example.org/empty/"));
    assert!(exported.get("phylogenies").is_none());
    assert!(exported.get("phylorefs").is_none());
    assert!(exported.get("citation").is_none());
}

#[test]
fn test_missing_document_id() {
    let loader = TreeLoader::new();
    for doc in [json!({}), json!({"@id": ""}), json!({"@id": 42})] {
        assert!(matches!(
            PhyloreferenceTestSuite::load_from_document(&doc, &loader),
            Err(LoadError::MissingDocumentId)
        ));
    }
}

#[test]
fn test_group_errors_propagate() {
    let doc = json!({
        "@id": "s",
        "phylogenies": [{"newick": "(A,B);", "labeledNodeData": [{"label": "A"}, {"label": "A"}]}]
    });
    let err = PhyloreferenceTestSuite::load_from_document(&doc, &TreeLoader::new()).unwrap_err();

    assert!(matches!(&err, LoadError::DuplicateLabel { group_id, .. } if group_id == "s#phylogenies1"));
}
