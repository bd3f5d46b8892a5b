use phylogroup::error::{LoadError, TreeFormat};
use phylogroup::owlterms;
use phylogroup::phyloref::{PhylogenyGroup, TreeLoader};
use serde_json::{Value, json};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

const RAILS: &str = "((Rallus_aquaticus,Crex_crex)Rallinae,Gallinula_chloropus);";

const RAILS_NEXML: &str = r#"<nexml xmlns="http://www.nexml.org/2009">
  <otus id="taxa">
    <otu id="t1" label="Rallus aquaticus">
      <meta property="skos:closeMatch" content="Rallus aquaticus Linnaeus, 1758"/>
    </otu>
    <otu id="t2" label="Crex crex"/>
  </otus>
  <trees otus="taxa">
    <tree id="tree1">
      <meta property="dc:description" content="Rails"/>
      <node id="n1" root="true"/>
      <node id="n2" otu="t1" label="Rallus"/>
      <node id="n3" otu="t2"/>
      <edge id="e1" source="n1" target="n2"/>
      <edge id="e2" source="n1" target="n3"/>
    </tree>
  </trees>
</nexml>"#;

fn write_nexml(dir: &TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    fs::write(&path, RAILS_NEXML).unwrap();
    path.to_string_lossy().into_owned()
}

fn nodes(doc: &Value, phylogeny: usize) -> &Vec<Value> {
    doc["phylogenies"][phylogeny]["nodes"].as_array().unwrap()
}

// --- TESTS LOADING ---
#[test]
fn test_phylogeny_ids_in_parse_order() {
    let json = json!({"newick": "(A,B);(C,D);\n(E,(F,G));"});
    let group = PhylogenyGroup::load_from_json("group", &json).unwrap();

    assert_eq!(group.len(), 3);
    let ids: Vec<&str> = group.phylogenies().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["group_phylogeny1", "group_phylogeny2", "group_phylogeny3"]);
    assert_eq!(group.phylogenies()[2].tree().num_leaves(), 3);
}

#[test]
fn test_labeled_data_maps_labels_to_entries() {
    let json = json!({
        "newick": RAILS,
        "labeledNodeData": [
            {"label": ["Rallus aquaticus", "Rallinae"], "specimen": "A1"},
            {"label": "Crex crex", "specimen": "B1"},
            {"specimen": "unlabeled"},
            "not an object"
        ]
    });
    let group = PhylogenyGroup::load_from_json("g", &json).unwrap();
    let data = group.labeled_data();

    assert_eq!(data.len(), 3);
    assert_eq!(data.get("Crex crex").unwrap()["specimen"], json!("B1"));
    assert_eq!(data.get("Rallinae").unwrap()["specimen"], json!("A1"));

    // All phylogenies share the group's label map
    for phylogeny in group.phylogenies() {
        assert!(Arc::ptr_eq(phylogeny.labeled_data(), data));
    }
}

#[test]
fn test_multiple_labels_share_entry() {
    let json = json!({"newick": RAILS, "labeledNodeData": [{"label": ["x", "y"], "note": 1}]});
    let group = PhylogenyGroup::load_from_json("g", &json).unwrap();
    let data = group.labeled_data();

    assert!(Arc::ptr_eq(data.get("x").unwrap(), data.get("y").unwrap()));
}

#[test]
fn test_duplicate_label() {
    let json = json!({
        "newick": RAILS,
        "labeledNodeData": [{"label": "A", "n": 1}, {"label": ["B", "A"], "n": 2}]
    });
    let err = PhylogenyGroup::load_from_json("g", &json).unwrap_err();

    assert!(matches!(&err, LoadError::DuplicateLabel { label, group_id } if label == "A" && group_id == "g"));
    assert!(err.to_string().contains("'A'"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing.nexml");
    let json = json!({"filename": path.to_string_lossy(), "newick": RAILS});
    let err = PhylogenyGroup::load_from_json("paper#phylogenies1", &json).unwrap_err();

    assert!(matches!(&err, LoadError::MissingFile { path: p, .. } if *p == path));
    let message = err.to_string();
    assert!(message.contains("paper#phylogenies1"));
    assert!(message.contains("missing.nexml"));
}

#[test]
fn test_malformed_newick() {
    let json = json!({"newick": "((A,B);"});
    let err = PhylogenyGroup::load_from_json("g", &json).unwrap_err();

    assert!(matches!(&err, LoadError::Parse { format: TreeFormat::Newick, group_id, .. } if group_id == "g"));
    assert!(
        err.to_string()
            .starts_with("Could not parse Newick while reading phylogeny g: Invalid newick string")
    );
}

#[test]
fn test_malformed_nexml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.xml");
    fs::write(&path, "<nexml><trees>").unwrap();
    let json = json!({"filename": path.to_string_lossy()});
    let err = PhylogenyGroup::load_from_json("g", &json).unwrap_err();

    assert!(matches!(err, LoadError::Parse { format: TreeFormat::NeXml, .. }));
}

#[test]
fn test_no_tree_source() {
    let json = json!({"labeledNodeData": [{"label": "A"}]});
    let group = PhylogenyGroup::load_from_json("g", &json).unwrap();

    assert!(group.is_empty());
    assert_eq!(group.labeled_data().len(), 1);
}

#[test]
fn test_invalid_input() {
    assert!(matches!(
        PhylogenyGroup::load_from_json("g", &json!(["newick"])),
        Err(LoadError::InvalidInput { .. })
    ));
    assert!(matches!(
        PhylogenyGroup::load_from_json("g", &json!({"newick": RAILS, "labeledNodeData": {"label": "A"}})),
        Err(LoadError::InvalidInput { .. })
    ));
    assert!(matches!(
        PhylogenyGroup::load_from_json("g", &json!({"newick": RAILS, "labeledNodeData": [{"label": 7}]})),
        Err(LoadError::InvalidInput { .. })
    ));
}

#[test]
fn test_relative_filename_uses_base_dir() {
    let dir = TempDir::new().unwrap();
    write_nexml(&dir, "rails.xml");
    let loader = TreeLoader::new().with_base_dir(dir.path());

    let group = PhylogenyGroup::load_with_loader("g", &json!({"filename": "rails.xml"}), &loader).unwrap();
    assert_eq!(group.len(), 1);
}

// --- TESTS EXPORT ---
#[test]
fn test_export_group() {
    let json = json!({"newick": "(A,B);(C,D);"});
    let group = PhylogenyGroup::load_from_json("paper#phylogenies1", &json).unwrap();
    let doc = group.export_to_jsonld_document();

    assert_eq!(doc["@id"], json!("paper#phylogenies1"));
    assert_eq!(doc["@type"], json!(owlterms::PHYLOREFERENCE_TEST_PHYLOGENY_GROUP));
    assert_eq!(doc["phylogenies"].as_array().unwrap().len(), group.len());
    assert_eq!(doc["phylogenies"][1]["@id"], json!("paper#phylogenies1_phylogeny2"));
    assert_eq!(doc["phylogenies"][1]["newick"], json!("(C,D);"));
}

#[test]
fn test_export_nodes() {
    let json = json!({
        "newick": RAILS,
        "labeledNodeData": [
            {"label": "Rallinae", "@id": "#ignored", "expected": "rails"},
            {"label": "Crex crex", "specimen": "B1"}
        ]
    });
    let group = PhylogenyGroup::load_from_json("g", &json).unwrap();
    let doc = group.export_to_jsonld_document();
    let nodes = nodes(&doc, 0);

    assert_eq!(nodes.len(), 5);
    // Nodes are listed in pre-order; a node numbers its children when it is listed
    let ids: Vec<&str> = nodes.iter().map(|n| n["@id"].as_str().unwrap()).collect();
    assert_eq!(
        ids,
        vec!["g_phylogeny1_node0", "g_phylogeny1_node1", "g_phylogeny1_node3", "g_phylogeny1_node4", "g_phylogeny1_node2"]
    );

    let root = &nodes[0];
    assert_eq!(root["@type"], json!(owlterms::CDAO_NODE));
    assert_eq!(root["inPhylogeny"], json!("g_phylogeny1"));
    assert!(root.get("labels").is_none());
    assert_eq!(root["taxa"], json!([]));
    assert_eq!(root["children"], json!(["g_phylogeny1_node1", "g_phylogeny1_node2"]));
    assert_eq!(root["siblings"], json!([]));

    let rallinae = &nodes[1];
    assert_eq!(rallinae["labels"], json!(["Rallinae"]));
    assert_eq!(rallinae["expected"], json!("rails"));
    assert_eq!(rallinae["@id"], json!("g_phylogeny1_node1"));
    assert!(rallinae.get("label").is_none());
    assert_eq!(rallinae["children"], json!(["g_phylogeny1_node3", "g_phylogeny1_node4"]));
    assert_eq!(rallinae["siblings"], json!(["g_phylogeny1_node2"]));

    let crex = &nodes[3];
    assert_eq!(crex["@id"], json!("g_phylogeny1_node4"));
    assert_eq!(crex["specimen"], json!("B1"));
    assert_eq!(crex["taxa"][0]["@id"], json!("g_phylogeny1_node4_tunit1"));
    assert_eq!(crex["taxa"][0]["scientific_names"][0]["binomial_name"], json!("Crex crex"));
}

#[test]
fn test_children_numbered_before_descending() {
    let group = PhylogenyGroup::load_from_json("g", &json!({"newick": "((A,B),C);"})).unwrap();
    let phylogeny = &group.phylogenies()[0];
    let tree = phylogeny.tree();

    let id_of = |label: &str| {
        let index = tree
            .pre_order()
            .into_iter()
            .find(|&i| tree[i].display_label() == Some(label))
            .unwrap();
        phylogeny.node_id(index).unwrap()
    };
    let root = tree.root_index().unwrap();
    let ab = tree[root].children()[0];

    assert_eq!(phylogeny.node_id(root), Some("g_phylogeny1_node0"));
    assert_eq!(phylogeny.node_id(ab), Some("g_phylogeny1_node1"));
    assert_eq!(id_of("C"), "g_phylogeny1_node2");
    assert_eq!(id_of("A"), "g_phylogeny1_node3");
    assert_eq!(id_of("B"), "g_phylogeny1_node4");

    let doc = group.export_to_jsonld_document();
    assert_eq!(
        nodes(&doc, 0)[0]["children"],
        json!(["g_phylogeny1_node1", "g_phylogeny1_node2"])
    );
}

#[test]
fn test_export_nexml_merges_conflicting_data() {
    let dir = TempDir::new().unwrap();
    let path = write_nexml(&dir, "rails.xml");
    let json = json!({
        "filename": path,
        "labeledNodeData": [
            {"label": "Rallus aquaticus", "specimen": "A", "siblings": ["g_phylogeny1_node2", "Crex"]},
            {"label": "Rallus", "specimen": "B"}
        ]
    });
    let group = PhylogenyGroup::load_from_json("g", &json).unwrap();
    let doc = group.export_to_jsonld_document();
    let rallus = &nodes(&doc, 0)[1];

    // The taxon label wins over the node label "Rallus"
    assert_eq!(rallus["labels"], json!(["Rallus aquaticus"]));
    assert_eq!(rallus["specimen"], json!("A"));
    assert_eq!(rallus["siblings"], json!(["g_phylogeny1_node2", "Crex"]));

    // One unit for the label plus one for the closeMatch annotation
    let taxa = rallus["taxa"].as_array().unwrap();
    assert_eq!(taxa.len(), 2);
    assert_eq!(taxa[1]["@id"], json!("g_phylogeny1_node1_tunit2"));
    assert_eq!(
        taxa[1]["scientific_names"][0]["scientific_name"],
        json!("Rallus aquaticus Linnaeus, 1758")
    );

    let annotations = doc["phylogenies"][0]["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0]["@type"], json!(owlterms::OA_ANNOTATION));
    assert_eq!(annotations[0]["annotationName"], json!("description"));
    assert_eq!(annotations[0]["annotationTarget"], json!("g_phylogeny1"));
    assert_eq!(annotations[0]["annotationBody"], json!("Rails"));
}

#[test]
fn test_export_newick_annotations() {
    let json = json!({"newick": "(A[&rank=species],B)[&support=0.9];"});
    let group = PhylogenyGroup::load_from_json("g", &json).unwrap();
    let doc = group.export_to_jsonld_document();
    let annotations = doc["phylogenies"][0]["annotations"].as_array().unwrap();

    assert_eq!(annotations.len(), 2);
    assert_eq!(annotations[0]["annotationName"], json!("support"));
    assert_eq!(annotations[0]["annotationTarget"], json!("g_phylogeny1_node0"));
    assert_eq!(annotations[0]["annotationBody"], json!("0.9"));
    assert_eq!(annotations[1]["annotationName"], json!("rank"));
    assert_eq!(annotations[1]["annotationTarget"], json!("g_phylogeny1_node1"));
    assert_eq!(annotations[1]["annotationBody"], json!("species"));
}

#[test]
fn test_newick_annotations_can_be_skipped() {
    let loader = TreeLoader::new().without_newick_annotations();
    let json = json!({"newick": "(A[&color=red],B);"});
    let group = PhylogenyGroup::load_with_loader("g", &json, &loader).unwrap();
    let doc = group.export_to_jsonld_document();

    assert_eq!(doc["phylogenies"][0]["annotations"], json!([]));
}
