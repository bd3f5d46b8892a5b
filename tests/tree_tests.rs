use phylogroup::model::{Annotation, BranchLength, PhyloTree, Taxon};

// ((A:0.2,B:0.3)AB:0.4,C:0.5)
fn build_tree() -> PhyloTree {
    let mut tree = PhyloTree::new();
    let a = tree.add_leaf(Taxon::new("A"), BranchLength::new(0.2));
    let b = tree.add_leaf(Taxon::new("B"), BranchLength::new(0.3));
    let ab = tree.add_internal(vec![a, b], Some("AB".to_string()), BranchLength::new(0.4));
    let c = tree.add_leaf(Taxon::new("C"), BranchLength::new(0.5));
    let root = tree.add_internal(vec![ab, c], None, None);
    tree.set_root(root);
    tree
}

#[test]
fn test_counts_and_validity() {
    let tree = build_tree();
    assert!(tree.is_valid());
    assert_eq!(tree.num_vertices(), 5);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
}

#[test]
fn test_pre_order_follows_child_order() {
    let tree = build_tree();
    let labels: Vec<Option<&str>> = tree
        .pre_order()
        .into_iter()
        .map(|i| tree[i].display_label())
        .collect();
    assert_eq!(labels, vec![None, Some("AB"), Some("A"), Some("B"), Some("C")]);
}

#[test]
fn test_attach_builds_tree_top_down() {
    let mut tree = PhyloTree::with_capacity(3);
    let root = tree.add_vertex(Some("root".to_string()), None);
    let x = tree.add_vertex(None, Some(Taxon::new("X")));
    let y = tree.add_vertex(Some("Y".to_string()), Some(Taxon::new("Y")));
    tree.attach(root, x);
    tree.attach(root, y);
    tree.set_root(root);

    assert!(tree.is_valid());
    assert_eq!(tree.siblings(x), vec![y]);
    assert_eq!(tree[y].display_label(), Some("Y"));
    assert_eq!(tree[root].display_label(), Some("root"));
}

#[test]
fn test_vertex_with_taxon_and_label() {
    let mut tree = PhyloTree::new();
    let v = tree.add_vertex(Some("Rallus".to_string()), Some(Taxon::new("Rallus aquaticus")));
    tree.vertex_mut(v).add_annotation(Annotation::new("support", 0.9));
    tree.set_root(v);

    let vertex = tree.root().unwrap();
    assert!(vertex.is_leaf());
    assert!(vertex.is_root());
    // The taxon label takes precedence over the node label
    assert_eq!(vertex.display_label(), Some("Rallus aquaticus"));
    assert_eq!(vertex.label(), Some("Rallus"));
    assert_eq!(vertex.annotations()[0].value().to_string(), "0.9");
}

#[test]
fn test_branch_length_must_be_finite() {
    assert!(BranchLength::new(f64::NAN).is_none());
    assert!(BranchLength::new(f64::INFINITY).is_none());
    assert_eq!(BranchLength::new(-1.5).map(|b| *b), Some(-1.5));
}
