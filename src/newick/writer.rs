//! Newick format writing for [PhyloTree]s.

use crate::model::PhyloTree;
use crate::model::tree::VertexIndex;
use crate::parser::utils::escape_label;

/// Extra buffer per vertex in Newick string length/capacity estimate
const CHARS_PER_VERTEX: usize = 12;

/// Returns the Newick representation of this tree with closing semicolon.
///
/// Each vertex is written with its taxon label, or its node label if it has
/// no taxon, escaped if necessary, followed by its branch length if set.
/// Annotations are not written.
///
/// # Returns
/// A Newick format string terminated with `;`, or just `;` if the tree has no root.
///
/// # Example
/// ```
/// use phylogroup::model::{BranchLength, PhyloTree, Taxon};
/// use phylogroup::newick::to_newick;
///
/// let mut tree = PhyloTree::new();
/// let a = tree.add_leaf(Taxon::new("Rallus aquaticus"), BranchLength::new(1.0));
/// let b = tree.add_leaf(Taxon::new("Crex crex"), None);
/// let root = tree.add_internal(vec![a, b], Some("Rallidae".to_string()), None);
/// tree.set_root(root);
///
/// assert_eq!(to_newick(&tree), "(Rallus_aquaticus:1,Crex_crex)Rallidae;");
/// ```
pub fn to_newick(tree: &PhyloTree) -> String {
    let mut newick = String::with_capacity(tree.num_vertices() * CHARS_PER_VERTEX);
    let Some(root_index) = tree.root_index() else {
        newick.push(';');
        return newick;
    };

    let mut stack = vec![Step::Open(root_index)];
    while let Some(step) = stack.pop() {
        match step {
            Step::Open(index) => {
                let vertex = &tree[index];
                if vertex.is_leaf() {
                    write_label_and_length(tree, index, &mut newick);
                    continue;
                }
                newick.push('(');
                stack.push(Step::Close(index));
                for (i, &child) in vertex.children().iter().enumerate().rev() {
                    stack.push(Step::Open(child));
                    if i > 0 {
                        stack.push(Step::Comma);
                    }
                }
            }
            Step::Comma => newick.push(','),
            Step::Close(index) => {
                newick.push(')');
                write_label_and_length(tree, index, &mut newick);
            }
        }
    }

    newick.push(';');
    newick
}

/// Pending output while walking the tree without recursion.
enum Step {
    Open(VertexIndex),
    Comma,
    Close(VertexIndex),
}

fn write_label_and_length(tree: &PhyloTree, index: VertexIndex, out: &mut String) {
    let vertex = &tree[index];
    if let Some(label) = vertex.display_label() {
        out.push_str(&escape_label(label));
    }
    if let Some(branch_length) = vertex.branch_length() {
        out.push(':');
        out.push_str(&(*branch_length).to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Taxon;

    #[test]
    fn test_to_newick_quotes_special_labels() {
        let mut tree = PhyloTree::new();
        let a = tree.add_leaf(Taxon::new("Wilson's storm petrel"), None);
        let b = tree.add_leaf(Taxon::new("B"), None);
        let root = tree.add_internal(vec![a, b], None, None);
        tree.set_root(root);

        assert_eq!(to_newick(&tree), "('Wilson''s storm petrel',B);");
    }

    #[test]
    fn test_to_newick_deep_tree() {
        let mut tree = PhyloTree::new();
        let mut index = tree.add_leaf(Taxon::new("A"), None);
        for _ in 0..100_000 {
            index = tree.add_internal(vec![index], None, None);
        }
        tree.set_root(index);

        let newick = to_newick(&tree);
        assert!(newick.starts_with("(((("));
        assert!(newick.ends_with("A))));"));
        assert_eq!(newick.len(), 2 * 100_000 + 2);
    }

    #[test]
    fn test_to_newick_without_root() {
        assert_eq!(to_newick(&PhyloTree::new()), ";");
    }
}
