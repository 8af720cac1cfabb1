use super::{Node, Tree, TreePayload};

/// Containers before leaves, then plain byte-wise name order.
pub fn containers_first<T: TreePayload>(a: &Node<T>, b: &Node<T>) -> bool {
    let a_container = a.payload.is_container();
    let b_container = b.payload.is_container();
    if a_container != b_container {
        return a_container;
    }
    a.name < b.name
}

/// Apply [`containers_first`] to every sibling list in `tree`.
pub fn sort_tree<T: TreePayload>(tree: &mut Tree<T>) {
    tree.sort_by(containers_first);
}
