//! Delegated click resolution: one listener on the grid container, target
//! resolved by walking parent links up to the nearest card boundary.

pub const MAX_ANCESTOR_DEPTH: usize = 64;

pub trait ElementTree {
    type Node: Copy;

    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    /// Slot index when `node` is a card boundary.
    fn card_index(&self, node: Self::Node) -> Option<usize>;
}

pub fn find_card<T: ElementTree + ?Sized>(tree: &T, target: T::Node) -> Option<usize> {
    let mut current = Some(target);
    for _ in 0..MAX_ANCESTOR_DEPTH {
        let node = current?;
        if let Some(index) = tree.card_index(node) {
            return Some(index);
        }
        current = tree.parent(node);
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct ArenaNode {
    parent: Option<NodeId>,
    card_index: Option<usize>,
}

/// Parent-linked element store a renderer can embed to answer click lookups.
#[derive(Debug, Clone, Default)]
pub struct ElementArena {
    nodes: Vec<ArenaNode>,
}

impl ElementArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, parent: Option<NodeId>, card_index: Option<usize>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ArenaNode { parent, card_index });
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl ElementTree for ElementArena {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|node| node.parent)
    }

    fn card_index(&self, node: NodeId) -> Option<usize> {
        self.nodes.get(node.0).and_then(|node| node.card_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_card_from_nested_target() {
        let mut arena = ElementArena::new();
        let grid = arena.push(None, None);
        let card = arena.push(Some(grid), Some(3));
        let face = arena.push(Some(card), None);
        let label = arena.push(Some(face), None);

        assert_eq!(find_card(&arena, label), Some(3));
        assert_eq!(find_card(&arena, card), Some(3));
    }

    #[test]
    fn click_outside_any_card_is_ignored() {
        let mut arena = ElementArena::new();
        let grid = arena.push(None, None);
        let _card = arena.push(Some(grid), Some(0));
        let gap = arena.push(Some(grid), None);

        assert_eq!(find_card(&arena, grid), None);
        assert_eq!(find_card(&arena, gap), None);
    }

    #[test]
    fn walk_stops_at_depth_cap() {
        let mut arena = ElementArena::new();
        let mut node = arena.push(None, Some(0));
        for _ in 0..MAX_ANCESTOR_DEPTH {
            node = arena.push(Some(node), None);
        }

        assert_eq!(find_card(&arena, node), None);
    }

    #[test]
    fn unknown_node_resolves_to_nothing() {
        let arena = ElementArena::new();
        assert_eq!(find_card(&arena, NodeId(7)), None);
    }
}
