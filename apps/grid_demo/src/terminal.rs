//! Plain-text rendering of the card grid.

use std::fmt::Write as _;

use card_grid::{
    dispatch::{ElementArena, ElementTree, NodeId},
    render::Renderer,
};
use shared::domain::{NormalizedEntity, StatKey};
use tracing::info;

#[derive(Debug, Clone)]
struct CardView {
    index: usize,
    label: NodeId,
    back: Option<Vec<String>>,
    revealed: bool,
}

pub struct TerminalRenderer {
    arena: ElementArena,
    container: NodeId,
    cards: Vec<CardView>,
    loading_visible: bool,
    grid_visible: bool,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        let mut arena = ElementArena::new();
        let container = arena.push(None, None);
        Self {
            arena,
            container,
            cards: Vec::new(),
            loading_visible: false,
            grid_visible: false,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// Innermost element of a card, the usual click target.
    pub fn label_node(&self, index: usize) -> Option<NodeId> {
        self.cards
            .iter()
            .find(|card| card.index == index)
            .map(|card| card.label)
    }

    pub fn is_loading_visible(&self) -> bool {
        self.loading_visible
    }

    pub fn is_grid_visible(&self) -> bool {
        self.grid_visible
    }

    pub fn render(&self) -> String {
        if !self.grid_visible {
            return if self.loading_visible {
                "loading...\n".to_string()
            } else {
                String::new()
            };
        }

        let mut out = String::new();
        for card in &self.cards {
            let _ = write!(out, "[#{:>2}] ", card.index + 1);
            if !card.revealed {
                out.push_str("?\n");
                continue;
            }
            match &card.back {
                Some(lines) => {
                    let _ = writeln!(out, "{}", lines.join(" | "));
                }
                None => out.push_str("no data\n"),
            }
        }
        out
    }
}

fn back_face(entity: &NormalizedEntity) -> Vec<String> {
    let stats = StatKey::ALL
        .iter()
        .map(|key| format!("{} {}", key.api_name(), entity.stats.get(*key)))
        .collect::<Vec<_>>()
        .join(", ");

    let mut lines = vec![
        format!("{} (#{})", entity.name, entity.id.0),
        entity.types.join("/"),
        format!("{:.1} m, {:.1} kg", entity.height, entity.weight),
        entity.abilities.join(", "),
        stats,
    ];
    if !entity.sprite_url.is_empty() {
        lines.push(entity.sprite_url.clone());
    }
    lines
}

impl Renderer for TerminalRenderer {
    type Handle = usize;

    fn create_placeholder(&mut self, index: usize) -> Option<usize> {
        let boundary = self.arena.push(Some(self.container), Some(index));
        let face = self.arena.push(Some(boundary), None);
        let label = self.arena.push(Some(face), None);
        self.cards.push(CardView {
            index,
            label,
            back: None,
            revealed: false,
        });
        Some(self.cards.len() - 1)
    }

    fn render_bound(&mut self, handle: &usize, entity: &NormalizedEntity) {
        if let Some(card) = self.cards.get_mut(*handle) {
            card.back = Some(back_face(entity));
        }
    }

    fn set_revealed_visual(&mut self, handle: &usize, revealed: bool) {
        if let Some(card) = self.cards.get_mut(*handle) {
            card.revealed = revealed;
        }
    }

    fn set_loading_visible(&mut self, visible: bool) {
        if visible && !self.loading_visible {
            info!("loading cards...");
        }
        self.loading_visible = visible;
    }

    fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
    }

    fn clear(&mut self) {
        self.arena.clear();
        self.container = self.arena.push(None, None);
        self.cards.clear();
    }
}

impl ElementTree for TerminalRenderer {
    type Node = NodeId;

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.parent(node)
    }

    fn card_index(&self, node: NodeId) -> Option<usize> {
        self.arena.card_index(node)
    }
}

#[cfg(test)]
#[path = "tests/terminal_tests.rs"]
mod tests;
