//! Rendering collaborator seam.
//!
//! The controller never touches presentation; it only calls into this trait.

use shared::domain::NormalizedEntity;

pub trait Renderer {
    type Handle;

    /// `None` when the surface cannot host a card at `index`; the slot then
    /// has no rendering counterpart and ignores toggles.
    fn create_placeholder(&mut self, index: usize) -> Option<Self::Handle>;
    fn render_bound(&mut self, handle: &Self::Handle, entity: &NormalizedEntity);
    fn set_revealed_visual(&mut self, handle: &Self::Handle, revealed: bool);
    fn set_loading_visible(&mut self, visible: bool);
    fn set_grid_visible(&mut self, visible: bool);

    /// Drops every card visual before the grid is recreated.
    fn clear(&mut self) {}
}
