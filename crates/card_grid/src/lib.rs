//! Card Controller: owns the slot grid, binds a fetched batch to it and
//! flips cards in response to delegated clicks.

use std::time::Duration;

use entity_client::BatchSource;
use shared::domain::NormalizedEntity;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod dispatch;
pub mod render;

use dispatch::{find_card, ElementTree};
use render::Renderer;

pub const DEFAULT_GRID_SIZE: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridPhase {
    Empty,
    Loading,
    Populated,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("entities can only be loaded while the grid is loading (current phase: {phase:?})")]
    NotLoading { phase: GridPhase },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub bound: usize,
    pub unbound: usize,
}

#[derive(Debug)]
pub struct CardSlot<H> {
    index: usize,
    bound_entity: Option<NormalizedEntity>,
    revealed: bool,
    handle: Option<H>,
}

impl<H> CardSlot<H> {
    fn new(index: usize, handle: Option<H>) -> Self {
        Self {
            index,
            bound_entity: None,
            revealed: false,
            handle,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn bound_entity(&self) -> Option<&NormalizedEntity> {
        self.bound_entity.as_ref()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn handle(&self) -> Option<&H> {
        self.handle.as_ref()
    }
}

pub struct CardController<R: Renderer> {
    renderer: R,
    slots: Vec<CardSlot<R::Handle>>,
    phase: GridPhase,
    simulated_delay: Duration,
}

impl<R: Renderer> CardController<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            slots: Vec::new(),
            phase: GridPhase::Empty,
            simulated_delay: Duration::ZERO,
        }
    }

    /// Extra pause between batch settlement and binding, for exercising the
    /// loading state. Never changes what gets bound.
    pub fn with_simulated_delay(mut self, delay: Duration) -> Self {
        self.simulated_delay = delay;
        self
    }

    pub fn phase(&self) -> GridPhase {
        self.phase
    }

    pub fn slots(&self) -> &[CardSlot<R::Handle>] {
        &self.slots
    }

    pub fn slot(&self, index: usize) -> Option<&CardSlot<R::Handle>> {
        self.slots.get(index)
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Creates `grid_size` fresh slots and enters the loading phase. Calling it
    /// again discards the previous grid wholesale.
    pub fn initialize(&mut self, grid_size: usize) {
        if self.phase != GridPhase::Empty {
            info!(
                previous_slots = self.slots.len(),
                "grid: reinitializing, previous slots discarded"
            );
            self.renderer.clear();
        }

        self.slots = (0..grid_size)
            .map(|index| {
                let handle = self.renderer.create_placeholder(index);
                if handle.is_none() {
                    warn!(index, "grid: renderer produced no placeholder for slot");
                }
                CardSlot::new(index, handle)
            })
            .collect();

        self.renderer.set_grid_visible(false);
        self.renderer.set_loading_visible(true);
        self.phase = GridPhase::Loading;
        debug!(grid_size, "grid: initialized");
    }

    /// Fetches one entity per slot and binds them by position. Empty results
    /// leave their slot unbound; the grid is populated either way.
    pub async fn load_entities(
        &mut self,
        source: &dyn BatchSource,
    ) -> Result<LoadSummary, GridError> {
        if self.phase != GridPhase::Loading {
            return Err(GridError::NotLoading { phase: self.phase });
        }

        let requested = self.slots.len();
        let results = source.load_batch(requested).await;
        if results.len() != requested {
            warn!(
                requested,
                received = results.len(),
                "grid: batch length mismatch, extra slots stay unbound"
            );
        }

        if !self.simulated_delay.is_zero() {
            debug!(
                delay_ms = self.simulated_delay.as_millis() as u64,
                "grid: simulated delay before binding"
            );
            tokio::time::sleep(self.simulated_delay).await;
        }

        let mut summary = LoadSummary::default();
        let mut results = results.into_iter();
        for slot in &mut self.slots {
            match results.next().flatten() {
                Some(entity) => {
                    if let Some(handle) = &slot.handle {
                        self.renderer.render_bound(handle, &entity);
                    }
                    slot.bound_entity = Some(entity);
                    summary.bound += 1;
                }
                None => summary.unbound += 1,
            }
        }

        self.renderer.set_loading_visible(false);
        self.renderer.set_grid_visible(true);
        self.phase = GridPhase::Populated;
        info!(
            bound = summary.bound,
            unbound = summary.unbound,
            "grid: populated"
        );
        Ok(summary)
    }

    /// Flips the slot's revealed flag and returns the new value; `None` when
    /// the index is out of range or the slot has no visual.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let Some(slot) = self.slots.get_mut(index) else {
            debug!(index, "grid: toggle ignored, no such slot");
            return None;
        };
        let Some(handle) = &slot.handle else {
            debug!(index, "grid: toggle ignored, slot has no visual");
            return None;
        };

        slot.revealed = !slot.revealed;
        self.renderer.set_revealed_visual(handle, slot.revealed);
        Some(slot.revealed)
    }
}

impl<R: Renderer + ElementTree> CardController<R> {
    /// Single grid-level click entry point.
    pub fn dispatch_click(&mut self, target: <R as ElementTree>::Node) -> Option<bool> {
        let index = find_card(&self.renderer, target)?;
        self.toggle(index)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
