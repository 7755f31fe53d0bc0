//! Asynchronous texture loads tagged with a context generation.
//!
//! Every context loss bumps the generation; completions carrying an older
//! generation belong to a dead context and are ignored.

use std::collections::HashSet;

use super::draw::TextureSlot;

/// A texture the host should fetch and upload, then acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRequest {
    pub slot: TextureSlot,
    pub url: String,
    pub generation: u32,
}

#[derive(Debug, Default)]
pub struct TextureTracker {
    generation: u32,
    in_flight: HashSet<TextureSlot>,
    loaded: HashSet<TextureSlot>,
}

impl TextureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Start a load for `slot` in the current generation.
    pub fn request(&mut self, slot: TextureSlot, url: &str) -> TextureRequest {
        self.loaded.remove(&slot);
        self.in_flight.insert(slot);
        TextureRequest {
            slot,
            url: url.to_owned(),
            generation: self.generation,
        }
    }

    /// Record a finished load. Returns `false` if it was stale or unexpected.
    pub fn complete(&mut self, slot: TextureSlot, generation: u32) -> bool {
        if generation != self.generation || !self.in_flight.remove(&slot) {
            log::debug!(
                "ignoring texture completion for {:?} (generation {}, current {})",
                slot,
                generation,
                self.generation
            );
            return false;
        }
        self.loaded.insert(slot);
        true
    }

    /// Whether `slot` holds real image data. The white texture is always ready.
    pub fn is_loaded(&self, slot: TextureSlot) -> bool {
        slot == TextureSlot::White || self.loaded.contains(&slot)
    }

    /// The slot to bind for `slot`, falling back to white until it is loaded.
    pub fn resolve(&self, slot: TextureSlot) -> TextureSlot {
        if self.is_loaded(slot) {
            slot
        } else {
            TextureSlot::White
        }
    }

    /// Forget everything and move to a new generation (context loss).
    pub fn invalidate(&mut self) {
        if !self.in_flight.is_empty() {
            log::info!("discarding {} in-flight texture load(s)", self.in_flight.len());
        }
        self.in_flight.clear();
        self.loaded.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}
