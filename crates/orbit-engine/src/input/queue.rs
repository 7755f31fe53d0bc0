/// Modifier keys held during a pointer or wheel event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self { shift: false, alt: false };
    pub const SHIFT: Self = Self { shift: true, alt: false };
    pub const ALT: Self = Self { shift: false, alt: true };
}

/// Input event types the engine understands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A mouse button was pressed at client coordinates (x, y).
    PointerDown { x: f32, y: f32 },
    /// A mouse button was released.
    PointerUp,
    /// The cursor moved to client coordinates (x, y).
    PointerMove { x: f32, y: f32, modifiers: Modifiers },
    /// A wheel/scroll step. `delta` is the signed detail (positive = toward the user).
    Wheel { delta: f32, modifiers: Modifiers },
    /// A key was pressed (DOM `keyCode`).
    KeyDown { key_code: u32 },
    /// A key was released.
    KeyUp { key_code: u32 },
}

impl InputEvent {
    /// Motion events can be dropped under pressure without leaving stale state behind.
    fn is_motion(&self) -> bool {
        matches!(self, Self::PointerMove { .. } | Self::Wheel { .. })
    }

    fn key_code(&self) -> Option<u32> {
        match self {
            Self::KeyDown { key_code } | Self::KeyUp { key_code } => Some(*key_code),
            _ => None,
        }
    }

    fn is_press(&self) -> bool {
        matches!(self, Self::KeyDown { .. } | Self::PointerDown { .. })
    }

    /// Losing a release leaves a key or drag stuck; losing a press does not.
    fn is_release(&self) -> bool {
        matches!(self, Self::KeyUp { .. } | Self::PointerUp)
    }
}

/// A bounded queue of input events.
/// JS writes events into the queue between frames; the frame driver drains it once per tick.
///
/// Key edges are coalesced: an edge matching the newest queued edge for the same
/// key (browser auto-repeat) is absorbed. When full, room is made by discarding,
/// in order, the oldest motion event, an older edge for the same key, or (for a
/// release) the oldest press. Only the last edge per key decides whether it is
/// held after a drain, so none of these change the resulting key state.
pub struct InputQueue {
    events: Vec<InputEvent>,
    capacity: usize,
    dropped: u32,
}

impl InputQueue {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            events: Vec::with_capacity(capacity.min(64)),
            capacity,
            dropped: 0,
        }
    }

    /// Push a new input event (called from JS via wasm-bindgen).
    /// Returns `false` if the event had to be discarded.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if let Some(code) = event.key_code() {
            let newest = self.events.iter().rev().find(|e| e.key_code() == Some(code));
            if newest == Some(&event) {
                return true;
            }
        }

        if self.events.len() >= self.capacity && !self.make_room(&event) {
            if event.is_release() {
                log::warn!("input queue full of releases, dropping {:?}", event);
            }
            self.note_drop();
            return false;
        }

        self.events.push(event);
        true
    }

    fn make_room(&mut self, incoming: &InputEvent) -> bool {
        let victim = self
            .events
            .iter()
            .position(InputEvent::is_motion)
            .or_else(|| {
                let code = incoming.key_code()?;
                self.events.iter().position(|e| e.key_code() == Some(code))
            })
            .or_else(|| {
                if incoming.is_release() {
                    self.events.iter().position(InputEvent::is_press)
                } else {
                    None
                }
            });

        match victim {
            Some(idx) => {
                self.events.remove(idx);
                self.note_drop();
                true
            }
            None => false,
        }
    }

    fn note_drop(&mut self) {
        self.dropped += 1;
        if self.dropped == 1 {
            log::warn!("input queue over capacity ({}), discarding events", self.capacity);
        }
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        if self.dropped > 0 {
            log::debug!("{} input event(s) dropped since last frame", self.dropped);
            self.dropped = 0;
        }
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Discard everything pending.
    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_drain() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::KeyDown { key_code: 37 });
        assert_eq!(q.len(), 2);
        let events = q.drain();
        assert_eq!(events.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn overflow_displaces_oldest_motion() {
        let mut q = InputQueue::with_capacity(3);
        q.push(InputEvent::KeyDown { key_code: 37 });
        q.push(InputEvent::PointerMove { x: 1.0, y: 1.0, modifiers: Modifiers::NONE });
        q.push(InputEvent::PointerMove { x: 2.0, y: 2.0, modifiers: Modifiers::NONE });
        assert!(q.push(InputEvent::KeyUp { key_code: 37 }));

        let events = q.drain();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown { key_code: 37 },
                InputEvent::PointerMove { x: 2.0, y: 2.0, modifiers: Modifiers::NONE },
                InputEvent::KeyUp { key_code: 37 },
            ]
        );
    }

    #[test]
    fn overflow_without_motion_rejects_incoming() {
        let mut q = InputQueue::with_capacity(2);
        q.push(InputEvent::KeyDown { key_code: 38 });
        q.push(InputEvent::KeyUp { key_code: 38 });
        assert!(!q.push(InputEvent::Wheel { delta: 3.0, modifiers: Modifiers::NONE }));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut q = InputQueue::with_capacity(0);
        assert_eq!(q.capacity(), 1);
        assert!(q.push(InputEvent::PointerUp));
    }

    #[test]
    fn auto_repeat_is_coalesced() {
        let mut q = InputQueue::with_capacity(4);
        for _ in 0..10 {
            assert!(q.push(InputEvent::KeyDown { key_code: 38 }));
        }
        assert_eq!(q.len(), 1);

        q.push(InputEvent::KeyUp { key_code: 38 });
        q.push(InputEvent::KeyDown { key_code: 38 });
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn full_queue_keeps_latest_edge_for_key() {
        let mut q = InputQueue::with_capacity(4);
        q.push(InputEvent::KeyDown { key_code: 38 });
        q.push(InputEvent::KeyUp { key_code: 38 });
        q.push(InputEvent::KeyDown { key_code: 38 });
        q.push(InputEvent::KeyDown { key_code: 37 });
        assert!(q.push(InputEvent::KeyUp { key_code: 37 }));

        assert_eq!(
            q.drain(),
            vec![
                InputEvent::KeyDown { key_code: 38 },
                InputEvent::KeyUp { key_code: 38 },
                InputEvent::KeyDown { key_code: 38 },
                InputEvent::KeyUp { key_code: 37 },
            ]
        );
    }

    #[test]
    fn release_displaces_oldest_press_of_another_key() {
        let mut q = InputQueue::with_capacity(2);
        q.push(InputEvent::KeyDown { key_code: 1 });
        q.push(InputEvent::KeyDown { key_code: 2 });
        // a press has nothing to displace
        assert!(!q.push(InputEvent::KeyDown { key_code: 37 }));
        assert!(q.push(InputEvent::PointerUp));
        assert_eq!(q.drain(), vec![InputEvent::KeyDown { key_code: 2 }, InputEvent::PointerUp]);
    }
}
