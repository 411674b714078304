/// Input event types the engine understands.
/// Pointer coordinates are CSS pixels relative to the canvas; games convert
/// them with `EngineContext::to_ndc`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// A button was pressed at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y), pressed or not.
    PointerMove { x: f32, y: f32 },
    /// A button was released at (x, y).
    PointerUp { x: f32, y: f32 },
    /// The browser's `click`, delivered after `PointerUp`.
    Click { x: f32, y: f32 },
    /// Scroll wheel; positive `delta` zooms out.
    Wheel { delta: f32 },
    /// Host wall clock, sent once at startup.
    WallClock { utc_hours: f32 },
    /// A custom event from the UI layer (toggles, buttons).
    /// `kind` identifies the event type; `a`, `b`, `c` carry arbitrary data.
    Custom { kind: u32, a: f32, b: f32, c: f32 },
}

/// A queue of input events.
/// JS pushes events as they arrive; the runner hands the batch to the game
/// on the next simulated frame.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Move all pending events into a fresh queue, leaving this one empty.
    pub fn take(&mut self) -> InputQueue {
        InputQueue {
            events: std::mem::take(&mut self.events),
        }
    }

    /// Iterate over pending events in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl FromIterator<InputEvent> for InputQueue {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_empties_the_source() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 10.0, y: 20.0 });
        q.push(InputEvent::Click { x: 10.0, y: 20.0 });
        let batch = q.take();
        assert_eq!(batch.len(), 2);
        assert!(q.is_empty());
    }

    #[test]
    fn preserves_arrival_order() {
        let q: InputQueue = [
            InputEvent::PointerUp { x: 1.0, y: 1.0 },
            InputEvent::Click { x: 1.0, y: 1.0 },
        ]
        .into_iter()
        .collect();
        let kinds: Vec<_> = q.iter().collect();
        assert!(matches!(kinds[0], InputEvent::PointerUp { .. }));
        assert!(matches!(kinds[1], InputEvent::Click { .. }));
    }
}
