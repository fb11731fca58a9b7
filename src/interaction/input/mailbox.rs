use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputSource {
    #[default]
    Mouse,
    Touch,
}

/// Newest raw pointer position in window logical pixels (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PointerSample {
    /// Nothing sampled yet, the finger lifted, or the cursor left the window.
    #[default]
    Absent,
    Screen { position: Vec2, source: InputSource },
}

/// What an input listener observed; folded into the mailbox in arrival order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Moved { position: Vec2, source: InputSource },
    TouchLifted,
    CursorLeft,
}

/// Single-slot last-value-wins sample. Listeners overwrite it; the frame
/// tick only reads it. No queue: older samples are simply lost.
#[derive(Resource, Debug, Default, Clone)]
pub struct PointerMailbox {
    latest: PointerSample,
    last_source: InputSource,
}

impl PointerMailbox {
    pub fn post(&mut self, position: Vec2, source: InputSource) {
        self.latest = PointerSample::Screen { position, source };
        self.last_source = source;
    }

    /// Drop the sample so the proxy rests at the center. The last source is
    /// kept so touch devices keep their slower follow while returning.
    pub fn clear(&mut self) {
        self.latest = PointerSample::Absent;
    }

    pub fn apply(&mut self, input: PointerInput) {
        match input {
            PointerInput::Moved { position, source } => self.post(position, source),
            PointerInput::TouchLifted | PointerInput::CursorLeft => self.clear(),
        }
    }

    pub fn latest(&self) -> PointerSample {
        self.latest
    }

    pub fn last_source(&self) -> InputSource {
        self.last_source
    }
}
