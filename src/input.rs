use winit::event::{ElementState, VirtualKeyCode};

/// Turns absolute cursor positions into per-event deltas.
///
/// The first sample after a reset only seeds the reference position, so
/// grabbing the cursor does not produce a jump.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CursorTracker {
    last: Option<(f64, f64)>,
}

impl CursorTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `(dx, dy)` with `dy` positive when the cursor moves up the screen.
    pub fn sample(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let delta = self
            .last
            .map(|(last_x, last_y)| (x - last_x, last_y - y));
        self.last = Some((x, y));
        delta
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Movement keys currently held down.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementKeys {
    pub fn process(&mut self, key: VirtualKeyCode, state: ElementState) -> bool {
        let pressed = state == ElementState::Pressed;
        let flag = match key {
            VirtualKeyCode::W => &mut self.forward,
            VirtualKeyCode::S => &mut self.back,
            VirtualKeyCode::A => &mut self.left,
            VirtualKeyCode::D => &mut self.right,
            VirtualKeyCode::Space => &mut self.up,
            VirtualKeyCode::C => &mut self.down,
            _ => return false,
        };
        *flag = pressed;
        true
    }

    pub fn any(&self) -> bool {
        self.forward || self.back || self.left || self.right || self.up || self.down
    }
}
