use glam::Vec2;

/// Pointer-drag gesture lifecycle: press starts tracking, moves report the
/// delta since the previous sample, release stops tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    active: bool,
    last: Vec2,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn press(&mut self, at: Vec2) {
        self.active = true;
        self.last = at;
    }

    /// Record a pointer sample. Returns the screen-space delta while a drag is
    /// active, `None` otherwise.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        Some(delta)
    }

    pub fn release(&mut self) {
        self.active = false;
    }
}
