// A modal overlay that suspends the background while it covers the page.
// The overlay is handed its animation control at construction.

/// Pause/resume entry points of the background animation. Both are safe to
/// call any number of times in any order.
pub trait AnimationControl {
    fn pause(&self);
    fn resume(&self);
}

pub struct Overlay<C: AnimationControl> {
    control: C,
    open: bool,
}

impl<C: AnimationControl> Overlay<C> {
    pub fn new(control: C) -> Overlay<C> {
        Overlay {
            control,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns false if the overlay was already open.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.control.pause();
        true
    }

    /// Returns false if the overlay was already closed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.control.resume();
        true
    }
}
