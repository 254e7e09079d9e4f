//! Running/paused state of the frame loop.
//!
//! The loop is cooperative: every frame callback asks [`Lifecycle::on_frame`]
//! whether to render and reschedule. A paused loop terminates at its next frame
//! instead of idling, and [`Lifecycle::resume`] only starts a new one if the
//! old one has actually terminated. `pending_frames` never exceeds one.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Paused,
}

/// Outcome of a resume request.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resume {
    /// The loop had terminated; the caller must request one new frame.
    Restart,
    /// Paused and resumed before the pending frame fired. That frame keeps
    /// the loop going, nothing to schedule.
    Rearmed,
    /// Already running, no-op.
    AlreadyRunning,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FrameAction {
    /// Tick and request the next frame.
    Render,
    /// Do nothing and let the loop end.
    Stop,
}

#[derive(Debug)]
pub struct Lifecycle {
    state: State,
    pending_frames: u32,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Lifecycle::new()
    }
}

impl Lifecycle {
    pub fn new() -> Lifecycle {
        Lifecycle {
            state: State::Running,
            pending_frames: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    pub fn pending_frames(&self) -> u32 {
        self.pending_frames
    }

    /// Claims the first frame. Returns false if a loop already exists or the
    /// lifecycle is paused.
    pub fn start(&mut self) -> bool {
        if self.state == State::Running && self.pending_frames == 0 {
            self.pending_frames = 1;
            true
        } else {
            false
        }
    }

    /// Returns true if this call changed the state.
    pub fn pause(&mut self) -> bool {
        let changed = self.state == State::Running;
        self.state = State::Paused;
        changed
    }

    pub fn resume(&mut self) -> Resume {
        match self.state {
            State::Running => Resume::AlreadyRunning,
            State::Paused => {
                self.state = State::Running;
                if self.pending_frames == 0 {
                    self.pending_frames = 1;
                    Resume::Restart
                } else {
                    Resume::Rearmed
                }
            }
        }
    }

    /// Called at the top of every frame callback.
    pub fn on_frame(&mut self) -> FrameAction {
        if self.pending_frames == 0 {
            return FrameAction::Stop;
        }
        match self.state {
            State::Running => FrameAction::Render,
            State::Paused => {
                self.pending_frames = 0;
                FrameAction::Stop
            }
        }
    }

    /// The next frame could not be scheduled; the loop is gone.
    pub fn cancel_frame(&mut self) {
        self.pending_frames = 0;
    }
}
