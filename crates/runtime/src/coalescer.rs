/// Single-flag frame coalescing.
///
/// Any number of triggers arriving between two frame boundaries collapse
/// into at most one unit of work on the next boundary. The flag carries no
/// payload on purpose: whoever runs the work reads its inputs at execution
/// time, so the pass always reflects the most recent state (last-write-wins)
/// rather than the state at trigger time.
///
/// Guarantees:
/// - At most one `take() == true` per group of `request()`s between frames.
/// - At least one, once any `request()` was made.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FrameCoalescer {
    pending: bool,
}

impl FrameCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the flag.
    ///
    /// Returns `true` only when the flag was newly set; callers that need to
    /// schedule a frame callback should do so exactly then. Triggers landing
    /// while already pending are absorbed.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Clears the flag and reports whether work was due.
    ///
    /// Called once per frame boundary by the owner.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}
