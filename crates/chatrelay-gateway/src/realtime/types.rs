/// Per-recipient tally of one fan-out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Delivery {
    /// Frames queued.
    pub sent: usize,
    /// Recipients whose queue was full or closed.
    pub failed: usize,
}

impl Delivery {
    pub fn attempted(&self) -> usize {
        self.sent + self.failed
    }
}
