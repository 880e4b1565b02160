use uuid::Uuid;

/// States of the gesture-capture machine. Exactly one is active at a
/// time and only the controller transitions between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    /// Waiting for a hand to appear (or a manual start).
    Idle,
    /// Hand seen; countdown running before recording begins.
    Preparing,
    /// Buffering feature frames.
    Recording,
    /// Transient: the stop sequence is flushing the buffer. `on_frame`
    /// is a no-op here.
    Stopped,
}

/// Read-only view of the controller for a UI layer.
///
/// Taking a snapshot has no side effects on the capture cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSnapshot {
    /// Current machine state.
    pub state: RecordState,
    /// Countdown ticks left to display; 0 outside `Preparing`.
    pub countdown: u32,
    /// Feature frames buffered so far in this cycle.
    pub buffered_frames: usize,
    /// Gestures completed (non-empty stops) since construction.
    pub completed_gestures: u64,
    /// Label that will be attached to the next completed sample.
    pub label: String,
    /// Whether transitions are driven by hand presence.
    pub auto_flow: bool,
    /// Correlation id of the in-flight capture cycle, if any.
    pub cycle_id: Option<Uuid>,
}
