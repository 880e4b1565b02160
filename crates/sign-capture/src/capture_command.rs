use sign_capture_core::FrameObservation;

/// Events processed serially by the capture event loop.
///
/// Everything that can mutate the controller travels through this one
/// queue, so a countdown completion and a frame arrival can never race.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureCommand {
    /// One observation from the landmark detector.
    Frame(FrameObservation),
    /// Begin a capture cycle regardless of hand presence.
    ForceStart,
    /// Run the stop sequence immediately.
    ForceStop,
    /// Replace the label attached to subsequent samples.
    SetLabel(String),
    /// Switch between automatic and manual flow.
    SetAutoFlow(bool),
    /// Stop the event loop.
    Shutdown,
}
