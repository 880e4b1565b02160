use crate::{CaptureResult, GestureSample};

use async_trait::async_trait;

/// Delivery capability for completed gesture samples.
///
/// The controller awaits `send` during its stop sequence and treats any
/// error as a rejected upload; it never retries and is already back to
/// idle by the time the error surfaces. Implementations own their
/// timeout and retry policy.
#[async_trait]
pub trait GestureSender: Send {
    /// Deliver one completed sample. Ownership transfers to the sender.
    async fn send(&mut self, sample: GestureSample) -> CaptureResult<()>;
}
