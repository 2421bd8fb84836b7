//! Progress reporting for the generation loop. The loop emits done/total per batch;
//! the console layer consumes via a sink.

use std::sync::Arc;

/// One progress update: how many batches are done and the total count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub done: usize,
    pub total: usize,
}

/// Sink for progress events. Implementations may throttle.
pub type ProgressSink = Arc<dyn Fn(ProgressEvent) + Send + Sync>;
