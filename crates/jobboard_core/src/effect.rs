use std::time::Duration;

use crate::{RequestSeq, SearchQuery};

/// Work the host must perform on behalf of the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue one search; the result comes back as `Msg::SearchSettled`.
    SearchJobs {
        seq: RequestSeq,
        query: SearchQuery,
        silent: bool,
    },
    /// Start (or restart) the repeating poll timer.
    StartTimer { interval: Duration },
    StopTimer,
    /// Begin delivering `Msg::VisibilityChanged`.
    WatchVisibility,
    UnwatchVisibility,
}
