use std::time::Instant;

use crate::{FetchFailure, PollSettings, RefreshRequest, RequestSeq, SearchFilters, SearchPage};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Listing view appeared: load the first page and start polling.
    Mounted { settings: PollSettings },
    /// Listing view is going away; nothing may change after this.
    Unmounted,
    StartPolling(PollSettings),
    StopPolling,
    /// Poll timer tick.
    TimerFired { now: Instant },
    /// Host page became visible or hidden.
    VisibilityChanged { visible: bool, now: Instant },
    /// Explicit refresh request.
    RefreshRequested { request: RefreshRequest, now: Instant },
    /// User submitted the search form.
    SearchSubmitted { filters: SearchFilters, now: Instant },
    /// User reset every filter.
    FiltersCleared { now: Instant },
    /// User navigated to another page (0-based).
    PageChanged { page: u32, now: Instant },
    /// A search issued through `Effect::SearchJobs` finished.
    SearchSettled {
        seq: RequestSeq,
        result: Result<SearchPage, FetchFailure>,
        now: Instant,
    },
    /// User closed the notification banner.
    NoticeDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
