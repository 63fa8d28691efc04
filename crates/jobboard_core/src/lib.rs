//! Job board core: listing data model, snapshot diff and the pure refresh
//! state machine driving the live job list.
mod diff;
mod effect;
pub mod format;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use diff::{diff, SnapshotDiff};
pub use effect::Effect;
pub use model::{
    FetchFailure, JobId, JobStatus, JobSummary, ListingSnapshot, Pagination, SearchFilters,
    SearchPage, SearchQuery,
};
pub use msg::Msg;
pub use state::{
    ListingState, PollPhase, PollSettings, RefreshRequest, RefreshState, RequestSeq,
    DEFAULT_MIN_REFRESH_INTERVAL, DEFAULT_PAGE_SIZE, DEFAULT_POLL_INTERVAL,
};
pub use update::update;
pub use view_model::{JobRowView, ListingViewModel, Notice, NoticeLevel};
