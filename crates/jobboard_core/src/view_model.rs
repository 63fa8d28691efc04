use crate::{JobId, JobStatus, Pagination, PollPhase, SearchFilters};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// Toast-style banner shown above the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListingViewModel {
    pub phase: PollPhase,
    pub loading: bool,
    pub visible: bool,
    pub filters: SearchFilters,
    pub pagination: Pagination,
    /// Bumped every time the displayed listing is replaced.
    pub snapshot_version: u64,
    /// False until the first search settles.
    pub has_loaded: bool,
    pub jobs: Vec<JobRowView>,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub status: JobStatus,
    pub applicants: String,
    pub salary: String,
    pub schedule: Option<String>,
}
