use std::fmt;

/// Opaque job identifier assigned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Moderation status of a posting. The set is owned by the backend, so
/// unrecognised values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JobStatus {
    PendingReview,
    Approved,
    Rejected,
    Closed,
    Other(String),
}

impl JobStatus {
    /// Parses the backend's SCREAMING_SNAKE_CASE form.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PENDING_REVIEW" | "PENDING" => JobStatus::PendingReview,
            "APPROVED" => JobStatus::Approved,
            "REJECTED" => JobStatus::Rejected,
            "CLOSED" => JobStatus::Closed,
            _ => JobStatus::Other(raw.trim().to_string()),
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            JobStatus::PendingReview => "PENDING_REVIEW",
            JobStatus::Approved => "APPROVED",
            JobStatus::Rejected => "REJECTED",
            JobStatus::Closed => "CLOSED",
            JobStatus::Other(raw) => raw,
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::PendingReview => write!(f, "pending review"),
            JobStatus::Approved => write!(f, "approved"),
            JobStatus::Rejected => write!(f, "rejected"),
            JobStatus::Closed => write!(f, "closed"),
            JobStatus::Other(raw) => write!(f, "{}", raw.to_lowercase()),
        }
    }
}

/// One row of a listing. Only `id`, `status` and `applicant_count` take part
/// in change detection; the rest is carried for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSummary {
    pub id: JobId,
    pub status: JobStatus,
    pub applicant_count: u32,
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub work_mode: Option<String>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
    pub working_days: Option<String>,
    pub working_hours: Option<String>,
}

impl JobSummary {
    /// A summary with only the compared fields set.
    pub fn new(id: impl Into<String>, status: JobStatus, applicant_count: u32) -> Self {
        Self {
            id: JobId::new(id),
            status,
            applicant_count,
            title: String::new(),
            company: None,
            location: None,
            job_type: None,
            work_mode: None,
            salary_min: None,
            salary_max: None,
            working_days: None,
            working_hours: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// The ordered set of jobs shown to the user. Replaced wholesale.
pub type ListingSnapshot = Vec<JobSummary>;

/// Search filters as entered by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFilters {
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub work_mode: Option<String>,
    pub category_id: Option<u64>,
    pub salary_min: Option<u64>,
    pub salary_max: Option<u64>,
}

impl SearchFilters {
    /// Trims text filters and drops blank ones.
    pub fn normalized(self) -> Self {
        Self {
            keyword: non_blank(self.keyword),
            location: non_blank(self.location),
            job_type: non_blank(self.job_type),
            work_mode: non_blank(self.work_mode),
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

/// Everything the host needs to issue one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub filters: SearchFilters,
    pub page: u32,
    pub page_size: u32,
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub items: ListingSnapshot,
    pub total_pages: u32,
    pub total_elements: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_elements: u64,
}

/// Why a search failed, as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::{JobStatus, SearchFilters};

    #[test]
    fn status_parsing_is_case_insensitive_and_keeps_unknowns() {
        assert_eq!(JobStatus::from_wire("approved"), JobStatus::Approved);
        assert_eq!(JobStatus::from_wire(" PENDING_REVIEW "), JobStatus::PendingReview);
        assert_eq!(
            JobStatus::from_wire("ARCHIVED"),
            JobStatus::Other("ARCHIVED".to_string())
        );
        assert_eq!(JobStatus::from_wire("ARCHIVED").as_wire(), "ARCHIVED");
    }

    #[test]
    fn normalized_filters_drop_blank_text() {
        let filters = SearchFilters {
            keyword: Some("  rust ".to_string()),
            location: Some("   ".to_string()),
            salary_min: Some(1000),
            ..SearchFilters::default()
        }
        .normalized();

        assert_eq!(filters.keyword.as_deref(), Some("rust"));
        assert_eq!(filters.location, None);
        assert_eq!(filters.salary_min, Some(1000));
        assert!(!filters.is_empty());
        assert!(SearchFilters::default().normalized().is_empty());
    }
}
