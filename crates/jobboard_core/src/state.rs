use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::{Duration, Instant};

use crate::format::{applicants_label, salary_label, schedule_label};
use crate::view_model::{JobRowView, ListingViewModel, Notice};
use crate::{ListingSnapshot, Pagination, SearchFilters, SearchQuery};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(30_000);
pub const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_millis(5_000);
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Coordinator lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollPhase {
    #[default]
    Idle,
    Polling,
    FetchInFlight,
    Stopped,
}

impl PollPhase {
    pub fn is_polling(self) -> bool {
        matches!(self, PollPhase::Polling | PollPhase::FetchInFlight)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Timer period.
    pub interval: Duration,
    /// Minimum gap between two non-forced refreshes.
    pub min_interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            min_interval: DEFAULT_MIN_REFRESH_INTERVAL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshRequest {
    /// Skip the throttle and the in-flight guard.
    pub forced: bool,
    /// Do not toggle the loading indicator; failures stay invisible.
    pub silent: bool,
}

impl RefreshRequest {
    pub const BACKGROUND: Self = Self {
        forced: false,
        silent: true,
    };
    pub const USER: Self = Self {
        forced: true,
        silent: false,
    };
}

/// Tag attached to every issued search, strictly increasing per coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestSeq(pub u64);

impl fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-rendered bookkeeping that survives across ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshState {
    pub last_refreshed: Option<Instant>,
    pub page: u32,
    pub page_size: u32,
    pub filters: SearchFilters,
    pub visible: bool,
    outstanding: BTreeMap<RequestSeq, RefreshRequest>,
    /// Still running on the backend but discarded on arrival.
    cancelled: BTreeSet<RequestSeq>,
    next_seq: u64,
    latest_forced: Option<RequestSeq>,
    last_applied: Option<RequestSeq>,
}

impl RefreshState {
    fn new(page_size: u32) -> Self {
        Self {
            last_refreshed: None,
            page: 0,
            page_size: page_size.max(1),
            filters: SearchFilters::default(),
            visible: true,
            outstanding: BTreeMap::new(),
            cancelled: BTreeSet::new(),
            next_seq: 0,
            latest_forced: None,
            last_applied: None,
        }
    }

    /// Searches whose responses have not arrived yet, cancelled ones included.
    pub fn in_flight(&self) -> usize {
        self.outstanding.len() + self.cancelled.len()
    }

    pub fn query(&self) -> SearchQuery {
        SearchQuery {
            filters: self.filters.clone(),
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingState {
    pub(crate) phase: PollPhase,
    pub(crate) settings: PollSettings,
    pub(crate) refresh: RefreshState,
    /// What the user sees.
    pub(crate) displayed: Option<ListingSnapshot>,
    /// What the next poll is compared against.
    pub(crate) baseline: Option<ListingSnapshot>,
    pub(crate) pagination: Pagination,
    pub(crate) loading_seq: Option<RequestSeq>,
    pub(crate) notice: Option<Notice>,
    pub(crate) snapshot_version: u64,
    pub(crate) mounted: bool,
    dirty: bool,
}

impl Default for ListingState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListingState {
    pub fn new(page_size: u32) -> Self {
        Self {
            phase: PollPhase::Idle,
            settings: PollSettings::default(),
            refresh: RefreshState::new(page_size),
            displayed: None,
            baseline: None,
            pagination: Pagination::default(),
            loading_seq: None,
            notice: None,
            snapshot_version: 0,
            mounted: true,
            dirty: false,
        }
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    pub fn settings(&self) -> PollSettings {
        self.settings
    }

    pub fn refresh_state(&self) -> &RefreshState {
        &self.refresh
    }

    pub fn displayed(&self) -> Option<&ListingSnapshot> {
        self.displayed.as_ref()
    }

    pub fn baseline(&self) -> Option<&ListingSnapshot> {
        self.baseline.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn view(&self) -> ListingViewModel {
        let jobs = self
            .displayed
            .iter()
            .flatten()
            .map(|job| JobRowView {
                job_id: job.id.clone(),
                title: job.title.clone(),
                company: job.company.clone(),
                location: job.location.clone(),
                status: job.status.clone(),
                applicants: applicants_label(job.applicant_count),
                salary: salary_label(job.salary_min, job.salary_max),
                schedule: schedule_label(job.working_days.as_deref(), job.working_hours.as_deref()),
            })
            .collect();

        ListingViewModel {
            phase: self.phase,
            loading: self.loading_seq.is_some(),
            visible: self.refresh.visible,
            filters: self.refresh.filters.clone(),
            pagination: self.pagination,
            snapshot_version: self.snapshot_version,
            has_loaded: self.displayed.is_some(),
            jobs,
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Returns whether a re-render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn allocate_seq(&mut self, request: RefreshRequest) -> RequestSeq {
        self.refresh.next_seq += 1;
        let seq = RequestSeq(self.refresh.next_seq);
        self.refresh.outstanding.insert(seq, request);
        if request.forced {
            self.refresh.latest_forced = Some(seq);
        }
        seq
    }

    /// Marks `seq` as arrived, returning how it was issued. Cancelled and
    /// unknown requests yield `None`.
    pub(crate) fn settle_seq(&mut self, seq: RequestSeq) -> Option<RefreshRequest> {
        let request = self.refresh.outstanding.remove(&seq);
        let cancelled = self.refresh.cancelled.remove(&seq);
        if request.is_none() && !cancelled {
            return None;
        }
        if self.phase == PollPhase::FetchInFlight && self.refresh.in_flight() == 0 {
            self.phase = PollPhase::Polling;
        }
        self.release_loading();
        request
    }

    /// True when a newer forced request was issued or a newer response applied.
    pub(crate) fn is_superseded(&self, seq: RequestSeq) -> bool {
        self.refresh.latest_forced.is_some_and(|forced| seq < forced)
            || self.refresh.last_applied.is_some_and(|applied| seq < applied)
    }

    pub(crate) fn mark_applied(&mut self, seq: RequestSeq, now: Instant) {
        self.refresh.last_applied = Some(seq);
        self.refresh.last_refreshed = Some(now);
    }

    /// Cancels outstanding requests that `keep` rejects. They still count as
    /// in flight until they arrive, then their responses are discarded.
    pub(crate) fn cancel_outstanding(&mut self, keep: impl Fn(&RefreshRequest) -> bool) {
        let cancelled = &mut self.refresh.cancelled;
        self.refresh.outstanding.retain(|seq, request| {
            let kept = keep(request);
            if !kept {
                cancelled.insert(*seq);
            }
            kept
        });
        self.release_loading();
    }

    /// Clears the loading flag once its request can no longer be applied.
    fn release_loading(&mut self) {
        if let Some(loading) = self.loading_seq {
            if !self.refresh.outstanding.contains_key(&loading) {
                self.loading_seq = None;
                self.dirty = true;
            }
        }
    }

    pub(crate) fn clear_loading_up_to(&mut self, seq: RequestSeq) {
        if self.loading_seq.is_some_and(|loading| loading <= seq) {
            self.loading_seq = None;
            self.dirty = true;
        }
    }
}
