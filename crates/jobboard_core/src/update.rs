use std::time::Instant;

use crate::diff::diff;
use crate::view_model::{Notice, NoticeLevel};
use crate::{
    Effect, FetchFailure, ListingState, Msg, Pagination, PollPhase, PollSettings, RefreshRequest,
    RequestSeq, SearchFilters, SearchPage,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListingState, msg: Msg) -> (ListingState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted { settings } => state.mounted(settings),
        Msg::Unmounted => state.unmounted(),
        Msg::StartPolling(settings) => state.start_polling(settings),
        Msg::StopPolling => state.stop_polling(),
        Msg::TimerFired { now } => state.timer_fired(now),
        Msg::VisibilityChanged { visible, now } => state.visibility_changed(visible, now),
        Msg::RefreshRequested { request, now } => state.request_refresh(request, now),
        Msg::SearchSubmitted { filters, now } => state.search_submitted(filters, now),
        Msg::FiltersCleared { now } => state.search_submitted(SearchFilters::default(), now),
        Msg::PageChanged { page, now } => state.page_changed(page, now),
        Msg::SearchSettled { seq, result, now } => {
            state.search_settled(seq, result, now);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            if state.notice.take().is_some() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

impl ListingState {
    /// Initial load followed by background polling.
    pub fn mounted(&mut self, settings: PollSettings) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }
        let mut effects = vec![self.issue(RefreshRequest::USER)];
        effects.extend(self.start_polling(settings));
        effects
    }

    /// Stops polling for good and discards every outstanding response.
    pub fn unmounted(&mut self) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }
        let effects = self.stop_polling();
        self.cancel_outstanding(|_| false);
        self.mounted = false;
        effects
    }

    /// Starts the poll timer. A no-op while already polling.
    pub fn start_polling(&mut self, settings: PollSettings) -> Vec<Effect> {
        if !self.mounted || self.phase.is_polling() {
            return Vec::new();
        }
        self.settings = settings;
        self.clear_notice(NoticeLevel::Info);
        self.phase = if self.refresh.in_flight() > 0 {
            PollPhase::FetchInFlight
        } else {
            PollPhase::Polling
        };
        vec![
            Effect::StartTimer {
                interval: settings.interval,
            },
            Effect::WatchVisibility,
        ]
    }

    /// Cancels the timer and visibility watch. Safe to call repeatedly.
    pub fn stop_polling(&mut self) -> Vec<Effect> {
        if !self.phase.is_polling() {
            return Vec::new();
        }
        self.phase = PollPhase::Stopped;
        // Late background responses must not land after the stop.
        self.cancel_outstanding(|request| request.forced);
        if self.notice.is_none() {
            self.notice = Some(Notice::info("Live updates paused"));
        }
        self.mark_dirty();
        vec![Effect::StopTimer, Effect::UnwatchVisibility]
    }

    pub fn timer_fired(&mut self, now: Instant) -> Vec<Effect> {
        if !self.phase.is_polling() {
            return Vec::new();
        }
        self.request_refresh(RefreshRequest::BACKGROUND, now)
    }

    pub fn visibility_changed(&mut self, visible: bool, now: Instant) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }
        self.refresh.visible = visible;
        if !visible || !self.phase.is_polling() {
            return Vec::new();
        }
        let stale = self
            .refresh
            .last_refreshed
            .is_none_or(|last| now.saturating_duration_since(last) > self.settings.interval);
        if stale {
            self.request_refresh(RefreshRequest::BACKGROUND, now)
        } else {
            Vec::new()
        }
    }

    /// One fetch attempt with the current filters and page.
    pub fn request_refresh(&mut self, request: RefreshRequest, now: Instant) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }
        if !request.forced && !self.may_poll(now) {
            return Vec::new();
        }
        vec![self.issue(request)]
    }

    pub fn search_submitted(&mut self, filters: SearchFilters, now: Instant) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }
        self.refresh.filters = filters.normalized();
        self.refresh.page = 0;
        self.request_refresh(RefreshRequest::USER, now)
    }

    pub fn page_changed(&mut self, page: u32, now: Instant) -> Vec<Effect> {
        if !self.mounted {
            return Vec::new();
        }
        let last_page = self.pagination.total_pages.saturating_sub(1);
        self.refresh.page = if self.pagination.total_pages > 0 {
            page.min(last_page)
        } else {
            page
        };
        self.request_refresh(RefreshRequest::USER, now)
    }

    /// Applies the outcome of an earlier `Effect::SearchJobs`.
    pub fn search_settled(
        &mut self,
        seq: RequestSeq,
        result: Result<SearchPage, FetchFailure>,
        now: Instant,
    ) {
        if !self.mounted {
            return;
        }
        let Some(request) = self.settle_seq(seq) else {
            return;
        };
        if self.is_superseded(seq) {
            return;
        }

        match result {
            Ok(page) => {
                self.mark_applied(seq, now);
                let changed = diff(self.baseline.as_ref(), Some(&page.items)).is_changed();
                if changed || request.forced {
                    self.displayed = Some(page.items.clone());
                    self.snapshot_version += 1;
                    self.pagination = Pagination {
                        current_page: self.refresh.page,
                        total_pages: page.total_pages,
                        total_elements: page.total_elements,
                    };
                    self.clear_notice(NoticeLevel::Error);
                    self.mark_dirty();
                }
                // Baseline follows the fetched data even when nothing is shown.
                self.baseline = Some(page.items);
                self.clear_loading_up_to(seq);
            }
            Err(failure) => {
                if !request.silent {
                    self.displayed = Some(Vec::new());
                    self.baseline = None;
                    self.snapshot_version += 1;
                    self.pagination = Pagination {
                        current_page: self.refresh.page,
                        ..Pagination::default()
                    };
                    self.notice = Some(Notice::error(format!(
                        "Could not load jobs: {failure}"
                    )));
                    self.mark_dirty();
                    self.clear_loading_up_to(seq);
                }
            }
        }
    }

    fn clear_notice(&mut self, level: NoticeLevel) {
        if self.notice.as_ref().is_some_and(|notice| notice.level == level) {
            self.notice = None;
            self.mark_dirty();
        }
    }

    fn may_poll(&self, now: Instant) -> bool {
        if self.phase == PollPhase::Stopped || !self.refresh.visible {
            return false;
        }
        if self.refresh.in_flight() > 0 {
            return false;
        }
        self.refresh
            .last_refreshed
            .is_none_or(|last| now.saturating_duration_since(last) > self.settings.min_interval)
    }

    fn issue(&mut self, request: RefreshRequest) -> Effect {
        let seq = self.allocate_seq(request);
        if !request.silent {
            self.loading_seq = Some(seq);
            self.mark_dirty();
        }
        if self.phase == PollPhase::Polling {
            self.phase = PollPhase::FetchInFlight;
        }
        Effect::SearchJobs {
            seq,
            query: self.refresh.query(),
            silent: request.silent,
        }
    }
}
