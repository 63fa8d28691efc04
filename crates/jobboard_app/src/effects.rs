use std::time::Instant;

use board_logging::{board_debug, board_info};
use jobboard_core::{
    Effect, FetchFailure, JobId, JobStatus, JobSummary, Msg, SearchPage, SearchQuery,
};
use jobboard_engine::{EngineHandle, JobRecord, SearchError, SearchRequest};

/// Executes coordinator effects against the engine and the host page.
pub struct EffectRunner {
    engine: EngineHandle,
    watching_visibility: bool,
    visible: bool,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            watching_visibility: false,
            visible: true,
        }
    }

    /// Runs `effects` and returns messages the host must feed back.
    pub fn run(&mut self, effects: Vec<Effect>, now: Instant) -> Vec<Msg> {
        let mut follow_up = Vec::new();
        for effect in effects {
            match effect {
                Effect::SearchJobs { seq, query, silent } => {
                    board_debug!(
                        "Search {} page={} silent={} filters={:?}",
                        seq,
                        query.page,
                        silent,
                        query.filters
                    );
                    self.engine.search(seq.0, to_request(&query));
                }
                Effect::StartTimer { interval } => {
                    board_info!("Polling every {:?}", interval);
                    self.engine.start_timer(interval);
                }
                Effect::StopTimer => {
                    board_info!("Polling stopped");
                    self.engine.stop_timer();
                }
                Effect::WatchVisibility => {
                    self.watching_visibility = true;
                    follow_up.push(Msg::VisibilityChanged {
                        visible: self.visible,
                        now,
                    });
                }
                Effect::UnwatchVisibility => {
                    self.watching_visibility = false;
                }
            }
        }
        follow_up
    }

    /// Records host visibility; returns the message to deliver while watched.
    pub fn set_visible(&mut self, visible: bool, now: Instant) -> Option<Msg> {
        self.visible = visible;
        self.watching_visibility
            .then_some(Msg::VisibilityChanged { visible, now })
    }
}

pub fn to_request(query: &SearchQuery) -> SearchRequest {
    let filters = &query.filters;
    SearchRequest {
        keyword: filters.keyword.clone(),
        location: filters.location.clone(),
        job_type: filters.job_type.clone(),
        work_mode: filters.work_mode.clone(),
        category_id: filters.category_id,
        salary_min: filters.salary_min,
        salary_max: filters.salary_max,
        page: query.page,
        size: query.page_size,
    }
}

pub fn to_page(page: jobboard_engine::SearchPage) -> SearchPage {
    SearchPage {
        items: page.items.into_iter().map(to_job).collect(),
        total_pages: page.total_pages,
        total_elements: page.total_elements,
    }
}

pub fn to_failure(err: &SearchError) -> FetchFailure {
    FetchFailure::new(err.to_string())
}

fn to_job(record: JobRecord) -> JobSummary {
    JobSummary {
        id: JobId::new(record.id),
        status: JobStatus::from_wire(record.status.as_deref().unwrap_or_default()),
        applicant_count: record.applicant_count.unwrap_or(0),
        title: record.title.unwrap_or_default(),
        company: record.company_name,
        location: record.location,
        job_type: record.job_type,
        work_mode: record.work_mode,
        salary_min: record.salary_min,
        salary_max: record.salary_max,
        working_days: record.working_days,
        working_hours: record.working_hours,
    }
}
