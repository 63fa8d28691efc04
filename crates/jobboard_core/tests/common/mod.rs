#![allow(dead_code)]

use std::sync::Once;
use std::time::{Duration, Instant};

use jobboard_core::{
    update, Effect, FetchFailure, JobStatus, JobSummary, ListingState, Msg, PollSettings,
    RequestSeq, SearchPage,
};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(board_logging::initialize_for_tests);
}

/// Deterministic monotonic clock for driving the coordinator.
pub struct FakeClock {
    origin: Instant,
}

impl FakeClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn at(&self, millis: u64) -> Instant {
        self.origin + Duration::from_millis(millis)
    }
}

pub fn job(id: &str, status: JobStatus, applicants: u32) -> JobSummary {
    JobSummary::new(id, status, applicants)
}

pub fn page_of(items: Vec<JobSummary>) -> SearchPage {
    let total = items.len() as u64;
    SearchPage {
        items,
        total_pages: 1,
        total_elements: total,
    }
}

pub fn search_seqs(effects: &[Effect]) -> Vec<RequestSeq> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::SearchJobs { seq, .. } => Some(*seq),
            _ => None,
        })
        .collect()
}

pub fn only_search(effects: &[Effect]) -> RequestSeq {
    let seqs = search_seqs(effects);
    assert_eq!(seqs.len(), 1, "expected exactly one search in {effects:?}");
    seqs[0]
}

pub fn settle_ok(
    state: ListingState,
    seq: RequestSeq,
    items: Vec<JobSummary>,
    now: Instant,
) -> ListingState {
    let (state, effects) = update(
        state,
        Msg::SearchSettled {
            seq,
            result: Ok(page_of(items)),
            now,
        },
    );
    assert!(effects.is_empty());
    state
}

pub fn settle_err(state: ListingState, seq: RequestSeq, now: Instant) -> ListingState {
    let (state, _) = update(
        state,
        Msg::SearchSettled {
            seq,
            result: Err(FetchFailure::new("connection refused")),
            now,
        },
    );
    state
}

/// Mounted coordinator whose first load returned `items` at `clock.at(0)`.
pub fn mounted_with(clock: &FakeClock, items: Vec<JobSummary>) -> ListingState {
    let (state, effects) = update(
        ListingState::default(),
        Msg::Mounted {
            settings: PollSettings::default(),
        },
    );
    let seq = only_search(&effects);
    let mut state = settle_ok(state, seq, items, clock.at(0));
    state.consume_dirty();
    state
}
