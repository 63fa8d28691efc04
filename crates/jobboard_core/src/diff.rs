use std::collections::{HashMap, HashSet};

use crate::{JobStatus, ListingSnapshot};

/// Outcome of comparing two listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotDiff {
    Changed,
    Unchanged,
}

impl SnapshotDiff {
    pub fn is_changed(self) -> bool {
        self == SnapshotDiff::Changed
    }
}

/// Compares two listings by job id.
///
/// Only status and applicant count are compared per job. Position is
/// ignored: a reordered listing with identical jobs is `Unchanged`. A missing
/// side (never fetched) always counts as a change.
pub fn diff(old: Option<&ListingSnapshot>, new: Option<&ListingSnapshot>) -> SnapshotDiff {
    let (Some(old), Some(new)) = (old, new) else {
        return SnapshotDiff::Changed;
    };
    if old.len() != new.len() {
        return SnapshotDiff::Changed;
    }

    let previous: HashMap<&str, (&JobStatus, u32)> = old
        .iter()
        .map(|job| (job.id.as_str(), (&job.status, job.applicant_count)))
        .collect();

    for job in new {
        match previous.get(job.id.as_str()) {
            Some((status, applicants))
                if **status == job.status && *applicants == job.applicant_count => {}
            _ => return SnapshotDiff::Changed,
        }
    }

    let current: HashSet<&str> = new.iter().map(|job| job.id.as_str()).collect();
    if old.iter().any(|job| !current.contains(job.id.as_str())) {
        return SnapshotDiff::Changed;
    }

    SnapshotDiff::Unchanged
}
