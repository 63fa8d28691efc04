use jobboard_core::{ListingViewModel, NoticeLevel, PollPhase};

/// Text rendering of the listing, one entry per output line.
pub fn render(view: &ListingViewModel, updated_at: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(view.jobs.len() * 2 + 4);
    lines.push(header(view, updated_at));

    if let Some(notice) = &view.notice {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Error => "error",
        };
        lines.push(format!("[{tag}] {}", notice.text));
    }

    if view.loading && view.jobs.is_empty() {
        lines.push("Loading jobs...".to_string());
        return lines;
    }
    if view.has_loaded && view.jobs.is_empty() {
        lines.push("No jobs found.".to_string());
        return lines;
    }

    for (index, job) in view.jobs.iter().enumerate() {
        let mut title = format!("{:>3}. {}", index + 1, display_title(&job.title));
        if let Some(company) = &job.company {
            title.push_str(&format!(" @ {company}"));
        }
        title.push_str(&format!(" [{}]", job.status));
        lines.push(title);

        let mut details = vec![job.salary.clone(), job.applicants.clone()];
        if let Some(location) = &job.location {
            details.insert(0, location.clone());
        }
        if let Some(schedule) = &job.schedule {
            details.push(schedule.clone());
        }
        lines.push(format!("     {}", details.join(" | ")));
    }

    let pagination = view.pagination;
    if pagination.total_pages > 0 {
        lines.push(format!(
            "page {}/{} ({} jobs)",
            pagination.current_page + 1,
            pagination.total_pages,
            pagination.total_elements
        ));
    }
    lines
}

fn header(view: &ListingViewModel, updated_at: &str) -> String {
    let mut parts = vec![format!("Jobs (updated {updated_at})")];
    if let Some(keyword) = &view.filters.keyword {
        parts.push(format!("search: {keyword:?}"));
    }
    if !view.filters.is_empty() && view.filters.keyword.is_none() {
        parts.push("filtered".to_string());
    }
    if view.phase == PollPhase::Idle {
        parts.push("live updates off".to_string());
    }
    if !view.visible {
        parts.push("hidden".to_string());
    }
    if view.loading {
        parts.push("loading".to_string());
    }
    parts.join(" - ")
}

fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        "(untitled)"
    } else {
        title
    }
}
