//! Display labels for listing rows.

const DAY_NAMES: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];
const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Salary range label, e.g. `15,000,000 - 20,000,000`.
pub fn salary_label(min: Option<u64>, max: Option<u64>) -> String {
    let min = min.filter(|value| *value > 0);
    let max = max.filter(|value| *value > 0);
    match (min, max) {
        (None, None) => "Negotiable".to_string(),
        (Some(min), None) => format!("From {}", group_thousands(min)),
        (None, Some(max)) => format!("Up to {}", group_thousands(max)),
        (Some(min), Some(max)) if min == max => group_thousands(min),
        (Some(min), Some(max)) => {
            let (low, high) = if min <= max { (min, max) } else { (max, min) };
            format!("{} - {}", group_thousands(low), group_thousands(high))
        }
    }
}

pub fn applicants_label(count: u32) -> String {
    match count {
        0 => "No applicants".to_string(),
        1 => "1 applicant".to_string(),
        n => format!("{n} applicants"),
    }
}

/// Compacts a day list such as `MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY`
/// into `Mon-Fri`. Input that is not a day list is returned trimmed.
pub fn working_days_label(raw: &str) -> String {
    let trimmed = raw.trim();
    match parse_days(trimmed) {
        Some(days) => compact_days(&days),
        None => trimmed.to_string(),
    }
}

/// Normalises `8:00-17:30:00` into `08:00 - 17:30`. Input that is not a
/// time range is returned trimmed.
pub fn working_hours_label(raw: &str) -> String {
    let trimmed = raw.trim();
    let parsed = trimmed.split_once('-').and_then(|(start, end)| {
        Some(format!("{} - {}", parse_clock(start)?, parse_clock(end)?))
    });
    parsed.unwrap_or_else(|| trimmed.to_string())
}

/// Days and hours joined for a single row, `None` when both are blank.
pub fn schedule_label(days: Option<&str>, hours: Option<&str>) -> Option<String> {
    let days = days
        .map(working_days_label)
        .filter(|label| !label.is_empty());
    let hours = hours
        .map(working_hours_label)
        .filter(|label| !label.is_empty());
    match (days, hours) {
        (Some(days), Some(hours)) => Some(format!("{days}, {hours}")),
        (days, hours) => days.or(hours),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

fn parse_days(raw: &str) -> Option<Vec<usize>> {
    let raw = raw.split('-').map(str::trim).collect::<Vec<_>>().join("-");
    let mut days = Vec::new();
    for token in raw
        .split(|c: char| c == ',' || c == ';' || c == '/' || c.is_whitespace())
        .filter(|token| !token.is_empty())
    {
        match token.split_once('-') {
            Some((from, to)) => {
                let (from, to) = (day_index(from)?, day_index(to)?);
                if from > to {
                    return None;
                }
                days.extend(from..=to);
            }
            None => days.push(day_index(token)?),
        }
    }
    if days.is_empty() {
        return None;
    }
    days.sort_unstable();
    days.dedup();
    Some(days)
}

fn day_index(token: &str) -> Option<usize> {
    let token = token.trim().to_ascii_lowercase();
    if token.len() < 3 {
        return None;
    }
    DAY_NAMES.iter().position(|name| name.starts_with(&token))
}

fn compact_days(days: &[usize]) -> String {
    if days.len() == DAY_NAMES.len() {
        return "Every day".to_string();
    }
    let mut parts = Vec::new();
    let mut start = 0;
    while start < days.len() {
        let mut end = start;
        while end + 1 < days.len() && days[end + 1] == days[end] + 1 {
            end += 1;
        }
        if end - start >= 2 {
            parts.push(format!("{}-{}", DAY_LABELS[days[start]], DAY_LABELS[days[end]]));
        } else {
            parts.extend(days[start..=end].iter().map(|day| DAY_LABELS[*day].to_string()));
        }
        start = end + 1;
    }
    parts.join(", ")
}

fn parse_clock(raw: &str) -> Option<String> {
    let mut fields = raw.trim().split(':');
    let hours: u32 = fields.next()?.parse().ok()?;
    let minutes: u32 = fields.next()?.parse().ok()?;
    if let Some(seconds) = fields.next() {
        let seconds: u32 = seconds.parse().ok()?;
        if seconds >= 60 {
            return None;
        }
    }
    if fields.next().is_some() || hours >= 24 || minutes >= 60 {
        return None;
    }
    Some(format!("{hours:02}:{minutes:02}"))
}
