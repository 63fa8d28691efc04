use jobboard_core::format::{
    applicants_label, salary_label, schedule_label, working_days_label, working_hours_label,
};

#[test]
fn salary_label_covers_open_ranges() {
    assert_eq!(salary_label(None, None), "Negotiable");
    assert_eq!(salary_label(Some(0), Some(0)), "Negotiable");
    assert_eq!(salary_label(Some(10_000_000), None), "From 10,000,000");
    assert_eq!(salary_label(None, Some(25_000)), "Up to 25,000");
    assert_eq!(salary_label(Some(1_500), Some(1_500)), "1,500");
    assert_eq!(salary_label(Some(1_000), Some(2_500)), "1,000 - 2,500");
    assert_eq!(salary_label(Some(2_500), Some(1_000)), "1,000 - 2,500");
}

#[test]
fn applicants_label_pluralizes() {
    assert_eq!(applicants_label(0), "No applicants");
    assert_eq!(applicants_label(1), "1 applicant");
    assert_eq!(applicants_label(42), "42 applicants");
}

#[test]
fn working_days_collapse_into_ranges() {
    assert_eq!(
        working_days_label("MONDAY,TUESDAY,WEDNESDAY,THURSDAY,FRIDAY"),
        "Mon-Fri"
    );
    assert_eq!(working_days_label("mon, wed, fri"), "Mon, Wed, Fri");
    assert_eq!(working_days_label("Sat Sun"), "Sat, Sun");
    assert_eq!(working_days_label("monday - thursday, saturday"), "Mon-Thu, Sat");
    assert_eq!(
        working_days_label("MON,TUE,WED,THU,FRI,SAT,SUN"),
        "Every day"
    );
    assert_eq!(working_days_label("fri,mon,tue,wed,mon"), "Mon-Wed, Fri");
}

#[test]
fn working_days_fall_back_to_raw_text() {
    assert_eq!(working_days_label("  flexible  "), "flexible");
    assert_eq!(working_days_label("friday-monday"), "friday-monday");
    assert_eq!(working_days_label(""), "");
}

#[test]
fn working_hours_are_normalized() {
    assert_eq!(working_hours_label("08:00-17:00"), "08:00 - 17:00");
    assert_eq!(working_hours_label("8:30:00 - 17:30:00"), "08:30 - 17:30");
    assert_eq!(working_hours_label("shift based"), "shift based");
    assert_eq!(working_hours_label("25:00-26:00"), "25:00-26:00");
}

#[test]
fn schedule_joins_days_and_hours() {
    assert_eq!(
        schedule_label(Some("MONDAY,TUESDAY,WEDNESDAY"), Some("09:00-18:00")).as_deref(),
        Some("Mon-Wed, 09:00 - 18:00")
    );
    assert_eq!(
        schedule_label(None, Some("09:00-18:00")).as_deref(),
        Some("09:00 - 18:00")
    );
    assert_eq!(schedule_label(Some("  "), None), None);
}
