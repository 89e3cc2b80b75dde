//! Weekday parsing of free-text course schedules.
//!
//! Schedules such as `Mon/Wed 10:00-11:30` are reduced to the set of weekdays they mention.
//! Two schedules conflict when they share any weekday; time of day is ignored, so
//! `Mon 09:00` and `Mon 15:00` conflict.

use std::collections::BTreeSet;

use chrono::Weekday;

const WEEKDAY_TOKENS: [(&str, Weekday); 7] = [
    ("mon", Weekday::Mon),
    ("tue", Weekday::Tue),
    ("wed", Weekday::Wed),
    ("thu", Weekday::Thu),
    ("fri", Weekday::Fri),
    ("sat", Weekday::Sat),
    ("sun", Weekday::Sun),
];

/// Weekdays mentioned in `schedule`, matched case-insensitively by three letter prefix.
///
/// Matching is by substring, so `Monday` and `mon,wed` both contain `mon`.
pub fn weekdays(schedule: &str) -> BTreeSet<Weekday> {
    let lowered = schedule.to_lowercase();

    WEEKDAY_TOKENS
        .iter()
        .filter(|(token, _)| lowered.contains(token))
        .map(|(_, day)| *day)
        .collect()
}

/// Whether two schedules share at least one weekday
pub fn conflicts(a: &str, b: &str) -> bool {
    let days = weekdays(a);

    weekdays(b).iter().any(|day| days.contains(day))
}
