use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Whether `now` falls inside the gift-wrap window: all of November, plus
/// December 1st through December 25th 04:59:59. The window reopens at
/// December 25th 05:00:00 and stays open until the next November.
///
/// Calendar fields are read in whatever zone `now` carries. The caller
/// decides which clock governs the unlock; there is no ambient local time
/// here.
pub fn season_locked<Tz: TimeZone>(now: &DateTime<Tz>) -> bool {
    let is_november = now.month() == 11;
    let is_december_pre_christmas =
        now.month() == 12 && (now.day() < 25 || (now.day() == 25 && now.hour() < 5));
    is_november || is_december_pre_christmas
}
