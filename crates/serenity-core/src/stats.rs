//! Statistics derived from the session log.
//!
//! Pure functions over a session slice; the caller supplies the reference
//! instant, so everything here is deterministic and clock-free. Calendar
//! arithmetic uses the UTC calendar day of the stored timestamp.
//!
//! Minute totals count every session at its configured length, abandoned
//! ones included -- the honest completion metric is [`completed_count`].

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

use crate::session::MeditationSession;

/// Aggregate minutes for one weekday within the current week window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBucket {
    pub day: Weekday,
    pub minutes: u64,
}

/// Monday-first weekday order used for chart output.
const WEEK_MON_FIRST: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Per-day minute totals for the week containing `now`.
///
/// The window is `[start_of_week, start_of_week + 7d)` with Sunday as day
/// zero of the underlying index; the output is rotated to run Monday
/// through Sunday, zero-filled for days without sessions. Each session in
/// the window contributes `duration / 60` whole minutes to its weekday.
pub fn weekly_buckets(sessions: &[MeditationSession], now: DateTime<Utc>) -> [DayBucket; 7] {
    let today = now.date_naive();
    let start_of_week = today - Duration::days(i64::from(today.weekday().num_days_from_sunday()));
    let end_of_week = start_of_week + Duration::days(7);

    // Indexed Sunday = 0, matching the week window computation.
    let mut minutes = [0u64; 7];
    for session in sessions {
        let day = session.date.date_naive();
        if day >= start_of_week && day < end_of_week {
            minutes[day.weekday().num_days_from_sunday() as usize] +=
                u64::from(session.duration / 60);
        }
    }

    WEEK_MON_FIRST.map(|day| DayBucket {
        day,
        minutes: minutes[day.num_days_from_sunday() as usize],
    })
}

/// All-time practice minutes, `duration / 60` per session.
pub fn total_minutes(sessions: &[MeditationSession]) -> u64 {
    sessions
        .iter()
        .map(|s| u64::from(s.duration / 60))
        .sum()
}

/// Number of sessions whose countdown reached zero.
pub fn completed_count(sessions: &[MeditationSession]) -> usize {
    sessions.iter().filter(|s| s.completed).count()
}

/// Consecutive calendar days with at least one session, ending today or
/// yesterday.
///
/// Returns 0 when the log is empty or the most recent session day is
/// older than yesterday. Multiple sessions on one day count once.
pub fn streak(sessions: &[MeditationSession], today: NaiveDate) -> u32 {
    if sessions.is_empty() {
        return 0;
    }

    let mut days: Vec<NaiveDate> = sessions.iter().map(|s| s.date.date_naive()).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let latest = days[0];
    if latest != today && latest != today - Duration::days(1) {
        return 0;
    }

    let mut count = 1;
    let mut current = latest;
    for day in &days[1..] {
        if *day == current - Duration::days(1) {
            count += 1;
            current = *day;
        } else {
            break;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn session_on(date: &str, duration: u32, completed: bool) -> MeditationSession {
        MeditationSession {
            id: MeditationSession::new_id(),
            date: date.parse().unwrap(),
            duration,
            completed,
        }
    }

    fn day(date: &str) -> NaiveDate {
        date.parse().unwrap()
    }

    #[test]
    fn empty_log_gives_seven_zero_buckets_monday_first() {
        let buckets = weekly_buckets(&[], Utc::now());
        assert_eq!(buckets.len(), 7);
        assert_eq!(buckets[0].day, Weekday::Mon);
        assert_eq!(buckets[6].day, Weekday::Sun);
        assert!(buckets.iter().all(|b| b.minutes == 0));
    }

    #[test]
    fn sessions_land_in_their_weekday_bucket() {
        // 2026-08-05 is a Wednesday; the Sunday-started week runs
        // 2026-08-02 through 2026-08-08.
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let sessions = [
            session_on("2026-08-02T08:00:00Z", 600, true),  // Sunday
            session_on("2026-08-03T08:00:00Z", 300, true),  // Monday
            session_on("2026-08-03T20:00:00Z", 300, false), // Monday again
            session_on("2026-08-05T07:00:00Z", 900, true),  // Wednesday
        ];

        let buckets = weekly_buckets(&sessions, now);
        assert_eq!(buckets[0], DayBucket { day: Weekday::Mon, minutes: 10 });
        assert_eq!(buckets[2], DayBucket { day: Weekday::Wed, minutes: 15 });
        assert_eq!(buckets[6], DayBucket { day: Weekday::Sun, minutes: 10 });
        assert_eq!(buckets[1].minutes, 0);
    }

    #[test]
    fn sessions_outside_the_window_are_ignored() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let sessions = [
            session_on("2026-08-01T08:00:00Z", 600, true), // Saturday before the window
            session_on("2026-08-09T08:00:00Z", 600, true), // Sunday after the window
        ];
        let buckets = weekly_buckets(&sessions, now);
        assert!(buckets.iter().all(|b| b.minutes == 0));
    }

    #[test]
    fn abandoned_sessions_still_count_toward_minutes() {
        let now = Utc.with_ymd_and_hms(2026, 8, 5, 12, 0, 0).unwrap();
        let sessions = [session_on("2026-08-05T07:00:00Z", 600, false)];
        assert_eq!(weekly_buckets(&sessions, now)[2].minutes, 10);
        assert_eq!(total_minutes(&sessions), 10);
    }

    #[test]
    fn partial_minutes_floor() {
        let sessions = [
            session_on("2026-08-05T07:00:00Z", 300, true), // 5 min
            session_on("2026-08-05T08:00:00Z", 150, true), // 2.5 -> 2
            session_on("2026-08-05T09:00:00Z", 900, true), // 15 min
        ];
        assert_eq!(total_minutes(&sessions), 22);
    }

    #[test]
    fn completed_count_ignores_abandoned() {
        let sessions = [
            session_on("2026-08-04T07:00:00Z", 300, true),
            session_on("2026-08-05T07:00:00Z", 300, false),
            session_on("2026-08-05T08:00:00Z", 300, true),
        ];
        assert_eq!(completed_count(&sessions), 2);
    }

    #[test]
    fn streak_of_empty_log_is_zero() {
        assert_eq!(streak(&[], day("2026-08-05")), 0);
    }

    #[test]
    fn today_and_yesterday_make_two() {
        let sessions = [
            session_on("2026-08-05T07:00:00Z", 300, true),
            session_on("2026-08-04T07:00:00Z", 300, true),
        ];
        assert_eq!(streak(&sessions, day("2026-08-05")), 2);
    }

    #[test]
    fn stale_history_breaks_the_streak() {
        let sessions = [session_on("2026-08-02T07:00:00Z", 300, true)];
        assert_eq!(streak(&sessions, day("2026-08-05")), 0);
    }

    #[test]
    fn streak_may_end_yesterday() {
        let sessions = [
            session_on("2026-08-04T07:00:00Z", 300, true),
            session_on("2026-08-03T07:00:00Z", 300, true),
        ];
        assert_eq!(streak(&sessions, day("2026-08-05")), 2);
    }

    #[test]
    fn multiple_sessions_on_one_day_count_once() {
        let sessions = [
            session_on("2026-08-05T07:00:00Z", 300, true),
            session_on("2026-08-05T21:00:00Z", 300, false),
            session_on("2026-08-04T07:00:00Z", 300, true),
        ];
        assert_eq!(streak(&sessions, day("2026-08-05")), 2);
    }

    #[test]
    fn gap_stops_the_walk() {
        let sessions = [
            session_on("2026-08-05T07:00:00Z", 300, true),
            session_on("2026-08-04T07:00:00Z", 300, true),
            // gap on the 3rd
            session_on("2026-08-02T07:00:00Z", 300, true),
        ];
        assert_eq!(streak(&sessions, day("2026-08-05")), 2);
    }

    #[test]
    fn unsorted_input_is_handled() {
        let sessions = [
            session_on("2026-08-03T07:00:00Z", 300, true),
            session_on("2026-08-05T07:00:00Z", 300, true),
            session_on("2026-08-04T07:00:00Z", 300, true),
        ];
        assert_eq!(streak(&sessions, day("2026-08-05")), 3);
    }
}
