//! Dashboard statistics.

use crate::model::progress::{PracticeStep, ProgressRecord};
use crate::model::verse::Verse;
use chrono::{DateTime, NaiveDate, TimeZone};
use std::collections::HashMap;

/// Counters shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DashboardStats {
    pub total: usize,
    /// Verses with progress that are not yet mastered.
    pub in_progress: usize,
    pub mastered: usize,
    /// 2 when something was practiced today and yesterday, 1 for today only.
    pub current_streak: u32,
    pub has_studied_today: bool,
}

impl DashboardStats {
    /// Computes counters for `verses`. Records of unknown verses are ignored.
    pub fn compute<Tz: TimeZone>(
        verses: &[Verse],
        records: &[ProgressRecord],
        now: &DateTime<Tz>,
    ) -> Self {
        let by_verse: HashMap<&str, &ProgressRecord> = records
            .iter()
            .map(|record| (record.verse_id.as_str(), record))
            .collect();
        let tracked: Vec<&ProgressRecord> = verses
            .iter()
            .filter_map(|verse| by_verse.get(verse.id.as_str()).copied())
            .collect();

        let mastered = tracked
            .iter()
            .filter(|record| record.current_step.is_mastered())
            .count();

        let today = now.date_naive();
        let yesterday = today.pred_opt();
        let zone = now.timezone();
        let practiced_on = |day: Option<NaiveDate>| {
            tracked.iter().any(|record| {
                Some(record.last_practiced.with_timezone(&zone).date_naive()) == day
            })
        };
        let has_studied_today = practiced_on(Some(today));
        let has_studied_yesterday = practiced_on(yesterday);

        let current_streak = match (has_studied_today, has_studied_yesterday) {
            (true, true) => 2,
            (true, false) => 1,
            (false, _) => 0,
        };

        Self {
            total: verses.len(),
            in_progress: tracked.len() - mastered,
            mastered,
            current_streak,
            has_studied_today,
        }
    }
}

/// Verse-list progress bar value: `(marker + 1) / 4 * 100`.
///
/// Verses without progress count as Reading. Mastered (marker 4) yields 125.
pub fn step_percentage(step: Option<PracticeStep>) -> f64 {
    let marker = step.unwrap_or(PracticeStep::Reading).marker();
    (f64::from(marker) + 1.0) / 4.0 * 100.0
}

#[cfg(test)]
mod tests {
    use super::{step_percentage, DashboardStats};
    use crate::model::progress::{PracticeStep, ProgressRecord};
    use crate::model::verse::Verse;
    use chrono::{TimeZone, Utc};

    fn verse(id: &str) -> Verse {
        Verse::with_id(
            id,
            "Ref",
            "Text",
            None,
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn counts_in_progress_and_mastered_only_for_tracked_verses() {
        let verses = vec![verse("a"), verse("b"), verse("c")];
        let day = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let mut mastered = ProgressRecord::new("b", day);
        mastered.current_step = PracticeStep::Mastered;
        let records = vec![
            ProgressRecord::new("a", day),
            mastered,
            ProgressRecord::new("orphan", day),
        ];

        let stats = DashboardStats::compute(&verses, &records, &day);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.in_progress, 1);
        assert_eq!(stats.mastered, 1);
        assert_eq!(stats.current_streak, 1);
        assert!(stats.has_studied_today);
    }

    #[test]
    fn streak_is_two_when_practiced_today_and_yesterday() {
        let verses = vec![verse("a"), verse("b")];
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2024, 5, 9, 23, 0, 0).unwrap();
        let records = vec![
            ProgressRecord::new("a", now),
            ProgressRecord::new("b", yesterday),
        ];

        let stats = DashboardStats::compute(&verses, &records, &now);
        assert_eq!(stats.current_streak, 2);
    }

    #[test]
    fn streak_is_zero_without_practice_today() {
        let verses = vec![verse("a")];
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 8, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2024, 5, 9, 8, 0, 0).unwrap();
        let records = vec![ProgressRecord::new("a", yesterday)];

        let stats = DashboardStats::compute(&verses, &records, &now);
        assert_eq!(stats.current_streak, 0);
        assert!(!stats.has_studied_today);
    }

    #[test]
    fn step_percentage_matches_badge_scale() {
        assert!((step_percentage(None) - 25.0).abs() < f64::EPSILON);
        assert!((step_percentage(Some(PracticeStep::Review)) - 75.0).abs() < f64::EPSILON);
        assert!((step_percentage(Some(PracticeStep::Mastered)) - 125.0).abs() < f64::EPSILON);
    }
}
