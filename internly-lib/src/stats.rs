//! Aggregation over fetched intern records.
//!
//! Everything here is a pure function over an in-memory snapshot,
//! recomputed on every call. At the portal's record volumes a full rescan
//! per render is fine; nothing is cached or maintained incrementally.

use chrono::{DateTime, Utc};

use crate::repository::InternRecord;

const MILLIS_PER_DAY: i64 = 86_400_000;
const RECENT_INTERN_COUNT: usize = 5;

/// Stable ascending sort by effective join date. Missing or unreadable
/// dates collapse to the epoch and sort first; ties keep fetch order.
pub fn sort_by_join_date(records: &mut [InternRecord]) {
    records.sort_by_key(|record| record.effective_join_date());
}

/// Leaderboard rows, earliest joiner first.
///
/// Ties follow fetch order, which the store does not guarantee stable
/// between calls.
pub fn leaderboard_order(mut records: Vec<InternRecord>) -> Vec<InternRecord> {
    sort_by_join_date(&mut records);
    records
}

/// The admin view's headline numbers.
#[derive(Debug, Clone, Default)]
pub struct SummaryStats {
    pub total_interns: usize,
    pub total_donations: f64,
    /// Zero when there are no records.
    pub average_donations: f64,
    pub top_performer: Option<InternRecord>,
    /// Despite the name, these are the five *earliest* joiners: the
    /// original dashboard sorted ascending and the label stuck.
    pub recent_interns: Vec<InternRecord>,
}

pub fn summary_stats(records: &[InternRecord]) -> SummaryStats {
    let total_donations: f64 = records.iter().map(|record| record.donations_raised).sum();
    let average_donations = if records.is_empty() {
        0.0
    } else {
        total_donations / records.len() as f64
    };

    let mut recent_interns = records.to_vec();
    sort_by_join_date(&mut recent_interns);
    recent_interns.truncate(RECENT_INTERN_COUNT);

    SummaryStats {
        total_interns: records.len(),
        total_donations,
        average_donations,
        top_performer: top_performer(records).cloned(),
        recent_interns,
    }
}

/// The record with the highest donation total.
///
/// Ties go to the earliest readable join date. A candidate whose date
/// cannot be read never displaces the incumbent, so among unreadable dates
/// the first one fetched wins.
pub fn top_performer(records: &[InternRecord]) -> Option<&InternRecord> {
    let max = records
        .iter()
        .map(|record| record.donations_raised)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut best: Option<&InternRecord> = None;
    for candidate in records
        .iter()
        .filter(|record| record.donations_raised == max)
    {
        match best {
            None => best = Some(candidate),
            Some(current) => {
                if let (Some(challenger), Some(incumbent)) =
                    (candidate.parsed_join_date(), current.parsed_join_date())
                    && challenger < incumbent
                {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}

/// Whole days since the record's effective join date. Negative when the
/// date is in the future; not clamped.
pub fn days_since_joining(record: &InternRecord, now: DateTime<Utc>) -> i64 {
    let elapsed = now.timestamp_millis() - record.effective_join_date().timestamp_millis();
    elapsed.div_euclid(MILLIS_PER_DAY)
}

#[cfg(test)]
mod test {
    use chrono::Duration;

    use super::*;
    use crate::repository::JoinDate;

    fn record(id: &str, donations: f64, joining_date: Option<JoinDate>) -> InternRecord {
        InternRecord {
            id: id.to_string(),
            name: id.to_string(),
            username: id.to_string(),
            password: String::new(),
            referral_code: String::new(),
            donations_raised: donations,
            joining_date,
        }
    }

    fn text_date(date: &str) -> Option<JoinDate> {
        Some(JoinDate::Text(date.to_string()))
    }

    #[test]
    fn test_empty_record_set() {
        let stats = summary_stats(&[]);

        assert_eq!(stats.total_interns, 0);
        assert_eq!(stats.total_donations, 0.0);
        assert_eq!(stats.average_donations, 0.0);
        assert_eq!(stats.top_performer, None);
        assert!(stats.recent_interns.is_empty());
    }

    #[test]
    fn test_average_is_total_over_count() {
        let records = vec![
            record("a", 100.0, text_date("2024-01-01")),
            record("b", 200.0, text_date("2024-01-02")),
            record("c", 450.0, text_date("2024-01-03")),
        ];

        let stats = summary_stats(&records);

        assert_eq!(stats.total_donations, 750.0);
        assert_eq!(stats.average_donations, 250.0);
        assert_eq!(stats.total_interns, 3);
    }

    #[test]
    fn test_leaderboard_is_nondecreasing_by_join_date() {
        let records = vec![
            record("a", 10.0, text_date("2024-05-01")),
            record("b", 20.0, text_date("2023-12-01")),
            record("c", 30.0, None),
            record("d", 40.0, text_date("2024-02-14")),
        ];

        let ordered = leaderboard_order(records);

        let dates: Vec<_> = ordered
            .iter()
            .map(InternRecord::effective_join_date)
            .collect();
        assert!(dates.is_sorted());
        // The missing date sorts as the epoch, ahead of everyone.
        assert_eq!(ordered.first().unwrap().id, "c");
    }

    #[test]
    fn test_top_performer_has_max_donations() {
        let records = vec![
            record("a", 100.0, text_date("2024-01-01")),
            record("b", 900.0, text_date("2024-01-02")),
            record("c", 400.0, text_date("2024-01-03")),
        ];

        let top = top_performer(&records).unwrap();
        assert_eq!(top.id, "b");
        assert_eq!(top.donations_raised, 900.0);
    }

    #[test]
    fn test_top_performer_tie_goes_to_earliest_joiner() {
        let records = vec![
            record("a", 100.0, text_date("2024-01-01")),
            record("b", 500.0, text_date("2024-02-01")),
            record("c", 500.0, text_date("2023-12-01")),
        ];

        assert_eq!(top_performer(&records).unwrap().id, "c");
    }

    #[test]
    fn test_top_performer_unreadable_dates_keep_first_candidate() {
        let records = vec![
            record("a", 500.0, text_date("garbage")),
            record("b", 500.0, text_date("also garbage")),
        ];

        assert_eq!(top_performer(&records).unwrap().id, "a");
    }

    #[test]
    fn test_recent_interns_are_first_five_earliest() {
        let records: Vec<_> = (1..=7)
            .map(|day| {
                record(
                    &format!("i{day}"),
                    0.0,
                    text_date(&format!("2024-01-{day:02}")),
                )
            })
            .rev()
            .collect();

        let stats = summary_stats(&records);

        let ids: Vec<_> = stats
            .recent_interns
            .iter()
            .map(|record| record.id.as_str())
            .collect();
        assert_eq!(ids, ["i1", "i2", "i3", "i4", "i5"]);
    }

    #[test]
    fn test_days_since_joining_round_trips() {
        let now = Utc::now();

        for days in [0i64, 1, 45] {
            let joined = now - Duration::days(days);
            let rec = record("a", 0.0, Some(JoinDate::Timestamp(joined)));
            assert_eq!(days_since_joining(&rec, now), days);
        }
    }

    #[test]
    fn test_days_since_joining_negative_for_future_dates() {
        let now = Utc::now();
        let joined = now + Duration::days(3);
        let rec = record("a", 0.0, Some(JoinDate::Timestamp(joined)));

        assert_eq!(days_since_joining(&rec, now), -3);
    }
}
