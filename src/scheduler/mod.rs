//! Unit-count scheduling for learning plans
//!
//! Maps a learner profile (knowledge level, daily capacity, program
//! duration) to the number of learning units the plan requires, via a
//! static three-level lookup table. Combinations absent from the table
//! fall back to a fixed default rather than failing; the fallback is
//! logged and counted but invisible to callers.

use crate::models::{DailyCapacity, KnowledgeLevel, PlanDuration};

/// Unit count returned for any (level, capacity, duration) combination
/// missing from the table
pub const DEFAULT_UNIT_COUNT: u32 = 5;

/// Look up the tabulated unit count for a combination
///
/// Returns `None` for combinations outside the table (the relative
/// durations have no row).
fn lookup(level: KnowledgeLevel, capacity: DailyCapacity, duration: PlanDuration) -> Option<u32> {
    use DailyCapacity::*;
    use KnowledgeLevel::*;
    use PlanDuration::*;

    let count = match (level, capacity, duration) {
        (Basic, OneToTwoHours, OneWeek) => 7,
        (Basic, OneToTwoHours, OneMonth) => 30,
        (Basic, OneToTwoHours, ThreeMonths) => 90,
        (Basic, PartTime, OneWeek) => 14,
        (Basic, PartTime, OneMonth) => 60,
        (Basic, PartTime, ThreeMonths) => 180,
        (Basic, FullTime, OneWeek) => 40,
        (Basic, FullTime, OneMonth) => 160,
        (Basic, FullTime, ThreeMonths) => 480,

        (Broader, OneToTwoHours, OneWeek) => 6,
        (Broader, OneToTwoHours, OneMonth) => 25,
        (Broader, OneToTwoHours, ThreeMonths) => 75,
        (Broader, PartTime, OneWeek) => 12,
        (Broader, PartTime, OneMonth) => 50,
        (Broader, PartTime, ThreeMonths) => 150,
        (Broader, FullTime, OneWeek) => 35,
        (Broader, FullTime, OneMonth) => 140,
        (Broader, FullTime, ThreeMonths) => 420,

        (Profound, OneToTwoHours, OneWeek) => 5,
        (Profound, OneToTwoHours, OneMonth) => 20,
        (Profound, OneToTwoHours, ThreeMonths) => 60,
        (Profound, PartTime, OneWeek) => 10,
        (Profound, PartTime, OneMonth) => 40,
        (Profound, PartTime, ThreeMonths) => 120,
        (Profound, FullTime, OneWeek) => 30,
        (Profound, FullTime, OneMonth) => 120,
        (Profound, FullTime, ThreeMonths) => 360,

        _ => return None,
    };

    Some(count)
}

/// Number of learning units a plan requires
///
/// Table-driven; any combination outside the table resolves to
/// [`DEFAULT_UNIT_COUNT`]. The fallback never surfaces as an error, so
/// callers cannot distinguish a tabulated 5 from a defaulted 5 — the
/// warning log and the fallback counter keep it observable.
pub fn unit_count(
    level: KnowledgeLevel,
    capacity: DailyCapacity,
    duration: PlanDuration,
) -> u32 {
    match lookup(level, capacity, duration) {
        Some(count) => count,
        None => {
            tracing::warn!(
                level = %level,
                capacity = %capacity,
                duration = %duration,
                default = DEFAULT_UNIT_COUNT,
                "No scheduling table entry, using default unit count"
            );
            crate::metrics::inc_scheduler_fallback();
            DEFAULT_UNIT_COUNT
        }
    }
}

/// Calendar days covered by a duration, where defined
///
/// Estimation helper for capacity planning; relative durations have no
/// fixed day count.
pub fn duration_days(duration: PlanDuration) -> Option<u32> {
    match duration {
        PlanDuration::OneWeek => Some(7),
        PlanDuration::OneMonth => Some(30),
        PlanDuration::ThreeMonths => Some(90),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_one_week_light() {
        assert_eq!(
            unit_count(
                KnowledgeLevel::Basic,
                DailyCapacity::OneToTwoHours,
                PlanDuration::OneWeek
            ),
            7
        );
    }

    #[test]
    fn test_profound_three_months_full_time() {
        assert_eq!(
            unit_count(
                KnowledgeLevel::Profound,
                DailyCapacity::FullTime,
                PlanDuration::ThreeMonths
            ),
            360
        );
    }

    #[test]
    fn test_full_table() {
        // Every tabulated combination, row by row
        let expected: &[(KnowledgeLevel, [[u32; 3]; 3])] = &[
            (KnowledgeLevel::Basic, [[7, 30, 90], [14, 60, 180], [40, 160, 480]]),
            (KnowledgeLevel::Broader, [[6, 25, 75], [12, 50, 150], [35, 140, 420]]),
            (KnowledgeLevel::Profound, [[5, 20, 60], [10, 40, 120], [30, 120, 360]]),
        ];
        let capacities = DailyCapacity::all();
        let durations = [
            PlanDuration::OneWeek,
            PlanDuration::OneMonth,
            PlanDuration::ThreeMonths,
        ];

        for (level, rows) in expected {
            for (ci, capacity) in capacities.iter().enumerate() {
                for (di, duration) in durations.iter().enumerate() {
                    assert_eq!(
                        unit_count(*level, *capacity, *duration),
                        rows[ci][di],
                        "{level} / {capacity} / {duration}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_untabulated_duration_defaults() {
        for level in KnowledgeLevel::all() {
            for capacity in DailyCapacity::all() {
                for duration in [
                    PlanDuration::ShortTerm,
                    PlanDuration::MediumTerm,
                    PlanDuration::LongTerm,
                ] {
                    assert_eq!(unit_count(level, capacity, duration), DEFAULT_UNIT_COUNT);
                }
            }
        }
    }

    #[test]
    fn test_duration_days() {
        assert_eq!(duration_days(PlanDuration::OneWeek), Some(7));
        assert_eq!(duration_days(PlanDuration::OneMonth), Some(30));
        assert_eq!(duration_days(PlanDuration::ThreeMonths), Some(90));
        assert_eq!(duration_days(PlanDuration::LongTerm), None);
    }
}
