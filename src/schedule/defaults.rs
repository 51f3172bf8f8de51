use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::Bowl;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DefaultSlot {
    pub start_time: &'static str,
    pub end_time: &'static str,
}

const fn slot(start_time: &'static str, end_time: &'static str) -> DefaultSlot {
    DefaultSlot {
        start_time,
        end_time,
    }
}

static MIDWEEK_LOWER: [DefaultSlot; 4] = [
    slot("17:00", "20:00"),
    slot("20:00", "22:00"),
    slot("22:00", "00:00"),
    slot("00:00", "02:30"),
];

static MIDWEEK_UPPER: [DefaultSlot; 4] = [
    slot("18:00", "20:30"),
    slot("20:30", "22:30"),
    slot("22:30", "00:30"),
    slot("00:30", "02:30"),
];

static SATURDAY_LOWER: [DefaultSlot; 5] = [
    slot("12:00", "18:00"),
    slot("18:00", "20:00"),
    slot("20:00", "22:00"),
    slot("22:00", "00:00"),
    slot("00:00", "02:30"),
];

static SATURDAY_UPPER: [DefaultSlot; 6] = [
    slot("14:00", "16:00"),
    slot("16:00", "18:00"),
    slot("18:00", "20:00"),
    slot("20:00", "22:00"),
    slot("22:00", "00:00"),
    slot("00:00", "02:30"),
];

static SUNDAY_LOWER: [DefaultSlot; 4] = [
    slot("12:00", "18:00"),
    slot("18:00", "20:00"),
    slot("20:00", "22:00"),
    slot("22:00", "00:30"),
];

static SUNDAY_UPPER: [DefaultSlot; 2] = [slot("14:00", "16:00"), slot("16:00", "18:00")];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DayCategory {
    Midweek,
    Saturday,
    Sunday,
}

impl DayCategory {
    /// Wednesday to Friday are midweek. Monday and Tuesday have no grid of
    /// their own and reuse the midweek one.
    pub fn for_date(date: NaiveDate) -> Self {
        match date.weekday().num_days_from_sunday() {
            6 => DayCategory::Saturday,
            0 => DayCategory::Sunday,
            _ => DayCategory::Midweek,
        }
    }
}

/// Slots in declaration order; the order is part of the contract and is never re-sorted.
pub fn default_slots(date: NaiveDate, bowl: Bowl) -> &'static [DefaultSlot] {
    match (DayCategory::for_date(date), bowl) {
        (DayCategory::Midweek, Bowl::Lower) => &MIDWEEK_LOWER,
        (DayCategory::Midweek, Bowl::Upper) => &MIDWEEK_UPPER,
        (DayCategory::Saturday, Bowl::Lower) => &SATURDAY_LOWER,
        (DayCategory::Saturday, Bowl::Upper) => &SATURDAY_UPPER,
        (DayCategory::Sunday, Bowl::Lower) => &SUNDAY_LOWER,
        (DayCategory::Sunday, Bowl::Upper) => &SUNDAY_UPPER,
    }
}

/// Untyped lookup: an unknown bowl yields no slots.
pub fn slots_for(date: NaiveDate, bowl: &str) -> &'static [DefaultSlot] {
    match bowl.parse::<Bowl>() {
        Ok(bowl) => default_slots(date, bowl),
        Err(_) => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn pairs(slots: &[DefaultSlot]) -> Vec<(&str, &str)> {
        slots.iter().map(|s| (s.start_time, s.end_time)).collect()
    }

    #[test]
    fn wednesday_lower() {
        // 2025-12-03 is a Wednesday.
        assert_eq!(
            pairs(slots_for(ymd(2025, 12, 3), "lower")),
            [
                ("17:00", "20:00"),
                ("20:00", "22:00"),
                ("22:00", "00:00"),
                ("00:00", "02:30")
            ]
        );
    }

    #[test]
    fn saturday_lower_starts_at_noon() {
        let slots = slots_for(ymd(2025, 12, 6), "lower");
        assert_eq!(slots.len(), 5);
        assert_eq!(pairs(slots)[0], ("12:00", "18:00"));
    }

    #[test]
    fn sunday_upper_is_afternoon_only() {
        let slots = default_slots(ymd(2025, 12, 7), Bowl::Upper);
        assert_eq!(pairs(slots), [("14:00", "16:00"), ("16:00", "18:00")]);
    }

    #[test]
    fn monday_and_tuesday_use_midweek() {
        let monday = ymd(2025, 12, 1);
        let tuesday = ymd(2025, 12, 2);
        assert_eq!(DayCategory::for_date(monday), DayCategory::Midweek);
        assert_eq!(DayCategory::for_date(tuesday), DayCategory::Midweek);
        assert_eq!(
            default_slots(monday, Bowl::Upper),
            default_slots(ymd(2025, 12, 5), Bowl::Upper)
        );
    }

    #[test]
    fn unknown_bowl_has_no_slots() {
        assert!(slots_for(ymd(2025, 12, 3), "garden").is_empty());
    }

    #[test]
    fn after_midnight_slots_stay_in_declared_order() {
        let slots = default_slots(ymd(2025, 12, 4), Bowl::Upper);
        assert_eq!(slots.last().unwrap().start_time, "00:30");
    }
}
