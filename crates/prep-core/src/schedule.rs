//! The study schedule value type.
//!
//! A schedule is an ordered mapping from day labels (`"Day 1"`, `"Day 2"`,
//! ...) to time-boxed study sessions. The JSON shape is the contract shared
//! with the remote AI generator: whatever source produced a schedule, the
//! renderer sees the same day-keyed map. Internally days are keyed by
//! number so that ordering stays correct past `"Day 9"`.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One time-boxed study session within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    /// Topic name
    pub topic: String,
    /// Allocated study time in minutes
    pub duration: u32,
    /// Explanation of why this slot was allocated
    pub reason: String,
}

/// A day-keyed study plan.
///
/// Serializes as `{"Day 1": [{"topic": ..., "duration": ..., "reason": ...}], ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    days: BTreeMap<u32, Vec<StudySession>>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session list for a day (1-based).
    pub fn insert_day(&mut self, day: u32, sessions: Vec<StudySession>) {
        self.days.insert(day, sessions);
    }

    /// Sessions for a day, if the schedule covers it.
    pub fn day(&self, day: u32) -> Option<&[StudySession]> {
        self.days.get(&day).map(Vec::as_slice)
    }

    /// Iterate over days in ascending order.
    pub fn days(&self) -> impl Iterator<Item = (u32, &[StudySession])> {
        self.days.iter().map(|(day, sessions)| (*day, sessions.as_slice()))
    }

    pub fn num_days(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether every day stays within the given per-day minute budget.
    pub fn fits_budget(&self, minutes_per_day: u32) -> bool {
        self.days
            .values()
            .all(|sessions| sessions.iter().map(|s| s.duration).sum::<u32>() <= minutes_per_day)
    }

    /// The wire label for a day number.
    pub fn day_label(day: u32) -> String {
        format!("Day {day}")
    }

    /// Parse a `"Day N"` label back into its day number (N >= 1).
    pub fn parse_day_label(label: &str) -> Option<u32> {
        let n: u32 = label.strip_prefix("Day ")?.parse().ok()?;
        if n >= 1 { Some(n) } else { None }
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.days.len()))?;
        for (day, sessions) in &self.days {
            map.serialize_entry(&Self::day_label(*day), sessions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ScheduleVisitor;

        impl<'de> Visitor<'de> for ScheduleVisitor {
            type Value = Schedule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of \"Day N\" labels to session lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Schedule, A::Error> {
                let mut schedule = Schedule::new();
                while let Some((label, sessions)) =
                    access.next_entry::<String, Vec<StudySession>>()?
                {
                    let day = Schedule::parse_day_label(&label).ok_or_else(|| {
                        serde::de::Error::custom(format!("invalid day label: {label:?}"))
                    })?;
                    schedule.insert_day(day, sessions);
                }
                Ok(schedule)
            }
        }

        deserializer.deserialize_map(ScheduleVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(topic: &str, duration: u32) -> StudySession {
        StudySession {
            topic: topic.to_string(),
            duration,
            reason: "test".to_string(),
        }
    }

    #[test]
    fn test_day_label_round_trip() {
        assert_eq!(Schedule::day_label(1), "Day 1");
        assert_eq!(Schedule::parse_day_label("Day 1"), Some(1));
        assert_eq!(Schedule::parse_day_label("Day 12"), Some(12));
        assert_eq!(Schedule::parse_day_label("Day 0"), None);
        assert_eq!(Schedule::parse_day_label("day 1"), None);
        assert_eq!(Schedule::parse_day_label("Monday"), None);
    }

    #[test]
    fn test_serializes_with_day_labels_in_order() {
        let mut schedule = Schedule::new();
        schedule.insert_day(2, vec![session("B", 30)]);
        schedule.insert_day(1, vec![session("A", 60)]);

        let json = serde_json::to_string(&schedule).unwrap();
        assert_eq!(
            json,
            "{\"Day 1\":[{\"topic\":\"A\",\"duration\":60,\"reason\":\"test\"}],\
             \"Day 2\":[{\"topic\":\"B\",\"duration\":30,\"reason\":\"test\"}]}"
        );
    }

    #[test]
    fn test_deserializes_wire_shape() {
        let json = r#"{"Day 1":[{"topic":"A","duration":45,"reason":"r"}],"Day 2":[]}"#;
        let schedule: Schedule = serde_json::from_str(json).unwrap();
        assert_eq!(schedule.num_days(), 2);
        assert_eq!(schedule.day(1).unwrap()[0].topic, "A");
        assert!(schedule.day(2).unwrap().is_empty());
    }

    #[test]
    fn test_rejects_foreign_day_labels() {
        let json = r#"{"Monday":[]}"#;
        assert!(serde_json::from_str::<Schedule>(json).is_err());
    }

    #[test]
    fn test_orders_past_day_nine() {
        let mut schedule = Schedule::new();
        schedule.insert_day(10, vec![]);
        schedule.insert_day(2, vec![]);
        let days: Vec<u32> = schedule.days().map(|(d, _)| d).collect();
        assert_eq!(days, vec![2, 10]);
    }

    #[test]
    fn test_fits_budget() {
        let mut schedule = Schedule::new();
        schedule.insert_day(1, vec![session("A", 60), session("B", 45)]);
        assert!(schedule.fits_budget(120));
        assert!(schedule.fits_budget(105));
        assert!(!schedule.fits_budget(100));
    }
}
