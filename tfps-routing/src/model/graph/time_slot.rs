use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

pub const SLOT_MINUTES: u32 = 15;
pub const SLOTS_PER_DAY: u8 = 96;

const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// one of the 96 fifteen-minute buckets of a day. displayed and parsed
/// as the time of day, `HH:MM`.
#[derive(
    Debug, Default, Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Deserialize, Serialize, Hash,
)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot(u8);

impl TimeSlot {
    pub fn new(index: u8) -> Result<TimeSlot, String> {
        if index < SLOTS_PER_DAY {
            Ok(TimeSlot(index))
        } else {
            Err(format!(
                "time slot index {index} is outside of [0, {SLOTS_PER_DAY})"
            ))
        }
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    /// minutes since midnight at the start of this slot
    pub fn start_minutes(&self) -> u32 {
        self.0 as u32 * SLOT_MINUTES
    }

    pub fn from_minutes(minutes_since_midnight: u32) -> Result<TimeSlot, String> {
        let index = minutes_since_midnight / SLOT_MINUTES;
        u8::try_from(index)
            .map_err(|_| format!("{minutes_since_midnight} minutes is not within a day"))
            .and_then(TimeSlot::new)
    }

    /// all slots of the day, in order
    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (0..SLOTS_PER_DAY).map(TimeSlot)
    }
}

impl Display for TimeSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let minutes = self.start_minutes();
        write!(f, "{:02}:{:02}", minutes / 60, minutes % 60)
    }
}

impl FromStr for TimeSlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let time = TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
            .ok_or_else(|| format!("'{trimmed}' is not a time of day in HH:MM format"))?;
        TimeSlot::from_minutes(time.hour() * 60 + time.minute())
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(value: TimeSlot) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeSlot, SLOTS_PER_DAY};

    #[test]
    fn parse_floors_to_slot() {
        let cases = [
            ("00:00", 0),
            ("00:14", 0),
            ("00:15", 1),
            ("08:15", 33),
            ("08:29", 33),
            ("23:59", 95),
            ("12:07:45", 48),
        ];
        for (input, expected) in cases {
            let slot: TimeSlot = input.parse().unwrap_or_else(|e| panic!("{e}"));
            assert_eq!(slot.index(), expected, "slot for {input}");
        }
    }

    #[test]
    fn parse_rejects_invalid_times() {
        for bad in ["24:00", "25:10", "12:60", "noon", "", "12", "-1:00"] {
            assert!(bad.parse::<TimeSlot>().is_err(), "'{bad}' should not parse");
        }
    }

    #[test]
    fn display_is_slot_start() {
        let slot: TimeSlot = "17:44".parse().expect("should parse");
        assert_eq!(slot.to_string(), "17:30");
        assert_eq!(TimeSlot::new(0).expect("valid").to_string(), "00:00");
        assert_eq!(TimeSlot::new(95).expect("valid").to_string(), "23:45");
    }

    #[test]
    fn all_slots_cover_the_day() {
        let slots = TimeSlot::all().collect::<Vec<_>>();
        assert_eq!(slots.len(), SLOTS_PER_DAY as usize);
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
        assert!(TimeSlot::new(SLOTS_PER_DAY).is_err());
    }
}
