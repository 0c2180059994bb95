use std::{collections::BTreeSet, fmt, str::FromStr};

/// Concrete day of week, ordered the way the week is displayed (Sunday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Day {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Day {
    pub const WEEK: [Day; 7] = [
        Day::Sun,
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Sun => "Sun",
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, Day::Sat | Day::Sun)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable chip in the repeat row: either the "Daily" sentinel or one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayTag {
    Daily,
    Day(Day),
}

impl FromStr for DayTag {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Daily" {
            return Ok(DayTag::Daily);
        }

        Day::WEEK
            .into_iter()
            .find(|day| day.as_str() == s)
            .map(DayTag::Day)
            .ok_or_else(|| anyhow::anyhow!("Unknown day tag {s:?}"))
    }
}

/// Between one and six concrete days in week order. Only [`RepeatDays`]
/// builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySet(BTreeSet<Day>);

impl DaySet {
    pub fn iter(&self) -> impl Iterator<Item = Day> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, day: Day) -> bool {
        self.0.contains(&day)
    }
}

/// Repeat schedule of an alarm.
///
/// An empty or full week is represented as `Daily`, so "Daily" never
/// coexists with a concrete day.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RepeatDays {
    #[default]
    Daily,
    Days(DaySet),
}

impl RepeatDays {
    pub fn from_days(days: impl IntoIterator<Item = Day>) -> Self {
        Self::collapse(days.into_iter().collect())
    }

    /// Normalizes raw tags such as `["Mon", "Daily"]`.
    pub fn from_tags<S: AsRef<str>>(tags: &[S]) -> anyhow::Result<Self> {
        let mut days = BTreeSet::new();
        for tag in tags {
            match tag.as_ref().parse::<DayTag>()? {
                DayTag::Daily => return Ok(RepeatDays::Daily),
                DayTag::Day(day) => {
                    days.insert(day);
                }
            }
        }

        Ok(Self::collapse(days))
    }

    fn collapse(days: BTreeSet<Day>) -> Self {
        if days.is_empty() || days.len() == Day::WEEK.len() {
            RepeatDays::Daily
        } else {
            RepeatDays::Days(DaySet(days))
        }
    }

    pub fn is_daily(&self) -> bool {
        matches!(self, RepeatDays::Daily)
    }

    /// Whether the chip for `day` is highlighted. Concrete chips are never
    /// highlighted while "Daily" is selected.
    pub fn contains(&self, day: Day) -> bool {
        match self {
            RepeatDays::Daily => false,
            RepeatDays::Days(days) => days.contains(day),
        }
    }

    pub fn tags(&self) -> Vec<&'static str> {
        match self {
            RepeatDays::Daily => vec!["Daily"],
            RepeatDays::Days(days) => days.iter().map(|day| day.as_str()).collect(),
        }
    }

    pub fn toggle(&self, tag: DayTag) -> Self {
        let day = match tag {
            DayTag::Daily => return RepeatDays::Daily,
            DayTag::Day(day) => day,
        };

        let mut days = match self {
            RepeatDays::Daily => BTreeSet::new(),
            RepeatDays::Days(days) => days.0.clone(),
        };

        if !days.remove(&day) {
            days.insert(day);
        }

        Self::collapse(days)
    }

    pub fn summary(&self) -> String {
        let days = match self {
            RepeatDays::Daily => return "Daily".to_owned(),
            RepeatDays::Days(DaySet(days)) => days,
        };

        if days.len() == 5 && days.iter().all(|day| !day.is_weekend()) {
            "Weekdays".to_owned()
        } else if days.len() == 2 && days.iter().all(Day::is_weekend) {
            "Weekends".to_owned()
        } else {
            days.iter()
                .map(Day::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}
