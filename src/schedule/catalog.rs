//! Static bell schedules: which periods a class has on which weekday.
//!
//! The catalog is the single source of truth for turning a period ordinal
//! into a concrete time window. Both the slot resolver and the interval
//! injector go through [`periods_for`], so they always agree.
//!
//! Three profiles exist:
//!
//! - **Lyceum** (`lssa`): one uniform day for every weekday.
//! - **First year** (`first_year`): long periods on Wednesday and Friday,
//!   shorter periods with two recesses on Monday, Tuesday and Thursday.
//! - **Standard** (`standard`): shorter periods with two recesses on
//!   Tuesday and Thursday, long periods with one recess on the other days.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::class_label::ClassLabel;
use crate::error::Error;
use crate::rules::{first_match, Rule};
use crate::schedule::time::ClockTime;

/// A school weekday, Monday through Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Weekday {
    /// Lunedì
    Monday = 1,
    /// Martedì
    Tuesday = 2,
    /// Mercoledì
    Wednesday = 3,
    /// Giovedì
    Thursday = 4,
    /// Venerdì
    Friday = 5,
    /// Sabato
    Saturday = 6,
}

/// Day names as they appear in timetable headers, full and abbreviated.
const DAY_NAMES: &[(&str, Weekday)] = &[
    ("lunedì", Weekday::Monday),
    ("lunedi", Weekday::Monday),
    ("lun", Weekday::Monday),
    ("martedì", Weekday::Tuesday),
    ("martedi", Weekday::Tuesday),
    ("mar", Weekday::Tuesday),
    ("mercoledì", Weekday::Wednesday),
    ("mercoledi", Weekday::Wednesday),
    ("mer", Weekday::Wednesday),
    ("giovedì", Weekday::Thursday),
    ("giovedi", Weekday::Thursday),
    ("gio", Weekday::Thursday),
    ("venerdì", Weekday::Friday),
    ("venerdi", Weekday::Friday),
    ("ven", Weekday::Friday),
    ("sabato", Weekday::Saturday),
    ("sab", Weekday::Saturday),
];

impl Weekday {
    /// All weekdays in order.
    pub const ALL: [Weekday; 6] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Weekday number, 1 (Monday) to 6 (Saturday).
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Weekday for a number in 1..=6.
    pub fn from_number(n: u8) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i as usize).copied())
    }

    /// Weekday for a timetable column; column 0 holds period labels.
    pub fn from_column(col: usize) -> Option<Self> {
        u8::try_from(col).ok().and_then(Self::from_number)
    }

    /// Weekday for an Italian day name such as "Lunedì", "Mar" or "GIO".
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        DAY_NAMES.iter().find(|(n, _)| *n == name).map(|(_, day)| *day)
    }
}

impl From<Weekday> for u8 {
    fn from(day: Weekday) -> u8 {
        day.number()
    }
}

impl TryFrom<u8> for Weekday {
    type Error = Error;

    fn try_from(n: u8) -> Result<Self, Error> {
        Self::from_number(n).ok_or(Error::InvalidWeekday(n))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Weekday::Monday => "Lunedì",
            Weekday::Tuesday => "Martedì",
            Weekday::Wednesday => "Mercoledì",
            Weekday::Thursday => "Giovedì",
            Weekday::Friday => "Venerdì",
            Weekday::Saturday => "Sabato",
        };
        f.write_str(name)
    }
}

/// What a period is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// A teaching period, numbered from 1
    Lesson(u8),
    /// A recess, numbered from 1 within the day
    Recess(u8),
}

/// One time slot of a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    /// Lesson ordinal or recess tag
    pub slot: Slot,
    /// Start time (inclusive)
    pub start: ClockTime,
    /// End time (exclusive)
    pub end: ClockTime,
}

impl Period {
    const fn lesson(ordinal: u8, start: ClockTime, end: ClockTime) -> Self {
        Self {
            slot: Slot::Lesson(ordinal),
            start,
            end,
        }
    }

    const fn recess(tag: u8, start: ClockTime, end: ClockTime) -> Self {
        Self {
            slot: Slot::Recess(tag),
            start,
            end,
        }
    }

    /// True if this period is a recess.
    pub fn is_recess(&self) -> bool {
        matches!(self.slot, Slot::Recess(_))
    }
}

/// Ordered periods of one weekday-group variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySchedule {
    periods: &'static [Period],
}

impl DaySchedule {
    /// All periods, recesses included, sorted by start time.
    pub fn periods(&self) -> &'static [Period] {
        self.periods
    }

    /// The teaching period with the given ordinal.
    pub fn lesson(&self, ordinal: u8) -> Option<&'static Period> {
        self.periods.iter().find(|p| p.slot == Slot::Lesson(ordinal))
    }

    /// Recess periods in day order.
    pub fn recesses(&self) -> impl Iterator<Item = &'static Period> {
        self.periods.iter().filter(|p| p.is_recess())
    }

    /// Number of teaching periods.
    pub fn lesson_count(&self) -> usize {
        self.periods.iter().filter(|p| !p.is_recess()).count()
    }
}

const fn t(hours: u8, minutes: u8) -> ClockTime {
    ClockTime::new(hours, minutes)
}

/// Six long periods with one 20-minute recess after the third.
const LONG_DAY: DaySchedule = DaySchedule {
    periods: &[
        Period::lesson(1, t(7, 50), t(8, 50)),
        Period::lesson(2, t(8, 50), t(9, 45)),
        Period::lesson(3, t(9, 45), t(10, 40)),
        Period::recess(1, t(10, 40), t(11, 0)),
        Period::lesson(4, t(11, 0), t(11, 55)),
        Period::lesson(5, t(11, 55), t(12, 50)),
        Period::lesson(6, t(12, 50), t(13, 40)),
    ],
};

/// Seven shorter periods with two recesses.
const SHORT_DAY: DaySchedule = DaySchedule {
    periods: &[
        Period::lesson(1, t(7, 50), t(8, 45)),
        Period::lesson(2, t(8, 45), t(9, 35)),
        Period::lesson(3, t(9, 35), t(10, 25)),
        Period::recess(1, t(10, 25), t(10, 30)),
        Period::lesson(4, t(10, 30), t(11, 20)),
        Period::lesson(5, t(11, 20), t(12, 10)),
        Period::recess(2, t(12, 10), t(12, 20)),
        Period::lesson(6, t(12, 20), t(13, 10)),
        Period::lesson(7, t(13, 10), t(14, 0)),
    ],
};

/// Weekday grouping within a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeekdayGroup {
    /// Every weekday
    All,
    /// Monday, Wednesday, Friday (and Saturday)
    MonWedFri,
    /// Tuesday, Thursday
    TueThu,
    /// Wednesday, Friday
    WedFri,
    /// Monday, Tuesday, Thursday (and Saturday)
    MonTueThu,
}

impl WeekdayGroup {
    /// The day schedule used by this group.
    pub fn day_schedule(self) -> DaySchedule {
        match self {
            WeekdayGroup::All | WeekdayGroup::MonWedFri | WeekdayGroup::WedFri => LONG_DAY,
            WeekdayGroup::TueThu | WeekdayGroup::MonTueThu => SHORT_DAY,
        }
    }
}

/// Bell-schedule profile of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Profile {
    /// Scientific lyceum: one uniform day
    #[serde(rename = "lssa")]
    Lyceum,
    /// First-year technical classes
    #[serde(rename = "first_year")]
    FirstYear,
    /// Everybody else
    #[serde(rename = "standard")]
    Standard,
}

/// Specializations whose first-year classes follow [`Profile::FirstYear`].
const FIRST_YEAR_SPECIALIZATIONS: &[&str] = &["ELT", "INF", "MEC"];

/// How a profile rule inspects the upper-cased label text.
#[derive(Debug, Clone, Copy)]
enum LabelTest {
    ContainsAny(&'static [&'static str]),
    FirstYearOf(&'static [&'static str]),
}

impl LabelTest {
    fn matches(&self, label: &str) -> bool {
        match self {
            LabelTest::ContainsAny(tokens) => tokens.iter().any(|t| label.contains(t)),
            LabelTest::FirstYearOf(tokens) => {
                label.starts_with('1') && tokens.iter().any(|t| label.contains(t))
            },
        }
    }
}

/// Profile rules, evaluated in order.
const PROFILE_RULES: &[Rule<LabelTest, Profile>] = &[
    Rule::new(LabelTest::ContainsAny(&["LIC", "LSSA"]), Profile::Lyceum),
    Rule::new(LabelTest::FirstYearOf(FIRST_YEAR_SPECIALIZATIONS), Profile::FirstYear),
];

impl Profile {
    /// Select the profile for a class label; unknown labels get [`Profile::Standard`].
    pub fn detect(label: &ClassLabel) -> Self {
        Self::detect_text(&label.to_string())
    }

    /// Select the profile from raw label text.
    pub fn detect_text(label: &str) -> Self {
        let label = label.to_uppercase();
        first_match(PROFILE_RULES, |test| test.matches(&label))
            .copied()
            .unwrap_or(Profile::Standard)
    }

    /// Tag used in serialized output.
    pub fn tag(self) -> &'static str {
        match self {
            Profile::Lyceum => "lssa",
            Profile::FirstYear => "first_year",
            Profile::Standard => "standard",
        }
    }

    /// Weekday group that applies to `day` under this profile.
    pub fn group_for(self, day: Weekday) -> WeekdayGroup {
        match self {
            Profile::Lyceum => WeekdayGroup::All,
            Profile::FirstYear => match day {
                Weekday::Wednesday | Weekday::Friday => WeekdayGroup::WedFri,
                _ => WeekdayGroup::MonTueThu,
            },
            Profile::Standard => match day {
                Weekday::Tuesday | Weekday::Thursday => WeekdayGroup::TueThu,
                _ => WeekdayGroup::MonWedFri,
            },
        }
    }

    /// The weekday groups this profile distinguishes.
    pub fn groups(self) -> &'static [WeekdayGroup] {
        match self {
            Profile::Lyceum => &[WeekdayGroup::All],
            Profile::FirstYear => &[WeekdayGroup::WedFri, WeekdayGroup::MonTueThu],
            Profile::Standard => &[WeekdayGroup::MonWedFri, WeekdayGroup::TueThu],
        }
    }

    /// Day schedule for `day` under this profile.
    pub fn day_schedule(self, day: Weekday) -> DaySchedule {
        self.group_for(day).day_schedule()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Day schedule applicable to a class on a weekday. Total: every label resolves.
pub fn periods_for(label: &ClassLabel, day: Weekday) -> DaySchedule {
    Profile::detect(label).day_schedule(day)
}
