// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use chrono::{Days, Months, NaiveDate, NaiveDateTime, TimeDelta};

use crate::types::AppointmentId;

/// Upper bound of occurrences walked when resolving an `until` repetition.
const MAX_OCCURRENCES: u32 = 100_000;

/// A time interval of a reservation, possibly repeating.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Appointment {
    pub id: AppointmentId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeating: Option<Repeating>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Repeating {
    pub kind: RepeatingKind,

    /// Repeat every `interval` days/weeks/months/years.
    #[serde(default = "default_interval")]
    pub interval: u32,

    #[serde(default)]
    pub end: RepeatingEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatingKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatingEnd {
    #[default]
    Forever,

    /// Total number of occurrences, the first one included.
    Count(u32),

    /// Last day an occurrence may start on.
    Until(NaiveDate),
}

fn default_interval() -> u32 {
    1
}

impl Appointment {
    pub fn new(id: impl Into<AppointmentId>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            repeating: None,
        }
    }

    pub fn with_repeating(mut self, repeating: Repeating) -> Self {
        self.repeating = Some(repeating);
        self
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Start of the `n`-th occurrence, counting from zero. `None` when the
    /// appointment does not repeat (and `n > 0`) or on calendar overflow.
    pub fn occurrence_start(&self, n: u32) -> Option<NaiveDateTime> {
        if n == 0 {
            return Some(self.start);
        }

        let repeating = self.repeating?;
        let step = n.checked_mul(repeating.interval.max(1))?;
        match repeating.kind {
            RepeatingKind::Daily => self.start.checked_add_days(Days::new(step.into())),
            RepeatingKind::Weekly => self
                .start
                .checked_add_days(Days::new(u64::from(step) * 7)),
            RepeatingKind::Monthly => self.start.checked_add_months(Months::new(step)),
            RepeatingKind::Yearly => self
                .start
                .checked_add_months(Months::new(step.checked_mul(12)?)),
        }
    }

    /// End of the last occurrence, `None` if the appointment repeats forever.
    pub fn max_end(&self) -> Option<NaiveDateTime> {
        let Some(repeating) = self.repeating else {
            return Some(self.end);
        };

        let last = match repeating.end {
            RepeatingEnd::Forever => return None,
            RepeatingEnd::Count(n) => self.occurrence_start(n.saturating_sub(1))?,
            RepeatingEnd::Until(until) => {
                let mut last = self.start;
                let mut n = 1;
                loop {
                    // past the bound the end is as good as unknown
                    if n >= MAX_OCCURRENCES {
                        return None;
                    }
                    match self.occurrence_start(n) {
                        Some(s) if s.date() <= until => last = s,
                        _ => break,
                    }
                    n += 1;
                }
                last
            }
        };
        last.checked_add_signed(self.duration())
    }
}
