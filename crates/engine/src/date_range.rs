//! Reporting windows for balance and analytics queries.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// How a reporting window is derived. All preset modes anchor on today;
/// `Custom` takes explicit bounds and `All` is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeMode {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
    All,
    Custom,
}

impl RangeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
            Self::Quarter => "quarter",
            Self::Year => "year",
            Self::All => "all",
            Self::Custom => "custom",
        }
    }
}

impl TryFrom<&str> for RangeMode {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            "all" => Ok(Self::All),
            "custom" => Ok(Self::Custom),
            other => Err(EngineError::InvalidInput(format!(
                "invalid range mode: {other}"
            ))),
        }
    }
}

/// Resolved window. `None` bounds mean unbounded on that side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// Resolve a window against an injected `today` so callers (and tests)
/// control the clock. Preset modes ignore the explicit bounds.
pub fn resolve_range(
    mode: RangeMode,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    today: NaiveDate,
) -> ResultEngine<DateRange> {
    let back = |date: Option<NaiveDate>| {
        date.ok_or_else(|| EngineError::InvalidInput("date out of range".to_string()))
    };

    let range = match mode {
        RangeMode::Week => DateRange {
            start: Some(back(today.checked_sub_days(Days::new(7)))?),
            end: Some(today),
        },
        RangeMode::Month => DateRange {
            start: Some(back(today.checked_sub_months(Months::new(1)))?),
            end: Some(today),
        },
        RangeMode::Quarter => DateRange {
            start: Some(back(today.checked_sub_months(Months::new(3)))?),
            end: Some(today),
        },
        RangeMode::Year => DateRange {
            start: Some(back(today.checked_sub_months(Months::new(12)))?),
            end: Some(today),
        },
        RangeMode::All => DateRange::default(),
        RangeMode::Custom => {
            if let (Some(s), Some(e)) = (start, end) {
                if s > e {
                    return Err(EngineError::InvalidInput(
                        "start date is after end date".to_string(),
                    ));
                }
            }
            DateRange { start, end }
        }
    };
    Ok(range)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn presets_anchor_on_today() {
        let today = date(2026, 3, 15);
        let week = resolve_range(RangeMode::Week, None, None, today).unwrap();
        assert_eq!(week.start, Some(date(2026, 3, 8)));
        assert_eq!(week.end, Some(today));

        let month = resolve_range(RangeMode::Month, None, None, today).unwrap();
        assert_eq!(month.start, Some(date(2026, 2, 15)));

        let quarter = resolve_range(RangeMode::Quarter, None, None, today).unwrap();
        assert_eq!(quarter.start, Some(date(2025, 12, 15)));

        let year = resolve_range(RangeMode::Year, None, None, today).unwrap();
        assert_eq!(year.start, Some(date(2025, 3, 15)));
    }

    #[test]
    fn all_is_unbounded_and_ignores_explicit_bounds() {
        let today = date(2026, 3, 15);
        let range =
            resolve_range(RangeMode::All, Some(date(2020, 1, 1)), None, today).unwrap();
        assert_eq!(range, DateRange::default());
        assert!(range.contains(date(1999, 1, 1)));
    }

    #[test]
    fn custom_validates_order() {
        let today = date(2026, 3, 15);
        let range = resolve_range(
            RangeMode::Custom,
            Some(date(2026, 1, 1)),
            Some(date(2026, 1, 31)),
            today,
        )
        .unwrap();
        assert!(range.contains(date(2026, 1, 31)));
        assert!(!range.contains(date(2026, 2, 1)));

        let err = resolve_range(
            RangeMode::Custom,
            Some(date(2026, 2, 1)),
            Some(date(2026, 1, 1)),
            today,
        );
        assert!(err.is_err());
    }

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            RangeMode::Week,
            RangeMode::Month,
            RangeMode::Quarter,
            RangeMode::Year,
            RangeMode::All,
            RangeMode::Custom,
        ] {
            assert_eq!(RangeMode::try_from(mode.as_str()).unwrap(), mode);
        }
        assert!(RangeMode::try_from("fortnight").is_err());
    }
}
