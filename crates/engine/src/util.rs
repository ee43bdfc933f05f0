//! Internal helpers for validation, normalization and calendar math.
//!
//! These utilities are **not** part of the public API. They centralize
//! the rules every operation must agree on: how amounts are rounded, how
//! names are compared, and where a calendar month starts and ends.

use chrono::{Datelike, NaiveDate, Utc};
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

/// Round a monetary value to two decimal places.
///
/// Applied at every emitted balance point, not just the final one, so a
/// long replay never shows accumulated floating-point noise.
pub(crate) fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Validate a transaction amount. Amounts are stored positive; direction
/// is derived from the transaction detail at read time.
pub(crate) fn validate_amount(amount: f64) -> ResultEngine<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::InvalidInput(
            "amount must be > 0".to_string(),
        ));
    }
    Ok(())
}

/// Trim a required display name, rejecting empty input.
pub(crate) fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Case- and diacritic-insensitive key used for name uniqueness.
pub(crate) fn normalize_name_key(input: &str) -> ResultEngine<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidInput(
            "name must not be empty".to_string(),
        ));
    }

    let mut out = String::new();
    let mut prev_space = false;
    for ch in trimmed.nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
            prev_space = false;
        } else if !out.is_empty() && !prev_space {
            out.push(' ');
            prev_space = true;
        }
    }
    let normalized = out.trim();
    if normalized.is_empty() {
        return Err(EngineError::InvalidInput(
            "name must contain at least one alphanumeric character".to_string(),
        ));
    }
    Ok(normalized.to_string())
}

/// Today's calendar date in UTC. Ledger dates carry no time component.
pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// First day of a calendar month. `month` is 1-based.
pub(crate) fn month_start(year: i32, month: u32) -> ResultEngine<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::InvalidInput(format!("invalid month: {year}-{month}")))
}

/// Last day of a calendar month. `month` is 1-based.
pub(crate) fn month_end(year: i32, month: u32) -> ResultEngine<NaiveDate> {
    let start = month_start(year, month)?;
    let next = if month == 12 {
        month_start(year + 1, 1)?
    } else {
        month_start(year, month + 1)?
    };
    next.pred_opt()
        .filter(|d| *d >= start)
        .ok_or_else(|| EngineError::InvalidInput(format!("invalid month: {year}-{month}")))
}

/// Previous period of a 0-indexed budget month, wrapping into the prior
/// year when the month is January.
pub(crate) fn previous_budget_period(year: i32, month0: i32) -> (i32, i32) {
    if month0 == 0 {
        (year - 1, 11)
    } else {
        (year, month0 - 1)
    }
}

/// Validate a 0-indexed budget month.
pub(crate) fn validate_budget_month(month0: i32) -> ResultEngine<()> {
    if !(0..=11).contains(&month0) {
        return Err(EngineError::InvalidInput(format!(
            "month must be between 0 and 11, got {month0}"
        )));
    }
    Ok(())
}

/// First day of the month after the given date.
pub(crate) fn next_month_start(date: NaiveDate) -> ResultEngine<NaiveDate> {
    let (year, month) = (date.year(), date.month());
    if month == 12 {
        month_start(year + 1, 1)
    } else {
        month_start(year, month + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_cents_truncates_drift() {
        assert_eq!(round_cents(10.004_999), 10.0);
        assert_eq!(round_cents(10.005), 10.01);
        assert_eq!(round_cents(-3.333_33), -3.33);
    }

    #[test]
    fn name_key_ignores_case_and_accents() {
        assert_eq!(normalize_name_key("  Café   Lunch ").unwrap(), "cafe lunch");
        assert_eq!(normalize_name_key("GROCERIES").unwrap(), "groceries");
        assert!(normalize_name_key("  --  ").is_err());
    }

    #[test]
    fn month_bounds() {
        assert_eq!(
            month_start(2026, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
        assert_eq!(
            month_end(2026, 2).unwrap(),
            NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()
        );
        assert_eq!(
            month_end(2024, 2).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
        assert_eq!(
            month_end(2026, 12).unwrap(),
            NaiveDate::from_ymd_opt(2026, 12, 31).unwrap()
        );
        assert!(month_start(2026, 13).is_err());
    }

    #[test]
    fn budget_period_wraps_january() {
        assert_eq!(previous_budget_period(2026, 0), (2025, 11));
        assert_eq!(previous_budget_period(2026, 5), (2026, 4));
    }
}
