//! Date validation for `DD/MM/YYYY` transaction dates.
//!
//! A date is accepted when it has exactly three slash separated numeric
//! components, a four digit year, a month in `1..=12`, a day that exists in
//! that month (leap years included) and it is not after the current moment.

use chrono::{Local, NaiveDate, NaiveDateTime};
use log::debug;

use crate::error::LedgerError;

/// Returns the current local wall clock time.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Gregorian leap year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` of `year`. `month` must be in `1..=12`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn parse_component(value: &str, name: &str) -> Result<u32, LedgerError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(LedgerError::Format(format!(
            "{name} '{value}' is not a number, use the DD/MM/YYYY format"
        )));
    }
    value
        .parse()
        .map_err(|_| LedgerError::Format(format!("{name} '{value}' is too large")))
}

/// Validates `input` against `now` and returns the parsed date.
///
/// # Errors
///
/// - [`LedgerError::Format`] when the input is not three `/` separated numbers
///   or the year is not four characters long
/// - [`LedgerError::Range`] when the month or day does not exist
/// - [`LedgerError::FutureDate`] when the date is after `now`
pub fn validate_date(input: &str, now: NaiveDateTime) -> Result<NaiveDate, LedgerError> {
    let parts: Vec<&str> = input.split('/').collect();
    let &[day, month, year] = parts.as_slice() else {
        return Err(LedgerError::Format(
            "incomplete or malformed date, enter day, month and year as DD/MM/YYYY".into(),
        ));
    };

    if year.chars().count() != 4 {
        return Err(LedgerError::Format(
            "incomplete year, enter the year as YYYY".into(),
        ));
    }

    let day = parse_component(day, "day")?;
    let month = parse_component(month, "month")?;
    let year = parse_component(year, "year")? as i32;

    if year == 0 {
        return Err(LedgerError::Range("year 0000 does not exist".into()));
    }

    if !(1..=12).contains(&month) {
        return Err(LedgerError::Range(format!(
            "month {month} is not between 1 and 12"
        )));
    }

    let max_day = days_in_month(year, month);
    if day < 1 || day > max_day {
        return Err(LedgerError::Range(format!(
            "month {month} has at most {max_day} days"
        )));
    }

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| LedgerError::Range(format!("{input} is not a calendar date")))?;

    // Entered dates carry no time of day, so they stand for midnight.
    if date.and_hms_opt(0, 0, 0).is_some_and(|start| start > now) {
        return Err(LedgerError::FutureDate);
    }

    Ok(date)
}

/// Boolean form of [`validate_date`]; the rejection reason is logged.
pub fn is_valid_date(input: &str, now: NaiveDateTime) -> bool {
    match validate_date(input, now) {
        Ok(_) => true,
        Err(e) => {
            debug!("Rejected date '{}': {}", input, e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(10, 30, 0)
            .unwrap()
    }

    #[test]
    fn accepts_well_formed_past_dates() {
        assert_eq!(
            validate_date("18/05/2024", now()).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 18).unwrap()
        );
        assert!(is_valid_date("1/1/2000", now()));
        assert!(is_valid_date("31/12/1999", now()));
    }

    #[test]
    fn today_is_not_in_the_future() {
        assert!(is_valid_date("15/06/2024", now()));
    }

    #[test]
    fn tomorrow_is_in_the_future() {
        assert_eq!(
            validate_date("16/06/2024", now()),
            Err(LedgerError::FutureDate)
        );
        assert_eq!(
            validate_date("01/01/2025", now()),
            Err(LedgerError::FutureDate)
        );
    }

    #[test]
    fn leap_year_boundaries() {
        assert!(is_valid_date("29/02/2024", now()));
        assert!(is_valid_date("29/02/2000", now()));
        assert!(matches!(
            validate_date("29/02/2023", now()),
            Err(LedgerError::Range(_))
        ));
        assert!(matches!(
            validate_date("29/02/1900", now()),
            Err(LedgerError::Range(_))
        ));
    }

    #[test]
    fn wrong_component_count_is_a_format_error() {
        for input in ["18/05", "18/05/2024/1", "18-05-2024", ""] {
            assert!(
                matches!(validate_date(input, now()), Err(LedgerError::Format(_))),
                "{input} should be a format error"
            );
        }
    }

    #[test]
    fn year_must_have_four_characters() {
        for input in ["18/05/24", "18/05/02024", "18/05/"] {
            assert!(
                matches!(validate_date(input, now()), Err(LedgerError::Format(_))),
                "{input} should be a format error"
            );
        }
    }

    #[test]
    fn non_numeric_components_are_format_errors() {
        assert!(matches!(
            validate_date("aa/05/2024", now()),
            Err(LedgerError::Format(_))
        ));
        assert!(matches!(
            validate_date("18/05/20x4", now()),
            Err(LedgerError::Format(_))
        ));
    }

    #[test]
    fn month_out_of_range() {
        assert!(matches!(
            validate_date("10/13/2020", now()),
            Err(LedgerError::Range(_))
        ));
        assert!(matches!(
            validate_date("10/00/2020", now()),
            Err(LedgerError::Range(_))
        ));
    }

    #[test]
    fn day_out_of_range() {
        assert!(matches!(
            validate_date("31/04/2020", now()),
            Err(LedgerError::Range(_))
        ));
        assert!(matches!(
            validate_date("00/04/2020", now()),
            Err(LedgerError::Range(_))
        ));
    }

    #[test]
    fn year_zero_is_rejected() {
        assert!(validate_date("01/01/0000", now()).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Any in-range past date is accepted, zero padded or not.
    #[test]
    fn valid_past_dates_are_accepted() {
        proptest!(|(year in 1000i32..=2023, month in 1u32..=12, day_seed in 0u32..31, padded in any::<bool>())| {
            let day = day_seed % days_in_month(year, month) + 1;
            let input = if padded {
                format!("{:02}/{:02}/{}", day, month, year)
            } else {
                format!("{}/{}/{}", day, month, year)
            };
            prop_assert!(is_valid_date(&input, now()), "{} should be valid", input);
        });
    }

    /// Days past the end of the month are always rejected.
    #[test]
    fn overflowing_days_are_rejected() {
        proptest!(|(year in 1000i32..=2023, month in 1u32..=12, extra in 1u32..=20)| {
            let day = days_in_month(year, month) + extra;
            let input = format!("{:02}/{:02}/{}", day, month, year);
            prop_assert!(matches!(validate_date(&input, now()), Err(LedgerError::Range(_))));
        });
    }

    /// Dates after the current moment are rejected.
    #[test]
    fn future_dates_are_rejected() {
        proptest!(|(days_ahead in 1i64..=3000)| {
            let date = now().date() + chrono::Duration::days(days_ahead);
            let input = date.format("%d/%m/%Y").to_string();
            prop_assert_eq!(validate_date(&input, now()), Err(LedgerError::FutureDate));
        });
    }
}
