use chrono::{Duration, NaiveDate};

use crate::model::Period;
use crate::{ClientError, ClientResult};

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Lenient parse for values coming back from the store.
pub fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    if !looks_like_iso_date(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
    if !looks_like_iso_date(value) {
        return Err(ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with a real calendar date."),
            Some(command),
        ));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{field_name}` must use YYYY-MM-DD format with valid calendar values."),
            Some(command),
        )
    })
}

/// The date `days` calendar days before `date`, saturating at the minimum date.
pub fn days_before(date: NaiveDate, days: i64) -> NaiveDate {
    date.checked_sub_signed(Duration::days(days))
        .unwrap_or(NaiveDate::MIN)
}

/// Resolves optional `--month/--year` arguments against `today`. Both must
/// be given together; when both are absent the period containing `today` is used.
pub fn resolve_period(
    month: Option<u32>,
    year: Option<i32>,
    today: NaiveDate,
    command: &str,
) -> ClientResult<Period> {
    match (month, year) {
        (None, None) => Ok(Period::containing(today)),
        (Some(month), Some(year)) => Period::new(month, year).map_err(|error| {
            ClientError::invalid_argument_for_command(&error.message, Some(command))
        }),
        _ => Err(ClientError::invalid_argument_for_command(
            "`month` and `year` must be provided together.",
            Some(command),
        )),
    }
}

fn looks_like_iso_date(value: &str) -> bool {
    if value.len() != 10 {
        return false;
    }
    let bytes = value.as_bytes();
    if bytes[4] != b'-' || bytes[7] != b'-' {
        return false;
    }

    for index in [0usize, 1, 2, 3, 5, 6, 8, 9] {
        if !bytes[index].is_ascii_digit() {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{days_before, format_iso_date, parse_iso_date_strict, resolve_period};

    #[test]
    fn days_before_crosses_month_boundaries() {
        let due = NaiveDate::from_ymd_opt(2025, 7, 3);
        assert!(due.is_some());
        if let Some(value) = due {
            assert_eq!(format_iso_date(&days_before(value, 5)), "2025-06-28");
            assert_eq!(format_iso_date(&days_before(value, 30)), "2025-06-03");
        }
    }

    #[test]
    fn strict_parse_rejects_impossible_calendar_dates() {
        let result = parse_iso_date_strict("2025-02-30", "date", "expense add");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("calendar"));
        }
        assert!(parse_iso_date_strict("06/01/2025", "date", "expense add").is_err());
    }

    #[test]
    fn resolve_period_requires_month_and_year_together() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15);
        assert!(today.is_some());
        if let Some(today) = today {
            assert!(resolve_period(Some(6), None, today, "report").is_err());
            let defaulted = resolve_period(None, None, today, "report");
            assert!(defaulted.is_ok());
            if let Ok(period) = defaulted {
                assert_eq!((period.month(), period.year()), (6, 2025));
            }
        }
    }
}
