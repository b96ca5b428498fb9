use chrono::{DateTime, Datelike, NaiveDate};

use crate::{ClientError, ClientResult};

/// Converts epoch milliseconds to a UTC calendar day.
///
/// Returns `None` when the instant is out of range or its year has no
/// four-digit canonical form.
pub fn epoch_ms_to_date(epoch_ms: i64) -> Option<NaiveDate> {
    let instant = DateTime::from_timestamp_millis(epoch_ms)?;
    let date = instant.date_naive();
    if !(0..=9999).contains(&date.year()) {
        return None;
    }
    Some(date)
}

pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Short display label for a `YYYY-MM` key, e.g. `2023-01` -> `Jan 23`.
pub fn month_label(month_key: &str) -> String {
    let parsed = NaiveDate::parse_from_str(&format!("{month_key}-01"), "%Y-%m-%d");
    match parsed {
        Ok(first_day) => first_day.format("%b %y").to_string(),
        Err(_) => month_key.to_string(),
    }
}

/// Validates an optional date range supplied by a user.
///
/// Both bounds must be real `YYYY-MM-DD` dates and `from` must not be after `to`.
pub fn validate_range(
    from: Option<&str>,
    to: Option<&str>,
    command: &str,
) -> ClientResult<(Option<String>, Option<String>)> {
    let parsed_from = match from {
        Some(value) => Some(parse_iso_date_strict(value, "from", command)?),
        None => None,
    };
    let parsed_to = match to {
        Some(value) => Some(parse_iso_date_strict(value, "to", command)?),
        None => None,
    };

    if let (Some(start), Some(end)) = (parsed_from, parsed_to)
        && start > end
    {
        return Err(ClientError::invalid_argument_for_command(
            "Invalid date range: `from` must be on or before `to`.",
            Some(command),
        ));
    }

    Ok((
        parsed_from.as_ref().map(format_iso_date),
        parsed_to.as_ref().map(format_iso_date),
    ))
}

fn parse_iso_date_strict(value: &str, field_name: &str, command: &str) -> ClientResult<NaiveDate> {
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
    use super::{epoch_ms_to_date, format_iso_date, month_label, validate_range};

    #[test]
    fn epoch_millis_map_to_utc_calendar_days() {
        // 2022-01-10T23:59:59.999Z
        let date = epoch_ms_to_date(1_641_859_199_999);
        assert!(date.is_some());
        if let Some(value) = date {
            assert_eq!(format_iso_date(&value), "2022-01-10");
        }

        let next = epoch_ms_to_date(1_641_859_200_000);
        assert!(next.is_some());
        if let Some(value) = next {
            assert_eq!(format_iso_date(&value), "2022-01-11");
        }
    }

    #[test]
    fn epochs_before_1970_still_resolve() {
        let date = epoch_ms_to_date(-86_400_000);
        assert!(date.is_some());
        if let Some(value) = date {
            assert_eq!(format_iso_date(&value), "1969-12-31");
        }
    }

    #[test]
    fn out_of_range_epochs_have_no_date() {
        assert!(epoch_ms_to_date(i64::MAX).is_none());
        assert!(epoch_ms_to_date(i64::MIN).is_none());
        // Year 10000 has no four-digit form.
        assert!(epoch_ms_to_date(253_402_300_800_000).is_none());
    }

    #[test]
    fn month_labels_use_short_month_and_two_digit_year() {
        assert_eq!(month_label("2023-01"), "Jan 23");
        assert_eq!(month_label("2022-12"), "Dec 22");
        assert_eq!(month_label("garbage"), "garbage");
    }

    #[test]
    fn validate_range_rejects_inverted_ranges() {
        let result = validate_range(Some("2026-03-01"), Some("2026-02-01"), "filters set");
        assert!(result.is_err());
    }

    #[test]
    fn validate_range_rejects_impossible_calendar_days() {
        let result = validate_range(Some("2026-02-31"), None, "filters set");
        assert!(result.is_err());
        if let Err(error) = result {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("calendar"));
        }
    }

    #[test]
    fn validate_range_keeps_open_bounds() {
        let result = validate_range(None, Some("2023-12-31"), "filters set");
        assert!(result.is_ok());
        if let Ok((from, to)) = result {
            assert!(from.is_none());
            assert_eq!(to.as_deref(), Some("2023-12-31"));
        }
    }
}
