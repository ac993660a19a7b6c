use chrono::{NaiveDate, NaiveTime};
use chrono_english::{parse_date_string, Dialect};
use repeat_core::date::{parse_date, parse_dotted_date};
use repeat_core::error::CoreError;

/// Resolves a date argument against `today`.
///
/// Accepts the `YYYYMMDD` layout, `DD.MM.YYYY`, or an English phrase such as
/// `today`, `tomorrow` or `next friday`.
pub fn parse_date_arg(input: &str, today: NaiveDate) -> Result<NaiveDate, CoreError> {
    let input = input.trim();

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return parse_date(input);
    }

    if input.contains('.') {
        if let Ok(date) = parse_dotted_date(input) {
            return Ok(date);
        }
    }

    let base = today.and_time(NaiveTime::MIN).and_utc();
    parse_date_string(input, base, Dialect::Uk)
        .map(|resolved| resolved.date_naive())
        .map_err(|e| CoreError::InvalidDate(format!("could not understand '{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case::layout("20240229", ymd(2024, 2, 29))]
    #[case::dotted("05.01.2024", ymd(2024, 1, 5))]
    #[case::today("today", ymd(2024, 1, 10))]
    #[case::tomorrow("tomorrow", ymd(2024, 1, 11))]
    fn test_parse_date_arg(#[case] input: &str, #[case] expected: NaiveDate) {
        assert_eq!(parse_date_arg(input, ymd(2024, 1, 10)).unwrap(), expected);
    }

    #[test]
    fn test_parse_date_arg_rejects_short_digits() {
        assert!(matches!(parse_date_arg("202401", ymd(2024, 1, 10)), Err(CoreError::InvalidDate(_))));
    }

    #[test]
    fn test_parse_date_arg_rejects_gibberish() {
        assert!(matches!(parse_date_arg("not a date at all", ymd(2024, 1, 10)), Err(CoreError::InvalidDate(_))));
    }
}
