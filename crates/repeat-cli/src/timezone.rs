use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid timezone: '{0}'. Use IANA timezone names like 'America/New_York'")]
pub struct InvalidTimezone(pub String);

/// Validates an IANA timezone name
pub fn validate_timezone(timezone: &str) -> Result<Tz, InvalidTimezone> {
    Tz::from_str(timezone.trim()).map_err(|_| InvalidTimezone(timezone.to_string()))
}

/// Detect system timezone
pub fn detect_system_timezone() -> String {
    if let Ok(tz) = std::env::var("TZ") {
        if !tz.is_empty() && validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    if let Ok(tz) = iana_time_zone::get_timezone() {
        if validate_timezone(&tz).is_ok() {
            return tz;
        }
    }

    "UTC".to_string()
}

/// Current calendar day in the given timezone.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_timezone() {
        assert!(validate_timezone("UTC").is_ok());
        assert!(validate_timezone("America/New_York").is_ok());
        assert!(validate_timezone(" Europe/Berlin ").is_ok());
        assert_eq!(
            validate_timezone("Invalid/Timezone"),
            Err(InvalidTimezone("Invalid/Timezone".to_string()))
        );
    }

    #[test]
    fn test_detected_timezone_is_valid() {
        assert!(validate_timezone(&detect_system_timezone()).is_ok());
    }

    #[test]
    fn test_today_differs_by_at_most_one_day() {
        let east = today_in(Tz::Asia__Tokyo);
        let west = today_in(Tz::America__New_York);
        let gap = east.signed_duration_since(west).num_days();
        assert!((0..=1).contains(&gap));
    }
}
