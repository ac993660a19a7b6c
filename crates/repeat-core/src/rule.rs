//! Parsing of the compact recurrence rule grammar.
//!
//! | Rule                     | Meaning                                           |
//! |--------------------------|---------------------------------------------------|
//! | `d<N>`                   | every N days, 1 ≤ N ≤ 400                         |
//! | `y`                      | every year on the same month and day              |
//! | `w<d1,d2,..>`            | on the given ISO weekdays (1 = Monday, 7 = Sunday) |
//! | `m<d1,d2,..>[ m1,m2,..]` | on the given days of month, optionally only in the given months; `-1` is the last day, `-2` the second-to-last |

use chrono::Weekday;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

pub const MAX_DAILY_INTERVAL: u32 = 400;

const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// The family of a rule, selected by its leading character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Daily,
    Yearly,
    Weekly,
    Monthly,
}

impl RuleKind {
    /// Maps the leading character of a rule to its kind.
    pub fn from_leading(c: char) -> Option<Self> {
        match c {
            'd' => Some(RuleKind::Daily),
            'y' => Some(RuleKind::Yearly),
            'w' => Some(RuleKind::Weekly),
            'm' => Some(RuleKind::Monthly),
            _ => None,
        }
    }
}

/// Returns whether the rule starts with one of the known kind characters.
///
/// Only the leading character is inspected; parameters are not validated.
pub fn is_known_rule_kind(rule: &str) -> bool {
    rule.trim()
        .chars()
        .next()
        .and_then(RuleKind::from_leading)
        .is_some()
}

/// A day-of-month selector of a monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DaySelector {
    /// Literal day of month, 1..=31.
    Day(u32),
    /// Last day of the month (`-1`).
    Last,
    /// Second-to-last day of the month (`-2`).
    SecondToLast,
}

impl fmt::Display for DaySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaySelector::Day(day) => write!(f, "day {}", day),
            DaySelector::Last => write!(f, "last day"),
            DaySelector::SecondToLast => write!(f, "second-to-last day"),
        }
    }
}

/// A parsed recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecurrenceRule {
    Daily {
        interval: u32,
    },
    Yearly,
    Weekly {
        weekdays: Vec<Weekday>,
    },
    Monthly {
        days: Vec<DaySelector>,
        months: Option<Vec<u32>>,
    },
}

impl RecurrenceRule {
    pub fn kind(&self) -> RuleKind {
        match self {
            RecurrenceRule::Daily { .. } => RuleKind::Daily,
            RecurrenceRule::Yearly => RuleKind::Yearly,
            RecurrenceRule::Weekly { .. } => RuleKind::Weekly,
            RecurrenceRule::Monthly { .. } => RuleKind::Monthly,
        }
    }
}

/// Parses a rule string. Equivalent to `rule.parse::<RecurrenceRule>()`.
pub fn parse_rule(rule: &str) -> Result<RecurrenceRule, CoreError> {
    rule.parse()
}

impl FromStr for RecurrenceRule {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rule = s.trim();
        let mut chars = rule.chars();
        let leading = chars
            .next()
            .ok_or_else(|| CoreError::InvalidRule("empty rule".to_string()))?;
        let params = chars.as_str();

        match RuleKind::from_leading(leading) {
            Some(RuleKind::Daily) => parse_daily(params),
            Some(RuleKind::Yearly) => Ok(RecurrenceRule::Yearly),
            Some(RuleKind::Weekly) => parse_weekly(params),
            Some(RuleKind::Monthly) => parse_monthly(params),
            None => Err(CoreError::InvalidRule(format!(
                "unknown rule kind '{}' in '{}'",
                leading, rule
            ))),
        }
    }
}

fn strip_spaces(params: &str) -> String {
    params.chars().filter(|c| !c.is_whitespace()).collect()
}

fn parse_number(token: &str, what: &str) -> Result<i64, CoreError> {
    token
        .parse::<i64>()
        .map_err(|_| CoreError::InvalidRuleParameter(format!("bad {} value '{}'", what, token)))
}

fn parse_daily(params: &str) -> Result<RecurrenceRule, CoreError> {
    let interval = parse_number(&strip_spaces(params), "day interval")?;

    if !(1..=i64::from(MAX_DAILY_INTERVAL)).contains(&interval) {
        return Err(CoreError::InvalidRuleParameter(format!(
            "day interval {} is outside 1..={}",
            interval, MAX_DAILY_INTERVAL
        )));
    }

    Ok(RecurrenceRule::Daily {
        interval: interval as u32,
    })
}

fn parse_weekly(params: &str) -> Result<RecurrenceRule, CoreError> {
    let weekdays = strip_spaces(params)
        .split(',')
        .map(|token| {
            let number = parse_number(token, "weekday")?;
            if !(1..=7).contains(&number) {
                return Err(CoreError::InvalidRuleParameter(format!(
                    "weekday {} is outside 1..=7",
                    number
                )));
            }
            Ok(WEEKDAYS[(number - 1) as usize])
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RecurrenceRule::Weekly { weekdays })
}

fn parse_monthly(params: &str) -> Result<RecurrenceRule, CoreError> {
    let tokens: Vec<&str> = params.split_whitespace().collect();

    let (days, months) = match tokens.as_slice() {
        [days] => (*days, None),
        [days, months] => (*days, Some(*months)),
        _ => {
            return Err(CoreError::InvalidRuleParameter(format!(
                "expected '<days>[ <months>]', got '{}'",
                params.trim()
            )))
        }
    };

    let days = days
        .split(',')
        .map(parse_day_selector)
        .collect::<Result<Vec<_>, _>>()?;

    let months = months
        .map(|months| {
            months
                .split(',')
                .map(parse_month)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(RecurrenceRule::Monthly { days, months })
}

fn parse_day_selector(token: &str) -> Result<DaySelector, CoreError> {
    match parse_number(token, "day of month")? {
        -1 => Ok(DaySelector::Last),
        -2 => Ok(DaySelector::SecondToLast),
        day @ 1..=31 => Ok(DaySelector::Day(day as u32)),
        day => Err(CoreError::InvalidRuleParameter(format!(
            "day of month {} is outside -2..=31 or is 0",
            day
        ))),
    }
}

fn parse_month(token: &str) -> Result<u32, CoreError> {
    match parse_number(token, "month")? {
        month @ 1..=12 => Ok(month as u32),
        month => Err(CoreError::InvalidRuleParameter(format!(
            "month {} is outside 1..=12",
            month
        ))),
    }
}

impl fmt::Display for RecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecurrenceRule::Daily { interval: 1 } => write!(f, "every day"),
            RecurrenceRule::Daily { interval } => write!(f, "every {} days", interval),
            RecurrenceRule::Yearly => write!(f, "every year"),
            RecurrenceRule::Weekly { weekdays } => {
                let names: Vec<String> = weekdays.iter().map(|w| w.to_string()).collect();
                write!(f, "every {}", names.join(", "))
            }
            RecurrenceRule::Monthly { days, months } => {
                let days: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                write!(f, "on {}", days.join(", "))?;
                match months {
                    Some(months) => {
                        let months: Vec<String> = months.iter().map(|m| m.to_string()).collect();
                        write!(f, " of months {}", months.join(", "))
                    }
                    None => write!(f, " of every month"),
                }
            }
        }
    }
}
