//! Best-effort parsing of aggregator date strings.
//!
//! Aggregators hand out dates in whatever shape the page displayed them:
//! "3 hours ago", "yesterday", "Jan 5, 2024", "March 2024", full RFC 3339
//! timestamps. Parsing sits behind the [`DateParser`] trait so the
//! normalizer's fallback contract can be exercised without a real clock.
//!
//! Missing day-of-month defaults to the 1st. Failure is never an error, the
//! parser just answers `None`.

use chrono::{
    DateTime, Datelike, Duration, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
};
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Format used for `Article::published_at`.
pub const ISO8601_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

static RELATIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(\d+|an?|one)\s+(seconds?|secs?|minutes?|mins?|hours?|hrs?|days?|weeks?|months?|years?)\s+ago$",
    )
    .unwrap()
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%m/%d/%Y",
];

/// Turns free-form date text into a local timestamp.
pub trait DateParser {
    /// Parse `text`, or `None` when it is not recognised.
    fn parse_to_iso8601(&self, text: &str) -> Option<NaiveDateTime>;
}

/// Chrono-backed parser with an injected reference clock.
///
/// Relative phrases ("2 days ago") and year-less dates ("Mar 3") are resolved
/// against `now`, which is fixed at construction so one consolidation run
/// sees one clock.
#[derive(Debug, Clone, Copy)]
pub struct ChronoDateParser {
    now: NaiveDateTime,
}

impl ChronoDateParser {
    /// A parser anchored at `now`.
    pub fn at(now: NaiveDateTime) -> Self {
        Self { now }
    }

    fn relative(&self, text: &str) -> Option<NaiveDateTime> {
        match text {
            "now" | "just now" => return Some(self.now),
            "today" => return Some(self.now.date().and_time(NaiveTime::MIN)),
            "yesterday" => {
                return Some((self.now - Duration::days(1)).date().and_time(NaiveTime::MIN));
            }
            _ => {}
        }

        let caps = RELATIVE.captures(text)?;
        let amount: i64 = match &caps[1] {
            "a" | "an" | "one" => 1,
            digits => digits.parse().ok()?,
        };
        let unit = caps[2].trim_end_matches('s');
        match unit {
            "second" | "sec" => self.now.checked_sub_signed(Duration::try_seconds(amount)?),
            "minute" | "min" => self.now.checked_sub_signed(Duration::try_minutes(amount)?),
            "hour" | "hr" => self.now.checked_sub_signed(Duration::try_hours(amount)?),
            "day" => self.now.checked_sub_signed(Duration::try_days(amount)?),
            "week" => self.now.checked_sub_signed(Duration::try_weeks(amount)?),
            "month" => self.now.checked_sub_months(Months::new(u32::try_from(amount).ok()?)),
            "year" => self
                .now
                .checked_sub_months(Months::new(u32::try_from(amount.checked_mul(12)?).ok()?)),
            _ => None,
        }
    }

    fn absolute(&self, text: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
            return Some(dt.with_timezone(&Local).naive_local());
        }
        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
                return Some(dt);
            }
        }
        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(text, fmt) {
                return Some(d.and_time(NaiveTime::MIN));
            }
        }

        // "Mar 3" -> this year
        let with_year = format!("{} {}", text, self.now.year());
        for fmt in ["%b %d %Y", "%B %d %Y"] {
            if let Ok(d) = NaiveDate::parse_from_str(&with_year, fmt) {
                return Some(d.and_time(NaiveTime::MIN));
            }
        }

        // "March 2024" -> first of the month
        let first_of = format!("1 {}", text);
        for fmt in ["%d %B %Y", "%d %b %Y"] {
            if let Ok(d) = NaiveDate::parse_from_str(&first_of, fmt) {
                return Some(d.and_time(NaiveTime::MIN));
            }
        }
        None
    }
}

impl Default for ChronoDateParser {
    fn default() -> Self {
        Self::at(Local::now().naive_local())
    }
}

impl DateParser for ChronoDateParser {
    fn parse_to_iso8601(&self, text: &str) -> Option<NaiveDateTime> {
        let cleaned = text.trim().trim_end_matches('.').to_lowercase();
        if cleaned.is_empty() {
            return None;
        }
        let parsed = self
            .relative(&cleaned)
            .or_else(|| self.absolute(text.trim()));
        if parsed.is_none() {
            debug!(date = %text, "Unrecognised date string");
        }
        parsed
    }
}

/// Render a parsed timestamp the way `Article::published_at` stores it, or
/// an empty string when parsing failed.
pub fn to_published_at(parser: &dyn DateParser, text: &str) -> String {
    parser
        .parse_to_iso8601(text)
        .map(|dt| dt.format(ISO8601_FORMAT).to_string())
        .unwrap_or_default()
}
