//! Countdown-timer links for contest moderation notices.
//!
//! Moderators embed a hosted timer page in wiki posts: pick a start time and
//! a duration, get back the timer URL (and, via [`wikitext`], the post text
//! that carries it). The timer page itself reads everything it needs from
//! the query string built here.

#![forbid(unsafe_code)]

pub mod wikitext;

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use url::Url;

/// Hosted timer page the generated links point at.
pub const DEFAULT_TIMER_BASE: &str = "https://25joint.wdopen.xyz/Deletion%20Time%20Tool/timer.html";

/// Milliseconds per second/minute/hour/day/week.
pub const SECOND_MS: i64 = 1000;
pub const MINUTE_MS: i64 = 60 * SECOND_MS;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const WEEK_MS: i64 = 7 * DAY_MS;

/// Unit for custom durations. Months and years use the fixed civil
/// approximations the timer page expects (30 and 365 days).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DurationUnit {
    /// Milliseconds in one of this unit.
    pub const fn millis(self) -> i64 {
        match self {
            Self::Minute => MINUTE_MS,
            Self::Hour => HOUR_MS,
            Self::Day => DAY_MS,
            Self::Week => WEEK_MS,
            Self::Month => 30 * DAY_MS,
            Self::Year => 365 * DAY_MS,
        }
    }
}

/// How long the timer runs: one of the form's presets, or a custom
/// `value × unit` duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerDuration {
    OneDay,
    TwoDays,
    OneWeek,
    TwoWeeks,
    OneYear,
    Custom { value: i64, unit: DurationUnit },
}

impl TimerDuration {
    /// Total duration in milliseconds. Custom durations saturate at the
    /// `i64` range instead of wrapping.
    pub const fn millis(self) -> i64 {
        match self {
            Self::OneDay => DAY_MS,
            Self::TwoDays => 2 * DAY_MS,
            Self::OneWeek => WEEK_MS,
            Self::TwoWeeks => 2 * WEEK_MS,
            Self::OneYear => 365 * DAY_MS,
            Self::Custom { value, unit } => value.saturating_mul(unit.millis()),
        }
    }
}

/// Everything the timer page needs to render one countdown.
#[derive(Clone, Debug)]
pub struct TimerSpec {
    /// UI language of the timer page (e.g. `zh-hans`).
    pub language: String,
    /// When the countdown starts.
    pub start: DateTime<Utc>,
    /// How long it runs from `start`.
    pub duration: TimerDuration,
    /// Message shown while the timer is running. Empty means none.
    pub progress: Option<String>,
    /// Message shown once the timer expires. Empty means none.
    pub finished: Option<String>,
    /// Extra CSS the timer page applies to itself. Empty means none.
    pub styling: Option<String>,
}

/// Build the timer page URL for a spec.
///
/// The expiry instant is `start + duration`, serialized ISO-8601 with
/// millisecond precision and a `Z` suffix; an expiry outside the calendar's
/// representable range clamps to the nearest bound. `lang` and `time` are
/// always present; `progress`, `finished`, and `style` are appended in that
/// order when non-empty.
///
/// # Errors
///
/// Returns an error when `base` is not a valid absolute URL.
pub fn timer_url(spec: &TimerSpec, base: &str) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base)?;
    let offset = TimeDelta::milliseconds(spec.duration.millis());
    let target = spec.start.checked_add_signed(offset).unwrap_or_else(|| {
        if offset < TimeDelta::zero() {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        }
    });
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("lang", &spec.language);
        pairs.append_pair("time", &target.to_rfc3339_opts(SecondsFormat::Millis, true));
        if let Some(progress) = spec.progress.as_deref().filter(|text| !text.is_empty()) {
            pairs.append_pair("progress", progress);
        }
        if let Some(finished) = spec.finished.as_deref().filter(|text| !text.is_empty()) {
            pairs.append_pair("finished", finished);
        }
        if let Some(styling) = spec.styling.as_deref().filter(|text| !text.is_empty()) {
            pairs.append_pair("style", styling);
        }
    }
    Ok(url)
}
