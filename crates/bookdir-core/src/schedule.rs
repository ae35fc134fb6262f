//! Structured daily schedules parsed from free-text hour strings.
//!
//! Source hour cells are free text (`"10:00-17:00"`, `"9AM-5PM"`,
//! `"Closed"`, `"11AM-2PM, 5PM-11PM"`). All string-splitting lives here so
//! the open-now / open-late filters operate on one closed type instead of
//! re-scanning strings. Parsing is manual byte scanning, no regex.
//!
//! Failure policy: an unparseable string yields `None` and the callers
//! treat the day as not-open / not-late. Never an error.

/// Minutes in a day; used to normalize past-midnight closing times.
const MINUTES_PER_DAY: u32 = 24 * 60;

/// An open interval within one day, in minutes since midnight.
///
/// `close <= open` means the range runs past midnight (e.g. `8PM-2AM`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub open: u32,
    pub close: u32,
}

impl TimeRange {
    /// Whether `minute` (minutes since midnight) falls inside this range,
    /// accounting for past-midnight wrap.
    #[must_use]
    pub fn contains(&self, minute: u32) -> bool {
        if self.close > self.open {
            minute >= self.open && minute < self.close
        } else if self.close == self.open {
            false
        } else {
            minute >= self.open || minute < self.close
        }
    }

    /// Closing time normalized so past-midnight closes sort after same-day
    /// ones (e.g. `8PM-2AM` → 26:00).
    #[must_use]
    pub fn effective_close(&self) -> u32 {
        if self.close <= self.open {
            self.close + MINUTES_PER_DAY
        } else {
            self.close
        }
    }
}

/// One day's schedule: explicitly closed, or open during one or more ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DaySchedule {
    Closed,
    Open(Vec<TimeRange>),
}

impl DaySchedule {
    /// Whether the store is open at `minute` (minutes since midnight).
    #[must_use]
    pub fn is_open_at(&self, minute: u32) -> bool {
        match self {
            DaySchedule::Closed => false,
            DaySchedule::Open(ranges) => ranges.iter().any(|r| r.contains(minute)),
        }
    }

    /// Latest effective closing minute across all ranges, if any.
    #[must_use]
    pub fn latest_close(&self) -> Option<u32> {
        match self {
            DaySchedule::Closed => None,
            DaySchedule::Open(ranges) => ranges.iter().map(TimeRange::effective_close).max(),
        }
    }
}

/// Parse one day's free-text hours into a [`DaySchedule`].
///
/// Recognizes (case-insensitive):
/// - `"Closed"` → [`DaySchedule::Closed`]
/// - one or more `open-close` ranges separated by `,` or `;`, where each
///   side is `"10"`, `"10:30"`, `"10AM"`, `"10:30 PM"`, or `"24:00"`.
///
/// Returns `None` for empty input or when no range parses.
#[must_use]
pub fn parse_day_schedule(text: &str) -> Option<DaySchedule> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.eq_ignore_ascii_case("closed") {
        return Some(DaySchedule::Closed);
    }

    let ranges: Vec<TimeRange> = trimmed
        .split([',', ';'])
        .filter_map(parse_time_range)
        .collect();

    if ranges.is_empty() {
        None
    } else {
        Some(DaySchedule::Open(ranges))
    }
}

/// Parse a single `open-close` range like `"10:00-17:00"` or `"9AM - 5PM"`.
fn parse_time_range(text: &str) -> Option<TimeRange> {
    let (open_text, close_text) = split_range(text.trim())?;
    let open = parse_time(open_text)?;
    let close = parse_time(close_text)?;
    // 24:00 as an opening time makes no sense; as a close it means midnight.
    if open >= MINUTES_PER_DAY {
        return None;
    }
    Some(TimeRange {
        open,
        close: close % MINUTES_PER_DAY,
    })
}

/// Split on the dash separating open from close.
///
/// The dash between two times is the one *not* inside a time token, so the
/// first `-` works for every observed input (times themselves never contain
/// one).
fn split_range(text: &str) -> Option<(&str, &str)> {
    let idx = text.find('-')?;
    let (open, close) = text.split_at(idx);
    Some((open, &close[1..]))
}

/// Parse a time-of-day token into minutes since midnight.
///
/// Accepts `"10"`, `"10:30"`, optionally followed by whitespace and a
/// case-insensitive `am`/`pm`. 12-hour edge cases: `12AM` → 0, `12PM` →
/// 720. `"24:00"` is accepted and normalized by the caller.
fn parse_time(text: &str) -> Option<u32> {
    let s = text.trim();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let mut i = 0usize;

    while i < len && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return None;
    }
    let hour: u32 = s[..i].parse().ok()?;

    let mut minute = 0u32;
    if i < len && bytes[i] == b':' {
        let mm_start = i + 1;
        let mut j = mm_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == mm_start {
            return None;
        }
        minute = s[mm_start..j].parse().ok()?;
        i = j;
    }
    if minute > 59 {
        return None;
    }

    while i < len && bytes[i] == b' ' {
        i += 1;
    }

    let rest = s[i..].trim();
    let hour = if rest.eq_ignore_ascii_case("am") {
        if hour == 0 || hour > 12 {
            return None;
        }
        if hour == 12 {
            0
        } else {
            hour
        }
    } else if rest.eq_ignore_ascii_case("pm") {
        if hour == 0 || hour > 12 {
            return None;
        }
        if hour == 12 {
            12
        } else {
            hour + 12
        }
    } else if rest.is_empty() {
        if hour > 24 || (hour == 24 && minute != 0) {
            return None;
        }
        hour
    } else {
        return None;
    };

    Some(hour * 60 + minute)
}
