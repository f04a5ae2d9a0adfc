use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::debug;

/// Timezone abbreviations seen in the wild across feed dates. They are
/// stripped before trying the naive formats; the RFC parsers handle the
/// ones they understand on their own.
const TZ_ABBREVIATIONS: [&str; 12] = [
    "UT", "GMT", "UTC", "EST", "EDT", "CST", "CDT", "MST", "MDT", "PST", "PDT", "Z",
];

const NAIVE_DATETIME_FORMATS: [&str; 3] = [
    // RSS style with the offset/zone already stripped
    "%a, %d %b %Y %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
];

const NAIVE_DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%m/%d/%Y"];

/// Parse a feed's published-date string into a UTC timestamp. Returns `None`
/// for anything unparseable or outside `[now - 365 days, now + 1 hour]`;
/// absence of a timestamp is an ordinary value here, not an error.
#[must_use]
pub fn parse_published(raw: &str, source_label: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    match try_formats(trimmed) {
        Some(ts) if in_accepted_range(ts, now) => Some(ts),
        Some(ts) => {
            debug!(source = source_label, raw, parsed = %ts, "published date out of accepted range");
            None
        }
        None => {
            debug!(source = source_label, raw, "unparseable published date");
            None
        }
    }
}

fn try_formats(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    // Naive fallbacks are taken as UTC
    let stripped = strip_timezone_tail(s);
    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(stripped, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(stripped, fmt) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&midnight));
        }
    }

    None
}

/// Drop trailing timezone abbreviations and numeric offsets, repeatedly, so
/// strings like `"2025-08-12 14:30:00 +0000 GMT"` reduce to the bare value.
fn strip_timezone_tail(s: &str) -> &str {
    let mut rest = s.trim();
    loop {
        let Some((head, tail)) = rest.rsplit_once(char::is_whitespace) else {
            return strip_attached_offset(rest);
        };
        let token = tail.trim();
        let is_abbreviation = TZ_ABBREVIATIONS
            .iter()
            .any(|abbr| token.eq_ignore_ascii_case(abbr));
        let is_offset = token.len() >= 3
            && (token.starts_with('+') || token.starts_with('-'))
            && token[1..].chars().all(|c| c.is_ascii_digit() || c == ':');
        if is_abbreviation || is_offset {
            rest = head.trim_end();
        } else {
            return strip_attached_offset(rest);
        }
    }
}

/// Peel a `+HHMM`/`-HH:MM` offset or `Z` written flush against the seconds
/// field. RFC 3339 rejects these strings for the space separator and
/// RFC 2822 for the layout, so the offset has to go before the naive
/// formats get a chance.
fn strip_attached_offset(s: &str) -> &str {
    if !s.contains(':') {
        return s;
    }
    if let Some(head) = s.strip_suffix(['Z', 'z']) {
        if head.ends_with(|c: char| c.is_ascii_digit()) {
            return head;
        }
    }
    if let Some(idx) = s.rfind(['+', '-']) {
        let (head, tail) = (&s[..idx], &s[idx + 1..]);
        let digits = tail.chars().filter(|c| c.is_ascii_digit()).count();
        if (digits == 2 || digits == 4)
            && tail.chars().all(|c| c.is_ascii_digit() || c == ':')
            && head.ends_with(|c: char| c.is_ascii_digit())
        {
            return head;
        }
    }
    s
}

/// Bound against garbage and future dates from malformed feeds.
fn in_accepted_range(ts: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    ts >= now - Duration::days(365) && ts <= now + Duration::hours(1)
}
