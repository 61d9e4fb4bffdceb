use chrono::NaiveDateTime;
use tracing::debug;

/// Layouts seen in the trip files, tried in order.
const FMTS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
];

/// Parse a trip timestamp such as `"2017-01-01 09:07:57"` into a naive local
/// date-time.
///
/// The files carry no offset, so the value is kept as wall-clock time in the
/// city where the trip happened. Returns `None` for empty strings or
/// unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    debug!("could not parse timestamp \"{}\"", s);
    None
}

/// Parse a birth-year cell.
///
/// Accepts plain integers (`"1985"`) and the float rendering some exports use
/// (`"1985.0"`). Blank or non-numeric cells yield `None`.
pub fn parse_birth_year(s: &str) -> Option<i32> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    match s.parse::<f64>() {
        Ok(year) if year.is_finite() => Some(year.trunc() as i32),
        _ => None,
    }
}
