//! Track length parsing.
//!
//! Catalog length fields are either a raw seconds value (`"245"`,
//! `"245.91"`) or clock text (`"3:45"`, `"1:02:30"`). Unparseable input
//! yields no duration rather than an error.

use std::time::Duration;
use tracing::debug;

/// Parse a catalog length field into a [`Duration`].
pub fn parse_length(raw: &str) -> Option<Duration> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(secs) = s.parse::<f64>() {
        if secs.is_finite() && secs >= 0.0 {
            return Some(Duration::from_secs_f64(secs));
        }
        return None;
    }

    let parts: Vec<&str> = s.split(':').collect();
    let parsed = match parts.as_slice() {
        [m, sec] => {
            let m = m.trim().parse::<u64>().ok()?;
            let sec = sec.trim().parse::<u64>().ok()?;
            Some(m * 60 + sec)
        }
        [h, m, sec] => {
            let h = h.trim().parse::<u64>().ok()?;
            let m = m.trim().parse::<u64>().ok()?;
            let sec = sec.trim().parse::<u64>().ok()?;
            Some(h * 3600 + m * 60 + sec)
        }
        _ => None,
    };

    if parsed.is_none() {
        debug!(length = raw, "unparseable track length");
    }
    parsed.map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_seconds() {
        assert_eq!(parse_length("245"), Some(Duration::from_secs(245)));
        assert_eq!(parse_length("245"), Some(Duration::from_secs(4 * 60 + 5)));
    }

    #[test]
    fn fractional_seconds() {
        let d = parse_length("181.42").unwrap();
        assert_eq!(d.as_secs(), 181);
    }

    #[test]
    fn minutes_and_seconds() {
        assert_eq!(parse_length("3:45"), Some(Duration::from_secs(225)));
        assert_eq!(parse_length(" 3:45 "), Some(Duration::from_secs(225)));
    }

    #[test]
    fn hours_minutes_seconds() {
        assert_eq!(parse_length("1:02:30"), Some(Duration::from_secs(3750)));
    }

    #[test]
    fn unparseable_is_absent() {
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("   "), None);
        assert_eq!(parse_length("abc"), None);
        assert_eq!(parse_length("1:2:3:4"), None);
        assert_eq!(parse_length("-30"), None);
    }
}
