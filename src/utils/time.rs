//! Time utilities: parsing HH:MM wall-clock times and fixed UTC offsets.

use chrono::{FixedOffset, NaiveTime};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t, "%H:%M").ok()
}

/// Parse a fixed UTC offset written as "+09:00", "-05:30", "+0900".
pub fn parse_utc_offset(s: &str) -> Option<FixedOffset> {
    let s = s.trim();
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1i32, &s[1..]),
        b'-' => (-1i32, &s[1..]),
        _ => return None,
    };

    let (hh, mm) = if let Some((h, m)) = rest.split_once(':') {
        (h, m)
    } else if rest.len() == 4 && rest.is_char_boundary(2) {
        // Compact form must be four ASCII digits; a multi-byte char
        // would make byte index 2 fall inside a character.
        rest.split_at(2)
    } else {
        return None;
    };

    let hours: i32 = hh.parse().ok()?;
    let minutes: i32 = mm.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_colon_and_compact_offsets() {
        assert_eq!(
            parse_utc_offset("+09:00").unwrap().local_minus_utc(),
            9 * 3600
        );
        assert_eq!(
            parse_utc_offset("-0530").unwrap().local_minus_utc(),
            -(5 * 3600 + 30 * 60)
        );
        assert!(parse_utc_offset("09:00").is_none());
        assert!(parse_utc_offset("+25:00").is_none());
    }

    #[test]
    fn rejects_malformed_offsets_without_panicking() {
        // Multi-byte character straddling the hours/minutes split.
        assert!(parse_utc_offset("+a\u{00a2}x").is_none());
        assert!(parse_utc_offset("+\u{00a2}\u{00a2}").is_none());
        assert!(parse_utc_offset("+9").is_none());
        assert!(parse_utc_offset("+ab:cd").is_none());
    }

    #[test]
    fn parses_wall_clock_times() {
        assert_eq!(
            parse_time("10:00").unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap()
        );
        assert!(parse_time("25:00").is_none());
    }
}
