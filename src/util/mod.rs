pub(crate) fn today_iso_local() -> String {
    // Use system local timezone (browser runtime).
    let d = js_sys::Date::new_0();
    let y = d.get_full_year();
    let m = d.get_month() + 1;
    let day = d.get_date();
    format!("{:04}-{:02}-{:02}", y, m, day)
}

fn parse_hh_mm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    let h: u32 = h.parse().ok()?;
    let m: u32 = m.parse().ok()?;
    (h < 24 && m < 60).then_some((h, m))
}

/// `HH:MM` with an optional `:SS` tail, as SQL `TIME` columns serialize.
fn parse_clock(s: &str) -> Option<(u32, u32)> {
    let s = s.trim();
    match s.rsplit_once(':') {
        Some((hm, ss)) if hm.contains(':') => {
            if ss.len() != 2 || ss.parse::<u32>().ok()? >= 60 {
                return None;
            }
            parse_hh_mm(hm)
        }
        _ => parse_hh_mm(s),
    }
}

/// Accepts 24-hour `H:MM` / `HH:MM`.
pub(crate) fn is_hh_mm(s: &str) -> bool {
    parse_hh_mm(s).is_some()
}

/// `"14:05"` -> `"2:05 PM"`; seconds are dropped. Anything unparsable is returned as-is.
pub(crate) fn format_time_12h(s: &str) -> String {
    let Some((h, m)) = parse_clock(s) else {
        return s.to_string();
    };
    let ampm = if h >= 12 { "PM" } else { "AM" };
    let h12 = match h % 12 {
        0 => 12,
        x => x,
    };
    format!("{}:{:02} {}", h12, m, ampm)
}

/// Share of `done` in `total` as a whole percentage, rounded half up.
pub(crate) fn percent(done: u64, total: u64) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u32
}

/// `"2026-10-18"` -> `"Sunday, October 18, 2026"`.
pub(crate) fn format_long_date(iso: &str) -> String {
    let parts: Vec<&str> = iso.trim().splitn(3, '-').collect();
    let [y, m, d] = parts[..] else {
        return iso.to_string();
    };
    // Tolerate a trailing time component (`2026-10-18T07:00:00`).
    let d = d.get(..2).unwrap_or(d);
    let (Ok(y), Ok(m), Ok(d)) = (y.parse::<i32>(), m.parse::<u32>(), d.parse::<u32>()) else {
        return iso.to_string();
    };
    if !(1..=12).contains(&m) || !(1..=31).contains(&d) {
        return iso.to_string();
    }

    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    const WEEKDAYS: [&str; 7] = [
        "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
    ];

    // Sakamoto's day-of-week.
    const T: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let yy = if m < 3 { y - 1 } else { y };
    let dow = (yy + yy / 4 - yy / 100 + yy / 400 + T[(m - 1) as usize] + d as i32).rem_euclid(7);

    format!(
        "{}, {} {}, {}",
        WEEKDAYS[dow as usize],
        MONTHS[(m - 1) as usize],
        d,
        y
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_12h() {
        assert_eq!(format_time_12h("14:05"), "2:05 PM");
        assert_eq!(format_time_12h("00:30"), "12:30 AM");
        assert_eq!(format_time_12h("12:00"), "12:00 PM");
        assert_eq!(format_time_12h("9:15"), "9:15 AM");
    }

    #[test]
    fn test_format_time_12h_drops_seconds() {
        assert_eq!(format_time_12h("09:00:00"), "9:00 AM");
        assert_eq!(format_time_12h("17:45:30"), "5:45 PM");
        assert_eq!(format_time_12h("09:00:99"), "09:00:99");
        // Start-time validation stays strict.
        assert!(!is_hh_mm("09:00:00"));
    }

    #[test]
    fn test_format_time_12h_passes_through_garbage() {
        assert_eq!(format_time_12h("soon"), "soon");
        assert_eq!(format_time_12h("25:00"), "25:00");
        assert_eq!(format_time_12h(""), "");
    }

    #[test]
    fn test_is_hh_mm() {
        assert!(is_hh_mm("09:00"));
        assert!(is_hh_mm("23:59"));
        assert!(!is_hh_mm("24:00"));
        assert!(!is_hh_mm("9:5"));
        assert!(!is_hh_mm("0900"));
    }

    #[test]
    fn test_percent_rounds_to_nearest() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(1, 8), 13);
        assert_eq!(percent(4, 4), 100);
    }

    #[test]
    fn test_format_long_date() {
        assert_eq!(format_long_date("2026-10-18"), "Sunday, October 18, 2026");
        assert_eq!(format_long_date("2024-02-29"), "Thursday, February 29, 2024");
        assert_eq!(format_long_date("2026-10-18T07:00:00"), "Sunday, October 18, 2026");
        assert_eq!(format_long_date("tomorrow"), "tomorrow");
    }
}
