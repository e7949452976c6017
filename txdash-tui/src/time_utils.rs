use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        dt.to_offset(local_offset)
    } else {
        dt
    }
}

fn from_epoch_ms(ms: i64) -> Option<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(ms as i128 * 1_000_000).ok()
}

/// Local date and time for a transaction timestamp, e.g. `2024-03-09 14:05`.
pub fn format_timestamp(ms: i64) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    from_epoch_ms(ms)
        .map(to_local_time)
        .and_then(|dt| dt.format(&format).ok())
        .unwrap_or_else(|| ms.to_string())
}

/// Local date only, used for chart axis labels.
pub fn format_date(ms: i64) -> String {
    let format = format_description!("[month]/[day]");
    from_epoch_ms(ms)
        .map(to_local_time)
        .and_then(|dt| dt.format(&format).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_render_as_dates() {
        let formatted = format_timestamp(1_700_000_000_000);
        assert_eq!(formatted.len(), "2023-11-14 22:13".len());
        assert!(formatted.starts_with("2023-11-1"));
    }

    #[test]
    fn out_of_range_timestamp_falls_back_to_raw_value() {
        assert_eq!(format_timestamp(i64::MAX), i64::MAX.to_string());
        assert_eq!(format_date(i64::MAX), "");
    }
}
