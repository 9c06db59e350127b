//! 时间工具函数: 业务时区转换
//!
//! Date → timestamp conversion happens at the handler / engine boundary;
//! repositories only see `i64` Unix millis.

use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;

use super::{AppError, AppResult};

/// 解析日期字符串 (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {date}, expected YYYY-MM-DD")))
}

/// 日期开始 (00:00:00) → Unix millis (业务时区)
///
/// DST gap fallback: if local midnight does not exist, fall back to UTC midnight.
pub fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_time(chrono::NaiveTime::MIN);
    naive
        .and_local_timezone(tz)
        .earliest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// 日期结束 → 次日 00:00:00 的 Unix millis (业务时区)
///
/// Callers use `< end` (exclusive).
pub fn day_end_millis(date: NaiveDate, tz: Tz) -> i64 {
    let next_day = date.succ_opt().unwrap_or(date);
    day_start_millis(next_day, tz)
}

/// Calendar date of a timestamp in the business timezone
pub fn local_date(millis: i64, tz: Tz) -> NaiveDate {
    tz.timestamp_millis_opt(millis)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or_else(|| {
            chrono::DateTime::from_timestamp_millis(millis)
                .map(|dt| dt.date_naive())
                .unwrap_or_default()
        })
}

/// Parse an inclusive `[start, end]` date range into `[start_millis, end_millis)`
pub fn date_range_millis(start: &str, end: &str, tz: Tz) -> AppResult<(NaiveDate, NaiveDate, i64, i64)> {
    let start_date = parse_date(start)?;
    let end_date = parse_date(end)?;
    if start_date > end_date {
        return Err(AppError::validation(format!(
            "Start date {start_date} is after end date {end_date}"
        )));
    }
    Ok((
        start_date,
        end_date,
        day_start_millis(start_date, tz),
        day_end_millis(end_date, tz),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        let d = parse_date("2025-11-21").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 11, 21).unwrap());
        assert!(parse_date("21/11/2025").is_err());
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_day_window_utc() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let start = day_start_millis(d, Tz::UTC);
        let end = day_end_millis(d, Tz::UTC);
        assert_eq!(start, 1_735_689_600_000);
        assert_eq!(end - start, 86_400_000);
    }

    #[test]
    fn test_day_window_respects_timezone() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let utc = day_start_millis(d, Tz::UTC);
        let madrid = day_start_millis(d, chrono_tz::Europe::Madrid);
        // Madrid is UTC+1 in January
        assert_eq!(utc - madrid, 3_600_000);
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        // 2025-01-01 23:30 UTC is already Jan 2 in Madrid
        let ts = 1_735_689_600_000 + 23 * 3_600_000 + 30 * 60_000;
        assert_eq!(local_date(ts, Tz::UTC), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(
            local_date(ts, chrono_tz::Europe::Madrid),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_date_range_rejects_inverted() {
        assert!(date_range_millis("2025-01-02", "2025-01-01", Tz::UTC).is_err());
        let (_, _, s, e) = date_range_millis("2025-01-01", "2025-01-01", Tz::UTC).unwrap();
        assert_eq!(e - s, 86_400_000);
    }
}
