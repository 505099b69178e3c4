use chrono::{DateTime, Datelike, Local, NaiveDate, Weekday};

pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Maps story days onto wall-clock dates. Day 1 is the start timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimCalendar {
    pub start_ms: i64,
}

impl SimCalendar {
    pub fn new(start_ms: i64) -> Self {
        Self { start_ms }
    }

    pub fn timestamp_for_day(&self, day: u32) -> i64 {
        self.start_ms + (day as i64 - 1) * MILLIS_PER_DAY
    }

    pub fn local_date_for_day(&self, day: u32) -> NaiveDate {
        DateTime::from_timestamp_millis(self.timestamp_for_day(day))
            .map(|utc| utc.with_timezone(&Local).date_naive())
            .unwrap_or_default()
    }

    /// e.g. "martes, 14 de octubre de 2025".
    pub fn date_for_day(&self, day: u32) -> String {
        format_spanish_date(self.local_date_for_day(day))
    }
}

pub fn format_spanish_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Whole days between `start_ms` and `now_ms`; never negative.
pub fn elapsed_days(start_ms: i64, now_ms: i64) -> u32 {
    let elapsed = (now_ms - start_ms).max(0) / MILLIS_PER_DAY;
    u32::try_from(elapsed).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_in_spanish() {
        let date = NaiveDate::from_ymd_opt(2025, 10, 14).unwrap();
        assert_eq!(format_spanish_date(date), "martes, 14 de octubre de 2025");
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        assert_eq!(format_spanish_date(date), "domingo, 1 de febrero de 2026");
    }

    #[test]
    fn days_are_one_day_apart() {
        let calendar = SimCalendar::new(1_760_000_000_000);
        assert_eq!(calendar.timestamp_for_day(1), calendar.start_ms);
        assert_eq!(
            calendar.timestamp_for_day(3) - calendar.timestamp_for_day(2),
            MILLIS_PER_DAY
        );
        assert_eq!(calendar.timestamp_for_day(0), calendar.start_ms - MILLIS_PER_DAY);
        let d1 = calendar.local_date_for_day(1);
        let d2 = calendar.local_date_for_day(2);
        assert_eq!(d2.signed_duration_since(d1).num_days(), 1);
    }

    #[test]
    fn elapsed_days_truncates_and_clamps() {
        assert_eq!(elapsed_days(0, MILLIS_PER_DAY - 1), 0);
        assert_eq!(elapsed_days(0, 3 * MILLIS_PER_DAY + 5), 3);
        assert_eq!(elapsed_days(10 * MILLIS_PER_DAY, 0), 0);
    }
}
