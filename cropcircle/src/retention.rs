//! Retention cutoff for sightings.
//!
//! The tracked rotation restarts at a weekly reset, after which every earlier
//! sighting is meaningless. [`RetentionPolicy::cutoff`] returns the instant
//! before which sightings should be purged.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

/// A reset recurring every week at the same weekday and wall-clock time.
///
/// The weekday and time are read in `time_zone`, so a reset pinned to a
/// zone with daylight saving moves by an hour in UTC across the year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyReset {
    weekday: Weekday,
    time: NaiveTime,
    time_zone: Tz,
}

impl WeeklyReset {
    /// A reset at `time` UTC every `weekday`.
    pub fn new(weekday: Weekday, time: NaiveTime) -> Self {
        Self {
            weekday,
            time,
            time_zone: Tz::UTC,
        }
    }

    /// Read the weekday and time in `time_zone` instead of UTC.
    pub fn in_time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    pub fn time_zone(&self) -> Tz {
        self.time_zone
    }

    /// The most recent reset at or before `now`.
    pub fn last_reset(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.reset_on(self.last_reset_date(now))
    }

    /// The first reset strictly after `now`.
    pub fn next_reset(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.reset_on(self.last_reset_date(now) + Duration::weeks(1))
    }

    /// Local date of the most recent reset at or before `now`.
    fn last_reset_date(&self, now: DateTime<Utc>) -> NaiveDate {
        let local = now.with_timezone(&self.time_zone);
        let days_back = (local.weekday().num_days_from_monday() + 7
            - self.weekday.num_days_from_monday())
            % 7;
        let date = local.date_naive() - Duration::days(days_back as i64);
        if self.reset_on(date) > now {
            date - Duration::weeks(1)
        } else {
            date
        }
    }

    /// Instant of the reset on local `date`.
    fn reset_on(&self, date: NaiveDate) -> DateTime<Utc> {
        let local = date.and_time(self.time);
        match self.time_zone.from_local_datetime(&local).earliest() {
            Some(instant) => instant.with_timezone(&Utc),
            // Skipped by a daylight saving jump: take the wall-clock time as UTC.
            None => local.and_utc(),
        }
    }
}

/// How long sightings are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RetentionPolicy {
    /// Sightings are only removed when found stale.
    #[default]
    Disabled,
    /// Sightings made before the most recent weekly reset are removed.
    Weekly(WeeklyReset),
}

impl RetentionPolicy {
    /// Instant before which sightings are expired, if any.
    pub fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            RetentionPolicy::Disabled => None,
            RetentionPolicy::Weekly(reset) => Some(reset.last_reset(now)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wednesday_1130() -> WeeklyReset {
        WeeklyReset::new(Weekday::Wed, NaiveTime::from_hms_opt(11, 30, 0).unwrap())
    }

    #[test]
    fn test_last_reset_later_in_week() {
        // Friday 2024-03-08 -> Wednesday 2024-03-06 11:30
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap();
        assert_eq!(
            wednesday_1130().last_reset(now),
            Utc.with_ymd_and_hms(2024, 3, 6, 11, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_last_reset_same_day_before_time() {
        // Wednesday 2024-03-06 10:00 -> previous Wednesday
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 10, 0, 0).unwrap();
        assert_eq!(
            wednesday_1130().last_reset(now),
            Utc.with_ymd_and_hms(2024, 2, 28, 11, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_last_reset_exactly_at_time() {
        let now = Utc.with_ymd_and_hms(2024, 3, 6, 11, 30, 0).unwrap();
        assert_eq!(wednesday_1130().last_reset(now), now);
    }

    #[test]
    fn test_last_reset_earlier_in_week() {
        // Monday 2024-03-04 -> Wednesday 2024-02-28
        let now = Utc.with_ymd_and_hms(2024, 3, 4, 23, 0, 0).unwrap();
        assert_eq!(
            wednesday_1130().last_reset(now),
            Utc.with_ymd_and_hms(2024, 2, 28, 11, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_next_reset() {
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap();
        assert_eq!(
            wednesday_1130().next_reset(now),
            Utc.with_ymd_and_hms(2024, 3, 13, 11, 30, 0).unwrap()
        );
    }

    fn london() -> WeeklyReset {
        wednesday_1130().in_time_zone(chrono_tz::Europe::London)
    }

    #[test]
    fn test_london_winter_matches_utc() {
        let now = Utc.with_ymd_and_hms(2024, 1, 12, 9, 0, 0).unwrap();
        assert_eq!(london().last_reset(now), wednesday_1130().last_reset(now));
    }

    #[test]
    fn test_london_summer_reset_is_an_hour_earlier_in_utc() {
        // 11:30 BST is 10:30 UTC.
        let after = Utc.with_ymd_and_hms(2024, 7, 10, 10, 45, 0).unwrap();
        assert_eq!(
            london().last_reset(after),
            Utc.with_ymd_and_hms(2024, 7, 10, 10, 30, 0).unwrap()
        );
        // Read as UTC, the same instant is still before that day's reset.
        assert_eq!(
            wednesday_1130().last_reset(after),
            Utc.with_ymd_and_hms(2024, 7, 3, 11, 30, 0).unwrap()
        );

        let before = Utc.with_ymd_and_hms(2024, 7, 10, 10, 15, 0).unwrap();
        assert_eq!(
            london().last_reset(before),
            Utc.with_ymd_and_hms(2024, 7, 3, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_next_reset_across_clock_change() {
        // British Summer Time starts on Sunday 2024-03-31.
        let now = Utc.with_ymd_and_hms(2024, 3, 29, 12, 0, 0).unwrap();
        assert_eq!(
            london().last_reset(now),
            Utc.with_ymd_and_hms(2024, 3, 27, 11, 30, 0).unwrap()
        );
        assert_eq!(
            london().next_reset(now),
            Utc.with_ymd_and_hms(2024, 4, 3, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_policy_cutoff() {
        let now = Utc.with_ymd_and_hms(2024, 3, 8, 9, 0, 0).unwrap();
        assert_eq!(RetentionPolicy::Disabled.cutoff(now), None);
        assert_eq!(
            RetentionPolicy::Weekly(wednesday_1130()).cutoff(now),
            Some(Utc.with_ymd_and_hms(2024, 3, 6, 11, 30, 0).unwrap())
        );
    }
}
