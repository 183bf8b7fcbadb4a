use chrono::{DateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use time::{Date, OffsetDateTime, UtcOffset};

/// Offset of `tz` from UTC at the instant `time`.
pub fn offset_at(time: OffsetDateTime, tz: Tz) -> UtcOffset {
    DateTime::<Utc>::from_timestamp(time.unix_timestamp(), 0)
        .map(|utc| tz.offset_from_utc_datetime(&utc.naive_utc()).fix().local_minus_utc())
        .and_then(|seconds| UtcOffset::from_whole_seconds(seconds).ok())
        .unwrap_or(UtcOffset::UTC)
}

pub fn localized_datetime(time: OffsetDateTime, tz: Tz) -> OffsetDateTime {
    time.to_offset(offset_at(time, tz))
}

pub fn localized_date(time: OffsetDateTime, tz: Tz) -> Date {
    localized_datetime(time, tz).date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn late_utc_evening_is_next_day_in_jakarta() {
        let instant = datetime!(2026-10-18 20:30 UTC);
        assert_eq!(
            localized_date(instant, chrono_tz::Asia::Jakarta),
            date!(2026 - 10 - 19)
        );
        assert_eq!(localized_date(instant, chrono_tz::UTC), date!(2026 - 10 - 18));
    }

    #[test]
    fn source_offset_does_not_leak_into_result() {
        let instant = datetime!(2026-10-19 01:00 +07:00);
        assert_eq!(localized_date(instant, chrono_tz::UTC), date!(2026 - 10 - 18));
    }
}
