//! Work-date classification for the raw events view.
//!
//! An overnight shift's early-morning tail (say a 01:30 exit) belongs to the
//! previous evening's work-date, so events before the cutoff hour are shifted
//! back one calendar day.

use chrono::{DateTime, Duration, NaiveDate, Timelike};
use chrono_tz::Tz;
use serde::Serialize;
use utoipa::ToSchema;

use super::EngineConfig;
use crate::model::event::PunchEvent;

/// A raw punch event tagged with its device-local time and work-date.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WorkDatedEvent {
    pub employee_no: Option<String>,
    pub card_no: Option<String>,
    pub person_name: Option<String>,
    #[schema(example = "FacePass")]
    pub event_type: String,
    /// Device-local `YYYY-MM-DD HH:MM:SS`.
    #[schema(example = "2025-09-03 21:13:42")]
    pub event_time: String,
    #[schema(value_type = String, format = "date")]
    pub work_date: NaiveDate,
    pub door_no: Option<i32>,
    pub reader_no: Option<i32>,
    pub device_ip: Option<String>,
}

/// The calendar date an event's attendance is attributed to: its local date,
/// or the previous date when the local hour is before the night cutoff.
pub fn classify_work_date(local: DateTime<Tz>, cutoff_hour: u32) -> NaiveDate {
    if local.hour() >= cutoff_hour {
        local.date_naive()
    } else {
        local.date_naive() - Duration::days(1)
    }
}

pub fn tag_events(events: Vec<PunchEvent>, cfg: &EngineConfig) -> Vec<WorkDatedEvent> {
    events
        .into_iter()
        .map(|e| {
            let local = e.event_time.with_timezone(&cfg.device_tz);
            WorkDatedEvent {
                employee_no: e.employee_no,
                card_no: e.card_no,
                person_name: e.person_name,
                event_type: e.event_type,
                event_time: local.format("%Y-%m-%d %H:%M:%S").to_string(),
                work_date: classify_work_date(local, cfg.night_cutoff_hour),
                door_no: e.door_no,
                reader_no: e.reader_no,
                device_ip: e.device_ip,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn karachi_local(h: u32, mi: u32) -> DateTime<Tz> {
        chrono_tz::Asia::Karachi
            .with_ymd_and_hms(2025, 9, 4, h, mi, 0)
            .unwrap()
    }

    #[test]
    fn before_cutoff_belongs_to_previous_day() {
        assert_eq!(
            classify_work_date(karachi_local(1, 30), 2),
            NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
        );
    }

    #[test]
    fn at_or_after_cutoff_keeps_its_day() {
        assert_eq!(
            classify_work_date(karachi_local(2, 0), 2),
            NaiveDate::from_ymd_opt(2025, 9, 4).unwrap()
        );
        assert_eq!(
            classify_work_date(karachi_local(2, 30), 2),
            NaiveDate::from_ymd_opt(2025, 9, 4).unwrap()
        );
        assert_eq!(
            classify_work_date(karachi_local(21, 0), 2),
            NaiveDate::from_ymd_opt(2025, 9, 4).unwrap()
        );
    }

    #[test]
    fn tagging_formats_local_time() {
        let cfg = crate::engine::test_config();
        let event = PunchEvent {
            id: 1,
            employee_no: Some("101".to_string()),
            card_no: None,
            person_name: None,
            event_type: "FacePass".to_string(),
            // 20:13:42 UTC = 01:13:42 next day in Karachi (+05:00)
            event_time: chrono::Utc.with_ymd_and_hms(2025, 9, 3, 20, 13, 42).unwrap(),
            door_no: None,
            reader_no: None,
            device_ip: None,
        };
        let tagged = tag_events(vec![event], &cfg);
        assert_eq!(tagged[0].event_time, "2025-09-04 01:13:42");
        assert_eq!(tagged[0].work_date, NaiveDate::from_ymd_opt(2025, 9, 3).unwrap());
    }
}
