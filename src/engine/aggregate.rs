//! Punch-event aggregation.
//!
//! Collapses the raw events of one shift window into at most one check-in and
//! one check-out candidate per employee: the earliest punch on the inbound
//! side and the latest punch on the outbound side. Punches in the dead zone
//! between the two sub-windows are counted for neither.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::window::ShiftWindow;
use crate::model::event::PunchEvent;

/// Aggregated punches of one employee within one shift window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayPunches {
    pub check_in: Option<DateTime<Utc>>,
    pub check_out: Option<DateTime<Utc>>,
    /// Representative device-reported name, first seen in the group. A given
    /// identifier is assumed to always report the same name and card.
    pub person_name: Option<String>,
    pub card_no: Option<String>,
}

/// Group qualifying events by employee identifier and select the check-in /
/// check-out candidates. Events without an identifier are skipped; attendance
/// rows are keyed by employee.
pub fn aggregate_by_employee(
    events: &[PunchEvent],
    window: &ShiftWindow,
) -> BTreeMap<String, DayPunches> {
    let mut grouped: BTreeMap<String, DayPunches> = BTreeMap::new();

    for event in events {
        let Some(employee_no) = event.employee_no.as_deref().filter(|no| !no.is_empty()) else {
            continue;
        };
        let entry = grouped.entry(employee_no.to_string()).or_default();

        if entry.person_name.is_none() {
            entry.person_name = event.person_name.clone();
        }
        if entry.card_no.is_none() {
            entry.card_no = event.card_no.clone();
        }

        let t = event.event_time;
        if t >= window.start && t <= window.inbound_cutoff && entry.check_in.is_none_or(|cur| t < cur)
        {
            entry.check_in = Some(t);
        }
        if t >= window.outbound_floor && t <= window.end && entry.check_out.is_none_or(|cur| t > cur)
        {
            entry.check_out = Some(t);
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::window::window_for;
    use crate::engine::test_config;
    use chrono::{NaiveDate, TimeZone};

    fn event(no: Option<&str>, time: DateTime<Utc>) -> PunchEvent {
        PunchEvent {
            id: 0,
            employee_no: no.map(str::to_string),
            card_no: Some("0004123".to_string()),
            person_name: Some("John Doe".to_string()),
            event_type: "FacePass".to_string(),
            event_time: time,
            door_no: Some(1),
            reader_no: Some(1),
            device_ip: None,
        }
    }

    fn karachi(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        chrono_tz::Asia::Karachi
            .with_ymd_and_hms(y, mo, d, h, mi, s)
            .unwrap()
            .with_timezone(&Utc)
    }

    fn window() -> ShiftWindow {
        window_for(NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(), &test_config()).unwrap()
    }

    #[test]
    fn earliest_inbound_and_latest_outbound_win() {
        let events = vec![
            event(Some("101"), karachi(2025, 9, 3, 21, 40, 0)),
            event(Some("101"), karachi(2025, 9, 3, 21, 13, 0)),
            event(Some("101"), karachi(2025, 9, 4, 4, 50, 0)),
            event(Some("101"), karachi(2025, 9, 4, 5, 58, 0)),
        ];
        let grouped = aggregate_by_employee(&events, &window());
        let p = &grouped["101"];
        assert_eq!(p.check_in, Some(karachi(2025, 9, 3, 21, 13, 0)));
        assert_eq!(p.check_out, Some(karachi(2025, 9, 4, 5, 58, 0)));
    }

    #[test]
    fn dead_zone_punch_is_neither_in_nor_out() {
        let events = vec![event(Some("101"), karachi(2025, 9, 3, 23, 59, 30))];
        let grouped = aggregate_by_employee(&events, &window());
        let p = &grouped["101"];
        // the group still exists, carrying name/card, but both sides are absent
        assert_eq!(p.check_in, None);
        assert_eq!(p.check_out, None);
        assert_eq!(p.person_name.as_deref(), Some("John Doe"));
        assert_eq!(p.card_no.as_deref(), Some("0004123"));
    }

    #[test]
    fn sub_window_bounds_are_inclusive() {
        let events = vec![
            event(Some("101"), karachi(2025, 9, 3, 21, 0, 0)),
            event(Some("101"), karachi(2025, 9, 3, 23, 59, 0)),
            event(Some("102"), karachi(2025, 9, 4, 0, 0, 0)),
            event(Some("102"), karachi(2025, 9, 4, 6, 0, 0)),
        ];
        let grouped = aggregate_by_employee(&events, &window());
        assert_eq!(grouped["101"].check_in, Some(karachi(2025, 9, 3, 21, 0, 0)));
        assert_eq!(grouped["101"].check_out, None);
        assert_eq!(grouped["102"].check_in, None);
        assert_eq!(grouped["102"].check_out, Some(karachi(2025, 9, 4, 6, 0, 0)));
    }

    #[test]
    fn events_without_identifier_are_skipped() {
        let events = vec![
            event(None, karachi(2025, 9, 3, 21, 10, 0)),
            event(Some(""), karachi(2025, 9, 3, 21, 11, 0)),
            event(Some("101"), karachi(2025, 9, 3, 21, 12, 0)),
        ];
        let grouped = aggregate_by_employee(&events, &window());
        assert_eq!(grouped.len(), 1);
        assert!(grouped.contains_key("101"));
    }
}
