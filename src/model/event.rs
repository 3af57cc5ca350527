use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One observed access-control scan. Immutable once recorded; timestamps are
/// stored normalized to UTC.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_no": "101",
        "card_no": "0004123",
        "person_name": "John Doe",
        "event_type": "FacePass",
        "event_time": "2025-09-03T16:13:00Z",
        "door_no": 1,
        "reader_no": 1,
        "device_ip": "192.168.1.20"
    })
)]
pub struct PunchEvent {
    pub id: u64,

    /// Device-reported employee identifier; absent for unrecognized scans.
    #[schema(example = "101", nullable = true)]
    pub employee_no: Option<String>,

    pub card_no: Option<String>,

    /// Device-reported display name; may disagree with the registry.
    pub person_name: Option<String>,

    #[schema(example = "FacePass")]
    pub event_type: String,

    #[schema(value_type = String, format = "date-time")]
    pub event_time: DateTime<Utc>,

    pub door_no: Option<i32>,
    pub reader_no: Option<i32>,
    pub device_ip: Option<String>,
}

/// Ingest payload for one punch event; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NewPunchEvent {
    pub employee_no: Option<String>,
    pub card_no: Option<String>,
    pub person_name: Option<String>,
    #[schema(example = "FacePass")]
    pub event_type: String,
    #[schema(value_type = String, format = "date-time")]
    pub event_time: DateTime<Utc>,
    pub door_no: Option<i32>,
    pub reader_no: Option<i32>,
    pub device_ip: Option<String>,
}
