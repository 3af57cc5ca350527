use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A schedule definition. Start and end are wall-clock `HH:MM` strings with an
/// AM/PM period and no date; the end always falls on the calendar day after
/// the start when a window is built from it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema, PartialEq, Eq)]
#[schema(
    example = json!({
        "id": 1,
        "start_time": "21:00",
        "start_period": "PM",
        "end_time": "06:00",
        "end_period": "AM"
    })
)]
pub struct Shift {
    pub id: u64,
    #[schema(example = "21:00")]
    pub start_time: String,
    #[schema(example = "PM")]
    pub start_period: String,
    #[schema(example = "06:00")]
    pub end_time: String,
    #[schema(example = "AM")]
    pub end_period: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewShift {
    #[schema(example = "21:00")]
    pub start_time: String,
    #[schema(example = "PM")]
    pub start_period: String,
    #[schema(example = "06:00")]
    pub end_time: String,
    #[schema(example = "AM")]
    pub end_period: String,
}
