use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::shift::Shift;

/// Registry row mapping a device employee identifier to a display name and an
/// optional shift. Identifiers seen in punch events are not guaranteed to have
/// a registry row yet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_no": "101",
        "name": "John Doe",
        "shift_id": 1
    })
)]
pub struct Employee {
    #[schema(example = "101")]
    pub employee_no: String,
    #[schema(example = "John Doe")]
    pub name: String,
    #[schema(example = 1, nullable = true)]
    pub shift_id: Option<u64>,
}

/// Registry entry with its shift resolved, as the attendance engine consumes it.
#[derive(Debug, Clone)]
pub struct EmployeeWithShift {
    pub employee_no: String,
    pub name: String,
    pub shift: Option<Shift>,
}

/// Directory row merging device-observed identifiers with the registry.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DirectoryEntry {
    #[schema(example = "101")]
    pub employee_no: String,
    #[schema(example = "John Doe", nullable = true)]
    pub name: Option<String>,
    #[schema(example = 1, nullable = true)]
    pub shift_id: Option<u64>,
    /// True once the identifier has both a registered name and a shift.
    pub has_details: bool,
}
