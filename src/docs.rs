use crate::api::attendance::PresentEmployee;
use crate::api::employee::SaveEmployee;
use crate::engine::monthly::{DailyTime, DayCell, EmployeeMonthlySummary, MonthlyAttendance};
use crate::engine::work_date::WorkDatedEvent;
use crate::model::attendance::{AttendanceRecord, LateStatus};
use crate::model::employee::{DirectoryEntry, Employee};
use crate::model::event::{NewPunchEvent, PunchEvent};
use crate::model::shift::{NewShift, Shift};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Management API",
        version = "1.0.0",
        description = r#"
## Attendance Management Service

Computes workforce attendance from raw access-control punch events and a
configurable overnight shift schedule.

### Key Features
- **Event Ingestion** — the access-control device pushes badge/face/card scans
- **Attendance Reports** — per-day and date-range records with late/on-time verdicts
- **Monthly Report** — date × employee grid plus per-employee summary counters
- **Employee & Shift Administration** — registry of identifiers seen by the device
- **Diagnostics Console** — log tail and pool statistics, Basic-auth protected

### Response Format
JSON-based RESTful responses; attendance is recomputed from raw events on every
query, never persisted.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::get_health,
        crate::api::attendance::get_attendance,
        crate::api::attendance::get_present_employees,
        crate::api::attendance::get_monthly_attendance,

        crate::api::events::create_events,
        crate::api::events::get_events,

        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::save_employee,
        crate::api::employee::delete_employee,

        crate::api::shift::list_shifts,
        crate::api::shift::create_shift,
        crate::api::shift::delete_shift,

        crate::api::console::get_system_info,
        crate::api::console::get_logs,
        crate::api::console::get_connections,
    ),
    components(
        schemas(
            PunchEvent,
            NewPunchEvent,
            WorkDatedEvent,
            AttendanceRecord,
            LateStatus,
            PresentEmployee,
            MonthlyAttendance,
            EmployeeMonthlySummary,
            DailyTime,
            DayCell,
            Employee,
            DirectoryEntry,
            SaveEmployee,
            Shift,
            NewShift
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Attendance", description = "Attendance report APIs"),
        (name = "Events", description = "Raw punch event APIs"),
        (name = "Employee", description = "Employee registry APIs"),
        (name = "Shift", description = "Shift schedule APIs"),
        (name = "Console", description = "Diagnostics console APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
