//! External data-store collaborators. The attendance engine only ever reads
//! through these; writes come from the ingest and administration endpoints.

pub mod employees;
pub mod events;
pub mod shifts;

/// `?, ?, ...` fragment for a dynamic IN list.
pub(crate) fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
