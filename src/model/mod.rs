pub mod attendance;
pub mod employee;
pub mod event;
pub mod shift;
