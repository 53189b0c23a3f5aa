//! Attendance early warning toolkit: percentage math, threshold alerts, and
//! what-if projections for student attendance.

pub mod attendance;
pub mod error;
pub mod models;
pub mod notify;
pub mod roster;
pub mod summary;
