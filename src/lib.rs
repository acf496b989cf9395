//! Run tracking for the campus running app.
//!
//! [`metrics`] turns a GPS trace into distance, duration and pace.
//! [`session`] holds a recording in progress, [`track`] loads finished
//! recordings from disk and [`web`] serves both over HTTP.

pub mod metrics;
pub mod session;
pub mod track;
pub mod web;
