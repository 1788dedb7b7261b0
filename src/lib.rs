//! Student roster viewer: load a list of students and their grades, then
//! list, search, filter and summarize them.

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;

pub use app::{Command, Outcome, RosterApp};
pub use data::model::{GradeScale, Roster, Student, average};
pub use state::Session;
