//! Terminal client for taking and reviewing quizzes.

mod client;
mod state;
mod ui;

pub use client::{Mode, run};
