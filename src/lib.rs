//! # school-quiz
//!
//! Quiz sessions for a school platform: students take timed quizzes, and
//! students, teachers and parents review graded submissions. The engine
//! talks to the school REST backend through [`api::QuizBackend`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use school_quiz::api::HttpBackend;
//! use school_quiz::client::{self, Mode};
//! use school_quiz::models::QuizKey;
//! use school_quiz::{Config, Error};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Error> {
//!     let config = Config::from_env()?;
//!     let backend = Arc::new(HttpBackend::new(&config)?);
//!
//!     client::run(backend, Mode::Take(QuizKey::new("math-7", "12"))).await
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod protocol;
pub mod session;
pub mod terminal;

pub use config::Config;
pub use error::{Error, Result};
