//! Access to the school REST backend.

mod backend;
mod http;

pub use backend::QuizBackend;
pub use http::HttpBackend;
