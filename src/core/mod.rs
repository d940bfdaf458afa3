//! Core application primitives (refresh pass, scheduling, HTTP)

pub mod http;
pub mod refresh;
pub mod scheduler;

pub use http::*;
pub use refresh::*;
pub use scheduler::*;
