//! Request middleware.
//!
//! [`Trace`] tags every request with a trace identifier that error payloads
//! and logs share.

pub mod trace;

pub use trace::Trace;
