//! Child-process invocation
//!
//! One request, one process, one result. Spawning hands the caller a live
//! [`Invocation`] whose output is tailed concurrently by two background
//! readers; waiting or terminating joins the readers and freezes the
//! result.

pub mod env;
pub mod invoker;
pub mod request;
pub mod result;
mod tailing;

pub use env::EnvironmentOverlay;
pub use invoker::Invocation;
pub use request::InvocationRequest;
pub use result::InvocationResult;
