//! Shared database utilities: errors and connection retry.

mod error;
mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{retry, retry_with_backoff, RetryConfig};
