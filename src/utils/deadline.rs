use std::future::Future;
use std::time::Duration;

use crate::utils::errors::ApiError;

/// Runs `operation` under a deadline; elapsing turns into [`ApiError::Timeout`].
///
/// The operation is dropped when the deadline passes, which cancels any
/// in-flight driver call it owns.
pub async fn with_deadline<T, F>(deadline: Duration, operation: F) -> Result<T, ApiError>
where
    F: Future<Output = Result<T, ApiError>>,
{
    match tokio::time::timeout(deadline, operation).await {
        Ok(result) => result,
        Err(_) => Err(ApiError::Timeout(deadline)),
    }
}
