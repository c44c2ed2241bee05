//! Startup connectivity check.

use std::future::Future;
use std::time::Duration;

use crate::Backend;

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionStatus {
    pub success: bool,
    pub error: Option<String>,
}

impl ConnectionStatus {
    pub fn online() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    pub fn offline(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Check once whether the backend answers its health endpoint within `timeout`.
///
/// Never fails: network errors, non-2xx answers and timeouts all come back
/// as `success == false` with a description.
pub async fn test_connection<B>(backend: &B, timeout: Duration) -> ConnectionStatus
where
    B: Backend + ?Sized,
{
    match with_timeout(timeout, backend.health()).await {
        Some(Ok(())) => {
            tracing::info!("Backend connection successful");
            ConnectionStatus::online()
        }
        Some(Err(e)) => {
            tracing::error!("Backend connection failed: {}", e);
            ConnectionStatus::offline(e.to_string())
        }
        None => {
            tracing::error!("Backend connection timed out after {:?}", timeout);
            ConnectionStatus::offline(format!(
                "Health check timed out after {} ms",
                timeout.as_millis()
            ))
        }
    }
}

/// Run `fut`, giving up after `duration`.
pub async fn with_timeout<F: Future>(duration: Duration, fut: F) -> Option<F::Output> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        tokio::time::timeout(duration, fut).await.ok()
    }
    #[cfg(target_arch = "wasm32")]
    {
        use futures::future::{select, Either};

        let sleep = gloo_timers::future::sleep(duration);
        futures::pin_mut!(fut);
        futures::pin_mut!(sleep);
        match select(fut, sleep).await {
            Either::Left((output, _)) => Some(output),
            Either::Right(_) => None,
        }
    }
}
