//! Retry with exponential back-off and jitter for Geo API requests.
//!
//! Only transient failures are retried: connect errors, timeouts, 429 and
//! 5xx responses. A malformed body or a 4xx answer is returned immediately.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::GeoApiError;

const MAX_DELAY_MS: u64 = 10_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &GeoApiError) -> bool {
    match err {
        GeoApiError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        GeoApiError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        GeoApiError::Deserialize { .. } | GeoApiError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Sleep before each retry with `backoff_base_ms = 250`:
///
/// | Retry | Base delay             | Slept            |
/// |-------|------------------------|------------------|
/// | 1     | 250 ms                 | base ± 25 %      |
/// | 2     | 500 ms                 | base ± 25 %      |
/// | n     | 250 ms × 2ⁿ⁻¹, ≤ 10 s  | base ± 25 %      |
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, GeoApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeoApiError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if retries < max_retries && is_retriable(&err) => err,
            Err(err) => return Err(err),
        };

        retries += 1;
        let delay = with_jitter(base_delay_ms(backoff_base_ms, retries));
        tracing::warn!(
            attempt = retries,
            max_retries,
            delay = ?delay,
            error = %err,
            "Geo API transient error, retrying after back-off"
        );
        tokio::time::sleep(delay).await;
    }
}

/// Delay before retry number `retry` (1-based), before jitter.
fn base_delay_ms(backoff_base_ms: u64, retry: u32) -> u64 {
    let exponent = retry.saturating_sub(1).min(10);
    backoff_base_ms
        .saturating_mul(1u64 << exponent)
        .min(MAX_DELAY_MS)
}

#[allow(clippy::cast_precision_loss)]
fn with_jitter(delay_ms: u64) -> Duration {
    let factor: f64 = rand::rng().random_range(0.75..=1.25);
    Duration::from_secs_f64(delay_ms as f64 * factor / 1_000.0)
}
