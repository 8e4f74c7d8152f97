//! Profile page fetcher
//!
//! One GET per profile ID through the shared session, preceded by the
//! jittered politeness pause. Responses are classified into an outcome
//! rather than propagated as errors: a missing profile is ordinary data
//! to a scan, not a failure.

use crate::auth::Session;
use crate::config::{ScanConfig, TargetConfig};
use rand::Rng;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::trace;
use url::Url;

/// Result of fetching a single profile page
#[derive(Debug)]
pub enum FetchOutcome {
    /// The page answered 200 and has a body to parse
    Page {
        /// Final URL after redirects, used to resolve relative links
        final_url: Url,
        /// Page body
        body: String,
    },

    /// The platform refused the request (HTTP 403)
    Forbidden,

    /// Any other status; treated as "no such profile", not an error
    Absent { status: u16 },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        detail: String,
    },
}

/// Computes the pause before one request: the baseline delay plus a
/// uniform random jitter below `jitter_max`
///
/// Pure over the RNG so tests can drive it with a seeded generator.
pub fn jittered_delay(delay: Duration, jitter_max: Duration, rng: &mut impl Rng) -> Duration {
    if jitter_max.is_zero() {
        return delay;
    }
    delay + Duration::from_secs_f64(rng.gen_range(0.0..jitter_max.as_secs_f64()))
}

/// Fetches one profile page and classifies the response
///
/// Sleeps the jittered delay first, so a saturated worker pool still
/// spreads its requests out instead of firing in lockstep.
///
/// # Classification
///
/// | Response | Outcome |
/// |----------|---------|
/// | 200 | `Page` with the body |
/// | 403 | `Forbidden` |
/// | any other status | `Absent` (silent) |
/// | transport failure | `NetworkError` |
///
/// # Arguments
///
/// * `session` - The shared authenticated session
/// * `target` - Target platform settings
/// * `scan` - Scan parameters (delay and jitter)
/// * `id` - The profile ID to fetch
pub async fn fetch_profile(
    session: &Session,
    target: &TargetConfig,
    scan: &ScanConfig,
    id: u32,
) -> FetchOutcome {
    let pause = jittered_delay(scan.delay, scan.jitter_max, &mut rand::thread_rng());
    if !pause.is_zero() {
        tokio::time::sleep(pause).await;
    }

    let url = target.profile_url(id);
    trace!(id, url = %url, "Requesting profile page");

    match session.client().get(&url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().clone();

            if status == StatusCode::FORBIDDEN {
                return FetchOutcome::Forbidden;
            }

            if status != StatusCode::OK {
                return FetchOutcome::Absent {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchOutcome::Page { final_url, body },
                Err(e) => FetchOutcome::NetworkError {
                    detail: e.to_string(),
                },
            }
        }
        Err(e) => {
            // Classify error
            if e.is_timeout() {
                FetchOutcome::NetworkError {
                    detail: "request timeout".to_string(),
                }
            } else if e.is_connect() {
                FetchOutcome::NetworkError {
                    detail: "connection refused".to_string(),
                }
            } else {
                FetchOutcome::NetworkError {
                    detail: e.to_string(),
                }
            }
        }
    }
}
