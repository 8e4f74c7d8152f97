//! Scan orchestration
//!
//! This module drives the whole scan: it submits every ID in the range to
//! a bounded worker pool, collects the per-ID outcomes through a channel,
//! and freezes the aggregate once the pool drains. All mutation of the
//! aggregate happens on this side of the channel; workers only ever send.

use crate::auth::Session;
use crate::config::{ScanConfig, TargetConfig};
use crate::model::{ScanError, ScanErrorKind, ScanOutcome, ScanResult};
use crate::scan::fetcher::{fetch_profile, FetchOutcome};
use crate::scan::parser::parse_profile;
use crate::Result;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Scan orchestrator
///
/// Holds the shared session and the immutable scan settings. `run`
/// consumes nothing and can in principle be called again, though the
/// binary runs one scan per invocation.
pub struct Scanner {
    target: Arc<TargetConfig>,
    scan: Arc<ScanConfig>,
    session: Session,
}

impl Scanner {
    /// Creates a new scanner over the given range and session
    pub fn new(target: TargetConfig, scan: ScanConfig, session: Session) -> Self {
        Scanner {
            target: Arc::new(target),
            scan: Arc::new(scan),
            session,
        }
    }

    /// Runs the scan to completion and returns the frozen result
    ///
    /// # Scan Flow
    ///
    /// 1. Submit every ID in `[start_id, end_id]` to the worker pool
    /// 2. The pool keeps at most `concurrency` fetches in flight
    /// 3. Each worker pauses, fetches, parses, and sends one outcome
    /// 4. This task drains outcomes in completion order, growing the
    ///    record and error lists and reporting progress
    /// 5. When the last outcome lands, the result is frozen and returned
    ///
    /// Per-ID failures never abort the batch; even a panicked worker is
    /// recorded as an error against its ID and the scan carries on.
    ///
    /// # Returns
    ///
    /// * `Ok(ScanResult)` - Every ID in the range was attempted
    /// * `Err(RollcallError)` - The pool driver itself failed
    pub async fn run(&self) -> Result<ScanResult> {
        let started_at = Utc::now();
        let clock = Instant::now();
        let total = self.scan.total_ids();

        info!(
            "Starting profile scan: IDs {}..={}, {} workers, {:.1}s base delay",
            self.scan.start_id,
            self.scan.end_id,
            self.scan.concurrency,
            self.scan.delay.as_secs_f64()
        );

        let (tx, mut rx) = mpsc::channel::<ScanOutcome>(self.scan.concurrency);
        let driver = tokio::spawn(drive_pool(
            self.session.clone(),
            Arc::clone(&self.target),
            Arc::clone(&self.scan),
            tx,
        ));

        let mut profiles = Vec::new();
        let mut errors = Vec::new();
        let mut processed: u64 = 0;
        let mut forbidden_reported = false;

        while let Some(outcome) = rx.recv().await {
            processed += 1;

            match outcome {
                ScanOutcome::Found(record) => {
                    info!(
                        "Found: {} ({})",
                        record.name.as_deref().unwrap_or("<unnamed>"),
                        record.email.as_deref().unwrap_or("no email")
                    );
                    profiles.push(record);
                }
                ScanOutcome::Empty { id } => {
                    debug!(id, "No profile data");
                }
                ScanOutcome::Failed(error) => {
                    if error.kind() == ScanErrorKind::Forbidden && !forbidden_reported {
                        forbidden_reported = true;
                        warn!(
                            id = error.id(),
                            "Access forbidden; session may be stale or unauthorized, continuing"
                        );
                    } else {
                        debug!(
                            id = error.id(),
                            kind = error.kind().as_str(),
                            "Scan error recorded"
                        );
                    }
                    errors.push(error);
                }
            }

            info!(
                "Progress: {:.1}% | Found: {}",
                processed as f64 / total as f64 * 100.0,
                profiles.len()
            );
        }

        driver.await?;

        let duration = clock.elapsed();
        let finished_at = Utc::now();

        info!(
            "Scan completed: {} profiles, {} errors, {} IDs in {:.2}s",
            profiles.len(),
            errors.len(),
            processed,
            duration.as_secs_f64()
        );

        Ok(ScanResult {
            start_id: self.scan.start_id,
            end_id: self.scan.end_id,
            profiles,
            errors,
            started_at,
            finished_at,
            duration,
            total_attempted: processed,
        })
    }
}

/// Drives the bounded worker pool and forwards outcomes to the aggregator
///
/// Each ID gets its own spawned task; the buffer keeps at most
/// `concurrency` of them in flight at a time. A task that panics is
/// converted into an error outcome against its ID instead of tearing the
/// pool down.
async fn drive_pool(
    session: Session,
    target: Arc<TargetConfig>,
    scan: Arc<ScanConfig>,
    tx: mpsc::Sender<ScanOutcome>,
) {
    let concurrency = scan.concurrency;

    stream::iter(scan.start_id..=scan.end_id)
        .map(|id| {
            let session = session.clone();
            let target = Arc::clone(&target);
            let scan = Arc::clone(&scan);
            let worker =
                tokio::spawn(async move { scan_profile(&session, &target, &scan, id).await });
            async move { (id, worker.await) }
        })
        .buffer_unordered(concurrency)
        .for_each(|(id, joined)| {
            let tx = tx.clone();
            async move {
                let outcome = match joined {
                    Ok(outcome) => outcome,
                    Err(e) => ScanOutcome::Failed(ScanError::Unexpected {
                        id,
                        detail: e.to_string(),
                    }),
                };
                // Send only fails if the aggregator was dropped wholesale,
                // in which case there is nobody left to report to.
                let _ = tx.send(outcome).await;
            }
        })
        .await;
}

/// Runs the full pipeline for one profile ID: pacing pause, fetch, parse
///
/// Always returns an outcome; every per-ID failure mode is folded into
/// the returned value rather than propagated.
async fn scan_profile(
    session: &Session,
    target: &TargetConfig,
    scan: &ScanConfig,
    id: u32,
) -> ScanOutcome {
    match fetch_profile(session, target, scan, id).await {
        FetchOutcome::Page { final_url, body } => match parse_profile(id, &body, &final_url) {
            Some(record) => ScanOutcome::Found(record),
            None => ScanOutcome::Empty { id },
        },
        FetchOutcome::Forbidden => ScanOutcome::Failed(ScanError::Forbidden { id }),
        FetchOutcome::Absent { status } => {
            debug!(id, status, "Profile page absent");
            ScanOutcome::Empty { id }
        }
        FetchOutcome::NetworkError { detail } => {
            ScanOutcome::Failed(ScanError::Network { id, detail })
        }
    }
}

/// Runs a complete scan with the given settings
///
/// Convenience wrapper over [`Scanner`] for callers that do not need to
/// hold on to the orchestrator.
///
/// # Example
///
/// ```no_run
/// use rollcall::auth::Session;
/// use rollcall::config::{ScanConfig, TargetConfig};
/// use rollcall::scan::run_scan;
///
/// # async fn example() -> rollcall::Result<()> {
/// let target = TargetConfig {
///     base_url: "https://lms.example.edu".to_string(),
///     user_agent: "Mozilla/5.0".to_string(),
/// };
/// let scan = ScanConfig::new(750, 1000, 5, 0.5)?;
/// let session = Session::with_cookie(&target, "MoodleSession=abc")?;
///
/// let result = run_scan(target, scan, session).await?;
/// println!("Found {} profiles", result.found_count());
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(
    target: TargetConfig,
    scan: ScanConfig,
    session: Session,
) -> Result<ScanResult> {
    Scanner::new(target, scan, session).run().await
}
