//! Bounded polling for asynchronously rendered option panels.
//!
//! A blind fixed delay races the host framework's render cycle; polling for
//! option presence under a deadline does not, and a timeout reports failure
//! instead of hanging the sequence.

use std::time::{Duration, Instant};

use formdom::{Dom, NodeId};
use thiserror::Error;

/// Error surfaced when an options panel never rendered.
#[derive(Debug, Error)]
pub enum WaitError {
    /// The deadline elapsed with no option elements present.
    #[error("timeout waiting for {condition} after {elapsed:?} (polls={polls})")]
    Timeout {
        /// Human-readable condition description.
        condition: &'static str,
        /// Duration spent waiting.
        elapsed: Duration,
        /// Number of presence polls performed.
        polls: u32,
    },
}

/// Poll the option selectors until at least one option is present, or the
/// deadline passes. Options are returned in document order, deduplicated
/// across selectors.
pub async fn await_options(
    dom: &dyn Dom,
    selectors: &[&str],
    condition: &'static str,
    timeout: Duration,
    interval: Duration,
) -> Result<Vec<NodeId>, WaitError> {
    let start = Instant::now();
    let mut polls = 0u32;
    loop {
        let options = collect_options(dom, selectors);
        polls += 1;
        if !options.is_empty() {
            return Ok(options);
        }
        if start.elapsed() >= timeout {
            return Err(WaitError::Timeout {
                condition,
                elapsed: start.elapsed(),
                polls,
            });
        }
        tokio::time::sleep(interval.max(Duration::from_millis(1))).await;
    }
}

/// One presence pass across all option selectors.
pub fn collect_options(dom: &dyn Dom, selectors: &[&str]) -> Vec<NodeId> {
    let mut seen = Vec::new();
    for sel in selectors {
        for node in dom.query_all(sel) {
            if !seen.contains(&node) {
                seen.push(node);
            }
        }
    }
    seen
}
