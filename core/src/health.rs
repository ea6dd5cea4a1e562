//! # Health Checker
//!
//! Probes bookmark URLs and keeps the latest result per item.
//!
//! ## Rules
//! 1. An item that does not resolve under the profile costs no I/O.
//! 2. Batches run strictly one probe at a time, in input order.
//! 3. Probe failures end up in the result; nothing here returns `Err`.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::time::Instant;
use tracing::{debug, info_span, Instrument};

use launchpad_common::config::Config;
use launchpad_common::error::ProbeError;
use launchpad_common::models::address::NetworkProfile;
use launchpad_common::models::health::HealthCheckResult;
use launchpad_common::models::item::BookmarkItem;
use launchpad_common::ports::HttpProber;
use launchpad_common::resolve;

pub struct HealthChecker {
    prober: Arc<dyn HttpProber>,
    cfg: Config,
    results: HashMap<String, HealthCheckResult>,
}

impl HealthChecker {
    pub fn new(prober: Arc<dyn HttpProber>, cfg: Config) -> Self {
        Self {
            prober,
            cfg,
            results: HashMap::new(),
        }
    }

    /// Resolves and probes a single bookmark, caching the outcome.
    pub async fn check_one(&mut self, item: &BookmarkItem, profile: NetworkProfile) -> HealthCheckResult {
        let result: HealthCheckResult = match resolve::resolve_and_build_url(item, profile) {
            Ok(url) => self.probe(&item.id, url).await,
            Err(e) => {
                debug!("{}: {e}", item.id);
                HealthCheckResult::unresolved(&item.id)
            }
        };

        self.results.insert(item.id.clone(), result.clone());
        result
    }

    pub async fn check_many(
        &mut self,
        items: &[BookmarkItem],
        profile: NetworkProfile,
    ) -> Vec<HealthCheckResult> {
        self.check_many_with_progress(items, profile, |_, _, _| {}).await
    }

    /// Checks `items` one after another, calling `on_progress(current, total,
    /// result)` after each with `current` counting from 1.
    pub async fn check_many_with_progress<F>(
        &mut self,
        items: &[BookmarkItem],
        profile: NetworkProfile,
        mut on_progress: F,
    ) -> Vec<HealthCheckResult>
    where
        F: FnMut(usize, usize, &HealthCheckResult),
    {
        let total: usize = items.len();
        let mut results: Vec<HealthCheckResult> = Vec::with_capacity(total);

        for (index, item) in items.iter().enumerate() {
            let span = info_span!("health", item = %item.id);
            let result: HealthCheckResult = self.check_one(item, profile).instrument(span).await;
            on_progress(index + 1, total, &result);
            results.push(result);

            if index + 1 < total {
                tokio::time::sleep(self.cfg.health_delay).await;
            }
        }

        results
    }

    pub fn get_result(&self, item_id: &str) -> Option<&HealthCheckResult> {
        self.results.get(item_id)
    }

    pub fn get_all_results(&self) -> Vec<&HealthCheckResult> {
        self.results.values().collect()
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    async fn probe(&self, item_id: &str, url: String) -> HealthCheckResult {
        let started: Instant = Instant::now();
        let outcome: Result<u16, ProbeError> = self.prober.probe(&url, self.cfg.health_timeout).await;
        let elapsed_ms: u64 = started.elapsed().as_millis() as u64;

        match outcome {
            Ok(code) => {
                debug!("{url} answered {code} in {elapsed_ms} ms");
                HealthCheckResult::from_response(item_id, url, code, elapsed_ms)
            }
            Err(e) => {
                debug!("{url} failed after {elapsed_ms} ms: {e}");
                HealthCheckResult::from_failure(item_id, url, &e, elapsed_ms)
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
