// src/dispatcher.rs
use crate::error::Result;
use crate::resolver::Resolve;
use crate::types::{Resolution, ResultSet, ScanReport, ScanStats, SubprobeError};
use crate::wordlist::target_for;
use futures::stream::{FuturesUnordered, StreamExt};
use log::{debug, info};
use std::sync::Arc;
use std::time::Instant;

/// Fans candidate lookups out to a resolver with a hard cap on how many are
/// in flight, and gathers the hits in completion order.
///
/// The aggregating task is the only owner of the result set; lookups hand
/// their [`Resolution`] back through the future they run in.
pub struct Dispatcher<R: ?Sized> {
    resolver: Arc<R>,
    concurrency: usize,
}

impl<R: Resolve + ?Sized> Dispatcher<R> {
    pub fn new(resolver: Arc<R>, concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(SubprobeError::InvalidConcurrency);
        }
        Ok(Self {
            resolver,
            concurrency,
        })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Resolves `label.domain` for every candidate and returns the hits.
    ///
    /// `notify` sees every resolution as soon as it completes. The call
    /// returns only once all lookups have finished.
    pub async fn run<F>(&self, domain: &str, candidates: &[String], notify: F) -> ResultSet
    where
        F: FnMut(&Resolution),
    {
        self.scan(domain, candidates, notify).await.results
    }

    /// Same as [`Dispatcher::run`], with per-run statistics attached.
    pub async fn scan<F>(&self, domain: &str, candidates: &[String], mut notify: F) -> ScanReport
    where
        F: FnMut(&Resolution),
    {
        let start_time = Instant::now();
        let mut results = ResultSet::new();
        let mut stats = ScanStats::default();

        info!(
            "Resolving {} candidates for {} with {} concurrent lookups",
            candidates.len(),
            domain,
            self.concurrency
        );

        let mut pending = candidates.iter().map(|label| target_for(label, domain));
        let mut in_flight = FuturesUnordered::new();

        // Prime the window, then submit one new lookup per completion.
        for target in pending.by_ref().take(self.concurrency) {
            in_flight.push(self.lookup(target));
        }

        while let Some(resolution) = in_flight.next().await {
            if let Some(target) = pending.next() {
                in_flight.push(self.lookup(target));
            }

            stats.attempted += 1;
            notify(&resolution);

            match resolution {
                Resolution::Found(found) => {
                    stats.found += 1;
                    results.push(found);
                }
                Resolution::NotFound(missing) => {
                    stats.not_found += 1;
                    if missing.is_transient() {
                        stats.transient += 1;
                    }
                }
            }
        }

        stats.duration = start_time.elapsed();
        debug!(
            "{}: {} attempted, {} found, {} transient failures in {:?}",
            domain, stats.attempted, stats.found, stats.transient, stats.duration
        );

        ScanReport {
            domain: domain.to_string(),
            results,
            stats,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    fn lookup(&self, target: String) -> impl std::future::Future<Output = Resolution> {
        let resolver = Arc::clone(&self.resolver);
        async move { resolver.resolve(&target).await }
    }
}
