//! [`WorkerPoolDispatcher`] -- runs recognition requests on a bounded pool.
//!
//! Each call to [`dispatch`](WorkerPoolDispatcher::dispatch) takes one slot
//! for its whole duration. At most `size()` requests execute at once; the
//! rest block in arrival order. A request whose configuration fingerprint
//! matches an idle slot runs there without reconfiguring.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use glossa_types::config::PoolConfig;
use glossa_types::{Fingerprint, GlossaError, RecognitionOutcome, RecognitionRequest, Result};

use crate::backend::RecognitionBackend;
use crate::pool::{PoolStats, WorkerPool};

#[derive(Debug, Default)]
struct Counters {
    dispatched: AtomicU64,
    warm_hits: AtomicU64,
    reconfigurations: AtomicU64,
    failures: AtomicU64,
}

/// Bounded, configuration-aware dispatcher over a fixed set of backends.
#[derive(Debug)]
pub struct WorkerPoolDispatcher<B> {
    pool: WorkerPool<B>,
    counters: Counters,
}

impl<B: RecognitionBackend> WorkerPoolDispatcher<B> {
    /// Dispatcher over `workers`, all starting unconfigured.
    pub fn new(workers: Vec<B>) -> Result<Self> {
        if workers.is_empty() {
            return Err(GlossaError::config("worker pool needs at least one worker"));
        }
        let pool = WorkerPool::new(workers.into_iter().map(|w| (w, None)));
        tracing::info!(workers = pool.size(), "worker pool ready");
        Ok(Self {
            pool,
            counters: Counters::default(),
        })
    }

    /// Dispatcher over `workers`, configuring some of them up front as
    /// described by `config`.
    ///
    /// `workers` must contain exactly `config.threads` backends. A failed
    /// startup configure aborts construction.
    pub fn with_preconfiguration(workers: Vec<B>, config: &PoolConfig) -> Result<Self> {
        config.validate()?;
        if workers.len() != config.threads {
            return Err(GlossaError::config(format!(
                "pool.threads is {} but {} workers were supplied",
                config.threads,
                workers.len()
            )));
        }

        let plan = config.preconfiguration_plan();
        let mut slots = Vec::with_capacity(workers.len());
        for (index, (mut worker, startup)) in workers.into_iter().zip(plan).enumerate() {
            let configuration = match startup {
                Some(cfg) => {
                    cfg.validate()?;
                    worker.configure(&cfg)?;
                    let fingerprint = Fingerprint::of(&cfg);
                    tracing::debug!(
                        slot = index,
                        language = %cfg.language,
                        fingerprint = %fingerprint.short(),
                        "worker preconfigured"
                    );
                    Some(fingerprint)
                }
                None => None,
            };
            slots.push((worker, configuration));
        }

        let pool = WorkerPool::new(slots);
        tracing::info!(
            workers = pool.size(),
            preconfigured = pool.stats().slots.iter().filter(|s| s.configuration.is_some()).count(),
            "worker pool ready"
        );
        Ok(Self {
            pool,
            counters: Counters::default(),
        })
    }

    /// Run `request` on a worker, blocking until one is available.
    ///
    /// Backend errors are returned unchanged. The slot is released on every
    /// path, including a panicking backend.
    pub fn dispatch(&self, request: &RecognitionRequest) -> Result<RecognitionOutcome> {
        request.config.validate()?;
        let fingerprint = Fingerprint::of(&request.config);
        self.counters.dispatched.fetch_add(1, Ordering::Relaxed);

        let mut lease = self.pool.acquire(&fingerprint);
        let slot = lease.slot();

        if lease.configuration() == Some(fingerprint) {
            self.counters.warm_hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.reconfigurations.fetch_add(1, Ordering::Relaxed);
            // The old configuration is gone as soon as configure starts.
            lease.set_configuration(None);
            if let Err(err) = lease.worker_mut().configure(&request.config) {
                self.counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(slot, error = %err, "worker configure failed");
                return Err(err);
            }
            lease.set_configuration(Some(fingerprint));
            tracing::debug!(slot, fingerprint = %fingerprint.short(), "worker reconfigured");
        }

        let outcome = lease.worker_mut().recognize_batch(request);
        if let Err(err) = &outcome {
            self.counters.failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!(slot, error = %err, "recognition batch failed");
        }
        outcome
    }

    /// Number of worker slots.
    pub fn size(&self) -> usize {
        self.pool.size()
    }

    /// Pool snapshot plus lifetime counters.
    pub fn stats(&self) -> DispatcherStats {
        DispatcherStats {
            pool: self.pool.stats(),
            dispatched: self.counters.dispatched.load(Ordering::Relaxed),
            warm_hits: self.counters.warm_hits.load(Ordering::Relaxed),
            reconfigurations: self.counters.reconfigurations.load(Ordering::Relaxed),
            failures: self.counters.failures.load(Ordering::Relaxed),
        }
    }
}

/// Diagnostics for a [`WorkerPoolDispatcher`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatcherStats {
    pub pool: PoolStats,
    /// Requests that passed validation.
    pub dispatched: u64,
    /// Requests served by a worker already holding their configuration.
    pub warm_hits: u64,
    /// Requests that had to configure their worker first.
    pub reconfigurations: u64,
    /// Configure or batch calls that returned an error.
    pub failures: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_types::RecognitionConfig;

    /// Backend that echoes the first word and can be told to fail.
    #[derive(Debug, Default)]
    struct MockBackend {
        fail_configure: bool,
        fail_batch: bool,
    }

    impl RecognitionBackend for MockBackend {
        fn configure(&mut self, _config: &RecognitionConfig) -> Result<()> {
            if self.fail_configure {
                return Err(GlossaError::backend("model files missing"));
            }
            Ok(())
        }

        fn recognize_batch(&mut self, request: &RecognitionRequest) -> Result<RecognitionOutcome> {
            if self.fail_batch {
                return Err(GlossaError::backend("decoder crashed"));
            }
            Ok(RecognitionOutcome {
                words: request.config.words.iter().take(1).cloned().collect(),
            })
        }
    }

    fn request(words: &[&str]) -> RecognitionRequest {
        let config = RecognitionConfig::new(
            "el",
            words.iter().map(|w| w.to_string()).collect(),
            vec![],
            vec![],
        );
        RecognitionRequest::new(config, "/tmp/audio.wav")
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn empty_pool_is_rejected() {
        let err = WorkerPoolDispatcher::<MockBackend>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, GlossaError::ConfigInvalid { .. }));
    }

    #[test]
    fn preconfiguration_configures_planned_slots() {
        let config = PoolConfig {
            threads: 3,
            preconfigure: true,
            preconfigure_number: 2,
            preconfigurations: vec![request(&["ναι"]).config],
        };
        let workers = (0..3).map(|_| MockBackend::default()).collect();
        let dispatcher = WorkerPoolDispatcher::with_preconfiguration(workers, &config).unwrap();

        let stats = dispatcher.stats();
        let expected = Some(Fingerprint::of(&request(&["ναι"]).config));
        assert_eq!(stats.pool.slots[0].configuration, expected);
        assert_eq!(stats.pool.slots[1].configuration, expected);
        assert_eq!(stats.pool.slots[2].configuration, None);

        dispatcher.dispatch(&request(&["ναι"])).unwrap();
        assert_eq!(dispatcher.stats().warm_hits, 1);
        assert_eq!(dispatcher.stats().reconfigurations, 0);
    }

    #[test]
    fn preconfiguration_rejects_worker_count_mismatch() {
        let config = PoolConfig {
            threads: 2,
            ..PoolConfig::default()
        };
        let err = WorkerPoolDispatcher::with_preconfiguration(vec![MockBackend::default()], &config)
            .unwrap_err();
        assert!(err.to_string().contains("pool.threads is 2"));
    }

    #[test]
    fn preconfiguration_failure_aborts_construction() {
        let config = PoolConfig {
            threads: 1,
            preconfigure: true,
            preconfigure_number: 1,
            preconfigurations: vec![request(&["ναι"]).config],
        };
        let worker = MockBackend {
            fail_configure: true,
            ..MockBackend::default()
        };
        assert!(WorkerPoolDispatcher::with_preconfiguration(vec![worker], &config).is_err());
    }

    // ── Dispatch ─────────────────────────────────────────────────────

    #[test]
    fn invalid_request_never_takes_a_slot() {
        let dispatcher = WorkerPoolDispatcher::new(vec![MockBackend::default()]).unwrap();
        let mut req = request(&["ναι"]);
        req.config.language.clear();
        assert!(matches!(
            dispatcher.dispatch(&req),
            Err(GlossaError::ConfigInvalid { .. })
        ));
        assert_eq!(dispatcher.stats().dispatched, 0);
    }

    #[test]
    fn sequential_identical_requests_reuse_configuration() {
        let dispatcher = WorkerPoolDispatcher::new(vec![MockBackend::default()]).unwrap();
        let out = dispatcher.dispatch(&request(&["ναι", "όχι"])).unwrap();
        assert_eq!(out.words, vec!["ναι"]);
        dispatcher.dispatch(&request(&["ναι", "όχι"])).unwrap();

        let stats = dispatcher.stats();
        assert_eq!(stats.dispatched, 2);
        assert_eq!(stats.reconfigurations, 1);
        assert_eq!(stats.warm_hits, 1);
    }

    #[test]
    fn different_configuration_reconfigures() {
        let dispatcher = WorkerPoolDispatcher::new(vec![MockBackend::default()]).unwrap();
        dispatcher.dispatch(&request(&["ναι"])).unwrap();
        dispatcher.dispatch(&request(&["όχι"])).unwrap();
        assert_eq!(dispatcher.stats().reconfigurations, 2);
    }

    #[test]
    fn configure_failure_releases_slot_unconfigured() {
        let worker = MockBackend {
            fail_configure: true,
            ..MockBackend::default()
        };
        let dispatcher = WorkerPoolDispatcher::new(vec![worker]).unwrap();
        let err = dispatcher.dispatch(&request(&["ναι"])).unwrap_err();
        assert_eq!(err.to_string(), "backend error: model files missing");

        let stats = dispatcher.stats();
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.pool.busy, 0);
        assert_eq!(stats.pool.pending, 0);
        assert_eq!(stats.pool.slots[0].configuration, None);
    }

    #[test]
    fn batch_failure_keeps_configuration() {
        let worker = MockBackend {
            fail_batch: true,
            ..MockBackend::default()
        };
        let dispatcher = WorkerPoolDispatcher::new(vec![worker]).unwrap();
        assert!(dispatcher.dispatch(&request(&["ναι"])).is_err());

        let stats = dispatcher.stats();
        assert_eq!(stats.pool.busy, 0);
        assert_eq!(
            stats.pool.slots[0].configuration,
            Some(Fingerprint::of(&request(&["ναι"]).config))
        );
    }
}
