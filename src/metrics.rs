// Copyright (c) Recipe Social Team
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

/// Service metrics, registered on a registry owned by the application state
pub struct Metrics {
    registry: Registry,
    pub shares_created: IntCounterVec,
    pub feed_requests: IntCounter,
    pub feed_entries: Histogram,
}

impl Metrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let shares_created = IntCounterVec::new(
            Opts::new(
                "recipe_social_shares_created_total",
                "Shares recorded, by kind (broadcast or direct)",
            ),
            &["kind"],
        )?;
        let feed_requests = IntCounter::new(
            "recipe_social_feed_requests_total",
            "Feed computations served",
        )?;
        let feed_entries = Histogram::with_opts(
            HistogramOpts::new("recipe_social_feed_entries", "Entries per computed feed")
                .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0]),
        )?;

        registry.register(Box::new(shares_created.clone()))?;
        registry.register(Box::new(feed_requests.clone()))?;
        registry.register(Box::new(feed_entries.clone()))?;

        Ok(Self {
            registry,
            shares_created,
            feed_requests,
            feed_entries,
        })
    }

    pub fn record_shares(&self, kind: &str, count: usize) {
        self.shares_created
            .with_label_values(&[kind])
            .inc_by(count as u64);
    }

    pub fn record_feed(&self, entries: usize) {
        self.feed_requests.inc();
        self.feed_entries.observe(entries as f64);
    }

    /// Render all metrics in the Prometheus text format
    pub fn render(&self) -> Result<String> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
