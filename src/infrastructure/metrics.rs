// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::describe_counter;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::info;

pub fn init_metrics() {
    let builder = PrometheusBuilder::new();
    let addr: SocketAddr = "0.0.0.0:9000".parse().expect("Invalid metrics address");

    // Start the exporter
    // Ignore error if address is already in use (for development/testing)
    if let Err(e) = builder.with_http_listener(addr).install() {
        tracing::warn!("Failed to install Prometheus recorder: {}. This might happen if the port is already in use.", e);
        return;
    }

    describe_counter!(
        "kvdcrawl_auctions_processed_total",
        "Auctions extracted and written to the database"
    );
    describe_counter!(
        "kvdcrawl_urls_skipped_total",
        "Detail URLs skipped because they redirect"
    );
    describe_counter!(
        "kvdcrawl_urls_failed_total",
        "Detail URLs that failed to fetch or extract"
    );
    describe_counter!("kvdcrawl_runs_total", "Crawl runs started");

    info!("Metrics exporter listening on {}", addr);
}
