//! Mini LRU - throughput harness
//!
//! Drives the cache with a tight put/get loop and reports operations per
//! second, then prints the final recency ordering as JSON.

use std::env;
use std::time::Instant;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mini_lru::{with_expire_secs, Cache, Config};

/// Entry point for the throughput harness.
///
/// # Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Time `LRU_BENCH_OPS` puts, then the same number of gets
/// 4. Dump the cache contents
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mini_lru=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::try_from_env().context("loading cache configuration")?;
    let ops: u64 = match env::var("LRU_BENCH_OPS") {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("LRU_BENCH_OPS={}", raw))?,
        Err(_) => 100_000,
    };
    info!(
        "Configuration loaded: capacity={}, repeat_put={}, promote_on_get={}, sweep_on_get={}, ops={}",
        config.capacity, config.repeat_put, config.promote_on_get, config.sweep_on_get, ops
    );

    let cache: Cache<u64, u64> = Cache::from_config(&config);

    let started = Instant::now();
    for i in 0..ops {
        if i % 10 == 0 {
            cache.put_with(i, i, &[with_expire_secs(1)]).await;
        } else {
            cache.put(i, i).await;
        }
    }
    report("put", ops, started);

    let started = Instant::now();
    let mut hits = 0u64;
    for i in 0..ops {
        if cache.get(&i).await.is_some() {
            hits += 1;
        }
    }
    report("get", ops, started);
    info!("get hits: {}/{}", hits, ops);

    let removed = cache.sweep_expired().await;
    info!("final sweep removed {} expired entries", removed);

    let snapshot = cache.inspect().await;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn report(label: &str, ops: u64, started: Instant) {
    let elapsed = started.elapsed();
    let per_sec = if elapsed.as_secs_f64() > 0.0 {
        ops as f64 / elapsed.as_secs_f64()
    } else {
        f64::INFINITY
    };
    info!("{}: {} ops in {:?} ({:.0} ops/sec)", label, ops, elapsed, per_sec);
}
