//! Performance benchmark for the sales forecasting pipeline
//!
//! Run with: cargo bench --bench forecast_perf

use sales_fcst_core::{forecast_sales, ForecastOptions, HistoricalPoint, YearMonth};
use std::time::{Duration, Instant};

fn generate_monthly_history(n: usize) -> Vec<HistoricalPoint> {
    let mut ym = YearMonth { year: 2000, month: 1 };
    (0..n)
        .map(|i| {
            let trend = 1000.0 + 4.0 * i as f64;
            let seasonal = 150.0 * (2.0 * std::f64::consts::PI * ym.month as f64 / 12.0).sin();
            let point = HistoricalPoint {
                year: ym.year,
                month: ym.month,
                total_sales: trend + seasonal + (i % 7) as f64 * 3.0, // small noise
            };
            ym = ym.succ();
            point
        })
        .collect()
}

fn benchmark_fn<F, R>(name: &str, iterations: usize, mut f: F) -> Duration
where
    F: FnMut() -> R,
{
    // Warmup
    let _ = f();

    let start = Instant::now();
    for _ in 0..iterations {
        let _ = std::hint::black_box(f());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "{}: total={:?}, per_iter={:?}, iters={}",
        name, elapsed, per_iter, iterations
    );
    elapsed
}

fn main() {
    println!("=== Sales Forecast Performance Benchmark ===\n");

    let history_lengths = [6, 24, 60, 120, 600];

    println!("--- 1. Single request, max horizon ---\n");

    for &n in &history_lengths {
        let history = generate_monthly_history(n);
        let options = ForecastOptions { horizon: 12 };

        benchmark_fn(&format!("forecast_sales(n={}, h=12)", n), 1000, || {
            forecast_sales(&history, &options)
        });
    }

    println!("\n--- 2. Many independent requests ---\n");

    let history = generate_monthly_history(36);
    for &n_requests in &[1_000, 10_000] {
        let start = Instant::now();
        let mut ok = 0;
        for i in 0..n_requests {
            let options = ForecastOptions {
                horizon: (i % 12 + 1) as i64,
            };
            if forecast_sales(&history, &options).is_ok() {
                ok += 1;
            }
        }
        println!(
            "{} requests: {:?} ({} succeeded)",
            n_requests,
            start.elapsed(),
            ok
        );
    }

    println!("\n=== Benchmark Complete ===");
}
