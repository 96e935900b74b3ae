//! Latency benchmark suite for QuantKit hot-path components
//!
//! Measures per-call latency distributions for:
//! - Digit-chunk validation and decoding vs `str::parse`
//! - Fixed decimal-place extraction
//! - Worker-aware buffer publish/drain cycles
//! - Order-id generation and string interning

use quantkit_core::prelude::*;
use quantkit_tests::{ascii_digits, workers};
use std::collections::HashMap;
use std::hint::black_box;
use tracing::info;

/// Benchmark result statistics
#[derive(Debug, Clone)]
pub struct BenchmarkStats {
    pub name: String,
    pub iterations: u64,
    pub total_time_nanos: u64,
    pub avg_time_nanos: u64,
    pub min_time_nanos: u64,
    pub max_time_nanos: u64,
    pub p50_nanos: u64,
    pub p95_nanos: u64,
    pub p99_nanos: u64,
    pub throughput_ops_per_sec: f64,
}

impl BenchmarkStats {
    pub fn from_samples(name: &str, mut samples: Vec<u64>) -> Self {
        if samples.is_empty() {
            return Self::empty(name);
        }

        samples.sort_unstable();

        let iterations = samples.len() as u64;
        let total_time_nanos: u64 = samples.iter().sum();
        let avg_time_nanos = total_time_nanos / iterations;
        let percentile = |p: usize| samples[(samples.len() * p / 100).min(samples.len() - 1)];

        let throughput_ops_per_sec = if avg_time_nanos > 0 {
            1_000_000_000.0 / avg_time_nanos as f64
        } else {
            0.0
        };

        Self {
            name: name.to_string(),
            iterations,
            total_time_nanos,
            avg_time_nanos,
            min_time_nanos: samples[0],
            max_time_nanos: samples[samples.len() - 1],
            p50_nanos: percentile(50),
            p95_nanos: percentile(95),
            p99_nanos: percentile(99),
            throughput_ops_per_sec,
        }
    }

    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            iterations: 0,
            total_time_nanos: 0,
            avg_time_nanos: 0,
            min_time_nanos: 0,
            max_time_nanos: 0,
            p50_nanos: 0,
            p95_nanos: 0,
            p99_nanos: 0,
            throughput_ops_per_sec: 0.0,
        }
    }

    pub fn print_summary(&self) {
        info!("📊 Benchmark: {}", self.name);
        info!("   Iterations: {}", self.iterations);
        info!("   Avg Time: {}ns", self.avg_time_nanos);
        info!("   Min Time: {}ns", self.min_time_nanos);
        info!("   Max Time: {}ns", self.max_time_nanos);
        info!("   P50: {}ns", self.p50_nanos);
        info!("   P95: {}ns", self.p95_nanos);
        info!("   P99: {}ns", self.p99_nanos);
        info!("   Throughput: {:.0} ops/sec", self.throughput_ops_per_sec);
    }
}

/// Time `op` once per iteration with the wall clock
fn sample<F: FnMut(usize)>(iterations: usize, mut op: F) -> Vec<u64> {
    let mut samples = Vec::with_capacity(iterations);
    for i in 0..iterations {
        let start = nanos();
        op(i);
        samples.push(nanos().saturating_sub(start));
    }
    samples
}

/// Benchmark suite
pub struct PerformanceBenchmark {
    results: HashMap<&'static str, BenchmarkStats>,
}

impl PerformanceBenchmark {
    pub fn new() -> Self {
        Self {
            results: HashMap::new(),
        }
    }

    pub fn run_all(&mut self) -> anyhow::Result<()> {
        info!("🚀 Starting QuantKit Performance Benchmark Suite");

        self.benchmark_digit_decoding();
        self.benchmark_fixed_extraction()?;
        self.benchmark_buffer_cycle()?;
        self.benchmark_identifiers();

        self.print_summary();
        Ok(())
    }

    fn record(&mut self, key: &'static str, name: &str, samples: Vec<u64>) {
        let stats = BenchmarkStats::from_samples(name, samples);
        stats.print_summary();
        self.results.insert(key, stats);
    }

    fn benchmark_digit_decoding(&mut self) {
        const ITERATIONS: usize = 100_000;
        info!("🔢 Benchmarking digit-chunk decoding...");

        let inputs: Vec<Vec<u8>> = (0..1_000u64)
            .map(|i| ascii_digits(i * 99_991 % 100_000_000, 8))
            .collect();

        let samples = sample(ITERATIONS, |i| {
            black_box(check_decimal_u64(black_box(0x3837_3635_3433_3231 ^ (i as u64 & 0x07))));
        });
        self.record("check_decimal_u64", "check_decimal_u64", samples);

        let samples = sample(ITERATIONS, |i| {
            let _ = black_box(checked_conversion_u64(black_box(&inputs[i % inputs.len()])));
        });
        self.record("checked_conversion_u64", "checked_conversion_u64", samples);

        let samples = sample(ITERATIONS, |i| {
            let text = std::str::from_utf8(&inputs[i % inputs.len()]).unwrap_or_default();
            let _ = black_box(black_box(text).parse::<u64>());
        });
        self.record("str_parse_u64", "str::parse::<u64>", samples);

        let wide: Vec<Vec<u8>> = (0..1_000u64)
            .map(|i| ascii_digits(i * 9_999_999_967 % 10_000_000_000_000_000, 16))
            .collect();
        let samples = sample(ITERATIONS, |i| {
            let _ = black_box(checked_conversion_16_digits(black_box(&wide[i % wide.len()])));
        });
        self.record("checked_conversion_16", "checked_conversion_16_digits", samples);
    }

    fn benchmark_fixed_extraction(&mut self) -> anyhow::Result<()> {
        const ITERATIONS: usize = 50_000;
        info!("💲 Benchmarking fixed decimal-place extraction...");

        let extractor = FixedSpecExtractor::new(2)?;
        let samples = sample(ITERATIONS, |_| {
            let _ = black_box(extractor.bytes_to_i64(black_box(b"271828.18")));
        });
        self.record("fixed_extraction", "FixedSpecExtractor::bytes_to_i64", samples);
        Ok(())
    }

    fn benchmark_buffer_cycle(&mut self) -> anyhow::Result<()> {
        const ITERATIONS: usize = 50_000;
        info!("🔁 Benchmarking worker-aware buffer cycle...");

        let ids = workers(&[0, 1, 2, 3])?;
        let buffer = WorkerAwareBuffer::new(0u64, &ids)?;

        let samples = sample(ITERATIONS, |i| {
            if let Some(access) = buffer.try_acquire_for_write() {
                access.replace(i as u64);
            }
            buffer.notify_all();
            for worker in &ids {
                black_box(buffer.try_read(worker));
                buffer.read_done(worker);
            }
        });
        self.record("buffer_cycle", "publish + 4 reads", samples);
        Ok(())
    }

    fn benchmark_identifiers(&mut self) {
        const ITERATIONS: usize = 100_000;
        info!("🆔 Benchmarking identifiers...");

        let sequence = OrderSequence::new(Venue::KrxDrv, 1);
        let samples = sample(ITERATIONS, |_| {
            black_box(sequence.next_id());
        });
        self.record("order_id", "OrderSequence::next_id", samples);

        let interner = StringInterner::new();
        let symbols: Vec<String> = (0..256).map(|i| format!("SYM{i:04}")).collect();
        let samples = sample(ITERATIONS, |i| {
            black_box(interner.intern(&symbols[i % symbols.len()]));
        });
        self.record("intern", "StringInterner::intern", samples);
    }

    pub fn print_summary(&self) {
        info!("🏁 Performance Benchmark Summary");
        info!("================================");

        let targets = [
            ("check_decimal_u64", 50),
            ("checked_conversion_u64", 100),
            ("buffer_cycle", 1_000),
            ("order_id", 100),
        ];

        let mut passed = 0;
        let mut failed = 0;
        for (benchmark, target_ns) in &targets {
            if let Some(stats) = self.results.get(benchmark) {
                if stats.avg_time_nanos <= *target_ns {
                    info!("✅ {}: {}ns (target: {}ns)", stats.name, stats.avg_time_nanos, target_ns);
                    passed += 1;
                } else {
                    info!("❌ {}: {}ns (target: {}ns)", stats.name, stats.avg_time_nanos, target_ns);
                    failed += 1;
                }
            }
        }
        info!("Summary: {}/{} targets met", passed, passed + failed);

        if let (Some(packed), Some(parsed)) = (
            self.results.get("checked_conversion_u64"),
            self.results.get("str_parse_u64"),
        ) {
            info!(
                "Packed decode vs str::parse: {}ns vs {}ns",
                packed.avg_time_nanos, parsed.avg_time_nanos
            );
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let mut benchmark = PerformanceBenchmark::new();
    benchmark.run_all()?;

    info!("✅ Benchmark suite completed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_benchmark_stats() {
        let stats = BenchmarkStats::from_samples("Test", vec![100, 200, 150, 300, 250]);

        assert_eq!(stats.iterations, 5);
        assert_eq!(stats.min_time_nanos, 100);
        assert_eq!(stats.max_time_nanos, 300);
        assert_eq!(stats.avg_time_nanos, 200);
        assert_eq!(stats.p50_nanos, 200);
    }

    #[test]
    fn test_empty_benchmark_stats() {
        let stats = BenchmarkStats::from_samples("Empty", vec![]);
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.throughput_ops_per_sec, 0.0);
    }
}
