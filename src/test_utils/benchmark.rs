use std::time::{Duration, Instant};

/// Runs an operation through a warmup phase, then times a fixed number of
/// repetitions.
pub struct BenchmarkTimer {
    warmup_ticks: u32,
    measure_ticks: u32,
}

impl BenchmarkTimer {
    pub fn new(warmup_ticks: u32, measure_ticks: u32) -> Self {
        Self {
            warmup_ticks,
            measure_ticks: measure_ticks.max(1),
        }
    }

    pub fn measure<F: FnMut()>(&self, mut tick: F) -> BenchmarkResults {
        log::debug!("warming up for {} ticks", self.warmup_ticks);
        for _ in 0..self.warmup_ticks {
            tick();
        }

        let start = Instant::now();
        for _ in 0..self.measure_ticks {
            tick();
        }

        BenchmarkResults {
            total_time: start.elapsed(),
            ticks: self.measure_ticks,
        }
    }
}

impl Default for BenchmarkTimer {
    fn default() -> Self {
        Self::new(10, 100)
    }
}

pub struct BenchmarkResults {
    pub total_time: Duration,
    pub ticks: u32,
}

impl BenchmarkResults {
    pub fn average_tick_time(&self) -> Duration {
        self.total_time / self.ticks
    }

    pub fn ticks_per_second(&self) -> f64 {
        self.ticks as f64 / self.total_time.as_secs_f64()
    }

    /// Unordered pairs tested per second for `colliders` colliders per tick.
    pub fn pair_tests_per_second(&self, colliders: usize) -> f64 {
        let pairs = colliders * colliders.saturating_sub(1) / 2;
        pairs as f64 * self.ticks_per_second()
    }

    pub fn print_summary(&self, label: &str, colliders: usize) {
        println!("\n{} ({} colliders):", label, colliders);
        println!("  Ticks: {}", self.ticks);
        println!("  Total time: {:?}", self.total_time);
        println!("  Average per tick: {:?}", self.average_tick_time());
        println!("  Ticks per second: {:.2}", self.ticks_per_second());

        let throughput = self.pair_tests_per_second(colliders);
        if throughput > 1_000_000.0 {
            println!("  Pair tests: {:.2} M/sec", throughput / 1_000_000.0);
        } else {
            println!("  Pair tests: {:.0} /sec", throughput);
        }
    }
}
