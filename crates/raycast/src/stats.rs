use std::time::Duration;

/// Counters from the most recent cast. Replaced wholesale on every call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CastStats {
    /// Columns written.
    pub columns: usize,
    /// DDA steps summed over all columns.
    pub total_steps: usize,
    /// Longest single-column walk.
    pub max_steps: usize,
    /// Columns whose ray left the map before striking a wall.
    pub out_of_bounds: usize,
    /// Columns that exhausted the step cap without a hit.
    pub capped: usize,
    /// Wall-clock time spent in the cast.
    pub elapsed: Duration,
}

impl CastStats {
    /// Mean DDA steps per column.
    pub fn mean_steps(&self) -> f64 {
        if self.columns == 0 {
            return 0.0;
        }
        self.total_steps as f64 / self.columns as f64
    }
}

impl std::fmt::Display for CastStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "columns={} steps={} (mean {:.2}, max {}) out_of_bounds={} capped={} elapsed={:?}",
            self.columns,
            self.total_steps,
            self.mean_steps(),
            self.max_steps,
            self.out_of_bounds,
            self.capped,
            self.elapsed
        )
    }
}

/// Rolling window of per-frame cast times.
///
/// Keeps the last `capacity` samples; older ones are overwritten in place.
#[derive(Debug)]
pub struct FrameTimer {
    samples: Vec<Duration>,
    next: usize,
    len: usize,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "frame timer capacity must be positive");
        Self {
            samples: vec![Duration::ZERO; capacity],
            next: 0,
            len: 0,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.samples[self.next] = dt;
        self.next = (self.next + 1) % self.samples.len();
        self.len = (self.len + 1).min(self.samples.len());
    }

    /// Samples currently held, in no particular order.
    fn window(&self) -> &[Duration] {
        if self.len == self.samples.len() {
            &self.samples
        } else {
            &self.samples[..self.len]
        }
    }

    pub fn count(&self) -> usize {
        self.len
    }

    pub fn average(&self) -> Duration {
        match self.len {
            0 => Duration::ZERO,
            n => self.window().iter().sum::<Duration>() / n as u32,
        }
    }

    pub fn max(&self) -> Duration {
        self.window().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.window().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    /// Frames per second implied by the average sample; 0 with no samples.
    pub fn fps(&self) -> f64 {
        let avg = self.average().as_secs_f64();
        if avg > 0.0 { 1.0 / avg } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_steps_handles_zero_columns() {
        assert_eq!(CastStats::default().mean_steps(), 0.0);
        let stats = CastStats {
            columns: 4,
            total_steps: 10,
            ..CastStats::default()
        };
        assert_eq!(stats.mean_steps(), 2.5);
    }

    #[test]
    fn frame_timer_tracks_history() {
        let mut timer = FrameTimer::new(3);
        assert_eq!(timer.average(), Duration::ZERO);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        timer.record(Duration::from_millis(30));

        assert_eq!(timer.count(), 3);
        assert_eq!(timer.average(), Duration::from_millis(20));
        assert_eq!(timer.max(), Duration::from_millis(30));
        assert_eq!(timer.min(), Duration::from_millis(10));
        assert!((timer.fps() - 50.0).abs() < 1e-6);
    }

    #[test]
    fn frame_timer_overwrites_oldest() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::from_millis(10));
        timer.record(Duration::from_millis(20));
        timer.record(Duration::from_millis(30));

        assert_eq!(timer.count(), 2);
        assert_eq!(timer.average(), Duration::from_millis(25));
        assert_eq!(timer.min(), Duration::from_millis(20));
    }
}
