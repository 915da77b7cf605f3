/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * to be displayed in the UI, and the rolling timer that smooths them.
 *
 * Includes metrics for:
 * - FPS (frames per second), averaged over a rolling window
 * - Frame time
 * - Number of boids and predators
 */

use std::time::Duration;

/// Largest window a RollingIntervalTimer keeps.
pub const MAX_TIMER_SAMPLES: u32 = 1 << 16;

/// Average interval over the last `capacity` samples.
#[derive(Debug, Clone)]
pub struct RollingIntervalTimer {
    samples: Vec<Duration>,
    len: u32,
    next: usize,
    total: Duration,
}

impl RollingIntervalTimer {
    /// `capacity` samples, all starting at `initial`. The capacity is clamped to
    /// `1..=MAX_TIMER_SAMPLES`.
    pub fn new(capacity: usize, initial: Duration) -> Self {
        let len = u32::try_from(capacity)
            .unwrap_or(MAX_TIMER_SAMPLES)
            .clamp(1, MAX_TIMER_SAMPLES);
        Self {
            samples: vec![initial; len as usize],
            len,
            next: 0,
            total: initial.saturating_mul(len),
        }
    }

    pub fn capacity(&self) -> usize {
        self.samples.len()
    }

    /// Record one interval. Replaces the oldest sample.
    pub fn record(&mut self, interval: Duration) {
        self.total = self.total - self.samples[self.next] + interval;
        self.samples[self.next] = interval;
        self.next = (self.next + 1) % self.samples.len();
    }

    pub fn average(&self) -> Duration {
        self.total / self.len
    }

    /// Rate implied by the average interval, zero while no time has been recorded.
    pub fn per_second(&self) -> f32 {
        let average = self.average().as_secs_f32();
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }
}

impl Default for RollingIntervalTimer {
    fn default() -> Self {
        Self::new(100, Duration::ZERO)
    }
}

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub boid_count: usize,
    pub predator_count: usize,
    timer: RollingIntervalTimer,
}

impl DebugInfo {
    /// Record one frame.
    pub fn mark_frame(&mut self, frame_time: Duration, boid_count: usize, predator_count: usize) {
        self.timer.record(frame_time);
        self.frame_time = self.timer.average();
        self.fps = self.timer.per_second();
        self.boid_count = boid_count;
        self.predator_count = predator_count;
    }
}
