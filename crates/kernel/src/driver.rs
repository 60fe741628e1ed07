use std::time::{Duration, Instant};

use crate::collision::CollisionQuery;
use crate::controller::PlayerController;
use crate::integrator::TickOutcome;

/// How frame time turns into ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepMode {
    /// One tick per frame with that frame's `dt`.
    Variable,
    /// Accumulate frame time and run as many ticks of `step` seconds as fit.
    Fixed { step: f32 },
}

/// Result of driving one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Ticks run this frame.
    pub ticks: u32,
    /// Frame time actually simulated, after clamping.
    pub dt: f32,
    pub outcome: TickOutcome,
}

/// Sub-ticks a fixed-step frame may run before the leftover time is dropped.
pub const MAX_TICKS_PER_FRAME: u32 = 1000;

/// Calls the player tick once per rendered frame.
///
/// Negative and non-finite frame times count as zero; long frames are
/// clamped to `max_frame_dt` so a stall does not teleport the player.
/// Fixed-step frames run at most `max_ticks_per_frame` ticks.
#[derive(Debug)]
pub struct FrameDriver {
    pub mode: StepMode,
    pub max_frame_dt: f32,
    pub max_ticks_per_frame: u32,
    accumulator: f32,
    frames: u64,
    last_frame: Option<Instant>,
    timer: FrameTimer,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(StepMode::Variable)
    }
}

impl FrameDriver {
    pub fn new(mode: StepMode) -> Self {
        Self {
            mode,
            max_frame_dt: 0.1,
            max_ticks_per_frame: MAX_TICKS_PER_FRAME,
            accumulator: 0.0,
            frames: 0,
            last_frame: None,
            timer: FrameTimer::new(120),
        }
    }

    /// Fixed-step driver at `step` seconds per tick.
    pub fn fixed(step: f32) -> Self {
        Self::new(StepMode::Fixed { step })
    }

    /// Drive one frame that took `dt` seconds.
    pub fn advance(
        &mut self,
        dt: f32,
        player: &mut PlayerController,
        world: Option<&dyn CollisionQuery>,
    ) -> FrameReport {
        let _span = tracing::trace_span!("frame", frame = self.frames).entered();
        let dt = if dt.is_finite() && dt > 0.0 {
            dt.min(self.max_frame_dt)
        } else {
            0.0
        };
        self.frames += 1;
        self.timer.record(Duration::from_secs_f32(dt));

        let mut report = FrameReport {
            dt,
            ..FrameReport::default()
        };
        match self.mode {
            StepMode::Variable => {
                report.outcome = player.tick(dt, world);
                report.ticks = 1;
            }
            StepMode::Fixed { step } if step > 0.0 => {
                self.accumulator += dt;
                while self.accumulator >= step {
                    if report.ticks >= self.max_ticks_per_frame {
                        tracing::warn!(
                            step,
                            ticks = report.ticks,
                            dropped = self.accumulator,
                            "tick limit reached, dropping leftover frame time"
                        );
                        self.accumulator = 0.0;
                        break;
                    }
                    self.accumulator -= step;
                    report.outcome = report.outcome.merge(player.tick(step, world));
                    report.ticks += 1;
                }
            }
            StepMode::Fixed { .. } => {
                tracing::warn!("fixed step must be positive, frame skipped");
            }
        }
        report
    }

    /// Drive one frame timed by the wall clock. The first frame has `dt = 0`.
    pub fn advance_to(
        &mut self,
        now: Instant,
        player: &mut PlayerController,
        world: Option<&dyn CollisionQuery>,
    ) -> FrameReport {
        let dt = match self.last_frame {
            Some(prev) => now.saturating_duration_since(prev).as_secs_f32(),
            None => 0.0,
        };
        self.last_frame = Some(now);
        self.advance(dt, player, world)
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }
}

/// Rolling window of recent frame durations.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn window(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        let window = self.window();
        if window.is_empty() {
            return Duration::ZERO;
        }
        window.iter().sum::<Duration>() / window.len() as u32
    }

    pub fn max(&self) -> Duration {
        self.window().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.window().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.index
        }
    }
}
