use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};
use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::streaming::{ManualClock, StreamError};
/// Host-side frame pacing: blocks until the next refresh is due.
pub trait FrameScheduler {
    /// Returns `false` once the host stops delivering frames.
    fn wait_next_tick(&mut self) -> bool;
}
/// Sleeps to a fixed refresh rate, optionally stretching each interval by random jitter.
pub struct IntervalScheduler {
    period: Duration,
    jitter: Duration,
    next_deadline: Option<Instant>,
    rng: StdRng,
}
impl IntervalScheduler {
    pub fn new(refresh_hz: f64) -> Result<Self, StreamError> {
        Ok(Self {
            period: frame_period(refresh_hz)?,
            jitter: Duration::ZERO,
            next_deadline: None,
            rng: StdRng::from_entropy(),
        })
    }
    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
    pub fn period(&self) -> Duration {
        self.period
    }
    fn next_interval(&mut self) -> Duration {
        if self.jitter.is_zero() {
            return self.period;
        }
        let extra = self.rng.gen_range(0..=self.jitter.as_nanos() as u64);
        self.period + Duration::from_nanos(extra)
    }
}
impl FrameScheduler for IntervalScheduler {
    fn wait_next_tick(&mut self) -> bool {
        let now = Instant::now();
        let Some(deadline) = self.next_deadline else {
            // First frame fires immediately.
            self.next_deadline = Some(now + self.next_interval());
            return true;
        };
        if deadline > now {
            thread::sleep(deadline - now);
        }
        let interval = self.next_interval();
        self.next_deadline = Some(next_deadline(deadline, Instant::now(), self.period, interval));
        true
    }
}
/// Period of one frame at `refresh_hz`, rejecting rates whose period is not a valid [`Duration`].
pub fn frame_period(refresh_hz: f64) -> Result<Duration, StreamError> {
    if !refresh_hz.is_finite() || refresh_hz <= 0.0 {
        return Err(StreamError::InvalidRefreshRate(refresh_hz));
    }
    Duration::try_from_secs_f64(1.0 / refresh_hz)
        .map_err(|_| StreamError::InvalidRefreshRate(refresh_hz))
}
/// Deadline after `deadline`. Stays on the fixed grid unless the frame overran by
/// more than a whole period, in which case the grid restarts at `now`.
fn next_deadline(deadline: Instant, now: Instant, period: Duration, interval: Duration) -> Instant {
    if now > deadline + period {
        now + interval
    } else {
        deadline + interval
    }
}
/// Replays a fixed list of timestamps onto a [`ManualClock`], one per frame.
pub struct ScriptedScheduler {
    clock: ManualClock,
    timestamps: VecDeque<Duration>,
}
impl ScriptedScheduler {
    pub fn new(clock: ManualClock, timestamps: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            clock,
            timestamps: timestamps.into_iter().collect(),
        }
    }
    /// `frames + 1` ticks at `0, interval, 2 * interval, ..`.
    pub fn fixed(clock: ManualClock, interval: Duration, frames: u32) -> Self {
        Self::new(clock, (0..=frames).map(|i| interval * i))
    }
    pub fn remaining(&self) -> usize {
        self.timestamps.len()
    }
}
impl FrameScheduler for ScriptedScheduler {
    fn wait_next_tick(&mut self) -> bool {
        match self.timestamps.pop_front() {
            Some(at) => {
                self.clock.set(at);
                true
            }
            None => false,
        }
    }
}
