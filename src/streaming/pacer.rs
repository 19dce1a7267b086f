use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::streaming::StreamError;
/// How the per-frame due count is derived.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PacingMode {
    /// `F * elapsed_since_start` minus what was already accounted for. Drift free.
    #[default]
    Cumulative,
    /// `F * elapsed_since_last_tick` plus the carried fraction.
    Incremental,
}
/// What happens to samples above the per-frame cap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backlog {
    /// Excess samples are skipped for good.
    #[default]
    Drop,
    /// Excess samples stay due and are emitted by later frames, still capped.
    Defer,
}
/// Above this rate the cumulative due count overflows `u64` within centuries of streaming.
pub const MAX_FREQUENCY_HZ: f64 = 1e9;
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PacerConfig {
    pub frequency_hz: f64,
    pub max_samples_per_frame: usize,
    pub pacing: PacingMode,
    pub backlog: Backlog,
}
impl PacerConfig {
    pub fn new(frequency_hz: f64) -> Self {
        Self {
            frequency_hz,
            max_samples_per_frame: 1000,
            pacing: PacingMode::default(),
            backlog: Backlog::default(),
        }
    }
    pub fn validate(&self) -> Result<(), StreamError> {
        if !self.frequency_hz.is_finite()
            || self.frequency_hz <= 0.0
            || self.frequency_hz > MAX_FREQUENCY_HZ
        {
            return Err(StreamError::InvalidFrequency(self.frequency_hz));
        }
        if self.max_samples_per_frame == 0 {
            return Err(StreamError::ZeroFrameCap);
        }
        Ok(())
    }
}
/// Clock bookkeeping of a stream that has seen at least one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunningState {
    pub started_at: Duration,
    pub last_tick: Duration,
    /// Samples emitted so far; also the next global read position.
    pub position: u64,
    /// Samples skipped by [`Backlog::Drop`].
    pub dropped: u64,
    /// Samples due but held back by [`Backlog::Defer`].
    pub deferred: u64,
    /// Fractional sample carried into the next frame, in `[0, 1)`.
    pub carry: f64,
}
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum StreamerState {
    #[default]
    Idle,
    Running(RunningState),
}
impl StreamerState {
    pub fn position(&self) -> u64 {
        match self {
            StreamerState::Idle => 0,
            StreamerState::Running(running) => running.position,
        }
    }
    pub fn dropped(&self) -> u64 {
        match self {
            StreamerState::Idle => 0,
            StreamerState::Running(running) => running.dropped,
        }
    }
    pub fn carry(&self) -> f64 {
        match self {
            StreamerState::Idle => 0.0,
            StreamerState::Running(running) => running.carry,
        }
    }
}
/// Samples one frame is allowed to emit, starting at global position `start`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameBudget {
    pub start: u64,
    pub count: usize,
    /// Samples this frame skipped because of the cap.
    pub dropped: u64,
}
/// Advance the stream clock to `now` and work out what this frame emits.
pub fn step(
    state: StreamerState,
    now: Duration,
    config: &PacerConfig,
) -> (StreamerState, FrameBudget) {
    let mut running = match state {
        StreamerState::Idle => {
            let running = RunningState {
                started_at: now,
                last_tick: now,
                position: 0,
                dropped: 0,
                deferred: 0,
                carry: 0.0,
            };
            return (StreamerState::Running(running), FrameBudget::default());
        }
        StreamerState::Running(running) => running,
    };
    // A clock that steps backwards counts as no time passing.
    let now = now.max(running.last_tick);
    let pending = match config.pacing {
        PacingMode::Cumulative => {
            let elapsed = (now - running.started_at).as_secs_f64();
            let (whole, carry) = split_due(config.frequency_hz * elapsed);
            running.carry = carry;
            whole.saturating_sub(running.position + running.dropped)
        }
        PacingMode::Incremental => {
            let delta = (now - running.last_tick).as_secs_f64();
            let (whole, carry) = split_due(config.frequency_hz * delta + running.carry);
            running.carry = carry;
            whole + running.deferred
        }
    };
    let cap = config.max_samples_per_frame as u64;
    let count = pending.min(cap);
    let excess = pending - count;
    let mut dropped = 0;
    match config.backlog {
        Backlog::Drop => {
            running.dropped += excess;
            running.deferred = 0;
            dropped = excess;
        }
        Backlog::Defer => running.deferred = excess,
    }
    let budget = FrameBudget {
        start: running.position,
        count: count as usize,
        dropped,
    };
    running.position += count;
    running.last_tick = now;
    (StreamerState::Running(running), budget)
}
fn split_due(due: f64) -> (u64, f64) {
    let whole = due.floor();
    let carry = due - whole;
    // Guard against a rounding edge landing exactly on 1.0.
    if carry >= 1.0 {
        (whole as u64 + 1, 0.0)
    } else {
        (whole as u64, carry.max(0.0))
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    const FRAME_60HZ: Duration = Duration::from_nanos(16_666_667);
    fn run_frames(
        config: &PacerConfig,
        frames: impl IntoIterator<Item = Duration>,
    ) -> (StreamerState, Vec<FrameBudget>) {
        let mut state = StreamerState::Idle;
        let mut budgets = Vec::new();
        for now in frames {
            let (next, budget) = step(state, now, config);
            state = next;
            budgets.push(budget);
        }
        (state, budgets)
    }
    fn fixed_frames(dt: Duration, n: u32) -> impl Iterator<Item = Duration> {
        (0..=n).map(move |i| dt * i)
    }
    #[test]
    fn first_tick_starts_stream_without_emitting() {
        let config = PacerConfig::new(1000.0);
        let (state, budget) = step(StreamerState::Idle, Duration::from_secs(3), &config);
        assert_eq!(budget.count, 0);
        match state {
            StreamerState::Running(running) => {
                assert_eq!(running.started_at, Duration::from_secs(3));
                assert_eq!(running.position, 0);
            }
            StreamerState::Idle => panic!("stream should be running"),
        }
    }
    #[test]
    fn cumulative_mode_tracks_target_rate_under_jitter() {
        let config = PacerConfig::new(1000.0);
        let mut rng = StdRng::seed_from_u64(7);
        let mut now = Duration::ZERO;
        let mut state = StreamerState::Idle;
        for _ in 0..5_000 {
            now += Duration::from_micros(rng.gen_range(4_000..40_000));
            let (next, budget) = step(state, now, &config);
            assert!(budget.count <= config.max_samples_per_frame);
            assert!(next.position() >= state.position());
            assert!((0.0..1.0).contains(&next.carry()));
            state = next;
            if let StreamerState::Running(running) = state {
                let ideal = config.frequency_hz * (now - running.started_at).as_secs_f64();
                assert!((state.position() as f64 - ideal).abs() < 1.0);
            }
        }
    }
    #[test]
    fn incremental_mode_stays_within_one_sample_after_many_frames() {
        let mut config = PacerConfig::new(1000.0);
        config.pacing = PacingMode::Incremental;
        let (state, budgets) = run_frames(&config, fixed_frames(FRAME_60HZ, 10_000));
        let elapsed = (FRAME_60HZ * 10_000).as_secs_f64();
        let emitted: usize = budgets.iter().map(|b| b.count).sum();
        assert_eq!(emitted as u64, state.position());
        assert!((emitted as f64 - config.frequency_hz * elapsed).abs() < 1.0);
        assert!((0.0..1.0).contains(&state.carry()));
    }
    #[test]
    fn per_frame_counts_are_contiguous() {
        let config = PacerConfig::new(250.0);
        let (_, budgets) = run_frames(&config, fixed_frames(FRAME_60HZ, 120));
        let mut expected_start = 0;
        for budget in budgets {
            assert_eq!(budget.start, expected_start);
            expected_start += budget.count as u64;
        }
    }
    #[test]
    fn long_pause_is_capped_and_dropped() {
        let config = PacerConfig::new(1000.0);
        let frames = [
            Duration::ZERO,
            Duration::from_secs(10),
            Duration::from_secs(10) + FRAME_60HZ,
        ];
        let (state, budgets) = run_frames(&config, frames);
        assert_eq!(budgets[1].count, 1000);
        assert_eq!(budgets[1].dropped, 9000);
        assert_eq!(budgets[2].count, 16);
        assert_eq!(budgets[2].dropped, 0);
        assert_eq!(state.position(), 1016);
        assert_eq!(state.dropped(), 9000);
    }
    #[test]
    fn cap_applies_in_incremental_mode() {
        let mut config = PacerConfig::new(1000.0);
        config.pacing = PacingMode::Incremental;
        config.max_samples_per_frame = 500;
        let (_, budgets) = run_frames(&config, [Duration::ZERO, Duration::from_secs(10)]);
        assert_eq!(budgets[1].count, 500);
        assert_eq!(budgets[1].dropped, 9500);
    }
    #[test]
    fn deferred_backlog_drains_at_cap() {
        let mut config = PacerConfig::new(1000.0);
        config.backlog = Backlog::Defer;
        let mut frames = vec![Duration::ZERO, Duration::from_secs(10)];
        frames.extend((1..=20).map(|i| Duration::from_secs(10) + FRAME_60HZ * i));
        let (state, budgets) = run_frames(&config, frames.iter().copied());
        assert!(budgets.iter().all(|b| b.count <= 1000 && b.dropped == 0));
        assert_eq!(budgets[1].count, 1000);
        assert_eq!(budgets[2].count, 1000);
        let end = *frames.last().unwrap();
        let ideal = (config.frequency_hz * end.as_secs_f64()).floor() as u64;
        assert_eq!(state.position(), ideal);
        assert_eq!(state.dropped(), 0);
    }
    #[test]
    fn deferred_backlog_drains_in_incremental_mode() {
        let config = PacerConfig {
            frequency_hz: 1000.0,
            max_samples_per_frame: 1000,
            pacing: PacingMode::Incremental,
            backlog: Backlog::Defer,
        };
        let mut frames = vec![Duration::ZERO, Duration::from_millis(3500)];
        frames.extend((1..=5).map(|i| Duration::from_millis(3500) + Duration::from_millis(10) * i));
        let (state, budgets) = run_frames(&config, frames);
        assert_eq!(budgets[1].count, 1000);
        assert_eq!(budgets[4].count, 530);
        assert_eq!(state.position(), 3550);
    }
    #[test]
    fn clock_stepping_backwards_emits_nothing() {
        let config = PacerConfig::new(1000.0);
        let frames = [
            Duration::ZERO,
            Duration::from_millis(100),
            Duration::from_millis(50),
        ];
        let (state, budgets) = run_frames(&config, frames);
        assert_eq!(budgets[1].count, 100);
        assert_eq!(budgets[2].count, 0);
        assert_eq!(state.position(), 100);
    }
    #[test]
    fn invalid_configs_are_rejected() {
        assert!(matches!(
            PacerConfig::new(0.0).validate(),
            Err(StreamError::InvalidFrequency(_))
        ));
        assert!(matches!(
            PacerConfig::new(f64::NAN).validate(),
            Err(StreamError::InvalidFrequency(_))
        ));
        assert!(matches!(
            PacerConfig::new(1e300).validate(),
            Err(StreamError::InvalidFrequency(_))
        ));
        assert!(PacerConfig::new(MAX_FREQUENCY_HZ).validate().is_ok());
        let mut config = PacerConfig::new(60.0);
        config.max_samples_per_frame = 0;
        assert!(matches!(config.validate(), Err(StreamError::ZeroFrameCap)));
    }
}
