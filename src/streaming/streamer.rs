use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use log::{info, warn};
use crate::streaming::pacer::{step, FrameBudget, PacerConfig, StreamerState};
use crate::streaming::{
    ChannelSink, Clock, DataPoint, FrameScheduler, SampleSequence, StreamError,
};
/// Cancels a running stream. Clones share the flag; stopping twice is a no-op.
#[derive(Clone, Debug, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}
impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}
/// Index of the sample sequence channel `channel` reads from.
pub fn sequence_for_channel(channel: usize, sequence_count: usize) -> usize {
    channel % sequence_count
}
#[derive(Clone, Copy, Debug, PartialEq)]
struct ChannelState {
    sequence: usize,
    offset: f64,
}
/// Channel count and vertical separation on a shared display.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelLayout {
    pub channels: usize,
    pub spacing: f64,
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub emitted: usize,
    pub dropped: u64,
    /// Global position after this frame.
    pub position: u64,
}
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub emitted: u64,
    pub dropped: u64,
}
/// Appends newly due samples of every channel to a sink, once per frame.
pub struct RatePacedStreamer<C: Clock, S: ChannelSink> {
    config: PacerConfig,
    sequences: Vec<SampleSequence>,
    channels: Vec<ChannelState>,
    clock: C,
    sink: S,
    state: StreamerState,
    batch: Vec<DataPoint>,
}
impl<C: Clock, S: ChannelSink> RatePacedStreamer<C, S> {
    pub fn new(
        config: PacerConfig,
        layout: ChannelLayout,
        sequences: Vec<SampleSequence>,
        clock: C,
        sink: S,
    ) -> Result<Self, StreamError> {
        config.validate()?;
        if layout.channels == 0 {
            return Err(StreamError::NoChannels);
        }
        if sequences.is_empty() {
            return Err(StreamError::NoSignals);
        }
        if let Some(sink_channels) = sink.channel_capacity() {
            if sink_channels < layout.channels {
                return Err(StreamError::SinkTooSmall {
                    sink: sink_channels,
                    channels: layout.channels,
                });
            }
        }
        let channels = (0..layout.channels)
            .map(|channel| ChannelState {
                sequence: sequence_for_channel(channel, sequences.len()),
                offset: channel as f64 * layout.spacing,
            })
            .collect();
        Ok(Self {
            config,
            sequences,
            channels,
            clock,
            sink,
            state: StreamerState::Idle,
            batch: Vec::with_capacity(config.max_samples_per_frame),
        })
    }
    pub fn state(&self) -> StreamerState {
        self.state
    }
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }
    pub fn sink(&self) -> &S {
        &self.sink
    }
    pub fn into_sink(self) -> S {
        self.sink
    }
    /// Run one frame: read the clock, advance the pacer, and push due samples.
    pub fn tick(&mut self) -> FrameReport {
        let now = self.clock.now();
        let (state, budget) = step(self.state, now, &self.config);
        self.state = state;
        if budget.count > 0 {
            self.emit(budget);
        }
        if budget.dropped > 0 {
            warn!(
                "frame cap {} reached, dropped {} samples",
                self.config.max_samples_per_frame, budget.dropped
            );
        }
        FrameReport {
            emitted: budget.count,
            dropped: budget.dropped,
            position: self.state.position(),
        }
    }
    fn emit(&mut self, budget: FrameBudget) {
        for (index, channel) in self.channels.iter().enumerate() {
            let sequence = &self.sequences[channel.sequence];
            self.batch.clear();
            self.batch.extend((budget.start..budget.start + budget.count as u64).map(|x| {
                DataPoint {
                    x: x as f64,
                    y: channel.offset + sequence.at_position(x),
                }
            }));
            self.sink.append(index, &self.batch);
        }
    }
    /// Tick once per scheduler frame until the scheduler ends or `stop` fires.
    pub fn run<F: FrameScheduler>(&mut self, scheduler: &mut F, stop: &StopHandle) -> RunSummary {
        self.run_with(scheduler, stop, |_| {})
    }
    /// Like [`run`](Self::run), calling `on_frame` after every tick.
    pub fn run_with<F: FrameScheduler>(
        &mut self,
        scheduler: &mut F,
        stop: &StopHandle,
        mut on_frame: impl FnMut(&FrameReport),
    ) -> RunSummary {
        info!(
            "streaming {} channels at {} Hz",
            self.channels.len(),
            self.config.frequency_hz
        );
        let mut summary = RunSummary::default();
        while !stop.is_stopped() && scheduler.wait_next_tick() {
            // The host may have been torn down while we waited.
            if stop.is_stopped() {
                break;
            }
            let report = self.tick();
            summary.frames += 1;
            summary.emitted += report.emitted as u64;
            summary.dropped += report.dropped;
            on_frame(&report);
        }
        info!(
            "stream stopped after {} frames, {} samples per channel, {} dropped",
            summary.frames, summary.emitted, summary.dropped
        );
        summary
    }
}
