// src/streaming/mod.rs
pub mod catalog;
pub mod clock;
pub mod error;
pub mod pacer;
pub mod scheduler;
pub mod signal;
pub mod sink;
pub mod streamer;
pub use catalog::{builtin_signals, SignalSpec, Waveform};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use error::StreamError;
pub use pacer::{
    step, Backlog, FrameBudget, PacerConfig, PacingMode, RunningState, StreamerState,
    MAX_FREQUENCY_HZ,
};
pub use scheduler::{frame_period, FrameScheduler, IntervalScheduler, ScriptedScheduler};
pub use signal::{generate, generate_all, SampleSequence, SignalDefinition};
pub use sink::{ChannelSink, DataPoint, LogSink, RollingSink};
pub use streamer::{
    sequence_for_channel, ChannelLayout, FrameReport, RatePacedStreamer, RunSummary, StopHandle,
};
