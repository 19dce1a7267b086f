// src/config.rs
use std::fs;
use std::path::Path;
use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::streaming::{
    builtin_signals, frame_period, Backlog, ChannelLayout, PacerConfig, PacingMode,
    SignalDefinition, SignalSpec, StreamError,
};
/// Everything needed to generate signals and stream them. Missing JSON fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub frequency_hz: f64,
    pub channels: usize,
    pub channel_spacing: f64,
    pub max_samples_per_frame: usize,
    pub pacing: PacingMode,
    pub backlog: Backlog,
    pub history_seconds: f64,
    pub refresh_hz: f64,
    pub frame_jitter_ms: f64,
    pub run_seconds: f64,
    pub fps_window_seconds: f64,
    pub signals: Vec<SignalSpec>,
}
impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 1000.0,
            channels: 10,
            // Each channel spans [-1, 1].
            channel_spacing: 2.0,
            max_samples_per_frame: 1000,
            pacing: PacingMode::Cumulative,
            backlog: Backlog::Drop,
            history_seconds: 15.0,
            refresh_hz: 60.0,
            frame_jitter_ms: 0.0,
            run_seconds: 5.0,
            fps_window_seconds: 5.0,
            signals: builtin_signals().to_vec(),
        }
    }
}
impl StreamConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StreamError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }
    pub fn from_json(text: &str) -> Result<Self, StreamError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }
    pub fn validate(&self) -> Result<(), StreamError> {
        self.pacer().validate()?;
        if self.channels == 0 {
            return Err(StreamError::NoChannels);
        }
        if self.signals.is_empty() {
            return Err(StreamError::NoSignals);
        }
        frame_period(self.refresh_hz)?;
        self.frame_jitter()?;
        self.run_duration()?;
        self.fps_window()?;
        Ok(())
    }
    pub fn pacer(&self) -> PacerConfig {
        PacerConfig {
            frequency_hz: self.frequency_hz,
            max_samples_per_frame: self.max_samples_per_frame,
            pacing: self.pacing,
            backlog: self.backlog,
        }
    }
    pub fn layout(&self) -> ChannelLayout {
        ChannelLayout {
            channels: self.channels,
            spacing: self.channel_spacing,
        }
    }
    pub fn definitions(&self) -> Vec<SignalDefinition> {
        self.signals.iter().map(SignalSpec::to_definition).collect()
    }
    /// Points each channel keeps for display: `history_seconds` worth of samples.
    pub fn history_points(&self) -> usize {
        (self.history_seconds.max(0.0) * self.frequency_hz).ceil() as usize
    }
    pub fn frame_jitter(&self) -> Result<Duration, StreamError> {
        seconds("frame_jitter_ms", self.frame_jitter_ms / 1000.0)
    }
    pub fn run_duration(&self) -> Result<Duration, StreamError> {
        seconds("run_seconds", self.run_seconds)
    }
    pub fn fps_window(&self) -> Result<Duration, StreamError> {
        let window = seconds("fps_window_seconds", self.fps_window_seconds)?;
        if window.is_zero() {
            return Err(StreamError::InvalidDuration {
                field: "fps_window_seconds",
                seconds: self.fps_window_seconds,
            });
        }
        Ok(window)
    }
}
fn seconds(field: &'static str, value: f64) -> Result<Duration, StreamError> {
    Duration::try_from_secs_f64(value).map_err(|_| StreamError::InvalidDuration {
        field,
        seconds: value,
    })
}
