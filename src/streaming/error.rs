use thiserror::Error;
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("frequency must be finite, greater than zero and at most 1e9 Hz, got {0}")]
    InvalidFrequency(f64),
    #[error("{field} must be a non-negative duration in seconds, got {seconds}")]
    InvalidDuration { field: &'static str, seconds: f64 },
    #[error("refresh rate must be finite and greater than zero, got {0}")]
    InvalidRefreshRate(f64),
    #[error("at least one channel is required")]
    NoChannels,
    #[error("sink holds {sink} channels but the layout needs {channels}")]
    SinkTooSmall { sink: usize, channels: usize },
    #[error("at least one signal is required")]
    NoSignals,
    #[error("per-frame sample cap must be greater than zero")]
    ZeroFrameCap,
    #[error("signal {signal}: domain length must be finite and greater than zero, got {length}")]
    InvalidLength { signal: usize, length: f64 },
    #[error("signal {signal}: non-finite sample {value} at offset {offset}")]
    NonFiniteSample {
        signal: usize,
        offset: usize,
        value: f64,
    },
    #[error("signal {signal}: sampling function panicked")]
    GeneratorPanicked { signal: usize },
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
}
