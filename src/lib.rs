//! Frame-paced streaming of synthetic multi-channel signals.
//!
//! Signals are generated once up front ([`streaming::generate_all`]), then a
//! [`streaming::RatePacedStreamer`] appends the samples that are due at the
//! target frequency to a [`streaming::ChannelSink`] on every frame tick.
pub mod config;
pub mod fps;
pub mod streaming;
pub use config::StreamConfig;
pub use fps::FpsMeter;
