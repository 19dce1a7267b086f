// src/main.rs
use std::thread;
use anyhow::{anyhow, Context, Result};
use log::info;
use pacestream::streaming::{
    generate_all, Clock, IntervalScheduler, MonotonicClock, RatePacedStreamer, RollingSink,
    StopHandle,
};
use pacestream::{FpsMeter, StreamConfig};
fn load_config() -> Result<StreamConfig> {
    match std::env::args_os().nth(1) {
        Some(path) => StreamConfig::load(&path)
            .with_context(|| format!("failed to load config {}", path.to_string_lossy())),
        None => Ok(StreamConfig::default()),
    }
}
fn main() -> Result<()> {
    env_logger::init();
    let config = load_config()?;
    let sequences = generate_all(&config.definitions()).context("signal generation failed")?;
    info!(
        "generated {} signals for {} channels ({} Hz)",
        sequences.len(),
        config.channels,
        config.frequency_hz
    );
    let clock = MonotonicClock::new();
    let sink = RollingSink::new(config.channels, config.history_points());
    let mut streamer = RatePacedStreamer::new(
        config.pacer(),
        config.layout(),
        sequences,
        clock.clone(),
        sink,
    )?;
    let mut scheduler =
        IntervalScheduler::new(config.refresh_hz)?.with_jitter(config.frame_jitter()?);
    let stop = StopHandle::new();
    let timer = {
        let stop = stop.clone();
        let run_for = config.run_duration()?;
        thread::spawn(move || {
            thread::sleep(run_for);
            stop.stop();
        })
    };
    let mut fps = FpsMeter::new(config.fps_window()?);
    let summary = streamer.run_with(&mut scheduler, &stop, |_| {
        if let Some(rate) = fps.record_frame(clock.now()) {
            info!("FPS: {rate:.1}");
        }
    });
    timer
        .join()
        .map_err(|_| anyhow!("stop timer thread panicked"))?;
    let now = clock.now();
    if let Some(rate) = fps.current(now) {
        info!("FPS: {rate:.1} (partial window)");
    }
    let elapsed = now.as_secs_f64();
    info!(
        "{} frames in {elapsed:.2}s, {:.1} samples/s per channel",
        summary.frames,
        summary.emitted as f64 / elapsed.max(f64::EPSILON)
    );
    let sink = streamer.into_sink();
    for channel in 0..sink.channel_count() {
        info!(
            "channel {channel}: {} points streamed, {} kept",
            sink.total(channel),
            sink.len(channel)
        );
    }
    Ok(())
}
