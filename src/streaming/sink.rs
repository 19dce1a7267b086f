use std::collections::VecDeque;
use log::{trace, warn};
use serde::Serialize;
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}
/// Consumer of per-channel point batches, called at most once per channel per frame.
pub trait ChannelSink {
    fn append(&mut self, channel: usize, points: &[DataPoint]);
    /// Number of channels the sink can hold, if it is bounded.
    fn channel_capacity(&self) -> Option<usize> {
        None
    }
}
impl<S: ChannelSink + ?Sized> ChannelSink for &mut S {
    fn append(&mut self, channel: usize, points: &[DataPoint]) {
        (**self).append(channel, points)
    }
    fn channel_capacity(&self) -> Option<usize> {
        (**self).channel_capacity()
    }
}
/// Keeps the most recent `max_points` per channel, evicting the oldest first.
pub struct RollingSink {
    per_channel: Vec<VecDeque<DataPoint>>, // channel -> points
    totals: Vec<u64>,
    max_points: usize,
}
impl RollingSink {
    pub fn new(channel_count: usize, max_points: usize) -> Self {
        Self {
            per_channel: (0..channel_count)
                .map(|_| VecDeque::with_capacity(max_points.min(1 << 16)))
                .collect(),
            totals: vec![0; channel_count],
            max_points,
        }
    }
    pub fn channel_count(&self) -> usize {
        self.per_channel.len()
    }
    pub fn points(&self, channel: usize) -> impl Iterator<Item = &DataPoint> {
        self.per_channel.get(channel).into_iter().flatten()
    }
    pub fn len(&self, channel: usize) -> usize {
        self.per_channel.get(channel).map_or(0, VecDeque::len)
    }
    /// Points ever appended to `channel`, including evicted ones.
    pub fn total(&self, channel: usize) -> u64 {
        self.totals.get(channel).copied().unwrap_or(0)
    }
}
impl ChannelSink for RollingSink {
    fn append(&mut self, channel: usize, points: &[DataPoint]) {
        let Some(queue) = self.per_channel.get_mut(channel) else {
            warn!(
                "dropping {} points for channel {channel}, sink holds {} channels",
                points.len(),
                self.totals.len()
            );
            return;
        };
        self.totals[channel] += points.len() as u64;
        for &point in points {
            if queue.len() == self.max_points {
                queue.pop_front();
            }
            if self.max_points > 0 {
                queue.push_back(point);
            }
        }
    }
    fn channel_capacity(&self) -> Option<usize> {
        Some(self.per_channel.len())
    }
}
/// Discards points and traces batch sizes.
#[derive(Debug, Default)]
pub struct LogSink;
impl ChannelSink for LogSink {
    fn append(&mut self, channel: usize, points: &[DataPoint]) {
        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            trace!(
                "channel {channel}: {} points, x {}..={}",
                points.len(),
                first.x,
                last.x
            );
        }
    }
}
