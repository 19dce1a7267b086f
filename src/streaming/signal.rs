use std::fmt;
use std::sync::Arc;
use std::thread;
use log::debug;
use crate::streaming::StreamError;
type SamplingFn = dyn Fn(f64) -> f64 + Send + Sync;
/// Domain length plus the function sampled at every integer offset below it.
#[derive(Clone)]
pub struct SignalDefinition {
    length: f64,
    function: Arc<SamplingFn>,
}
impl SignalDefinition {
    pub fn new(length: f64, function: impl Fn(f64) -> f64 + Send + Sync + 'static) -> Self {
        Self {
            length,
            function: Arc::new(function),
        }
    }
    pub fn length(&self) -> f64 {
        self.length
    }
    /// Number of samples the definition expands to: every integer `x` with `0 <= x < length`.
    pub fn sample_count(&self) -> usize {
        self.length.ceil() as usize
    }
    pub fn eval(&self, x: f64) -> f64 {
        (self.function)(x)
    }
}
impl fmt::Debug for SignalDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalDefinition")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}
/// Precomputed, immutable samples of one signal. Cloning shares the storage.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSequence {
    values: Arc<[f64]>,
}
impl SampleSequence {
    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
    /// Sample at a global stream position, wrapping around the end of the sequence.
    pub fn at_position(&self, position: u64) -> f64 {
        self.values[(position % self.values.len() as u64) as usize]
    }
}
/// Evaluate `definition` at offsets `0, 1, ..` up to its domain length.
pub fn generate(definition: &SignalDefinition) -> Result<SampleSequence, StreamError> {
    generate_indexed(0, definition)
}
/// Generate every signal on its own worker thread and wait for all of them.
///
/// Fails as a whole if any single signal fails, including when its sampling
/// function panics.
pub fn generate_all(definitions: &[SignalDefinition]) -> Result<Vec<SampleSequence>, StreamError> {
    if definitions.is_empty() {
        return Err(StreamError::NoSignals);
    }
    thread::scope(|scope| {
        let handles: Vec<_> = definitions
            .iter()
            .enumerate()
            .map(|(signal, definition)| scope.spawn(move || generate_indexed(signal, definition)))
            .collect();
        // Join every worker before returning so none outlives a failed batch.
        let results: Vec<_> = handles
            .into_iter()
            .enumerate()
            .map(|(signal, handle)| {
                handle
                    .join()
                    .unwrap_or(Err(StreamError::GeneratorPanicked { signal }))
            })
            .collect();
        results.into_iter().collect()
    })
}
fn generate_indexed(
    signal: usize,
    definition: &SignalDefinition,
) -> Result<SampleSequence, StreamError> {
    let length = definition.length();
    if !length.is_finite() || length <= 0.0 {
        return Err(StreamError::InvalidLength { signal, length });
    }
    let count = definition.sample_count();
    let mut values = Vec::with_capacity(count);
    for offset in 0..count {
        let value = definition.eval(offset as f64);
        if !value.is_finite() {
            return Err(StreamError::NonFiniteSample {
                signal,
                offset,
                value,
            });
        }
        values.push(value);
    }
    debug!("generated signal {signal}: {count} samples");
    Ok(SampleSequence {
        values: values.into(),
    })
}
