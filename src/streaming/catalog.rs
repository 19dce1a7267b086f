use std::f64::consts::TAU;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use crate::streaming::SignalDefinition;
/// Closed-form waveform expression, evaluated at integer sample offsets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Waveform {
    /// `sin(x / period)`
    Sin { period: f64 },
    /// `cos(x / period)`
    Cos { period: f64 },
    Constant { value: f64 },
    Sum { terms: Vec<Waveform> },
    Product { factors: Vec<Waveform> },
}
impl Waveform {
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Waveform::Sin { period } => (x / period).sin(),
            Waveform::Cos { period } => (x / period).cos(),
            Waveform::Constant { value } => *value,
            Waveform::Sum { terms } => terms.iter().map(|t| t.eval(x)).sum(),
            Waveform::Product { factors } => factors.iter().map(|f| f.eval(x)).product(),
        }
    }
}
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignalSpec {
    pub length: f64,
    pub waveform: Waveform,
}
impl SignalSpec {
    /// A spec whose domain covers `cycles` full periods of `period`.
    pub fn cycles(period: f64, cycles: f64, waveform: Waveform) -> Self {
        Self {
            length: period * TAU * cycles,
            waveform,
        }
    }
    pub fn to_definition(&self) -> SignalDefinition {
        let waveform = self.waveform.clone();
        SignalDefinition::new(self.length, move |x| waveform.eval(x))
    }
}
fn sin(period: f64) -> Waveform {
    Waveform::Sin { period }
}
fn cos(period: f64) -> Waveform {
    Waveform::Cos { period }
}
fn sum(terms: Vec<Waveform>) -> Waveform {
    Waveform::Sum { terms }
}
fn product(factors: Vec<Waveform>) -> Waveform {
    Waveform::Product { factors }
}
static BUILTIN: Lazy<Vec<SignalSpec>> = Lazy::new(|| {
    vec![
        SignalSpec::cycles(1000.0, 1.0, sin(1000.0)),
        SignalSpec::cycles(1000.0, 1.0, cos(1000.0)),
        SignalSpec::cycles(2000.0, 1.0, sum(vec![cos(2000.0), sin(1000.0)])),
        SignalSpec::cycles(2000.0, 1.0, sum(vec![sin(500.0), cos(2000.0)])),
        SignalSpec::cycles(2000.0, 1.0, product(vec![sin(1000.0), cos(2000.0)])),
        SignalSpec::cycles(4500.0, 1.0, cos(4500.0)),
        SignalSpec::cycles(8000.0, 1.0, sin(8000.0)),
        SignalSpec::cycles(6500.0, 1.0, product(vec![sin(2000.0), cos(6500.0)])),
    ]
});
/// The eight demo signals used when a config lists none.
pub fn builtin_signals() -> &'static [SignalSpec] {
    &BUILTIN
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::streaming::generate;
    #[test]
    fn builtin_catalog_has_eight_signals() {
        let signals = builtin_signals();
        assert_eq!(signals.len(), 8);
        assert!((signals[6].length - 8000.0 * TAU).abs() < 1e-9);
    }
    #[test]
    fn composite_waveforms_evaluate() {
        let w = sum(vec![cos(2000.0), sin(1000.0)]);
        let x = 1234.0;
        assert_eq!(w.eval(x), (x / 2000.0).cos() + (x / 1000.0).sin());
        let p = product(vec![sin(1000.0), cos(2000.0), Waveform::Constant { value: 3.0 }]);
        assert_eq!(p.eval(x), (x / 1000.0).sin() * (x / 2000.0).cos() * 3.0);
    }
    #[test]
    fn waveform_parses_from_tagged_json() {
        let json = r#"{"kind":"product","factors":[{"kind":"sin","period":2000.0},{"kind":"cos","period":6500.0}]}"#;
        let parsed: Waveform = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, product(vec![sin(2000.0), cos(6500.0)]));
    }
    #[test]
    fn spec_definition_generates_waveform_samples() {
        let spec = SignalSpec {
            length: 16.0,
            waveform: sin(4.0),
        };
        let seq = generate(&spec.to_definition()).unwrap();
        assert_eq!(seq.len(), 16);
        assert_eq!(seq.as_slice()[5], (5.0f64 / 4.0).sin());
    }
}
