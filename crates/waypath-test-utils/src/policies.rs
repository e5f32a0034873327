//! Mock policies with scripted behavior.
//!
//! - [`ConstantPolicy`]: same outputs every call, counts calls.
//! - [`SequencePolicy`]: cycles through a fixed list of outputs.
//! - [`RecordingPolicy`]: constant outputs, keeps every input it saw.
//! - [`AccumulatorPolicy`]: stateful; output drifts with its history.
//! - [`LinearPolicy`]: tiny stateless network, `sigmoid(W·x + b)`.
//! - [`PanickingPolicy`] / [`NanPolicy`]: fail after N good calls.

use waypath_core::Policy;

/// Logistic function, the usual output activation for evolved networks.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Returns the same outputs on every call.
#[derive(Clone, Debug)]
pub struct ConstantPolicy {
    outputs: Vec<f64>,
    input_len: Option<usize>,
    calls: usize,
}

impl ConstantPolicy {
    pub fn new(outputs: Vec<f64>) -> Self {
        Self {
            outputs,
            input_len: None,
            calls: 0,
        }
    }

    /// Declare an input width, so the simulator checks it.
    pub fn with_input_len(mut self, len: usize) -> Self {
        self.input_len = Some(len);
        self
    }

    /// How many times `activate()` has been called.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl Policy for ConstantPolicy {
    fn activate(&mut self, _inputs: &[f64]) -> Vec<f64> {
        self.calls += 1;
        self.outputs.clone()
    }

    fn input_len(&self) -> Option<usize> {
        self.input_len
    }
}

/// Cycles through `outputs`, one entry per call.
#[derive(Clone, Debug)]
pub struct SequencePolicy {
    outputs: Vec<Vec<f64>>,
    next: usize,
}

impl SequencePolicy {
    /// Panics if `outputs` is empty.
    pub fn new(outputs: Vec<Vec<f64>>) -> Self {
        assert!(!outputs.is_empty(), "SequencePolicy needs at least one output");
        Self { outputs, next: 0 }
    }
}

impl Policy for SequencePolicy {
    fn activate(&mut self, _inputs: &[f64]) -> Vec<f64> {
        let out = self.outputs[self.next % self.outputs.len()].clone();
        self.next += 1;
        out
    }
}

/// Constant outputs; records every input vector for later assertions.
#[derive(Clone, Debug, Default)]
pub struct RecordingPolicy {
    outputs: Vec<f64>,
    inputs: Vec<Vec<f64>>,
}

impl RecordingPolicy {
    pub fn new(outputs: Vec<f64>) -> Self {
        Self {
            outputs,
            inputs: Vec::new(),
        }
    }

    /// Inputs seen so far, in call order.
    pub fn inputs(&self) -> &[Vec<f64>] {
        &self.inputs
    }
}

impl Policy for RecordingPolicy {
    fn activate(&mut self, inputs: &[f64]) -> Vec<f64> {
        self.inputs.push(inputs.to_vec());
        self.outputs.clone()
    }
}

/// Stateful policy whose outputs depend on every input it has seen.
///
/// Two fresh instances fed the same inputs agree; an instance that was
/// reused without a reset does not.
#[derive(Clone, Debug, Default)]
pub struct AccumulatorPolicy {
    total: f64,
}

impl AccumulatorPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> f64 {
        self.total
    }
}

impl Policy for AccumulatorPolicy {
    fn activate(&mut self, inputs: &[f64]) -> Vec<f64> {
        self.total += inputs.iter().sum::<f64>() * 1e-3;
        vec![sigmoid(self.total.sin()), sigmoid(self.total.cos())]
    }
}

/// `outputs[j] = sigmoid(Σ weights[j][i] · inputs[i] + bias[j])`.
///
/// Inputs beyond the weight rows are ignored; missing ones count as zero.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearPolicy {
    pub weights: [Vec<f64>; 2],
    pub bias: [f64; 2],
}

impl LinearPolicy {
    pub fn new(weights: [Vec<f64>; 2], bias: [f64; 2]) -> Self {
        Self { weights, bias }
    }
}

impl Policy for LinearPolicy {
    fn activate(&mut self, inputs: &[f64]) -> Vec<f64> {
        self.weights
            .iter()
            .zip(self.bias)
            .map(|(row, b)| {
                let z: f64 = row.iter().zip(inputs).map(|(w, x)| w * x).sum();
                sigmoid(z + b)
            })
            .collect()
    }
}

/// Panics after `succeed_count` successful calls.
#[derive(Clone, Debug)]
pub struct PanickingPolicy {
    pub succeed_count: usize,
    calls: usize,
}

impl PanickingPolicy {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: 0,
        }
    }
}

impl Policy for PanickingPolicy {
    fn activate(&mut self, _inputs: &[f64]) -> Vec<f64> {
        self.calls += 1;
        if self.calls > self.succeed_count {
            panic!("deliberate panic after {} successful calls", self.succeed_count);
        }
        vec![1.0, 1.0]
    }
}

/// Returns NaN after `succeed_count` successful calls.
#[derive(Clone, Debug)]
pub struct NanPolicy {
    pub succeed_count: usize,
    calls: usize,
}

impl NanPolicy {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: 0,
        }
    }
}

impl Policy for NanPolicy {
    fn activate(&mut self, _inputs: &[f64]) -> Vec<f64> {
        self.calls += 1;
        if self.calls > self.succeed_count {
            vec![f64::NAN, 0.5]
        } else {
            vec![1.0, 1.0]
        }
    }
}
