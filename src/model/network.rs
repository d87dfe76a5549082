//! Dense feed-forward network mapping a board encoding to a distribution over cells

use rand::{Rng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{ports::CellScorer, tictactoe::CELL_COUNT};

/// Floor applied to probabilities before taking the log in the loss
const PROBABILITY_FLOOR: f32 = 1e-7;

/// Fully connected layer; weights are stored row-major, one row per output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dense {
    pub(crate) inputs: usize,
    pub(crate) outputs: usize,
    pub(crate) weights: Vec<f32>,
    pub(crate) biases: Vec<f32>,
}

impl Dense {
    /// He-uniform initialised layer with zero biases
    pub fn new(inputs: usize, outputs: usize, rng: &mut StdRng) -> Self {
        let limit = (6.0 / inputs as f32).sqrt();
        let weights = (0..inputs * outputs)
            .map(|_| rng.random_range(-limit..limit))
            .collect();
        Self {
            inputs,
            outputs,
            weights,
            biases: vec![0.0; outputs],
        }
    }

    pub fn inputs(&self) -> usize {
        self.inputs
    }

    pub fn outputs(&self) -> usize {
        self.outputs
    }

    fn forward(&self, input: &[f32]) -> Vec<f32> {
        self.weights
            .chunks_exact(self.inputs)
            .zip(&self.biases)
            .map(|(row, bias)| row.iter().zip(input).map(|(w, x)| w * x).sum::<f32>() + bias)
            .collect()
    }
}

/// Gradient of the loss with respect to one layer's parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradient {
    pub weights: Vec<f32>,
    pub biases: Vec<f32>,
}

impl LayerGradient {
    fn zeros_like(layer: &Dense) -> Self {
        Self {
            weights: vec![0.0; layer.weights.len()],
            biases: vec![0.0; layer.biases.len()],
        }
    }

    fn scale(&mut self, factor: f32) {
        self.weights
            .iter_mut()
            .chain(self.biases.iter_mut())
            .for_each(|g| *g *= factor);
    }
}

/// Board encoding in, probability per cell out.
///
/// Hidden layers use ReLU, the output layer softmax; training minimises
/// categorical cross-entropy against one-hot move labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyNetwork {
    pub(crate) layers: Vec<Dense>,
}

impl PolicyNetwork {
    /// Build a network with the given hidden layer widths.
    ///
    /// An empty slice gives a single linear layer followed by softmax.
    pub fn new(hidden_layers: &[usize], rng: &mut StdRng) -> Self {
        let sizes: Vec<usize> = std::iter::once(CELL_COUNT)
            .chain(hidden_layers.iter().copied())
            .chain(std::iter::once(CELL_COUNT))
            .collect();
        let layers = sizes
            .windows(2)
            .map(|pair| Dense::new(pair[0], pair[1], rng))
            .collect();
        Self { layers }
    }

    pub fn layers(&self) -> &[Dense] {
        &self.layers
    }

    /// Total number of trainable parameters
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|l| l.weights.len() + l.biases.len())
            .sum()
    }

    /// Probability of each cell being the chosen move
    pub fn predict(&self, features: &[f32; CELL_COUNT]) -> [f32; CELL_COUNT] {
        let activations = self.forward_trace(features);
        let mut out = [0.0; CELL_COUNT];
        if let Some(last) = activations.last() {
            out.copy_from_slice(last);
        }
        out
    }

    /// Activations of every layer, input first, softmax output last
    fn forward_trace(&self, input: &[f32]) -> Vec<Vec<f32>> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        activations.push(input.to_vec());
        let last = self.layers.len().saturating_sub(1);

        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.forward(&activations[i]);
            let a = if i == last {
                softmax(&z)
            } else {
                z.into_iter().map(|v| v.max(0.0)).collect()
            };
            activations.push(a);
        }
        activations
    }

    /// Cross-entropy loss of one example
    pub fn loss(&self, features: &[f32; CELL_COUNT], label: &[f32; CELL_COUNT]) -> f32 {
        cross_entropy(&self.predict(features), label)
    }

    /// Backpropagate one example, adding its gradient into `grads`.
    ///
    /// Returns the example's loss and whether the most probable cell matched
    /// the label.
    pub(crate) fn accumulate_gradients(
        &self,
        features: &[f32; CELL_COUNT],
        label: &[f32; CELL_COUNT],
        grads: &mut [LayerGradient],
    ) -> (f32, bool) {
        let activations = self.forward_trace(features);
        let output = &activations[self.layers.len()];
        let loss = cross_entropy(output, label);
        let hit = argmax(output) == argmax(label);

        // Softmax + cross-entropy: dL/dz = p - y
        let mut delta: Vec<f32> = output.iter().zip(label).map(|(p, y)| p - y).collect();

        for (idx, layer) in self.layers.iter().enumerate().rev() {
            let input = &activations[idx];
            let grad = &mut grads[idx];

            for (o, &d) in delta.iter().enumerate() {
                let row = &mut grad.weights[o * layer.inputs..(o + 1) * layer.inputs];
                for (g, &x) in row.iter_mut().zip(input) {
                    *g += d * x;
                }
                grad.biases[o] += d;
            }

            if idx > 0 {
                // Input of this layer is a ReLU output: gradient flows only where it was positive
                delta = (0..layer.inputs)
                    .map(|i| {
                        if input[i] <= 0.0 {
                            return 0.0;
                        }
                        delta
                            .iter()
                            .enumerate()
                            .map(|(o, &d)| layer.weights[o * layer.inputs + i] * d)
                            .sum()
                    })
                    .collect();
            }
        }

        (loss, hit)
    }

    /// Zeroed gradient buffers matching this network's shape
    pub(crate) fn zero_gradients(&self) -> Vec<LayerGradient> {
        self.layers.iter().map(LayerGradient::zeros_like).collect()
    }

    /// Average accumulated gradients over `batch_size` examples
    pub(crate) fn average_gradients(grads: &mut [LayerGradient], batch_size: usize) {
        if batch_size > 0 {
            let factor = 1.0 / batch_size as f32;
            grads.iter_mut().for_each(|g| g.scale(factor));
        }
    }
}

impl CellScorer for PolicyNetwork {
    fn score(&self, features: &[f32; CELL_COUNT]) -> [f32; CELL_COUNT] {
        self.predict(features)
    }
}

fn softmax(z: &[f32]) -> Vec<f32> {
    let max = z.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = z.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

fn cross_entropy(probabilities: &[f32], label: &[f32]) -> f32 {
    -probabilities
        .iter()
        .zip(label)
        .map(|(p, y)| y * p.max(PROBABILITY_FLOOR).ln())
        .sum::<f32>()
}

/// Index of the largest value, lowest index on ties
pub(crate) fn argmax(values: &[f32]) -> usize {
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    best
}
