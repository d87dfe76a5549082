//! Adam optimizer over a [`PolicyNetwork`]'s parameters

use super::network::{LayerGradient, PolicyNetwork};

#[derive(Debug, Clone)]
struct Moments {
    weights_m: Vec<f32>,
    weights_v: Vec<f32>,
    biases_m: Vec<f32>,
    biases_v: Vec<f32>,
}

#[derive(Debug, Clone, Copy)]
struct Betas {
    beta1: f32,
    beta2: f32,
    epsilon: f32,
}

impl Betas {
    fn update(self, params: &mut [f32], grads: &[f32], m: &mut [f32], v: &mut [f32], step_size: f32) {
        for (((p, &g), m), v) in params.iter_mut().zip(grads).zip(m).zip(v) {
            *m = self.beta1 * *m + (1.0 - self.beta1) * g;
            *v = self.beta2 * *v + (1.0 - self.beta2) * g * g;
            *p -= step_size * *m / (v.sqrt() + self.epsilon);
        }
    }
}

/// Adam with bias correction.
///
/// Moment buffers are created for one network shape; applying it to a
/// differently shaped network is a programming error.
#[derive(Debug, Clone)]
pub struct Adam {
    learning_rate: f32,
    betas: Betas,
    step: i32,
    moments: Vec<Moments>,
}

impl Adam {
    pub const DEFAULT_BETA1: f32 = 0.9;
    pub const DEFAULT_BETA2: f32 = 0.999;
    pub const DEFAULT_EPSILON: f32 = 1e-7;

    pub fn new(network: &PolicyNetwork, learning_rate: f32) -> Self {
        let moments = network
            .layers()
            .iter()
            .map(|layer| Moments {
                weights_m: vec![0.0; layer.weights.len()],
                weights_v: vec![0.0; layer.weights.len()],
                biases_m: vec![0.0; layer.biases.len()],
                biases_v: vec![0.0; layer.biases.len()],
            })
            .collect();

        Self {
            learning_rate,
            betas: Betas {
                beta1: Self::DEFAULT_BETA1,
                beta2: Self::DEFAULT_BETA2,
                epsilon: Self::DEFAULT_EPSILON,
            },
            step: 0,
            moments,
        }
    }

    /// Apply one update using averaged batch gradients
    pub fn apply(&mut self, network: &mut PolicyNetwork, grads: &[LayerGradient]) {
        self.step += 1;
        let betas = self.betas;
        let correction1 = 1.0 - betas.beta1.powi(self.step);
        let correction2 = 1.0 - betas.beta2.powi(self.step);
        let step_size = self.learning_rate * correction2.sqrt() / correction1;

        for ((layer, grad), moments) in network
            .layers
            .iter_mut()
            .zip(grads)
            .zip(self.moments.iter_mut())
        {
            betas.update(
                &mut layer.weights,
                &grad.weights,
                &mut moments.weights_m,
                &mut moments.weights_v,
                step_size,
            );
            betas.update(
                &mut layer.biases,
                &grad.biases,
                &mut moments.biases_m,
                &mut moments.biases_v,
                step_size,
            );
        }
    }
}
