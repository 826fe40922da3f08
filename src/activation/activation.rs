use serde::{Serialize, Deserialize};

/// `x` when positive, `0` otherwise.
pub fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

/// Sub-gradient of ReLU. Zero is treated as non-positive.
pub fn relu_derivative(x: f64) -> f64 {
    if x > 0.0 { 1.0 } else { 0.0 }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Derivative of the sigmoid expressed through its output: `fx` must already
/// be `sigmoid(x)`.
pub fn sigmoid_derivative(fx: f64) -> f64 {
    fx * (1.0 - fx)
}

/// Element-wise activation attached to a layer of the network.
///
/// The hidden layer always uses `ReLU` and the output layer `Sigmoid`; the
/// enum exists so the pairing is named in one place and shows up in configs
/// and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    ReLU,
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => relu(x),
            ActivationFunction::Sigmoid => sigmoid(x),
        }
    }

    /// Derivative evaluated at the value the network caches for the layer,
    /// which is the post-activation output `y` for both variants.
    ///
    /// For ReLU `y > 0` exactly when the pre-activation was positive, so the
    /// result matches `relu_derivative` of the pre-activation.
    pub fn derivative(&self, y: f64) -> f64 {
        match self {
            ActivationFunction::ReLU => relu_derivative(y),
            ActivationFunction::Sigmoid => sigmoid_derivative(y),
        }
    }

    /// Applies the activation to every entry in place.
    pub fn apply(&self, values: &mut [f64]) {
        for v in values.iter_mut() {
            *v = self.function(*v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sigmoid_is_half_at_zero() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_is_monotonic_and_bounded() {
        let xs = [-30.0, -5.0, -1.0, -0.1, 0.0, 0.1, 1.0, 5.0, 30.0];
        for w in xs.windows(2) {
            assert!(sigmoid(w[0]) < sigmoid(w[1]), "not increasing at {:?}", w);
        }
        for &x in &xs {
            let y = sigmoid(x);
            assert!(y > 0.0 && y < 1.0, "sigmoid({x}) = {y} escapes (0, 1)");
        }
    }

    #[test]
    fn relu_matches_max_with_zero() {
        for &x in &[-3.5, -1e-9, 0.0, 1e-9, 2.25] {
            assert_eq!(relu(x), f64::max(x, 0.0));
        }
    }

    #[test]
    fn relu_derivative_is_zero_at_and_below_zero() {
        assert_eq!(relu_derivative(-1.0), 0.0);
        assert_eq!(relu_derivative(0.0), 0.0);
        assert_eq!(relu_derivative(1e-12), 1.0);
        assert_eq!(relu_derivative(4.0), 1.0);
    }

    #[test]
    fn sigmoid_derivative_takes_activated_value() {
        assert_eq!(sigmoid_derivative(0.5), 0.25);
        assert!((sigmoid_derivative(0.2) - 0.16).abs() < 1e-12);
        for &fx in &[0.0, 0.1, 0.3, 0.7, 0.9, 1.0] {
            assert!(sigmoid_derivative(fx) <= 0.25);
        }
    }

    #[test]
    fn enum_dispatches_to_free_functions() {
        assert_eq!(ActivationFunction::ReLU.function(-2.0), 0.0);
        assert_eq!(ActivationFunction::ReLU.function(3.0), 3.0);
        assert_eq!(ActivationFunction::Sigmoid.function(0.0), 0.5);
        assert_eq!(ActivationFunction::ReLU.derivative(0.0), 0.0);
        assert_eq!(ActivationFunction::Sigmoid.derivative(0.5), 0.25);

        let mut v = [-1.0, 0.0, 2.0];
        ActivationFunction::ReLU.apply(&mut v);
        assert_eq!(v, [0.0, 0.0, 2.0]);
    }
}
