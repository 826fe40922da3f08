use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::error::{check_len, MlpError, Result};
use crate::math::matrix::Matrix;
use crate::network::config::Topology;

/// Lower and upper bound of the uniform initialization.
pub const INIT_RANGE: (f64, f64) = (-1.0, 1.0);

/// Learnable state of the network.
///
/// - `input_hidden` : `I × H`; `[i][j]` connects input `i` to hidden unit `j`
/// - `hidden_output`: `H × O`; `[j][k]` connects hidden unit `j` to output `k`
/// - `hidden_bias`  : length `H`
/// - `output_bias`  : length `O`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    pub input_hidden: Matrix,
    pub hidden_output: Matrix,
    pub hidden_bias: Vec<f64>,
    pub output_bias: Vec<f64>,
}

impl Parameters {
    pub fn zeros(topology: Topology) -> Parameters {
        Parameters {
            input_hidden: Matrix::zeros(topology.inputs, topology.hidden),
            hidden_output: Matrix::zeros(topology.hidden, topology.outputs),
            hidden_bias: vec![0.0; topology.hidden],
            output_bias: vec![0.0; topology.outputs],
        }
    }

    /// Every weight set to `weight` and every bias to `bias`.
    pub fn filled(topology: Topology, weight: f64, bias: f64) -> Parameters {
        Parameters {
            input_hidden: Matrix::filled(topology.inputs, topology.hidden, weight),
            hidden_output: Matrix::filled(topology.hidden, topology.outputs, weight),
            hidden_bias: vec![bias; topology.hidden],
            output_bias: vec![bias; topology.outputs],
        }
    }

    pub fn random<R: Rng + ?Sized>(topology: Topology, rng: &mut R) -> Parameters {
        let mut params = Parameters::zeros(topology);
        params.randomize(rng);
        params
    }

    /// Redraws every entry from `U[-1, 1]`: input-hidden weights, then
    /// hidden-output weights, then hidden biases, then output biases.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let (low, high) = INIT_RANGE;
        self.input_hidden.fill_uniform(low, high, rng);
        self.hidden_output.fill_uniform(low, high, rng);

        let dist = Uniform::new_inclusive(low, high);
        for b in self.hidden_bias.iter_mut().chain(self.output_bias.iter_mut()) {
            *b = dist.sample(rng);
        }
    }

    /// Fails with `DimensionMismatch` on the first field whose shape
    /// disagrees with `topology`.
    pub fn check_shape(&self, topology: Topology) -> Result<()> {
        check_matrix("input-hidden weights", &self.input_hidden, topology.inputs, topology.hidden)?;
        check_matrix("hidden-output weights", &self.hidden_output, topology.hidden, topology.outputs)?;
        check_len("hidden bias", topology.hidden, self.hidden_bias.len())?;
        check_len("output bias", topology.outputs, self.output_bias.len())?;
        Ok(())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.input_hidden.values()
            .chain(self.hidden_output.values())
            .chain(self.hidden_bias.iter().copied())
            .chain(self.output_bias.iter().copied())
    }
}

fn check_matrix(what: &'static str, m: &Matrix, rows: usize, cols: usize) -> Result<()> {
    check_len(what, rows, m.data.len())?;
    if let Some(row) = m.data.iter().find(|r| r.len() != cols) {
        return Err(MlpError::DimensionMismatch { what, expected: cols, actual: row.len() });
    }
    if !m.is_shape(rows, cols) {
        return Err(MlpError::InvalidData(format!(
            "{what}: declared shape {}x{} does not match its rows",
            m.rows, m.cols
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn random_parameters_have_topology_shape_and_unit_range() {
        for &(i, h, o) in &[(1, 1, 1), (2, 2, 1), (3, 5, 2), (7, 3, 4)] {
            let t = Topology::new(i, h, o);
            let p = Parameters::random(t, &mut StdRng::seed_from_u64(1));
            assert!(p.check_shape(t).is_ok());
            assert!(p.input_hidden.is_shape(i, h));
            assert!(p.hidden_output.is_shape(h, o));
            assert_eq!(p.hidden_bias.len(), h);
            assert_eq!(p.output_bias.len(), o);
            assert!(p.values().all(|x| (-1.0..=1.0).contains(&x)));
        }
    }

    #[test]
    fn randomize_draws_biases_too() {
        let t = Topology::new(2, 6, 6);
        let p = Parameters::random(t, &mut StdRng::seed_from_u64(3));
        assert!(p.hidden_bias.iter().any(|&b| b != 0.0));
        assert!(p.output_bias.iter().any(|&b| b != 0.0));
    }

    #[test]
    fn check_shape_names_the_offending_field() {
        let t = Topology::new(2, 3, 1);
        let mut p = Parameters::zeros(t);
        p.output_bias.push(0.0);
        match p.check_shape(t) {
            Err(MlpError::DimensionMismatch { what, expected, actual }) => {
                assert_eq!(what, "output bias");
                assert_eq!((expected, actual), (1, 2));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let mut p = Parameters::zeros(t);
        p.hidden_output.data[1].pop();
        assert!(matches!(
            p.check_shape(t),
            Err(MlpError::DimensionMismatch { what: "hidden-output weights", .. })
        ));
    }
}
