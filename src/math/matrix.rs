use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use serde::{Serialize, Deserialize};

/// Dense row-major matrix; `data[r][c]` is row `r`, column `c`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix::filled(rows, cols, 0.0)
    }

    pub fn filled(rows: usize, cols: usize, value: f64) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![value; cols]; rows],
        }
    }

    /// Every entry drawn independently from `U[low, high]`.
    pub fn random_uniform<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        res.fill_uniform(low, high, rng);
        res
    }

    /// Redraws every entry from `U[low, high]`, row by row.
    pub fn fill_uniform<R: Rng + ?Sized>(&mut self, low: f64, high: f64, rng: &mut R) {
        let dist = Uniform::new_inclusive(low, high);
        for row in self.data.iter_mut() {
            for x in row.iter_mut() {
                *x = dist.sample(rng);
            }
        }
    }

    /// Builds a matrix from row vectors. An empty `data` yields a `0 × 0`
    /// matrix; rows are assumed to share the first row's length.
    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data.first().map_or(0, |r| r.len()),
            data,
        }
    }

    /// `(rows, cols)`, checked against every row's actual length.
    pub fn is_shape(&self, rows: usize, cols: usize) -> bool {
        self.rows == rows
            && self.cols == cols
            && self.data.len() == rows
            && self.data.iter().all(|r| r.len() == cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        self.data.get(row).and_then(|r| r.get(col)).copied()
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut f64> {
        self.data.get_mut(row).and_then(|r| r.get_mut(col))
    }

    /// `Σ_r v[r] * self[r][col]`. `v` is expected to have `rows` entries.
    pub fn column_dot(&self, v: &[f64], col: usize) -> f64 {
        v.iter()
            .zip(self.data.iter())
            .map(|(x, row)| x * row[col])
            .sum()
    }

    /// `Σ_c self[row][c] * v[c]`. `v` is expected to have `cols` entries.
    pub fn row_dot(&self, row: usize, v: &[f64]) -> f64 {
        self.data[row].iter().zip(v.iter()).map(|(w, x)| w * x).sum()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().flat_map(|r| r.iter().copied())
    }
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix { rows: 0, cols: 0, data: vec![] }
    }
}
