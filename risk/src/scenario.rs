//! Correlated scenario generation
//!
//! Fits a multivariate normal to the historical log-return matrix (sample
//! mean per instrument, sample covariance across instruments, N-1
//! normalization) and draws correlated shocks from an isolated seeded
//! generator. Sampled log-returns are converted to simple returns with
//! `exp(x) - 1` exactly once, after sampling — fitting the covariance on
//! exponentiated returns would bias the tail.

use crate::error::{Result, RiskError};
use crate::returns::ReturnSeries;
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Relative tolerance for accepting a covariance matrix as positive
/// semi-definite. Eigenvalues in `[-tol, 0)` are clamped to zero; anything
/// below `-tol` is degenerate.
const PSD_TOLERANCE: f64 = 1e-10;

/// Monte Carlo scenario generator
#[derive(Debug, Clone)]
pub struct ScenarioGenerator {
    simulations: usize,
    seed: u64,
}

impl ScenarioGenerator {
    pub fn new(simulations: usize, seed: u64) -> Self {
        Self { simulations, seed }
    }

    /// Draw a `simulations x instruments` matrix of simulated simple returns
    pub fn generate(&self, series: &[ReturnSeries]) -> Result<DMatrix<f64>> {
        let returns = align_returns(series)?;
        let mean = sample_mean(&returns);
        let cov = sample_covariance(&returns, &mean)?;
        let factor = psd_factor(&cov)?;

        let k = mean.len();
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut scenarios = DMatrix::zeros(self.simulations, k);

        for s in 0..self.simulations {
            let z = DVector::from_fn(k, |_, _| rng.sample::<f64, _>(StandardNormal));
            let shock = &mean + &factor * z;
            for (j, x) in shock.iter().enumerate() {
                // Log-return scenario to simple return, after sampling only.
                scenarios[(s, j)] = x.exp_m1();
            }
        }

        Ok(scenarios)
    }
}

/// Stack per-instrument return vectors into an `observations x instruments`
/// matrix, column order matching the input order
fn align_returns(series: &[ReturnSeries]) -> Result<DMatrix<f64>> {
    if series.is_empty() {
        return Err(RiskError::EmptyPortfolio);
    }

    let n = series[0].log_returns.len();
    for s in series {
        if s.log_returns.len() != n {
            return Err(RiskError::InvalidParameter(format!(
                "return series for {} has {} observations, expected {}",
                s.instrument,
                s.log_returns.len(),
                n
            )));
        }
    }
    if n < 2 {
        return Err(RiskError::InvalidParameter(format!(
            "need at least 2 return observations to estimate covariance, got {}",
            n
        )));
    }

    Ok(DMatrix::from_fn(n, series.len(), |i, j| {
        series[j].log_returns[i]
    }))
}

fn sample_mean(returns: &DMatrix<f64>) -> DVector<f64> {
    let n = returns.nrows() as f64;
    DVector::from_iterator(
        returns.ncols(),
        returns.column_iter().map(|col| col.sum() / n),
    )
}

/// Sample covariance matrix with N-1 normalization
fn sample_covariance(returns: &DMatrix<f64>, mean: &DVector<f64>) -> Result<DMatrix<f64>> {
    let n = returns.nrows();
    let mut centered = returns.clone();
    for mut row in centered.row_iter_mut() {
        row -= mean.transpose();
    }

    let cov = centered.transpose() * &centered / (n as f64 - 1.0);

    if cov.iter().any(|v| !v.is_finite()) {
        return Err(RiskError::DegenerateCovariance(
            "covariance matrix contains non-finite entries".to_string(),
        ));
    }

    Ok(cov)
}

/// Factor `cov = F F^T` for sampling
///
/// Cholesky handles the strictly positive-definite case; semi-definite
/// matrices (constant-price instrument, fewer observations than
/// instruments) fall back to a symmetric eigendecomposition with small
/// negative eigenvalues clamped to zero.
fn psd_factor(cov: &DMatrix<f64>) -> Result<DMatrix<f64>> {
    if let Some(chol) = nalgebra::Cholesky::new(cov.clone()) {
        return Ok(chol.l());
    }

    let scale = cov
        .diagonal()
        .iter()
        .fold(1.0f64, |acc, &d| acc.max(d.abs()));
    let tol = PSD_TOLERANCE * scale;

    let eigen = cov.clone().symmetric_eigen();
    let mut roots = eigen.eigenvalues.clone();
    for value in roots.iter_mut() {
        if *value < -tol {
            return Err(RiskError::DegenerateCovariance(format!(
                "eigenvalue {} below tolerance -{}",
                value, tol
            )));
        }
        *value = value.max(0.0).sqrt();
    }

    Ok(&eigen.eigenvectors * DMatrix::from_diagonal(&roots))
}
