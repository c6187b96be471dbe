//! The Poisson Binomial distribution.
//!
//! The law of the sum of `n` independent Bernoulli trials with success
//! probabilities `p_1..p_n`, computed exactly: the characteristic function
//! is evaluated at `n + 1` discrete frequencies and inverted with a DFT
//! ([Hong 2013](https://doi.org/10.1016/j.csda.2012.10.006)). The
//! [`PoissonBinomial`] value owns the precomputed mass and cumulative
//! vectors and answers `pmf`/`cdf`/`pval` queries for outcomes in `0..=n`.

pub mod traits;

#[cfg(feature = "alloc")]
mod spectrum;
#[cfg(feature = "alloc")]
pub use spectrum::*;

#[cfg(feature = "std")]
mod inversion;
#[cfg(feature = "std")]
pub use inversion::*;

#[cfg(feature = "std")]
mod poisson_binomial;
#[cfg(feature = "std")]
pub use poisson_binomial::*;

#[cfg(feature = "std")]
use crate::error::Error;
#[cfg(feature = "std")]
use alloc::vec::Vec;

/// Probability mass `Pr(X = k)` for each outcome, in input order.
///
/// Builds the distribution once and queries it elementwise. Callers issuing
/// repeated queries against the same probability vector should construct a
/// [`PoissonBinomial`] and reuse it instead.
///
/// ```
/// use approx::assert_abs_diff_eq;
/// use poibin_rs::distribution::pmf;
///
/// let mass = pmf(&[0.5, 0.5, 0.5], &[0, 1, 2, 3]).unwrap();
/// assert_abs_diff_eq!(mass[0], 0.125, epsilon = 1e-9);
/// assert_abs_diff_eq!(mass[1], 0.375, epsilon = 1e-9);
/// ```
#[cfg(feature = "std")]
pub fn pmf(probabilities: &[f64], outcomes: &[usize]) -> Result<Vec<f64>, Error> {
    let distribution = PoissonBinomial::from_probabilities(probabilities)?;
    distribution.pmf_alloc(outcomes).map_err(Error::from)
}

/// Cumulative probability `Pr(X <= k)` for each outcome, in input order.
///
/// ```
/// use approx::assert_abs_diff_eq;
/// use poibin_rs::distribution::cdf;
///
/// let cumulative = cdf(&[0.5, 0.5, 0.5], &[1, 3]).unwrap();
/// assert_abs_diff_eq!(cumulative[0], 0.5, epsilon = 1e-9);
/// assert_abs_diff_eq!(cumulative[1], 1.0, epsilon = 1e-9);
/// ```
#[cfg(feature = "std")]
pub fn cdf(probabilities: &[f64], outcomes: &[usize]) -> Result<Vec<f64>, Error> {
    let distribution = PoissonBinomial::from_probabilities(probabilities)?;
    distribution.cdf_alloc(outcomes).map_err(Error::from)
}

/// Right-tail p-value `Pr(X >= k)` for each outcome, in input order.
///
/// ```
/// use approx::assert_abs_diff_eq;
/// use poibin_rs::distribution::pval;
///
/// let tail = pval(&[0.5, 0.5, 0.5], &[0, 3]).unwrap();
/// assert_abs_diff_eq!(tail[0], 1.0);
/// assert_abs_diff_eq!(tail[1], 0.125, epsilon = 1e-9);
/// ```
#[cfg(feature = "std")]
pub fn pval(probabilities: &[f64], outcomes: &[usize]) -> Result<Vec<f64>, Error> {
    let distribution = PoissonBinomial::from_probabilities(probabilities)?;
    distribution.pval_alloc(outcomes).map_err(Error::from)
}
