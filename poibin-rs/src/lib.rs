#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

//! # poibin-rs
//!
//! The Poisson Binomial distribution: the law of the sum of `n` independent
//! Bernoulli trials with heterogeneous success probabilities.
//!
//! The distribution is computed in closed form. Its characteristic function
//! is evaluated at `n + 1` discrete frequencies with a log-magnitude /
//! phase-angle accumulation that stays stable for large `n`, then inverted
//! with a discrete Fourier transform, following
//! [Hong 2013](https://doi.org/10.1016/j.csda.2012.10.006).
//!
//! ```
//! use approx::assert_abs_diff_eq;
//! use poibin_rs::distribution::PoissonBinomial;
//!
//! let pb = PoissonBinomial::from_probabilities(&[0.5, 0.5, 0.5]).unwrap();
//! assert_abs_diff_eq!(pb.pmf(1).unwrap(), 0.375, epsilon = 1e-9);
//! assert_abs_diff_eq!(pb.cdf(3).unwrap(), 1.0, epsilon = 1e-9);
//! assert_abs_diff_eq!(pb.pval(0).unwrap(), 1.0);
//! ```
//!
//! Feature flags: `alloc` enables the heap-backed spectrum builder; `std`
//! (default) additionally enables the FFT-backed inversion and the
//! [`distribution::PoissonBinomial`] type.

#[cfg(feature = "alloc")]
#[macro_use]
extern crate alloc;

pub mod distribution;
pub mod error;
pub mod kernel;
