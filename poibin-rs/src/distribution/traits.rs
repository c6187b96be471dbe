//! Trait interfaces for distribution-kernel capabilities.
//!
//! These traits define the trait-first API shape shared by the spectrum
//! builder, the spectral inverter, and the distribution accessor.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;
#[cfg(feature = "alloc")]
use nalgebra::Complex;

/// Characteristic-spectrum construction capability.
#[cfg(feature = "alloc")]
pub trait CharacteristicSpectrum1D<T> {
    /// Compute the normalized spectrum into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<Complex<T>> + ?Sized;

    /// Compute the normalized spectrum and allocate output.
    fn run_alloc(&self) -> Result<Vec<Complex<T>>, ExecInvariantViolation>;
}

/// Characteristic-spectrum construction capability in no-alloc mode.
#[cfg(not(feature = "alloc"))]
pub trait CharacteristicSpectrum1D<T> {}

/// Spectrum-inversion capability recovering a real mass vector.
#[cfg(feature = "alloc")]
pub trait SpectralInversion1D<T> {
    /// Invert a spectrum into a caller-provided output buffer.
    fn run_into<I, O>(&self, spectrum: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Invert a spectrum and allocate output.
    fn run_alloc<I>(&self, spectrum: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<Complex<T>> + ?Sized;
}

/// Spectrum-inversion capability in no-alloc mode.
#[cfg(not(feature = "alloc"))]
pub trait SpectralInversion1D<T> {}

/// Elementwise probability-mass query capability.
pub trait MassQuery1D<T> {
    /// Look up `Pr(X = k)` for each outcome into a caller-provided buffer,
    /// preserving input order.
    fn run_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Look up `Pr(X = k)` for each outcome and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, outcomes: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized;
}

/// Elementwise cumulative-distribution query capability.
pub trait CumulativeQuery1D<T> {
    /// Look up `Pr(X <= k)` for each outcome into a caller-provided buffer,
    /// preserving input order.
    fn run_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Look up `Pr(X <= k)` for each outcome and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, outcomes: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized;
}

/// Elementwise right-tail p-value query capability.
pub trait TailQuery1D<T> {
    /// Look up `Pr(X >= k)` for each outcome into a caller-provided buffer,
    /// preserving input order.
    fn run_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<T> + ?Sized;

    /// Look up `Pr(X >= k)` for each outcome and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, outcomes: &I) -> Result<Vec<T>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized;
}
