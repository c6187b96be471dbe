//! Spectral inversion of a characteristic spectrum into a mass vector.

use crate::distribution::traits::SpectralInversion1D;
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use alloc::vec::Vec;
use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Constructor config for [`SpectralInversionKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralInversionConfig {
    /// Largest imaginary residue tolerated in the transform output.
    pub tolerance: f64,
}

impl Default for SpectralInversionConfig {
    fn default() -> Self {
        Self { tolerance: 1e-15 }
    }
}

/// Trait-first spectrum-inversion kernel.
///
/// A forward DFT applied to the `1/(n + 1)`-normalized, conjugate-symmetric
/// characteristic spectrum recovers the probability mass vector. The
/// transform output must be real: any imaginary component above `tolerance`
/// means the input was not a valid characteristic spectrum, and the run
/// fails without producing a mass vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralInversionKernel {
    tolerance: f64,
}

impl SpectralInversionKernel {
    /// Largest imaginary residue tolerated in the transform output.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    fn checked_transform(
        &self,
        spectrum: &[Complex<f64>],
    ) -> Result<Vec<Complex<f64>>, ExecInvariantViolation> {
        if spectrum.is_empty() {
            return Err(ExecInvariantViolation::InvalidState {
                reason: "inversion input spectrum must be non-empty",
            });
        }
        let transformed = forward_transform(spectrum);
        for (index, value) in transformed.iter().enumerate() {
            let magnitude = value.im.abs();
            if magnitude > self.tolerance {
                return Err(ExecInvariantViolation::ResidualImaginary {
                    index,
                    magnitude,
                    tolerance: self.tolerance,
                });
            }
        }
        Ok(transformed)
    }
}

impl KernelLifecycle for SpectralInversionKernel {
    type Config = SpectralInversionConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        if !config.tolerance.is_finite() || config.tolerance <= 0.0 {
            return Err(ConfigError::InvalidArgument {
                arg: "tolerance",
                reason: "tolerance must be finite and > 0",
            });
        }
        Ok(Self {
            tolerance: config.tolerance,
        })
    }
}

fn forward_transform(spectrum: &[Complex<f64>]) -> Vec<Complex<f64>> {
    let mut buf = spectrum.to_vec();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buf.len());
    fft.process(&mut buf);
    buf
}

impl SpectralInversion1D<f64> for SpectralInversionKernel {
    fn run_into<I, O>(&self, spectrum: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<f64>> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let spectrum = spectrum.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out.len() != spectrum.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: spectrum.len(),
                got: out.len(),
            });
        }

        let transformed = self.checked_transform(spectrum)?;
        for (slot, value) in out.iter_mut().zip(transformed.iter()) {
            *slot = value.re;
        }
        Ok(())
    }

    fn run_alloc<I>(&self, spectrum: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<Complex<f64>> + ?Sized,
    {
        let spectrum = spectrum.read_slice().map_err(ExecInvariantViolation::from)?;
        let transformed = self.checked_transform(spectrum)?;
        Ok(transformed.into_iter().map(|value| value.re).collect())
    }
}
