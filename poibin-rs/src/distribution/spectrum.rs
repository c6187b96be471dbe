//! Characteristic-function construction for the Poisson Binomial law.

use crate::distribution::traits::CharacteristicSpectrum1D;
use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle, Write1D};
use alloc::vec::Vec;
use nalgebra::Complex;
use num_traits::{Float, FloatConst, NumCast};

/// Constructor config for [`CharacteristicSpectrumKernel`].
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicSpectrumConfig<F>
where
    F: Float,
{
    /// Success probabilities of the independent Bernoulli trials, each in
    /// `[0, 1]`.
    pub probabilities: Vec<F>,
}

/// Trait-first characteristic-spectrum kernel.
///
/// Evaluates the characteristic function of the sum of the configured
/// Bernoulli trials at the `n + 1` angular frequencies `l * omega`,
/// `omega = 2*pi/(n + 1)`, and normalizes every element by `1/(n + 1)` so
/// the spectrum is ready for inversion.
///
/// Each frequency is the product over trials of the per-trial factor
/// `z_i = (1 - p_i) + p_i * e^(i*theta)`. The product is accumulated as a
/// sum of log-magnitudes and a sum of phase angles rather than a running
/// complex product, which keeps the magnitude from underflowing when `n` is
/// large. Only the first `ceil(n/2)` frequencies are evaluated; the rest
/// follow from conjugate symmetry.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacteristicSpectrumKernel<F>
where
    F: Float,
{
    probabilities: Vec<F>,
    omega: F,
}

impl<F> CharacteristicSpectrumKernel<F>
where
    F: Float,
{
    /// Number of configured Bernoulli trials `n`.
    pub fn trials(&self) -> usize {
        self.probabilities.len()
    }

    /// Angular frequency step `2*pi/(n + 1)`.
    pub fn omega(&self) -> F {
        self.omega
    }

    /// Spectrum length `n + 1`.
    pub fn spectrum_len(&self) -> usize {
        self.probabilities.len() + 1
    }
}

impl<F> KernelLifecycle for CharacteristicSpectrumKernel<F>
where
    F: Float + FloatConst,
{
    type Config = CharacteristicSpectrumConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        let probabilities = config.probabilities;
        if probabilities.is_empty() {
            return Err(ConfigError::EmptyInput {
                arg: "probabilities",
            });
        }
        for (index, &value) in probabilities.iter().enumerate() {
            if !(value >= F::zero()) {
                return Err(ConfigError::NegativeProbability {
                    index,
                    value: as_f64(value),
                });
            }
            if value > F::one() {
                return Err(ConfigError::ProbabilityExceedsOne {
                    index,
                    value: as_f64(value),
                });
            }
        }

        let len = F::from(probabilities.len() + 1).unwrap();
        let omega = (F::one() + F::one()) * F::PI() / len;
        Ok(Self {
            probabilities,
            omega,
        })
    }
}

impl<F> CharacteristicSpectrum1D<F> for CharacteristicSpectrumKernel<F>
where
    F: Float,
{
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<Complex<F>> + ?Sized,
    {
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out.len() != self.spectrum_len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: self.spectrum_len(),
                got: out.len(),
            });
        }
        let chi = characteristic_spectrum_impl(&self.probabilities, self.omega);
        out.copy_from_slice(&chi);
        Ok(())
    }

    fn run_alloc(&self) -> Result<Vec<Complex<F>>, ExecInvariantViolation> {
        Ok(characteristic_spectrum_impl(
            &self.probabilities,
            self.omega,
        ))
    }
}

fn as_f64<F: NumCast>(value: F) -> f64 {
    NumCast::from(value).unwrap_or(f64::NAN)
}

fn characteristic_spectrum_impl<F>(probabilities: &[F], omega: F) -> Vec<Complex<F>>
where
    F: Float,
{
    let len = probabilities.len() + 1;
    let mut chi = vec![Complex::new(F::one(), F::zero()); len];

    // The second half of the spectrum mirrors the first under conjugation,
    // so only ceil(n/2) frequencies need direct evaluation.
    let half = probabilities.len() / 2 + probabilities.len() % 2;
    for l in 1..=half {
        let theta = omega * F::from(l).unwrap();
        let (sin, cos) = theta.sin_cos();
        let mut log_magnitude = F::zero();
        let mut phase = F::zero();
        for &p in probabilities {
            let z = Complex::new(F::one() - p + p * cos, p * sin);
            log_magnitude = log_magnitude + z.norm().ln();
            phase = phase + z.arg();
        }
        chi[l] = Complex::from_polar(log_magnitude.exp(), phase);
    }
    for l in half + 1..len {
        chi[l] = chi[len - l].conj();
    }

    let scale = F::one() / F::from(len).unwrap();
    for value in chi.iter_mut() {
        *value = *value * scale;
    }
    chi
}
