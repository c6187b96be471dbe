//! The eagerly-constructed Poisson Binomial distribution value.

use crate::distribution::traits::{
    CharacteristicSpectrum1D, CumulativeQuery1D, MassQuery1D, SpectralInversion1D, TailQuery1D,
};
use crate::distribution::{
    CharacteristicSpectrumConfig, CharacteristicSpectrumKernel, SpectralInversionConfig,
    SpectralInversionKernel,
};
use crate::error::Error;
use crate::kernel::{ExecInvariantViolation, KernelLifecycle, Read1D, Write1D};
use alloc::vec::Vec;
use nalgebra::Complex;

/// Poisson Binomial distribution of the sum of independent Bernoulli trials.
///
/// All derived state (characteristic spectrum, mass vector, cumulative
/// vector) is computed eagerly at construction. The value is immutable
/// afterwards, so a constructed distribution can be queried repeatedly and
/// shared across threads without synchronization.
///
/// ```
/// use approx::assert_abs_diff_eq;
/// use poibin_rs::distribution::PoissonBinomial;
///
/// let pb = PoissonBinomial::from_probabilities(&[0.5, 0.5, 0.5]).unwrap();
/// assert_abs_diff_eq!(pb.pmf(2).unwrap(), 0.375, epsilon = 1e-9);
/// assert_abs_diff_eq!(pb.cdf(1).unwrap(), 0.5, epsilon = 1e-9);
/// assert_abs_diff_eq!(pb.pval(3).unwrap(), 0.125, epsilon = 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PoissonBinomial {
    probabilities: Vec<f64>,
    omega: f64,
    spectrum: Vec<Complex<f64>>,
    mass: Vec<f64>,
    cumulative: Vec<f64>,
}

impl PoissonBinomial {
    /// Build the distribution from Bernoulli success probabilities.
    ///
    /// Validates every probability, evaluates the characteristic spectrum,
    /// inverts it, and precomputes the cumulative vector. Either a fully
    /// populated value is returned or an [`Error`]; no partially-built
    /// distribution is ever observable.
    ///
    /// Construction is `O(n^2)` in the number of trials; queries afterwards
    /// are constant-time lookups.
    pub fn from_probabilities<I>(probabilities: &I) -> Result<Self, Error>
    where
        I: Read1D<f64> + ?Sized,
    {
        let probabilities = probabilities.read_slice().map_err(Error::from)?;

        let builder = CharacteristicSpectrumKernel::try_new(CharacteristicSpectrumConfig {
            probabilities: probabilities.to_vec(),
        })?;
        let omega = builder.omega();
        let spectrum = builder.run_alloc()?;

        let inverter = SpectralInversionKernel::try_new(SpectralInversionConfig::default())?;
        let mass = inverter.run_alloc(&spectrum)?;

        let mut cumulative = Vec::with_capacity(mass.len());
        let mut total = 0.0;
        for &value in &mass {
            total += value;
            cumulative.push(total);
        }

        Ok(Self {
            probabilities: probabilities.to_vec(),
            omega,
            spectrum,
            mass,
            cumulative,
        })
    }

    /// Number of Bernoulli trials `n`. Outcomes range over `0..=n`.
    pub fn n(&self) -> usize {
        self.probabilities.len()
    }

    /// The validated success probabilities.
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// Angular frequency step `2*pi/(n + 1)` of the spectrum.
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// The `1/(n + 1)`-normalized characteristic spectrum, `n + 1` points.
    pub fn characteristic_spectrum(&self) -> &[Complex<f64>] {
        &self.spectrum
    }

    /// Mean of the distribution, the sum of the success probabilities.
    pub fn mean(&self) -> f64 {
        self.probabilities.iter().sum()
    }

    /// Variance of the distribution, `sum(p_i * (1 - p_i))`.
    pub fn variance(&self) -> f64 {
        self.probabilities.iter().map(|p| p * (1.0 - p)).sum()
    }

    fn check_outcome(&self, k: usize) -> Result<(), ExecInvariantViolation> {
        if k > self.n() {
            return Err(ExecInvariantViolation::OutOfSupport {
                arg: "k",
                value: k,
                max: self.n(),
            });
        }
        Ok(())
    }

    /// Probability mass `Pr(X = k)`.
    pub fn pmf(&self, k: usize) -> Result<f64, ExecInvariantViolation> {
        self.check_outcome(k)?;
        Ok(self.mass[k])
    }

    /// Cumulative probability `Pr(X <= k)`.
    pub fn cdf(&self, k: usize) -> Result<f64, ExecInvariantViolation> {
        self.check_outcome(k)?;
        Ok(self.cumulative[k])
    }

    /// Right-tail p-value `Pr(X >= k)`.
    ///
    /// `k = 0` is `1.0` by definition; for `k > 0` this is `1 - cdf(k - 1)`.
    pub fn pval(&self, k: usize) -> Result<f64, ExecInvariantViolation> {
        self.check_outcome(k)?;
        if k == 0 {
            Ok(1.0)
        } else {
            Ok(1.0 - self.cumulative[k - 1])
        }
    }

    /// Elementwise [`Self::pmf`] over a sequence of outcomes, preserving
    /// input order. Every outcome is validated before any output is written.
    pub fn pmf_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        self.lookup_into(outcomes, out, |this, k| this.mass[k])
    }

    /// Elementwise [`Self::pmf`] over a sequence of outcomes, allocating.
    pub fn pmf_alloc<I>(&self, outcomes: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
    {
        self.lookup_alloc(outcomes, |this, k| this.mass[k])
    }

    /// Elementwise [`Self::cdf`] over a sequence of outcomes, preserving
    /// input order.
    pub fn cdf_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        self.lookup_into(outcomes, out, |this, k| this.cumulative[k])
    }

    /// Elementwise [`Self::cdf`] over a sequence of outcomes, allocating.
    pub fn cdf_alloc<I>(&self, outcomes: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
    {
        self.lookup_alloc(outcomes, |this, k| this.cumulative[k])
    }

    /// Elementwise [`Self::pval`] over a sequence of outcomes, preserving
    /// input order.
    ///
    /// Uses the identity `1 - cdf(k) + pmf(k)`, which equals
    /// `1 - cdf(k - 1)` without needing a lookup below the support.
    pub fn pval_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        self.lookup_into(outcomes, out, Self::tail_lookup)
    }

    /// Elementwise [`Self::pval`] over a sequence of outcomes, allocating.
    pub fn pval_alloc<I>(&self, outcomes: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
    {
        self.lookup_alloc(outcomes, Self::tail_lookup)
    }

    fn tail_lookup(&self, k: usize) -> f64 {
        1.0 - self.cumulative[k] + self.mass[k]
    }

    fn lookup_into<I, O>(
        &self,
        outcomes: &I,
        out: &mut O,
        lookup: impl Fn(&Self, usize) -> f64,
    ) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        let outcomes = outcomes.read_slice().map_err(ExecInvariantViolation::from)?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        if out.len() != outcomes.len() {
            return Err(ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: outcomes.len(),
                got: out.len(),
            });
        }
        for &k in outcomes {
            self.check_outcome(k)?;
        }
        for (slot, &k) in out.iter_mut().zip(outcomes) {
            *slot = lookup(self, k);
        }
        Ok(())
    }

    fn lookup_alloc<I>(
        &self,
        outcomes: &I,
        lookup: impl Fn(&Self, usize) -> f64,
    ) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
    {
        let outcomes = outcomes.read_slice().map_err(ExecInvariantViolation::from)?;
        for &k in outcomes {
            self.check_outcome(k)?;
        }
        Ok(outcomes.iter().map(|&k| lookup(self, k)).collect())
    }
}

impl MassQuery1D<f64> for PoissonBinomial {
    fn run_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        self.pmf_into(outcomes, out)
    }

    fn run_alloc<I>(&self, outcomes: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
    {
        self.pmf_alloc(outcomes)
    }
}

impl CumulativeQuery1D<f64> for PoissonBinomial {
    fn run_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        self.cdf_into(outcomes, out)
    }

    fn run_alloc<I>(&self, outcomes: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
    {
        self.cdf_alloc(outcomes)
    }
}

impl TailQuery1D<f64> for PoissonBinomial {
    fn run_into<I, O>(&self, outcomes: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
        O: Write1D<f64> + ?Sized,
    {
        self.pval_into(outcomes, out)
    }

    fn run_alloc<I>(&self, outcomes: &I) -> Result<Vec<f64>, ExecInvariantViolation>
    where
        I: Read1D<usize> + ?Sized,
    {
        self.pval_alloc(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::PoissonBinomial;
    use crate::distribution::traits::{CumulativeQuery1D, MassQuery1D, TailQuery1D};
    use crate::error::Error;
    use crate::kernel::ExecInvariantViolation;
    use approx::assert_abs_diff_eq;

    const MIXED: [f64; 10] = [0.02, 0.13, 0.25, 0.38, 0.41, 0.57, 0.63, 0.72, 0.86, 0.99];

    /// Direct O(n^2) convolution recurrence, independent of the transform.
    fn convolved_mass(probabilities: &[f64]) -> Vec<f64> {
        let mut mass = vec![1.0];
        for &p in probabilities {
            let mut next = vec![0.0; mass.len() + 1];
            for (k, &m) in mass.iter().enumerate() {
                next[k] += m * (1.0 - p);
                next[k + 1] += m * p;
            }
            mass = next;
        }
        mass
    }

    #[test]
    fn reduces_to_the_symmetric_binomial() {
        let pb = PoissonBinomial::from_probabilities(&[0.5, 0.5, 0.5]).expect("valid input");
        let expected_mass = [0.125, 0.375, 0.375, 0.125];
        let expected_cdf = [0.125, 0.5, 0.875, 1.0];
        for k in 0..=3 {
            assert_abs_diff_eq!(pb.pmf(k).unwrap(), expected_mass[k], epsilon = 1e-9);
            assert_abs_diff_eq!(pb.cdf(k).unwrap(), expected_cdf[k], epsilon = 1e-9);
        }
    }

    #[test]
    fn matches_the_convolution_recurrence() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        let expected = convolved_mass(&MIXED);
        for (k, &value) in expected.iter().enumerate() {
            assert_abs_diff_eq!(pb.pmf(k).unwrap(), value, epsilon = 1e-12);
        }
    }

    #[test]
    fn mass_is_nonnegative_and_sums_to_one() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        let outcomes: Vec<usize> = (0..=pb.n()).collect();
        let mass = pb.pmf_alloc(outcomes.as_slice()).expect("batch pmf");
        let mut total = 0.0;
        for value in &mass {
            assert!(*value >= -1e-9);
            total += value;
        }
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn cumulative_is_monotone_and_ends_at_one() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        let mut previous = 0.0;
        for k in 0..=pb.n() {
            let value = pb.cdf(k).unwrap();
            assert!(value >= previous);
            previous = value;
        }
        assert_abs_diff_eq!(pb.cdf(pb.n()).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn all_failing_trials_put_the_mass_at_zero() {
        let pb = PoissonBinomial::from_probabilities(&[0.0; 12]).expect("valid input");
        assert_abs_diff_eq!(pb.pmf(0).unwrap(), 1.0, epsilon = 1e-9);
        for k in 1..=12 {
            assert_abs_diff_eq!(pb.pmf(k).unwrap(), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(pb.cdf(k).unwrap(), 1.0, epsilon = 1e-9);
            assert_abs_diff_eq!(pb.pval(k).unwrap(), 0.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(pb.pval(0).unwrap(), 1.0);
    }

    #[test]
    fn all_succeeding_trials_put_the_mass_at_n() {
        let pb = PoissonBinomial::from_probabilities(&[1.0; 12]).expect("valid input");
        assert_abs_diff_eq!(pb.pmf(12).unwrap(), 1.0, epsilon = 1e-9);
        for k in 0..12 {
            assert_abs_diff_eq!(pb.pmf(k).unwrap(), 0.0, epsilon = 1e-9);
            assert_abs_diff_eq!(pb.cdf(k).unwrap(), 0.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(pb.cdf(12).unwrap(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn single_trial_distribution_is_exact() {
        let pb = PoissonBinomial::from_probabilities(&[0.3]).expect("valid input");
        assert_abs_diff_eq!(pb.pmf(0).unwrap(), 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(pb.pmf(1).unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn tail_probability_is_one_at_zero_on_both_paths() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        assert_eq!(pb.pval(0).unwrap(), 1.0);
        let batch = pb.pval_alloc(&[0usize]).expect("batch pval");
        assert_abs_diff_eq!(batch[0], pb.pval(0).unwrap(), epsilon = 1e-12);
    }

    #[test]
    fn tail_probability_identities_hold() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        for k in 1..=pb.n() {
            let tail = pb.pval(k).unwrap();
            assert_abs_diff_eq!(tail, 1.0 - pb.cdf(k - 1).unwrap(), epsilon = 1e-12);
            assert_abs_diff_eq!(
                tail,
                1.0 - pb.cdf(k).unwrap() + pb.pmf(k).unwrap(),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn batch_queries_match_scalar_queries_in_order() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        let outcomes = [7usize, 0, 10, 3, 3, 1];
        let mass = pb.pmf_alloc(&outcomes).expect("batch pmf");
        let cumulative = pb.cdf_alloc(&outcomes).expect("batch cdf");
        let tail = pb.pval_alloc(&outcomes).expect("batch pval");
        for (i, &k) in outcomes.iter().enumerate() {
            assert_abs_diff_eq!(mass[i], pb.pmf(k).unwrap(), epsilon = 1e-12);
            assert_abs_diff_eq!(cumulative[i], pb.cdf(k).unwrap(), epsilon = 1e-12);
            assert_abs_diff_eq!(tail[i], pb.pval(k).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn capability_traits_delegate_to_the_accessors() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        let outcomes = [0usize, 5, 10];
        let mass = MassQuery1D::run_alloc(&pb, &outcomes).expect("mass query");
        let cumulative = CumulativeQuery1D::run_alloc(&pb, &outcomes).expect("cumulative query");
        let mut tail = vec![0.0; outcomes.len()];
        TailQuery1D::run_into(&pb, &outcomes, &mut tail).expect("tail query");
        for (i, &k) in outcomes.iter().enumerate() {
            assert_abs_diff_eq!(mass[i], pb.pmf(k).unwrap(), epsilon = 1e-12);
            assert_abs_diff_eq!(cumulative[i], pb.cdf(k).unwrap(), epsilon = 1e-12);
            assert_abs_diff_eq!(tail[i], pb.pval(k).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn ndarray_inputs_pass_through_the_adapters() {
        use ndarray::Array1;

        let probabilities = Array1::from(vec![0.1, 0.4, 0.9]);
        let pb = PoissonBinomial::from_probabilities(&probabilities).expect("valid input");
        let outcomes = Array1::from(vec![0usize, 1, 2, 3]);
        let mass = pb.pmf_alloc(&outcomes).expect("batch pmf");
        assert_eq!(mass.len(), 4);
        let total: f64 = mass.iter().sum();
        assert_abs_diff_eq!(total, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn non_contiguous_probability_views_are_rejected() {
        use ndarray::{s, Array1};

        let backing = Array1::from(vec![0.1, 0.9, 0.2, 0.8]);
        let view = backing.slice(s![..;2]);
        let err = PoissonBinomial::from_probabilities(&view).expect_err("stride 2 view");
        assert!(matches!(err, Error::InvalidInput { .. }));
    }

    #[test]
    fn out_of_range_probabilities_are_rejected() {
        let err = PoissonBinomial::from_probabilities(&[0.2, 1.5]).expect_err("p = 1.5");
        match err {
            Error::InvalidInput { arg, reason } => {
                assert_eq!(arg, "probabilities");
                assert!(reason.contains("1.5"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(PoissonBinomial::from_probabilities::<[f64]>(&[]).is_err());
    }

    #[test]
    fn outcomes_beyond_the_support_are_rejected() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        let err = pb.pmf(11).expect_err("k > n");
        assert!(matches!(
            err,
            ExecInvariantViolation::OutOfSupport {
                arg: "k",
                value: 11,
                max: 10
            }
        ));
        assert!(pb.cdf(11).is_err());
        assert!(pb.pval(11).is_err());

        // One bad outcome fails the whole batch before anything is written.
        let mut out = vec![0.0; 3];
        assert!(pb.pmf_into(&[1usize, 11, 2], &mut out).is_err());
    }

    #[test]
    fn batch_output_length_is_validated() {
        let pb = PoissonBinomial::from_probabilities(&MIXED).expect("valid input");
        let mut out = vec![0.0; 2];
        let err = pb
            .pmf_into(&[0usize, 1, 2], &mut out)
            .expect_err("mismatched output length should error");
        assert!(matches!(
            err,
            ExecInvariantViolation::LengthMismatch {
                arg: "out",
                expected: 3,
                got: 2
            }
        ));
    }

    #[test]
    fn moments_follow_from_the_probabilities() {
        let pb = PoissonBinomial::from_probabilities(&[0.2, 0.5, 0.9]).expect("valid input");
        assert_abs_diff_eq!(pb.mean(), 1.6, epsilon = 1e-12);
        assert_abs_diff_eq!(pb.variance(), 0.2 * 0.8 + 0.25 + 0.9 * 0.1, epsilon = 1e-12);

        // The spectral mean must agree with the closed form.
        let outcomes: Vec<usize> = (0..=pb.n()).collect();
        let mass = pb.pmf_alloc(outcomes.as_slice()).expect("batch pmf");
        let spectral_mean: f64 = mass.iter().enumerate().map(|(k, m)| k as f64 * m).sum();
        assert_abs_diff_eq!(spectral_mean, pb.mean(), epsilon = 1e-9);
    }

    #[test]
    fn owned_state_is_exposed_immutably() {
        let pb = PoissonBinomial::from_probabilities(&[0.25, 0.75]).expect("valid input");
        assert_eq!(pb.n(), 2);
        assert_eq!(pb.probabilities(), &[0.25, 0.75]);
        assert_eq!(pb.characteristic_spectrum().len(), 3);
        assert_abs_diff_eq!(
            pb.omega(),
            2.0 * core::f64::consts::PI / 3.0,
            epsilon = 1e-15
        );
    }
}
