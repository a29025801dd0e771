//! Statistical helpers for re-checking numbers reported in research papers.
//!
//! Four stateless tools are exposed to a reviewing agent: a Welch t-test
//! p-value, Cohen's d, a t-based confidence interval for the mean, and a
//! descriptive summary. Full precision is kept internally; tool results are
//! rounded to [`OUTPUT_DECIMALS`] places at the boundary.
//!
//! Every sample must hold at least two finite observations. Numerically
//! degenerate inputs (a zero denominator) are reported as
//! [`StatsError::DegenerateInput`], and results outside the `f64` range as
//! [`StatsError::NonFiniteResult`]; no tool returns `NaN` or infinity.

use serde::{Deserialize, Serialize};

use crate::distribution::{student_t_quantile, student_t_two_tailed};
use crate::error::StatsError;

/// Decimal places kept in every tool result.
pub const OUTPUT_DECIMALS: u32 = 4;

/// Confidence level used when a caller does not supply one.
pub const DEFAULT_CONFIDENCE: f64 = 0.95;

/// Observations needed for a sample variance (ddof = 1).
const MIN_SAMPLE_LEN: usize = 2;

/// 2^52: smallest magnitude at which an `f64` has no fractional bits.
const MAX_EXACT_INTEGER: f64 = 4_503_599_627_370_496.0;

/// Two-tailed p-value of Welch's t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PValue {
    /// Probability of a mean difference at least this large under H0
    pub p_value: f64,
}

/// Standardized mean difference between two groups.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CohensD {
    /// (mean1 - mean2) / pooled standard deviation
    pub cohens_d: f64,
}

/// Two-sided t-based confidence interval for a sample mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Sample mean
    pub mean: f64,
    /// `[lower, upper]` bounds
    pub confidence_interval: [f64; 2],
    /// Confidence level the interval was computed at (not rounded)
    pub confidence: f64,
}

impl ConfidenceInterval {
    /// Lower bound of the interval.
    #[must_use]
    pub fn lower(&self) -> f64 {
        self.confidence_interval[0]
    }

    /// Upper bound of the interval.
    #[must_use]
    pub fn upper(&self) -> f64 {
        self.confidence_interval[1]
    }

    /// Distance from the mean to either bound.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        (self.upper() - self.lower()) / 2.0
    }
}

/// Mean, sample standard deviation and size of one group.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupDescription {
    /// Sample mean
    pub mean: f64,
    /// Sample standard deviation (ddof = 1)
    pub std_dev: f64,
    /// Number of observations
    pub n: usize,
}

/// Full-precision result of Welch's unequal-variance t-test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WelchTTest {
    /// t statistic
    pub statistic: f64,
    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,
    /// Two-tailed p-value
    pub p_value: f64,
}

/// Recalculates the two-tailed p-value for a difference in means.
///
/// Uses Welch's t-test, which does not assume equal variances.
///
/// # Errors
/// Returns an error if either group has fewer than 2 observations, contains a
/// non-finite value, or if both groups are constant.
///
/// # Examples
/// ```
/// use review_stats_core::statistics::recalculate_p_value;
///
/// let result = recalculate_p_value(&[1.0, 2.0, 3.0, 4.0, 5.0], &[6.0, 7.0, 8.0, 9.0, 10.0]).unwrap();
/// assert_eq!(result.p_value, 0.0011);
/// ```
pub fn recalculate_p_value(group1: &[f64], group2: &[f64]) -> Result<PValue, StatsError> {
    let test = welch_t_test(group1, group2)?;
    Ok(PValue {
        p_value: round_to(test.p_value, OUTPUT_DECIMALS),
    })
}

/// Runs Welch's t-test without rounding.
///
/// # Formula
/// ```text
/// se_i = s_i / sqrt(n_i)
/// t    = (m1 - m2) / hypot(se1, se2)
/// w_i  = (se_i / hypot(se1, se2))^2
/// df   = 1 / (w1^2/(n1-1) + w2^2/(n2-1))
/// ```
///
/// The weight form of the Welch-Satterthwaite df is algebraically the usual
/// `(v1/n1 + v2/n2)^2 / ((v1/n1)^2/(n1-1) + (v2/n2)^2/(n2-1))` but cannot
/// underflow for tiny variances.
///
/// # Errors
/// Returns an error if either group has fewer than 2 observations, contains a
/// non-finite value, if the combined standard error is zero, or if the
/// statistic is not representable.
pub fn welch_t_test(group1: &[f64], group2: &[f64]) -> Result<WelchTTest, StatsError> {
    validate_sample("group1", group1, MIN_SAMPLE_LEN)?;
    validate_sample("group2", group2, MIN_SAMPLE_LEN)?;

    let n1 = group1.len() as f64;
    let n2 = group2.len() as f64;
    let (mean1, std1) = mean_and_std_dev(group1);
    let (mean2, std2) = mean_and_std_dev(group2);

    let se1 = std1 / n1.sqrt();
    let se2 = std2 / n2.sqrt();
    let combined_se = ensure_finite(se1.hypot(se2), "standard error")?;
    if combined_se <= 0.0 {
        return Err(StatsError::DegenerateInput(
            "both groups have zero variance, t statistic is undefined",
        ));
    }

    let statistic = ensure_finite((mean1 - mean2) / combined_se, "t statistic")?;
    let w1 = (se1 / combined_se).powi(2);
    let w2 = (se2 / combined_se).powi(2);
    let df = ensure_finite(
        1.0 / (w1 * w1 / (n1 - 1.0) + w2 * w2 / (n2 - 1.0)),
        "degrees of freedom",
    )?;
    let p_value = ensure_finite(student_t_two_tailed(statistic, df), "p-value")?;

    Ok(WelchTTest {
        statistic,
        df,
        p_value,
    })
}

/// Computes Cohen's d between two groups.
///
/// The pooled standard deviation is the root of the unweighted mean of the two
/// sample variances, `sqrt((s1^2 + s2^2) / 2)`. Group sizes do not weight the
/// pooling.
///
/// # Errors
/// Returns an error if either group has fewer than 2 observations, contains a
/// non-finite value, if both groups are constant, or if the effect size is not
/// representable.
///
/// # Examples
/// ```
/// use review_stats_core::statistics::compute_cohens_d;
///
/// let result = compute_cohens_d(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(result.cohens_d, 0.0);
/// ```
pub fn compute_cohens_d(group1: &[f64], group2: &[f64]) -> Result<CohensD, StatsError> {
    validate_sample("group1", group1, MIN_SAMPLE_LEN)?;
    validate_sample("group2", group2, MIN_SAMPLE_LEN)?;

    let (mean1, std1) = mean_and_std_dev(group1);
    let (mean2, std2) = mean_and_std_dev(group2);

    // sqrt((s1^2 + s2^2) / 2) without squaring large deviations
    let pooled_std = ensure_finite(
        std1.hypot(std2) / std::f64::consts::SQRT_2,
        "pooled standard deviation",
    )?;
    if pooled_std <= 0.0 {
        return Err(StatsError::DegenerateInput(
            "pooled standard deviation is zero, effect size is undefined",
        ));
    }

    let d = ensure_finite((mean1 - mean2) / pooled_std, "effect size")?;

    Ok(CohensD {
        cohens_d: round_to(d, OUTPUT_DECIMALS),
    })
}

/// Computes a two-sided confidence interval for the mean of `data`.
///
/// ```text
/// margin = (s / sqrt(n)) * t_{(1 + confidence) / 2, n - 1}
/// ```
///
/// A constant sample yields the zero-width interval `[mean, mean]`.
///
/// # Errors
/// Returns an error if `data` has fewer than 2 observations, contains a
/// non-finite value, if `confidence` is not strictly between 0 and 1, or if a
/// bound is not representable.
///
/// # Examples
/// ```
/// use review_stats_core::statistics::compute_confidence_interval;
///
/// let ci = compute_confidence_interval(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.95).unwrap();
/// assert_eq!(ci.mean, 3.0);
/// assert_eq!(ci.confidence_interval, [1.0368, 4.9632]);
/// ```
pub fn compute_confidence_interval(
    data: &[f64],
    confidence: f64,
) -> Result<ConfidenceInterval, StatsError> {
    validate_sample("data", data, MIN_SAMPLE_LEN)?;
    validate_confidence(confidence)?;

    let n = data.len() as f64;
    let (mean, std_dev) = mean_and_std_dev(data);
    let standard_error = std_dev / n.sqrt();
    let margin = ensure_finite(
        standard_error * student_t_quantile((1.0 + confidence) / 2.0, n - 1.0),
        "interval margin",
    )?;
    let lower = ensure_finite(mean - margin, "lower bound")?;
    let upper = ensure_finite(mean + margin, "upper bound")?;

    Ok(ConfidenceInterval {
        mean: round_to(mean, OUTPUT_DECIMALS),
        confidence_interval: [
            round_to(lower, OUTPUT_DECIMALS),
            round_to(upper, OUTPUT_DECIMALS),
        ],
        confidence,
    })
}

/// Summarizes a group with its mean, sample standard deviation and size.
///
/// # Errors
/// Returns an error if `data` has fewer than 2 observations or contains a
/// non-finite value.
///
/// # Examples
/// ```
/// use review_stats_core::statistics::describe_group;
///
/// let summary = describe_group(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(summary.mean, 3.0);
/// assert_eq!(summary.std_dev, 1.5811);
/// assert_eq!(summary.n, 5);
/// ```
pub fn describe_group(data: &[f64]) -> Result<GroupDescription, StatsError> {
    validate_sample("data", data, MIN_SAMPLE_LEN)?;

    let (mean, std_dev) = mean_and_std_dev(data);
    let mean = ensure_finite(mean, "mean")?;
    let std_dev = ensure_finite(std_dev, "standard deviation")?;

    Ok(GroupDescription {
        mean: round_to(mean, OUTPUT_DECIMALS),
        std_dev: round_to(std_dev, OUTPUT_DECIMALS),
        n: data.len(),
    })
}

/// Arithmetic mean of a non-empty sample.
///
/// # Errors
/// Returns an error if `data` is empty or contains a non-finite value.
pub fn mean(data: &[f64]) -> Result<f64, StatsError> {
    validate_sample("data", data, 1)?;
    Ok(mean_and_std_dev(data).0)
}

/// Unbiased sample variance (divides by `n - 1`).
///
/// # Errors
/// Returns an error if `data` has fewer than 2 observations, contains a
/// non-finite value, or if the variance exceeds the `f64` range.
pub fn sample_variance(data: &[f64]) -> Result<f64, StatsError> {
    let std_dev = sample_std_dev(data)?;
    ensure_finite(std_dev * std_dev, "variance")
}

/// Sample standard deviation (ddof = 1).
///
/// # Errors
/// Returns an error if `data` has fewer than 2 observations or contains a
/// non-finite value.
pub fn sample_std_dev(data: &[f64]) -> Result<f64, StatsError> {
    validate_sample("data", data, MIN_SAMPLE_LEN)?;
    Ok(mean_and_std_dev(data).1)
}

/// Standard error of the mean, `s / sqrt(n)`.
///
/// # Errors
/// Same conditions as [`sample_std_dev`].
pub fn standard_error(data: &[f64]) -> Result<f64, StatsError> {
    let std_dev = sample_std_dev(data)?;
    Ok(std_dev / (data.len() as f64).sqrt())
}

/// Rounds `value` to `decimals` places, ties to even.
///
/// The value is scaled, rounded to an integer and scaled back, so results
/// agree with the usual array-library rounding of binary floats. Values too
/// large to carry `decimals` fractional digits are returned unchanged.
#[must_use]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    // Past 2^52 every f64 is already an integer
    if !scaled.is_finite() || scaled.abs() >= MAX_EXACT_INTEGER {
        return value;
    }
    scaled.round_ties_even() / factor
}

fn validate_sample(name: &'static str, data: &[f64], required: usize) -> Result<(), StatsError> {
    if data.len() < required {
        return Err(StatsError::InvalidSampleSize {
            name,
            required,
            actual: data.len(),
        });
    }
    if let Some(index) = data.iter().position(|x| !x.is_finite()) {
        return Err(StatsError::NonFiniteValue { name, index });
    }
    Ok(())
}

fn validate_confidence(confidence: f64) -> Result<(), StatsError> {
    if confidence.is_finite() && confidence > 0.0 && confidence < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidConfidence(confidence))
    }
}

fn ensure_finite(value: f64, quantity: &'static str) -> Result<f64, StatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::NonFiniteResult(quantity))
    }
}

/// Two-pass mean and ddof = 1 standard deviation.
///
/// Sums run over the data divided by a power of two near its largest
/// magnitude, which is exact and keeps the sums of values and of squared
/// deviations inside the `f64` range. Caller guarantees finite, non-empty
/// data; a single observation has standard deviation 0.
fn mean_and_std_dev(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let max_abs = data.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if max_abs == 0.0 {
        return (0.0, 0.0);
    }

    let exponent = (max_abs.log2().floor() as i32).clamp(-1000, 1000);
    let scale = 2f64.powi(exponent);

    let mean = data.iter().map(|x| x / scale).sum::<f64>() / n;
    if data.len() < 2 {
        return (mean * scale, 0.0);
    }

    let sum_sq: f64 = data
        .iter()
        .map(|x| {
            let deviation = x / scale - mean;
            deviation * deviation
        })
        .sum();

    (mean * scale, (sum_sq / (n - 1.0)).sqrt() * scale)
}
