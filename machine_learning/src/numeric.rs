//! Series approximations of `exp` and `ln`, and the sigmoid and binary cross-entropy functions
//! built on top of them.

use crate::{MlErr, Result};

/// Approximately `e^20`, returned for every argument above [`EXP_LIMIT`].
pub const EXP_UPPER: f64 = 485165195.4097903;

/// Approximately `e^-20`, returned for every argument below `-EXP_LIMIT`.
pub const EXP_LOWER: f64 = 2.0611536224385579e-9;

/// Magnitude after which `exp_approx` and `sigmoid` saturate.
pub const EXP_LIMIT: f64 = 20.0;

/// `sigmoid(20)`, returned for every logit above [`EXP_LIMIT`].
pub const SIGMOID_UPPER: f64 = 0.9999999979388464;

/// `sigmoid(-20)`, returned for every logit below `-EXP_LIMIT`.
pub const SIGMOID_LOWER: f64 = 2.0611536224385579e-9;

/// Returned by `ln_approx` for non positive arguments.
pub const LN_SENTINEL: f64 = -1000.0;

/// Probabilities are clamped into `[PROB_EPS, 1 - PROB_EPS]` before taking their log.
pub const PROB_EPS: f64 = 1e-15;

const LN_2: f64 = 0.6931471805599453;
const SQRT_2: f64 = 1.4142135623730951;

const EXP_HALVING_THRESHOLD: f64 = 5.0;
const EXP_MAX_TERMS: usize = 24;
const LN_MAX_TERMS: usize = 30;
const SERIES_TOLERANCE: f64 = 1e-15;

/// Approximates `e^x` with a truncated Taylor series.
///
/// Arguments beyond `±20` saturate at [`EXP_UPPER`] and [`EXP_LOWER`]. Arguments above `5` are
/// halved until they fall under it (`e^x = (e^(x/2))^2`) and negative arguments go through
/// `e^x = 1 / e^-x`, so the series itself only ever sees `x` in `[0, 5]`.
///
/// # Arguments
/// * `x` - The exponent.
///
/// # Returns
/// An approximation of `e^x`.
pub fn exp_approx(x: f64) -> f64 {
    if x > EXP_LIMIT {
        return EXP_UPPER;
    }
    if x < -EXP_LIMIT {
        return EXP_LOWER;
    }

    // alternating series cancel badly for negative x, work on |x| instead
    if x < 0.0 {
        return 1.0 / exp_approx(-x);
    }

    if x > EXP_HALVING_THRESHOLD {
        let half = exp_approx(x * 0.5);
        return half * half;
    }

    let mut sum = 1.0;
    let mut term = 1.0;

    for n in 1..=EXP_MAX_TERMS {
        term *= x / n as f64;
        sum += term;

        if term.abs() < SERIES_TOLERANCE * sum {
            break;
        }
    }

    sum
}

/// Approximates the natural logarithm of `x`.
///
/// Values in `[0.8, 1.2]` are evaluated directly with the `ln(1 + y)` series. Every other value is
/// first reduced by powers of two, `x = 2^k * y`, and evaluated as `k * ln(2) + ln(y)`.
///
/// Non positive arguments are not an error, they return [`LN_SENTINEL`] so that degenerate
/// probabilities never abort a training run. Callers that need a real domain check must do it
/// themselves. `ln_approx(inf)` is `inf`.
///
/// # Arguments
/// * `x` - The argument of the logarithm.
///
/// # Returns
/// An approximation of `ln(x)`.
pub fn ln_approx(x: f64) -> f64 {
    if x <= 0.0 {
        return LN_SENTINEL;
    }
    if x == 1.0 {
        return 0.0;
    }

    // halving never brings infinity into range
    if x.is_infinite() {
        return f64::INFINITY;
    }

    if (0.8..=1.2).contains(&x) {
        return ln_near_one(x - 1.0);
    }

    let (k, y) = reduce_by_two(x);
    k as f64 * LN_2 + ln_reduced(y - 1.0)
}

/// `ln(1 + y)` for small `|y|`.
fn ln_near_one(y: f64) -> f64 {
    let mut result = 0.0;
    let mut power = y;

    for n in 1..=LN_MAX_TERMS {
        result += power / n as f64;
        power *= -y;

        if (power / (n + 1) as f64).abs() < SERIES_TOLERANCE {
            break;
        }
    }

    result
}

/// Splits `x` into `2^k * y` with `y` in `[1/sqrt(2), sqrt(2))`.
fn reduce_by_two(x: f64) -> (i32, f64) {
    let mut k = 0;
    let mut y = x;

    if y < 1.0 {
        while y < 0.5 {
            y *= 2.0;
            k -= 1;
        }
    } else {
        while y >= 2.0 {
            y /= 2.0;
            k += 1;
        }
    }

    // the series converges too slowly as y approaches 2
    if y >= SQRT_2 {
        y /= 2.0;
        k += 1;
    }

    (k, y)
}

/// `ln(1 + t)` for `t` in the reduced range.
fn ln_reduced(t: f64) -> f64 {
    let mut result = t;
    let mut power = t * t;
    let mut sign = -1.0;

    for n in 2..=LN_MAX_TERMS {
        let term = sign * power / n as f64;
        result += term;
        power *= t;
        sign = -sign;

        if term.abs() < SERIES_TOLERANCE {
            break;
        }
    }

    result
}

/// The logistic function, `1 / (1 + e^-z)`.
///
/// Saturates at [`SIGMOID_LOWER`] and [`SIGMOID_UPPER`] beyond `±20`. Negative logits are
/// reflected, `sigmoid(z) = 1 - sigmoid(-z)`, so `e^z` is only ever evaluated for `z >= 0`.
///
/// # Arguments
/// * `z` - The logit.
///
/// # Returns
/// A probability in `(0, 1)`.
pub fn sigmoid(z: f64) -> f64 {
    if z < -EXP_LIMIT {
        return SIGMOID_LOWER;
    }
    if z > EXP_LIMIT {
        return SIGMOID_UPPER;
    }

    if z < 0.0 {
        return 1.0 - sigmoid(-z);
    }

    let ez = exp_approx(z);
    ez / (ez + 1.0)
}

/// Mean binary cross-entropy between the labels and the predicted probabilities.
///
/// Each prediction is clamped into `[PROB_EPS, 1 - PROB_EPS]` before taking its logarithm.
///
/// # Arguments
/// * `y_true` - The expected labels.
/// * `y_pred` - The predicted probabilities, one per label.
///
/// # Returns
/// The loss, or an error if the slices differ in length or are empty.
pub fn cross_entropy(y_true: &[f64], y_pred: &[f64]) -> Result<f64> {
    if y_true.len() != y_pred.len() {
        return Err(MlErr::SizeMismatch {
            what: "predictions",
            got: y_pred.len(),
            expected: y_true.len(),
        });
    }
    if y_true.is_empty() {
        return Err(MlErr::Empty { what: "labels" });
    }

    let sum: f64 = y_true
        .iter()
        .zip(y_pred)
        .map(|(&y, &p)| {
            let p = p.clamp(PROB_EPS, 1.0 - PROB_EPS);
            y * ln_approx(p) + (1.0 - y) * ln_approx(1.0 - p)
        })
        .sum();

    Ok(-sum / y_true.len() as f64)
}
