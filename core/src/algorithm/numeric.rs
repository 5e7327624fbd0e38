//! Reference numeric implementations: root finding, square roots, ODE
//! integration, and continued-fraction evaluation.
//!
//! Every iterative method takes an explicit tolerance and iteration budget.
//! The budget is the cancellation mechanism: exceeding it fails with
//! [`HarnessError::NonConvergence`] carrying the best iterate and its
//! residual, so callers can judge near-convergence for themselves.

use crate::error::HarnessError;

/// Evaluate a polynomial given coefficients with the constant term first.
pub fn eval_poly(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().rev().fold(0.0, |acc, &c| acc * x + c)
}

/// First derivative of a coefficient-first polynomial.
pub fn poly_derivative(coefficients: &[f64]) -> Vec<f64> {
    coefficients
        .iter()
        .enumerate()
        .skip(1)
        .map(|(power, &c)| c * power as f64)
        .collect()
}

/// Bisection on [a, b] for continuous f with a sign change.
///
/// Returns the midpoint m with |f(m)| < tol, or the midpoint once the
/// bracket itself shrinks below tol. O(log((b-a)/tol)) iterations.
pub fn bisection<F>(
    f: F,
    a: f64,
    b: f64,
    tol: f64,
    max_iter: usize,
) -> Result<(f64, usize), HarnessError>
where
    F: Fn(f64) -> f64,
{
    if !(a < b) {
        return Err(HarnessError::invalid_input("interval requires a < b"));
    }
    if tol <= 0.0 {
        return Err(HarnessError::invalid_input("tolerance must be positive"));
    }
    let (mut lo, mut hi) = (a, b);
    let (mut f_lo, f_hi) = (f(lo), f(hi));
    if f_lo == 0.0 {
        return Ok((lo, 0));
    }
    if f_hi == 0.0 {
        return Ok((hi, 0));
    }
    if f_lo.signum() == f_hi.signum() {
        return Err(HarnessError::invalid_input(
            "f(a) and f(b) must differ in sign",
        ));
    }
    let mut mid = lo;
    for iteration in 1..=max_iter {
        mid = lo + (hi - lo) / 2.0;
        let f_mid = f(mid);
        if f_mid.abs() < tol || (hi - lo) / 2.0 < tol {
            return Ok((mid, iteration));
        }
        if f_mid.signum() == f_lo.signum() {
            lo = mid;
            f_lo = f_mid;
        } else {
            hi = mid;
        }
    }
    Err(HarnessError::NonConvergence {
        best: mid,
        residual: f(mid).abs(),
        iterations: max_iter,
    })
}

/// Fixed-point iteration x <- g(x), converging when successive iterates are
/// within tol. The update must always advance from the freshly computed
/// iterate, never from a stale one.
pub fn fixed_point<G>(
    g: G,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> Result<(f64, usize), HarnessError>
where
    G: Fn(f64) -> f64,
{
    if tol <= 0.0 {
        return Err(HarnessError::invalid_input("tolerance must be positive"));
    }
    let mut x = x0;
    for iteration in 1..=max_iter {
        let next = g(x);
        if !next.is_finite() {
            return Err(HarnessError::NonConvergence {
                best: x,
                residual: f64::INFINITY,
                iterations: iteration,
            });
        }
        if (next - x).abs() < tol {
            return Ok((next, iteration));
        }
        x = next;
    }
    Err(HarnessError::NonConvergence {
        best: x,
        residual: (g(x) - x).abs(),
        iterations: max_iter,
    })
}

/// Householder's method of order two (Halley's iteration):
///
/// x <- x - 2 f f' / (2 f'^2 - f f'')
///
/// Cubic convergence near a simple root.
pub fn householder<F, D1, D2>(
    f: F,
    df: D1,
    d2f: D2,
    x0: f64,
    tol: f64,
    max_iter: usize,
) -> Result<(f64, usize), HarnessError>
where
    F: Fn(f64) -> f64,
    D1: Fn(f64) -> f64,
    D2: Fn(f64) -> f64,
{
    if tol <= 0.0 {
        return Err(HarnessError::invalid_input("tolerance must be positive"));
    }
    let mut x = x0;
    for iteration in 1..=max_iter {
        let fx = f(x);
        if fx.abs() < tol {
            return Ok((x, iteration));
        }
        let dfx = df(x);
        let d2fx = d2f(x);
        let denominator = 2.0 * dfx * dfx - fx * d2fx;
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(HarnessError::NonConvergence {
                best: x,
                residual: fx.abs(),
                iterations: iteration,
            });
        }
        x -= 2.0 * fx * dfx / denominator;
    }
    Err(HarnessError::NonConvergence {
        best: x,
        residual: f(x).abs(),
        iterations: max_iter,
    })
}

/// Heron's square-root iteration x <- (x + s/x) / 2.
///
/// Quadratic convergence; the iterate sequence is decreasing after the first
/// step, so the stopping rule on successive iterates is sound.
pub fn heron_sqrt(value: f64, tol: f64, max_iter: usize) -> Result<(f64, usize), HarnessError> {
    if value < 0.0 {
        return Err(HarnessError::invalid_input(
            "square root of a negative number",
        ));
    }
    if tol <= 0.0 {
        return Err(HarnessError::invalid_input("tolerance must be positive"));
    }
    if value == 0.0 {
        return Ok((0.0, 0));
    }
    let mut x = if value >= 1.0 { value } else { 1.0 };
    for iteration in 1..=max_iter {
        let next = 0.5 * (x + value / x);
        if (next - x).abs() < tol {
            return Ok((next, iteration));
        }
        x = next;
    }
    Err(HarnessError::NonConvergence {
        best: x,
        residual: (x * x - value).abs(),
        iterations: max_iter,
    })
}

/// Classic fourth-order Runge-Kutta for y' = f(t, y) from t0 to t1 in a fixed
/// number of steps. Deterministic; no convergence budget applies.
pub fn rk4<F>(f: F, y0: f64, t0: f64, t1: f64, steps: usize) -> Result<f64, HarnessError>
where
    F: Fn(f64, f64) -> f64,
{
    if steps == 0 {
        return Err(HarnessError::invalid_input("step count must be positive"));
    }
    if !t1.is_finite() || !t0.is_finite() {
        return Err(HarnessError::invalid_input("time bounds must be finite"));
    }
    let h = (t1 - t0) / steps as f64;
    let mut t = t0;
    let mut y = y0;
    for _ in 0..steps {
        let k1 = f(t, y);
        let k2 = f(t + h / 2.0, y + h * k1 / 2.0);
        let k3 = f(t + h / 2.0, y + h * k2 / 2.0);
        let k4 = f(t + h, y + h * k3);
        y += h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0;
        t += h;
    }
    Ok(y)
}

const LENTZ_TINY: f64 = 1e-30;

/// Modified Lentz evaluation of the continued fraction
/// b0 + a1/(b1 + a2/(b2 + ...)), with the standard tiny-value guard against
/// vanishing partial denominators.
pub fn lentz<A, B>(
    a: A,
    b: B,
    tol: f64,
    max_iter: usize,
) -> Result<(f64, usize), HarnessError>
where
    A: Fn(usize) -> f64,
    B: Fn(usize) -> f64,
{
    if tol <= 0.0 {
        return Err(HarnessError::invalid_input("tolerance must be positive"));
    }
    let b0 = b(0);
    let mut value = if b0 == 0.0 { LENTZ_TINY } else { b0 };
    let mut c = value;
    let mut d = 0.0;
    let mut delta = 0.0;
    for iteration in 1..=max_iter {
        let a_j = a(iteration);
        let b_j = b(iteration);
        d = b_j + a_j * d;
        if d == 0.0 {
            d = LENTZ_TINY;
        }
        c = b_j + a_j / c;
        if c == 0.0 {
            c = LENTZ_TINY;
        }
        d = 1.0 / d;
        delta = c * d;
        value *= delta;
        if (delta - 1.0).abs() < tol {
            return Ok((value, iteration));
        }
    }
    Err(HarnessError::NonConvergence {
        best: value,
        residual: (delta - 1.0).abs(),
        iterations: max_iter,
    })
}

/// Continued fraction for sqrt(target): with m = floor(sqrt(target)) and
/// r = target - m^2, sqrt(target) = m + r/(2m + r/(2m + ...)).
pub fn lentz_sqrt(target: f64, tol: f64, max_iter: usize) -> Result<(f64, usize), HarnessError> {
    if target <= 0.0 {
        return Err(HarnessError::invalid_input(
            "continued-fraction sqrt requires a positive target",
        ));
    }
    let m = target.sqrt().floor();
    let r = target - m * m;
    if r == 0.0 {
        // Perfect square: the fraction terminates immediately.
        return Ok((m, 0));
    }
    lentz(
        |_| r,
        |j| if j == 0 { m } else { 2.0 * m },
        tol,
        max_iter,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bisection_sqrt2_scenario() {
        let (root, _) = bisection(|x| x * x - 2.0, 0.0, 2.0, 1e-6, 100).unwrap();
        assert!((root - 1.414_213_56).abs() < 1e-6);
    }

    #[test]
    fn test_bisection_requires_sign_change() {
        let err = bisection(|x| x * x + 1.0, 0.0, 2.0, 1e-6, 100).unwrap_err();
        assert!(matches!(err, HarnessError::InvalidInput(_)));
    }

    #[test]
    fn test_bisection_budget_exhaustion() {
        let err = bisection(|x| x * x - 2.0, 0.0, 2.0, 1e-15, 4).unwrap_err();
        match err {
            HarnessError::NonConvergence {
                best, iterations, ..
            } => {
                assert_eq!(iterations, 4);
                assert!((best - 1.414).abs() < 0.5);
            }
            other => panic!("expected NonConvergence, got {other:?}"),
        }
    }

    #[test]
    fn test_fixed_point_cosine() {
        // The Dottie number, the unique fixed point of cos.
        let (x, _) = fixed_point(f64::cos, 1.0, 1e-10, 500).unwrap();
        assert!((x - 0.739_085_133).abs() < 1e-8);
    }

    #[test]
    fn test_householder_cubic() {
        // Root of x^3 - x - 2 near 1.52.
        let f = |x: f64| x * x * x - x - 2.0;
        let df = |x: f64| 3.0 * x * x - 1.0;
        let d2f = |x: f64| 6.0 * x;
        let (root, iterations) = householder(f, df, d2f, 2.0, 1e-12, 50).unwrap();
        assert!(f(root).abs() < 1e-10);
        assert!(iterations < 10, "cubic convergence expected, got {iterations}");
    }

    #[test]
    fn test_heron_matches_sqrt() {
        for value in [0.25, 1.0, 2.0, 9.0, 144.0, 1e6] {
            let (root, _) = heron_sqrt(value, 1e-12, 100).unwrap();
            assert!((root - value.sqrt()).abs() < 1e-9, "value {value}");
        }
        assert_eq!(heron_sqrt(0.0, 1e-12, 10).unwrap().0, 0.0);
        assert!(heron_sqrt(-1.0, 1e-12, 10).is_err());
    }

    #[test]
    fn test_rk4_exponential_decay() {
        // y' = -y, y(0) = 1, so y(1) = 1/e.
        let y1 = rk4(|_, y| -y, 1.0, 0.0, 1.0, 100).unwrap();
        assert!((y1 - (-1.0f64).exp()).abs() < 1e-8);
        assert!(rk4(|_, y| y, 1.0, 0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_lentz_golden_ratio() {
        // 1 + 1/(1 + 1/(1 + ...)) = phi.
        let (phi, _) = lentz(|_| 1.0, |_| 1.0, 1e-12, 200).unwrap();
        assert!((phi - (1.0 + 5.0f64.sqrt()) / 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_lentz_sqrt() {
        for target in [2.0, 3.0, 7.0, 13.0] {
            let (value, _) = lentz_sqrt(target, 1e-12, 500).unwrap();
            assert!((value - target.sqrt()).abs() < 1e-9, "target {target}");
        }
        // Perfect square terminates without iterating.
        assert_eq!(lentz_sqrt(16.0, 1e-12, 10).unwrap(), (4.0, 0));
    }

    #[test]
    fn test_eval_poly() {
        // 2 - 3x + x^2 at x = 4: 2 - 12 + 16 = 6.
        assert_eq!(eval_poly(&[2.0, -3.0, 1.0], 4.0), 6.0);
        assert_eq!(poly_derivative(&[2.0, -3.0, 1.0]), vec![-3.0, 2.0]);
    }
}
