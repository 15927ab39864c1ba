// lcstats-math/src/optimizer/mod.rs
//! Levenberg-Marquardt optimizer for weighted least-squares curve fitting.
//!
//! Minimises `Σ((y_i - f(t_i)) / σ_i)²` for any model implementing [`FitModel`].
//! The parameter count is dynamic so a single optimizer serves every harmonic
//! order of the Fourier model.

extern crate alloc;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt;
use libm::fabs;

/// Damping never shrinks below this, keeping rank-deficient systems solvable.
const MIN_LAMBDA: f64 = 1e-12;

/// Configuration for Levenberg-Marquardt optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct LmConfig {
    /// Maximum number of Jacobian evaluations.
    pub max_iterations: usize,
    /// Relative reduction of χ² below which the fit is considered converged.
    pub ftol: f64,
    /// Relative parameter step below which the fit is considered converged.
    pub xtol: f64,
    /// Initial damping parameter.
    pub initial_lambda: f64,
    /// Factor to increase lambda on a rejected step.
    pub lambda_up: f64,
    /// Factor to decrease lambda on an accepted step.
    pub lambda_down: f64,
    /// Damping beyond which the optimizer gives up.
    pub max_lambda: f64,
}

impl Default for LmConfig {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            ftol: 1.49012e-8,
            xtol: 1.49012e-8,
            initial_lambda: 1e-3,
            lambda_up: 10.0,
            lambda_down: 0.1,
            max_lambda: 1e16,
        }
    }
}

/// Reasons a fit can fail. Any of these aborts the whole Fourier decomposition.
#[derive(Debug, Clone, PartialEq)]
pub enum FitError {
    /// Times, values, uncertainties, period or initial guess contain NaN/inf.
    NonFiniteInput,
    /// Fewer observations than free parameters.
    TooFewPoints { points: usize, params: usize },
    /// The damped normal equations stayed singular at maximum damping.
    SingularSystem,
    /// No convergence within the iteration budget.
    NotConverged { iterations: usize },
    /// χ² evaluated to NaN/inf for the initial guess.
    NonFiniteChi2,
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::NonFiniteInput => write!(f, "input contains non-finite values"),
            FitError::TooFewPoints { points, params } => write!(
                f,
                "improper input: {} parameters cannot be fitted to {} points",
                params, points
            ),
            FitError::SingularSystem => write!(f, "normal equations are singular"),
            FitError::NotConverged { iterations } => {
                write!(f, "optimal parameters not found after {} iterations", iterations)
            }
            FitError::NonFiniteChi2 => write!(f, "chi-square of the initial guess is not finite"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FitError {}

/// Result of L-M optimization.
#[derive(Debug, Clone, PartialEq)]
pub struct LmResult {
    pub params: Vec<f64>,
    pub chi2: f64,
    pub iterations: usize,
}

/// Trait for models that can be fit with L-M optimization.
pub trait FitModel {
    /// Number of free parameters.
    fn n_params(&self) -> usize;

    /// Evaluate the model at time `t`.
    fn evaluate(&self, t: f64, params: &[f64]) -> f64;

    /// Write `∂f/∂p_j` at time `t` into `row` (length `n_params`).
    fn jacobian_row(&self, t: f64, params: &[f64], row: &mut [f64]);
}

/// Weighted chi-square of `params` against the data.
pub fn weighted_chi2<M: FitModel>(
    model: &M,
    t: &[f64],
    y: &[f64],
    sigma: &[f64],
    params: &[f64],
) -> f64 {
    t.iter()
        .zip(y)
        .zip(sigma)
        .map(|((&t, &y), &s)| {
            let r = (y - model.evaluate(t, params)) / s;
            r * r
        })
        .sum()
}

/// Run L-M optimization from `initial_params`.
pub fn optimize<M: FitModel>(
    model: &M,
    t: &[f64],
    y: &[f64],
    sigma: &[f64],
    initial_params: Vec<f64>,
    config: &LmConfig,
) -> Result<LmResult, FitError> {
    let n_params = model.n_params();
    let all_finite = |xs: &[f64]| xs.iter().all(|x| x.is_finite());
    if !(all_finite(t) && all_finite(y) && all_finite(sigma) && all_finite(&initial_params)) {
        return Err(FitError::NonFiniteInput);
    }
    if t.len() < n_params {
        return Err(FitError::TooFewPoints {
            points: t.len(),
            params: n_params,
        });
    }

    let mut params = initial_params;
    let mut chi2 = weighted_chi2(model, t, y, sigma, &params);
    if !chi2.is_finite() {
        return Err(FitError::NonFiniteChi2);
    }

    let mut lambda = config.initial_lambda;
    let mut jacobian = vec![0.0; t.len() * n_params];
    let mut residuals = vec![0.0; t.len()];

    for iter in 0..config.max_iterations {
        let iterations = iter + 1;
        if chi2 == 0.0 {
            return Ok(LmResult { params, chi2, iterations });
        }

        fill_jacobian_residuals(model, t, y, sigma, &params, &mut jacobian, &mut residuals);
        let (hessian, gradient) = compute_hessian_gradient(&jacobian, &residuals, n_params);

        let diag_floor = hessian
            .iter()
            .enumerate()
            .map(|(i, row)| row[i])
            .fold(0.0f64, f64::max)
            * 1e-12;

        let mut damped = hessian;
        for (i, row) in damped.iter_mut().enumerate() {
            row[i] += lambda * row[i].max(diag_floor).max(f64::MIN_POSITIVE);
        }

        let Some(delta) = solve(damped, gradient) else {
            lambda *= config.lambda_up;
            if lambda > config.max_lambda {
                return Err(FitError::SingularSystem);
            }
            continue;
        };

        let step_is_small = norm(&delta) <= config.xtol * (config.xtol + norm(&params));

        let new_params: Vec<f64> = params.iter().zip(&delta).map(|(p, d)| p + d).collect();
        let new_chi2 = weighted_chi2(model, t, y, sigma, &new_params);

        if new_chi2.is_finite() && new_chi2 <= chi2 {
            let reduction = chi2 - new_chi2;
            let previous_chi2 = chi2;
            params = new_params;
            chi2 = new_chi2;
            lambda = (lambda * config.lambda_down).max(MIN_LAMBDA);

            if reduction <= config.ftol * previous_chi2 || step_is_small {
                return Ok(LmResult { params, chi2, iterations });
            }
        } else {
            // Already at the bottom: the remaining step cannot move the parameters.
            if step_is_small {
                return Ok(LmResult { params, chi2, iterations });
            }
            lambda *= config.lambda_up;
            if lambda > config.max_lambda {
                return Err(FitError::NotConverged { iterations });
            }
        }
    }

    Err(FitError::NotConverged {
        iterations: config.max_iterations,
    })
}

fn norm(values: &[f64]) -> f64 {
    libm::sqrt(values.iter().map(|v| v * v).sum())
}

/// Fill the weighted Jacobian (row-major) and weighted residuals, reusing allocations.
fn fill_jacobian_residuals<M: FitModel>(
    model: &M,
    t: &[f64],
    y: &[f64],
    sigma: &[f64],
    params: &[f64],
    jacobian: &mut [f64],
    residuals: &mut [f64],
) {
    let n_params = model.n_params();
    for (i, ((&t, &y), &s)) in t.iter().zip(y).zip(sigma).enumerate() {
        let row = &mut jacobian[i * n_params..(i + 1) * n_params];
        model.jacobian_row(t, params, row);
        for value in row.iter_mut() {
            *value /= s;
        }
        residuals[i] = (y - model.evaluate(t, params)) / s;
    }
}

/// Compute Hessian (JᵀJ) and gradient (Jᵀr).
/// Exploits symmetry: only computes upper triangle, then mirrors.
#[allow(clippy::needless_range_loop)]
pub fn compute_hessian_gradient(
    jacobian: &[f64],
    residuals: &[f64],
    n_params: usize,
) -> (Vec<Vec<f64>>, Vec<f64>) {
    let mut hessian = vec![vec![0.0f64; n_params]; n_params];
    let mut gradient = vec![0.0f64; n_params];

    for (row, &r) in jacobian.chunks_exact(n_params).zip(residuals) {
        for i in 0..n_params {
            gradient[i] += row[i] * r;
            for j in i..n_params {
                hessian[i][j] += row[i] * row[j];
            }
        }
    }

    for i in 1..n_params {
        for j in 0..i {
            hessian[i][j] = hessian[j][i];
        }
    }

    (hessian, gradient)
}

/// Solve `Ax = b` by Gaussian elimination with partial pivoting.
///
/// Returns None if the matrix is numerically singular.
#[allow(clippy::needless_range_loop)]
pub fn solve(mut matrix: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Option<Vec<f64>> {
    let n = rhs.len();
    let scale = matrix
        .iter()
        .flat_map(|row| row.iter())
        .fold(0.0f64, |acc, v| acc.max(fabs(*v)));
    if scale == 0.0 || !scale.is_finite() {
        return None;
    }
    let tolerance = scale * f64::EPSILON;

    for col in 0..n {
        let mut max_row = col;
        let mut max_val = fabs(matrix[col][col]);
        for row in (col + 1)..n {
            if fabs(matrix[row][col]) > max_val {
                max_val = fabs(matrix[row][col]);
                max_row = row;
            }
        }

        if !(max_val > tolerance) {
            return None;
        }

        if max_row != col {
            matrix.swap(col, max_row);
            rhs.swap(col, max_row);
        }

        for row in (col + 1)..n {
            let factor = matrix[row][col] / matrix[col][col];
            for j in col..n {
                matrix[row][j] -= factor * matrix[col][j];
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = vec![0.0f64; n];
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..n {
            sum -= matrix[i][j] * x[j];
        }
        x[i] = sum / matrix[i][i];
    }

    Some(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// y = a·exp(-b·t), a genuinely nonlinear model.
    struct Decay;

    impl FitModel for Decay {
        fn n_params(&self) -> usize {
            2
        }

        fn evaluate(&self, t: f64, params: &[f64]) -> f64 {
            params[0] * libm::exp(-params[1] * t)
        }

        fn jacobian_row(&self, t: f64, params: &[f64], row: &mut [f64]) {
            let e = libm::exp(-params[1] * t);
            row[0] = e;
            row[1] = -params[0] * t * e;
        }
    }

    /// y = a + b·t
    struct Line;

    impl FitModel for Line {
        fn n_params(&self) -> usize {
            2
        }

        fn evaluate(&self, t: f64, params: &[f64]) -> f64 {
            params[0] + params[1] * t
        }

        fn jacobian_row(&self, t: f64, _params: &[f64], row: &mut [f64]) {
            row[0] = 1.0;
            row[1] = t;
        }
    }

    #[test]
    fn test_solve_identity() {
        let a = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let x = solve(a, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(x, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_solve_needs_pivoting() {
        let a = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let x = solve(a, vec![2.0, 1.0]).unwrap();
        assert!((x[0] - 1.0).abs() < 1e-12);
        assert!((x[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_solve_singular_returns_none() {
        assert!(solve(vec![vec![0.0; 3]; 3], vec![1.0, 2.0, 3.0]).is_none());
        let rank_one = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert!(solve(rank_one, vec![1.0, 2.0]).is_none());
    }

    #[test]
    fn test_optimize_recovers_nonlinear_decay() {
        let t: Vec<f64> = (0..30).map(|i| i as f64 * 0.2).collect();
        let y: Vec<f64> = t.iter().map(|t| 3.0 * libm::exp(-0.7 * t)).collect();
        let sigma = vec![0.01; t.len()];

        let result = optimize(&Decay, &t, &y, &sigma, vec![1.0, 0.1], &LmConfig::default()).unwrap();
        assert!((result.params[0] - 3.0).abs() < 1e-6);
        assert!((result.params[1] - 0.7).abs() < 1e-6);
        assert!(result.chi2 < 1e-10);
    }

    #[test]
    fn test_optimize_weighted_line_matches_normal_equations() {
        let t = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.2, 4.9, 7.1];
        let sigma = [0.1, 0.1, 0.1, 0.1];

        let result = optimize(&Line, &t, &y, &sigma, vec![0.0, 0.0], &LmConfig::default()).unwrap();

        // Equal weights reduce to ordinary least squares: slope 2.0, intercept 1.05
        assert!((result.params[1] - 2.0).abs() < 1e-6);
        assert!((result.params[0] - 1.05).abs() < 1e-6);
    }

    #[test]
    fn test_optimize_rejects_non_finite_input() {
        let t = [0.0, 1.0, f64::NAN];
        let y = [1.0, 2.0, 3.0];
        let sigma = [1.0; 3];
        assert_eq!(
            optimize(&Line, &t, &y, &sigma, vec![0.0, 0.0], &LmConfig::default()),
            Err(FitError::NonFiniteInput)
        );
    }

    #[test]
    fn test_optimize_rejects_underdetermined_fit() {
        let t = [0.0];
        let y = [1.0];
        let sigma = [1.0];
        assert_eq!(
            optimize(&Line, &t, &y, &sigma, vec![0.0, 0.0], &LmConfig::default()),
            Err(FitError::TooFewPoints { points: 1, params: 2 })
        );
    }

    #[test]
    fn test_optimize_reports_exhausted_budget() {
        let t: Vec<f64> = (0..30).map(|i| i as f64 * 0.2).collect();
        let y: Vec<f64> = t.iter().map(|t| 3.0 * libm::exp(-0.7 * t)).collect();
        let sigma = vec![0.01; t.len()];
        let config = LmConfig {
            max_iterations: 1,
            ..LmConfig::default()
        };

        let result = optimize(&Decay, &t, &y, &sigma, vec![1.0, 0.1], &config);
        assert_eq!(result, Err(FitError::NotConverged { iterations: 1 }));
    }

    #[test]
    fn test_fit_error_display() {
        extern crate alloc;
        use alloc::string::ToString;
        let message = FitError::TooFewPoints { points: 3, params: 4 }.to_string();
        assert_eq!(message, "improper input: 4 parameters cannot be fitted to 3 points");
    }
}
