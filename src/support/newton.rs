//! Damped Newton-Raphson solver for square nonlinear systems.
//!
//! Solves `F(x) = 0` for `x ∈ ℝⁿ` using a forward-difference Jacobian,
//! an LU solve for the Newton direction, and backtracking on the step length
//! whenever the full step fails to reduce the residual norm.
//!
//! The solver never decides whether a result is acceptable on its own.
//! It reports a [`Status`] and the caller turns [`Status::MaxIters`] into a
//! domain error.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//! use sugar_train::support::newton::{self, Status};
//!
//! // x² = 4, y = x + 1
//! let system = |x: &[f64], r: &mut [f64]| -> Result<(), Infallible> {
//!     r[0] = x[0] * x[0] - 4.0;
//!     r[1] = x[1] - x[0] - 1.0;
//!     Ok(())
//! };
//!
//! let solution = newton::solve(system, &[1.0, 0.0], &newton::Config::default()).unwrap();
//! assert_eq!(solution.status, Status::Converged);
//! assert!((solution.x[0] - 2.0).abs() < 1e-9);
//! assert!((solution.x[1] - 3.0).abs() < 1e-9);
//! ```

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

/// Solver configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of Newton iterations.
    pub max_iters: usize,

    /// Convergence threshold on the Euclidean norm of the residual vector.
    pub residual_tol: f64,

    /// Relative perturbation used for the forward-difference Jacobian.
    pub fd_step: f64,

    /// Smallest step-length factor tried during backtracking.
    pub min_damping: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-10,
            fd_step: 1e-7,
            min_damping: 1.0 / 1024.0,
        }
    }
}

/// Termination status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual norm dropped below [`Config::residual_tol`].
    Converged,
    /// The iteration budget was exhausted first.
    MaxIters,
}

/// Final iterate and diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub x: Vec<f64>,
    pub residual_norm: f64,
    pub iters: usize,
    pub status: Status,
}

/// Errors that stop the solver before its iteration budget is spent.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// The system function failed at the current iterate, or at every
    /// trial point down to the backtracking floor.
    #[error("system evaluation failed at iteration {iter}")]
    Evaluation {
        iter: usize,
        #[source]
        source: E,
    },

    /// The finite-difference Jacobian could not be factorized.
    #[error("singular jacobian at iteration {iter}")]
    SingularJacobian { iter: usize },

    /// The residual became NaN or infinite.
    #[error("non-finite residual at iteration {iter}")]
    NonFinite { iter: usize },

    /// The initial guess is empty.
    #[error("empty system")]
    Empty,
}

/// Solves the square system described by `system`, starting from `x0`.
///
/// `system(x, r)` writes the residuals at `x` into `r`; both slices have the
/// length of `x0`.
///
/// # Errors
///
/// Returns an [`Error`] if the system cannot be evaluated, the Jacobian is
/// singular, or the residuals become non-finite. Exhausting the iteration
/// budget is not an error; it is reported through [`Solution::status`].
pub fn solve<F, E>(system: F, x0: &[f64], config: &Config) -> Result<Solution, Error<E>>
where
    F: Fn(&[f64], &mut [f64]) -> Result<(), E>,
{
    let n = x0.len();
    if n == 0 {
        return Err(Error::Empty);
    }

    let eval = |x: &[f64], r: &mut [f64], iter: usize| -> Result<f64, Error<E>> {
        system(x, r).map_err(|source| Error::Evaluation { iter, source })?;
        let norm = r.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm.is_finite() {
            Ok(norm)
        } else {
            Err(Error::NonFinite { iter })
        }
    };

    let mut x = x0.to_vec();
    let mut r = vec![0.0; n];
    let mut norm = eval(&x, &mut r, 0)?;

    let mut x_trial = vec![0.0; n];
    let mut r_trial = vec![0.0; n];

    for iter in 0..config.max_iters {
        if norm <= config.residual_tol {
            return Ok(Solution {
                x,
                residual_norm: norm,
                iters: iter,
                status: Status::Converged,
            });
        }

        let jacobian = jacobian(&system, &x, &r, config.fd_step)
            .map_err(|source| Error::Evaluation { iter, source })?;
        let rhs = -DVector::from_column_slice(&r);
        let dx = jacobian
            .lu()
            .solve(&rhs)
            .ok_or(Error::SingularJacobian { iter })?;

        let mut damping = 1.0;
        loop {
            for ((xt, xi), di) in x_trial.iter_mut().zip(&x).zip(dx.iter()) {
                *xt = xi + damping * di;
            }

            // A trial point the system rejects is treated like an uphill step.
            match eval(&x_trial, &mut r_trial, iter) {
                Ok(trial_norm) if trial_norm < norm || damping <= config.min_damping => {
                    if trial_norm >= norm {
                        log::warn!(
                            "newton iteration {iter}: backtracking floor reached, residual {trial_norm:.3e}"
                        );
                    }
                    std::mem::swap(&mut x, &mut x_trial);
                    std::mem::swap(&mut r, &mut r_trial);
                    norm = trial_norm;
                    break;
                }
                Err(err) if damping <= config.min_damping => return Err(err),
                _ => damping *= 0.5,
            }
        }

        log::debug!("newton iteration {iter}: residual {norm:.3e}, damping {damping}");
    }

    let status = if norm <= config.residual_tol {
        Status::Converged
    } else {
        Status::MaxIters
    };

    Ok(Solution {
        x,
        residual_norm: norm,
        iters: config.max_iters,
        status,
    })
}

/// Forward-difference Jacobian of `system` at `x`, given residuals `r` at `x`.
fn jacobian<F, E>(system: &F, x: &[f64], r: &[f64], fd_step: f64) -> Result<DMatrix<f64>, E>
where
    F: Fn(&[f64], &mut [f64]) -> Result<(), E>,
{
    let n = x.len();
    let mut jac = DMatrix::zeros(n, n);
    let mut x_pert = x.to_vec();
    let mut r_pert = vec![0.0; n];

    for j in 0..n {
        let h = fd_step * x[j].abs().max(1.0);
        x_pert[j] = x[j] + h;
        system(&x_pert, &mut r_pert)?;
        for i in 0..n {
            jac[(i, j)] = (r_pert[i] - r[i]) / h;
        }
        x_pert[j] = x[j];
    }

    Ok(jac)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    #[test]
    fn solves_linear_system_in_one_step() {
        let system = |x: &[f64], r: &mut [f64]| -> Result<(), Infallible> {
            r[0] = 2.0 * x[0] + x[1] - 5.0;
            r[1] = x[0] - 3.0 * x[1] + 1.0;
            Ok(())
        };

        let solution = solve(system, &[0.0, 0.0], &Config::default()).unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert!(solution.iters <= 2);
        assert_relative_eq!(solution.x[0], 2.0, epsilon = 1e-9);
        assert_relative_eq!(solution.x[1], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn solves_bilinear_balance() {
        // Splitter-like balance: 10 = a + b, 10·0.2 = a·c, c = 0.5.
        let system = |x: &[f64], r: &mut [f64]| -> Result<(), Infallible> {
            r[0] = 10.0 - x[0] - x[1];
            r[1] = 10.0 * 0.2 - x[0] * x[2];
            r[2] = x[2] - 0.5;
            Ok(())
        };

        let solution = solve(system, &[5.0, 5.0, 0.4], &Config::default()).unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 4.0, epsilon = 1e-9);
        assert_relative_eq!(solution.x[1], 6.0, epsilon = 1e-9);
    }

    #[test]
    fn reports_exhausted_budget() {
        let system = |x: &[f64], r: &mut [f64]| -> Result<(), Infallible> {
            r[0] = x[0].atan() - 1.0;
            Ok(())
        };
        let config = Config {
            max_iters: 1,
            ..Config::default()
        };

        // One full step from zero lands on x = 1, short of tan(1).
        let solution = solve(system, &[0.0], &config).unwrap();

        assert_eq!(solution.status, Status::MaxIters);
        assert_eq!(solution.iters, 1);
        assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-6);
        assert!(solution.residual_norm > config.residual_tol);
    }

    #[test]
    fn backtracks_out_of_rejected_region() {
        #[derive(Debug)]
        struct NonPositive;

        // The full Newton step from x = 3 lands at x < 0, where ln is undefined.
        let system = |x: &[f64], r: &mut [f64]| -> Result<(), NonPositive> {
            if x[0] <= 0.0 {
                return Err(NonPositive);
            }
            r[0] = x[0].ln();
            Ok(())
        };

        let solution = solve(system, &[3.0], &Config::default()).unwrap();

        assert_eq!(solution.status, Status::Converged);
        assert_relative_eq!(solution.x[0], 1.0, epsilon = 1e-9);
    }

    #[test]
    fn reports_singular_jacobian() {
        let system = |x: &[f64], r: &mut [f64]| -> Result<(), Infallible> {
            r[0] = x[0] + x[1] - 1.0;
            r[1] = 2.0 * x[0] + 2.0 * x[1] - 3.0;
            Ok(())
        };

        let result = solve(system, &[0.0, 0.0], &Config::default());

        assert!(matches!(result, Err(Error::SingularJacobian { iter: 0 })));
    }

    #[test]
    fn propagates_evaluation_errors() {
        #[derive(Debug, PartialEq)]
        struct OutOfRange;

        let system = |x: &[f64], r: &mut [f64]| -> Result<(), OutOfRange> {
            if x[0] < 0.0 {
                return Err(OutOfRange);
            }
            r[0] = x[0] - 1.0;
            Ok(())
        };

        let result = solve(system, &[-1.0], &Config::default());

        assert!(matches!(
            result,
            Err(Error::Evaluation {
                iter: 0,
                source: OutOfRange
            })
        ));
    }
}
