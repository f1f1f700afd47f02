use thiserror::Error;

use crate::solvers::Rk4;
use crate::traits::{Scalar, ScalarField, Steppable, VectorField};
use crate::trajectory::Trajectory;

/// Rejected problem configuration. Raised at construction, before any
/// stepping happens, so a held `InitialValueProblem` is always integrable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProblemError {
    #[error("step size must be strictly positive, got {step}")]
    InvalidStep { step: f64 },

    #[error("step size {step} cannot advance times of magnitude {magnitude}")]
    StepUnderflow { step: f64, magnitude: f64 },

    #[error("integration horizon must run forward over finite times, got t0 = {t0}, t_end = {t_end}")]
    InvalidHorizon { t0: f64, t_end: f64 },

    #[error("initial state must have at least one component")]
    EmptyState,
}

/// Immutable description of a first-order initial value problem
///
///   dy/dt = f(t, y),  y(t0) = y0,
///
/// integrated with a fixed step until the horizon `t_end` is reached.
///
/// The configuration is validated once, here; [`integrate`] itself cannot
/// fail. Values flowing through the field are not screened, so a field that
/// produces NaN yields a trajectory that carries NaN.
pub struct InitialValueProblem<T, F> {
    rhs: F,
    t0: T,
    y0: Vec<T>,
    step: T,
    t_end: T,
}

impl<T: Scalar, F: VectorField<T>> InitialValueProblem<T, F> {
    /// Builds a vector-valued problem.
    ///
    /// Fails when the step is not strictly positive (NaN included), when the
    /// horizon is not a finite forward range, when the step is too small to
    /// move times of the horizon's magnitude, or when the initial state is
    /// empty.
    pub fn new(rhs: F, t0: T, y0: Vec<T>, step: T, t_end: T) -> Result<Self, ProblemError> {
        if !(step > T::zero()) {
            return Err(ProblemError::InvalidStep {
                step: to_display(step),
            });
        }
        if !(t_end >= t0) || !t0.is_finite() || !t_end.is_finite() {
            return Err(ProblemError::InvalidHorizon {
                t0: to_display(t0),
                t_end: to_display(t_end),
            });
        }
        // One step must move the clock at the coarsest time the loop visits,
        // or t + h rounds back to t and never reaches the horizon.
        let magnitude = t0.abs().max(t_end.abs());
        if !(magnitude + step > magnitude) {
            return Err(ProblemError::StepUnderflow {
                step: to_display(step),
                magnitude: to_display(magnitude),
            });
        }
        if y0.is_empty() {
            return Err(ProblemError::EmptyState);
        }
        Ok(Self {
            rhs,
            t0,
            y0,
            step,
            t_end,
        })
    }

    /// Start time.
    pub fn t0(&self) -> T {
        self.t0
    }

    /// Initial state.
    pub fn y0(&self) -> &[T] {
        &self.y0
    }

    /// Fixed step size.
    pub fn step(&self) -> T {
        self.step
    }

    /// Integration horizon.
    pub fn t_end(&self) -> T {
        self.t_end
    }

    /// Number of state components.
    pub fn dimension(&self) -> usize {
        self.y0.len()
    }
}

impl<T: Scalar, F: Fn(T, T) -> T> InitialValueProblem<T, ScalarField<F>> {
    /// Builds a one-dimensional problem from a scalar closure
    /// `f(t, y) -> dy/dt`.
    pub fn scalar(rhs: F, t0: T, y0: T, step: T, t_end: T) -> Result<Self, ProblemError> {
        Self::new(ScalarField(rhs), t0, vec![y0], step, t_end)
    }
}

fn to_display<T: Scalar>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Integrates the problem with the classical RK4 scheme, returning every
/// sample from `(t0, y0)` onward.
///
/// Stepping continues while `t < t_end`, so when the step does not divide the
/// horizon evenly the final sample lands past `t_end` rather than being
/// clamped onto it. Time accumulates additively (`t = t + h` each step), and
/// the produced trajectory depends only on the problem, never on ambient
/// state.
pub fn integrate<T: Scalar, F: VectorField<T>>(
    problem: &InitialValueProblem<T, F>,
) -> Trajectory<T> {
    let dim = problem.y0.len();
    let span = (problem.t_end - problem.t0) / problem.step;
    let hint = span.ceil().to_usize().unwrap_or(0).saturating_add(2);

    let mut stepper = Rk4::new(dim);
    let mut trajectory = Trajectory::with_capacity(dim, hint);
    let mut t = problem.t0;
    let mut y = problem.y0.clone();

    trajectory.push(t, &y);
    while t < problem.t_end {
        stepper.step(&problem.rhs, &mut t, &mut y, problem.step);
        trajectory.push(t, &y);
    }
    trajectory
}
