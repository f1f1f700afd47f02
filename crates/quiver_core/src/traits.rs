use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Scalar type the integrator works over. Needs IEEE-style float arithmetic,
/// debug printing, and conversion from f64 for the method coefficients.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// Right-hand side of a first-order ODE system dy/dt = f(t, y).
///
/// Implementations must be pure: evaluating twice at the same (t, y) yields
/// the same derivative. The integrator relies on this for reproducible
/// trajectories; it never guards against non-finite outputs.
pub trait VectorField<T: Scalar> {
    /// Evaluates the field at time `t` and state `y`, writing dy/dt into
    /// `dydt`. Both slices have the problem dimension.
    fn eval(&self, t: T, y: &[T], dydt: &mut [T]);
}

/// Adapts a slice closure `f(t, y, dydt)` into a [`VectorField`].
pub struct FnField<F>(pub F);

impl<T: Scalar, F> VectorField<T> for FnField<F>
where
    F: Fn(T, &[T], &mut [T]),
{
    fn eval(&self, t: T, y: &[T], dydt: &mut [T]) {
        (self.0)(t, y, dydt)
    }
}

/// Adapts a scalar closure `f(t, y) -> dy/dt` into a one-dimensional
/// [`VectorField`].
pub struct ScalarField<F>(pub F);

impl<T: Scalar, F> VectorField<T> for ScalarField<F>
where
    F: Fn(T, T) -> T,
{
    fn eval(&self, t: T, y: &[T], dydt: &mut [T]) {
        dydt[0] = (self.0)(t, y[0]);
    }
}

/// A fixed-step scheme that can advance a state through one step.
pub trait Steppable<T: Scalar> {
    /// Performs one step of size `h`.
    /// t: current time (updated after the step)
    /// y: current state (updated after the step)
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, y: &mut [T], h: T);
}
