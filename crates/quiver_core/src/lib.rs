/// The `quiver_core` crate is the numerical engine behind the Quiver workbench.
/// It integrates first-order initial value problems with the classical
/// fixed-step RK4 scheme, generic over the scalar type (`f64` by default).
///
/// Key components:
/// - **Traits**: `Scalar` (numeric type abstraction), `VectorField` (right-hand sides), `Steppable` (steppers).
/// - **Problem**: validated `InitialValueProblem` configuration and the `integrate` entry point.
/// - **Trajectory**: the ordered (t, y) samples a solve produces.
/// - **Stats**: per-column descriptive summaries of sampled data.
pub mod problem;
pub mod solvers;
pub mod stats;
pub mod traits;
pub mod trajectory;
