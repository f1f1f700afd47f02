use crate::traits::{Scalar, Steppable, VectorField};

/// Classical fourth-order Runge-Kutta stepper.
///
/// Stage buffers are allocated once for the problem dimension and reused, so
/// stepping itself is allocation-free.
pub struct Rk4<T: Scalar> {
    k1: Vec<T>,
    k2: Vec<T>,
    k3: Vec<T>,
    k4: Vec<T>,
    stage: Vec<T>,
}

impl<T: Scalar> Rk4<T> {
    pub fn new(dim: usize) -> Self {
        let z = T::from_f64(0.0).unwrap();
        Self {
            k1: vec![z; dim],
            k2: vec![z; dim],
            k3: vec![z; dim],
            k4: vec![z; dim],
            stage: vec![z; dim],
        }
    }
}

impl<T: Scalar> Steppable<T> for Rk4<T> {
    fn step(&mut self, field: &impl VectorField<T>, t: &mut T, y: &mut [T], h: T) {
        let half = T::from_f64(0.5).unwrap();
        let sixth = T::from_f64(1.0 / 6.0).unwrap();
        let two = T::from_f64(2.0).unwrap();

        let t0 = *t;

        // k1 = f(t, y)
        field.eval(t0, y, &mut self.k1);

        // k2 = f(t + h/2, y + (h/2) k1)
        for i in 0..y.len() {
            self.stage[i] = y[i] + h * half * self.k1[i];
        }
        field.eval(t0 + h * half, &self.stage, &mut self.k2);

        // k3 = f(t + h/2, y + (h/2) k2)
        for i in 0..y.len() {
            self.stage[i] = y[i] + h * half * self.k2[i];
        }
        field.eval(t0 + h * half, &self.stage, &mut self.k3);

        // k4 = f(t + h, y + h k3)
        for i in 0..y.len() {
            self.stage[i] = y[i] + h * self.k3[i];
        }
        field.eval(t0 + h, &self.stage, &mut self.k4);

        // y_next = y + (h/6) (k1 + 2 k2 + 2 k3 + k4)
        for i in 0..y.len() {
            y[i] = y[i]
                + h * sixth * (self.k1[i] + two * self.k2[i] + two * self.k3[i] + self.k4[i]);
        }

        *t = t0 + h;
    }
}
