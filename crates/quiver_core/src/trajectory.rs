use serde::{Deserialize, Serialize};

use crate::traits::Scalar;

/// Ordered (t, y) samples produced by one integration run.
///
/// States are stored flat in row-major order: sample `i` occupies
/// `states[i * dimension .. (i + 1) * dimension]`. The first sample is always
/// the initial condition, bit-exact; the last sample is the first one whose
/// time reached or passed the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory<T> {
    dimension: usize,
    times: Vec<T>,
    states: Vec<T>,
}

impl<T: Scalar> Trajectory<T> {
    pub(crate) fn with_capacity(dimension: usize, samples: usize) -> Self {
        Self {
            dimension,
            times: Vec::with_capacity(samples),
            states: Vec::with_capacity(samples * dimension),
        }
    }

    pub(crate) fn push(&mut self, t: T, y: &[T]) {
        debug_assert_eq!(y.len(), self.dimension);
        self.times.push(t);
        self.states.extend_from_slice(y);
    }

    /// Number of state components per sample.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample times in integration order.
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// State of sample `i`.
    pub fn state(&self, i: usize) -> &[T] {
        &self.states[i * self.dimension..(i + 1) * self.dimension]
    }

    /// The pair (t_i, y_i).
    pub fn sample(&self, i: usize) -> (T, &[T]) {
        (self.times[i], self.state(i))
    }

    /// Final sample, if any.
    pub fn last(&self) -> Option<(T, &[T])> {
        if self.is_empty() {
            None
        } else {
            Some(self.sample(self.len() - 1))
        }
    }

    /// Iterates over samples in integration order.
    pub fn iter(&self) -> impl Iterator<Item = (T, &[T])> + '_ {
        self.times
            .iter()
            .copied()
            .zip(self.states.chunks(self.dimension))
    }

    /// Values of state component `k` across all samples, in integration
    /// order. This is the column a plot or a statistics pass consumes.
    pub fn component(&self, k: usize) -> Vec<T> {
        assert!(
            k < self.dimension,
            "component {} out of range for dimension {}",
            k,
            self.dimension
        );
        self.states
            .iter()
            .skip(k)
            .step_by(self.dimension)
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Trajectory;

    fn two_body_samples() -> Trajectory<f64> {
        let mut trajectory = Trajectory::with_capacity(2, 3);
        trajectory.push(0.0, &[1.0, 0.0]);
        trajectory.push(0.5, &[0.9, -0.2]);
        trajectory.push(1.0, &[0.6, -0.4]);
        trajectory
    }

    #[test]
    fn indexing_matches_row_major_layout() {
        let trajectory = two_body_samples();
        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.dimension(), 2);
        assert_eq!(trajectory.state(1), &[0.9, -0.2]);
        assert_eq!(trajectory.sample(2), (1.0, &[0.6, -0.4][..]));
        assert_eq!(trajectory.last(), Some((1.0, &[0.6, -0.4][..])));
    }

    #[test]
    fn iteration_yields_samples_in_order() {
        let trajectory = two_body_samples();
        let times: Vec<f64> = trajectory.iter().map(|(t, _)| t).collect();
        assert_eq!(times, vec![0.0, 0.5, 1.0]);
        let first_states: Vec<f64> = trajectory.iter().map(|(_, y)| y[0]).collect();
        assert_eq!(first_states, vec![1.0, 0.9, 0.6]);
    }

    #[test]
    fn component_extracts_one_column() {
        let trajectory = two_body_samples();
        assert_eq!(trajectory.component(0), vec![1.0, 0.9, 0.6]);
        assert_eq!(trajectory.component(1), vec![0.0, -0.2, -0.4]);
    }

    #[test]
    fn serialization_round_trips() {
        let trajectory = two_body_samples();
        let json = serde_json::to_string(&trajectory).expect("serialize trajectory");
        let back: Trajectory<f64> = serde_json::from_str(&json).expect("deserialize trajectory");
        assert_eq!(back, trajectory);
    }
}
