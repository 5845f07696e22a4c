//! Raw measurement batch.

/// A batch of measurements.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    /// Number of measurements.
    pub count: u16,
    /// Measured values.
    pub samples: Vec<f32>,
}
