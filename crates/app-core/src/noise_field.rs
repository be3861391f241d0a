use noise::{NoiseFn, Perlin};

/// Three-dimensional scalar noise consumed by the pattern generator.
///
/// Implementations must be pure: the same inputs produce the same output for
/// the lifetime of the value. Outputs are expected in `[0, 1]` with a mean
/// near 0.5, so that summing three samples centers on 1.5.
pub trait NoiseField3 {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Perlin-backed field, seeded once at startup and reused for every pass.
pub struct PerlinField3 {
    perlin: Perlin,
}

impl PerlinField3 {
    pub fn new(table_seed: u32) -> Self {
        Self {
            perlin: Perlin::new(table_seed),
        }
    }
}

impl NoiseField3 for PerlinField3 {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        // Perlin outputs roughly [-1, 1]; remap to [0, 1].
        (self.perlin.get([x, y, z]) + 1.0) * 0.5
    }
}
