use rand::prelude::*;

/// Single source of randomness for a run.
///
/// Every draw flows through one of these in a fixed order, so one seed
/// reproduces the whole piece: grid, palette, noise table, cell colors and
/// every mask redraw.
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform draw in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform integer in `[min, max]`, both ends inclusive.
    pub fn int_in_range(&mut self, min: u32, max: u32) -> u32 {
        self.rng.gen_range(min..=max)
    }

    /// Uniform decimal in `[min, max)`, floored to two decimal places.
    pub fn decimal_in_range(&mut self, min: f64, max: f64) -> f64 {
        let v = min + self.unit() * (max - min);
        (v * 100.0).floor() / 100.0
    }

    /// Uniform pick from a slice; `None` when the slice is empty.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }

    /// Single-draw weighted pick: the theme value carries `theme_weight`
    /// tickets against one ticket per pool entry.
    pub fn pick_with_theme<'a, T>(
        &mut self,
        theme: &'a T,
        pool: &'a [T],
        theme_weight: usize,
    ) -> &'a T {
        let total = theme_weight + pool.len();
        if total == 0 {
            return theme;
        }
        let idx = self.rng.gen_range(0..total);
        if idx < theme_weight {
            theme
        } else {
            &pool[idx - theme_weight]
        }
    }

    /// Derive a seed for a noise permutation table.
    pub fn table_seed(&mut self) -> u32 {
        self.rng.gen()
    }
}
