//! Scalar trail fields with deposit, diffusion and evaporation operators.

use colony_core::{config, GridDims, TileIndex, TrailFieldView};

/// Dense grid of trail intensities clamped to `[0, 1]`.
#[derive(Clone, Debug)]
pub(crate) struct PheromoneField {
    dims: GridDims,
    values: Vec<f32>,
}

impl PheromoneField {
    pub(crate) fn new(dims: GridDims) -> Self {
        Self {
            dims,
            values: vec![0.0; dims.len()],
        }
    }

    pub(crate) fn view(&self) -> TrailFieldView<'_> {
        TrailFieldView::new(&self.values, self.dims)
    }

    pub(crate) fn values(&self) -> &[f32] {
        &self.values
    }

    /// Intensity at the tile containing `(x, y)`, or zero outside the field.
    pub(crate) fn sample(&self, x: f32, y: f32) -> f32 {
        self.view().sample(x, y)
    }

    /// Adds `amount` to a tile, saturating at full intensity.
    pub(crate) fn deposit(&mut self, index: TileIndex, amount: f32) {
        let value = &mut self.values[index.get()];
        *value = (*value + amount).min(1.0);
    }

    /// Linear decay: cells above the epsilon lose `rate`, everything else snaps to zero.
    pub(crate) fn evaporate(&mut self, rate: f32) {
        for value in &mut self.values {
            if *value > config::TRAIL_EPSILON {
                *value = (*value - rate).max(0.0);
            } else {
                *value = 0.0;
            }
        }
    }

    /// Blends every interior cell towards the mean of itself and its four
    /// axis neighbours.
    ///
    /// All reads come from the field as it was before the pass; `scratch`
    /// receives the result and is then copied back wholesale. The outer ring
    /// keeps its value.
    pub(crate) fn diffuse(&mut self, scratch: &mut Vec<f32>, rate: f32) {
        scratch.clear();
        scratch.extend_from_slice(&self.values);

        let width = self.dims.width() as usize;
        let height = self.dims.height() as usize;
        if width < 3 || height < 3 {
            return;
        }

        for y in 1..height - 1 {
            for x in 1..width - 1 {
                let index = y * width + x;
                let old = self.values[index];
                let sum = old
                    + self.values[index - 1]
                    + self.values[index + 1]
                    + self.values[index - width]
                    + self.values[index + width];
                let average = sum / 5.0;
                scratch[index] = old * (1.0 - rate) + average * rate;
            }
        }

        self.values.copy_from_slice(scratch);
    }

    #[cfg(any(test, feature = "scaffolding"))]
    pub(crate) fn set(&mut self, index: TileIndex, value: f32) {
        self.values[index.get()] = value.clamp(0.0, 1.0);
    }
}

/// Selects one of the two trail fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trail {
    /// Laid by searching ants; leads back to the nest.
    Home,
    /// Laid by returning ants; leads towards food.
    Food,
}

/// Both trail fields plus the scratch buffer shared by their diffusion passes.
#[derive(Clone, Debug)]
pub(crate) struct Trails {
    pub(crate) home: PheromoneField,
    pub(crate) food: PheromoneField,
    scratch: Vec<f32>,
}

impl Trails {
    pub(crate) fn new(dims: GridDims) -> Self {
        Self {
            home: PheromoneField::new(dims),
            food: PheromoneField::new(dims),
            scratch: Vec::with_capacity(dims.len()),
        }
    }

    pub(crate) fn field(&self, trail: Trail) -> &PheromoneField {
        match trail {
            Trail::Home => &self.home,
            Trail::Food => &self.food,
        }
    }

    pub(crate) fn field_mut(&mut self, trail: Trail) -> &mut PheromoneField {
        match trail {
            Trail::Home => &mut self.home,
            Trail::Food => &mut self.food,
        }
    }

    pub(crate) fn diffuse(&mut self) {
        self.home.diffuse(&mut self.scratch, config::DIFFUSION_RATE);
        self.food.diffuse(&mut self.scratch, config::DIFFUSION_RATE);
    }

    pub(crate) fn evaporate(&mut self) {
        self.home.evaporate(config::HOME_EVAPORATION_RATE);
        self.food.evaporate(config::FOOD_EVAPORATION_RATE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIMS: GridDims = GridDims::new(128, 128);

    fn tile(x: u32, y: u32) -> TileIndex {
        DIMS.tile(x, y).expect("inside grid")
    }

    #[test]
    fn evaporation_subtracts_rate_above_epsilon() {
        let mut field = PheromoneField::new(DIMS);
        field.set(tile(10, 10), 1.0);
        field.set(tile(11, 10), 0.5);

        field.evaporate(0.1);
        assert!((field.values()[tile(10, 10).get()] - 0.9).abs() < 1e-6);
        assert!((field.values()[tile(11, 10).get()] - 0.4).abs() < 1e-6);

        field.evaporate(0.9);
        assert!(field.values()[tile(10, 10).get()] < 1e-5);
    }

    #[test]
    fn evaporation_snaps_small_values_to_zero() {
        let mut field = PheromoneField::new(DIMS);
        field.set(tile(3, 3), 0.01);
        field.set(tile(4, 3), 0.005);

        field.evaporate(0.001);
        assert_eq!(field.values()[tile(3, 3).get()], 0.0);
        assert_eq!(field.values()[tile(4, 3).get()], 0.0);
    }

    #[test]
    fn diffusion_spreads_an_impulse_to_its_neighbours() {
        let mut field = PheromoneField::new(DIMS);
        let mut scratch = Vec::new();
        field.set(tile(50, 50), 1.0);

        field.diffuse(&mut scratch, 1.0);

        assert!(field.values()[tile(50, 50).get()] < 1.0);
        for (x, y) in [(51, 50), (49, 50), (50, 51), (50, 49)] {
            assert!(
                field.values()[tile(x, y).get()] > 0.0,
                "neighbour ({x}, {y}) received nothing",
            );
        }
    }

    #[test]
    fn diffusion_conserves_mass_away_from_edges() {
        let mut field = PheromoneField::new(DIMS);
        let mut scratch = Vec::new();
        field.set(tile(10, 10), 1.0);
        let before = field.view().total();

        field.diffuse(&mut scratch, 0.5);

        let after = field.view().total();
        assert!((after - before).abs() < 1e-5, "{before} became {after}");
    }

    #[test]
    fn diffusion_leaves_the_outer_ring_untouched() {
        let mut field = PheromoneField::new(DIMS);
        let mut scratch = Vec::new();
        field.set(tile(0, 40), 0.8);
        field.set(tile(1, 40), 0.0);

        field.diffuse(&mut scratch, 1.0);

        assert!((field.values()[tile(0, 40).get()] - 0.8).abs() < 1e-6);
        assert!(field.values()[tile(1, 40).get()] > 0.0);
    }

    #[test]
    fn deposit_saturates_at_one() {
        let mut field = PheromoneField::new(DIMS);
        field.deposit(tile(2, 2), 0.7);
        field.deposit(tile(2, 2), 0.7);
        assert_eq!(field.values()[tile(2, 2).get()], 1.0);
        assert_eq!(field.sample(2.5, 2.5), 1.0);
        assert_eq!(field.sample(-1.0, 2.5), 0.0);
    }
}
