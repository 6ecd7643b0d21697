//! Procedural world generation: noise-carved walls, the nest and food piles.

use colony_core::{config, GridDims, TileKind};
use rand::Rng;

use crate::terrain::Terrain;

const WALL_BASE_SCALE: f32 = 1.0 / 24.0;
const WALL_DETAIL_SCALE: f32 = 1.0 / 8.0;
const WALL_BASE_WEIGHT: f32 = 0.7;
const WALL_DETAIL_WEIGHT: f32 = 0.3;
const WALL_THRESHOLD: f32 = 0.35;

const FOOD_BASE_SCALE: f32 = 1.0 / 12.0;
const FOOD_DETAIL_SCALE: f32 = 1.0 / 5.0;
const FOOD_BASE_WEIGHT: f32 = 0.75;
const FOOD_DETAIL_WEIGHT: f32 = 0.25;
const FOOD_THRESHOLD: f32 = 0.55;

/// Legacy circular patches used when the food noise yields nothing:
/// centre as a fraction of the world size, then radius in tiles.
const FALLBACK_FOOD_PATCHES: [(f32, f32, u32); 2] = [(0.2, 0.2, 4), (0.8, 0.7, 6)];

/// Builds a fresh terrain for a world of the given size.
pub(crate) fn generate<R: Rng>(dims: GridDims, rng: &mut R) -> Terrain {
    let mut terrain = Terrain::blank(dims);
    let walls = SimplexNoise::from_rng(rng);
    let food = SimplexNoise::from_rng(rng);
    let wall_octaves = Octaves {
        base_scale: WALL_BASE_SCALE,
        detail_scale: WALL_DETAIL_SCALE,
        base_weight: WALL_BASE_WEIGHT,
        detail_weight: WALL_DETAIL_WEIGHT,
    };
    let food_octaves = Octaves {
        base_scale: FOOD_BASE_SCALE,
        detail_scale: FOOD_DETAIL_SCALE,
        base_weight: FOOD_BASE_WEIGHT,
        detail_weight: FOOD_DETAIL_WEIGHT,
    };

    let (nest_x, nest_y) = terrain.nest_center();
    for row in 0..dims.height() {
        for column in 0..dims.width() {
            let Some(index) = dims.tile(column, row) else {
                continue;
            };
            let dx = column as f32 + 0.5 - nest_x;
            let dy = row as f32 + 0.5 - nest_y;
            if dx.hypot(dy) < config::NEST_CLEAR_RADIUS {
                continue;
            }
            if wall_octaves.sample(&walls, column, row) > WALL_THRESHOLD {
                terrain.set_kind(index, TileKind::Wall);
            }
        }
    }

    terrain.stamp_nest();

    for row in 0..dims.height() {
        for column in 0..dims.width() {
            let Some(index) = dims.tile(column, row) else {
                continue;
            };
            if terrain.kind(index) != TileKind::Empty {
                continue;
            }
            if food_octaves.sample(&food, column, row) > FOOD_THRESHOLD {
                terrain.place_food(index, config::INITIAL_FOOD_PER_TILE);
            }
        }
    }

    if terrain.food_tile_count() == 0 {
        log::debug!("food noise produced no piles; stamping fallback patches");
        for (fraction_x, fraction_y, radius) in FALLBACK_FOOD_PATCHES {
            let centre_x = (dims.width() as f32 * fraction_x) as u32;
            let centre_y = (dims.height() as f32 * fraction_y) as u32;
            stamp_food_patch(&mut terrain, centre_x, centre_y, radius);
        }
    }

    log::debug!(
        "generated {}x{} world: {} walls, {} food tiles",
        dims.width(),
        dims.height(),
        terrain
            .kinds()
            .iter()
            .filter(|kind| **kind == TileKind::Wall)
            .count(),
        terrain.food_tile_count(),
    );

    terrain
}

fn stamp_food_patch(terrain: &mut Terrain, centre_x: u32, centre_y: u32, radius: u32) {
    let dims = terrain.dims();
    let radius_squared = i64::from(radius) * i64::from(radius);
    for row in centre_y.saturating_sub(radius)..=centre_y + radius {
        for column in centre_x.saturating_sub(radius)..=centre_x + radius {
            let dx = i64::from(column) - i64::from(centre_x);
            let dy = i64::from(row) - i64::from(centre_y);
            if dx * dx + dy * dy > radius_squared {
                continue;
            }
            let Some(index) = dims.tile(column, row) else {
                continue;
            };
            if terrain.kind(index) != TileKind::Nest {
                terrain.place_food(index, config::INITIAL_FOOD_PER_TILE);
            }
        }
    }
}

/// Weighted sum of a large-scale and a small-scale noise octave.
#[derive(Clone, Copy, Debug)]
struct Octaves {
    base_scale: f32,
    detail_scale: f32,
    base_weight: f32,
    detail_weight: f32,
}

impl Octaves {
    fn sample(&self, noise: &SimplexNoise, column: u32, row: u32) -> f32 {
        let x = column as f32;
        let y = row as f32;
        self.base_weight * noise.sample(x * self.base_scale, y * self.base_scale)
            + self.detail_weight * noise.sample(x * self.detail_scale, y * self.detail_scale)
    }
}

/// 2D simplex noise over a shuffled permutation table.
struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    fn from_rng<R: Rng>(rng: &mut R) -> Self {
        let mut table: [u8; 256] = std::array::from_fn(|value| value as u8);
        for i in (1..table.len()).rev() {
            let j = rng.gen_range(0..=i);
            table.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (slot, value) in perm.iter_mut().enumerate() {
            *value = table[slot & 255];
        }
        Self { perm }
    }

    /// Noise value at `(x, y)`, roughly in `[-1, 1]`.
    fn sample(&self, x: f32, y: f32) -> f32 {
        const F2: f32 = 0.366_025_42;
        const G2: f32 = 0.211_324_87;

        let skew = (x + y) * F2;
        let i = (x + skew).floor() as i32;
        let j = (y + skew).floor() as i32;

        let unskew = (i + j) as f32 * G2;
        let x0 = x - (i as f32 - unskew);
        let y0 = y - (j as f32 - unskew);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f32 + G2;
        let y1 = y0 - j1 as f32 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let perm = |index: usize| usize::from(self.perm[index]);

        let g0 = perm(ii + perm(jj)) % 12;
        let g1 = perm(ii + i1 + perm(jj + j1)) % 12;
        let g2 = perm(ii + 1 + perm(jj + 1)) % 12;

        70.0 * (corner(x0, y0, g0) + corner(x1, y1, g1) + corner(x2, y2, g2))
    }
}

fn corner(x: f32, y: f32, gradient: usize) -> f32 {
    const GRADIENTS: [[f32; 2]; 12] = [
        [1.0, 1.0],
        [-1.0, 1.0],
        [1.0, -1.0],
        [-1.0, -1.0],
        [1.0, 0.0],
        [-1.0, 0.0],
        [1.0, 0.0],
        [-1.0, 0.0],
        [0.0, 1.0],
        [0.0, -1.0],
        [0.0, 1.0],
        [0.0, -1.0],
    ];

    let falloff = 0.5 - x * x - y * y;
    if falloff < 0.0 {
        return 0.0;
    }
    let falloff = falloff * falloff;
    falloff * falloff * (GRADIENTS[gradient][0] * x + GRADIENTS[gradient][1] * y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const DIMS: GridDims = GridDims::new(128, 128);

    #[test]
    fn nest_neighbourhood_is_clear_and_nest_is_stamped() {
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let terrain = generate(DIMS, &mut rng);
            let (nest_x, nest_y) = terrain.nest_center();

            for row in 0..DIMS.height() {
                for column in 0..DIMS.width() {
                    let index = DIMS.tile(column, row).expect("inside grid");
                    let dx = column as f32 + 0.5 - nest_x;
                    let dy = row as f32 + 0.5 - nest_y;
                    if dx.hypot(dy) < config::NEST_CLEAR_RADIUS {
                        assert_ne!(terrain.kind(index), TileKind::Wall, "seed {seed}");
                    }
                }
            }

            let centre = DIMS.tile(64, 64).expect("inside grid");
            assert_eq!(terrain.kind(centre), TileKind::Nest);
        }
    }

    #[test]
    fn food_tile_count_matches_the_grid() {
        for seed in 0..8 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let terrain = generate(DIMS, &mut rng);
            let counted = terrain
                .kinds()
                .iter()
                .zip(terrain.food_quantities())
                .filter(|(kind, quantity)| **kind == TileKind::Food && **quantity > 0)
                .count() as u32;

            assert!(terrain.food_tile_count() > 0, "seed {seed} produced no food");
            assert_eq!(terrain.food_tile_count(), counted, "seed {seed}");
        }
    }

    #[test]
    fn generation_is_deterministic_for_a_seed() {
        let first = generate(DIMS, &mut ChaCha8Rng::seed_from_u64(42));
        let second = generate(DIMS, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(first.kinds(), second.kinds());
        assert_eq!(first.food_quantities(), second.food_quantities());
    }

    #[test]
    fn wall_and_food_fields_are_seeded_independently() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let walls = SimplexNoise::from_rng(&mut rng);
        let food = SimplexNoise::from_rng(&mut rng);
        assert_ne!(walls.perm[..256], food.perm[..256]);
    }

    #[test]
    fn noise_stays_within_unit_range() {
        let noise = SimplexNoise::from_rng(&mut ChaCha8Rng::seed_from_u64(3));
        for step in 0..2_000 {
            let x = step as f32 * 0.173;
            let y = step as f32 * 0.091;
            let value = noise.sample(x, y);
            assert!((-1.0..=1.0).contains(&value), "{value} at ({x}, {y})");
        }
    }

    #[test]
    fn fallback_patch_is_circular_and_skips_the_nest() {
        let mut terrain = Terrain::blank(DIMS);
        stamp_food_patch(&mut terrain, 64, 64, 2);
        let centre = DIMS.tile(64, 64).expect("inside grid");
        let ring = DIMS.tile(66, 64).expect("inside grid");
        let corner_tile = DIMS.tile(66, 66).expect("inside grid");

        assert_eq!(terrain.kind(centre), TileKind::Nest);
        assert_eq!(terrain.kind(ring), TileKind::Food);
        assert_eq!(terrain.kind(corner_tile), TileKind::Empty);
    }
}
