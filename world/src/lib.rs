#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the ant colony engine.
//!
//! The [`World`] aggregate owns the tile grid, both trail fields, every ant and
//! brood item, the food stockpile and the upgrade levels. It only changes
//! through [`apply`]; adapters and systems observe it through [`query`].

mod ants;
mod brood;
mod generation;
mod pheromones;
mod terrain;

pub use pheromones::Trail;

use std::f32::consts::TAU;

use colony_core::{
    config, AntId, BroodId, Caste, Command, Event, GrowthPolicy, UpgradeLever, Upgrades,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{
    ants::{Ant, AntContext, AntTuning},
    brood::BroodItem,
    pheromones::Trails,
    terrain::Terrain,
};

/// Represents the authoritative colony world.
#[derive(Debug)]
pub struct World {
    seed: u64,
    tick: u64,
    terrain: Terrain,
    trails: Trails,
    ants: Vec<Ant>,
    brood: Vec<BroodItem>,
    colony_food: f32,
    upgrades: Upgrades,
    production_caste: Caste,
    growth: GrowthPolicy,
    next_ant_id: u32,
    next_brood_id: u32,
    rng: ChaCha8Rng,
}

impl World {
    /// Generates a fresh world and places the founding workers at the nest.
    ///
    /// Passing `None` draws the seed from system entropy; the chosen value is
    /// available through [`query::seed`] so a run can be reproduced.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let terrain = generation::generate(config::WORLD_DIMS, &mut rng);
        let mut world = Self::with_terrain(seed, terrain, rng);

        let (x, y) = world.terrain.nest_center();
        for _ in 0..config::INITIAL_ANT_COUNT {
            let heading = world.rng.gen::<f32>() * TAU;
            let _ = world.spawn(Caste::Worker, x, y, heading);
        }

        log::debug!(
            "world seeded with {seed}: {} ants, {} food tiles",
            world.ants.len(),
            world.terrain.food_tile_count(),
        );
        world
    }

    /// Selects how surplus food turns into new ants.
    #[must_use]
    pub fn with_growth_policy(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    fn with_terrain(seed: u64, terrain: Terrain, rng: ChaCha8Rng) -> Self {
        let dims = terrain.dims();
        Self {
            seed,
            tick: 0,
            terrain,
            trails: Trails::new(dims),
            ants: Vec::new(),
            brood: Vec::new(),
            colony_food: 0.0,
            upgrades: Upgrades::default(),
            production_caste: Caste::default(),
            growth: GrowthPolicy::default(),
            next_ant_id: 0,
            next_brood_id: 0,
            rng,
        }
    }

    fn spawn(&mut self, caste: Caste, x: f32, y: f32, heading: f32) -> AntId {
        let id = AntId::new(self.next_ant_id);
        self.next_ant_id += 1;
        self.ants.push(Ant::new(id, caste, x, y, heading));
        id
    }

    fn hatch(&mut self, caste: Caste, out_events: &mut Vec<Event>) {
        let (x, y) = self.terrain.nest_center();
        let heading = self.rng.gen::<f32>() * TAU;
        let ant = self.spawn(caste, x, y, heading);
        log::debug!("{caste:?} {} joined the colony", ant.get());
        out_events.push(Event::AntHatched { ant, caste });
    }

    fn lay_egg(&mut self, out_events: &mut Vec<Event>) {
        let position =
            brood::scatter_position(self.terrain.nest_center(), self.terrain.dims(), &mut self.rng);
        let id = BroodId::new(self.next_brood_id);
        self.next_brood_id += 1;
        let caste = self.production_caste;
        self.brood
            .push(BroodItem::egg(id, caste, position.0, position.1));
        out_events.push(Event::EggLaid { brood: id, caste });
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        let mut context = AntContext {
            terrain: &mut self.terrain,
            trails: &mut self.trails,
            colony_food: &mut self.colony_food,
            tuning: AntTuning::from_upgrades(&self.upgrades),
        };
        ants::update_ants(&mut self.ants, &mut context, &mut self.rng, out_events);

        self.trails.diffuse();
        self.trails.evaporate();

        for caste in brood::advance(&mut self.brood, &mut self.colony_food, out_events) {
            self.hatch(caste, out_events);
        }

        if self.colony_food >= config::LAY_THRESHOLD {
            self.colony_food -= config::LAY_THRESHOLD;
            match self.growth {
                GrowthPolicy::Brood => self.lay_egg(out_events),
                GrowthPolicy::DirectSpawn => self.hatch(self.production_caste, out_events),
            }
        }

        self.tick += 1;
        out_events.push(Event::TimeAdvanced { tick: self.tick });
    }

    fn purchase(&mut self, lever: UpgradeLever, out_events: &mut Vec<Event>) {
        match self.upgrades.purchase_cost(lever, self.colony_food) {
            Ok(cost) => {
                self.colony_food -= cost as f32;
                let level = self.upgrades.raise(lever);
                log::debug!("bought {} level {level} for {cost}", lever.definition().name());
                out_events.push(Event::UpgradePurchased { lever, level, cost });
            }
            Err(reason) => {
                log::debug!("rejected {lever:?} purchase: {reason:?}");
                out_events.push(Event::UpgradeRejected { lever, reason });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => world.step(out_events),
        Command::SetProductionCaste { caste } => {
            world.production_caste = caste;
            out_events.push(Event::ProductionCasteChanged { caste });
        }
        Command::PurchaseUpgrade { lever } => world.purchase(lever, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use colony_core::{
        AntId, AntSnapshot, BroodSnapshot, Caste, ColonySnapshot, ColonyState, GridDims,
        GrowthPolicy, TileIndex, TileKind, TrailFieldView, Upgrades,
    };

    use super::{Trail, World};

    /// Seed that reproduces the world's map and random choices.
    #[must_use]
    pub fn seed(world: &World) -> u64 {
        world.seed
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick(world: &World) -> u64 {
        world.tick
    }

    /// Dimensions of the tile grid and trail fields.
    #[must_use]
    pub fn dims(world: &World) -> GridDims {
        world.terrain.dims()
    }

    /// Column and row of the nest centre.
    #[must_use]
    pub fn nest(world: &World) -> (u32, u32) {
        world.terrain.nest()
    }

    /// Food units held in the colony stockpile.
    #[must_use]
    pub fn colony_food(world: &World) -> f32 {
        world.colony_food
    }

    /// Number of food tiles that still hold food.
    #[must_use]
    pub fn food_tile_count(world: &World) -> u32 {
        world.terrain.food_tile_count()
    }

    /// Current upgrade levels.
    #[must_use]
    pub fn upgrades(world: &World) -> Upgrades {
        world.upgrades
    }

    /// Caste assigned to newly laid brood.
    #[must_use]
    pub fn production_caste(world: &World) -> Caste {
        world.production_caste
    }

    /// Active growth policy.
    #[must_use]
    pub fn growth_policy(world: &World) -> GrowthPolicy {
        world.growth
    }

    /// Tag of the tile at `index`.
    #[must_use]
    pub fn tile(world: &World, index: TileIndex) -> TileKind {
        world.terrain.kind(index)
    }

    /// Food units left on the tile at `index`.
    #[must_use]
    pub fn food_quantity(world: &World, index: TileIndex) -> u8 {
        world.terrain.food_at(index)
    }

    /// Digging damage accumulated by the tile at `index`.
    #[must_use]
    pub fn wall_damage(world: &World, index: TileIndex) -> f32 {
        world.terrain.damage_at(index)
    }

    /// Borrowed view of one trail field.
    #[must_use]
    pub fn trail(world: &World, trail: Trail) -> TrailFieldView<'_> {
        world.trails.field(trail).view()
    }

    /// Snapshots of every ant ordered by identifier.
    #[must_use]
    pub fn ants(world: &World) -> Vec<AntSnapshot> {
        world.ants.iter().map(|ant| ant.snapshot()).collect()
    }

    /// Snapshot of a single ant, if it exists.
    #[must_use]
    pub fn ant(world: &World, id: AntId) -> Option<AntSnapshot> {
        world
            .ants
            .iter()
            .find(|ant| ant.id == id)
            .map(|ant| ant.snapshot())
    }

    /// Number of ants belonging to `caste`.
    #[must_use]
    pub fn population(world: &World, caste: Caste) -> usize {
        world.ants.iter().filter(|ant| ant.caste == caste).count()
    }

    /// Snapshots of every brood item ordered by identifier.
    #[must_use]
    pub fn brood(world: &World) -> Vec<BroodSnapshot> {
        world.brood.iter().map(|item| item.snapshot()).collect()
    }

    /// Full copy of the colony, including per-tile food quantities.
    #[must_use]
    pub fn state(world: &World) -> ColonyState {
        ColonyState {
            tick: world.tick,
            dims: world.terrain.dims(),
            ants: ants(world),
            brood: brood(world),
            home_trail: world.trails.home.values().to_vec(),
            food_trail: world.trails.food.values().to_vec(),
            tiles: world.terrain.kinds().to_vec(),
            food_quantity: world.terrain.food_quantities().to_vec(),
            food_tile_count: world.terrain.food_tile_count(),
            colony_food: world.colony_food,
            nest: world.terrain.nest(),
            upgrades: world.upgrades,
            production_caste: world.production_caste,
        }
    }

    /// Polling view of the colony without the per-tile food quantities.
    #[must_use]
    pub fn snapshot(world: &World) -> ColonySnapshot {
        ColonySnapshot {
            tick: world.tick,
            dims: world.terrain.dims(),
            ants: ants(world),
            brood: brood(world),
            home_trail: world.trails.home.values().to_vec(),
            food_trail: world.trails.food.values().to_vec(),
            tiles: world.terrain.kinds().to_vec(),
            food_tile_count: world.terrain.food_tile_count(),
            colony_food: world.colony_food,
            upgrades: world.upgrades,
            production_caste: world.production_caste,
        }
    }
}

/// Hand-built worlds for exercising behaviour in isolation.
#[cfg(any(test, feature = "scaffolding"))]
pub mod scaffolding {
    use colony_core::{
        config, AntId, AntState, BroodId, BroodStage, Caste, TileIndex, TileKind,
    };
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::{brood::BroodItem, terrain::Terrain, Trail, World};

    /// Placement of a hand-made ant.
    #[derive(Clone, Copy, Debug)]
    pub struct AntSpawn {
        /// Caste of the ant.
        pub caste: Caste,
        /// Horizontal position in world units.
        pub x: f32,
        /// Vertical position in world units.
        pub y: f32,
        /// Heading in radians.
        pub heading: f32,
        /// Initial behavioural state.
        pub state: AntState,
        /// Ticks before the ant first re-reads the trails.
        pub wander_timer: u32,
    }

    impl AntSpawn {
        /// Searching worker at `(x, y)` facing along the positive x axis.
        #[must_use]
        pub fn worker(x: f32, y: f32) -> Self {
            Self {
                caste: Caste::Worker,
                x,
                y,
                heading: 0.0,
                state: AntState::Searching,
                wander_timer: 0,
            }
        }
    }

    impl World {
        /// Creates an empty world with only the nest stamped and no ants.
        #[must_use]
        pub fn blank(seed: u64) -> Self {
            Self::with_terrain(
                seed,
                Terrain::blank(config::WORLD_DIMS),
                ChaCha8Rng::seed_from_u64(seed),
            )
        }

        /// Overwrites the tag of a tile, clearing its food and damage.
        pub fn set_tile(&mut self, index: TileIndex, kind: TileKind) {
            self.terrain.set_kind(index, kind);
        }

        /// Turns a tile into a food pile with the given quantity.
        pub fn place_food(&mut self, index: TileIndex, quantity: u8) {
            self.terrain.place_food(index, quantity);
        }

        /// Adds a hand-placed ant and returns its identifier.
        pub fn spawn_ant(&mut self, spawn: AntSpawn) -> AntId {
            let id = self.spawn(spawn.caste, spawn.x, spawn.y, spawn.heading);
            if let Some(ant) = self.ants.last_mut() {
                ant.state = spawn.state;
                ant.has_food = spawn.state == AntState::Returning;
                ant.wander_timer = spawn.wander_timer;
            }
            id
        }

        /// Removes every ant from the world.
        pub fn clear_ants(&mut self) {
            self.ants.clear();
        }

        /// Adds a brood item at the nest centre.
        pub fn add_brood(&mut self, stage: BroodStage, caste: Caste, progress: f32) -> BroodId {
            let id = BroodId::new(self.next_brood_id);
            self.next_brood_id += 1;
            let (x, y) = self.terrain.nest_center();
            let mut item = BroodItem::egg(id, caste, x, y);
            item.stage = stage;
            item.progress = progress;
            self.brood.push(item);
            id
        }

        /// Replaces the colony stockpile.
        pub fn set_colony_food(&mut self, food: f32) {
            self.colony_food = food;
        }

        /// Writes a single trail intensity.
        pub fn set_trail(&mut self, trail: Trail, index: TileIndex, value: f32) {
            self.trails.field_mut(trail).set(index, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_4, PI};

    use colony_core::{AntState, BroodStage, PurchaseError, TileIndex, TileKind};

    use super::*;
    use crate::scaffolding::AntSpawn;

    fn tile(column: u32, row: u32) -> TileIndex {
        config::WORLD_DIMS.tile(column, row).expect("inside grid")
    }

    fn tick(world: &mut World) -> Vec<Event> {
        let mut events = Vec::new();
        apply(world, Command::Tick, &mut events);
        events
    }

    fn heading_distance(a: f32, b: f32) -> f32 {
        let diff = (a - b).rem_euclid(TAU);
        diff.min(TAU - diff)
    }

    #[test]
    fn new_world_places_founding_workers_at_the_nest() {
        let world = World::new(Some(5));
        let ants = query::ants(&world);

        assert_eq!(ants.len(), config::INITIAL_ANT_COUNT);
        assert_eq!(query::tick(&world), 0);
        assert_eq!(query::colony_food(&world), 0.0);
        assert_eq!(query::seed(&world), 5);
        for ant in &ants {
            assert_eq!(ant.caste, Caste::Worker);
            assert_eq!(ant.state, AntState::Searching);
            assert!(!ant.has_food);
            assert!((ant.x - 64.5).abs() < 1e-6 && (ant.y - 64.5).abs() < 1e-6);
            assert!((0.0..TAU).contains(&ant.heading));
        }
        let ids: Vec<u32> = ants.iter().map(|ant| ant.id.get()).collect();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn searching_ant_picks_up_food() {
        let mut world = World::blank(1);
        world.place_food(tile(20, 20), 5);
        let ant = world.spawn_ant(AntSpawn {
            wander_timer: 10,
            ..AntSpawn::worker(20.2, 20.5)
        });

        let events = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert_eq!(snapshot.state, AntState::Returning);
        assert!(snapshot.has_food);
        assert_eq!(query::food_quantity(&world, tile(20, 20)), 4);
        assert_eq!(query::food_tile_count(&world), 1);
        assert!(events.contains(&Event::FoodCollected {
            ant,
            tile: tile(20, 20),
            remaining: 4,
        }));
    }

    #[test]
    fn last_unit_depletes_the_tile() {
        let mut world = World::blank(2);
        world.place_food(tile(20, 20), 1);
        let _ = world.spawn_ant(AntSpawn {
            wander_timer: 10,
            ..AntSpawn::worker(20.2, 20.5)
        });

        let events = tick(&mut world);

        assert_eq!(query::tile(&world, tile(20, 20)), TileKind::Empty);
        assert_eq!(query::food_tile_count(&world), 0);
        assert!(events.contains(&Event::FoodTileDepleted { tile: tile(20, 20) }));
    }

    #[test]
    fn scouts_walk_over_food() {
        let mut world = World::blank(3);
        world.place_food(tile(20, 20), 5);
        let ant = world.spawn_ant(AntSpawn {
            caste: Caste::Scout,
            wander_timer: 10,
            ..AntSpawn::worker(20.1, 20.5)
        });

        let _ = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert_eq!(snapshot.state, AntState::Searching);
        assert!(!snapshot.has_food);
        assert_eq!(query::food_quantity(&world, tile(20, 20)), 5);
    }

    #[test]
    fn returning_ant_delivers_to_the_nest() {
        let mut world = World::blank(4);
        let ant = world.spawn_ant(AntSpawn {
            state: AntState::Returning,
            wander_timer: 10,
            ..AntSpawn::worker(64.2, 64.5)
        });

        let events = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert_eq!(snapshot.state, AntState::Searching);
        assert!(!snapshot.has_food);
        assert_eq!(query::colony_food(&world), 1.0);
        assert!(events.contains(&Event::FoodDelivered { ant }));
    }

    #[test]
    fn returning_ant_bounces_off_walls() {
        let mut world = World::blank(5);
        world.set_tile(tile(11, 10), TileKind::Wall);
        let ant = world.spawn_ant(AntSpawn {
            state: AntState::Returning,
            wander_timer: 10,
            ..AntSpawn::worker(10.7, 10.5)
        });

        let _ = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert!(heading_distance(snapshot.heading, PI) < 0.15);
        assert_eq!((snapshot.x, snapshot.y), (10.7, 10.5));
        assert_eq!(snapshot.state, AntState::Returning);
    }

    #[test]
    fn scouts_never_dig() {
        let mut world = World::blank(6);
        world.set_tile(tile(11, 10), TileKind::Wall);
        let ant = world.spawn_ant(AntSpawn {
            caste: Caste::Scout,
            wander_timer: 100,
            ..AntSpawn::worker(10.7, 10.5)
        });

        for _ in 0..50 {
            let _ = tick(&mut world);
            let snapshot = query::ant(&world, ant).expect("ant exists");
            assert_ne!(snapshot.state, AntState::Digging);
        }
        assert_eq!(query::tile(&world, tile(11, 10)), TileKind::Wall);
    }

    #[test]
    fn persistent_worker_digs_through_a_wall() {
        let mut world = World::blank(7);
        let wall = tile(11, 10);
        world.set_tile(wall, TileKind::Wall);
        let ant = world.spawn_ant(AntSpawn {
            wander_timer: 10,
            ..AntSpawn::worker(10.7, 10.5)
        });

        let mut started = false;
        for _ in 0..200 {
            let events = tick(&mut world);
            if events.contains(&Event::DiggingStarted { ant, tile: wall }) {
                started = true;
                break;
            }
            // Keep the worker pressed against the wall until a roll succeeds.
            world.clear_ants();
            world.next_ant_id = ant.get();
            let _ = world.spawn_ant(AntSpawn {
                wander_timer: 10,
                ..AntSpawn::worker(10.7, 10.5)
            });
        }
        assert!(started, "worker never started digging");

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert_eq!(snapshot.state, AntState::Digging);
        assert_eq!(snapshot.dig_target, Some(wall));

        let mut breached = false;
        for _ in 0..60 {
            let events = tick(&mut world);
            if events.contains(&Event::WallBreached { ant, tile: wall }) {
                breached = true;
                break;
            }
        }
        assert!(breached, "wall survived sixty digging ticks");
        assert_eq!(query::tile(&world, wall), TileKind::Empty);
        assert_eq!(query::wall_damage(&world, wall), 0.0);
        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert_eq!(snapshot.state, AntState::Searching);
        assert_eq!(snapshot.dig_target, None);
    }

    #[test]
    fn ants_stay_inside_the_world() {
        let mut world = World::new(Some(17));
        for _ in 0..300 {
            let _ = tick(&mut world);
        }
        let dims = query::dims(&world);
        for ant in query::ants(&world) {
            assert!(dims.in_bounds(ant.x, ant.y), "{ant:?} left the grid");
            assert!((0.0..TAU).contains(&ant.heading));
            assert_eq!(ant.has_food, ant.state == AntState::Returning);
        }
    }

    #[test]
    fn ant_at_the_edge_turns_back_without_moving() {
        let mut world = World::blank(18);
        let ant = world.spawn_ant(AntSpawn::worker(127.9, 50.5));

        let _ = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert_eq!((snapshot.x, snapshot.y), (127.9, 50.5));
        assert!(heading_distance(snapshot.heading, PI) < 0.11);
    }

    #[test]
    fn searching_worker_turns_towards_food_trail() {
        let mut world = World::blank(19);
        let ant = world.spawn_ant(AntSpawn::worker(40.5, 40.5));
        world.set_trail(Trail::Food, tile(47, 47), 1.0);

        let _ = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert!(heading_distance(snapshot.heading, FRAC_PI_4) < 0.11);
    }

    #[test]
    fn searching_worker_shies_away_from_home_trail() {
        let mut world = World::blank(20);
        let ant = world.spawn_ant(AntSpawn::worker(40.5, 40.5));
        world.set_trail(Trail::Food, tile(47, 33), 0.5);
        world.set_trail(Trail::Food, tile(47, 47), 0.5);
        world.set_trail(Trail::Home, tile(47, 33), 1.0);

        let _ = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert!(heading_distance(snapshot.heading, FRAC_PI_4) < 0.11);
    }

    #[test]
    fn returning_ant_follows_home_trail() {
        let mut world = World::blank(21);
        let ant = world.spawn_ant(AntSpawn {
            state: AntState::Returning,
            ..AntSpawn::worker(40.5, 40.5)
        });
        world.set_trail(Trail::Home, tile(47, 33), 1.0);

        let _ = tick(&mut world);

        let snapshot = query::ant(&world, ant).expect("ant exists");
        assert!(heading_distance(snapshot.heading, TAU - FRAC_PI_4) < 0.11);
        assert!(snapshot.has_food);
    }

    #[test]
    fn scouts_sense_further_than_workers() {
        let mut world = World::blank(22);
        let scout = world.spawn_ant(AntSpawn {
            caste: Caste::Scout,
            ..AntSpawn::worker(40.5, 64.5)
        });
        let worker = world.spawn_ant(AntSpawn::worker(40.5, 64.5));
        world.set_trail(Trail::Food, tile(51, 75), 1.0);

        let _ = tick(&mut world);

        let scout = query::ant(&world, scout).expect("scout exists");
        let worker = query::ant(&world, worker).expect("worker exists");
        assert!(heading_distance(scout.heading, FRAC_PI_4) < 0.11);
        assert!(heading_distance(worker.heading, 0.0) < 0.11);
    }

    #[test]
    fn searching_ants_lay_home_trail() {
        let mut world = World::blank(8);
        let _ = world.spawn_ant(AntSpawn {
            wander_timer: 10,
            ..AntSpawn::worker(30.5, 30.5)
        });

        let _ = tick(&mut world);

        assert!(query::trail(&world, Trail::Home).total() > 0.0);
        assert_eq!(query::trail(&world, Trail::Food).total(), 0.0);
    }

    #[test]
    fn upgrade_purchase_deducts_cost_and_raises_level() {
        let mut world = World::blank(9);
        world.set_colony_food(25.0);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::PurchaseUpgrade {
                lever: UpgradeLever::AntSpeed,
            },
            &mut events,
        );

        assert_eq!(query::upgrades(&world).level(UpgradeLever::AntSpeed), 1);
        assert_eq!(query::colony_food(&world), 15.0);
        assert_eq!(
            events,
            vec![Event::UpgradePurchased {
                lever: UpgradeLever::AntSpeed,
                level: 1,
                cost: 10,
            }]
        );
    }

    #[test]
    fn unaffordable_purchase_is_rejected_without_change() {
        let mut world = World::blank(10);
        world.set_colony_food(14.0);
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::PurchaseUpgrade {
                lever: UpgradeLever::SensorRange,
            },
            &mut events,
        );

        assert_eq!(query::upgrades(&world), Upgrades::default());
        assert_eq!(query::colony_food(&world), 14.0);
        assert_eq!(
            events,
            vec![Event::UpgradeRejected {
                lever: UpgradeLever::SensorRange,
                reason: PurchaseError::InsufficientFood,
            }]
        );
    }

    #[test]
    fn maxed_lever_is_rejected() {
        let mut world = World::blank(11);
        world.set_colony_food(1.0e6);
        let mut events = Vec::new();
        for _ in 0..5 {
            apply(
                &mut world,
                Command::PurchaseUpgrade {
                    lever: UpgradeLever::DiggingSpeed,
                },
                &mut events,
            );
        }
        let food = query::colony_food(&world);
        events.clear();

        apply(
            &mut world,
            Command::PurchaseUpgrade {
                lever: UpgradeLever::DiggingSpeed,
            },
            &mut events,
        );

        assert_eq!(query::upgrades(&world).level(UpgradeLever::DiggingSpeed), 5);
        assert_eq!(query::colony_food(&world), food);
        assert_eq!(
            events,
            vec![Event::UpgradeRejected {
                lever: UpgradeLever::DiggingSpeed,
                reason: PurchaseError::MaxLevel,
            }]
        );
    }

    #[test]
    fn queen_lays_an_egg_of_the_production_caste() {
        let mut world = World::blank(12);
        world.set_colony_food(12.0);
        let mut events = Vec::new();
        apply(
            &mut world,
            Command::SetProductionCaste {
                caste: Caste::Scout,
            },
            &mut events,
        );
        assert_eq!(
            events,
            vec![Event::ProductionCasteChanged {
                caste: Caste::Scout
            }]
        );

        let events = tick(&mut world);

        let brood = query::brood(&world);
        assert_eq!(brood.len(), 1);
        assert_eq!(brood[0].stage, BroodStage::Egg);
        assert_eq!(brood[0].caste, Caste::Scout);
        assert!((query::colony_food(&world) - 2.0).abs() < 1e-6);
        let distance = (brood[0].x - 64.5).hypot(brood[0].y - 64.5);
        assert!(distance <= config::EGG_SCATTER_RADIUS + 1e-4);
        assert!(events.contains(&Event::EggLaid {
            brood: brood[0].id,
            caste: Caste::Scout,
        }));
    }

    #[test]
    fn hatching_pupa_becomes_an_ant_at_the_nest() {
        let mut world = World::blank(13);
        let progress = 1.0 - 0.5 / config::PUPA_DURATION as f32;
        let _ = world.add_brood(BroodStage::Pupa, Caste::Soldier, progress);

        let events = tick(&mut world);

        assert!(query::brood(&world).is_empty());
        let ants = query::ants(&world);
        assert_eq!(ants.len(), 1);
        assert_eq!(ants[0].caste, Caste::Soldier);
        assert!((ants[0].x - 64.5).abs() < 1e-6 && (ants[0].y - 64.5).abs() < 1e-6);
        assert!(events.contains(&Event::AntHatched {
            ant: ants[0].id,
            caste: Caste::Soldier,
        }));
    }

    #[test]
    fn egg_at_ninety_nine_percent_hatches_into_a_larva_next_tick() {
        let mut world = World::blank(16);
        let egg = world.add_brood(BroodStage::Egg, Caste::Worker, 0.99);

        let events = tick(&mut world);

        let brood = query::brood(&world);
        assert_eq!(brood.len(), 1);
        assert_eq!(brood[0].stage, BroodStage::Larva);
        assert_eq!(brood[0].progress, 0.0);
        assert!(events.contains(&Event::BroodMatured {
            brood: egg,
            stage: BroodStage::Larva,
        }));
    }

    #[test]
    fn direct_spawn_policy_skips_the_brood() {
        let mut world = World::blank(14).with_growth_policy(GrowthPolicy::DirectSpawn);
        world.set_colony_food(10.0);

        let _ = tick(&mut world);

        assert!(query::brood(&world).is_empty());
        assert_eq!(query::population(&world, Caste::Worker), 1);
        assert_eq!(query::colony_food(&world), 0.0);
    }

    #[test]
    fn tick_counter_advances_once_per_tick() {
        let mut world = World::blank(15);
        let events = tick(&mut world);
        assert_eq!(events.last(), Some(&Event::TimeAdvanced { tick: 1 }));
        let _ = tick(&mut world);
        assert_eq!(query::tick(&world), 2);
    }

    #[test]
    fn state_and_snapshot_agree() {
        let mut world = World::new(Some(21));
        for _ in 0..10 {
            let _ = tick(&mut world);
        }

        let state = query::state(&world);
        let snapshot = query::snapshot(&world);

        assert_eq!(state.food_quantity.len(), state.dims.len());
        assert_eq!(state.nest, (64, 64));
        assert_eq!(state.into_snapshot(), snapshot);
    }
}
