//! Ant agents: the forage/return/dig state machine and trail steering.

use std::f32::consts::{PI, TAU};

use colony_core::{
    config, AntId, AntSnapshot, AntState, Caste, Event, TileIndex, TileKind, UpgradeLever,
    Upgrades,
};
use rand::Rng;

use crate::{
    pheromones::{Trail, Trails},
    terrain::Terrain,
};

/// Mutable agent record owned by the world.
#[derive(Clone, Debug)]
pub(crate) struct Ant {
    pub(crate) id: AntId,
    pub(crate) caste: Caste,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) heading: f32,
    pub(crate) state: AntState,
    pub(crate) has_food: bool,
    pub(crate) wander_timer: u32,
    pub(crate) dig_target: Option<TileIndex>,
}

impl Ant {
    /// Creates a searching ant with an empty wander timer.
    pub(crate) fn new(id: AntId, caste: Caste, x: f32, y: f32, heading: f32) -> Self {
        Self {
            id,
            caste,
            x,
            y,
            heading: normalize_heading(heading),
            state: AntState::Searching,
            has_food: false,
            wander_timer: 0,
            dig_target: None,
        }
    }

    pub(crate) fn snapshot(&self) -> AntSnapshot {
        AntSnapshot {
            id: self.id,
            caste: self.caste,
            x: self.x,
            y: self.y,
            heading: self.heading,
            state: self.state,
            has_food: self.has_food,
            wander_timer: self.wander_timer,
            dig_target: self.dig_target,
        }
    }

    fn turn(&mut self, delta: f32) {
        self.heading = normalize_heading(self.heading + delta);
    }

    fn reverse(&mut self) {
        self.turn(PI);
    }
}

/// Upgrade-derived parameters shared by every ant during one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct AntTuning {
    speed: f32,
    sensor_distance: f32,
    drop_strength: f32,
    dig_damage: f32,
    scout_speed: f32,
    soldier_strength: f32,
}

impl AntTuning {
    pub(crate) fn from_upgrades(upgrades: &Upgrades) -> Self {
        Self {
            speed: upgrades.value(UpgradeLever::AntSpeed),
            sensor_distance: upgrades.value(UpgradeLever::SensorRange),
            drop_strength: upgrades.value(UpgradeLever::PheromoneDrop),
            dig_damage: config::DIGGING_BASE_DAMAGE * upgrades.value(UpgradeLever::DiggingSpeed),
            scout_speed: upgrades.value(UpgradeLever::ScoutSpeed),
            soldier_strength: upgrades.value(UpgradeLever::SoldierStrength),
        }
    }

    fn speed(&self, caste: Caste) -> f32 {
        match caste {
            Caste::Worker => self.speed,
            Caste::Scout => self.speed * config::SCOUT_SPEED_FACTOR * self.scout_speed,
            Caste::Soldier => self.speed * config::SOLDIER_SPEED_FACTOR,
        }
    }

    fn sensor_distance(&self, caste: Caste) -> f32 {
        match caste {
            Caste::Scout => self.sensor_distance * config::SCOUT_SPEED_FACTOR * self.scout_speed,
            Caste::Worker | Caste::Soldier => self.sensor_distance,
        }
    }

    fn dig_damage(&self, caste: Caste) -> f32 {
        match caste {
            Caste::Soldier => self.dig_damage * self.soldier_strength,
            Caste::Worker | Caste::Scout => self.dig_damage,
        }
    }
}

/// World state an ant update may touch.
pub(crate) struct AntContext<'a> {
    pub(crate) terrain: &'a mut Terrain,
    pub(crate) trails: &'a mut Trails,
    pub(crate) colony_food: &'a mut f32,
    pub(crate) tuning: AntTuning,
}

/// Runs one behaviour step for every ant in identifier order.
pub(crate) fn update_ants<R: Rng>(
    ants: &mut [Ant],
    context: &mut AntContext<'_>,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) {
    for ant in ants.iter_mut() {
        if ant.state == AntState::Digging {
            dig(ant, context, out_events);
        } else {
            forage(ant, context, rng, out_events);
        }
    }
}

fn dig(ant: &mut Ant, context: &mut AntContext<'_>, out_events: &mut Vec<Event>) {
    let Some(target) = ant.dig_target else {
        stop_digging(ant);
        return;
    };
    if context.terrain.kind(target) != TileKind::Wall {
        stop_digging(ant);
        return;
    }

    let damage = context.tuning.dig_damage(ant.caste);
    if context.terrain.damage_wall(target, damage) {
        out_events.push(Event::WallBreached {
            ant: ant.id,
            tile: target,
        });
        stop_digging(ant);
    }
}

fn stop_digging(ant: &mut Ant) {
    ant.state = AntState::Searching;
    ant.dig_target = None;
}

fn forage<R: Rng>(
    ant: &mut Ant,
    context: &mut AntContext<'_>,
    rng: &mut R,
    out_events: &mut Vec<Event>,
) {
    let dims = context.terrain.dims();
    let here = dims.index(ant.x, ant.y);
    let laid = if ant.state == AntState::Returning {
        Trail::Food
    } else {
        Trail::Home
    };
    context
        .trails
        .field_mut(laid)
        .deposit(here, context.tuning.drop_strength);

    ant.wander_timer = ant.wander_timer.saturating_sub(1);
    if ant.wander_timer == 0 {
        steer(ant, context);
        ant.wander_timer = rng.gen_range(0..config::WANDER_TIMER_SPAN);
    }

    ant.turn((rng.gen::<f32>() - 0.5) * config::WANDER_STRENGTH);

    let speed = context.tuning.speed(ant.caste);
    let next_x = ant.x + ant.heading.cos() * speed;
    let next_y = ant.y + ant.heading.sin() * speed;
    match dims.checked_index(next_x, next_y) {
        None => ant.reverse(),
        Some(target) if context.terrain.kind(target) == TileKind::Wall => {
            let may_dig = ant.state == AntState::Searching && ant.caste.can_dig();
            if may_dig && rng.gen_bool(config::DIG_CHANCE) {
                ant.state = AntState::Digging;
                ant.dig_target = Some(target);
                out_events.push(Event::DiggingStarted {
                    ant: ant.id,
                    tile: target,
                });
            } else {
                ant.reverse();
            }
        }
        Some(_) => {
            ant.x = next_x;
            ant.y = next_y;
        }
    }

    if ant.state == AntState::Digging {
        return;
    }

    let current = dims.index(ant.x, ant.y);
    match (ant.state, context.terrain.kind(current)) {
        (AntState::Searching, TileKind::Food) if ant.caste.can_forage() => {
            if let Some(pickup) = context.terrain.take_food(current) {
                ant.has_food = true;
                ant.state = AntState::Returning;
                ant.reverse();
                out_events.push(Event::FoodCollected {
                    ant: ant.id,
                    tile: current,
                    remaining: pickup.remaining,
                });
                if pickup.depleted {
                    out_events.push(Event::FoodTileDepleted { tile: current });
                }
            }
        }
        (AntState::Returning, TileKind::Nest) => {
            ant.has_food = false;
            ant.state = AntState::Searching;
            *context.colony_food += 1.0;
            ant.reverse();
            out_events.push(Event::FoodDelivered { ant: ant.id });
        }
        _ => {}
    }
}

/// Samples the trails ahead of the ant and turns towards the strongest reading.
fn steer(ant: &mut Ant, context: &AntContext<'_>) {
    let distance = context.tuning.sensor_distance(ant.caste);
    let home = context.trails.field(Trail::Home);
    let (target, avoid_home) = match ant.state {
        AntState::Returning => (home, false),
        AntState::Searching | AntState::Digging => (context.trails.field(Trail::Food), true),
    };

    let weight = |offset: f32| {
        let angle = ant.heading + offset;
        let x = ant.x + angle.cos() * distance;
        let y = ant.y + angle.sin() * distance;
        let mut value = target.sample(x, y);
        if avoid_home {
            value -= config::HOME_TRAIL_AVOIDANCE * home.sample(x, y);
        }
        value
    };

    let forward = weight(0.0);
    let left = weight(-config::SENSOR_SPREAD);
    let right = weight(config::SENSOR_SPREAD);
    if let Some(turn) = choose_turn(forward, left, right) {
        ant.turn(turn);
    }
}

/// Picks the heading change for three sensor weights.
///
/// Returns `None` when every sensor reads exactly zero. Ties favour going
/// straight, then the left sensor.
fn choose_turn(forward: f32, left: f32, right: f32) -> Option<f32> {
    if forward == 0.0 && left == 0.0 && right == 0.0 {
        return None;
    }
    if forward >= left && forward >= right {
        Some(0.0)
    } else if left >= right {
        Some(-config::SENSOR_SPREAD)
    } else {
        Some(config::SENSOR_SPREAD)
    }
}

/// Wraps an angle into `[0, 2π)`.
pub(crate) fn normalize_heading(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
