//! Brood lifecycle: eggs, feeding larvae and hatching pupae.

use std::f32::consts::TAU;

use colony_core::{config, BroodId, BroodSnapshot, BroodStage, Caste, Event, GridDims};
use rand::Rng;

/// Unhatched colony member progressing towards a new ant.
#[derive(Clone, Debug)]
pub(crate) struct BroodItem {
    pub(crate) id: BroodId,
    pub(crate) stage: BroodStage,
    pub(crate) caste: Caste,
    pub(crate) progress: f32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl BroodItem {
    pub(crate) fn egg(id: BroodId, caste: Caste, x: f32, y: f32) -> Self {
        Self {
            id,
            stage: BroodStage::Egg,
            caste,
            progress: 0.0,
            x,
            y,
        }
    }

    pub(crate) fn snapshot(&self) -> BroodSnapshot {
        BroodSnapshot {
            id: self.id,
            stage: self.stage,
            caste: self.caste,
            progress: self.progress,
            x: self.x,
            y: self.y,
        }
    }
}

/// Advances every brood item by one tick.
///
/// Larvae draw their food from `colony_food` and stall while the stockpile
/// cannot cover a meal. Returns the castes of pupae that hatched this tick in
/// brood order; the caller turns them into ants.
pub(crate) fn advance(
    brood: &mut Vec<BroodItem>,
    colony_food: &mut f32,
    out_events: &mut Vec<Event>,
) -> Vec<Caste> {
    let mut hatched = Vec::new();
    brood.retain_mut(|item| match item.stage {
        BroodStage::Egg => {
            item.progress += 1.0 / config::EGG_DURATION as f32;
            if item.progress >= 1.0 {
                mature(item, BroodStage::Larva, out_events);
            }
            true
        }
        BroodStage::Larva => {
            if *colony_food >= config::LARVA_FOOD_PER_TICK {
                *colony_food -= config::LARVA_FOOD_PER_TICK;
                item.progress += 1.0 / config::LARVA_DURATION as f32;
                if item.progress >= 1.0 {
                    mature(item, BroodStage::Pupa, out_events);
                }
            }
            true
        }
        BroodStage::Pupa => {
            item.progress += 1.0 / config::PUPA_DURATION as f32;
            if item.progress >= 1.0 {
                hatched.push(item.caste);
                false
            } else {
                true
            }
        }
    });
    hatched
}

fn mature(item: &mut BroodItem, stage: BroodStage, out_events: &mut Vec<Event>) {
    item.stage = stage;
    item.progress = 0.0;
    out_events.push(Event::BroodMatured {
        brood: item.id,
        stage,
    });
}

/// Picks a laying position within the scatter radius of `centre`, kept inside the grid.
pub(crate) fn scatter_position<R: Rng>(
    centre: (f32, f32),
    dims: GridDims,
    rng: &mut R,
) -> (f32, f32) {
    let angle = rng.gen::<f32>() * TAU;
    let radius = rng.gen::<f32>() * config::EGG_SCATTER_RADIUS;
    let x = centre.0 + angle.cos() * radius;
    let y = centre.1 + angle.sin() * radius;
    (clamp_axis(x, dims.width()), clamp_axis(y, dims.height()))
}

fn clamp_axis(value: f32, extent: u32) -> f32 {
    let upper = (extent as f32 - 0.001).max(0.0);
    value.clamp(0.0, upper)
}
