//! Parcel kinematics, ground impact and target hits.
//!
//! Parcels move at the constant velocity they were spawned with (the gravity
//! vector; it is not accumulated). Each [`Simulation::step`] moves every falling
//! parcel, lands it if it reached the ground, and otherwise tests it against
//! the standing targets in order. The first target within reach is destroyed
//! together with the parcel and the score goes up by one.

use cgmath::{InnerSpace, Vector3};

use crate::{
    config::PhysicsConfig,
    data_structures::{model::MeshId, terrain::HeightField},
    error::SimulationError,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParcelState {
    Falling,
    Landed,
    Hit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TargetState {
    Standing,
    Destroyed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParcelId(pub usize);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetId(pub usize);

fn check_radius(radius: f32) -> Result<f32, SimulationError> {
    if radius.is_finite() && radius >= 0.0 {
        Ok(radius)
    } else {
        Err(SimulationError::InvalidRadius(radius))
    }
}

fn check_finite(what: &'static str, v: Vector3<f32>) -> Result<Vector3<f32>, SimulationError> {
    if v.x.is_finite() && v.y.is_finite() && v.z.is_finite() {
        Ok(v)
    } else {
        Err(SimulationError::NonFinite {
            what,
            x: v.x,
            y: v.y,
            z: v.z,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Parcel {
    pub position: Vector3<f32>,
    pub velocity: Vector3<f32>,
    pub mesh: MeshId,
    radius: f32,
    state: ParcelState,
}

impl Parcel {
    pub fn new(
        position: Vector3<f32>,
        velocity: Vector3<f32>,
        mesh: MeshId,
        radius: f32,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            position: check_finite("parcel position", position)?,
            velocity: check_finite("parcel velocity", velocity)?,
            mesh,
            radius: check_radius(radius)?,
            state: ParcelState::Falling,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn state(&self) -> ParcelState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ParcelState::Falling
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Target {
    pub position: Vector3<f32>,
    pub body: MeshId,
    pub roof: MeshId,
    radius: f32,
    state: TargetState,
}

impl Target {
    pub fn new(
        position: Vector3<f32>,
        body: MeshId,
        roof: MeshId,
        radius: f32,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            position: check_finite("target position", position)?,
            body,
            roof,
            radius: check_radius(radius)?,
            state: TargetState::Standing,
        })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn state(&self) -> TargetState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == TargetState::Standing
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    pub parcel: ParcelId,
    pub target: TargetId,
}

/// What changed during one [`Simulation::step`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    pub landed: Vec<ParcelId>,
    pub hits: Vec<Hit>,
}

impl StepReport {
    pub fn is_empty(&self) -> bool {
        self.landed.is_empty() && self.hits.is_empty()
    }
}

/// Owns parcels, targets and the score. Entities are never removed, so their
/// ids stay valid for the whole run.
#[derive(Debug, Default)]
pub struct Simulation {
    config: PhysicsConfig,
    parcels: Vec<Parcel>,
    targets: Vec<Target>,
    score: u32,
}

impl Simulation {
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            parcels: Vec::new(),
            targets: Vec::new(),
            score: 0,
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Spawns a parcel with the configured gravity and radius.
    pub fn spawn_parcel(&mut self, at: Vector3<f32>, mesh: MeshId) -> Result<ParcelId, SimulationError> {
        let parcel = Parcel::new(at, self.config.gravity, mesh, self.config.parcel_radius)?;
        Ok(self.insert_parcel(parcel))
    }

    pub fn insert_parcel(&mut self, parcel: Parcel) -> ParcelId {
        self.parcels.push(parcel);
        ParcelId(self.parcels.len() - 1)
    }

    /// Places a target with the configured radius.
    pub fn add_target(
        &mut self,
        at: Vector3<f32>,
        body: MeshId,
        roof: MeshId,
    ) -> Result<TargetId, SimulationError> {
        let target = Target::new(at, body, roof, self.config.target_radius)?;
        Ok(self.insert_target(target))
    }

    pub fn insert_target(&mut self, target: Target) -> TargetId {
        self.targets.push(target);
        TargetId(self.targets.len() - 1)
    }

    pub fn parcel(&self, id: ParcelId) -> Option<&Parcel> {
        self.parcels.get(id.0)
    }

    pub fn target(&self, id: TargetId) -> Option<&Target> {
        self.targets.get(id.0)
    }

    pub fn parcels(&self) -> &[Parcel] {
        &self.parcels
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn active_parcels(&self) -> impl Iterator<Item = &Parcel> {
        self.parcels.iter().filter(|p| p.is_active())
    }

    pub fn standing_targets(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter().filter(|t| t.is_active())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Advances every falling parcel by `dt` seconds. A negative or
    /// non-finite `dt` leaves the world untouched.
    pub fn step(&mut self, dt: f32, ground: &HeightField) -> StepReport {
        let mut report = StepReport::default();
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("Ignoring simulation step with dt = {}", dt);
            return report;
        }
        // Disjoint borrows: parcels are mutated while targets are scanned.
        let Self {
            parcels,
            targets,
            score,
            ..
        } = self;

        for (parcel_idx, parcel) in parcels.iter_mut().enumerate() {
            match parcel.state {
                ParcelState::Falling => {}
                ParcelState::Landed | ParcelState::Hit => continue,
            }
            parcel.position += parcel.velocity * dt;

            let elevation = ground.sample(parcel.position.x, parcel.position.z);
            if parcel.position.y <= elevation {
                parcel.state = ParcelState::Landed;
                log::debug!(
                    "parcel {} landed at ({:.2}, {:.2}, {:.2})",
                    parcel_idx,
                    parcel.position.x,
                    parcel.position.y,
                    parcel.position.z
                );
                report.landed.push(ParcelId(parcel_idx));
                continue;
            }

            let hit = targets.iter_mut().enumerate().find(|(_, target)| {
                target.is_active()
                    && (parcel.position - target.position).magnitude() < parcel.radius + target.radius
            });
            if let Some((target_idx, target)) = hit {
                target.state = TargetState::Destroyed;
                parcel.state = ParcelState::Hit;
                *score += 1;
                log::info!("HIT! Score: {}", score);
                report.hits.push(Hit {
                    parcel: ParcelId(parcel_idx),
                    target: TargetId(target_idx),
                });
            }
        }
        report
    }
}
