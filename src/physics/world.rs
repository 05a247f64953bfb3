use std::cmp::Ordering;

use glam::{IVec3, Vec2, Vec3};

use crate::config::PhysicsConfig;
use crate::physics::actor::Actor;
use crate::world::core::World;

/// Substep length of the fixed-timestep solver, in seconds.
pub const TIME_STEP: f32 = 1.0 / 200.0;

/// One actor-vs-block penetration found by the narrow phase. `point` is the
/// closest point of the block's unit cube to the cylinder axis; pushing the
/// actor `overlap` along `normal` separates the pair.
#[derive(Debug, Clone, Copy)]
struct Contact {
    point: Vec3,
    normal: Vec3,
    overlap: f32,
}

/// Fixed-timestep collision solver for one actor against the voxel grid.
/// Render-rate deltas accumulate and are consumed in whole substeps, so the
/// simulation advances identically regardless of frame pacing; any remainder
/// below one substep carries over to the next update.
pub struct PhysicsWorld {
    gravity: f32,
    accumulator: f32,
}

impl PhysicsWorld {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            gravity: config.gravity,
            accumulator: 0.0,
        }
    }

    /// Time banked toward the next substep, in `[0, TIME_STEP)`.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Advances the simulation by `dt` seconds of wall time. `input` is
    /// steering in the actor's locomotion frame, each axis in [-1, 1].
    ///
    /// Each substep overwrites the horizontal velocity from input, applies
    /// gravity, integrates, and resolves penetrations. `on_ground` reports
    /// whether any substep of this update touched ground; an update too short
    /// to run a substep leaves it unchanged.
    pub fn update(&mut self, dt: f32, input: Vec2, actor: &mut Actor, world: &World) {
        self.accumulator += dt;
        let mut stepped = false;
        let mut grounded = false;

        while self.accumulator >= TIME_STEP {
            self.accumulator -= TIME_STEP;
            stepped = true;

            actor.velocity.x = input.x * actor.move_speed;
            actor.velocity.z = input.y * actor.move_speed;
            actor.velocity.y -= self.gravity * TIME_STEP;
            actor.position += actor.world_velocity() * TIME_STEP;

            grounded |= self.detect_and_resolve(actor, world);
        }

        if stepped {
            actor.on_ground = grounded;
        }
    }

    fn detect_and_resolve(&self, actor: &mut Actor, world: &World) -> bool {
        let candidates = self.broad_phase(actor, world);
        let (contacts, grounded) = self.narrow_phase(&candidates, actor);
        self.resolve(contacts, actor);
        grounded
    }

    /// Occupied cells in the axis-aligned integer box around the cylinder.
    /// Cells in unloaded chunks read as absent, so an actor over ungenerated
    /// terrain finds nothing to stand on.
    fn broad_phase(&self, actor: &Actor, world: &World) -> Vec<IVec3> {
        let reach = actor.radius.ceil() as i32;
        let center = actor.position.floor().as_ivec3();
        let min_y = (actor.position.y - actor.height / 2.0).floor() as i32;
        let max_y = (actor.position.y + actor.height / 2.0).ceil() as i32;

        let mut candidates = Vec::new();
        for x in (center.x - reach)..=(center.x + reach) {
            for y in min_y..=max_y {
                for z in (center.z - reach)..=(center.z + reach) {
                    let p = IVec3::new(x, y, z);
                    if world.block(p).map_or(false, |b| !b.is_empty()) {
                        candidates.push(p);
                    }
                }
            }
        }
        candidates
    }

    /// Tests each candidate cube against the cylinder via its closest point.
    /// Contacts resolve along whichever axis has the smaller overlap; a
    /// vertical contact marks the actor grounded.
    fn narrow_phase(&self, candidates: &[IVec3], actor: &Actor) -> (Vec<Contact>, bool) {
        let half_height = actor.height / 2.0;
        let mut contacts = Vec::new();
        let mut grounded = false;

        for &cell in candidates {
            let min = cell.as_vec3();
            let point = actor.position.clamp(min, min + Vec3::ONE);
            let dx = point.x - actor.position.x;
            let dy = point.y - actor.position.y;
            let dz = point.z - actor.position.z;

            let horizontal_sq = dx * dx + dz * dz;
            if dy.abs() >= half_height || horizontal_sq >= actor.radius * actor.radius {
                continue;
            }

            let overlap_y = half_height - dy.abs();
            let overlap_xz = actor.radius - horizontal_sq.sqrt();

            let (normal, overlap) = if overlap_y < overlap_xz {
                grounded = true;
                (Vec3::new(0.0, -dy.signum(), 0.0), overlap_y)
            } else {
                (Vec3::new(-dx, 0.0, -dz).normalize_or_zero(), overlap_xz)
            };

            contacts.push(Contact {
                point,
                normal,
                overlap,
            });
        }

        (contacts, grounded)
    }

    /// Applies contacts deepest-first. Earlier resolutions move the actor, so
    /// each contact is re-validated against the current position before its
    /// push-out; velocity into the surface is cancelled in world space.
    fn resolve(&self, mut contacts: Vec<Contact>, actor: &mut Actor) {
        contacts.sort_by(|a, b| {
            b.overlap
                .partial_cmp(&a.overlap)
                .unwrap_or(Ordering::Equal)
        });

        for contact in contacts {
            if !Self::point_in_cylinder(contact.point, actor) {
                continue;
            }

            actor.position += contact.normal * contact.overlap;

            let into_surface = actor.world_velocity().dot(contact.normal);
            actor.apply_world_delta_velocity(contact.normal * -into_surface);
        }
    }

    fn point_in_cylinder(point: Vec3, actor: &Actor) -> bool {
        let dx = point.x - actor.position.x;
        let dy = point.y - actor.position.y;
        let dz = point.z - actor.position.z;
        dy.abs() < actor.height / 2.0 && dx * dx + dz * dz < actor.radius * actor.radius
    }
}
