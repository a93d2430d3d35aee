//! Collision world the replay traces against: static map blocks plus one
//! kinematic box per player or corpse in the latest snapshot.

use std::collections::HashMap;

use glam::Vec3;
use log::{debug, trace};
use rapier3d::prelude::*;
use ricochet::{Collision, Contents, EntityNum, EntityState, EntityType, SurfaceFlags};
use ricochet::{Trace, TraceHit, TraceQuery};
use serde::{Deserialize, Serialize};

pub const PLAYER_MINS: Vec3 = Vec3::new(-16.0, -16.0, -24.0);
pub const PLAYER_MAXS: Vec3 = Vec3::new(16.0, 16.0, 40.0);

/// An axis-aligned box of the map, solid or liquid depending on `contents`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBlock {
    pub mins: Vec3,
    pub maxs: Vec3,
    #[serde(default = "solid")]
    pub contents: Contents,
    #[serde(default)]
    pub surface: SurfaceFlags,
}

fn solid() -> Contents {
    Contents::SOLID
}

/// What a collider stands for, packed into its `user_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ColliderTag {
    contents: Contents,
    surface: SurfaceFlags,
    entity: Option<EntityNum>,
}

impl ColliderTag {
    fn to_user_data(self) -> u128 {
        let entity = self.entity.map_or(0, |num| u128::from(num) + 1);
        u128::from(self.contents.bits())
            | (u128::from(self.surface.bits()) << 32)
            | (entity << 64)
    }

    fn from_user_data(data: u128) -> Self {
        let entity = ((data >> 64) & 0x1ffff) as u32;
        Self {
            contents: Contents::from_bits_truncate(data as u32),
            surface: SurfaceFlags::from_bits_truncate((data >> 32) as u32),
            entity: entity.checked_sub(1).map(|num| num as EntityNum),
        }
    }
}

struct Body {
    handle: RigidBodyHandle,
    kind: EntityType,
}

pub struct ClientWorld {
    pipeline: PhysicsPipeline,
    integration_parameters: IntegrationParameters,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    entities: HashMap<EntityNum, Body>,
}

impl Default for ClientWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl ClientWorld {
    pub fn new() -> Self {
        Self {
            pipeline: PhysicsPipeline::new(),
            integration_parameters: IntegrationParameters::default(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            entities: HashMap::new(),
        }
    }

    pub fn from_blocks(blocks: &[MapBlock]) -> Self {
        let mut world = Self::new();
        for block in blocks {
            world.add_block(block);
        }
        world.refresh();
        world
    }

    pub fn add_block(&mut self, block: &MapBlock) -> ColliderHandle {
        let center = (block.mins + block.maxs) * 0.5;
        let half = ((block.maxs - block.mins) * 0.5).abs();
        let tag = ColliderTag {
            contents: block.contents,
            surface: block.surface,
            entity: None,
        };
        let collider = ColliderBuilder::cuboid(half.x, half.y, half.z)
            .translation(Vector::new(center.x, center.y, center.z))
            .user_data(tag.to_user_data())
            .build();
        self.colliders.insert(collider)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Moves the entity boxes to the snapshot's positions, adding boxes for
    /// new players and corpses and dropping those no longer present.
    pub fn sync_entities(&mut self, states: &[EntityState]) {
        let mut seen = Vec::with_capacity(states.len());
        for state in states {
            let contents = match state.kind {
                EntityType::Player => Contents::BODY,
                EntityType::Corpse => Contents::CORPSE,
                _ => continue,
            };
            seen.push(state.number);

            let stale = self
                .entities
                .get(&state.number)
                .is_some_and(|body| body.kind != state.kind);
            if stale {
                self.remove_entity(state.number);
            }

            match self.entities.get(&state.number) {
                Some(body) => self.set_body_position(body.handle, state.origin),
                None => {
                    let handle = self.add_entity_box(state.number, state.origin, contents);
                    self.entities.insert(
                        state.number,
                        Body {
                            handle,
                            kind: state.kind,
                        },
                    );
                }
            }
        }

        let gone: Vec<EntityNum> = self
            .entities
            .keys()
            .copied()
            .filter(|num| !seen.contains(num))
            .collect();
        for num in gone {
            self.remove_entity(num);
        }

        self.refresh();
    }

    fn add_entity_box(&mut self, num: EntityNum, origin: Vec3, contents: Contents) -> RigidBodyHandle {
        let body = RigidBodyBuilder::kinematic_position_based()
            .translation(Vector::new(origin.x, origin.y, origin.z))
            .build();
        let handle = self.bodies.insert(body);

        let center = (PLAYER_MINS + PLAYER_MAXS) * 0.5;
        let half = (PLAYER_MAXS - PLAYER_MINS) * 0.5;
        let tag = ColliderTag {
            contents,
            surface: SurfaceFlags::FLESH,
            entity: Some(num),
        };
        let collider = ColliderBuilder::cuboid(half.x, half.y, half.z)
            .translation(Vector::new(center.x, center.y, center.z))
            .user_data(tag.to_user_data())
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        debug!("entity {num} enters the collision world");
        handle
    }

    fn remove_entity(&mut self, num: EntityNum) {
        let Some(body) = self.entities.remove(&num) else {
            return;
        };
        self.bodies.remove(
            body.handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn set_body_position(&mut self, handle: RigidBodyHandle, position: Vec3) {
        if let Some(body) = self.bodies.get_mut(handle) {
            let current_rot = *body.rotation();
            let new_pose =
                Pose::from_parts(Vector::new(position.x, position.y, position.z), current_rot);
            body.set_position(new_pose, true);
        }
    }

    /// Runs one zero-gravity step so the broad phase sees every change.
    pub fn refresh(&mut self) {
        self.pipeline.step(
            Vector::new(0.0, 0.0, 0.0),
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }
}

impl Collision for ClientWorld {
    /// Sweeps the centre of the query box; every collider is axis-aligned
    /// and entity boxes already carry the player extents.
    fn trace(&self, query: &TraceQuery) -> Trace {
        let offset = (query.mins + query.maxs) * 0.5;
        let start = query.start + offset;
        let delta = query.end - query.start;
        if delta.length_squared() <= f32::EPSILON {
            return Trace::miss(query.end);
        }

        let accepts = |_handle: ColliderHandle, collider: &Collider| {
            let tag = ColliderTag::from_user_data(collider.user_data);
            tag.contents.intersects(query.mask)
                && (tag.entity.is_none() || tag.entity != query.ignore)
        };
        let pipeline = self.broad_phase.as_query_pipeline(
            self.narrow_phase.query_dispatcher(),
            &self.bodies,
            &self.colliders,
            QueryFilter::default().predicate(&accepts),
        );

        let ray = Ray::new(
            Vector::new(start.x, start.y, start.z),
            Vector::new(delta.x, delta.y, delta.z),
        );
        let Some((handle, hit)) = pipeline.cast_ray_and_get_normal(&ray, 1.0, true) else {
            return Trace::miss(query.end);
        };

        let tag = self
            .colliders
            .get(handle)
            .map(|collider| ColliderTag::from_user_data(collider.user_data))
            .unwrap_or_default();
        let fraction = hit.time_of_impact.clamp(0.0, 1.0);
        let result = Trace {
            fraction,
            end_pos: query.start + delta * fraction,
            normal: Vec3::new(hit.normal.x, hit.normal.y, hit.normal.z),
            surface: tag.surface,
            contents: tag.contents,
            hit: tag.entity.map_or(TraceHit::World, TraceHit::Entity),
        };
        trace!("trace {} -> {} hit {:?} at {fraction:.3}", query.start, query.end, result.hit);
        result
    }

    fn point_contents(&self, point: Vec3) -> Contents {
        self.colliders
            .iter()
            .filter(|(_, collider)| {
                let aabb = collider.compute_aabb();
                (aabb.mins.x..=aabb.maxs.x).contains(&point.x)
                    && (aabb.mins.y..=aabb.maxs.y).contains(&point.y)
                    && (aabb.mins.z..=aabb.maxs.z).contains(&point.z)
            })
            .fold(Contents::empty(), |acc, (_, collider)| {
                acc | ColliderTag::from_user_data(collider.user_data).contents
            })
    }
}
