use log::warn;

use super::{ContinuousState, EntityEffects, EntityNum, EntityState, MAX_ENTITIES, Team};

#[derive(Debug, Clone, Default)]
pub struct ClientEntity {
    pub current: EntityState,
    pub fx: ContinuousState,
}

/// Every entity slot, allocated once and indexed by entity number.
#[derive(Debug, Clone)]
pub struct EntityArena {
    slots: Vec<ClientEntity>,
}

impl Default for EntityArena {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityArena {
    pub fn new() -> Self {
        let slots = (0..MAX_ENTITIES)
            .map(|number| ClientEntity {
                current: EntityState {
                    number: number as EntityNum,
                    ..Default::default()
                },
                fx: ContinuousState::default(),
            })
            .collect();

        Self { slots }
    }

    pub fn get(&self, num: EntityNum) -> Option<&ClientEntity> {
        self.slots.get(num as usize)
    }

    pub fn get_mut(&mut self, num: EntityNum) -> Option<&mut ClientEntity> {
        self.slots.get_mut(num as usize)
    }

    /// Stores a freshly received state. Out-of-range numbers are dropped.
    pub fn update(&mut self, state: &EntityState) -> bool {
        match self.slots.get_mut(state.number as usize) {
            Some(slot) => {
                slot.current = *state;
                true
            }
            None => {
                warn!("dropping state of out-of-range entity {}", state.number);
                false
            }
        }
    }

    pub fn team(&self, num: EntityNum) -> Team {
        self.get(num).map_or(Team::Spectator, |ent| ent.current.team)
    }

    pub fn effects(&self, num: EntityNum) -> EntityEffects {
        self.get(num)
            .map_or(EntityEffects::empty(), |ent| ent.current.effects)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClientEntity> {
        self.slots.iter()
    }

    pub fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.fx = ContinuousState::default();
        }
    }
}
