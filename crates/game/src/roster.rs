use crate::entity::{EntityNum, MAX_CLIENTS};

/// Display names of the connected players, by client slot.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    names: Vec<Option<String>>,
}

impl Roster {
    pub fn set_name(&mut self, slot: usize, name: impl Into<String>) {
        if slot >= MAX_CLIENTS {
            return;
        }
        if self.names.len() <= slot {
            self.names.resize(slot + 1, None);
        }
        self.names[slot] = Some(name.into());
    }

    pub fn clear_slot(&mut self, slot: usize) {
        if let Some(name) = self.names.get_mut(slot) {
            *name = None;
        }
    }

    /// Name of the player owning entity `num`.
    pub fn name(&self, num: EntityNum) -> Option<&str> {
        let slot = (num as usize).checked_sub(1)?;
        self.names.get(slot)?.as_deref()
    }
}
