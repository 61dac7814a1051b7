use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub mod client;
pub mod server;

/// Connection id handed out by the relay. Doubles as the player id.
#[derive(Serialize, Deserialize, PartialEq, Debug, Eq, Hash, Clone, Copy, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Entity(pub u64);

/// What a client reports about itself every tick.
#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub x: f32,
    pub y: f32,
    pub vel_x: f32,
    pub vel_y: f32,
    #[serde(default)]
    pub jumping: bool,
}

impl PlayerState {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ..Default::default()
        }
    }
}

/// Every connected player's last known state, replaced as a whole on receipt.
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug, Default)]
#[serde(transparent)]
pub struct Snapshot(pub BTreeMap<Entity, PlayerState>);

impl Snapshot {
    pub fn get(&self, entity: Entity) -> Option<&PlayerState> {
        self.0.get(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.0.contains_key(&entity)
    }

    pub fn insert(&mut self, entity: Entity, state: PlayerState) -> Option<PlayerState> {
        self.0.insert(entity, state)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<PlayerState> {
        self.0.remove(&entity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &PlayerState)> {
        self.0.iter().map(|(entity, state)| (*entity, state))
    }
}
