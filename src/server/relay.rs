//! Connection bookkeeping for the relay. Clients own their simulation, the
//! relay only stores the last state each one reported and fans it out.

use tilehop::map::MapAsset;
use tilehop::math::units::world::*;
use tilehop::network::client::Packet as ClientPacket;
use tilehop::network::server::Packet;
use tilehop::network::{Entity, PlayerState, Snapshot};

/// Where the relay's packets go.
pub trait Outbox {
    fn send(&mut self, entity: Entity, message: &Packet);
    fn broadcast(&mut self, message: &Packet);
}

pub struct Relay {
    players: Snapshot,
    map: MapAsset,
    spawn: Point2D,
    next_entity: u64,
}

impl Relay {
    pub fn new(map: MapAsset, spawn: Point2D) -> Self {
        Self {
            players: Snapshot::default(),
            map,
            spawn,
            next_entity: 0,
        }
    }

    pub fn players(&self) -> &Snapshot {
        &self.players
    }

    /// Ids are never reused within a run.
    pub fn next_entity(&mut self) -> Entity {
        let idx = self.next_entity;
        self.next_entity += 1;

        Entity(idx)
    }

    /// The entity must already be routable through `outbox`.
    pub fn join(&mut self, outbox: &mut impl Outbox, entity: Entity) {
        self.players.insert(entity, PlayerState::at(self.spawn.x, self.spawn.y));

        outbox.send(entity, &Packet::Welcome(entity));
        outbox.send(entity, &Packet::MapData(Box::new(self.map.clone())));
        self.publish(outbox);
    }

    pub fn handle_packet(
        &mut self,
        outbox: &mut impl Outbox,
        entity: Entity,
        packet: ClientPacket,
    ) {
        match packet {
            ClientPacket::Update(state) => self.update(outbox, entity, state),
        }
    }

    /// Last write wins, nothing is validated.
    pub fn update(&mut self, outbox: &mut impl Outbox, entity: Entity, state: PlayerState) {
        if !self.players.contains(entity) {
            log::warn!("Update from unknown {:?}, ignoring", entity);
            return;
        }

        self.players.insert(entity, state);
        self.publish(outbox);
    }

    pub fn leave(&mut self, outbox: &mut impl Outbox, entity: Entity) {
        if self.players.remove(entity).is_some() {
            self.publish(outbox);
        }
    }

    fn publish(&self, outbox: &mut impl Outbox) {
        outbox.broadcast(&Packet::Snapshot(self.players.clone()));
    }
}
