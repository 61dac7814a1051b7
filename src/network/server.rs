use serde::{Deserialize, Serialize};

use super::{Entity, Snapshot};
use crate::map::MapAsset;

/// Packets sent from the server to the client
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub enum Packet {
    /// The connection's own id, sent once on connect.
    Welcome(Entity),
    MapData(Box<MapAsset>),
    Snapshot(Snapshot),
}
