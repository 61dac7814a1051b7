use serde::{Deserialize, Serialize};

use super::PlayerState;

/// Packets sent from the client to the server
#[derive(Clone, Serialize, Deserialize, PartialEq, Debug)]
pub enum Packet {
    Update(PlayerState),
}
