use std::net::SocketAddr;

use bimap::BiMap;
use message_io::events::EventReceiver;
use message_io::network::{Endpoint, Transport};
use message_io::node::{self, NodeHandler, NodeTask, StoredNodeEvent};
use thiserror::Error;
use tilehop::network::{server::Packet, Entity};

use crate::data::Config;
use crate::relay::Outbox;

pub struct Network {
    pub handler: NodeHandler<()>,
    pub receiver: EventReceiver<StoredNodeEvent<()>>,
    pub peer_map: BiMap<Entity, Endpoint>,

    #[allow(dead_code)] // RAII
    task: NodeTask,
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid listen address {0:?}")]
    Address(String),
    #[error("could not start listening on {0}")]
    Listen(SocketAddr),
}

impl Network {
    pub fn listen(config: &Config) -> Result<Self, NetworkError> {
        let (handler, listener) = node::split::<()>();

        let address = config.address();
        let server_addr: SocketAddr = address.parse().map_err(|_| NetworkError::Address(address))?;
        handler
            .network()
            .listen(Transport::FramedTcp, server_addr)
            .map_err(|_| NetworkError::Listen(server_addr))?;

        log::info!("Listening on {}", server_addr);

        let (task, receiver) = listener.enqueue();

        Ok(Self {
            handler,
            task,
            receiver,
            peer_map: BiMap::new(),
        })
    }

    fn encode(message: &Packet) -> Option<Vec<u8>> {
        rmp_serde::to_vec(message)
            .map_err(|e| log::error!("Error encoding packet {:?}", e))
            .ok()
    }
}

impl Outbox for Network {
    fn send(&mut self, entity: Entity, message: &Packet) {
        if let Some(&endpoint) = self.peer_map.get_by_left(&entity) {
            if let Some(bytes) = Self::encode(message) {
                self.handler.network().send(endpoint, &bytes);
            }
        }
    }

    fn broadcast(&mut self, message: &Packet) {
        let Some(bytes) = Self::encode(message) else {
            return;
        };

        for &endpoint in self.peer_map.right_values() {
            self.handler.network().send(endpoint, &bytes);
        }
    }
}
