use std::net::{SocketAddr, ToSocketAddrs};

use message_io::events::EventReceiver;
use message_io::network::{Endpoint, Transport};
use message_io::node::{self, NodeHandler, NodeTask, StoredNetEvent, StoredNodeEvent};
use thiserror::Error;
use tilehop::network::client::Packet;
use tilehop::network::server::Packet as ServerPacket;

pub struct Network {
    pub handler: NodeHandler<()>,
    pub receiver: EventReceiver<StoredNodeEvent<()>>,
    pub endpoint: Endpoint,
    connected: bool,

    #[allow(dead_code)] // RAII
    task: NodeTask,
}

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("could not resolve {0}")]
    Resolve(String),
    #[error("could not connect to {0}")]
    Connect(SocketAddr),
}

impl Network {
    pub fn connect(address: &str) -> Result<Self, NetworkError> {
        let server_addr = address
            .to_socket_addrs()
            .ok()
            .and_then(|mut addrs| addrs.next())
            .ok_or_else(|| NetworkError::Resolve(address.to_owned()))?;

        let (handler, listener) = node::split::<()>();

        let (server, server_addr) = handler
            .network()
            .connect(Transport::FramedTcp, server_addr)
            .map_err(|_| NetworkError::Connect(server_addr))?;
        log::info!("Connecting to {}", server_addr);

        let (task, receiver) = listener.enqueue();

        Ok(Self {
            handler,
            task,
            receiver,
            endpoint: server,
            connected: false,
        })
    }

    pub fn stop(&self) {
        self.handler.stop();
    }

    /// Dropped silently while the connection isn't up.
    pub fn send(&mut self, message: &Packet) {
        if !self.connected {
            return;
        }

        match rmp_serde::to_vec(message) {
            Ok(bytes) => {
                self.handler.network().send(self.endpoint, &bytes);
            }
            Err(e) => log::error!("Error encoding packet {:?}", e),
        }
    }

    /// Drains everything that arrived since the last call.
    pub fn poll(&mut self) -> Vec<ServerPacket> {
        let mut packets = Vec::new();

        while let Some(event) = self.receiver.try_receive() {
            match event.network() {
                StoredNetEvent::Connected(_, true) => {
                    log::info!("Connected to {}", self.endpoint.addr());
                    self.connected = true;
                }
                StoredNetEvent::Connected(_, false) => {
                    log::error!("Could not connect to {}", self.endpoint.addr());
                }
                StoredNetEvent::Accepted(_, _) => unreachable!(),
                StoredNetEvent::Message(_, bytes) => match rmp_serde::from_slice(&bytes) {
                    Ok(packet) => packets.push(packet),
                    Err(e) => log::error!("Error parsing packet {:?}", e),
                },
                StoredNetEvent::Disconnected(_) => {
                    // keep playing on the last snapshot
                    log::warn!("Disconnected from server");
                    self.connected = false;
                }
            }
        }

        packets
    }
}
