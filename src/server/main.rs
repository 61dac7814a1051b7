mod data;
mod network;
mod relay;

use std::path::PathBuf;

use anyhow::{Context, Result};
use env_logger::WriteStyle;
use log::LevelFilter;
use message_io::network::Endpoint;
use message_io::node::StoredNetEvent;
use tilehop::map::{MapAsset, TileMap};
use tilehop::network::client::Packet as ClientPacket;

use crate::data::Config;
use crate::network::Network;
use crate::relay::Relay;

fn main() -> Result<()> {
    if let Ok(runtime) = std::env::var("RUNTIME_PATH") {
        let runtime = PathBuf::from(runtime).join("server");
        log::warn!("Setting runtime to {}", runtime.display());
        std::env::set_current_dir(runtime).context("set runtime path")?;
    }

    #[cfg(debug_assertions)]
    env_logger::builder()
        .filter_level(LevelFilter::Debug)
        .write_style(WriteStyle::Always)
        .init();

    #[cfg(not(debug_assertions))]
    env_logger::init();

    let relay_server = RelayServer::new()?;
    relay_server.run();
    Ok(())
}

struct RelayServer {
    network: Network,
    relay: Relay,
}

impl RelayServer {
    pub fn new() -> Result<Self> {
        let config = Config::load().context("load config")?;

        let map = MapAsset::load(&config.map)
            .with_context(|| format!("load map {}", config.map.display()))?;
        let tiles = TileMap::from_asset(&map).context("validate map")?;
        log::info!(
            "Serving {} ({}x{} tiles)",
            config.map.display(),
            tiles.size().width,
            tiles.size().height
        );

        let network = Network::listen(&config)?;

        Ok(Self {
            network,
            relay: Relay::new(map, config.start.position()),
        })
    }

    fn run(mut self) {
        loop {
            let event = self.network.receiver.receive();

            match event.network() {
                StoredNetEvent::Connected(_, _) => unreachable!(),
                StoredNetEvent::Accepted(endpoint, _listener) => {
                    let entity = self.relay.next_entity();
                    self.network.peer_map.insert(entity, endpoint);

                    log::info!(
                        "Client ({}) connected as {:?} (total clients: {})",
                        endpoint.addr(),
                        entity,
                        self.network.peer_map.len()
                    );

                    self.relay.join(&mut self.network, entity);
                }
                StoredNetEvent::Message(endpoint, bytes) => self.handle_message(endpoint, &bytes),
                StoredNetEvent::Disconnected(endpoint) => self.handle_disconnect(endpoint),
            }
        }
    }

    fn handle_message(&mut self, endpoint: Endpoint, bytes: &[u8]) {
        let Some(&entity) = self.network.peer_map.get_by_right(&endpoint) else {
            log::warn!("Message from unknown client ({})", endpoint.addr());
            return;
        };

        let message: ClientPacket = match rmp_serde::from_slice(bytes) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("Dropping bad packet from {:?}: {e}", entity);
                return;
            }
        };

        log::trace!("{:?}: {:?}", entity, message);
        self.relay.handle_packet(&mut self.network, entity, message);
    }

    fn handle_disconnect(&mut self, endpoint: Endpoint) {
        let Some((entity, _)) = self.network.peer_map.remove_by_right(&endpoint) else {
            return;
        };

        self.relay.leave(&mut self.network, entity);

        log::info!(
            "Client ({}) disconnected (players remaining: {})",
            endpoint.addr(),
            self.relay.players().len()
        );
    }
}
