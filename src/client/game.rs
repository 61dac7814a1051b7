use ggez::event::EventHandler;
use ggez::glam::Vec2;
use ggez::graphics::{self, Canvas, DrawParam, Quad, Sampler};
use ggez::input::keyboard::{KeyCode, KeyboardContext};
use ggez::{Context, GameResult};
use tilehop::asset::Loadable;
use tilehop::game::kinematics::InputState;
use tilehop::game::render::{self, DrawCommand, Letterbox};
use tilehop::game::PlayState;
use tilehop::math::units::screen;
use tilehop::network::client::Packet;
use tilehop::TICK_RATE;

use crate::assets::AssetCache;
use crate::network::Network;
use crate::settings::Settings;

pub struct GameHandler {
    state: PlayState,
    assets: AssetCache,
    /// `None` when the server couldn't be reached, the game runs offline.
    network: Option<Network>,
}

impl GameHandler {
    pub fn new(ctx: &mut Context, settings: &Settings) -> Self {
        let mut state = PlayState::new(settings.start.position());
        state.clip = AssetCache::load_clip(ctx);

        let network = match Network::connect(&settings.address) {
            Ok(network) => Some(network),
            Err(e) => {
                log::error!("{e}, playing offline");
                None
            }
        };

        if let Loadable::Failed(reason) = &state.clip {
            log::warn!("Drawing the player as a box: {reason}");
        }

        Self {
            state,
            assets: AssetCache::load(ctx),
            network,
        }
    }

    fn update_network(&mut self) {
        let Some(network) = self.network.as_mut() else {
            return;
        };

        for packet in network.poll() {
            match &packet {
                tilehop::network::server::Packet::MapData(_) => log::debug!("MapData(..)"),
                packet => log::trace!("{packet:?}"),
            }

            self.state.handle_packet(packet);
        }
    }

    fn tick(&mut self, ctx: &Context) {
        let input = sample_input(&ctx.keyboard);
        let published = self.state.tick(input);

        if let Some(network) = self.network.as_mut() {
            network.send(&Packet::Update(published));
        }
    }

    fn execute(&self, canvas: &mut Canvas, command: &DrawCommand) {
        match *command {
            DrawCommand::Fill { rect, color } => {
                let rect = graphics::Rect::new(
                    rect.origin.x,
                    rect.origin.y,
                    rect.size.width,
                    rect.size.height,
                );
                let color = graphics::Color::from_rgb(color.r, color.g, color.b);
                canvas.draw(&Quad, DrawParam::default().dest_rect(rect).color(color));
            }
            DrawCommand::Image {
                sheet,
                source,
                dest,
                flip_x,
            } => {
                let Some(image) = self.assets.image(sheet) else {
                    return;
                };

                let (src, texels) = match source {
                    Some(source) => (
                        image.uv_rect(
                            source.origin.x,
                            source.origin.y,
                            source.size.width,
                            source.size.height,
                        ),
                        source.size.to_f32(),
                    ),
                    None => (
                        graphics::Rect::one(),
                        screen::Size2D::new(image.width() as f32, image.height() as f32)
                            .cast_unit(),
                    ),
                };

                let mut scale = Vec2::new(
                    dest.size.width / texels.width,
                    dest.size.height / texels.height,
                );
                let mut position = Vec2::new(dest.origin.x, dest.origin.y);
                if flip_x {
                    scale.x = -scale.x;
                    position.x += dest.size.width;
                }

                canvas.draw(image, DrawParam::default().src(src).dest(position).scale(scale));
            }
        }
    }
}

fn sample_input(keyboard: &KeyboardContext) -> InputState {
    let any = |keys: &[KeyCode]| keys.iter().any(|&key| keyboard.is_key_pressed(key));

    InputState {
        left: any(&[KeyCode::Left, KeyCode::A]),
        right: any(&[KeyCode::Right, KeyCode::D]),
        jump: any(&[KeyCode::Up, KeyCode::W, KeyCode::Space]),
    }
}

impl EventHandler for GameHandler {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        self.update_network();

        while ctx.time.check_update_time(TICK_RATE) {
            self.tick(ctx);
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let (width, height) = ctx.gfx.drawable_size();
        let window = screen::Size2D::new(width, height);
        let visible = Letterbox::fit(window).visible_area(window);

        let mut canvas = Canvas::from_frame(ctx, graphics::Color::BLACK);
        canvas.set_sampler(Sampler::nearest_clamp());
        canvas.set_screen_coordinates(graphics::Rect::new(
            visible.origin.x,
            visible.origin.y,
            visible.size.width,
            visible.size.height,
        ));

        let tile_size = self.state.map.get().map(|map| map.tile_size());
        for command in render::frame(&self.state, &self.assets.dimensions(tile_size)) {
            self.execute(&mut canvas, &command);
        }

        canvas.finish(ctx)
    }

    fn quit_event(&mut self, _ctx: &mut Context) -> GameResult<bool> {
        if let Some(network) = &self.network {
            network.stop();
        }
        Ok(false)
    }

    fn key_down_event(
        &mut self,
        _ctx: &mut Context,
        _input: ggez::input::keyboard::KeyInput,
        _repeated: bool,
    ) -> GameResult {
        // Override default so esc doesn't close game
        Ok(())
    }
}
