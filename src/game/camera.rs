use euclid::Transform2D;

use crate::math::round_px;
use crate::math::units::{screen, world, ScreenUnit, WorldUnit};

pub struct Camera {
    /// Top-left of the viewport in world space.
    pub position: world::Point2D,
    pub size: world::Size2D,
    pub target: world::Point2D,
    smoothness: f32,
}

impl Camera {
    pub fn new(size: world::Size2D, smoothness: f32) -> Self {
        Self {
            position: world::Point2D::zero(),
            size,
            target: world::Point2D::zero(),
            smoothness: smoothness.clamp(0.0, 1.0),
        }
    }

    pub fn smoothness(&self) -> f32 {
        self.smoothness
    }

    /// Eases toward centering `focus`, then keeps the view inside the map.
    ///
    /// Clamping only happens once the map size is known.
    pub fn update(&mut self, focus: world::Rect, map_size: Option<world::Size2D>) {
        let centered = focus.origin + focus.size.to_vector() / 2.0 - self.size.to_vector() / 2.0;
        let target = centered.floor();
        self.target = world::Point2D::new(round_px(target.x), round_px(target.y));

        let eased = self.position + (self.target - self.position) * self.smoothness;
        self.position = world::Point2D::new(round_px(eased.x), round_px(eased.y));

        if let Some(map_size) = map_size {
            // a map smaller than the view pins the camera to 0
            let max_x = (map_size.width - self.size.width).max(0.0);
            let max_y = (map_size.height - self.size.height).max(0.0);

            self.position.x = self.position.x.clamp(0.0, max_x);
            self.position.y = self.position.y.clamp(0.0, max_y);
        }
    }

    fn transform(&self) -> Transform2D<f32, WorldUnit, ScreenUnit> {
        Transform2D::translation(-self.position.x, -self.position.y)
    }

    pub fn world_to_screen(&self, point: world::Point2D) -> screen::Point2D {
        self.transform().transform_point(point)
    }

    pub fn screen_to_world(&self, point: screen::Point2D) -> world::Point2D {
        Transform2D::translation(self.position.x, self.position.y).transform_point(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(world::Size2D::new(640.0, 360.0), 0.1)
    }

    fn focus(x: f32, y: f32) -> world::Rect {
        world::Rect::new(world::Point2D::new(x, y), world::Size2D::new(16.0, 16.0))
    }

    #[test]
    fn eases_instead_of_snapping() {
        let mut camera = camera();
        camera.update(focus(1000.0, 500.0), None);

        assert_eq!(camera.target, world::Point2D::new(688.0, 328.0));
        assert_eq!(camera.position, world::Point2D::new(69.0, 33.0));
    }

    #[test]
    fn converges_and_stays_in_bounds() {
        let map = world::Size2D::new(1600.0, 800.0);
        let mut camera = camera();
        let tolerance = 0.5 / camera.smoothness();

        for (x, y) in [(700.0, 400.0), (5.0, 5.0), (1590.0, 790.0)] {
            for _ in 0..500 {
                camera.update(focus(x, y), Some(map));
                assert!(camera.position.x >= 0.0 && camera.position.x <= map.width - 640.0);
                assert!(camera.position.y >= 0.0 && camera.position.y <= map.height - 360.0);
            }

            let expected_x = camera.target.x.clamp(0.0, map.width - 640.0);
            let expected_y = camera.target.y.clamp(0.0, map.height - 360.0);
            assert!((camera.position.x - expected_x).abs() <= tolerance);
            assert!((camera.position.y - expected_y).abs() <= tolerance);
        }
    }

    #[test]
    fn small_map_pins_to_origin() {
        let mut camera = camera();
        camera.position = world::Point2D::new(40.0, 40.0);
        camera.update(focus(200.0, 100.0), Some(world::Size2D::new(320.0, 160.0)));

        assert_eq!(camera.position, world::Point2D::zero());
    }

    #[test]
    fn screen_round_trip() {
        let mut camera = camera();
        camera.position = world::Point2D::new(120.0, 48.0);

        let screen = camera.world_to_screen(world::Point2D::new(130.0, 50.0));
        assert_eq!(screen, screen::Point2D::new(10.0, 2.0));
        assert_eq!(camera.screen_to_world(screen), world::Point2D::new(130.0, 50.0));
    }
}
