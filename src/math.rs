pub mod units {
    use paste::paste;

    macro_rules! euclid_units {
        ($($unit:ident => $default:ty),+) => {
            paste! {
                $(
                    pub struct [<$unit Unit>];

                    pub mod [<$unit:snake>] {
                        pub type Point2D<T = $default> = euclid::Point2D<T, super::[<$unit Unit>]>;
                        pub type Vector2D<T = $default> =
                            euclid::Vector2D<T, super::[<$unit Unit>]>;
                        pub type Box2D<T = $default> = euclid::Box2D<T, super::[<$unit Unit>]>;
                        pub type Size2D<T = $default> = euclid::Size2D<T, super::[<$unit Unit>]>;
                        pub type Rect<T = $default> = euclid::Rect<T, super::[<$unit Unit>]>;
                    }

                )+
            }
        };
    }

    // Tile is grid cells, Image is texel coordinates inside a sprite sheet
    euclid_units!(World => f32, Screen => f32, Tile => i32, Image => u32);
}

/// Rounds half up, `floor(v + 0.5)`, so `-2.5` becomes `-2` rather than `-3`.
pub fn round_px(value: f32) -> f32 {
    (value + 0.5).floor()
}
