pub mod constants;
pub mod engine;
pub mod features;
pub mod grid;
pub mod noise_field;
pub mod palette;
pub mod pattern;
pub mod rng;
pub mod view;

pub use constants::*;
pub use engine::*;
pub use features::*;
pub use grid::*;
pub use noise_field::*;
pub use palette::*;
pub use pattern::*;
pub use rng::*;
pub use view::*;
