pub mod calculations;
pub mod engine;

pub use engine::decide;
