//! 견적 계산 모듈 모음.

pub mod cost_model;
pub mod plant;
pub mod quantity;

pub use cost_model::*;
pub use plant::PlantMapping;
pub use quantity::*;
