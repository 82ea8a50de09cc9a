//! 단위 정의 및 변환 모듈.

pub mod area;

pub use area::{convert_area, AreaUnit};
