pub mod bridge;
pub mod engine;
pub mod filter;
pub mod indicator;
pub mod point;
pub mod region;
pub mod synthetic;

pub use bridge::*;
pub use engine::*;
pub use filter::*;
pub use indicator::*;
pub use point::*;
pub use region::*;
