pub mod coalescer;
pub mod frame;
pub mod subscribers;

pub use coalescer::*;
pub use frame::*;
pub use subscribers::*;
