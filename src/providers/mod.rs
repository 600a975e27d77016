//! Frame source implementations

mod reel;

pub use reel::ReelSource;
