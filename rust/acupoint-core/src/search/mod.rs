pub mod filter;
pub mod projection;

pub use filter::*;
pub use projection::*;
