pub mod catalog;
pub mod record;

pub use catalog::*;
pub use record::*;
