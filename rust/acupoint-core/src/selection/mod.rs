pub mod set;
pub mod suggest;

pub use set::*;
pub use suggest::*;
