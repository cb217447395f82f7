pub mod config;
pub mod document;
pub mod layout;
pub mod metrics;
pub mod naming;
pub mod patient;
pub mod pdf;

pub use config::*;
pub use document::*;
pub use layout::*;
pub use metrics::*;
pub use naming::*;
pub use patient::*;
pub use pdf::*;

#[cfg(test)]
mod tests;
