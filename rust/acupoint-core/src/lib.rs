//! Acupoint: symptom/disease driven acupuncture point lookup
//!
//! Practitioners pick symptoms or diseases, search the point dataset, choose which of the
//! matching points to keep, and export a landscape PDF prescription for a patient.
//!
//! # Architecture
//! - `dataset/` - Point records, search categories, suggestion vocabularies
//! - `selection/` - Ordered selection sets and dropdown suggestions
//! - `search/` - Filter engine and the result projection (inclusion flags, display state)
//! - `export/` - Layout config, text metrics, the export composer and PDF rendering
//! - `session.rs` - Session state owner with change notifications
//! - `wasm.rs` - `AcupointSession` bindings
//!
//! # Usage (WASM)
//! ```javascript
//! import init, { AcupointSession } from 'acupoint-core';
//!
//! await init();
//! const session = new AcupointSession(ACUPUNCTURE_DATA, SYMPTOMS_LIST, DISEASES_LIST);
//! session.subscribe(event => render(event));
//! session.toggle('symptoms', 'headache');
//! session.search('symptoms');
//! const { fileName, bytes } = session.exportPdf({ name: 'Jane Doe', age: '42', sex: 'F' });
//! ```

pub mod dataset;
pub mod error;
pub mod export;
pub mod search;
pub mod selection;
pub mod session;
pub mod wasm;

pub use dataset::*;
pub use error::*;
pub use export::*;
pub use search::*;
pub use selection::*;
pub use session::*;
pub use wasm::*;

use wasm_bindgen::prelude::*;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Crate version, for the page's about box
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
