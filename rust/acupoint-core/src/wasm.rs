//! WASM bindings for the host page
//!
//! `AcupointSession` wraps a [`Session`]. Inputs and outputs cross the boundary through
//! `serde_wasm_bindgen`; errors become their display text so the page can show them as
//! alerts verbatim.

use chrono::NaiveDate;
use js_sys::{Function, Object, Reflect, Uint8Array};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use crate::dataset::{Category, Dataset, PointRecord};
use crate::error::AcupointError;
use crate::export::{prescription_file_name, LayoutConfig, PatientMeta};
use crate::search::ResultRow;
use crate::session::Session;

const LOG_PREFIX: &str = "[AcupointSession]";

fn log(message: &str) {
    web_sys::console::log_1(&format!("{} {}", LOG_PREFIX, message).into());
}

/// Warnings go to `console.warn`, everything else to `console.error`
fn to_js_error(err: AcupointError) -> JsValue {
    let message = format!("{} {}", LOG_PREFIX, err);
    if err.is_warning() {
        web_sys::console::warn_1(&message.into());
    } else {
        web_sys::console::error_1(&message.into());
    }
    JsValue::from_str(&err.to_string())
}

fn parse_category(name: &str) -> Result<Category, JsValue> {
    name.parse::<Category>().map_err(to_js_error)
}

fn is_absent(value: &JsValue) -> bool {
    value.is_undefined() || value.is_null()
}

/// Deserialize `value`, or `None` when it is undefined/null
fn optional<T: for<'de> Deserialize<'de>>(value: JsValue) -> Result<Option<T>, JsValue> {
    if is_absent(&value) {
        Ok(None)
    } else {
        Ok(Some(serde_wasm_bindgen::from_value(value)?))
    }
}

/// Local date from the browser clock
fn today() -> Result<NaiveDate, JsValue> {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .ok_or_else(|| JsValue::from_str("Invalid system date"))
}

/// Shape handed to the results renderer
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultsView {
    state: &'static str,
    count_label: Option<String>,
    rows: Vec<ResultRow>,
}

#[wasm_bindgen]
pub struct AcupointSession {
    inner: Session,
}

#[wasm_bindgen]
impl AcupointSession {
    /// Create a session from the point records.
    ///
    /// `symptoms_list` / `diseases_list` are the dropdown vocabularies; when undefined they
    /// are derived from the records. `layout_config` falls back to the default layout.
    #[wasm_bindgen(constructor)]
    pub fn new(
        points: JsValue,
        symptoms_list: JsValue,
        diseases_list: JsValue,
        layout_config: JsValue,
    ) -> Result<AcupointSession, JsValue> {
        let points: Vec<PointRecord> = serde_wasm_bindgen::from_value(points)?;
        let config: LayoutConfig = optional(layout_config)?.unwrap_or_default();

        let mut dataset = Dataset::new(points);
        if let Some(terms) = optional::<Vec<String>>(symptoms_list)? {
            dataset = dataset.with_vocabulary(Category::Symptoms, terms);
        }
        if let Some(terms) = optional::<Vec<String>>(diseases_list)? {
            dataset = dataset.with_vocabulary(Category::Diseases, terms);
        }

        log(&format!(
            "Loaded {} points ({} symptoms, {} diseases)",
            dataset.len(),
            dataset.vocabulary(Category::Symptoms).len(),
            dataset.vocabulary(Category::Diseases).len()
        ));

        Ok(Self {
            inner: Session::with_config(dataset, config),
        })
    }

    /// Register a callback receiving `{ type, category? }` change notifications
    #[wasm_bindgen(js_name = subscribe)]
    pub fn subscribe(&mut self, callback: Function) {
        self.inner.subscribe(move |event| {
            let payload = match serde_wasm_bindgen::to_value(event) {
                Ok(payload) => payload,
                Err(e) => {
                    web_sys::console::error_1(&format!("{} {}", LOG_PREFIX, e).into());
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &payload) {
                web_sys::console::error_1(&e);
            }
        });
    }

    #[wasm_bindgen(js_name = summary)]
    pub fn summary(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.dataset().summary())?)
    }

    #[wasm_bindgen(js_name = vocabulary)]
    pub fn vocabulary(&self, category: &str) -> Result<JsValue, JsValue> {
        let category = parse_category(category)?;
        Ok(serde_wasm_bindgen::to_value(
            self.inner.dataset().vocabulary(category),
        )?)
    }

    // =========================================================================
    // Tabs + Selection
    // =========================================================================

    #[wasm_bindgen(js_name = switchTab)]
    pub fn switch_tab(&mut self, category: &str) -> Result<(), JsValue> {
        let category = parse_category(category)?;
        self.inner.switch_tab(category);
        Ok(())
    }

    #[wasm_bindgen(js_name = activeTab)]
    pub fn active_tab(&self) -> String {
        self.inner.active_tab().as_str().to_string()
    }

    /// Dropdown entries: `[{ item, selected }]`
    #[wasm_bindgen(js_name = suggest)]
    pub fn suggest(&self, category: &str, query: &str) -> Result<JsValue, JsValue> {
        let category = parse_category(category)?;
        Ok(serde_wasm_bindgen::to_value(
            &self.inner.suggest(category, query),
        )?)
    }

    /// Returns "added" or "removed"
    #[wasm_bindgen(js_name = toggle)]
    pub fn toggle(&mut self, category: &str, item: &str) -> Result<String, JsValue> {
        let category = parse_category(category)?;
        Ok(self.inner.toggle(category, item).as_str().to_string())
    }

    #[wasm_bindgen(js_name = remove)]
    pub fn remove(&mut self, category: &str, item: &str) -> Result<bool, JsValue> {
        let category = parse_category(category)?;
        Ok(self.inner.remove(category, item))
    }

    #[wasm_bindgen(js_name = selected)]
    pub fn selected(&self, category: &str) -> Result<JsValue, JsValue> {
        let category = parse_category(category)?;
        Ok(serde_wasm_bindgen::to_value(
            self.inner.selection(category).as_slice(),
        )?)
    }

    #[wasm_bindgen(js_name = clear)]
    pub fn clear(&mut self, category: &str) -> Result<(), JsValue> {
        let category = parse_category(category)?;
        self.inner.clear(category);
        Ok(())
    }

    // =========================================================================
    // Search + Results
    // =========================================================================

    /// Run the search for `category`; throws the warning text on an empty selection
    #[wasm_bindgen(js_name = search)]
    pub fn search(&mut self, category: &str) -> Result<usize, JsValue> {
        let category = parse_category(category)?;
        let count = self.inner.search(category).map_err(to_js_error)?;
        log(&format!("Search in {}: {} points", category.as_str(), count));
        Ok(count)
    }

    /// `{ state, countLabel, rows }` for the results table
    #[wasm_bindgen(js_name = results)]
    pub fn results(&self) -> Result<JsValue, JsValue> {
        let projection = self.inner.results();
        let display = projection.display_state();
        let view = ResultsView {
            state: display.as_str(),
            count_label: display.count_label().map(str::to_string),
            rows: projection.table_rows(),
        };
        Ok(serde_wasm_bindgen::to_value(&view)?)
    }

    #[wasm_bindgen(js_name = setAll)]
    pub fn set_all(&mut self, included: bool) {
        self.inner.set_all(included);
    }

    #[wasm_bindgen(js_name = toggleRow)]
    pub fn toggle_row(&mut self, index: usize) -> Result<bool, JsValue> {
        self.inner.toggle_row(index).map_err(to_js_error)
    }

    #[wasm_bindgen(js_name = setRow)]
    pub fn set_row(&mut self, index: usize, included: bool) -> Result<(), JsValue> {
        self.inner.set_row(index, included).map_err(to_js_error)
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Layout model of the prescription dated today
    #[wasm_bindgen(js_name = composeExport)]
    pub fn compose_export(&self, patient_meta: JsValue) -> Result<JsValue, JsValue> {
        let meta: PatientMeta = optional(patient_meta)?.unwrap_or_default();
        let document = self
            .inner
            .compose_export(&meta, today()?)
            .map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&document)?)
    }

    /// `{ fileName, bytes: Uint8Array }`; the page triggers the download
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&self, patient_meta: JsValue) -> Result<JsValue, JsValue> {
        let meta: PatientMeta = optional(patient_meta)?.unwrap_or_default();
        let artifact = self
            .inner
            .export_pdf(&meta, today()?)
            .map_err(to_js_error)?;

        log(&format!(
            "Exported {} ({} bytes, {} points)",
            artifact.file_name,
            artifact.bytes.len(),
            self.inner.results().included_count()
        ));

        let result = Object::new();
        Reflect::set(
            &result,
            &JsValue::from_str("fileName"),
            &JsValue::from_str(&artifact.file_name),
        )?;
        Reflect::set(
            &result,
            &JsValue::from_str("bytes"),
            &Uint8Array::from(artifact.bytes.as_slice()),
        )?;
        Ok(result.into())
    }
}

/// Download name for a prescription of `name` dated `year-month-day`
#[wasm_bindgen(js_name = prescriptionFileName)]
pub fn js_prescription_file_name(
    name: &str,
    year: i32,
    month: u32,
    day: u32,
) -> Result<String, JsValue> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        to_js_error(AcupointError::InvalidInput(format!(
            "invalid date {}-{}-{}",
            year, month, day
        )))
    })?;
    Ok(prescription_file_name(name, date))
}
