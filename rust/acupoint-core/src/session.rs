//! Session: the single owner of all application state
//!
//! Holds the dataset, both selection sets, the active tab and the current result
//! projection. Every successful mutation is announced to registered listeners as a
//! [`SessionEvent`]; rejected operations change nothing and announce nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dataset::{Category, Dataset};
use crate::error::AcupointError;
use crate::export::{
    render_pdf, ExportArtifact, ExportComposer, LayoutConfig, PatientMeta, PrescriptionDocument,
};
use crate::search::{filter_dataset, ResultProjection};
use crate::selection::{suggest, SelectionSet, Suggestion, Toggled};

/// Change notification delivered to listeners
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SessionEvent {
    SelectionChanged { category: Category },
    ResultsChanged,
    InclusionChanged,
    TabChanged { category: Category },
}

pub type Listener = Box<dyn FnMut(&SessionEvent)>;

pub struct Session {
    dataset: Dataset,
    symptoms: SelectionSet,
    diseases: SelectionSet,
    active_tab: Category,
    results: ResultProjection,
    /// Category whose search produced the current results
    results_category: Option<Category>,
    composer: ExportComposer,
    listeners: Vec<Listener>,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_config(dataset, LayoutConfig::default())
    }

    pub fn with_config(dataset: Dataset, config: LayoutConfig) -> Self {
        Self {
            dataset,
            symptoms: SelectionSet::new(),
            diseases: SelectionSet::new(),
            active_tab: Category::default(),
            results: ResultProjection::new(),
            results_category: None,
            composer: ExportComposer::new(config),
            listeners: Vec::new(),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &LayoutConfig {
        self.composer.config()
    }

    /// Register a listener; it sees every event emitted from now on
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: SessionEvent) {
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // =========================================================================
    // Tabs
    // =========================================================================

    pub fn active_tab(&self) -> Category {
        self.active_tab
    }

    /// Switching tabs keeps both selections and the current results
    pub fn switch_tab(&mut self, category: Category) {
        self.active_tab = category;
        self.emit(SessionEvent::TabChanged { category });
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self, category: Category) -> &SelectionSet {
        match category {
            Category::Symptoms => &self.symptoms,
            Category::Diseases => &self.diseases,
        }
    }

    fn selection_mut(&mut self, category: Category) -> &mut SelectionSet {
        match category {
            Category::Symptoms => &mut self.symptoms,
            Category::Diseases => &mut self.diseases,
        }
    }

    /// Add or remove `item`. Results are not recomputed until the next search.
    pub fn toggle(&mut self, category: Category, item: &str) -> Toggled {
        let outcome = self.selection_mut(category).toggle(item);
        self.emit(SessionEvent::SelectionChanged { category });
        outcome
    }

    pub fn remove(&mut self, category: Category, item: &str) -> bool {
        let removed = self.selection_mut(category).remove(item);
        if removed {
            self.emit(SessionEvent::SelectionChanged { category });
        }
        removed
    }

    /// Empty one selection set. The results are cleared too when that category produced them.
    pub fn clear(&mut self, category: Category) {
        self.selection_mut(category).clear();
        self.emit(SessionEvent::SelectionChanged { category });

        if self.results_category == Some(category) {
            self.results.clear();
            self.results_category = None;
            self.emit(SessionEvent::ResultsChanged);
        }
    }

    /// Dropdown entries for `query` in `category`
    pub fn suggest(&self, category: Category, query: &str) -> Vec<Suggestion> {
        suggest(
            query,
            self.dataset.vocabulary(category),
            self.selection(category),
        )
    }

    // =========================================================================
    // Search + Results
    // =========================================================================

    /// Run the filter for `category` and replace the results. Returns the match count.
    pub fn search(&mut self, category: Category) -> Result<usize, AcupointError> {
        let records = filter_dataset(&self.dataset, self.selection(category), category)?;
        let count = records.len();

        self.results.replace(records);
        self.results_category = Some(category);
        self.emit(SessionEvent::ResultsChanged);
        Ok(count)
    }

    /// Search in whichever tab is active
    pub fn search_active(&mut self) -> Result<usize, AcupointError> {
        self.search(self.active_tab)
    }

    pub fn results(&self) -> &ResultProjection {
        &self.results
    }

    pub fn results_category(&self) -> Option<Category> {
        self.results_category
    }

    pub fn set_all(&mut self, included: bool) {
        self.results.set_all(included);
        self.emit(SessionEvent::InclusionChanged);
    }

    pub fn toggle_row(&mut self, index: usize) -> Result<bool, AcupointError> {
        let included = self.results.toggle(index)?;
        self.emit(SessionEvent::InclusionChanged);
        Ok(included)
    }

    pub fn set_row(&mut self, index: usize, included: bool) -> Result<(), AcupointError> {
        self.results.set_included(index, included)?;
        self.emit(SessionEvent::InclusionChanged);
        Ok(())
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Lay out the included rows; fails with `EmptyInclusion` when none are included
    pub fn compose_export(
        &self,
        meta: &PatientMeta,
        date: NaiveDate,
    ) -> Result<PrescriptionDocument, AcupointError> {
        self.composer
            .compose(&self.results.included_records(), meta, date)
    }

    pub fn export_pdf(
        &self,
        meta: &PatientMeta,
        date: NaiveDate,
    ) -> Result<ExportArtifact, AcupointError> {
        let document = self.compose_export(meta, date)?;
        let bytes = render_pdf(&document)?;
        Ok(ExportArtifact {
            file_name: document.file_name,
            bytes,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::PointRecord;
    use crate::search::DisplayState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn point(code: &str, symptoms: &str, diseases: &str) -> PointRecord {
        PointRecord {
            point_code: code.into(),
            english_name: format!("{} name", code),
            symptoms: symptoms.into(),
            diseases: diseases.into(),
            ..Default::default()
        }
    }

    fn session() -> Session {
        Session::new(Dataset::new(vec![
            point("P1", "headache, nausea", "migraine"),
            point("P2", "fever, headache", "common cold"),
            point("P3", "cough", "bronchitis"),
        ]))
    }

    fn recorder(session: &mut Session) -> Rc<RefCell<Vec<SessionEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        session.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        events
    }

    fn march_7() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    #[test]
    fn test_headache_search() {
        let mut session = session();
        session.toggle(Category::Symptoms, "headache");

        assert_eq!(session.search(Category::Symptoms).unwrap(), 2);
        let codes: Vec<_> = session
            .results()
            .records()
            .iter()
            .map(|r| r.point_code.as_str())
            .collect();
        assert_eq!(codes, vec!["P1", "P2"]);
        assert_eq!(session.results().inclusion_flags(), &[true, true]);
        assert_eq!(session.results_category(), Some(Category::Symptoms));
    }

    #[test]
    fn test_empty_search_leaves_results_untouched() {
        let mut session = session();
        session.toggle(Category::Symptoms, "cough");
        session.search(Category::Symptoms).unwrap();
        let events = recorder(&mut session);

        let err = session.search(Category::Diseases).unwrap_err();
        assert_eq!(err.to_string(), "Please select at least one disease");
        assert_eq!(session.results().len(), 1);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_selection_changes_do_not_recompute_results() {
        let mut session = session();
        session.toggle(Category::Symptoms, "headache");
        session.search(Category::Symptoms).unwrap();

        session.toggle(Category::Symptoms, "cough");
        session.toggle(Category::Symptoms, "headache");
        assert_eq!(session.results().len(), 2);

        session.search(Category::Symptoms).unwrap();
        assert_eq!(session.results().len(), 1);
    }

    #[test]
    fn test_deselected_row_is_left_out_of_export() {
        let mut session = session();
        session.toggle(Category::Symptoms, "headache");
        session.search(Category::Symptoms).unwrap();

        assert_eq!(session.toggle_row(0).unwrap(), false);
        let document = session
            .compose_export(&PatientMeta::new("Jane Doe", "42", "F"), march_7())
            .unwrap();

        assert!(document.find_text("1. P2 - P2 name").is_some());
        assert!(document.find_text("2. ").is_none());
        assert!(document.find_text("1. P1").is_none());
    }

    #[test]
    fn test_export_with_nothing_included() {
        let mut session = session();
        let meta = PatientMeta::default();

        // Never searched
        assert_eq!(
            session.compose_export(&meta, march_7()).unwrap_err(),
            AcupointError::EmptyInclusion
        );

        session.toggle(Category::Diseases, "migraine");
        session.search(Category::Diseases).unwrap();
        session.set_all(false);
        let err = session.export_pdf(&meta, march_7()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please select at least one acupuncture point to include in the prescription"
        );
    }

    #[test]
    fn test_export_pdf_artifact() {
        let mut session = session();
        session.toggle(Category::Symptoms, "fever");
        session.search(Category::Symptoms).unwrap();

        let artifact = session
            .export_pdf(&PatientMeta::new("Jane Doe", "42", "F"), march_7())
            .unwrap();
        assert_eq!(artifact.file_name, "Acupuncture_Prescription_Jane_Doe_20240307.pdf");
        assert!(artifact.bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_clear_only_hides_results_it_owns() {
        let mut session = session();
        session.toggle(Category::Symptoms, "cough");
        session.toggle(Category::Diseases, "migraine");
        session.search(Category::Symptoms).unwrap();

        session.clear(Category::Diseases);
        assert!(session.selection(Category::Diseases).is_empty());
        assert_eq!(session.results().len(), 1);

        session.clear(Category::Symptoms);
        assert!(session.results().is_empty());
        assert_eq!(session.results().display_state(), DisplayState::Hidden);
        assert_eq!(session.results_category(), None);
    }

    #[test]
    fn test_tabs_keep_independent_selections() {
        let mut session = session();
        session.toggle(Category::Symptoms, "cough");
        session.switch_tab(Category::Diseases);
        session.toggle(Category::Diseases, "migraine");

        assert_eq!(session.active_tab(), Category::Diseases);
        assert_eq!(session.selection(Category::Symptoms).as_slice(), &["cough"]);
        assert_eq!(session.selection(Category::Diseases).as_slice(), &["migraine"]);

        assert_eq!(session.search_active().unwrap(), 1);
        assert_eq!(session.results().records()[0].point_code, "P1");
    }

    #[test]
    fn test_suggest_uses_category_vocabulary() {
        let mut session = session();
        session.toggle(Category::Symptoms, "headache");

        let suggestions = session.suggest(Category::Symptoms, "HEAD");
        assert_eq!(suggestions.len(), 1);
        assert!(suggestions[0].selected);

        assert!(session.suggest(Category::Diseases, "head").is_empty());
    }

    #[test]
    fn test_events_follow_mutations() {
        let mut session = session();
        let events = recorder(&mut session);

        session.toggle(Category::Symptoms, "cough");
        session.remove(Category::Symptoms, "absent");
        session.search(Category::Symptoms).unwrap();
        session.set_row(0, false).unwrap();
        assert!(session.toggle_row(5).is_err());
        session.switch_tab(Category::Diseases);
        session.clear(Category::Symptoms);

        assert_eq!(
            *events.borrow(),
            vec![
                SessionEvent::SelectionChanged {
                    category: Category::Symptoms
                },
                SessionEvent::ResultsChanged,
                SessionEvent::InclusionChanged,
                SessionEvent::TabChanged {
                    category: Category::Diseases
                },
                SessionEvent::SelectionChanged {
                    category: Category::Symptoms
                },
                SessionEvent::ResultsChanged,
            ]
        );
    }

    #[test]
    fn test_event_serialization() {
        let value = serde_json::to_value(SessionEvent::SelectionChanged {
            category: Category::Diseases,
        })
        .unwrap();
        assert_eq!(value["type"], "selectionChanged");
        assert_eq!(value["category"], "diseases");
    }
}
