//! AnalysisSession: owns the search text, selection and session state
//!
//! Analysis calls are split in two so the owner's event loop never holds the
//! session across an await:
//!
//! 1. `select_province` / `retry` transition to `Loading` synchronously and
//!    hand back an [`AnalysisTicket`]
//! 2. `ticket.run().await` performs the external call anywhere
//! 3. `complete` applies the outcome, unless a newer selection superseded it

use super::state::{SessionState, ANALYSIS_FAILED_MESSAGE};
use crate::analysis::{AnalysisError, AnalysisResult, RainfallAnalyzer};
use crate::province::{ProvinceIndex, ProvinceRecord};
use std::sync::Arc;
use tracing::{debug, error, info};

/// An analysis call that has been started but not yet run
pub struct AnalysisTicket {
    generation: u64,
    province: ProvinceRecord,
    analyzer: Arc<dyn RainfallAnalyzer>,
}

impl AnalysisTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn province(&self) -> &ProvinceRecord {
        &self.province
    }

    /// Perform the external call
    pub async fn run(self) -> AnalysisCompletion {
        let outcome = self.analyzer.analyze(&self.province.name).await;
        AnalysisCompletion {
            generation: self.generation,
            province: self.province,
            outcome,
        }
    }
}

/// Outcome of one ticket, ready to be applied to the session
#[derive(Debug)]
pub struct AnalysisCompletion {
    generation: u64,
    province: ProvinceRecord,
    outcome: Result<AnalysisResult, AnalysisError>,
}

impl AnalysisCompletion {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn province(&self) -> &ProvinceRecord {
        &self.province
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// One user's search-select-analyze session
pub struct AnalysisSession {
    index: Arc<ProvinceIndex>,
    analyzer: Arc<dyn RainfallAnalyzer>,
    query: String,
    /// Province whose name is in the search box; cleared when the text is edited
    selected: Option<ProvinceRecord>,
    /// Province of the latest request; retry target
    requested: Option<ProvinceRecord>,
    state: SessionState,
    /// Bumped on every selection; completions from older generations are dropped
    generation: u64,
}

impl AnalysisSession {
    pub fn new(index: Arc<ProvinceIndex>, analyzer: Arc<dyn RainfallAnalyzer>) -> Self {
        Self {
            index,
            analyzer,
            query: String::new(),
            selected: None,
            requested: None,
            state: SessionState::Idle,
            generation: 0,
        }
    }

    // --- Read ---

    pub fn index(&self) -> &ProvinceIndex {
        &self.index
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn selected(&self) -> Option<&ProvinceRecord> {
        self.selected.as_ref()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Identifier of the analysis service, as it appears in logs
    pub fn analyzer_id(&self) -> &str {
        self.analyzer.id()
    }

    /// Dropdown contents for the current search text
    pub fn suggestions(&self) -> Vec<&ProvinceRecord> {
        self.index.suggestions(&self.query, self.selected.as_ref())
    }

    /// Retry is offered only from `Error`
    pub fn can_retry(&self) -> bool {
        matches!(self.state, SessionState::Error(_)) && self.requested.is_some()
    }

    // --- Transitions ---

    /// Update the search text.
    ///
    /// Editing away from the selected province's name clears the selection so
    /// suggestions can reappear. The session state is left alone.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        if self
            .selected
            .as_ref()
            .is_some_and(|p| p.name != self.query)
        {
            debug!(query = %self.query, "search text edited, clearing selection");
            self.selected = None;
        }
    }

    /// Select a province and enter `Loading`.
    ///
    /// Valid from any state. Any call still running for an earlier selection
    /// is superseded.
    pub fn select_province(&mut self, province: ProvinceRecord) -> AnalysisTicket {
        self.generation += 1;
        self.query = province.name.clone();
        self.selected = Some(province.clone());
        self.requested = Some(province.clone());
        self.state = SessionState::Loading(province.clone());

        info!(
            analyzer = self.analyzer.id(),
            province = %province.name,
            generation = self.generation,
            "analysis started"
        );

        AnalysisTicket {
            generation: self.generation,
            province,
            analyzer: Arc::clone(&self.analyzer),
        }
    }

    /// Select by province id
    pub fn select_by_id(&mut self, id: &str) -> Option<AnalysisTicket> {
        let province = self.index.get(id)?.clone();
        Some(self.select_province(province))
    }

    /// Select the `position`-th (0-based) entry of the current suggestions
    pub fn select_suggestion(&mut self, position: usize) -> Option<AnalysisTicket> {
        let province = self.suggestions().get(position).map(|p| (*p).clone())?;
        Some(self.select_province(province))
    }

    /// Re-run the failed request for the same province
    pub fn retry(&mut self) -> Option<AnalysisTicket> {
        if !self.can_retry() {
            return None;
        }
        let province = self.requested.clone()?;
        Some(self.select_province(province))
    }

    /// Apply a finished call.
    ///
    /// Returns `false` when the completion belongs to a superseded selection
    /// and was discarded.
    pub fn complete(&mut self, completion: AnalysisCompletion) -> bool {
        if completion.generation != self.generation || !self.state.is_loading() {
            debug!(
                province = %completion.province.name,
                generation = completion.generation,
                current = self.generation,
                "discarding superseded analysis result"
            );
            return false;
        }

        match completion.outcome {
            Ok(result) => {
                info!(
                    analyzer = self.analyzer.id(),
                    province = %completion.province.name,
                    "analysis succeeded"
                );
                self.state = SessionState::Success(result);
            }
            Err(e) => {
                error!(
                    analyzer = self.analyzer.id(),
                    province = %completion.province.name,
                    error = %e,
                    "analysis failed"
                );
                self.state = SessionState::Error(ANALYSIS_FAILED_MESSAGE.to_string());
            }
        }
        true
    }

    /// Select, run and apply in one step
    pub async fn analyze_province(&mut self, province: ProvinceRecord) -> &SessionState {
        let ticket = self.select_province(province);
        let completion = ticket.run().await;
        self.complete(completion);
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{mock_report, MockAnalyzer};

    fn index() -> Arc<ProvinceIndex> {
        Arc::new(
            ProvinceIndex::from_records(vec![
                ProvinceRecord::new("hn", "Hà Nội", "North"),
                ProvinceRecord::new("hcm", "Hồ Chí Minh", "South"),
            ])
            .unwrap(),
        )
    }

    fn session_with(analyzer: MockAnalyzer) -> AnalysisSession {
        AnalysisSession::new(index(), Arc::new(analyzer))
    }

    #[test]
    fn select_enters_loading_synchronously() {
        let mut session = session_with(MockAnalyzer::available());
        assert_eq!(session.state(), &SessionState::Idle);

        let province = session.index().get("hn").unwrap().clone();
        let ticket = session.select_province(province.clone());

        assert_eq!(session.state(), &SessionState::Loading(province.clone()));
        assert_eq!(session.query(), "Hà Nội");
        assert_eq!(session.selected(), Some(&province));
        assert_eq!(ticket.province(), &province);
        assert_eq!(ticket.generation(), 1);
        assert_eq!(session.analyzer_id(), "mock");
    }

    #[tokio::test]
    async fn success_stores_result() {
        let mut session =
            session_with(MockAnalyzer::available().with_report("Hà Nội", mock_report("Hà Nội")));

        let done = session.select_by_id("hn").unwrap().run().await;
        assert!(done.is_success());
        assert!(session.complete(done));

        let result = session.state().result().unwrap();
        assert_eq!(result.province_name, "Hà Nội");
    }

    #[tokio::test]
    async fn failure_maps_to_fixed_message() {
        let mut session = session_with(
            MockAnalyzer::available().with_failure("Hà Nội", || AnalysisError::EmptyResponse),
        );

        let province = session.index().get("hn").unwrap().clone();
        let state = session.analyze_province(province).await;
        assert_eq!(
            state,
            &SessionState::Error(ANALYSIS_FAILED_MESSAGE.to_string())
        );
        assert!(session.can_retry());
    }

    #[tokio::test]
    async fn retry_reenters_loading_for_same_province() {
        let mut session = session_with(
            MockAnalyzer::available().with_failure("Hồ Chí Minh", || {
                AnalysisError::Blocked("SAFETY".into())
            }),
        );
        let province = session.index().get("hcm").unwrap().clone();
        session.analyze_province(province.clone()).await;

        // Editing the text clears the selection but retry still targets the request
        session.set_query("Hồ");
        assert!(session.selected().is_none());

        let ticket = session.retry().unwrap();
        assert_eq!(ticket.province(), &province);
        assert_eq!(session.state(), &SessionState::Loading(province));
        assert_eq!(session.query(), "Hồ Chí Minh");
    }

    #[test]
    fn retry_unavailable_outside_error() {
        let mut session = session_with(MockAnalyzer::available());
        assert!(session.retry().is_none());

        session.select_by_id("hn").unwrap();
        assert!(session.retry().is_none());
        assert_eq!(session.generation(), 1);
    }

    #[tokio::test]
    async fn superseded_completion_is_discarded() {
        let mut session = session_with(
            MockAnalyzer::available()
                .with_report("Hà Nội", mock_report("Hà Nội"))
                .with_report("Hồ Chí Minh", mock_report("Hồ Chí Minh")),
        );

        let first = session.select_by_id("hn").unwrap();
        let second = session.select_by_id("hcm").unwrap();

        // Second resolves first, then the stale one arrives
        let second_done = second.run().await;
        let first_done = first.run().await;

        assert!(session.complete(second_done));
        assert!(!session.complete(first_done));
        assert_eq!(
            session.state().result().unwrap().province_name,
            "Hồ Chí Minh"
        );
    }

    #[tokio::test]
    async fn stale_completion_cannot_resolve_newer_loading() {
        let mut session =
            session_with(MockAnalyzer::available().with_report("Hà Nội", mock_report("Hà Nội")));

        let first = session.select_by_id("hn").unwrap();
        let _second = session.select_by_id("hcm").unwrap();

        assert!(!session.complete(first.run().await));
        assert!(session.state().is_loading());
        assert_eq!(session.state().loading_province().unwrap().id, "hcm");
    }

    #[tokio::test]
    async fn editing_text_keeps_displayed_result() {
        let mut session =
            session_with(MockAnalyzer::available().with_report("Hà Nội", mock_report("Hà Nội")));
        let province = session.index().get("hn").unwrap().clone();
        session.analyze_province(province).await;

        // Query equals selection: dropdown hidden
        assert!(session.suggestions().is_empty());

        session.set_query("Hà");
        assert!(session.selected().is_none());
        assert_eq!(session.suggestions().len(), 1);
        assert_eq!(
            session.state().result().unwrap().province_name,
            "Hà Nội"
        );
    }

    #[test]
    fn select_suggestion_uses_current_dropdown() {
        let mut session = session_with(MockAnalyzer::available());
        session.set_query("h");

        let ticket = session.select_suggestion(1).unwrap();
        assert_eq!(ticket.province().id, "hcm");
        assert!(session.select_suggestion(5).is_none());
    }

    #[test]
    fn unknown_id_does_not_transition() {
        let mut session = session_with(MockAnalyzer::available());
        assert!(session.select_by_id("nowhere").is_none());
        assert_eq!(session.state(), &SessionState::Idle);
    }
}
