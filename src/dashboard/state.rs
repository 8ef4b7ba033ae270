//! Loading states and the data the dashboard renders from.

use crate::api::error::ReportedError;
use crate::dashboard::models::{CostRecord, WorkspaceSummary};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio_util::sync::CancellationToken;

/// Progress of a single fetch channel. Reflects the most recent attempt only.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, strum::Display)]
pub enum LoadingState {
    #[default]
    Loading,
    Ok,
    Error,
    NotSupported,
}

/// View-local state of the dashboard.
#[derive(Debug, Clone, Default)]
pub struct DashboardData {
    pub workspaces: Vec<WorkspaceSummary>,
    pub loading_state: LoadingState,
    pub cost_loading_state: LoadingState,
    pub api_error: Option<ReportedError>,
    pub cost_api_error: Option<ReportedError>,
}

/// Snapshot of the shared cost data.
#[derive(Debug, Clone, Default)]
pub struct CostsState {
    pub costs: Vec<CostRecord>,
    pub loading_state: LoadingState,
}

impl CostsState {
    pub fn find(&self, id: &str) -> Option<&CostRecord> {
        self.costs.iter().find(|record| record.id == id)
    }
}

/// Cost data shared between views.
///
/// Exactly one view writes it at a time; any view may read. Cloning yields a
/// handle to the same data.
#[derive(Debug, Clone, Default)]
pub struct CostsContext {
    inner: Arc<Mutex<CostsState>>,
}

impl CostsContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CostsState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_costs(&self, costs: Vec<CostRecord>) {
        self.lock().costs = costs;
    }

    #[cfg(test)]
    pub fn set_loading_state(&self, state: LoadingState) {
        self.lock().loading_state = state;
    }

    /// Drops every cost record.
    pub fn clear(&self) {
        self.set_costs(Vec::new());
    }

    pub fn loading_state(&self) -> LoadingState {
        self.lock().loading_state
    }

    pub fn snapshot(&self) -> CostsState {
        self.lock().clone()
    }

    /// Applies `f` unless `cancel` has fired. The check happens under the
    /// lock, so a writer racing a teardown can never land after the clear.
    pub(crate) fn update_unless_cancelled(
        &self,
        cancel: &CancellationToken,
        f: impl FnOnce(&mut CostsState),
    ) -> bool {
        let mut state = self.lock();
        if cancel.is_cancelled() {
            return false;
        }
        f(&mut state);
        true
    }
}

/// Shared handle to [`DashboardData`], written by the loader tasks and read by
/// the renderer.
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedDashboardData {
    inner: Arc<Mutex<DashboardData>>,
}

impl SharedDashboardData {
    fn lock(&self) -> MutexGuard<'_, DashboardData> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> DashboardData {
        self.lock().clone()
    }

    pub fn update_unless_cancelled(
        &self,
        cancel: &CancellationToken,
        f: impl FnOnce(&mut DashboardData),
    ) -> bool {
        let mut data = self.lock();
        if cancel.is_cancelled() {
            return false;
        }
        f(&mut data);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> CostRecord {
        CostRecord {
            id: id.to_string(),
            name: None,
            costs: Vec::new(),
        }
    }

    #[test]
    fn test_context_clones_share_data() {
        let writer = CostsContext::new();
        let reader = writer.clone();

        writer.set_costs(vec![record("ws-1"), record("ss-1")]);
        writer.set_loading_state(LoadingState::Ok);

        let snapshot = reader.snapshot();
        assert_eq!(snapshot.costs.len(), 2);
        assert_eq!(snapshot.loading_state, LoadingState::Ok);
        assert!(snapshot.find("ss-1").is_some());
        assert!(snapshot.find("ws-9").is_none());
    }

    #[test]
    fn test_clear_empties_collection() {
        let context = CostsContext::new();
        context.set_costs(vec![record("ws-1")]);
        context.clear();
        assert!(context.snapshot().costs.is_empty());
    }

    #[test]
    fn test_cancelled_updates_are_dropped() {
        let context = CostsContext::new();
        let cancel = CancellationToken::new();

        assert!(context.update_unless_cancelled(&cancel, |s| s.costs.push(record("a"))));
        cancel.cancel();
        assert!(!context.update_unless_cancelled(&cancel, |s| s.costs.push(record("b"))));
        assert_eq!(context.snapshot().costs.len(), 1);
    }

    #[test]
    fn test_loading_state_defaults_to_loading() {
        let data = DashboardData::default();
        assert_eq!(data.loading_state, LoadingState::Loading);
        assert_eq!(data.cost_loading_state, LoadingState::Loading);
        assert_eq!(LoadingState::NotSupported.to_string(), "NotSupported");
    }
}
