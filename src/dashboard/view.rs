//! Lifetime of a mounted dashboard.

use crate::dashboard::loader::{DashboardLoader, LoaderFactory};
use crate::dashboard::state::{CostsState, DashboardData};
use crate::roles::RoleSet;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// A dashboard that is currently on screen.
///
/// Mounting starts the fetches; unmounting (or dropping) cancels whatever is
/// still pending and clears the shared cost data so the next view never sees
/// stale costs.
pub struct DashboardView {
    loader: DashboardLoader,
    roles: RoleSet,
    costs_cancel: CancellationToken,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardView {
    /// Starts the workspace fetch, and the cost fetch for administrators.
    /// Must be called from within a tokio runtime.
    pub fn mount(factory: &LoaderFactory, roles: RoleSet) -> Self {
        let loader = factory.create();
        let costs_cancel = loader.cancellation_token().child_token();
        let mut view = Self {
            loader,
            roles,
            costs_cancel,
            tasks: Vec::new(),
        };

        let workspaces = view.loader.clone();
        view.tasks
            .push(tokio::spawn(async move { workspaces.load_workspaces().await }));

        if view.roles.is_admin() {
            view.start_costs();
        }
        view
    }

    fn start_costs(&mut self) {
        self.costs_cancel = self.loader.cancellation_token().child_token();
        let costs = self.loader.with_cancellation(self.costs_cancel.clone());
        self.tasks
            .push(tokio::spawn(async move { costs.load_costs().await }));
    }

    fn stop_costs(&mut self) {
        self.costs_cancel.cancel();
        self.loader.costs().clear();
    }

    /// Applies a new role set. Losing the admin role stops the cost channel
    /// and clears the shared costs; gaining it starts the cost channel.
    pub fn set_roles(&mut self, roles: RoleSet) {
        let was_admin = self.roles.is_admin();
        self.roles = roles;
        match (was_admin, self.roles.is_admin()) {
            (true, false) => self.stop_costs(),
            (false, true) => self.start_costs(),
            _ => {}
        }
    }

    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    pub fn data(&self) -> DashboardData {
        self.loader.data()
    }

    pub fn costs(&self) -> CostsState {
        self.loader.costs().snapshot()
    }

    /// Whether every fetch started so far has finished, retries included.
    #[cfg(test)]
    pub fn is_settled(&self) -> bool {
        self.tasks.iter().all(JoinHandle::is_finished)
    }

    /// Waits for every fetch started so far to finish.
    ///
    /// A handle is only released once its task has finished, so dropping
    /// this future midway leaves the rest for [`DashboardView::unmount`].
    pub async fn wait(&mut self) {
        while let Some(task) = self.tasks.first_mut() {
            let result = task.await;
            self.tasks.remove(0);
            if let Err(e) = result {
                if e.is_panic() {
                    log::error!("dashboard fetch task panicked: {}", e);
                }
            }
        }
    }

    /// Tears the view down. Safe to call more than once.
    pub fn unmount(&mut self) {
        self.loader.cancellation_token().cancel();
        for task in &self.tasks {
            task.abort();
        }
        self.loader.costs().clear();
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiEndpoint, MockApiCall};
    use crate::dashboard::state::{CostsContext, LoadingState};
    use crate::dashboard::test_support::{costs_body, factory_with, throttled, workspaces_body};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Answers both endpoints successfully and counts cost calls.
    fn healthy_api(cost_calls: Arc<AtomicUsize>) -> MockApiCall {
        let mut api = MockApiCall::new();
        api.expect_call().returning(move |request| match request.endpoint {
            ApiEndpoint::Workspaces => Ok(workspaces_body(&["ws-1", "ws-2"])),
            ApiEndpoint::Costs => {
                cost_calls.fetch_add(1, Ordering::SeqCst);
                Ok(costs_body())
            }
        });
        api
    }

    #[tokio::test]
    async fn test_mount_as_admin_loads_both_channels() {
        let cost_calls = Arc::new(AtomicUsize::new(0));
        let costs = CostsContext::new();
        let (factory, _events) = factory_with(healthy_api(cost_calls.clone()), costs.clone());

        let mut view = DashboardView::mount(&factory, RoleSet::new(["TREAdmin"]));
        view.wait().await;

        assert!(view.is_settled());
        assert_eq!(view.data().loading_state, LoadingState::Ok);
        assert_eq!(view.data().cost_loading_state, LoadingState::Ok);
        assert_eq!(view.data().workspaces.len(), 2);
        assert_eq!(costs.snapshot().costs.len(), 3);
        assert_eq!(cost_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_mount_without_admin_skips_costs() {
        let cost_calls = Arc::new(AtomicUsize::new(0));
        let (factory, _events) =
            factory_with(healthy_api(cost_calls.clone()), CostsContext::new());

        let mut view = DashboardView::mount(&factory, RoleSet::new(["TREUser"]));
        view.wait().await;

        assert_eq!(view.data().loading_state, LoadingState::Ok);
        assert_eq!(view.data().cost_loading_state, LoadingState::Loading);
        assert_eq!(cost_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unmount_clears_shared_costs() {
        let costs = CostsContext::new();
        let (factory, _events) =
            factory_with(healthy_api(Arc::new(AtomicUsize::new(0))), costs.clone());

        let mut view = DashboardView::mount(&factory, RoleSet::new(["TREAdmin"]));
        view.wait().await;
        assert!(!costs.snapshot().costs.is_empty());

        view.unmount();
        assert!(costs.snapshot().costs.is_empty());

        // A second teardown is harmless.
        view.unmount();
        assert!(costs.snapshot().costs.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupted_wait_leaves_pending_fetches_to_unmount() {
        let mut api = MockApiCall::new();
        api.expect_call().returning(|request| match request.endpoint {
            ApiEndpoint::Workspaces => Ok(workspaces_body(&["ws-1"])),
            ApiEndpoint::Costs => Err(throttled(429, 60)),
        });
        let (factory, _events) = factory_with(api, CostsContext::new());
        let mut view = DashboardView::mount(&factory, RoleSet::new(["TREAdmin"]));

        // Give up while the cost fetch is still waiting to retry.
        let waited = tokio::time::timeout(Duration::from_secs(1), view.wait()).await;
        assert!(waited.is_err());
        assert_eq!(view.tasks.len(), 1);
        assert!(!view.tasks[0].is_finished());

        view.unmount();
        for task in view.tasks.drain(..) {
            match task.await {
                Ok(()) => {}
                Err(e) => assert!(e.is_cancelled()),
            }
        }
        assert_eq!(view.data().cost_loading_state, LoadingState::Loading);
    }

    #[tokio::test]
    async fn test_drop_clears_shared_costs() {
        let costs = CostsContext::new();
        let (factory, _events) =
            factory_with(healthy_api(Arc::new(AtomicUsize::new(0))), costs.clone());

        {
            let mut view = DashboardView::mount(&factory, RoleSet::new(["TREAdmin"]));
            view.wait().await;
            assert_eq!(costs.snapshot().costs.len(), 3);
        }
        assert!(costs.snapshot().costs.is_empty());
    }

    #[tokio::test]
    async fn test_teardown_clears_costs_written_by_someone_else() {
        let costs = CostsContext::new();
        let (factory, _events) =
            factory_with(healthy_api(Arc::new(AtomicUsize::new(0))), costs.clone());

        let mut view = DashboardView::mount(&factory, RoleSet::new(["TREUser"]));
        view.wait().await;
        costs.set_costs(serde_json::from_value(serde_json::json!([{"id": "stale"}])).unwrap());

        drop(view);
        assert!(costs.snapshot().costs.is_empty());
    }

    #[tokio::test]
    async fn test_losing_admin_clears_costs() {
        let costs = CostsContext::new();
        let (factory, _events) =
            factory_with(healthy_api(Arc::new(AtomicUsize::new(0))), costs.clone());

        let mut view = DashboardView::mount(&factory, RoleSet::new(["TREAdmin"]));
        view.wait().await;
        assert!(!costs.snapshot().costs.is_empty());

        view.set_roles(RoleSet::new(["TREUser"]));
        assert!(costs.snapshot().costs.is_empty());
        assert!(!view.roles().is_admin());
    }

    #[tokio::test]
    async fn test_gaining_admin_starts_cost_channel() {
        let cost_calls = Arc::new(AtomicUsize::new(0));
        let costs = CostsContext::new();
        let (factory, _events) = factory_with(healthy_api(cost_calls.clone()), costs.clone());

        let mut view = DashboardView::mount(&factory, RoleSet::default());
        view.set_roles(RoleSet::new(["TREAdmin"]));
        view.wait().await;

        assert_eq!(cost_calls.load(Ordering::SeqCst), 1);
        assert_eq!(view.data().cost_loading_state, LoadingState::Ok);
        assert_eq!(costs.snapshot().costs.len(), 3);
    }
}
