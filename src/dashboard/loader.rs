//! Dashboard data loading
//!
//! Two independent channels feed the dashboard: the workspace list and the
//! cost data. Each keeps its own [`LoadingState`]; the cost channel retries
//! on throttling responses for as long as the server keeps asking.

use crate::api::error::{ApiError, ReportedError};
use crate::api::error_handler::{ErrorClass, ErrorHandler};
use crate::api::{ApiCall, ApiEndpoint, ApiRequest};
use crate::consts::cli_consts::messages;
use crate::dashboard::models::{CostsResponse, WorkspacesResponse};
use crate::dashboard::state::{
    CostsContext, DashboardData, LoadingState, SharedDashboardData,
};
use crate::events::{EventSender, EventType};
use crate::logging::LogLevel;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

/// Knobs for the loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Emit diagnostics for unsupported endpoints and scheduled retries.
    pub debug: bool,
    /// Maximum number of throttled cost retries. `None` retries forever.
    pub max_cost_retries: Option<u32>,
}

/// Loads the data of one dashboard view.
///
/// Clones share state and cancellation. Once the token fires the loader stops
/// at its next await point and performs no further state writes.
#[derive(Clone)]
pub struct DashboardLoader {
    api: Arc<dyn ApiCall>,
    data: SharedDashboardData,
    costs: CostsContext,
    events: EventSender,
    options: LoaderOptions,
    error_handler: ErrorHandler,
    cancel: CancellationToken,
}

impl DashboardLoader {
    pub fn new(
        api: Arc<dyn ApiCall>,
        costs: CostsContext,
        events: EventSender,
        options: LoaderOptions,
    ) -> Self {
        Self {
            api,
            data: SharedDashboardData::default(),
            costs,
            events,
            options,
            error_handler: ErrorHandler::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Snapshot of the view-local state.
    pub fn data(&self) -> DashboardData {
        self.data.snapshot()
    }

    pub fn costs(&self) -> &CostsContext {
        &self.costs
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Same loader, stopped by `cancel` instead of the view's own token.
    pub fn with_cancellation(&self, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            ..self.clone()
        }
    }

    fn update(&self, f: impl FnOnce(&mut DashboardData)) -> bool {
        self.data.update_unless_cancelled(&self.cancel, f)
    }

    fn set_shared_cost_state(&self, state: LoadingState) -> bool {
        self.costs
            .update_unless_cancelled(&self.cancel, |costs| costs.loading_state = state)
    }

    /// Fetches the workspace list once. Failures are stored, never retried.
    pub async fn load_workspaces(&self) {
        if !self.update(|data| data.loading_state = LoadingState::Loading) {
            return;
        }
        self.events
            .send_workspaces_event(
                "Fetching workspaces...".to_string(),
                EventType::Refresh,
                LogLevel::Info,
            )
            .await;

        let result = self
            .api
            .call(ApiRequest::get(ApiEndpoint::Workspaces))
            .await
            .and_then(WorkspacesResponse::from_value);

        match result {
            Ok(response) => {
                let mut count = None;
                let applied = self.update(|data| {
                    // A response without a list keeps whatever we had.
                    if let Some(workspaces) = response.workspaces {
                        count = Some(workspaces.len());
                        data.workspaces = workspaces;
                    }
                    data.loading_state = LoadingState::Ok;
                });
                if !applied {
                    return;
                }
                let msg = match count {
                    Some(n) => format!("Loaded {} workspaces", n),
                    None => "Workspace response carried no list".to_string(),
                };
                self.events
                    .send_workspaces_event(msg, EventType::Success, LogLevel::Info)
                    .await;
            }
            Err(e) => {
                let log_level = self.error_handler.log_level(&e);
                let msg = format!("Failed to fetch workspaces: {}", e);
                let reported = ReportedError::new(e).with_user_message(messages::WORKSPACES_ERROR);
                let applied = self.update(|data| {
                    data.api_error = Some(reported);
                    data.loading_state = LoadingState::Error;
                });
                if applied {
                    self.events
                        .send_workspaces_event(msg, EventType::Error, log_level)
                        .await;
                }
            }
        }
    }

    /// Fetches cost data, retrying after the server-given delay whenever the
    /// response is throttled.
    pub async fn load_costs(&self) {
        let mut retries: u32 = 0;

        loop {
            if !self.set_shared_cost_state(LoadingState::Loading) {
                return;
            }
            self.events
                .send_costs_event(
                    "Fetching costs...".to_string(),
                    EventType::Refresh,
                    LogLevel::Info,
                )
                .await;

            let result = self
                .api
                .call(ApiRequest::get(ApiEndpoint::Costs))
                .await
                .and_then(CostsResponse::from_value);

            let error = match result {
                Ok(response) => {
                    self.apply_costs(response).await;
                    return;
                }
                Err(e) => e,
            };

            match self.error_handler.classify(&error) {
                ErrorClass::NotSupported => {
                    if self.options.debug {
                        self.events
                            .send_costs_event(
                                format!("Costs not supported: {}", error),
                                EventType::Error,
                                LogLevel::Warn,
                            )
                            .await;
                    }
                    self.fail_costs(ReportedError::new(error), LoadingState::NotSupported);
                    return;
                }
                ErrorClass::Throttled(delay) => {
                    if self.retry_budget_exhausted(retries) {
                        self.fail_costs_generic(error).await;
                        return;
                    }
                    retries += 1;
                    if !self.wait_for_retry(delay).await {
                        return;
                    }
                }
                ErrorClass::Generic => {
                    self.fail_costs_generic(error).await;
                    return;
                }
            }
        }
    }

    async fn apply_costs(&self, response: CostsResponse) {
        let records = response.into_records();
        let count = records.len();
        let applied = self.costs.update_unless_cancelled(&self.cancel, |costs| {
            costs.costs = records;
            costs.loading_state = LoadingState::Ok;
        });
        if !applied || !self.update(|data| data.cost_loading_state = LoadingState::Ok) {
            return;
        }
        self.events
            .send_costs_event(
                format!("Loaded {} cost records", count),
                EventType::Success,
                LogLevel::Info,
            )
            .await;
    }

    fn retry_budget_exhausted(&self, retries: u32) -> bool {
        self.options
            .max_cost_retries
            .is_some_and(|max| retries >= max)
    }

    /// Sleeps for `delay` unless the view goes away first.
    /// Returns `false` when cancelled.
    async fn wait_for_retry(&self, delay: Duration) -> bool {
        if self.options.debug {
            self.events
                .send_costs_event(
                    format!("retrying after {} seconds", delay.as_secs_f64()),
                    EventType::Waiting,
                    LogLevel::Info,
                )
                .await;
        }
        tokio::select! {
            _ = self.cancel.cancelled() => false,
            _ = sleep(delay) => true,
        }
    }

    async fn fail_costs_generic(&self, error: ApiError) {
        let log_level = self.error_handler.log_level(&error);
        let msg = format!("Failed to fetch costs: {}", error);
        let reported = ReportedError::new(error).with_user_message(messages::COSTS_ERROR);
        if self.fail_costs(reported, LoadingState::Error) {
            self.events
                .send_costs_event(msg, EventType::Error, log_level)
                .await;
        }
    }

    /// Records a terminal cost failure. The shared context is marked Error
    /// in every branch; the local state takes `local_state`.
    fn fail_costs(&self, reported: ReportedError, local_state: LoadingState) -> bool {
        if !self.set_shared_cost_state(LoadingState::Error) {
            return false;
        }
        self.update(|data| {
            data.cost_loading_state = local_state;
            data.cost_api_error = Some(reported);
        })
    }
}

/// Creates a fresh [`DashboardLoader`] for every mount of the dashboard.
#[derive(Clone)]
pub struct LoaderFactory {
    api: Arc<dyn ApiCall>,
    costs: CostsContext,
    events: EventSender,
    options: LoaderOptions,
}

impl LoaderFactory {
    pub fn new(
        api: Arc<dyn ApiCall>,
        costs: CostsContext,
        events: EventSender,
        options: LoaderOptions,
    ) -> Self {
        Self {
            api,
            costs,
            events,
            options,
        }
    }

    pub fn create(&self) -> DashboardLoader {
        DashboardLoader::new(
            self.api.clone(),
            self.costs.clone(),
            self.events.clone(),
            self.options.clone(),
        )
    }

    pub fn costs(&self) -> &CostsContext {
        &self.costs
    }

    pub fn events(&self) -> &EventSender {
        &self.events
    }
}
