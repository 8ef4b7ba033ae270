//! Table rows derived from the fetched workspaces and the shared costs.

use crate::dashboard::models::CostRecord;
use crate::dashboard::{CostsState, DashboardData, LoadingState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRow {
    pub id: String,
    pub name: String,
    pub cost: String,
}

/// One row per fetched workspace, in response order.
pub fn workspace_rows(data: &DashboardData, costs: &CostsState, show_costs: bool) -> Vec<WorkspaceRow> {
    data.workspaces
        .iter()
        .map(|workspace| WorkspaceRow {
            id: workspace.id.clone(),
            name: workspace.display_name().to_string(),
            cost: cost_cell(&workspace.id, data.cost_loading_state, costs, show_costs),
        })
        .collect()
}

/// Text of the cost column for one workspace.
pub fn cost_cell(id: &str, state: LoadingState, costs: &CostsState, show_costs: bool) -> String {
    if !show_costs {
        return "-".to_string();
    }
    match state {
        LoadingState::Loading => "…".to_string(),
        LoadingState::NotSupported => "n/a".to_string(),
        LoadingState::Error => "-".to_string(),
        LoadingState::Ok => costs
            .find(id)
            .map(format_cost)
            .unwrap_or_else(|| "-".to_string()),
    }
}

pub fn format_cost(record: &CostRecord) -> String {
    match record.currency() {
        Some(currency) => format!("{:.2} {}", record.total(), currency),
        None => format!("{:.2}", record.total()),
    }
}
