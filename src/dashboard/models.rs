//! Records returned by the workspaces and costs endpoints.

use crate::api::error::ApiError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A workspace as listed by the API. Only `id` is interpreted; everything
/// else is carried through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkspaceSummary {
    /// `properties.display_name` when present, otherwise the id.
    pub fn display_name(&self) -> &str {
        self.extra
            .get("properties")
            .and_then(|properties| properties.get("display_name"))
            .and_then(Value::as_str)
            .unwrap_or(&self.id)
    }
}

/// One cost line of a [`CostRecord`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostItem {
    pub cost: f64,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

/// Cost of a workspace or shared service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub costs: Vec<CostItem>,
}

impl CostRecord {
    pub fn total(&self) -> f64 {
        self.costs.iter().map(|item| item.cost).sum()
    }

    /// Currency of the first item that names one.
    pub fn currency(&self) -> Option<&str> {
        self.costs.iter().find_map(|item| item.currency.as_deref())
    }
}

/// Body of `GET /api/workspaces`.
#[derive(Debug, Default, Deserialize)]
pub struct WorkspacesResponse {
    #[serde(default)]
    pub workspaces: Option<Vec<WorkspaceSummary>>,
}

impl WorkspacesResponse {
    /// An empty body is accepted and carries no workspaces.
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        if value.is_null() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// Body of `GET /api/costs`.
#[derive(Debug, Deserialize)]
pub struct CostsResponse {
    pub workspaces: Vec<CostRecord>,
    pub shared_services: Vec<CostRecord>,
}

impl CostsResponse {
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Workspace costs followed by shared-service costs.
    pub fn into_records(self) -> Vec<CostRecord> {
        let mut records = self.workspaces;
        records.extend(self.shared_services);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workspace_keeps_unknown_fields() {
        let workspace: WorkspaceSummary = serde_json::from_value(json!({
            "id": "ws-1",
            "templateName": "tre-workspace-base",
            "properties": {"display_name": "Cancer research"}
        }))
        .unwrap();

        assert_eq!(workspace.id, "ws-1");
        assert_eq!(workspace.display_name(), "Cancer research");
        assert_eq!(
            workspace.extra.get("templateName"),
            Some(&json!("tre-workspace-base"))
        );
    }

    #[test]
    fn test_workspace_display_name_falls_back_to_id() {
        let workspace: WorkspaceSummary = serde_json::from_value(json!({"id": "ws-2"})).unwrap();
        assert_eq!(workspace.display_name(), "ws-2");
    }

    #[test]
    fn test_workspaces_response_shapes() {
        let response = WorkspacesResponse::from_value(json!({"workspaces": [{"id": "a"}]})).unwrap();
        assert_eq!(response.workspaces.map(|w| w.len()), Some(1));

        let response = WorkspacesResponse::from_value(json!({})).unwrap();
        assert!(response.workspaces.is_none());

        let response = WorkspacesResponse::from_value(Value::Null).unwrap();
        assert!(response.workspaces.is_none());

        assert!(WorkspacesResponse::from_value(json!({"workspaces": "nope"})).is_err());
    }

    #[test]
    fn test_costs_concatenate_workspaces_first() {
        let response = CostsResponse::from_value(json!({
            "workspaces": [{"id": "ws-1", "costs": [{"cost": 1.5, "currency": "USD"}]}],
            "shared_services": [{"id": "ss-1", "name": "firewall"}, {"id": "ss-2"}]
        }))
        .unwrap();

        let ids: Vec<String> = response
            .into_records()
            .into_iter()
            .map(|record| record.id)
            .collect();
        assert_eq!(ids, vec!["ws-1", "ss-1", "ss-2"]);
    }

    #[test]
    fn test_costs_require_both_lists() {
        assert!(CostsResponse::from_value(json!({"workspaces": []})).is_err());
        assert!(CostsResponse::from_value(Value::Null).is_err());
    }

    #[test]
    fn test_cost_totals() {
        let record: CostRecord = serde_json::from_value(json!({
            "id": "ws-1",
            "costs": [
                {"cost": 10.25, "date": "2022-05-01"},
                {"cost": 4.75, "currency": "GBP", "date": "2022-05-02"}
            ]
        }))
        .unwrap();
        assert_eq!(record.total(), 15.0);
        assert_eq!(record.currency(), Some("GBP"));
    }
}
