//! Session setup and initialization

use crate::api::ApiClient;
use crate::config::Config;
use crate::consts::cli_consts::EVENT_QUEUE_SIZE;
use crate::dashboard::{CostsContext, LoaderFactory, LoaderOptions};
use crate::events::{Event, EventSender};
use crate::roles::RoleSet;
use std::error::Error;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Session data for both TUI and headless modes
pub struct SessionData {
    /// Receives events from the dashboard loaders
    pub event_receiver: mpsc::Receiver<Event>,
    /// Creates one loader per dashboard mount
    pub loader_factory: LoaderFactory,
    /// Roles of the signed-in user
    pub roles: RoleSet,
    /// API base URL (for display purposes)
    pub api_url: String,
}

/// Sets up a console session from the resolved configuration.
///
/// Builds the API client, the event channel and the cost data shared by
/// every view of this session.
pub fn setup_session(config: &Config) -> Result<SessionData, Box<dyn Error>> {
    let client = ApiClient::new(config.api_url.clone(), config.access_token.clone())?;
    let api_url = client.base_url().trim_end_matches('/').to_string();
    let (event_sender, event_receiver) = mpsc::channel::<Event>(EVENT_QUEUE_SIZE);

    let options = LoaderOptions {
        debug: config.debug,
        max_cost_retries: config.max_cost_retries,
    };
    let loader_factory = LoaderFactory::new(
        Arc::new(client),
        CostsContext::new(),
        EventSender::new(event_sender),
        options,
    );

    Ok(SessionData {
        event_receiver,
        loader_factory,
        roles: config.role_set(),
        api_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_session_carries_roles_and_url() {
        let config = Config {
            api_url: "https://tre.example.org/".to_string(),
            roles: vec!["TREAdmin".to_string()],
            ..Config::default()
        };
        let session = setup_session(&config).unwrap();
        assert!(session.roles.is_admin());
        assert_eq!(session.api_url, "https://tre.example.org");
        assert!(session.loader_factory.costs().snapshot().costs.is_empty());
    }
}
