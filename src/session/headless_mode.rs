//! Headless mode execution

use super::{
    SessionData,
    messages::{print_session_exit_success, print_session_interrupted, print_session_starting},
};
use crate::dashboard::{DashboardView, LoadingState};
use crate::events::Event;
use crate::ui::dashboard::rows::workspace_rows;
use std::error::Error;

fn print_event(event: &Event) {
    if event.should_display() {
        println!("{}", event);
    }
}

/// Prints the settled dashboard: any errors, then one row per workspace.
fn print_summary(view: &DashboardView) {
    let data = view.data();
    let costs = view.costs();
    let show_costs = view.roles().is_admin();

    if data.loading_state == LoadingState::Error {
        if let Some(error) = &data.api_error {
            crate::print_cmd_error!("Workspaces", &error.to_string());
        }
    }
    if show_costs {
        match data.cost_loading_state {
            LoadingState::Error => {
                if let Some(error) = &data.cost_api_error {
                    crate::print_cmd_error!("Costs", &error.to_string());
                }
            }
            LoadingState::NotSupported => {
                crate::print_cmd_info!("Costs", "not supported by this deployment");
            }
            _ => {}
        }
    }

    let rows = workspace_rows(&data, &costs, show_costs);
    println!("{:<38} {:<32} {}", "ID", "WORKSPACE", "COST");
    for row in &rows {
        println!("{:<38} {:<32} {}", row.id, row.name, row.cost);
    }
    println!("{} workspace(s)", rows.len());
}

/// Runs the dashboard once without a terminal UI
///
/// Mounts the dashboard, prints loader events as they arrive and, once every
/// fetch has settled, prints the resulting table. Ctrl+C unmounts the
/// dashboard early.
pub async fn run_headless_mode(mut session: SessionData) -> Result<(), Box<dyn Error>> {
    print_session_starting("headless", &session.api_url, &session.roles);

    let mut view = DashboardView::mount(&session.loader_factory, session.roles.clone());
    let mut interrupted = false;
    {
        let settled = view.wait();
        tokio::pin!(settled);
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                Some(event) = session.event_receiver.recv() => print_event(&event),
                _ = &mut settled => break,
                _ = &mut ctrl_c => {
                    interrupted = true;
                    break;
                }
            }
        }
    }

    if interrupted {
        print_session_interrupted();
    }
    while let Ok(event) = session.event_receiver.try_recv() {
        print_event(&event);
    }
    if !interrupted {
        print_summary(&view);
    }
    view.unmount();

    print_session_exit_success();
    Ok(())
}
