use crate::events::AppEvent;
use async_channel::Sender;
use goalbook::{Goal, GoalProvider};
use std::sync::Arc;
use std::thread;
use tokio::runtime::Runtime;

/// Reads the goal list once, off the async threads. A provider that panics
/// counts as an empty list.
pub async fn fetch_goals(provider: Arc<dyn GoalProvider>) -> Vec<Goal> {
    match tokio::task::spawn_blocking(move || provider.read_goals()).await {
        Ok(goals) => goals,
        Err(e) => {
            log::error!("Error loading goals: {}", e);
            Vec::new()
        }
    }
}

pub fn start_background_services(tx: Sender<AppEvent>, provider: Arc<dyn GoalProvider>) {
    thread::spawn(move || {
        let rt = match Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Failed to create Tokio runtime: {}", e);
                return;
            }
        };

        rt.block_on(async {
            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let goals = fetch_goals(provider).await;
                    if tx.send(AppEvent::GoalsLoaded(goals)).await.is_err() {
                        log::debug!("Clock closed before goals arrived");
                    }
                });
            }

            {
                let tx = tx.clone();
                tokio::spawn(async move {
                    crate::config::run_async_watcher(tx).await;
                });
            }

            std::future::pending::<()>().await;
        });
    });
}
