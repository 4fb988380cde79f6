//! Renew, revoke, suspend and activate from the command line.

use crate::config::Config;
use crate::domain::DayCount;
use crate::services::AdvisorError;
use crate::state::SharedState;

/// Prints the outcome of a lifecycle call; unknown slugs are reported, not fatal.
fn report(slug: &str, result: Result<String, AdvisorError>) -> anyhow::Result<()> {
    match result {
        Ok(message) => {
            println!("✓ {message}");
            Ok(())
        }
        Err(AdvisorError::NotFound(_)) => {
            println!("Advisor '{slug}' not found.");
            println!("Use 'colmena list' to see slugs.");
            Ok(())
        }
        Err(AdvisorError::Validation(msg)) => {
            println!("{msg}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn cmd_renew(config: &Config, slug: &str, days: u32) -> anyhow::Result<()> {
    let Some(days) = DayCount::new(days) else {
        println!("Days must be between 1 and {}.", DayCount::MAX);
        return Ok(());
    };

    let state = SharedState::new(config.clone()).await?;
    let result = state
        .advisor_service
        .renew(slug, Some(days))
        .await
        .map(|r| {
            format!(
                "Renewed '{slug}' by {} days, now expires {}",
                r.days,
                r.new_expiration.format("%Y-%m-%d %H:%M")
            )
        });

    let outcome = report(slug, result);
    state.shutdown().await?;
    outcome
}

pub async fn cmd_revoke(
    config: &Config,
    slug: &str,
    reason: Option<String>,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let result = state
        .advisor_service
        .revoke(slug, reason)
        .await
        .map(|()| format!("Revoked '{slug}'"));

    let outcome = report(slug, result);
    state.shutdown().await?;
    outcome
}

pub async fn cmd_suspend(config: &Config, slug: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let result = state
        .advisor_service
        .suspend(slug)
        .await
        .map(|()| format!("Suspended '{slug}'"));

    let outcome = report(slug, result);
    state.shutdown().await?;
    outcome
}

pub async fn cmd_activate(config: &Config, slug: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let result = state
        .advisor_service
        .activate(slug)
        .await
        .map(|()| format!("Activated '{slug}'"));

    let outcome = report(slug, result);
    state.shutdown().await?;
    outcome
}
