use crate::config::Config;
use crate::domain::DayCount;
use crate::services::{AdvisorDraft, AdvisorError};
use crate::state::SharedState;

pub async fn cmd_create_advisor(
    config: &Config,
    draft: AdvisorDraft,
    days: u32,
) -> anyhow::Result<()> {
    let Some(days) = DayCount::new(days) else {
        println!("Days must be between 1 and {}.", DayCount::MAX);
        return Ok(());
    };

    let state = SharedState::new(config.clone()).await?;
    let result = state
        .advisor_service
        .create(AdvisorDraft {
            paid_days: Some(days),
            ..draft
        })
        .await;

    match result {
        Ok(advisor) => {
            println!("✓ Created: {} ({})", advisor.name, advisor.slug);
            println!("  URL: {}", config.server.advisor_url(&advisor.slug));
            println!("  Expires: {}", advisor.expires_at.format("%Y-%m-%d %H:%M"));
        }
        Err(AdvisorError::Validation(msg)) => println!("{msg}"),
        Err(e) => {
            state.shutdown().await?;
            return Err(e.into());
        }
    }

    state.shutdown().await
}
