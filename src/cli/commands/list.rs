use crate::config::Config;
use crate::domain::AdvisorStatus;
use crate::services::AdvisorError;
use crate::state::SharedState;

fn status_indicator(status: AdvisorStatus, expired: bool) -> &'static str {
    if expired {
        return "⌛";
    }
    match status {
        AdvisorStatus::Active => "🟢",
        AdvisorStatus::Suspended => "⏸",
        AdvisorStatus::Revoked => "✗",
    }
}

pub async fn cmd_list_advisors(config: &Config) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let advisors = state.advisor_service.list().await?;
    let now = state.clock.now();

    if advisors.is_empty() {
        println!("No advisors yet.");
        println!();
        println!("Create one with: colmena create --name \"Nombre\" --email ... \\");
        println!("    --phone ... --company ... --days 30");
        state.shutdown().await?;
        return Ok(());
    }

    println!("Advisors ({} total)", advisors.len());
    println!("{:-<70}", "");

    for advisor in &advisors {
        let expired = advisor.is_expired_at(now);
        println!(
            "{} {} [{}]",
            status_indicator(advisor.status, expired),
            advisor.name,
            advisor.slug
        );
        println!(
            "  Status: {} | Expires: {} | Visits: {} | Quotes: {} | Clients: {}",
            advisor.status,
            advisor.expires_at.format("%Y-%m-%d"),
            advisor.total_accesses,
            advisor.quotes_generated,
            advisor.unique_clients.len()
        );
    }

    println!();
    println!("Legend: 🟢 Active | ⏸ Suspended | ✗ Revoked | ⌛ Expired");

    state.shutdown().await
}

pub async fn cmd_show_advisor(config: &Config, slug: &str) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;

    let advisor = match state.advisor_service.get(slug).await {
        Ok(a) => a,
        Err(AdvisorError::NotFound(_)) => {
            println!("Advisor '{slug}' not found.");
            state.shutdown().await?;
            return Ok(());
        }
        Err(e) => {
            state.shutdown().await?;
            return Err(e.into());
        }
    };

    println!("{} ({})", advisor.name, advisor.company);
    println!("{:-<70}", "");
    println!("  URL:      {}", config.server.advisor_url(&advisor.slug));
    println!("  Email:    {}", advisor.email);
    println!("  Phone:    {}", advisor.phone);
    println!("  Status:   {}", advisor.status);
    println!("  Started:  {}", advisor.start_date.format("%Y-%m-%d %H:%M"));
    println!("  Expires:  {}", advisor.expires_at.format("%Y-%m-%d %H:%M"));
    println!(
        "  Visits:   {} | Quotes: {} | Clients: {}",
        advisor.total_accesses,
        advisor.quotes_generated,
        advisor.unique_clients.len()
    );

    if let Some(reason) = &advisor.cancellation_reason {
        println!("  Revoked:  {reason}");
    }

    if !advisor.renewals.is_empty() {
        println!();
        println!("Renewals:");
        for renewal in &advisor.renewals {
            println!(
                "  {} +{} days -> {}",
                renewal.renewed_at.format("%Y-%m-%d"),
                renewal.days,
                renewal.new_expiration.format("%Y-%m-%d")
            );
        }
    }

    let events = state.activity_service.list(slug).await?;
    if !events.is_empty() {
        println!();
        println!("Recent activity ({}):", events.len());
        for event in events.iter().take(10) {
            println!(
                "  {} {} {}",
                event.occurred_at.format("%Y-%m-%d %H:%M"),
                event.kind,
                event
                    .client_email
                    .as_deref()
                    .or(event.client_name.as_deref())
                    .unwrap_or("-")
            );
        }
    }

    state.shutdown().await
}
