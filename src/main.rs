use hero_client::clients::HeroClient;
use hero_client::config::{ClientConfig, BASE_URL_VAR};
use hero_client::lifecycle::{setup_tracing, HeroSystem};
use hero_client::messages::MessageService;
use hero_client::model::Hero;
use hero_client::transport::HttpTransport;
use std::sync::Arc;
use tracing::{info, Instrument};

/// Runs every operation once and reports what the client logged.
async fn tour(client: &HeroClient) {
    let heroes = client.get_heroes().await;
    info!(count = heroes.len(), "Listed heroes");

    let first = heroes.first().and_then(|hero| hero.id).unwrap_or(12);
    if let Some(hero) = client.get_hero(first).await {
        info!(?hero, "Fetched hero");
    }
    client.get_hero(9999).await;
    client.get_hero_no_404(9999).await;

    let found = client.search_heroes("ma").await;
    info!(count = found.len(), "Searched heroes");
    client.search_heroes("   ").await;

    let Some(created) = client.add_hero(Hero::unsaved("Nova")).await else {
        return;
    };
    info!(?created, "Added hero");

    let renamed = Hero {
        name: "Supernova".to_string(),
        ..created
    };
    client.update_hero(&renamed).await;
    client.delete_hero(&renamed).await;
}

#[tokio::main]
async fn main() -> Result<(), String> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;

    if std::env::var(BASE_URL_VAR).is_ok() {
        info!(base_url = %config.base_url, "Using remote backend");
        let transport = HttpTransport::from_config(&config).map_err(|e| e.to_string())?;
        let messages = Arc::new(MessageService::new());
        let client = HeroClient::with_endpoint(Arc::new(transport), messages.clone(), config.heroes_path);

        tour(&client).instrument(tracing::info_span!("tour")).await;
        for message in messages.messages() {
            info!("{}", message);
        }
        return Ok(());
    }

    info!("Using in-memory backend");
    let system = HeroSystem::new();

    tour(&system.hero_client).instrument(tracing::info_span!("tour")).await;
    for message in system.messages.messages() {
        info!("{}", message);
    }

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
