use hero_client::clients::{HeroClient, HEROES_URL};
use hero_client::framework::mock::capture_diagnostics;
use hero_client::in_memory::HeroStoreActor;
use hero_client::lifecycle::HeroSystem;
use hero_client::messages::MessageService;
use hero_client::model::Hero;
use std::sync::Arc;

/// Full end-to-end test against the in-memory backend.
#[tokio::test]
async fn test_full_hero_lifecycle() {
    let system = HeroSystem::new();
    let client = &system.hero_client;

    // List the seeded roster
    let heroes = client.get_heroes().await;
    assert_eq!(heroes.len(), 9);
    assert_eq!(heroes[0], Hero::new(12, "Dr. Nice"));

    // Create: the server assigns the next id
    let created = client.add_hero(Hero::unsaved("Nova")).await.expect("Hero not created");
    assert_eq!(created, Hero::new(21, "Nova"));

    // Read it back both ways
    assert_eq!(client.get_hero(21).await, Some(created.clone()));
    assert_eq!(client.get_hero_no_404(21).await, Some(created.clone()));

    // Update: the in-memory backend answers with no body
    let renamed = Hero::new(21, "Supernova");
    assert_eq!(client.update_hero(&renamed).await, None);
    assert_eq!(client.get_hero(21).await, Some(renamed.clone()));

    // Search is a case-insensitive substring match
    let found = client.search_heroes("NOVA").await;
    assert_eq!(found, vec![renamed.clone()]);

    // Delete by hero, then confirm it is gone
    client.delete_hero(&renamed).await;
    assert_eq!(client.get_hero_no_404(21).await, None);

    assert_eq!(
        system.messages.messages(),
        vec![
            "HeroService: fetched heroes",
            "HeroService: added hero w/ id=none",
            "HeroService: fetched hero id=21",
            "HeroService: fetched hero id=21",
            "HeroService: updated hero id=21",
            "HeroService: fetched hero id=21",
            "HeroService: found heroes matching \"NOVA\"",
            "HeroService: deleted hero id=21",
            "HeroService: did not find hero id=21",
        ]
    );

    system.shutdown().await.expect("Failed to shutdown system");
}

/// A missing hero is a failure for the single-resource lookup but not for the
/// filtered one.
#[tokio::test]
async fn test_missing_hero_lookup_variants() {
    let system = HeroSystem::new();
    let (diagnostics, _guard) = capture_diagnostics();

    assert_eq!(system.hero_client.get_hero(99).await, None);
    assert_eq!(system.hero_client.get_hero_no_404(99).await, None);

    assert_eq!(
        system.messages.messages(),
        vec![
            "HeroService: getHero id=99 failed: Http failure response for api/heroes/99: 404 Not Found",
            "HeroService: did not find hero id=99",
        ]
    );
    assert_eq!(diagnostics.operations(), vec!["getHero id=99"]);

    system.shutdown().await.unwrap();
}

/// Search never reaches the backend for blank terms and logs both outcomes otherwise.
#[tokio::test]
async fn test_search_against_backend() {
    let system = HeroSystem::new();

    assert!(system.hero_client.search_heroes(" ").await.is_empty());
    let found = system.hero_client.search_heroes("ma").await;
    let names: Vec<&str> = found.iter().map(|hero| hero.name.as_str()).collect();
    assert_eq!(names, vec!["Magneta", "RubberMan", "Dynama", "Magma"]);
    assert!(system.hero_client.search_heroes("xyz").await.is_empty());

    assert_eq!(
        system.messages.messages(),
        vec![
            "HeroService: found heroes matching \"ma\"",
            "HeroService: no heroes matching \"xyz\"",
        ]
    );

    system.shutdown().await.unwrap();
}

/// Once the backend is gone every call degrades to its fallback.
#[tokio::test]
async fn test_closed_backend_degrades_every_operation() {
    let (actor, transport) = HeroStoreActor::new(4, HEROES_URL, vec![Hero::new(1, "Solo")]);
    let handle = tokio::spawn(actor.run());
    handle.abort();
    let _ = handle.await;

    let messages = Arc::new(MessageService::new());
    let client = HeroClient::new(Arc::new(transport), messages.clone());

    let (diagnostics, _guard) = capture_diagnostics();
    assert!(client.get_heroes().await.is_empty());
    assert_eq!(client.get_hero(1).await, None);
    assert_eq!(client.add_hero(Hero::unsaved("X")).await, None);
    assert_eq!(client.delete_hero(1).await, None);
    assert_eq!(client.update_hero(&Hero::new(1, "X")).await, None);

    assert_eq!(diagnostics.count(), 5);
    assert_eq!(messages.len(), 5);
    assert!(messages
        .messages()
        .iter()
        .all(|message| message.ends_with("failed: Transport closed")));
}

/// Many clients share one backend without losing writes.
#[tokio::test]
async fn test_concurrent_creates() {
    let system = HeroSystem::with_heroes(vec![]);

    let mut handles = vec![];
    for i in 0..10 {
        let client = system.hero_client.clone();
        handles.push(tokio::spawn(async move {
            client.add_hero(Hero::unsaved(format!("Hero {i}"))).await
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        let created = handle.await.unwrap().expect("Hero not created");
        ids.push(created.id.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (11..21).collect::<Vec<_>>());

    let everyone = system.hero_client.get_heroes().await;
    assert_eq!(everyone.len(), 10);
    assert_eq!(everyone[0].id, Some(11));

    system.shutdown().await.unwrap();
}
