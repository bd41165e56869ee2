use crate::clients::{HeroClient, HEROES_URL};
use crate::in_memory::{self, HeroStoreActor};
use crate::messages::MessageService;
use crate::model::Hero;
use std::sync::Arc;
use tracing::{error, info};

/// A hero client wired to a running in-memory backend.
///
/// `HeroSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the backend actor
/// - **Dependency Wiring**: Injecting the transport and [`MessageService`] into the client
///
/// # Example
///
/// ```ignore
/// let system = HeroSystem::new();
///
/// let heroes = system.hero_client.get_heroes().await;
/// println!("{:?}", system.messages.messages());
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct HeroSystem {
    /// Client for the heroes collection
    pub hero_client: HeroClient,

    /// Every message the client has logged
    pub messages: Arc<MessageService>,

    /// Task handle of the backend actor (used for graceful shutdown)
    handle: tokio::task::JoinHandle<()>,
}

impl HeroSystem {
    /// Starts a backend seeded with the default roster.
    pub fn new() -> Self {
        let (actor, transport) = in_memory::new();
        Self::start(actor, transport)
    }

    /// Starts a backend seeded with `heroes`.
    pub fn with_heroes(heroes: Vec<Hero>) -> Self {
        let (actor, transport) = HeroStoreActor::new(32, HEROES_URL, heroes);
        Self::start(actor, transport)
    }

    fn start(actor: HeroStoreActor, transport: crate::framework::ChannelTransport) -> Self {
        let messages = Arc::new(MessageService::new());
        let hero_client = HeroClient::new(Arc::new(transport), messages.clone());
        let handle = tokio::spawn(actor.run());

        Self {
            hero_client,
            messages,
            handle,
        }
    }

    /// Gracefully shuts down the backend.
    ///
    /// Dropping the client drops the last transport handle, which closes the channel;
    /// the actor then leaves its loop. Clones of the client held elsewhere keep the
    /// backend alive until they are dropped too.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the backend shut down cleanly
    /// - `Err(String)` if the backend task failed or panicked
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.hero_client);

        if let Err(e) = self.handle.await {
            error!("Backend task failed: {:?}", e);
            return Err(format!("Backend task failed: {:?}", e));
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for HeroSystem {
    fn default() -> Self {
        Self::new()
    }
}
