//! # Hero Client
//!
//! One method per hero operation. Every method resolves to a plain value: transport
//! failures are logged and replaced with a fallback by [`Fallback`], so callers only
//! ever see degraded data (an empty list, `None`), never an error.
//!
//! Every message written to the sink is prefixed with `HeroService: `.

use crate::clients::ResourceClient;
use crate::framework::{Fallback, MessageSink, Transport, TransportError};
use crate::messages::ScopedSink;
use crate::model::{DisplayId, Hero, HeroId, HeroRef};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Collection endpoint used when none is configured.
pub const HEROES_URL: &str = "api/heroes";

/// Prefix of every message this client writes to its sink.
pub const LOG_SOURCE: &str = "HeroService";

/// Client for the heroes collection.
///
/// Holds no state besides its two collaborators, so clones are cheap and any number
/// of calls may be in flight at once.
#[derive(Clone)]
pub struct HeroClient {
    inner: ResourceClient,
    log: ScopedSink,
}

impl HeroClient {
    pub fn new(transport: Arc<dyn Transport>, messages: Arc<dyn MessageSink>) -> Self {
        Self::with_endpoint(transport, messages, HEROES_URL)
    }

    pub fn with_endpoint(
        transport: Arc<dyn Transport>,
        messages: Arc<dyn MessageSink>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            inner: ResourceClient::new(transport, endpoint),
            log: ScopedSink::new(LOG_SOURCE, messages),
        }
    }

    pub fn endpoint(&self) -> &str {
        self.inner.endpoint()
    }

    fn log(&self, message: String) {
        self.log.add(message);
    }

    /// `GET {endpoint}`. Falls back to an empty list.
    #[instrument(skip(self))]
    pub async fn get_heroes(&self) -> Vec<Hero> {
        let call = async {
            let heroes: Vec<Hero> = self.inner.get(self.endpoint().to_string()).await?;
            self.log("fetched heroes".into());
            Ok::<_, TransportError>(heroes)
        };
        Fallback::with_value("getHeroes", Vec::new())
            .settle(&self.log, call)
            .await
    }

    /// `GET {endpoint}/{id}`. Falls back to `None`.
    #[instrument(skip(self))]
    pub async fn get_hero(&self, id: HeroId) -> Option<Hero> {
        let call = async {
            let hero: Hero = self.inner.get(self.inner.item_url(id)).await?;
            self.log(format!("fetched hero id={id}"));
            Ok::<_, TransportError>(Some(hero))
        };
        Fallback::new(format!("getHero id={id}"))
            .settle(&self.log, call)
            .await
    }

    /// `GET {endpoint}/?id={id}`, keeping the first match.
    ///
    /// Backends that answer a missing single resource with 404 still answer a filtered
    /// query with an empty list. An empty result is therefore a success (`None` plus a
    /// "did not find" message) and only a real transport failure takes the failure path.
    #[instrument(skip(self))]
    pub async fn get_hero_no_404(&self, id: HeroId) -> Option<Hero> {
        let call = async {
            let heroes: Vec<Hero> = self.inner.get(self.inner.query_url("id", id)).await?;
            let hero = heroes.into_iter().next();
            let outcome = if hero.is_some() { "fetched" } else { "did not find" };
            self.log(format!("{outcome} hero id={id}"));
            Ok::<_, TransportError>(hero)
        };
        // The operation name is the literal text `getHero id={id}`, braces included.
        Fallback::new("getHero id={id}").settle(&self.log, call).await
    }

    /// `GET {endpoint}/?name={term}`. A blank term returns `[]` without any request or log.
    #[instrument(skip(self))]
    pub async fn search_heroes(&self, term: &str) -> Vec<Hero> {
        if term.trim().is_empty() {
            return Vec::new();
        }
        let call = async {
            let heroes: Vec<Hero> = self.inner.get(self.inner.query_url("name", term)).await?;
            if heroes.is_empty() {
                self.log(format!("no heroes matching \"{term}\""));
            } else {
                self.log(format!("found heroes matching \"{term}\""));
            }
            Ok::<_, TransportError>(heroes)
        };
        Fallback::with_value("searchHeroes", Vec::new())
            .settle(&self.log, call)
            .await
    }

    /// `POST {endpoint}` with the hero minus its id. Resolves with the server's hero.
    ///
    /// The success message reports the id of the *submitted* hero, not the one the
    /// server assigned; for a fresh hero that is `none`.
    #[instrument(skip(self))]
    pub async fn add_hero(&self, hero: Hero) -> Option<Hero> {
        let call = async {
            let created: Hero = self
                .inner
                .post(self.endpoint().to_string(), &hero.without_id())
                .await?;
            self.log(format!("added hero w/ id={}", DisplayId(hero.id)));
            Ok::<_, TransportError>(Some(created))
        };
        Fallback::new("addHero").settle(&self.log, call).await
    }

    /// `DELETE {endpoint}/{id}`, given either an id or a hero.
    ///
    /// A hero without an id cannot be addressed; that is reported as a failure
    /// without contacting the backend.
    #[instrument(skip(self, target))]
    pub async fn delete_hero(&self, target: impl Into<HeroRef>) -> Option<Hero> {
        let target = target.into();
        let call = async {
            let id = target
                .id()
                .ok_or_else(|| TransportError::new("hero has no id"))?;
            debug!(id, "Deleting hero");
            let deleted: Option<Hero> = self.inner.delete(self.inner.item_url(id)).await?;
            self.log(format!("deleted hero id={id}"));
            Ok::<_, TransportError>(deleted)
        };
        Fallback::new("deleteHero").settle(&self.log, call).await
    }

    /// `PUT {endpoint}` with the full hero; the backend finds it by the id in the body.
    ///
    /// Update responses vary between backends (often no body at all), so the raw
    /// payload is returned untyped.
    #[instrument(skip(self))]
    pub async fn update_hero(&self, hero: &Hero) -> Option<Value> {
        let call = async {
            let payload = self.inner.put(self.endpoint().to_string(), hero).await?;
            self.log(format!("updated hero id={}", DisplayId(hero.id)));
            Ok::<_, TransportError>(payload)
        };
        Fallback::new("updateHero").settle(&self.log, call).await
    }
}
