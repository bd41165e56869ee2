//! The actor that owns the in-memory hero table.

use crate::framework::{ChannelTransport, Method, PendingRequest, TransportError, TransportRequest, TransportResult};
use crate::in_memory::routes::{self, Route};
use crate::model::{Hero, HeroId};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// First id handed out when the table is empty.
pub const FIRST_ID: HeroId = 11;

/// A backend that serves one collection from memory.
///
/// # Architecture Note
/// This struct is the "Server" half: it owns the table and the receiving end of the
/// channel. Requests are processed one at a time in [`HeroStoreActor::run`], so the
/// table needs no lock even when many clients share the [`ChannelTransport`].
pub struct HeroStoreActor {
    receiver: mpsc::Receiver<PendingRequest>,
    collection: String,
    heroes: BTreeMap<HeroId, Hero>,
}

impl HeroStoreActor {
    pub fn new(
        buffer_size: usize,
        collection: impl Into<String>,
        seed: Vec<Hero>,
    ) -> (Self, ChannelTransport) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let heroes = seed
            .into_iter()
            .filter_map(|hero| hero.id.map(|id| (id, hero)))
            .collect();
        let actor = Self {
            receiver,
            collection: collection.into(),
            heroes,
        };
        (actor, ChannelTransport::new(sender))
    }

    /// Runs the event loop until every transport handle is dropped.
    pub async fn run(mut self) {
        info!(collection = %self.collection, size = self.heroes.len(), "Backend started");

        while let Some(PendingRequest { request, respond_to }) = self.receiver.recv().await {
            let result = self.handle(&request);
            match &result {
                Ok(_) => debug!(method = %request.method, url = %request.url, "Served"),
                Err(e) => warn!(method = %request.method, url = %request.url, error = %e, "Rejected"),
            }
            let _ = respond_to.send(result);
        }

        info!(collection = %self.collection, size = self.heroes.len(), "Shutdown");
    }

    fn handle(&mut self, request: &TransportRequest) -> TransportResult {
        let url = request.url.as_str();
        match (request.method, routes::parse(url, &self.collection)?) {
            (Method::Get, Route::Collection) => {
                let heroes: Vec<&Hero> = self.heroes.values().collect();
                to_json(&heroes)
            }
            (Method::Get, Route::Item(id)) => match self.heroes.get(&id) {
                Some(hero) => to_json(hero),
                None => Err(TransportError::status(url, 404, "Not Found")),
            },
            (Method::Get, Route::Query(filters)) => {
                let heroes: Vec<&Hero> = self
                    .heroes
                    .values()
                    .filter(|hero| filters.iter().all(|(field, value)| field_matches(hero, field, value)))
                    .collect();
                to_json(&heroes)
            }
            (Method::Post, Route::Collection) => {
                let mut hero = body(request)?;
                let id = match hero.id {
                    Some(id) if self.heroes.contains_key(&id) => {
                        return Err(TransportError::status(url, 409, "Conflict"));
                    }
                    Some(id) => id,
                    None => self.next_id(url)?,
                };
                hero.id = Some(id);
                self.heroes.insert(id, hero.clone());
                info!(id, size = self.heroes.len(), "Created");
                to_json(&hero)
            }
            (Method::Put, Route::Collection) => {
                let hero = body(request)?;
                let id = hero.id.ok_or_else(|| TransportError::status(url, 404, "Not Found"))?;
                // Unknown ids are created, known ones replaced without a response body.
                match self.heroes.insert(id, hero.clone()) {
                    Some(_) => {
                        info!(id, "Updated");
                        Ok(None)
                    }
                    None => {
                        info!(id, size = self.heroes.len(), "Created");
                        to_json(&hero)
                    }
                }
            }
            (Method::Delete, Route::Item(id)) => {
                let removed = self.heroes.remove(&id).is_some();
                info!(id, removed, size = self.heroes.len(), "Deleted");
                Ok(None)
            }
            _ => Err(TransportError::status(url, 405, "Method Not Allowed")),
        }
    }

    fn next_id(&self, url: &str) -> Result<HeroId, TransportError> {
        match self.heroes.keys().next_back() {
            None => Ok(FIRST_ID),
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| TransportError::status(url, 500, "Internal Server Error")),
        }
    }
}

/// `id` matches exactly; any other field matches as a case-insensitive substring.
fn field_matches(hero: &Hero, field: &str, value: &str) -> bool {
    let needle = value.to_lowercase();
    match field {
        "id" => value.parse::<HeroId>().ok() == hero.id,
        "name" => hero.name.to_lowercase().contains(&needle),
        _ => match hero.extra.get(field) {
            Some(Value::String(text)) => text.to_lowercase().contains(&needle),
            Some(other) => other.to_string() == value,
            None => false,
        },
    }
}

fn body(request: &TransportRequest) -> Result<Hero, TransportError> {
    let payload = request.body.clone().unwrap_or(Value::Null);
    serde_json::from_value(payload).map_err(|_| TransportError::status(&request.url, 400, "Bad Request"))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> TransportResult {
    serde_json::to_value(value).map(Some).map_err(TransportError::decode)
}
