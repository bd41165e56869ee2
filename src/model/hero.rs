use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::{self, Display};

/// Server-assigned hero identity.
pub type HeroId = u32;

/// A hero as stored by the backend.
///
/// The client treats heroes as opaque records: it never validates or rewrites
/// fields. Anything the backend adds beyond `id` and `name` is kept in `extra`
/// and sent back unchanged.
///
/// `id` is `None` for a hero that has not been created yet. A response missing
/// `name` decodes with an empty name; backends answering DELETE with `{}` are common.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<HeroId>,
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Hero {
    /// Creates an existing hero with a known id.
    pub fn new(id: HeroId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// Creates a hero the server has not assigned an id to yet.
    pub fn unsaved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            extra: Map::new(),
        }
    }

    /// The same hero with its identity removed, ready to be POSTed.
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

/// Renders an optional id for log lines (`none` when absent).
#[derive(Debug, Clone, Copy)]
pub struct DisplayId(pub Option<HeroId>);

impl Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => f.write_str("none"),
        }
    }
}

/// Either a bare id or a whole hero; anything `delete_hero` can be pointed at.
#[derive(Debug, Clone, PartialEq)]
pub enum HeroRef {
    Id(HeroId),
    Hero(Hero),
}

impl HeroRef {
    /// The id the request will address, if there is one.
    pub fn id(&self) -> Option<HeroId> {
        match self {
            HeroRef::Id(id) => Some(*id),
            HeroRef::Hero(hero) => hero.id,
        }
    }
}

impl From<HeroId> for HeroRef {
    fn from(id: HeroId) -> Self {
        HeroRef::Id(id)
    }
}

impl From<Hero> for HeroRef {
    fn from(hero: Hero) -> Self {
        HeroRef::Hero(hero)
    }
}

impl From<&Hero> for HeroRef {
    fn from(hero: &Hero) -> Self {
        HeroRef::Hero(hero.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extra_fields_survive_decoding() {
        let hero: Hero = serde_json::from_value(json!({"id": 12, "name": "Narco", "power": "sleep"})).unwrap();

        assert_eq!(hero.id, Some(12));
        assert_eq!(hero.extra.get("power"), Some(&json!("sleep")));
        assert_eq!(
            serde_json::to_value(&hero).unwrap(),
            json!({"id": 12, "name": "Narco", "power": "sleep"})
        );
    }

    #[test]
    fn test_partial_records_decode() {
        let empty: Hero = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty, Hero::unsaved(""));

        let id_only: Hero = serde_json::from_value(json!({"id": 21})).unwrap();
        assert_eq!(id_only, Hero::new(21, ""));
    }

    #[test]
    fn test_unsaved_hero_serializes_without_id() {
        let payload = serde_json::to_value(Hero::new(3, "X").without_id()).unwrap();
        assert_eq!(payload, json!({"name": "X"}));
    }

    #[test]
    fn test_hero_ref_normalizes_to_id() {
        assert_eq!(HeroRef::from(5).id(), Some(5));
        assert_eq!(HeroRef::from(Hero::new(5, "X")).id(), Some(5));
        assert_eq!(HeroRef::from(&Hero::unsaved("X")).id(), None);
    }

    #[test]
    fn test_display_id() {
        assert_eq!(DisplayId(Some(4)).to_string(), "4");
        assert_eq!(DisplayId(None).to_string(), "none");
    }
}
