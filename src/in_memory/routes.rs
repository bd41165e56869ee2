//! URL routing for the in-memory backend.

use crate::framework::TransportError;
use crate::model::HeroId;

/// What a URL addresses within the collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Route {
    /// `{collection}`
    Collection,
    /// `{collection}/{id}`
    Item(HeroId),
    /// `{collection}/?field=value&...`
    Query(Vec<(String, String)>),
}

/// Resolves `url` against `collection` (e.g. `api/heroes`).
///
/// Absolute URLs are accepted; only their path and query are looked at. Anything
/// outside the collection, or an id that is not a number, is a 404.
pub fn parse(url: &str, collection: &str) -> Result<Route, TransportError> {
    let not_found = || TransportError::status(url, 404, "Not Found");

    let relative = match url.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map_or("", |(_, path)| path),
        None => url,
    };
    let (path, query) = match relative.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (relative, None),
    };
    let path = path.trim_matches('/');
    let collection = collection.trim_matches('/');

    let rest = path.strip_prefix(collection).ok_or_else(not_found)?;
    let rest = match rest {
        "" => "",
        _ => rest.strip_prefix('/').ok_or_else(not_found)?,
    };

    if !rest.is_empty() {
        return rest.parse().map(Route::Item).map_err(|_| not_found());
    }

    match query {
        Some(query) => Ok(Route::Query(
            query
                .split('&')
                .filter_map(|pair| pair.split_once('='))
                .map(|(field, value)| (field.to_string(), value.to_string()))
                .collect(),
        )),
        None => Ok(Route::Collection),
    }
}
