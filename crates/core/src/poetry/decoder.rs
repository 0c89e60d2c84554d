//! Normalizes PoetryDB response bodies into a list of poems.
//!
//! Search endpoints answer with an array of poems, the bare `/author`
//! endpoint with `{"authors": [...]}`, and misses with a
//! `{"status": 404, "reason": ...}` object. Decoding never fails: shapes
//! it does not recognize yield an empty list.

use serde_json::Value;
use tracing::debug;

use super::types::Poem;

/// Decode a raw response body.
pub fn decode(raw: Value) -> Vec<Poem> {
    match raw {
        Value::Array(items) => decode_poems(items),
        Value::Object(mut map) => match map.remove("authors") {
            Some(Value::Array(names)) => names
                .into_iter()
                .filter_map(|name| match name {
                    Value::String(s) => Some(Poem::author_listing(s)),
                    _ => None,
                })
                .collect(),
            _ => {
                debug!("Response object has no author listing, treating as empty");
                Vec::new()
            }
        },
        _ => Vec::new(),
    }
}

/// Decode a list of poem records one by one, skipping entries that are
/// not objects.
pub fn decode_poems(items: Vec<Value>) -> Vec<Poem> {
    items.into_iter().filter_map(decode_poem).collect()
}

fn decode_poem(item: Value) -> Option<Poem> {
    if !item.is_object() {
        return None;
    }
    match serde_json::from_value(item) {
        Ok(poem) => Some(poem),
        Err(e) => {
            debug!("Skipping undecodable poem entry: {}", e);
            None
        }
    }
}
