//! Typed JSON load/save helpers over a [`KeyValueStore`].
//!
//! Loads never fail: a missing, unreadable or malformed value yields `None`
//! (or the caller's default) and a `store_load` warning is logged.

use super::{KeyValueStore, StoreError, StoreResult};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Reads the raw value for `key`, treating read failures as absence.
pub fn load_raw<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value,
        Err(err) => {
            warn!(
                "event=store_load module=store status=fallback key={key} reason=read_failed error={err}"
            );
            None
        }
    }
}

/// Decodes `key` as JSON into `T`.
///
/// Returns `None` when the key is absent or the stored text does not decode.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    load_with(store, key, |raw| serde_json::from_str(raw).ok())
}

/// Decodes `key` with a caller-supplied lenient decoder.
pub fn load_with<T, S>(store: &S, key: &str, decode: impl FnOnce(&str) -> Option<T>) -> Option<T>
where
    S: KeyValueStore + ?Sized,
{
    let raw = load_raw(store, key)?;
    let decoded = decode(raw.as_str());
    if decoded.is_none() {
        warn!(
            "event=store_load module=store status=fallback key={key} reason=decode_failed bytes={}",
            raw.len()
        );
    }
    decoded
}

/// Decodes `key` as JSON, falling back to `T::default()`.
pub fn load_or_default<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    load_json(store, key).unwrap_or_default()
}

/// Serializes `value` as JSON and writes it under `key`.
pub fn save_json<T, S>(store: &mut S, key: &str, value: &T) -> StoreResult<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let encoded = serde_json::to_string(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, encoded.as_str())
}

#[cfg(test)]
mod tests {
    use super::{load_json, load_or_default, save_json};
    use crate::store::{KeyValueStore, MemoryStore};

    #[test]
    fn malformed_value_falls_back_to_default() {
        let mut store = MemoryStore::new();
        store.set("todos", "{not json").unwrap();

        let loaded: Vec<u32> = load_or_default(&store, "todos");
        assert!(loaded.is_empty());
    }

    #[test]
    fn wrong_shape_is_treated_as_absent() {
        let mut store = MemoryStore::new();
        store.set("fontSize", "\"huge\"").unwrap();

        assert_eq!(load_json::<u32, _>(&store, "fontSize"), None);
    }

    #[test]
    fn save_then_load_returns_value() {
        let mut store = MemoryStore::new();
        save_json(&mut store, "numbers", &[1_u32, 2, 3][..]).unwrap();

        let loaded: Vec<u32> = load_or_default(&store, "numbers");
        assert_eq!(loaded, vec![1, 2, 3]);
    }
}
