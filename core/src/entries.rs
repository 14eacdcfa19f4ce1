//! Ordered key/value list edited by the supplier form.
//!
//! # Design
//! Every entry carries a synthetic `Uuid` so the UI can diff rows while keys
//! are still being typed (two blank rows have the same key). The id plays no
//! part in encoding or decoding; compare lists with `pairs()` when only the
//! content matters.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The value side of an entry: a scalar string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryValue {
    Text(String),
    List(Vec<String>),
}

impl EntryValue {
    /// The value as a single string. Lists are joined with `,`, matching how
    /// a one-line text input renders them.
    pub fn to_text(&self) -> String {
        match self {
            EntryValue::Text(s) => s.clone(),
            EntryValue::List(items) => items.join(","),
        }
    }
}

impl Default for EntryValue {
    fn default() -> Self {
        EntryValue::Text(String::new())
    }
}

impl From<&str> for EntryValue {
    fn from(s: &str) -> Self {
        EntryValue::Text(s.to_string())
    }
}

impl From<String> for EntryValue {
    fn from(s: String) -> Self {
        EntryValue::Text(s)
    }
}

impl From<Vec<String>> for EntryValue {
    fn from(items: Vec<String>) -> Self {
        EntryValue::List(items)
    }
}

/// One row of a `KeyValueList`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub key: String,
    pub value: EntryValue,
}

impl Entry {
    pub fn new(key: impl Into<String>, value: impl Into<EntryValue>) -> Self {
        Self {
            id: Uuid::new_v4(),
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Ordered sequence of entries. Keys may repeat; encoders resolve duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyValueList {
    entries: Vec<Entry>,
}

impl KeyValueList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Append an entry and return its id.
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<EntryValue>) -> Uuid {
        let entry = Entry::new(key, value);
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Append a blank row, as the form's "add" button does.
    pub fn add_blank(&mut self) -> Uuid {
        self.push(String::new(), EntryValue::default())
    }

    /// Remove the entry with `id`. Returns `false` when no entry matched.
    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn set_key(&mut self, id: Uuid, key: impl Into<String>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.key = key.into();
                true
            }
            None => false,
        }
    }

    pub fn set_value(&mut self, id: Uuid, value: impl Into<EntryValue>) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Key/value content without ids, in list order.
    pub fn pairs(&self) -> Vec<(String, EntryValue)> {
        self.entries
            .iter()
            .map(|e| (e.key.clone(), e.value.clone()))
            .collect()
    }

    /// Collapse into a key -> value mapping. A repeated key keeps its first
    /// position and takes the last value, like assigning into an object.
    pub fn to_map(&self) -> IndexMap<String, EntryValue> {
        let mut map = IndexMap::with_capacity(self.entries.len());
        for entry in &self.entries {
            map.insert(entry.key.clone(), entry.value.clone());
        }
        map
    }

    /// Same as `to_map`, flattening every value to text. Used for headers and
    /// standard responses, which are plain string maps on the wire.
    pub fn to_text_map(&self) -> IndexMap<String, String> {
        self.to_map()
            .into_iter()
            .map(|(k, v)| (k, v.to_text()))
            .collect()
    }

    /// Split off every entry whose key is `key`, keeping the rest in order.
    pub(crate) fn take_key(&mut self, key: &str) -> Vec<Entry> {
        let (taken, kept): (Vec<Entry>, Vec<Entry>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(|e| e.key == key);
        self.entries = kept;
        taken
    }

    pub(crate) fn insert_front(&mut self, entry: Entry) {
        self.entries.insert(0, entry);
    }
}

impl<K, V> FromIterator<(K, V)> for KeyValueList
where
    K: Into<String>,
    V: Into<EntryValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| Entry::new(k, v)).collect(),
        }
    }
}

impl IntoIterator for KeyValueList {
    type Item = Entry;
    type IntoIter = std::vec::IntoIter<Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyValueList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
