use crate::trace::CallId;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("call id {0} has no dictionary entry")]
    UnknownId(CallId),
    #[error("dictionary parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Bijection between call ids and API method names, used only to render
/// human-readable output. Loaded from the dictionary file: a JSON object of
/// method name -> call id.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    name_by_id: HashMap<CallId, String>,
    id_by_name: HashMap<String, CallId>,
}

impl Dictionary {
    pub fn from_json(s: &str) -> Result<Self, DictionaryError> {
        let raw: HashMap<String, CallId> = serde_json::from_str(s)?;
        Ok(Self::from_entries(raw))
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (String, CallId)>) -> Self {
        let mut dict = Dictionary::default();
        for (name, id) in entries {
            dict.name_by_id.insert(id, name.clone());
            dict.id_by_name.insert(name, id);
        }
        dict
    }

    pub fn name_of(&self, id: CallId) -> Result<&str, DictionaryError> {
        self.name_by_id
            .get(&id)
            .map(String::as_str)
            .ok_or(DictionaryError::UnknownId(id))
    }

    pub fn id_of(&self, name: &str) -> Option<CallId> {
        self.id_by_name.get(name).copied()
    }

    /// Resolve a whole segment; fails on the first unresolved id so the
    /// caller can skip the offending record and keep going.
    pub fn names_of(&self, ids: &[CallId]) -> Result<Vec<String>, DictionaryError> {
        ids.iter()
            .map(|&id| self.name_of(id).map(str::to_string))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.name_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_by_id.is_empty()
    }
}
