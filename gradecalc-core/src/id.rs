use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque row token. Only used to address a row inside its sheet.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(String);

impl RowId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of fresh row ids. Every call must yield a token not handed out
/// before by the same source.
pub trait IdSource: Send {
    fn next_id(&mut self) -> RowId;
}

/// Random v4 UUIDs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UuidIds;

impl IdSource for UuidIds {
    fn next_id(&mut self) -> RowId {
        RowId(uuid::Uuid::new_v4().to_string())
    }
}

/// Deterministic `prefix-1`, `prefix-2`, ... ids.
#[derive(Clone, Debug)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new("row")
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> RowId {
        let id = RowId(format!("{}-{}", self.prefix, self.next));
        self.next += 1;
        id
    }
}
