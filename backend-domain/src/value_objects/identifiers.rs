// Identifier value objects

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    /// Positional id used when a row carries none: `T000`, `T001`, ...
    pub fn synthetic(index: usize) -> Self {
        Self(format!("T{:03}", index))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
