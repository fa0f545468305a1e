use serde::{Deserialize, Serialize};

/// A scorable field: either owned by the engine or pinned by a trainer.
///
/// `Computed(None)` means the engine has no value (test not performed or
/// never scored). `Overridden` values are never touched by recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "snake_case")]
pub enum Scored<T> {
    Computed(Option<T>),
    Overridden(T),
}

impl<T> Default for Scored<T> {
    fn default() -> Self {
        Self::Computed(None)
    }
}

impl<T: Copy> Scored<T> {
    pub fn value(&self) -> Option<T> {
        match *self {
            Self::Computed(v) => v,
            Self::Overridden(v) => Some(v),
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self, Self::Overridden(_))
    }

    /// Replace the value with `compute()` unless the field is overridden.
    pub fn refreshed(self, compute: impl FnOnce() -> Option<T>) -> Self {
        match self {
            Self::Overridden(_) => self,
            Self::Computed(_) => Self::Computed(compute()),
        }
    }
}

#[cfg(test)]
#[path = "scored_test.rs"]
mod tests;
