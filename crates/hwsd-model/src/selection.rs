use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::ModelError;

/// The 31 Eswatini soil mapping units of the reference run.
pub const ESWATINI_SMU_IDS: [i64; 31] = [
    7001, 18372, 27072, 27073, 27074, 27075, 27076, 27077, 27078, 27079, 27080, 27081, 27082,
    27083, 27084, 27085, 27086, 27087, 27088, 27089, 28093, 30424, 30803, 30866, 30898, 30975,
    30998, 31032, 31044, 31048, 31100,
];

/// A set of soil mapping unit ids, sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmuSelection {
    ids: Vec<i64>,
}

impl SmuSelection {
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        let unique: BTreeSet<i64> = ids.into_iter().collect();
        Self {
            ids: unique.into_iter().collect(),
        }
    }

    pub fn eswatini() -> Self {
        Self::new(ESWATINI_SMU_IDS)
    }

    /// Parse ids from text tokens, e.g. `["7001", "18372,27072"]`.
    pub fn parse<I, S>(tokens: I) -> Result<Self, ModelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ids = Vec::new();
        for token in tokens {
            for part in token.as_ref().split(',') {
                let trimmed = part.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let id = trimmed
                    .parse::<i64>()
                    .map_err(|_| ModelError::InvalidSmuId(trimmed.to_string()))?;
                ids.push(id);
            }
        }
        Ok(Self::new(ids))
    }

    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.binary_search(&id).is_ok()
    }
}
