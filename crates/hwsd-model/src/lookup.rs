use std::collections::BTreeMap;

use crate::CodeValue;

/// Reference table mapping a code to its label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeLookup {
    entries: BTreeMap<CodeValue, String>,
}

impl CodeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. Missing codes are ignored; later duplicates win.
    pub fn insert(&mut self, code: CodeValue, label: impl Into<String>) {
        if code.is_missing() {
            return;
        }
        self.entries.insert(code, label.into());
    }

    pub fn get(&self, code: &CodeValue) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    /// Look up a code by its integer interpretation.
    pub fn get_integer(&self, code: &CodeValue) -> Option<&str> {
        let key = code.as_integer()?;
        self.get(&CodeValue::Integer(key))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CodeValue, &str)> {
        self.entries.iter().map(|(code, label)| (code, label.as_str()))
    }
}

impl<C, L> FromIterator<(C, L)> for CodeLookup
where
    C: Into<CodeValue>,
    L: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (C, L)>>(iter: I) -> Self {
        let mut lookup = CodeLookup::new();
        for (code, label) in iter {
            lookup.insert(code.into(), label);
        }
        lookup
    }
}

/// The HWSD2 dictionary tables used by the export.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    /// `D_DRAINAGE`: SYMBOL → CODE (e.g. 4 → "MW").
    pub drainage: CodeLookup,
    /// `D_PHASE`: CODE → VALUE.
    pub phase: CodeLookup,
    /// `D_ROOTS`: CODE → VALUE.
    pub roots: CodeLookup,
    /// `D_TEXTURE_USDA`: CODE → VALUE.
    pub texture: CodeLookup,
    /// `D_WRB4`: CODE → VALUE.
    pub wrb4: CodeLookup,
    /// `D_WRB2`: CODE → Value.
    pub wrb2: CodeLookup,
}
