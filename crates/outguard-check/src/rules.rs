//! Rule table: identity suffixes mapped to out-parameter argument indices.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mapping from identity-suffix string to zero-based argument indices that
/// must be address-taking.
///
/// Backed by a `BTreeMap` so iteration order — and therefore output — is
/// identical across runs. Read-only during analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable(BTreeMap<String, Vec<usize>>);

impl RuleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, indices: Vec<usize>) {
        self.0.insert(key.into(), indices);
    }

    pub fn get(&self, key: &str) -> Option<&[usize]> {
        self.0.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every rule whose key is a suffix of `identity`. Suffix-matching makes
    /// one rule apply across vendored copies, forks, and re-exports of the
    /// same library.
    pub fn matching<'a>(
        &'a self,
        identity: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a [usize])> + 'a {
        self.0
            .iter()
            .filter(move |(key, _)| identity.ends_with(key.as_str()))
            .map(|(key, indices)| (key.as_str(), indices.as_slice()))
    }

    /// Merge `user` under `defaults`: any key present in both keeps the
    /// defaults value. The built-in table encodes known-dangerous standard
    /// functions that user configuration may not redefine, only extend.
    pub fn merge(defaults: RuleTable, user: RuleTable) -> RuleTable {
        let mut merged = user.0;
        for (key, indices) in defaults.0 {
            merged.insert(key, indices);
        }
        RuleTable(merged)
    }
}

impl FromIterator<(String, Vec<usize>)> for RuleTable {
    fn from_iter<T: IntoIterator<Item = (String, Vec<usize>)>>(iter: T) -> Self {
        RuleTable(iter.into_iter().collect())
    }
}

/// The built-in rule table: standard deserializers that write through their
/// second argument.
pub fn default_rules() -> RuleTable {
    let mut rules = RuleTable::new();
    rules.insert("encoding/json.Unmarshal", vec![1]);
    rules.insert("gopkg.in/yaml.v2.Unmarshal", vec![1]);
    rules.insert("github.com/ghodss/yaml.Unmarshal", vec![1]);
    rules
}
