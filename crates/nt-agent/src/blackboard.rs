//! Per-agent key/value scratch memory shared by behavior-tree nodes.
//!
//! Values are a small closed set of variants rather than `dyn Any`, so a
//! blackboard can be inspected, compared in tests, and serialized.

use nt_core::{AgentId, Vec3};
use rustc_hash::FxHashMap;

/// One blackboard entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlackboardValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Position(Vec3),
    Path(Vec<Vec3>),
    Agent(AgentId),
}

impl From<bool> for BlackboardValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for BlackboardValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for BlackboardValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for BlackboardValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for BlackboardValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec3> for BlackboardValue {
    fn from(v: Vec3) -> Self {
        Self::Position(v)
    }
}

impl From<Vec<Vec3>> for BlackboardValue {
    fn from(v: Vec<Vec3>) -> Self {
        Self::Path(v)
    }
}

impl From<AgentId> for BlackboardValue {
    fn from(v: AgentId) -> Self {
        Self::Agent(v)
    }
}

/// String-keyed map of [`BlackboardValue`]s.
///
/// Typed getters return `None` both for a missing key and for a key holding
/// a different variant.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blackboard {
    entries: FxHashMap<String, BlackboardValue>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<BlackboardValue>) -> Option<BlackboardValue> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&BlackboardValue> {
        self.entries.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<BlackboardValue> {
        self.entries.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterate entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &BlackboardValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    // ── Typed getters ─────────────────────────────────────────────────────

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key) {
            Some(BlackboardValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        match self.get(key) {
            Some(BlackboardValue::Int(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        match self.get(key) {
            Some(BlackboardValue::Float(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(BlackboardValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn get_position(&self, key: &str) -> Option<Vec3> {
        match self.get(key) {
            Some(BlackboardValue::Position(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_path(&self, key: &str) -> Option<&[Vec3]> {
        match self.get(key) {
            Some(BlackboardValue::Path(v)) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn get_agent(&self, key: &str) -> Option<AgentId> {
        match self.get(key) {
            Some(BlackboardValue::Agent(v)) => Some(*v),
            _ => None,
        }
    }
}
