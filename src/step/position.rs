use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical key for the root (empty) position.
pub const ROOT_KEY: &str = "root";

/// The structural path of an element from the step root.
///
/// The root subgrid sits at the empty path; every other element's path is a
/// sequence of child indices. Ancestry is prefix containment: `a` is an
/// ancestor of `b` iff `a` is a strict prefix of `b`. The canonical string
/// encoding (`"root"`, `"0"`, `"0,1,2"`, ...) is what keys every
/// position-indexed map in this crate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(Vec<u32>);

impl Position {
    pub fn root() -> Self {
        Position(Vec::new())
    }

    pub fn new(path: Vec<u32>) -> Self {
        Position(path)
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.0.len()
    }

    pub fn child(&self, index: u32) -> Position {
        let mut path = self.0.clone();
        path.push(index);
        Position(path)
    }

    pub fn parent(&self) -> Option<Position> {
        if self.0.is_empty() {
            None
        } else {
            Some(Position(self.0[..self.0.len() - 1].to_vec()))
        }
    }

    /// Strict-prefix ancestry.
    pub fn is_ancestor_of(&self, other: &Position) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }

    /// Prefix containment including self.
    pub fn contains(&self, other: &Position) -> bool {
        other.0.starts_with(&self.0)
    }

    /// All strict ancestors, root first.
    pub fn ancestors(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.0.len()).map(|end| Position(self.0[..end].to_vec()))
    }

    /// Canonical string encoding, used as the map key everywhere.
    pub fn key(&self) -> String {
        if self.0.is_empty() {
            ROOT_KEY.to_string()
        } else {
            self.0
                .iter()
                .map(|index| index.to_string())
                .collect::<Vec<_>>()
                .join(",")
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl From<Vec<u32>> for Position {
    fn from(path: Vec<u32>) -> Self {
        Position(path)
    }
}

impl From<&[u32]> for Position {
    fn from(path: &[u32]) -> Self {
        Position(path.to_vec())
    }
}
