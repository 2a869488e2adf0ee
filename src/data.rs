use serde::Serialize;
use std::collections::{hash_set, HashMap, HashSet};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

/// Number of `|`-separated columns in a committee-to-committee transaction line.
pub const TRANSFER_COLUMNS: usize = 21;
/// Column holding the committee the money came from.
pub const SENDER_COLUMN: usize = 0;
/// Column holding the committee the money went to.
pub const RECEIVER_COLUMN: usize = 15;

/// Number of `|`-separated columns in a committee master line.
pub const COMMITTEE_COLUMNS: usize = 15;
pub const COMMITTEE_ID_COLUMN: usize = 0;
pub const COMMITTEE_NAME_COLUMN: usize = 1;

/// Default lower limit for `TransferGraph::high_traffic_senders`, used when the
/// caller passes a negative threshold. It was picked by looking at the histogram
/// of distinct receivers per sender in the FEC data, so treat it as a tunable,
/// not a rule.
pub const HIGH_TRAFFIC_SENDING_LIMIT: i64 = 100;

/// The FEC identifier of a committee. Compared byte for byte, no normalization.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CommitteeId(String);

impl CommitteeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CommitteeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for CommitteeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CommitteeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One transaction line reduced to who paid whom. Self-transfers are legal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRecord {
    pub sender: CommitteeId,
    pub receiver: CommitteeId,
}

impl TransferRecord {
    pub fn new(sender: impl Into<CommitteeId>, receiver: impl Into<CommitteeId>) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
        }
    }
}

/// A committee master entry; only used to put names on the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committee {
    pub id: CommitteeId,
    pub name: String,
}

/// Unordered set of distinct committees.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CommitteeIdSet {
    ids: HashSet<CommitteeId>,
}

impl CommitteeIdSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if `id` wasn't there yet.
    pub fn add(&mut self, id: CommitteeId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: &CommitteeId) -> bool {
        self.ids.contains(id)
    }

    pub fn remove(&mut self, id: &CommitteeId) -> bool {
        self.ids.remove(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, CommitteeId> {
        self.ids.iter()
    }
}

impl FromIterator<CommitteeId> for CommitteeIdSet {
    fn from_iter<I: IntoIterator<Item = CommitteeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CommitteeIdSet {
    type Item = &'a CommitteeId;
    type IntoIter = hash_set::Iter<'a, CommitteeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// ID → display name lookup built from the committee master file.
#[derive(Debug, Default, Clone)]
pub struct CommitteeDirectory {
    names: HashMap<CommitteeId, String>,
}

impl CommitteeDirectory {
    /// Later entries overwrite earlier ones with the same ID.
    pub fn from_committees<I: IntoIterator<Item = Committee>>(committees: I) -> Self {
        let mut names = HashMap::new();
        for committee in committees {
            if let Some(previous) = names.insert(committee.id.clone(), committee.name) {
                warn!(
                    "Duplicate committee {} in committee master, dropping name {:?}",
                    committee.id, previous
                );
            }
        }
        Self { names }
    }

    pub fn name(&self, id: &CommitteeId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Like `name`, but unknown committees get an empty name.
    pub fn name_or_empty(&self, id: &CommitteeId) -> &str {
        self.name(id).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Everything that can go wrong while loading the input files. Both variants are
/// fatal: nothing is returned from a parse that hit one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("unable to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("on line {line}, expected {expected} columns, got {found}")]
    Format {
        line: usize,
        expected: usize,
        found: usize,
    },
}
