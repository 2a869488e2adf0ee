use crate::data::{
    CommitteeDirectory, CommitteeId, CommitteeIdSet, TransferRecord, HIGH_TRAFFIC_SENDING_LIMIT,
};
use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;

/// Who sent money to whom. Repeated transfers between the same two committees
/// collapse into one relationship; amounts and counts are not kept.
///
/// The two maps are keyed independently: a committee that only ever sends is
/// absent from `incoming`, one that only ever receives is absent from `outgoing`.
/// After building, `r ∈ outgoing[s]` and `s ∈ incoming[r]` hold for every
/// transfer `(s, r)` that went in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct TransferGraph {
    /// Sender → distinct committees it sent to.
    pub outgoing: HashMap<CommitteeId, CommitteeIdSet>,
    /// Receiver → distinct committees it received from.
    pub incoming: HashMap<CommitteeId, CommitteeIdSet>,
}

impl TransferGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<I: IntoIterator<Item = TransferRecord>>(transfers: I) -> Self {
        transfers.into_iter().collect()
    }

    pub fn add_transfer(&mut self, transfer: TransferRecord) {
        self.outgoing
            .entry(transfer.sender.clone())
            .or_default()
            .add(transfer.receiver.clone());
        self.incoming
            .entry(transfer.receiver)
            .or_default()
            .add(transfer.sender);
    }

    pub fn out_degree(&self, committee: &CommitteeId) -> usize {
        self.receivers_of(committee).map_or(0, CommitteeIdSet::len)
    }

    pub fn in_degree(&self, committee: &CommitteeId) -> usize {
        self.senders_to(committee).map_or(0, CommitteeIdSet::len)
    }

    pub fn receivers_of(&self, committee: &CommitteeId) -> Option<&CommitteeIdSet> {
        self.outgoing.get(committee)
    }

    pub fn senders_to(&self, committee: &CommitteeId) -> Option<&CommitteeIdSet> {
        self.incoming.get(committee)
    }

    /// Every committee that sent money at least once.
    pub fn senders(&self) -> impl Iterator<Item = &CommitteeId> {
        self.outgoing.keys()
    }

    /// Committees that sent to strictly more than `lower_limit` distinct
    /// committees. A negative limit means `HIGH_TRAFFIC_SENDING_LIMIT`.
    pub fn high_traffic_senders(&self, lower_limit: i64) -> CommitteeIdSet {
        let lower_limit = effective_limit(lower_limit);
        debug!("Selecting senders with more than {} receivers", lower_limit);
        self.outgoing
            .iter()
            .filter(|(_, receivers)| receivers.len() > lower_limit)
            .map(|(committee, _)| committee.clone())
            .collect()
    }

    /// One row per sender, ordered by in-degree then committee ID.
    pub fn sender_stats(&self, directory: &CommitteeDirectory) -> Vec<CommitteeStats> {
        self.stats_for(self.senders(), directory)
    }

    /// Same as `sender_stats`, restricted to `high_traffic_senders(lower_limit)`.
    pub fn high_traffic_stats(
        &self,
        lower_limit: i64,
        directory: &CommitteeDirectory,
    ) -> Vec<CommitteeStats> {
        let selected = self.high_traffic_senders(lower_limit);
        self.stats_for(selected.iter(), directory)
    }

    fn stats_for<'a, I: Iterator<Item = &'a CommitteeId>>(
        &self,
        committees: I,
        directory: &CommitteeDirectory,
    ) -> Vec<CommitteeStats> {
        let mut stats: Vec<CommitteeStats> = committees
            .map(|committee| CommitteeStats {
                in_degree: self.in_degree(committee),
                out_degree: self.out_degree(committee),
                id: committee.clone(),
                name: directory.name_or_empty(committee).to_owned(),
            })
            .collect();
        stats.sort_by(|a, b| a.in_degree.cmp(&b.in_degree).then_with(|| a.id.cmp(&b.id)));
        stats
    }
}

fn effective_limit(lower_limit: i64) -> usize {
    let limit = if lower_limit < 0 {
        HIGH_TRAFFIC_SENDING_LIMIT
    } else {
        lower_limit
    };
    usize::try_from(limit).unwrap_or(usize::MAX)
}

impl Extend<TransferRecord> for TransferGraph {
    fn extend<I: IntoIterator<Item = TransferRecord>>(&mut self, transfers: I) {
        for transfer in transfers {
            self.add_transfer(transfer);
        }
    }
}

impl FromIterator<TransferRecord> for TransferGraph {
    fn from_iter<I: IntoIterator<Item = TransferRecord>>(transfers: I) -> Self {
        let mut graph = Self::new();
        graph.extend(transfers);
        graph
    }
}

/// A report row. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct CommitteeStats {
    pub in_degree: usize,
    pub out_degree: usize,
    pub id: CommitteeId,
    pub name: String,
}
