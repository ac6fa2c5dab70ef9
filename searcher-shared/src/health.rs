//! Cluster health report.

use serde::{Deserialize, Serialize};

/// Overall cluster status as reported by the health API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStatus {
    Green,
    Yellow,
    Red,
}

/// The subset of the cluster health response the searcher cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterHealth {
    pub status: ClusterStatus,
    pub number_of_nodes: u32,
}

impl ClusterHealth {
    /// Whether the cluster can serve queries.
    ///
    /// A single node cluster can never allocate replicas, so it is healthy as
    /// long as it is not red. Clusters with more nodes must be green.
    pub fn is_healthy(&self) -> bool {
        if self.number_of_nodes == 1 {
            return self.status != ClusterStatus::Red;
        }

        self.status == ClusterStatus::Green
    }
}
