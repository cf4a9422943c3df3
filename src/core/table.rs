use std::collections::HashMap;

use thiserror::Error;

use crate::core::cluster::Cluster;
use crate::core::position::Position;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TableError {
    #[error("No cluster found for barcodes '{0}'")]
    NotFound(String),
}

/// Barcode key to [`Cluster`] mapping.
///
/// Clusters are created lazily the first time a key is referenced, and each
/// key maps to exactly one cluster until it is removed. Iteration order over
/// keys is unspecified.
#[derive(Debug, Clone, Default)]
pub struct ClusterTable {
    clusters: HashMap<String, Cluster>,
}

impl ClusterTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cluster for `key`, creating an empty one if it does not exist yet
    pub fn get_or_create(&mut self, key: impl Into<String>) -> &mut Cluster {
        self.clusters.entry(key.into()).or_default()
    }

    pub fn add_position(&mut self, key: impl Into<String>, position: Position) {
        self.get_or_create(key).add_position(position);
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Cluster> {
        self.clusters.get(key)
    }

    /// Remove and return the cluster for `key`
    ///
    /// # Errors
    ///
    /// Returns `TableError::NotFound` if no cluster exists for `key`.
    pub fn remove(&mut self, key: &str) -> Result<Cluster, TableError> {
        self.clusters
            .remove(key)
            .ok_or_else(|| TableError::NotFound(key.to_string()))
    }

    /// Drop every cluster holding fewer than `min_positions` positions.
    /// Returns the number of clusters dropped.
    pub fn retain_min_positions(&mut self, min_positions: usize) -> usize {
        let before = self.clusters.len();
        self.clusters
            .retain(|_, cluster| cluster.size() >= min_positions);
        before - self.clusters.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Sum of cluster sizes across the table
    #[must_use]
    pub fn total_positions(&self) -> usize {
        self.clusters.values().map(Cluster::size).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Cluster)> {
        self.clusters.iter().map(|(key, cluster)| (key.as_str(), cluster))
    }

    /// Render each cluster as `key\tchr:coord\tchr:coord...`.
    ///
    /// The iterator borrows the table, so it reflects the table as it was when
    /// called. Line order is unspecified.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.clusters
            .iter()
            .map(|(key, cluster)| format!("{key}\t{cluster}"))
    }
}
