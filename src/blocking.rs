use std::collections::HashMap;

use crate::normalize::NormalizedName;

/// Coarse grouping key: candidates are only compared when their last token
/// and first initial both agree with the target's.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockKey {
    pub last: String,
    pub first_initial: String,
}

/// Bucketed row positions into the season-statistics dataset, built once per
/// run so matching never scans the full dataset.
#[derive(Debug, Default)]
pub struct BlockIndex {
    buckets: HashMap<BlockKey, Vec<usize>>,
}

impl BlockIndex {
    pub fn build(names: &[NormalizedName]) -> Self {
        let mut buckets: HashMap<BlockKey, Vec<usize>> = HashMap::new();
        for (row, name) in names.iter().enumerate() {
            buckets.entry(name.block_key()).or_default().push(row);
        }
        Self { buckets }
    }

    /// Row positions sharing `key`, or None when no season row does.
    pub fn bucket(&self, key: &BlockKey) -> Option<&[usize]> {
        self.buckets.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
