//! Taxonomy-aware label roll-up.
//!
//! Categories with fewer than `min_queries` records hand their records to their
//! parent category, pass after pass, until nothing moves. A category directly
//! under the root has nowhere to go and keeps its records even when sparse.
//!
//! Within a pass, sparse categories are visited in ascending order of their
//! count at the start of the pass, ties broken by ascending category id, so a
//! run is fully deterministic for a given input.

use std::collections::{BTreeMap, HashMap};

use crate::taxonomy::Taxonomy;
use crate::types::{QueryRecord, RollUpStats};

/// Rolls sparse categories up into their parents until a fixpoint.
pub struct RollUp<'a> {
    taxonomy: &'a Taxonomy,
    min_queries: usize,
}

impl<'a> RollUp<'a> {
    /// Create an engine over `taxonomy` with the given support threshold.
    pub fn new(taxonomy: &'a Taxonomy, min_queries: usize) -> Self {
        Self {
            taxonomy,
            min_queries,
        }
    }

    /// Reassign `current_category_id` in place until a pass moves nothing.
    ///
    /// Terminates because every move takes a record strictly closer to the
    /// root of a finite, acyclic taxonomy.
    pub fn run(&self, records: &mut [QueryRecord]) -> RollUpStats {
        let mut stats = RollUpStats {
            categories_before: category_counts(records).len(),
            ..RollUpStats::default()
        };

        loop {
            stats.passes += 1;
            let moved = self.pass(records);
            stats.reassignments += moved;
            tracing::debug!(
                "Roll-up pass {}: {} records reassigned",
                stats.passes,
                moved
            );
            if moved == 0 {
                break;
            }
        }

        stats.categories_after = category_counts(records).len();
        tracing::info!(
            "Rolled up {} -> {} categories in {} passes ({} reassignments, min_queries={})",
            stats.categories_before,
            stats.categories_after,
            stats.passes,
            stats.reassignments,
            self.min_queries
        );
        stats
    }

    /// One pass: regroup, then move each sparse group to its parent.
    /// Returns the number of records reassigned.
    fn pass(&self, records: &mut [QueryRecord]) -> usize {
        let mut groups: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            groups
                .entry(record.current_category_id.clone())
                .or_default()
                .push(i);
        }

        // Counts are a snapshot: groups that grow during the pass keep their
        // starting position in the order.
        let mut sparse: Vec<(String, usize)> = groups
            .iter()
            .filter(|(_, members)| members.len() < self.min_queries)
            .map(|(category, members)| (category.clone(), members.len()))
            .collect();
        sparse.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

        let mut moved = 0;
        for (category, _) in sparse {
            let parent = self.taxonomy.parent_or_root(&category);
            if self.taxonomy.is_root(parent) {
                continue;
            }
            let Some(members) = groups.remove(&category) else {
                continue;
            };

            for &i in &members {
                records[i].current_category_id = parent.to_string();
            }
            moved += members.len();
            groups.entry(parent.to_string()).or_default().extend(members);
        }
        moved
    }

    /// Keep only records whose final category is a valid taxonomy node.
    ///
    /// Returns the survivors and the number dropped. Nothing is dropped unless
    /// a record was rolled into a parent that the taxonomy never declared.
    pub fn finalize(&self, records: Vec<QueryRecord>) -> (Vec<QueryRecord>, usize) {
        let before = records.len();
        let kept: Vec<QueryRecord> = records
            .into_iter()
            .filter(|r| self.taxonomy.contains(&r.current_category_id))
            .collect();
        let dropped = before - kept.len();
        if dropped > 0 {
            tracing::warn!(
                "Dropped {} records rolled into categories outside the taxonomy",
                dropped
            );
        }
        (kept, dropped)
    }
}

/// Number of records currently assigned to each category.
pub fn category_counts(records: &[QueryRecord]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.current_category_id.as_str()).or_insert(0) += 1;
    }
    counts
}
