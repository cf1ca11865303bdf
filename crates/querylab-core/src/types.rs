//! Core data types shared by ingestion, roll-up and output.

/// One training query and the category it is currently labeled with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRecord {
    /// Query text exactly as it appeared in the input
    pub raw_query: String,

    /// Normalized, stemmed query text
    pub normalized_query: String,

    /// Category the query was originally labeled with
    pub category_id: String,

    /// Label after roll-up; starts equal to `category_id`
    pub current_category_id: String,
}

impl QueryRecord {
    /// Create a record whose current label is its original category.
    pub fn new(
        raw_query: impl Into<String>,
        normalized_query: impl Into<String>,
        category_id: impl Into<String>,
    ) -> Self {
        let category_id = category_id.into();
        Self {
            raw_query: raw_query.into(),
            normalized_query: normalized_query.into(),
            current_category_id: category_id.clone(),
            category_id,
        }
    }

    /// Whether roll-up moved this record off its original category.
    pub fn was_rolled_up(&self) -> bool {
        self.current_category_id != self.category_id
    }
}

/// Summary of a roll-up run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollUpStats {
    /// Passes executed, including the final pass that changed nothing
    pub passes: usize,

    /// Record reassignments across all passes (a record moving twice counts twice)
    pub reassignments: usize,

    /// Distinct categories before roll-up
    pub categories_before: usize,

    /// Distinct categories after roll-up
    pub categories_after: usize,
}
