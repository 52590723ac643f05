use crate::util;

/// Result of a filter operation, partitioning candidates into kept and removed.
pub struct FilterResult<C> {
    pub kept: Vec<C>,
    pub removed: Vec<C>,
}

/// Filters partition candidates into kept and removed sets, preserving the
/// relative order of each side.
pub trait Filter<C>: Send + Sync {
    /// Filter candidates by evaluating each against some criteria.
    fn filter(&self, candidates: Vec<C>) -> FilterResult<C> {
        let (kept, removed): (Vec<C>, Vec<C>) =
            candidates.into_iter().partition(|c| self.keep(c));
        FilterResult { kept, removed }
    }

    /// Whether a single candidate continues to the next stage.
    fn keep(&self, candidate: &C) -> bool;

    /// Returns a stable name for logging.
    fn name(&self) -> &str {
        util::short_type_name(std::any::type_name::<Self>())
    }
}
