//! Catalog Query State Machine
//!
//! Tracks one paginated result sequence per filter configuration.
//! Every fetch carries the generation token that spawned it; a result
//! arriving for an older generation is discarded without touching
//! state. Within a generation, pages append in request order and at
//! most one next-page request is in flight (gated on `Ready`).

use std::collections::HashSet;

use crate::models::{ProductPage, ProductSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryPhase {
    Idle,
    Loading,
    Ready { has_more: bool },
    Failed,
}

#[derive(Debug, Clone)]
pub struct CatalogQuery {
    generation: u64,
    phase: QueryPhase,
    items: Vec<ProductSummary>,
    seen: HashSet<u32>,
    cursor: Option<String>,
    total_count: u32,
    /// Favorites mode: the id universe is finite and fetched in one
    /// call, so the load-more path is suppressed.
    bounded: bool,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self {
            generation: 0,
            phase: QueryPhase::Idle,
            items: Vec::new(),
            seen: HashSet::new(),
            cursor: None,
            total_count: 0,
            bounded: false,
        }
    }

    /// Enter `Loading` for a new configuration (or a retry of the
    /// current one), discarding all accumulated state. Anything still
    /// in flight for an earlier generation dies at the token check.
    pub fn restart(&mut self, bounded: bool) -> u64 {
        self.generation += 1;
        self.phase = QueryPhase::Loading;
        self.items.clear();
        self.seen.clear();
        self.cursor = None;
        self.total_count = 0;
        self.bounded = bounded;
        self.generation
    }

    /// Claim the next-page fetch. Only possible from `Ready` with a
    /// continuation cursor, which guarantees a single in-flight
    /// request per configuration.
    pub fn begin_next_page(&mut self) -> Option<(u64, String)> {
        if self.bounded || self.phase != (QueryPhase::Ready { has_more: true }) {
            return None;
        }
        let cursor = self.cursor.clone()?;
        self.phase = QueryPhase::Loading;
        Some((self.generation, cursor))
    }

    /// Append a page fetched under `token`. Returns false (and leaves
    /// state untouched) when the token is stale. Duplicate product ids
    /// are dropped, keeping first-seen order.
    pub fn commit_page(&mut self, token: u64, page: ProductPage) -> bool {
        if token != self.generation {
            return false;
        }
        for item in page.items {
            if self.seen.insert(item.id) {
                self.items.push(item);
            }
        }
        self.total_count = page.total_count;
        self.cursor = page.next_cursor;
        self.phase = QueryPhase::Ready {
            has_more: self.cursor.is_some(),
        };
        true
    }

    /// Commit the single bounded result of a favorites fetch.
    pub fn commit_bounded(&mut self, token: u64, items: Vec<ProductSummary>) -> bool {
        if token != self.generation {
            return false;
        }
        for item in items {
            if self.seen.insert(item.id) {
                self.items.push(item);
            }
        }
        self.total_count = self.items.len() as u32;
        self.cursor = None;
        self.phase = QueryPhase::Ready { has_more: false };
        true
    }

    /// Record a failed fetch. Previously committed pages stay visible;
    /// a stale token is ignored like any other stale response.
    pub fn fail(&mut self, token: u64) -> bool {
        if token != self.generation {
            return false;
        }
        self.phase = QueryPhase::Failed;
        true
    }

    pub fn items(&self) -> &[ProductSummary] {
        &self.items
    }

    pub fn phase(&self) -> QueryPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == QueryPhase::Loading
    }

    pub fn can_load_more(&self) -> bool {
        self.phase == (QueryPhase::Ready { has_more: true })
    }

    pub fn total_count(&self) -> u32 {
        self.total_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u32) -> ProductSummary {
        ProductSummary {
            id,
            name: format!("Product {}", id),
            price: 1.0,
            currency: "EUR".to_string(),
            unit: "piece".to_string(),
            in_stock: true,
            stock_quantity: 10.0,
            weighted: false,
            image_url: None,
        }
    }

    fn page(ids: &[u32], next_cursor: Option<&str>) -> ProductPage {
        ProductPage {
            items: ids.iter().copied().map(product).collect(),
            next_cursor: next_cursor.map(str::to_string),
            total_count: 100,
        }
    }

    #[test]
    fn test_pages_append_and_dedup_first_seen() {
        let mut q = CatalogQuery::new();
        let token = q.restart(false);
        assert!(q.commit_page(token, page(&[1, 2, 3], Some("c1"))));

        let (token, cursor) = q.begin_next_page().unwrap();
        assert_eq!(cursor, "c1");
        // Overlapping page: 3 already seen, must not appear twice.
        assert!(q.commit_page(token, page(&[3, 4], None)));

        let ids: Vec<u32> = q.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert!(!q.can_load_more());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut q = CatalogQuery::new();
        let old = q.restart(false);
        let new = q.restart(false);

        assert!(!q.commit_page(old, page(&[1, 2], Some("c"))));
        assert!(q.items().is_empty());
        assert!(q.is_loading());

        assert!(q.commit_page(new, page(&[9], None)));
        let ids: Vec<u32> = q.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9]);
    }

    #[test]
    fn test_filter_change_mid_pagination_keeps_only_new_configuration() {
        // C1 page 1 committed, C1 page 2 in flight, then the filter
        // changes; C1's page 2 lands after C2 and must vanish.
        let mut q = CatalogQuery::new();
        let c1 = q.restart(false);
        assert!(q.commit_page(c1, page(&[1, 2], Some("c1p2"))));
        let (c1_token, _) = q.begin_next_page().unwrap();

        let c2 = q.restart(false);
        assert!(q.commit_page(c2, page(&[50, 51], None)));

        assert!(!q.commit_page(c1_token, page(&[3, 4], None)));
        let ids: Vec<u32> = q.items().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![50, 51]);
    }

    #[test]
    fn test_single_in_flight_next_page() {
        let mut q = CatalogQuery::new();
        let token = q.restart(false);
        q.commit_page(token, page(&[1], Some("c")));

        assert!(q.begin_next_page().is_some());
        // Second claim while the first is still loading.
        assert!(q.begin_next_page().is_none());
    }

    #[test]
    fn test_exhausted_sequence_yields_no_next_page() {
        let mut q = CatalogQuery::new();
        let token = q.restart(false);
        q.commit_page(token, page(&[1], None));
        assert!(q.begin_next_page().is_none());
    }

    #[test]
    fn test_failure_keeps_items_and_blocks_load_more() {
        let mut q = CatalogQuery::new();
        let token = q.restart(false);
        q.commit_page(token, page(&[1, 2], Some("c")));
        let (token, _) = q.begin_next_page().unwrap();

        assert!(q.fail(token));
        assert_eq!(q.phase(), QueryPhase::Failed);
        assert_eq!(q.items().len(), 2);
        assert!(!q.can_load_more());

        // Retry restarts the configuration from the first page.
        let retry = q.restart(false);
        assert!(q.items().is_empty());
        assert!(q.commit_page(retry, page(&[1, 2, 3], None)));
        assert_eq!(q.items().len(), 3);
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut q = CatalogQuery::new();
        let old = q.restart(false);
        let new = q.restart(false);
        assert!(!q.fail(old));
        assert!(q.is_loading());
        assert!(q.fail(new));
    }

    #[test]
    fn test_bounded_mode_suppresses_pagination() {
        let mut q = CatalogQuery::new();
        let token = q.restart(true);
        assert!(q.commit_bounded(token, vec![product(1), product(2), product(1)]));

        assert_eq!(q.items().len(), 2);
        assert_eq!(q.total_count(), 2);
        assert!(!q.can_load_more());
        assert!(q.begin_next_page().is_none());
    }
}
