//! The filter engine and deferred re-evaluation.
//!
//! [`FilterEngine`] ties the pieces together: it owns the current item
//! set, the active filters, and the registry, and notifies subscribers
//! when the filter state changes. Evaluation itself stays pure:
//! [`FilterEngine::apply`] is a full re-scan with no cached results, so
//! two engines with the same state always agree.
//!
//! [`RefreshScheduler`] coalesces bursts of filter edits: every trigger
//! supersedes the pending one, and only the latest pass reports ready
//! after a short deferral (last write wins).

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use mabi_auction_api::AuctionItem;

use crate::aggregator::ActiveFilters;
use crate::descriptor::{FilterDescriptor, SlotQuery};
use crate::evaluator::Evaluator;
use crate::registry::OptionRegistry;

/// How long a refresh pass waits before re-evaluating, so that a burst
/// of filter edits coalesces into one pass.
const REFRESH_DEFERRAL: Duration = Duration::from_millis(4);

/// Notification published to engine subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    /// The active filter set changed; carries a snapshot of it.
    FiltersChanged(Vec<FilterDescriptor>),
    /// The browsing category changed. Active filters are cleared first.
    CategoryChanged(String),
}

type Subscriber = Box<dyn FnMut(&FilterEvent)>;

/// Owns the item set and active filters, and publishes change events.
pub struct FilterEngine {
    registry: &'static OptionRegistry,
    items: Vec<AuctionItem>,
    filters: ActiveFilters,
    category: Option<String>,
    subscribers: Vec<Subscriber>,
}

impl std::fmt::Debug for FilterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterEngine")
            .field("items", &self.items.len())
            .field("filters", &self.filters)
            .field("category", &self.category)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// Creates an engine over the standard option registry.
    pub fn new() -> Self {
        Self::with_registry(OptionRegistry::standard())
    }

    /// Creates an engine over a custom registry.
    pub fn with_registry(registry: &'static OptionRegistry) -> Self {
        Self {
            registry,
            items: Vec::new(),
            filters: ActiveFilters::new(),
            category: None,
            subscribers: Vec::new(),
        }
    }

    /// Replaces the item set. Filters stay active.
    pub fn set_items(&mut self, items: Vec<AuctionItem>) {
        self.items = items;
    }

    pub fn items(&self) -> &[AuctionItem] {
        &self.items
    }

    pub fn filters(&self) -> &ActiveFilters {
        &self.filters
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Registers a callback for filter-state change events.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&FilterEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    /// Sets or replaces a filter and notifies subscribers.
    pub fn set_filter(&mut self, filter: FilterDescriptor) {
        self.filters.upsert(filter);
        self.publish_filters_changed();
    }

    /// Removes the filter for a name. Subscribers are notified only if a
    /// filter was actually removed.
    pub fn remove_filter(&mut self, name: &str) -> Option<FilterDescriptor> {
        let removed = self.filters.remove(name);
        if removed.is_some() {
            self.publish_filters_changed();
        }
        removed
    }

    /// Clears all active filters and notifies subscribers.
    pub fn clear_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.publish_filters_changed();
        }
    }

    /// Replaces one reforge-option slot and notifies subscribers.
    pub fn set_reforge_slot(&mut self, slot_index: usize, slot: SlotQuery) {
        self.filters.upsert_reforge_slot(slot_index, slot);
        self.publish_filters_changed();
    }

    /// Replaces one set-effect slot and notifies subscribers.
    pub fn set_set_effect_slot(&mut self, slot_index: usize, slot: SlotQuery) {
        self.filters.upsert_set_effect_slot(slot_index, slot);
        self.publish_filters_changed();
    }

    /// Switches the browsing category.
    ///
    /// Filters built for one category rarely make sense in another, so the
    /// active set is cleared before the change is published.
    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();
        let had_filters = !self.filters.is_empty();
        self.filters.clear();
        self.category = Some(category.clone());

        if had_filters {
            self.publish_filters_changed();
        }
        self.publish(&FilterEvent::CategoryChanged(category));
    }

    /// Evaluates the active filters over the item set.
    ///
    /// A pure full re-scan: the result depends only on the items and the
    /// active filters, never on previous calls.
    pub fn apply(&self) -> Vec<&AuctionItem> {
        let evaluator = Evaluator::new(self.registry);
        self.filters.filter_items(&self.items, &evaluator)
    }

    fn publish_filters_changed(&mut self) {
        let snapshot: Vec<FilterDescriptor> = self.filters.iter().cloned().collect();
        self.publish(&FilterEvent::FiltersChanged(snapshot));
    }

    fn publish(&mut self, event: &FilterEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}

/// Coalesces filter edits into deferred re-evaluation passes.
///
/// Every [`trigger`](Self::trigger) bumps a generation counter and hands
/// back a [`RefreshPass`]. After a short deferral the pass resolves to
/// `true` only if no later trigger superseded it, so a burst of edits
/// costs one re-evaluation. Superseded passes are not cancelled; they
/// resolve to `false`.
#[derive(Debug, Clone, Default)]
pub struct RefreshScheduler {
    generation: Arc<AtomicU64>,
}

/// One pending re-evaluation pass. See [`RefreshScheduler`].
#[derive(Debug)]
pub struct RefreshPass {
    generation: u64,
    counter: Arc<AtomicU64>,
}

impl RefreshScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a pass, superseding any pass still pending.
    pub fn trigger(&self) -> RefreshPass {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        RefreshPass {
            generation,
            counter: Arc::clone(&self.generation),
        }
    }
}

impl RefreshPass {
    /// Waits out the deferral, then reports whether this pass is still the
    /// latest one and should re-evaluate.
    pub async fn ready(self) -> bool {
        tokio::time::sleep(REFRESH_DEFERRAL).await;
        self.counter.load(Ordering::SeqCst) == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FilterKind;
    use mabi_auction_api::ItemOption;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn make_item(id: &str, options: Vec<ItemOption>) -> AuctionItem {
        AuctionItem {
            id: id.to_string(),
            display_name: format!("item {id}"),
            price: 1_000,
            options,
            expires_at: None,
        }
    }

    fn recording_engine() -> (FilterEngine, Rc<RefCell<Vec<FilterEvent>>>) {
        let mut engine = FilterEngine::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        (engine, events)
    }

    // ==================== Engine Tests ====================

    #[test]
    fn test_apply_without_filters_returns_all_items() {
        let mut engine = FilterEngine::new();
        engine.set_items(vec![make_item("a", vec![]), make_item("b", vec![])]);
        assert_eq!(engine.apply().len(), 2);
    }

    #[test]
    fn test_apply_is_a_pure_rescan() {
        let mut engine = FilterEngine::new();
        engine.set_items(vec![
            make_item("a", vec![ItemOption::new("밸런스", "50")]),
            make_item("b", vec![ItemOption::new("밸런스", "10")]),
        ]);
        engine.set_filter(FilterDescriptor::range("밸런스", Some(40.0), None));

        let first: Vec<&str> = engine.apply().iter().map(|i| i.id.as_str()).collect();
        let second: Vec<&str> = engine.apply().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(first, vec!["a"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_set_filter_publishes_snapshot() {
        let (mut engine, events) = recording_engine();
        engine.set_filter(FilterDescriptor::range("공격", Some(100.0), None));

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        match &events[0] {
            FilterEvent::FiltersChanged(filters) => {
                assert_eq!(filters.len(), 1);
                assert_eq!(filters[0].name, "공격");
            }
            other => panic!("expected FiltersChanged, got {other:?}"),
        }
    }

    #[test]
    fn test_remove_missing_filter_is_silent() {
        let (mut engine, events) = recording_engine();
        assert!(engine.remove_filter("공격").is_none());
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn test_category_change_clears_filters() {
        let (mut engine, events) = recording_engine();
        engine.set_filter(FilterDescriptor::range("공격", Some(100.0), None));
        engine.set_category("한손 검");

        assert!(engine.filters().is_empty());
        assert_eq!(engine.category(), Some("한손 검"));

        let events = events.borrow();
        // set_filter, then the clear, then the category event itself.
        assert_eq!(events.len(), 3);
        assert_eq!(events[1], FilterEvent::FiltersChanged(Vec::new()));
        assert_eq!(events[2], FilterEvent::CategoryChanged("한손 검".to_string()));
    }

    #[test]
    fn test_category_change_without_filters_skips_clear_event() {
        let (mut engine, events) = recording_engine();
        engine.set_category("둔기");

        let events = events.borrow();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0], FilterEvent::CategoryChanged("둔기".to_string()));
    }

    #[test]
    fn test_slot_edits_publish_events() {
        let (mut engine, events) = recording_engine();
        engine.set_reforge_slot(0, SlotQuery::named("스매시"));
        engine.set_set_effect_slot(1, SlotQuery::named("생명력"));

        assert_eq!(events.borrow().len(), 2);
        assert_eq!(engine.filters().len(), 2);
    }

    #[test]
    fn test_two_engines_with_same_state_agree() {
        let items = vec![
            make_item("a", vec![ItemOption::new("숙련", "95")]),
            make_item("b", vec![ItemOption::new("숙련", "10")]),
        ];
        let filter = FilterDescriptor::range("숙련", Some(90.0), None);

        let mut left = FilterEngine::new();
        left.set_items(items.clone());
        left.set_filter(filter.clone());

        let mut right = FilterEngine::new();
        right.set_filter(filter);
        right.set_items(items);

        let left_ids: Vec<&str> = left.apply().iter().map(|i| i.id.as_str()).collect();
        let right_ids: Vec<&str> = right.apply().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(left_ids, right_ids);
    }

    #[test]
    fn test_unknown_filter_kind_keeps_items() {
        let mut engine = FilterEngine::new();
        engine.set_items(vec![make_item("a", vec![])]);
        engine.set_filter(FilterDescriptor::new("공격", FilterKind::Unknown));
        assert_eq!(engine.apply().len(), 1);
    }

    // ==================== Refresh Scheduler Tests ====================

    #[tokio::test(start_paused = true)]
    async fn test_single_trigger_is_ready() {
        let scheduler = RefreshScheduler::new();
        assert!(scheduler.trigger().ready().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_trigger_supersedes_earlier() {
        let scheduler = RefreshScheduler::new();
        let first = scheduler.trigger();
        let second = scheduler.trigger();

        assert!(!first.ready().await);
        assert!(second.ready().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_burst_coalesces_to_last_pass() {
        let scheduler = RefreshScheduler::new();
        let passes: Vec<RefreshPass> = (0..5).map(|_| scheduler.trigger()).collect();

        let mut ready = Vec::new();
        for pass in passes {
            ready.push(pass.ready().await);
        }
        assert_eq!(ready, vec![false, false, false, false, true]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_trigger_after_completed_pass_is_ready_again() {
        let scheduler = RefreshScheduler::new();
        assert!(scheduler.trigger().ready().await);
        assert!(scheduler.trigger().ready().await);
    }
}
