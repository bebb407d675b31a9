//! Crawl frontier: the mutable per-run crawl state
//!
//! A [`Frontier`] owns two sets for the lifetime of one run: URLs already
//! visited (terminal; there is no revisit or refresh) and URLs pending a
//! visit. The invariant `visited ∩ pending = ∅` holds after every
//! operation: popping an entry transfers its URL to the visited set before
//! the entry is returned, and candidates already seen in either set are
//! refused.
//!
//! Pop order is a configuration decision, not an incidental one. Under a
//! page cap, priority order spends the cap on the highest-expected-value
//! pages first; FIFO explores breadth-first and may exhaust the cap on
//! near-seed noise.

use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet, VecDeque};
use url::Url;

/// Pop order for pending URLs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrontierOrder {
    /// Strict insertion order (breadth-first)
    Fifo,

    /// Highest recommended-link priority first, ties by insertion order
    Priority,
}

/// A URL awaiting its visit, with the context needed for ordering
#[derive(Debug, Clone)]
pub struct FrontierEntry {
    pub url: Url,

    /// Recommended-link priority at discovery time; the seed gets
    /// `f64::INFINITY` so it always pops first
    pub priority: f64,

    /// Monotonic insertion sequence, used for tie-breaks and FIFO order
    seq: u64,
}

// Max-heap order: higher priority first, earlier insertion wins ties.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .total_cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

#[derive(Debug)]
enum Pending {
    Fifo(VecDeque<FrontierEntry>),
    Priority(BinaryHeap<FrontierEntry>),
}

/// Visited set plus pending queue for one crawl run
///
/// Owned by exactly one driver; not designed for concurrent mutation.
#[derive(Debug)]
pub struct Frontier {
    visited: HashSet<Url>,
    pending_urls: HashSet<Url>,
    pending: Pending,
    next_seq: u64,
}

impl Frontier {
    pub fn new(order: FrontierOrder) -> Self {
        Self {
            visited: HashSet::new(),
            pending_urls: HashSet::new(),
            pending: match order {
                FrontierOrder::Fifo => Pending::Fifo(VecDeque::new()),
                FrontierOrder::Priority => Pending::Priority(BinaryHeap::new()),
            },
            next_seq: 0,
        }
    }

    /// Adds the start URL; it outranks every discovered candidate
    pub fn seed(&mut self, url: Url) {
        self.add_candidate(url, f64::INFINITY);
    }

    /// Adds a discovered URL unless it is already visited or pending
    ///
    /// Returns whether the URL was actually enqueued. Duplicate discovery
    /// (the same URL recommended by two different pages) is refused here, so
    /// a URL can be pending at most once and visited URLs are permanently
    /// ignored.
    pub fn add_candidate(&mut self, url: Url, priority: f64) -> bool {
        if self.visited.contains(&url) || self.pending_urls.contains(&url) {
            return false;
        }

        self.pending_urls.insert(url.clone());
        let entry = FrontierEntry {
            url,
            priority,
            seq: self.next_seq,
        };
        self.next_seq += 1;

        match &mut self.pending {
            Pending::Fifo(queue) => queue.push_back(entry),
            Pending::Priority(heap) => heap.push(entry),
        }

        true
    }

    /// Removes and returns the next entry per the configured order
    ///
    /// The returned URL is transferred to the visited set before this method
    /// returns, so it can never be popped or re-added again and the
    /// visited/pending invariant holds at every observable point.
    pub fn pop_next(&mut self) -> Option<FrontierEntry> {
        let entry = match &mut self.pending {
            Pending::Fifo(queue) => queue.pop_front(),
            Pending::Priority(heap) => heap.pop(),
        }?;

        self.pending_urls.remove(&entry.url);
        self.visited.insert(entry.url.clone());
        Some(entry)
    }

    /// Marks a URL visited without popping it; idempotent and terminal
    ///
    /// A pending duplicate is evicted so the invariant survives.
    pub fn mark_visited(&mut self, url: &Url) {
        if !self.visited.insert(url.clone()) {
            return;
        }

        if self.pending_urls.remove(url) {
            match &mut self.pending {
                Pending::Fifo(queue) => queue.retain(|e| &e.url != url),
                Pending::Priority(heap) => {
                    let remaining: Vec<_> = std::mem::take(heap)
                        .into_iter()
                        .filter(|e| &e.url != url)
                        .collect();
                    *heap = remaining.into();
                }
            }
        }
    }

    pub fn is_visited(&self, url: &Url) -> bool {
        self.visited.contains(url)
    }

    /// Count of pending entries
    pub fn len(&self) -> usize {
        self.pending_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending_urls.is_empty()
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }
}
