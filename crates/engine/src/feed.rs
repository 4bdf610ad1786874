//! Live item feeds.
//!
//! The store keeps one `watch` channel per [`Section`] holding that
//! partition's latest full row set. Feeds are owned values with an explicit
//! lifetime: dropping a feed releases the subscription, so a consumer that
//! goes away never leaks a listener that keeps firing.
//!
//! Every delivery is a full-replace snapshot of the visible set, never a
//! diff, and the first `next()` call yields the current contents right away.

use std::collections::{HashMap, HashSet};

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::{Item, Section};

/// Live feed over a single section partition.
///
/// Default section views hide soft-deleted items, so snapshots never contain
/// an item with `unavailable == true`.
#[derive(Debug)]
pub struct SectionFeed {
    section: Section,
    rx: watch::Receiver<Vec<Item>>,
    primed: bool,
}

impl SectionFeed {
    pub(crate) fn new(section: Section, rx: watch::Receiver<Vec<Item>>) -> Self {
        Self {
            section,
            rx,
            primed: false,
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Next snapshot of the section's available items.
    ///
    /// Returns `None` once the owning store has gone away.
    pub async fn next(&mut self) -> Option<Vec<Item>> {
        if self.primed {
            self.rx.changed().await.ok()?;
        } else {
            self.primed = true;
        }
        let rows = self.rx.borrow_and_update().clone();
        Some(rows.into_iter().filter(|item| !item.unavailable).collect())
    }
}

/// Fan-in feed over every section, used by the "Collection" view.
///
/// One watcher task per section forwards partition snapshots into a funnel
/// channel; the feed keeps a per-partition cache and re-merges it into the
/// aggregate whenever a single partition fires. Only the firing partition's
/// slice is replaced, so the aggregate is eventually consistent across
/// partitions rather than atomic. Unlike [`SectionFeed`], the Collection
/// shows everything, unavailable items included.
#[derive(Debug)]
pub struct CollectionFeed {
    cache: HashMap<Section, Vec<Item>>,
    updates: mpsc::UnboundedReceiver<(Section, Vec<Item>)>,
    tasks: Vec<JoinHandle<()>>,
    primed: bool,
}

impl CollectionFeed {
    /// Spawns the per-section watcher tasks; must run inside a tokio runtime.
    pub(crate) fn new(senders: &HashMap<Section, watch::Sender<Vec<Item>>>) -> Self {
        let (tx, updates) = mpsc::unbounded_channel();
        let mut cache = HashMap::new();
        let mut tasks = Vec::with_capacity(Section::ALL.len());

        for section in Section::ALL {
            let Some(sender) = senders.get(&section) else {
                continue;
            };
            let mut rx = sender.subscribe();
            cache.insert(section, rx.borrow_and_update().clone());

            let tx = tx.clone();
            tasks.push(tokio::spawn(async move {
                while rx.changed().await.is_ok() {
                    let rows = rx.borrow_and_update().clone();
                    if tx.send((section, rows)).is_err() {
                        break;
                    }
                }
            }));
        }

        Self {
            cache,
            updates,
            tasks,
            primed: false,
        }
    }

    /// Next aggregated snapshot.
    ///
    /// The first call yields the primed all-section aggregate; each later
    /// call waits for one partition to fire and replaces that slice.
    /// Returns `None` once the owning store has gone away.
    pub async fn next(&mut self) -> Option<Vec<Item>> {
        if self.primed {
            let (section, rows) = self.updates.recv().await?;
            self.cache.insert(section, rows);
        } else {
            self.primed = true;
        }
        Some(self.aggregate())
    }

    /// Merge of the cached partitions, in `Section::ALL` order, keyed by id.
    fn aggregate(&self) -> Vec<Item> {
        let mut seen = HashSet::new();
        let mut items = Vec::new();
        for section in Section::ALL {
            let Some(rows) = self.cache.get(&section) else {
                continue;
            };
            for item in rows {
                if seen.insert(item.id) {
                    items.push(item.clone());
                }
            }
        }
        items
    }
}

impl Drop for CollectionFeed {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

/// Case-insensitive substring filter on item names.
///
/// Used by the Collection search bar; a blank query keeps everything.
#[must_use]
pub fn search_by_name(items: &[Item], query: &str) -> Vec<Item> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| item.name.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
