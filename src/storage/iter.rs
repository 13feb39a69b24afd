use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::types::{Key, Value};

/// Single entry produced by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: Key,
    pub value: Value,
}

/// Counts scans that have been opened but not yet released.
#[derive(Debug, Clone, Default)]
pub struct ScanTracker(Arc<AtomicUsize>);

impl ScanTracker {
    pub fn open_scans(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    fn acquire(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }

    fn release(&self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Forward-only cursor over a range scan.
///
/// The cursor holds a scan slot on its store until [`close`](Self::close) is
/// called or it is dropped, whichever comes first. Closing more than once is
/// a no-op.
#[derive(Debug)]
pub struct StateIterator {
    entries: std::vec::IntoIter<KeyValue>,
    tracker: Option<ScanTracker>,
}

impl StateIterator {
    pub(crate) fn open(entries: Vec<KeyValue>, tracker: &ScanTracker) -> Self {
        tracker.acquire();
        Self {
            entries: entries.into_iter(),
            tracker: Some(tracker.clone()),
        }
    }

    pub fn has_next(&self) -> bool {
        self.tracker.is_some() && !self.entries.as_slice().is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.tracker.is_none()
    }

    pub fn close(&mut self) {
        if let Some(tracker) = self.tracker.take() {
            self.entries = Vec::new().into_iter();
            tracker.release();
        }
    }
}

impl Iterator for StateIterator {
    type Item = KeyValue;

    fn next(&mut self) -> Option<Self::Item> {
        if self.tracker.is_none() {
            return None;
        }
        self.entries.next()
    }
}

impl Drop for StateIterator {
    fn drop(&mut self) {
        self.close();
    }
}

/// Collects `[start, end)` from an ordered map, treating empty bounds as open.
pub(crate) fn collect_range(map: &BTreeMap<Key, Value>, start: &str, end: &str) -> Vec<KeyValue> {
    if !start.is_empty() && !end.is_empty() && start > end {
        return Vec::new();
    }

    let lower = if start.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start)
    };
    let upper = if end.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end)
    };

    map.range::<str, _>((lower, upper))
        .map(|(key, value)| KeyValue {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}
