//! LRU Tracker Module
//!
//! Recency ordering for cache eviction, stored as an index-linked list inside
//! a slot arena. Every operation is O(1): a handle names its slot directly, so
//! promoting or unlinking never scans the list.

// == Constants ==
/// Marks the absence of a link (list end or empty free list).
const NIL: usize = usize::MAX;

// == Handle ==
/// Stable reference to a tracked value.
///
/// A handle stays valid until its value is removed or evicted; after that the
/// slot may be recycled for a different value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(usize);

#[derive(Debug)]
struct Slot<T> {
    value: Option<T>,
    prev: usize,
    next: usize,
}

// == LRU Tracker ==
/// Tracks access order for LRU eviction strategy.
///
/// - Head = most recently used
/// - Tail = least recently used (next eviction victim)
///
/// Vacated slots are chained through `next` into a free list and reused by
/// later insertions, so the arena never grows beyond the peak entry count.
#[derive(Debug)]
pub struct LruTracker<T> {
    slots: Vec<Slot<T>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<T> Default for LruTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LruTracker<T> {
    // == Constructor ==
    /// Creates a new empty LRU tracker.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tracker with room for `capacity` values before the
    /// arena reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    // == Push Front ==
    /// Adds a value as the most recently used and returns its handle.
    pub fn push_front(&mut self, value: T) -> Handle {
        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = self.slots[idx].next;
            self.slots[idx] = Slot {
                value: Some(value),
                prev: NIL,
                next: NIL,
            };
            idx
        } else {
            self.slots.push(Slot {
                value: Some(value),
                prev: NIL,
                next: NIL,
            });
            self.slots.len() - 1
        };

        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    // == Touch ==
    /// Marks a value as recently used (moves it to the head).
    ///
    /// Returns false if the handle does not name a live slot.
    pub fn touch(&mut self, handle: Handle) -> bool {
        if !self.is_live(handle) {
            return false;
        }
        if self.head != handle.0 {
            self.unlink(handle.0);
            self.link_front(handle.0);
        }
        true
    }

    // == Remove ==
    /// Removes a value from the tracker, returning it.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        if !self.is_live(handle) {
            return None;
        }
        self.unlink(handle.0);
        self.release(handle.0)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used value.
    ///
    /// Returns None if tracker is empty.
    pub fn evict_oldest(&mut self) -> Option<T> {
        if self.tail == NIL {
            return None;
        }
        self.remove(Handle(self.tail))
    }

    // == Peek Oldest ==
    /// Returns the least recently used value without removing it.
    pub fn peek_oldest(&self) -> Option<&T> {
        self.slots.get(self.tail).and_then(|slot| slot.value.as_ref())
    }

    // == Access ==
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots.get(handle.0).and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.0)
            .and_then(|slot| slot.value.as_mut())
    }

    // == Length ==
    /// Returns the number of tracked values.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iteration ==
    /// Iterates from most recently used to least recently used.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            current: self.head,
            remaining: self.len,
        }
    }

    // == Consistency ==
    /// Walks the list from head to tail and checks that the links are
    /// symmetric, acyclic, end at `tail` and cover exactly `len` values.
    pub fn is_consistent(&self) -> bool {
        let mut prev = NIL;
        let mut current = self.head;
        let mut visited = 0;

        while current != NIL {
            let Some(slot) = self.slots.get(current) else {
                return false;
            };
            if slot.value.is_none() || slot.prev != prev {
                return false;
            }
            visited += 1;
            // More steps than values means a cycle.
            if visited > self.len {
                return false;
            }
            prev = current;
            current = slot.next;
        }

        prev == self.tail && visited == self.len
    }

    // == Internal Linking ==
    fn is_live(&self, handle: Handle) -> bool {
        self.slots
            .get(handle.0)
            .is_some_and(|slot| slot.value.is_some())
    }

    fn link_front(&mut self, idx: usize) {
        self.slots[idx].prev = NIL;
        self.slots[idx].next = self.head;
        if self.head != NIL {
            self.slots[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.slots[idx].prev;
        let next = self.slots[idx].next;

        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }

        self.slots[idx].prev = NIL;
        self.slots[idx].next = NIL;
    }

    fn release(&mut self, idx: usize) -> Option<T> {
        let value = self.slots[idx].value.take();
        self.slots[idx].next = self.free;
        self.free = idx;
        self.len -= 1;
        value
    }
}

// == Iterator ==
/// Iterator over tracked values in MRU → LRU order.
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    current: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.current == NIL {
            return None;
        }
        let idx = self.current;
        let slot = self.slots.get(idx)?;
        self.current = slot.next;
        self.remaining -= 1;
        slot.value.as_ref().map(|value| (Handle(idx), value))
    }
}
