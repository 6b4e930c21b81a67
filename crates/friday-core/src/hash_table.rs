//! Open-addressing hash table keyed by strings.
//!
//! Slots live in a flat vector whose length is always a power of two.
//! Removed entries leave a tombstone so that probe chains passing through
//! them stay intact. The hash function and the probe recurrence are supplied
//! by a [`ProbeStrategy`]; [`RollingProbe`] is the default.

use std::fmt;
use std::mem;

/// Capacity of a freshly created table.
pub const INITIAL_CAPACITY: usize = 8;

/// Load factor used unless overridden with [`HashTable::with_max_load_factor`].
pub const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.75;

/// Hashing and probing policy for [`HashTable`].
///
/// `capacity` is always a power of two and never zero.
pub trait ProbeStrategy {
    /// Home slot of `key`.
    fn hash(&self, key: &str, capacity: usize) -> usize;

    /// Slot visited after `prev` on the `probe`-th collision (1-based).
    fn next(&self, prev: usize, probe: usize, capacity: usize) -> usize {
        (prev + probe) % capacity
    }
}

/// Polynomial rolling hash over the key bytes, reduced modulo capacity at
/// every step, paired with the `(prev + probe) % capacity` recurrence.
///
/// The recurrence adds 1, 2, 3, ... to the home slot, so the n-th visited
/// slot is `home + n(n+1)/2`. Over a power-of-two capacity this visits every
/// slot exactly once in `capacity` steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollingProbe;

impl RollingProbe {
    pub const FACTOR: u64 = 100_001;
}

impl ProbeStrategy for RollingProbe {
    fn hash(&self, key: &str, capacity: usize) -> usize {
        let modulus = capacity as u64;
        let hash = key
            .bytes()
            .fold(0u64, |acc, b| {
                acc.wrapping_mul(Self::FACTOR).wrapping_add(u64::from(b)) % modulus
            });
        hash as usize
    }
}

#[derive(Clone, Debug)]
enum Slot<V> {
    Empty,
    Deleted,
    Occupied { key: String, value: V },
}

impl<V> Slot<V> {
    fn is_vacant(&self) -> bool {
        !matches!(self, Slot::Occupied { .. })
    }
}

/// Result of walking a probe chain for one key.
struct Probe {
    /// Slot holding the key, if present.
    found: Option<usize>,
    /// First tombstone or empty slot met along the chain.
    vacant: Option<usize>,
}

/// String-keyed open-addressing map with tombstone deletion.
///
/// `insert` never overwrites: a second insert of the same key is refused and
/// the stored value is kept.
#[derive(Clone)]
pub struct HashTable<V, P = RollingProbe> {
    slots: Vec<Slot<V>>,
    len: usize,
    max_load_factor: f64,
    strategy: P,
}

impl<V> HashTable<V, RollingProbe> {
    pub fn new() -> Self {
        Self::with_strategy(RollingProbe)
    }
}

impl<V> Default for HashTable<V, RollingProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, P: ProbeStrategy> HashTable<V, P> {
    /// Create an empty table using a custom probe strategy.
    pub fn with_strategy(strategy: P) -> Self {
        Self {
            slots: empty_slots(INITIAL_CAPACITY),
            len: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            strategy,
        }
    }

    /// Set the occupancy ratio above which the table doubles before inserting.
    ///
    /// # Panics
    /// If `factor` is not in `(0, 1)`.
    pub fn with_max_load_factor(mut self, factor: f64) -> Self {
        assert!(
            factor > 0.0 && factor < 1.0,
            "max load factor must be in (0, 1), got {factor}"
        );
        self.max_load_factor = factor;
        self
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Insert `key -> value`. Returns `false` and keeps the existing value
    /// when `key` is already present.
    pub fn insert(&mut self, key: &str, value: V) -> bool {
        if self.len as f64 / self.capacity() as f64 > self.max_load_factor {
            self.grow();
        }

        let mut probe = self.probe(key);
        if probe.found.is_some() {
            return false;
        }

        // A strategy whose chain skips slots may miss every vacancy.
        let index = loop {
            if let Some(index) = probe.vacant {
                break index;
            }
            self.grow();
            probe = self.probe(key);
        };
        self.slots[index] = Slot::Occupied {
            key: key.to_owned(),
            value,
        };
        self.len += 1;
        true
    }

    pub fn find(&self, key: &str) -> Option<&V> {
        let index = self.probe(key).found?;
        match &self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.probe(key).found?;
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Remove `key`, leaving a tombstone. Returns `false` if it was absent.
    pub fn delete(&mut self, key: &str) -> bool {
        let Some(index) = self.probe(key).found else {
            return false;
        };
        self.slots[index] = Slot::Deleted;
        self.len -= 1;
        true
    }

    /// Iterate live entries in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key.as_str(), value)),
            _ => None,
        })
    }

    fn probe(&self, key: &str) -> Probe {
        let capacity = self.capacity();
        let mut index = self.strategy.hash(key, capacity);
        let mut vacant = None;

        for probe in 1..=capacity {
            match &self.slots[index] {
                Slot::Empty => {
                    return Probe {
                        found: None,
                        vacant: vacant.or(Some(index)),
                    };
                }
                Slot::Deleted => {
                    vacant.get_or_insert(index);
                }
                Slot::Occupied { key: k, .. } if k == key => {
                    return Probe {
                        found: Some(index),
                        vacant,
                    };
                }
                Slot::Occupied { .. } => {}
            }
            index = self.strategy.next(index, probe, capacity);
        }

        Probe {
            found: None,
            vacant,
        }
    }

    fn grow(&mut self) {
        let capacity = self.capacity() * 2;
        let old = mem::replace(&mut self.slots, empty_slots(capacity));
        self.len = 0;

        for slot in old {
            if let Slot::Occupied { key, value } = slot {
                self.reinsert(key, value);
            }
        }
    }

    fn reinsert(&mut self, key: String, value: V) {
        let mut vacant = self.probe(&key).vacant;
        while vacant.is_none() {
            self.grow();
            vacant = self.probe(&key).vacant;
        }
        if let Some(index) = vacant {
            debug_assert!(self.slots[index].is_vacant());
            self.slots[index] = Slot::Occupied { key, value };
            self.len += 1;
        }
    }
}

impl<V: fmt::Debug, P> fmt::Debug for HashTable<V, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.slots.iter().filter_map(|slot| match slot {
            Slot::Occupied { key, value } => Some((key, value)),
            _ => None,
        });
        f.debug_map().entries(entries).finish()
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    std::iter::repeat_with(|| Slot::Empty).take(capacity).collect()
}
