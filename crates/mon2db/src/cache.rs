//! In-memory object identity cache: `(kind, name1, name2)` to database
//! id. Names are normalized before they reach this layer: a missing
//! second name is the empty string here even though it is NULL in the
//! database.

use mon2db_core::object::ObjectKind;

const HASH_SLOTS: usize = 4096;
const HASH_PRIME: u64 = 509;
const HASH_SEED: u64 = 0x123;

#[derive(Debug)]
struct Entry {
    kind: ObjectKind,
    name1: String,
    name2: String,
    id: u64,
}

/// Hash table of cached objects. Buckets keep their entries ordered by
/// `(kind, name1, name2)` so scans can stop early and duplicates are
/// rejected on insert (a duplicate would shadow the original).
#[derive(Debug)]
pub struct ObjectCache {
    buckets: Vec<Vec<Entry>>,
    count: usize,
    collisions: usize,
}

impl ObjectCache {
    pub fn new() -> ObjectCache {
        ObjectCache::with_slots(HASH_SLOTS)
    }

    /// Builds a cache sized for a known object count, at least the
    /// default slot count and roughly half-full beyond that.
    pub fn for_capacity(num_objects: usize) -> ObjectCache {
        ObjectCache::with_slots((num_objects * 2).max(HASH_SLOTS))
    }

    fn with_slots(slots: usize) -> ObjectCache {
        let mut buckets = Vec::with_capacity(slots);
        buckets.resize_with(slots, Vec::new);
        ObjectCache {
            buckets,
            count: 0,
            collisions: 0,
        }
    }

    fn hash(&self, name1: &str, name2: &str) -> usize {
        let mut h = HASH_SEED;
        for b in name1.bytes().chain(name2.bytes()) {
            h = (b as u64).wrapping_add(h.wrapping_mul(HASH_PRIME));
        }
        (h % self.buckets.len() as u64) as usize
    }

    /// Looks up a cached id. Both names must be normalized (non-null,
    /// empty for absent).
    pub fn lookup(&self, kind: ObjectKind, name1: &str, name2: &str) -> Option<u64> {
        let bucket = &self.buckets[self.hash(name1, name2)];
        bucket
            .binary_search_by(|e| {
                (e.kind.code(), e.name1.as_str(), e.name2.as_str()).cmp(&(kind.code(), name1, name2))
            })
            .ok()
            .map(|i| bucket[i].id)
    }

    /// Caches an object id. Returns false without modifying the cache
    /// when an entry with the same key already exists.
    pub fn insert(&mut self, kind: ObjectKind, name1: &str, name2: &str, id: u64) -> bool {
        let h = self.hash(name1, name2);
        let bucket = &mut self.buckets[h];
        let pos = match bucket.binary_search_by(|e| {
            (e.kind.code(), e.name1.as_str(), e.name2.as_str()).cmp(&(kind.code(), name1, name2))
        }) {
            Ok(_) => return false,
            Err(pos) => pos,
        };

        if !bucket.is_empty() {
            self.collisions += 1;
        }
        self.count += 1;
        bucket.insert(
            pos,
            Entry {
                kind,
                name1: name1.to_owned(),
                name2: name2.to_owned(),
                id,
            },
        );
        true
    }

    /// Number of cached objects.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of inserts that landed in an occupied bucket.
    pub fn collisions(&self) -> usize {
        self.collisions
    }
}

impl Default for ObjectCache {
    fn default() -> ObjectCache {
        ObjectCache::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_distinguishes_kind_and_names() {
        let mut cache = ObjectCache::new();
        assert!(cache.insert(ObjectKind::Host, "web01", "", 1));
        assert!(cache.insert(ObjectKind::Service, "web01", "HTTP", 2));
        assert!(cache.insert(ObjectKind::Service, "web01", "SSH", 3));

        assert_eq!(cache.lookup(ObjectKind::Host, "web01", ""), Some(1));
        assert_eq!(cache.lookup(ObjectKind::Service, "web01", "HTTP"), Some(2));
        assert_eq!(cache.lookup(ObjectKind::Service, "web01", "SSH"), Some(3));
        assert_eq!(cache.lookup(ObjectKind::Service, "web01", "http"), None);
        assert_eq!(cache.lookup(ObjectKind::Contact, "web01", ""), None);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn duplicate_inserts_are_rejected() {
        let mut cache = ObjectCache::new();
        assert!(cache.insert(ObjectKind::Host, "web01", "", 1));
        assert!(!cache.insert(ObjectKind::Host, "web01", "", 99));
        assert_eq!(cache.lookup(ObjectKind::Host, "web01", ""), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn capacity_sizing_has_a_floor() {
        let cache = ObjectCache::for_capacity(10);
        assert_eq!(cache.buckets.len(), HASH_SLOTS);
        let cache = ObjectCache::for_capacity(5000);
        assert_eq!(cache.buckets.len(), 10000);
    }

    #[test]
    fn colliding_keys_share_a_bucket() {
        // Same names hash identically regardless of kind, forcing the
        // entries into one ordered bucket.
        let mut cache = ObjectCache::new();
        assert!(cache.insert(ObjectKind::Service, "db01", "MySQL", 7));
        assert!(cache.insert(ObjectKind::Host, "db01", "MySQL", 8));
        assert_eq!(cache.collisions(), 1);
        assert_eq!(cache.lookup(ObjectKind::Host, "db01", "MySQL"), Some(8));
        assert_eq!(cache.lookup(ObjectKind::Service, "db01", "MySQL"), Some(7));
    }
}
