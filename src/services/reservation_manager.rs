// src/services/reservation_manager.rs
//
// Reservation Manager - cache-through access to the reservation store
//
// CRITICAL RULES:
// - The manager exclusively owns the cache; nothing else reads or writes it
// - The store is the source of truth; the cache is a best-effort accelerator
// - Every store-touching operation runs under one serialization point
// - No retries, no silent recovery; store failures surface verbatim

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::reservation::Reservation;
use crate::error::{AppError, AppResult};
use crate::repositories::ReservationStore;

/// In-memory mirror of store contents, keyed by reservation id,
/// insertion-order preserved for traversal.
///
/// Derived data: wholesale-replaced on every full refresh, rebuildable from
/// the store at any time, never persisted itself.
#[derive(Default)]
pub struct ReservationCache {
    order: Vec<i64>,
    entries: HashMap<i64, Reservation>,
}

impl ReservationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace one entry. Replacing keeps the entry's original
    /// position in the traversal order.
    pub fn insert(&mut self, reservation: Reservation) {
        let id = reservation.id;
        if self.entries.insert(id, reservation).is_none() {
            self.order.push(id);
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<Reservation> {
        let removed = self.entries.remove(&id);
        if removed.is_some() {
            self.order.retain(|&k| k != id);
        }
        removed
    }

    pub fn get(&self, id: i64) -> Option<&Reservation> {
        self.entries.get(&id)
    }

    /// Drop everything and adopt the given records in their given order
    pub fn replace_all(&mut self, reservations: Vec<Reservation>) {
        self.order.clear();
        self.entries.clear();
        for reservation in reservations {
            self.insert(reservation);
        }
    }

    /// Ordered point-in-time copy of the cached records
    pub fn snapshot(&self) -> Vec<Reservation> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mediates every read and write between callers and the reservation store.
///
/// Two explicit locks implement the consistency contract:
///
/// - `op_lock` is the manager-wide serialization point: at most one
///   store-touching operation runs at a time, held across the full store
///   round-trip. A background refresh and an interactive mutation can never
///   interleave.
/// - `cache` has its own narrower lock so the snapshot read-path can run
///   while a refresh is mid-round-trip and still never observe a partially
///   replaced mapping.
///
/// The cache may be stale between refreshes; `view_all` is the
/// synchronization point that reconciles it.
pub struct ReservationManager {
    store: Arc<dyn ReservationStore>,
    op_lock: Mutex<()>,
    cache: Mutex<ReservationCache>,
}

impl ReservationManager {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self {
            store,
            op_lock: Mutex::new(()),
            cache: Mutex::new(ReservationCache::new()),
        }
    }

    /// Persist a new reservation and cache it.
    ///
    /// The store assigns the identifier; it is written back into the record
    /// before caching. If the insert fails the cache is left untouched.
    pub fn reserve(&self, mut reservation: Reservation) -> AppResult<i64> {
        let _guard = self.op_lock.lock().unwrap();

        let id = self.store.insert(&reservation)?;
        reservation.id = id;

        let mut cache = self.cache.lock().unwrap();
        cache.insert(reservation);

        Ok(id)
    }

    /// Fetch every reservation from the store, replace the entire cache
    /// content with the result, and return it.
    ///
    /// This is both a query and the synchronization point: cached entries
    /// absent from the fetched set are dropped. Used by interactive refresh
    /// and by the background sync task alike.
    pub fn view_all(&self) -> AppResult<Vec<Reservation>> {
        let _guard = self.op_lock.lock().unwrap();

        let fetched = self.store.list_all()?;

        {
            let mut cache = self.cache.lock().unwrap();
            cache.replace_all(fetched.clone());
        }

        Ok(fetched)
    }

    /// Room number for an (id, guest name) pair.
    ///
    /// Cache-first: an exactly matching cached record answers without a
    /// store round-trip. The cached answer can be stale if the store row was
    /// changed without going through `update`/`view_all`; that window is
    /// accepted, not corrected. On a cache miss the store is consulted and
    /// absence is `Ok(None)`, not an error.
    pub fn get_room(&self, id: i64, guest_name: &str) -> AppResult<Option<u32>> {
        let _guard = self.op_lock.lock().unwrap();

        {
            let cache = self.cache.lock().unwrap();
            if let Some(cached) = cache.get(id) {
                if cached.guest_name == guest_name {
                    return Ok(Some(cached.room_number));
                }
            }
        }

        self.store.find_room(id, guest_name)
    }

    /// Update the reservation with the given id to the given record.
    ///
    /// Zero affected rows means the id does not exist and fails with
    /// `AppError::NotFound`, leaving the cache untouched. On success the
    /// cache entry is replaced with the new record wholesale (not merged).
    pub fn update(&self, id: i64, mut reservation: Reservation) -> AppResult<()> {
        let _guard = self.op_lock.lock().unwrap();

        let affected = self.store.update(id, &reservation)?;
        if affected == 0 {
            return Err(AppError::NotFound);
        }

        reservation.id = id;
        let mut cache = self.cache.lock().unwrap();
        cache.insert(reservation);

        Ok(())
    }

    /// Delete the reservation with the given id.
    ///
    /// Zero affected rows fails with `AppError::NotFound`; the cache entry
    /// is removed only after the store confirms the delete.
    pub fn delete(&self, id: i64) -> AppResult<()> {
        let _guard = self.op_lock.lock().unwrap();

        let affected = self.store.delete(id)?;
        if affected == 0 {
            return Err(AppError::NotFound);
        }

        let mut cache = self.cache.lock().unwrap();
        cache.remove(id);

        Ok(())
    }

    /// Ordered point-in-time copy of the cache. Never touches the store and
    /// never fails.
    ///
    /// Deliberately not routed through the serialization point: it only
    /// needs the cache lock, so it can run while a refresh is mid-flight and
    /// will observe either the pre-swap or the post-swap content in full.
    pub fn cache_snapshot(&self) -> Vec<Reservation> {
        self.cache.lock().unwrap().snapshot()
    }
}
