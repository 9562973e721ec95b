use std::collections::{BTreeMap, HashMap};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

use anchor_lang::prelude::*;
use solana_program::instruction::AccountMeta;

#[derive(Debug, Default)]
struct Held {
    readers: usize,
    writer: bool,
}

/// Per-address account locks: many readers or one writer.
///
/// An instruction takes every lock it declares at once and keeps them until
/// its `LockGuard` drops, so instructions sharing a writable address run one
/// after the other while disjoint ones proceed in parallel.
#[derive(Debug, Default)]
pub struct LockTable {
    held: Mutex<HashMap<Pubkey, Held>>,
    released: Condvar,
}

/// Locks held for one instruction, released on drop.
#[derive(Debug)]
pub struct LockGuard<'a> {
    table: &'a LockTable,
    request: Vec<(Pubkey, bool)>,
}

impl LockTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Block until every address in `metas` can be locked, then lock them.
    pub fn acquire(&self, metas: &[AccountMeta]) -> LockGuard<'_> {
        let request = merge(metas);
        let mut held = self.held();
        while !available(&held, &request) {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        take(&mut held, &request);
        LockGuard {
            table: self,
            request,
        }
    }

    /// Lock every address in `metas` or none of them, without waiting.
    pub fn try_acquire(&self, metas: &[AccountMeta]) -> Option<LockGuard<'_>> {
        let request = merge(metas);
        let mut held = self.held();
        if !available(&held, &request) {
            return None;
        }
        take(&mut held, &request);
        Some(LockGuard {
            table: self,
            request,
        })
    }

    pub fn is_locked(&self, key: &Pubkey) -> bool {
        self.held().contains_key(key)
    }

    fn held(&self) -> MutexGuard<'_, HashMap<Pubkey, Held>> {
        self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn release(&self, request: &[(Pubkey, bool)]) {
        let mut held = self.held();
        for (key, writable) in request {
            if let Some(state) = held.get_mut(key) {
                if *writable {
                    state.writer = false;
                } else {
                    state.readers = state.readers.saturating_sub(1);
                }
                if !state.writer && state.readers == 0 {
                    held.remove(key);
                }
            }
        }
        drop(held);
        self.released.notify_all();
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.table.release(&self.request);
    }
}

/// One entry per address; writable wins when an address appears twice.
fn merge(metas: &[AccountMeta]) -> Vec<(Pubkey, bool)> {
    let mut merged = BTreeMap::new();
    for meta in metas {
        *merged.entry(meta.pubkey).or_insert(false) |= meta.is_writable;
    }
    merged.into_iter().collect()
}

fn available(held: &HashMap<Pubkey, Held>, request: &[(Pubkey, bool)]) -> bool {
    request.iter().all(|(key, writable)| match held.get(key) {
        None => true,
        Some(state) => !state.writer && !writable,
    })
}

fn take(held: &mut HashMap<Pubkey, Held>, request: &[(Pubkey, bool)]) {
    for (key, writable) in request {
        let state = held.entry(*key).or_default();
        if *writable {
            state.writer = true;
        } else {
            state.readers += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    #[test]
    fn test_writer_excludes_everyone() {
        let table = LockTable::new();
        let key = Pubkey::new_unique();

        let guard = table.acquire(&[AccountMeta::new(key, false)]);
        assert!(table.try_acquire(&[AccountMeta::new(key, false)]).is_none());
        assert!(table.try_acquire(&[AccountMeta::new_readonly(key, false)]).is_none());

        drop(guard);
        assert!(!table.is_locked(&key));
        assert!(table.try_acquire(&[AccountMeta::new(key, false)]).is_some());
    }

    #[test]
    fn test_readers_share() {
        let table = LockTable::new();
        let key = Pubkey::new_unique();

        let first = table.acquire(&[AccountMeta::new_readonly(key, false)]);
        let second = table.try_acquire(&[AccountMeta::new_readonly(key, false)]);
        assert!(second.is_some());
        assert!(table.try_acquire(&[AccountMeta::new(key, false)]).is_none());

        drop(first);
        assert!(table.is_locked(&key));
        drop(second);
        assert!(!table.is_locked(&key));
    }

    #[test]
    fn test_all_or_nothing() {
        let table = LockTable::new();
        let busy = Pubkey::new_unique();
        let free = Pubkey::new_unique();

        let _guard = table.acquire(&[AccountMeta::new(busy, false)]);
        let attempt = table.try_acquire(&[AccountMeta::new(free, false), AccountMeta::new(busy, false)]);
        assert!(attempt.is_none());
        assert!(!table.is_locked(&free));
    }

    #[test]
    fn test_duplicate_address_locks_once_as_writable() {
        let table = LockTable::new();
        let key = Pubkey::new_unique();

        let guard = table.acquire(&[AccountMeta::new_readonly(key, false), AccountMeta::new(key, false)]);
        assert!(table.try_acquire(&[AccountMeta::new_readonly(key, false)]).is_none());
        drop(guard);
        assert!(!table.is_locked(&key));
    }

    #[test]
    fn test_released_on_panic() {
        let table = LockTable::new();
        let key = Pubkey::new_unique();

        let result = thread::scope(|s| {
            s.spawn(|| {
                let _guard = table.acquire(&[AccountMeta::new(key, false)]);
                panic!("instruction aborted");
            })
            .join()
        });
        assert!(result.is_err());
        assert!(!table.is_locked(&key));
    }

    #[test]
    fn test_writers_on_same_address_never_overlap() {
        let table = LockTable::new();
        let key = Pubkey::new_unique();
        let inside = AtomicUsize::new(0);

        thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..50 {
                        let _guard = table.acquire(&[AccountMeta::new(key, false)]);
                        assert_eq!(inside.fetch_add(1, Ordering::SeqCst), 0);
                        inside.fetch_sub(1, Ordering::SeqCst);
                    }
                });
            }
        });
        assert!(!table.is_locked(&key));
    }
}
