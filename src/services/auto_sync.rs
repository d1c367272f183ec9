// src/services/auto_sync.rs
//
// Auto Sync - background refresh of the reservation cache
//
// CRITICAL RULES:
// - Runs in a background task on a fixed interval
// - Each tick asks the manager for a full refresh and discards the list
// - Refresh failures are logged, never propagated; the loop stays alive
// - Stop is honored at tick boundaries only

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::services::ReservationManager;

#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub interval: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(30),
        }
    }
}

/// Periodic cache refresh against the shared manager.
///
/// Starts running on construction. Contends for the manager's serialization
/// point like any other caller, so a tick never observes a torn cache and
/// interactive operations are simply delayed, never corrupted.
pub struct AutoSyncTask {
    running: Arc<AtomicBool>,
    task_handle: Mutex<Option<JoinHandle<()>>>,
}

impl AutoSyncTask {
    /// Spawn the refresh loop on the current tokio runtime.
    pub fn spawn(manager: Arc<ReservationManager>, config: SyncConfig) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let task = tokio::spawn(async move {
            loop {
                tokio::time::sleep(config.interval).await;

                // Stop is only honored here, at the iteration boundary; a
                // refresh already underway runs to completion.
                if !flag.load(Ordering::SeqCst) {
                    break;
                }

                // The returned list is discarded; the cache swap inside
                // view_all is the point of the tick.
                if let Err(e) = manager.view_all() {
                    log::warn!("Auto-sync refresh failed: {}", e);
                }
            }

            log::debug!("Auto-sync loop exited");
        });

        Self {
            running,
            task_handle: Mutex::new(Some(task)),
        }
    }

    /// Signal the loop to stop. Idempotent.
    ///
    /// Takes effect no later than the next tick boundary; after the signal
    /// is observed the task never touches the store again. The abort can
    /// only land on the sleep await, so an in-flight refresh is never
    /// preempted.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);

        let mut handle = self.task_handle.lock().unwrap();
        if let Some(task) = handle.take() {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for AutoSyncTask {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MockReservationStore;
    use std::sync::atomic::AtomicUsize;

    fn counting_manager() -> (Arc<ReservationManager>, Arc<AtomicUsize>) {
        let scans = Arc::new(AtomicUsize::new(0));
        let scans_clone = Arc::clone(&scans);

        let mut store = MockReservationStore::new();
        store.expect_list_all().returning(move || {
            scans_clone.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        });

        (Arc::new(ReservationManager::new(Arc::new(store))), scans)
    }

    #[tokio::test]
    async fn test_ticks_refresh_the_cache() {
        let (manager, scans) = counting_manager();

        let task = AutoSyncTask::spawn(
            Arc::clone(&manager),
            SyncConfig {
                interval: Duration::from_millis(10),
            },
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        task.stop();

        assert!(scans.load(Ordering::SeqCst) >= 2);
    }

    #[tokio::test]
    async fn test_stop_is_idempotent_and_final() {
        let (manager, scans) = counting_manager();

        let task = AutoSyncTask::spawn(
            Arc::clone(&manager),
            SyncConfig {
                interval: Duration::from_millis(10),
            },
        );

        tokio::time::sleep(Duration::from_millis(50)).await;
        task.stop();
        task.stop();
        task.stop();
        assert!(!task.is_running());

        // No further store access after the stop signal is observed
        let after_stop = scans.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(scans.load(Ordering::SeqCst), after_stop);
    }

    #[tokio::test]
    async fn test_stop_before_first_tick_means_no_store_access() {
        let (manager, scans) = counting_manager();

        let task = AutoSyncTask::spawn(
            Arc::clone(&manager),
            SyncConfig {
                interval: Duration::from_millis(200),
            },
        );

        task.stop();
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(scans.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_tick_does_not_stop_the_loop() {
        let calls = Arc::new(AtomicUsize::new(0));
        let calls_clone = Arc::clone(&calls);

        let mut store = MockReservationStore::new();
        store.expect_list_all().returning(move || {
            let n = calls_clone.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Err(crate::error::AppError::Other("store offline".to_string()))
            } else {
                Ok(Vec::new())
            }
        });
        let manager = Arc::new(ReservationManager::new(Arc::new(store)));

        let task = AutoSyncTask::spawn(
            Arc::clone(&manager),
            SyncConfig {
                interval: Duration::from_millis(10),
            },
        );

        tokio::time::sleep(Duration::from_millis(100)).await;
        task.stop();

        // The failing first tick was swallowed and later ticks still ran
        assert!(calls.load(Ordering::SeqCst) >= 2);
    }
}
