// src/main.rs

use std::sync::Arc;

use innkeeper::application::commands::*;
use innkeeper::application::state::AppState;
use innkeeper::db::{create_connection_pool, get_database_stats, initialize_database};
use innkeeper::repositories::{ReservationStore, SqliteReservationStore};
use innkeeper::services::{AutoSyncTask, ReservationManager, SyncConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. INFRASTRUCTURE
    let pool = Arc::new(create_connection_pool()?);

    // Initialize schema (idempotent)
    {
        let conn = pool.get()?;
        initialize_database(&conn)?;
    }

    // 2. REPOSITORIES
    let store: Arc<dyn ReservationStore> = Arc::new(SqliteReservationStore::new(pool.clone()));

    // 3. SERVICES
    let manager = Arc::new(ReservationManager::new(store));

    // 4. BACKGROUND SYNC
    let auto_sync = Arc::new(AutoSyncTask::spawn(manager.clone(), SyncConfig::default()));

    // 5. APPLICATION STATE
    let state = AppState {
        manager,
        auto_sync,
    };

    {
        let conn = pool.get()?;
        let stats = get_database_stats(&conn)?;
        println!(
            "innkeeper ready: {} reservations, {} bytes on disk",
            stats.reservation_count, stats.size_bytes
        );
    }

    let reservations = list_reservations(&state)?;
    println!("{}", serde_json::to_string_pretty(&reservations)?);

    println!("Auto-sync running; press Ctrl-C to exit.");
    tokio::signal::ctrl_c().await?;

    // Stop background sync before exiting
    stop_auto_sync(&state);
    println!("Stopped.");

    Ok(())
}
