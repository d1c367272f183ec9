// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod auto_sync;
pub mod reservation_manager;


// Re-export all services and their types
pub use auto_sync::{AutoSyncTask, SyncConfig};

pub use reservation_manager::{ReservationCache, ReservationManager};
