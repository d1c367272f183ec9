// src/application/state.rs

use std::sync::Arc;

use crate::services::{AutoSyncTask, ReservationManager};

/// Application state shared with whatever front end drives the commands.
/// All fields are Arc-wrapped for thread-safe sharing; the front end's event
/// thread and the background sync task both go through the same manager.
pub struct AppState {
    pub manager: Arc<ReservationManager>,
    pub auto_sync: Arc<AutoSyncTask>,
}
