// src/lib.rs
// Innkeeper - Local-first hotel reservation manager
//
// Architecture:
// - Domain-centric: business rules live in the domain layer
// - Cache-through: the manager mediates every read/write against the store
// - Explicit: two named locks carry the whole concurrency contract
// - Application Layer: the boundary a front end calls into

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{validate_reservation, PriorityTier, RateClass, Reservation};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{ReservationStore, SqliteReservationStore};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{AutoSyncTask, ReservationCache, ReservationManager, SyncConfig};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;
