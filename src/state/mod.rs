/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The recipe query cache and mutation reconciliation (cache.rs)
/// - Per-kind mutation lifecycles (mutation.rs)
/// - Dashboard controller state: filter, modal, edit target (dashboard.rs)

pub mod cache;
pub mod dashboard;
pub mod data;
pub mod mutation;
