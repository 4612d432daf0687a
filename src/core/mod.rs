//! Core business logic - framework-agnostic state, reducers and reporting.
//!
//! Nothing in here touches storage or the clock; callers pass the reference date
//! explicitly so every view is reproducible.

/// Category slice, default seed data and validation
pub mod category;
/// Currency and row formatting
pub mod format;
/// Six-month income/expense series
pub mod monthly;
/// Period filter, breakdown, totals and composite reports
pub mod report;
/// Day sections for the transaction list
pub mod sections;
/// Settings slice reducers
pub mod settings;
/// Store container, actions and listeners
pub mod store;
/// Transaction slice and draft validation
pub mod transaction;
