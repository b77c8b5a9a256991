//! cellsheet_engine - Formula language, dependency graph and recalculation ordering.

pub mod engine;
