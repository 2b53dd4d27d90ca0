//! # pd-routing
//!
//! Single-vehicle pickup-and-delivery route planning over a directed city
//! road graph: shortest-path reduction, an anytime branch-and-bound tour
//! search, and reversible interactive tour editing.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (RoadGraph, Request, PointKind, Tour)
//! - [`pathfinding`] — Single-source shortest paths with early termination
//! - [`reachability`] — Round-trip reachability screening of pickup/delivery points
//! - [`reduction`] — Road graph to point-of-interest cost graph reduction
//! - [`solver`] — Anytime branch-and-bound search with pluggable strategies
//! - [`planner`] — High-level facade: validate, reduce, search, assemble
//! - [`editing`] — Reversible tour-editing commands with undo/redo history
//! - [`error`] — Error types shared across the layers

pub mod editing;
pub mod error;
pub mod models;
pub mod pathfinding;
pub mod planner;
pub mod reachability;
pub mod reduction;
pub mod solver;
