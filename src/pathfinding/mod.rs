//! Shortest-path computation over the road network.

mod dijkstra;

pub use dijkstra::{shortest_path_between, shortest_paths};
