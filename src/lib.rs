#![warn(missing_docs)]
//! Perfect-maze generation and first-person grid raycasting.
//!
//! The pipeline runs in three stages: [`maze`] carves a spanning tree over a
//! thin-wall [`grid::CellGrid`], [`block`] converts the result into a
//! block-wise occupancy grid, and [`raycast`] casts a fan of rays against
//! that grid from a [`viewer::Viewer`] pose, one ray per output column.
//! Rendering, input polling, and the frame loop belong to the host.

pub mod block;
pub mod constants;
pub mod grid;
pub mod maze;
pub mod raycast;
pub mod viewer;
