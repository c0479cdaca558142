#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
pub mod cell;
pub mod error;
pub mod file;
pub mod grid;
