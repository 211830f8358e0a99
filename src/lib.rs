pub mod algorithms;
pub mod app;
pub mod clock;
pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod grid;
pub mod maze_loader;
pub mod render;
pub mod statistics;
pub mod terminal;
