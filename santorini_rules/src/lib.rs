pub mod adjacency;
pub mod agent;
pub mod board;
pub mod config;
pub mod coord;
pub mod error;
pub mod game;
pub mod heuristic;
pub mod history;
pub mod moves;
pub mod notation;
pub mod player;
pub mod pretty_board;
pub mod space;
pub mod turn;
pub mod worker;
