pub mod cli;
pub mod index;
pub mod models;
pub mod search;
