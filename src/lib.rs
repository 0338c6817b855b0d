pub mod app;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod harvard;
pub mod normalize;
pub mod output;
pub mod queries;
