pub mod analyzers;
pub mod config;
pub mod dataset;
pub mod fetch;
pub mod index;
pub mod output;
pub mod parser;
pub mod stations;
pub mod time;
pub mod trips;
