pub mod config;
pub mod rows;
pub mod run;
