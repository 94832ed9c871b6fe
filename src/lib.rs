pub mod assign;
pub mod config;
pub mod consts;
pub mod effects;
pub mod error;
pub mod outcome;
pub mod records;
pub mod run;
pub mod store;
// cmd and reports belong to the binary (main.rs).
