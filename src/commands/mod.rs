pub mod complete;
pub mod completions;
pub mod exec;
pub mod list;
pub mod status;
