pub mod aggregate;
pub mod fetch;
pub mod merge;
pub mod output;
pub mod states;
