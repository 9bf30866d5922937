pub mod list;
pub mod managers;
pub mod open;
pub mod package;
pub mod search;
