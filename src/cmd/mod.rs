pub mod add;
pub mod chart;
pub mod delete;
pub mod list;
pub mod summary;
