pub mod prelude;

pub mod operations;
pub mod projects;
pub mod wells;
