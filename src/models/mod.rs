pub mod common;
pub mod operation;
pub mod project;
pub mod timeline;
pub mod upstream;
