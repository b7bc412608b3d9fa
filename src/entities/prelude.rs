pub use super::operations::Entity as Operations;
pub use super::projects::Entity as Projects;
pub use super::wells::Entity as Wells;
