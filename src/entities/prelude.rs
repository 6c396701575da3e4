pub use super::tierlists::Entity as Tierlists;
pub use super::users::Entity as Users;
