pub mod prelude;

pub mod tierlists;
pub mod users;
