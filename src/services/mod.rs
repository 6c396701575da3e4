pub mod user_service;
pub mod user_service_impl;
pub use user_service::{UserError, UserService};
pub use user_service_impl::SeaOrmUserService;

pub mod tierlist_service;
pub mod tierlist_service_impl;
pub use tierlist_service::{TierlistError, TierlistService};
pub use tierlist_service_impl::SeaOrmTierlistService;
