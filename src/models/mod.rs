pub mod tierlist;
pub mod user;

pub use tierlist::{SavedTierlist, Tier, TierEntries, Tierlist};
pub use user::{LoginUser, NewUser, SessionInfo, UpdateUser, UserProfile};
