pub mod locations;
pub mod offices;
pub mod roles;
pub mod rooms;
pub mod state;
pub mod tags;
pub mod user_sessions;
pub mod users;
pub mod users_roles;

pub use state::{EntityState, LifecycleEntity};
