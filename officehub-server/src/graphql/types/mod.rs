pub mod location;
pub mod office;
pub mod paging;
pub mod room;
pub mod tag;
pub mod user;

pub use location::Location;
pub use office::Office;
pub use paging::Paginated;
pub use room::Room;
pub use tag::Tag;
pub use user::User;
