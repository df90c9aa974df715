pub mod artsy;
pub mod favorite;
pub mod user;

pub use artsy::*;
pub use favorite::*;
pub use user::*;
