mod promotion;
mod restaurant;
mod user;

pub use promotion::Promotion;
pub use restaurant::Restaurant;
pub use user::{User, UserType};
