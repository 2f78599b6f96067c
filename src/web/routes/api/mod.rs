pub mod create_contact;
pub mod health;

pub use create_contact::create_contact;
pub use health::health;
