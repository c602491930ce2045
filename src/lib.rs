pub mod entities;
pub mod profiles;
pub mod session;
