pub mod login;
pub mod logout;
pub mod register;

pub use login::{Login, login};
pub use logout::logout;
pub use register::{Registration, register};
