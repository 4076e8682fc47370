pub mod md5;

pub use md5::PasswordHasher;
