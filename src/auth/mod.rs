pub mod otp;
pub mod password;
pub mod session;
pub mod token;
