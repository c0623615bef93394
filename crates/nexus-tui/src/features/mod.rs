pub mod home;
pub mod thread;
