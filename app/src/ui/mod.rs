pub mod home;
pub mod reviewer;
