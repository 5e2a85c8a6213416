pub mod checkin;
pub mod classifier;
pub mod clock;
pub mod recorder;
pub mod roles;
pub mod token;
