pub mod calendar;
pub mod cursor;
pub mod effects;
pub mod feed;
pub mod flashlight;
pub mod notifications;
pub mod pairing;
pub mod state;
