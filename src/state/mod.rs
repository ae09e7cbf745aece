pub mod app_settings;
pub mod app_state;
pub mod cities;
pub mod content;
pub mod copy;
pub mod discount;
pub mod form;
pub mod messages;
pub mod network;
pub mod schedule;
pub mod signup;
pub mod standings;
