pub mod app;
pub mod auth;
pub mod bookings;
pub mod config;
pub mod error;
pub mod restaurants;
pub mod state;
pub mod tables;
pub mod timeslots;
