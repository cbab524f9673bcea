// Longevity Tracker Data
// This crate handles access to the MySQL data store

// Database connection management
pub mod database;

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
