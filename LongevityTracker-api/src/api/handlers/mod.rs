pub mod health;
pub mod profile;

// Tests module
#[cfg(test)]
mod tests;

// Re-export handlers for easier imports
pub use health::health_check;
pub use profile::get_user_profile;
