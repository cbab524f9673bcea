mod health_test;
mod profile_test;
