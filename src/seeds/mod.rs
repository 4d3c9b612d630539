//! Database seeding functionality
//!
//! This module provides functionality to seed the database with initial data.
//! It includes seeding for feature flags and other entities that need to be
//! populated when the application starts.

pub mod flags;

pub use flags::seed_feature_flags;
