//! Shared utility modules used across tweetsieve components.

pub mod numeric;
