//! API Routes
//!
//! Route handlers organized by functionality.

pub mod calculator;
pub mod health;
pub mod history;
pub mod sales;
