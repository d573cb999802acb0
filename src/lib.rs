//! Tip Pool Engine
//!
//! This crate splits pooled tips between staff in proportion to the hours
//! they worked, cent-exact, and totals those splits over a pay period.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
