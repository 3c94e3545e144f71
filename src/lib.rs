//! Payroll engine for Korean work-time records.
//!
//! This crate decomposes daily clock-in/clock-out records into normal, night
//! and holiday hours, aggregates them over a calendar month against the
//! statutory working-hour obligation, and computes gross and net pay. It also
//! provides a stateless single-paycheck deduction calculator.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod store;
