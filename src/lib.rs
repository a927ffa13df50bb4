//! Payroll Engine
//!
//! This crate computes monthly payroll from attendance and an
//! effective-dated compensation policy, and generates payroll records
//! idempotently: at most one record per employee and period, even when
//! generation requests race.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod generation;
pub mod models;
pub mod storage;
