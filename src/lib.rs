//! Commission payroll for plumbing technicians
//!
//! This crate prices completed plumbing jobs into technician commissions and
//! rolls them up into weekly per-plumber payroll summaries. Parts and outside
//! labor are marked up before being netted off revenue, and the commission is
//! the plumber's percentage of what remains.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod storage;
