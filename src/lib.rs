//! SOW Engine - Statement of Work generation from process assessments
//!
//! This crate turns a customer's graded process assessment into a proposal,
//! keeps the proposal's snapshot honest against the live assessment, freezes
//! numbered export versions, and projects an approved proposal into an
//! external task tracker.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
