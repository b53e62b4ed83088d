//! Interview Scheduler - scheduling core for interview sessions
//!
//! This crate manages scheduled sessions between an organizer and
//! participants, the live video room attached to a video interview, join
//! eligibility around the start time, and periodic reminder sweeps.
//!
//! Storage, notification delivery and time are ports; in-memory and tracing
//! adapters are provided.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
