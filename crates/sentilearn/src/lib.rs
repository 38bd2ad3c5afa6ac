//! Engines behind the SentiLearn education service: keyword sentiment scoring, learner progress
//! tracking, certificate eligibility, and the HTTP routers that expose them.

pub mod config;
pub mod error;
pub mod learning;
mod request;
pub mod sentiment;
pub mod telemetry;
