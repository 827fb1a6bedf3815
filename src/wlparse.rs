//! Main module for wlparse library functionality
//!
//! Data flows through the submodules in this order:
//!
//! ```text
//! raw text ─▶ lexing::locator ─▶ lexing::rows ─▶ shapes (+ bucketing) ─▶ aggregation
//!                     (once per catalog target)                            │
//!                                                                          ▼
//!                                                                   ResultMapping
//! ```

pub mod aggregation;
pub mod bucketing;
pub mod catalog;
pub mod error;
pub mod formats;
pub mod lexing;
pub mod power;
pub mod processor;
pub mod shapes;
pub mod testing;
pub mod value;
