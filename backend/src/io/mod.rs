//! # IO Module
//!
//! Adapter layer between HTTP clients and the domain logic: routing,
//! JSON (de)serialization, and error translation.

pub mod rest;

pub use rest::*;
