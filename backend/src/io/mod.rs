//! # IO Module
//!
//! Adapter between a presentation layer and the roster domain. It translates HTTP
//! requests into [`PlayerService`](crate::domain::PlayerService) calls and domain
//! errors into status codes; it holds no roster rules of its own.

pub mod rest;

pub use rest::*;
