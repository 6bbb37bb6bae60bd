#![allow(dead_code)]

//! Shared fixtures for unit tests.
//!
//! The [`factories`] build small but realistic type graphs in a fresh
//! [`crate::metadata::typesystem::TypeRegistry`] each, so tests never share state.

pub mod factories;
