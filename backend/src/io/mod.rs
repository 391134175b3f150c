//! # IO Module
//!
//! Interface layer exposing the domain to clients. The only interface is the
//! JSON REST API in [`rest`].

pub mod rest;
