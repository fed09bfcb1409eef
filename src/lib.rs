//! tuitter - A vim-style terminal social network client
//!
//! This crate provides the navigation engine (cursor, chords, modes,
//! screen switching), the panels built on it and a ratatui front end
//! talking to a pluggable [`backend::Backend`].

pub mod app;
pub mod backend;
pub mod core;
pub mod drafts;
pub mod error;
pub mod handler;
pub mod logging;
pub mod panel;
pub mod render;
pub mod screens;
