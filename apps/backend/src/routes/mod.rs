//! Route handlers, one module per mounted service

pub mod config;
pub mod days;
pub mod notice;
pub mod picture;
pub mod renmin;
pub mod video;
