// src/core.rs
pub mod aggregate;
pub mod backlog;
pub mod classify;
pub mod collector;
pub mod extract;
pub mod ignore;
pub mod metadata;
pub mod service;
pub mod store;
pub mod tokenizer;
pub mod watch;
