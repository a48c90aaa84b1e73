//! dev-tools.ai classification service client for SmartLocate.

mod api;
mod client;
mod parser;

pub use client::DevToolsClient;
