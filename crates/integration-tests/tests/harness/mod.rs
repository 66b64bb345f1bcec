#![allow(dead_code)]

pub mod config;
pub mod mock_gemini;
pub mod mock_site;
pub mod server;
