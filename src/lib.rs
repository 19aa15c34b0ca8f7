// src/lib.rs
// DOCUMENTATION: Library root shared by the server and the browse client
// PURPOSE: Content-generation proxy and photo-search aggregation gateway

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;

#[cfg(test)]
mod test_support;
