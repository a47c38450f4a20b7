//! # Network Module
//!
//! Everything that talks to a node.
//!
//! ```text
//! client.rs   NetworkClient trait and its reqwest implementation
//! publish.rs  anchor → fee → build → sign → submit
//! ```
//!
//! The flow only depends on the trait, so tests and alternative transports
//! can swap the HTTP client out.

pub mod client;
pub mod publish;

pub use client::{ClientConfig, HttpNetworkClient, NetworkClient, NetworkError, SubmitStatus};
pub use publish::{prepare, publish, PublishRequest, Published};
