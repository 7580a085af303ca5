//! ClusterView API Client
//!
//! A declarative REST client for the ClusterView management API. Every
//! operation the console can issue is declared once in a static endpoint
//! registry; a small formatting layer turns an operation plus a per-call
//! parameter bag into a ready-to-send request.
//!
//! # Features
//!
//! - **Endpoint Registry**: typed operations mapped to path templates, verbs,
//!   and body strategies
//! - **URL Templates**: total `{name}` placeholder substitution from a
//!   parameter bag
//! - **Mock Mode**: reroute every operation to local fixture paths, fetched
//!   read-only
//! - **Handler Hooks**: before-send, success, error, and complete callbacks
//!   per request, with a shared fallback error handler
//! - **Explicit Configuration**: mode, base URL, API prefix, and timeouts as
//!   a plain record, loadable from YAML
//!
//! # Example Configuration
//!
//! ```yaml
//! base_url: https://cluster.example.com:8443
//! api_prefix: /api/v1
//! mode: live
//! timeout_ms: 180000
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod registry;
pub mod request;
pub mod template;

pub use client::{default_error_handler, ApiClient, NoopHandler, ResponseHandler};
pub use config::{ClientConfig, RequestMode};
pub use error::{ClientError, Result};
pub use registry::{BodyBuilder, EndpointDescriptor, Method, Operation, ResponseType};
pub use request::{format, format_descriptor, RequestDescriptor, RequestOverrides};
pub use template::{resolve, ParamBag};
