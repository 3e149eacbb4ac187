//! Renewed KV store plus a checkout redirect HTML builder for handing Stripe
//! hosted checkout to webviews with rust + stripe.
//!
//! The builder turns a typed `redirectToCheckout` input into one self-contained
//! HTML document. Serve it, load it in a webview, and the page forwards the
//! browser to Stripe:
//!
//! ```
//! use justcheckoutstripe::{checkout_redirect_html, CheckoutRequest, SessionCheckout};
//!
//! let request = CheckoutRequest::Session(SessionCheckout {
//!     session_id: "cs_test_123".to_string(),
//!     success_url: "https://example.com/success".to_string(),
//!     cancel_url: "https://example.com/cancel".to_string(),
//!     ..Default::default()
//! });
//! let html = checkout_redirect_html("pk_test_123", Some(&request), None).unwrap();
//! assert!(html.contains("Stripe('pk_test_123')"));
//! ```

pub mod error;
pub mod stripe;

mod client;
mod kv_store;
mod logger;

pub use client::StripeClient;
pub use error::CheckoutHtmlError;
pub use kv_store::KVStore;
pub use logger::setup_logger;
pub use stripe::*;

// Shared with submodules through `use super::*;`.
use chrono::Local;
use colored::*;
use env_logger::{Builder, Env};
use log::info;
use std::env as stdenv;
use std::io::Write;
use std::path::Path;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
