// use std::env;
use crate::error::CheckoutHtmlError;
use crate::stripe::{checkout_redirect_html, CheckoutRequest, RedirectHtmlOptions};
use dotenvy::dotenv;
use std::{
    // collections::{HashMap, HashSet},
    env as stdenv,
};

/// Carries the publishable key the generated pages hand to `Stripe(...)`.
/// Publishable keys are meant for the browser; no secret key belongs here.
#[derive(Clone)]
pub struct StripeClient {
    pub publishable_key: String,
}

impl StripeClient {
    pub fn new() -> Self {
        dotenv().ok();
        let publishable_key = stdenv::var("STRIPE_PUBLISHABLE_KEY")
            .expect("STRIPE_PUBLISHABLE_KEY not set in .env");
        Self { publishable_key }
    }

    pub fn from_key(publishable_key: impl Into<String>) -> Self {
        Self {
            publishable_key: publishable_key.into(),
        }
    }

    /// Render the redirect page for `input` using this client's key.
    pub fn checkout_redirect_html(
        &self,
        input: &CheckoutRequest,
        options: Option<&RedirectHtmlOptions>,
    ) -> Result<String, CheckoutHtmlError> {
        checkout_redirect_html(&self.publishable_key, Some(input), options)
    }
}
