use thiserror::Error;

/// Errors raised while building the checkout redirect document.
///
/// Both invalid-argument conditions are fatal to the call and raised before any
/// output is produced. Failures at render time (Stripe.js unreachable, Stripe
/// rejecting the request, browser quirks) happen later inside the generated page
/// and never show up here.
#[derive(Error, Debug)]
pub enum CheckoutHtmlError {
    /// The publishable key was empty.
    #[error("Must provide Stripe public key.")]
    MissingPublicKey,

    /// No `redirectToCheckout` input was supplied.
    #[error("Must provide redirectToCheckout function input.")]
    MissingCheckoutInput,

    /// Serialization of the checkout input failed. Cannot occur for the shipped
    /// request types.
    #[error("Failed to serialize redirectToCheckout input: {0}")]
    InputSerialization(#[from] serde_json::Error),
}
