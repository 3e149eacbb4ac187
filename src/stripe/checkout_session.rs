use serde::{Deserialize, Serialize};

/// Input for Stripe.js `redirectToCheckout`, spliced as JSON into the generated page.
///
/// Which required field is present decides the shape: a server-created checkout
/// session id, or a client reference id with the purchase described inline. The
/// enum is untagged so the wire form is exactly what Stripe.js accepts, and
/// `deny_unknown_fields` on the variants means an object carrying both
/// discriminants (or any stray key) deserializes as neither.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CheckoutRequest {
    Session(SessionCheckout),
    LineItems(LineItemCheckout),
}

/// Redirect to a checkout session already created server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionCheckout {
    pub session_id: String,
    pub success_url: String,
    pub cancel_url: String,
    // common
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_collection: Option<BillingAddressCollection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_collection: Option<ShippingAddressCollection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Redirect with the purchase described client-side under a reference id.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItemCheckout {
    pub client_reference_id: String,
    pub success_url: String,
    pub cancel_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<CheckoutItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_items: Option<Vec<CheckoutLineItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<CheckoutMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_type: Option<String>,
    // common
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_address_collection: Option<BillingAddressCollection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_collection: Option<ShippingAddressCollection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Plan-based item, quantity as a string. Legacy Checkout parameter form.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckoutItem {
    pub plan: String,
    pub quantity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckoutLineItem {
    pub price: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Payment,
    Subscription,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingAddressCollection {
    Required,
    Auto,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddressCollection {
    pub allowed_countries: Vec<String>,
}

/// Where a webview navigation landed relative to the request's settlement URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    Success,
    Canceled,
    Pending,
}

impl CheckoutOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutOutcome::Success => "success",
            CheckoutOutcome::Canceled => "canceled",
            CheckoutOutcome::Pending => "pending",
        }
    }
}

impl CheckoutRequest {
    pub fn success_url(&self) -> &str {
        match self {
            CheckoutRequest::Session(s) => &s.success_url,
            CheckoutRequest::LineItems(l) => &l.success_url,
        }
    }

    pub fn cancel_url(&self) -> &str {
        match self {
            CheckoutRequest::Session(s) => &s.cancel_url,
            CheckoutRequest::LineItems(l) => &l.cancel_url,
        }
    }

    /// The discriminant value: the checkout session id or the client reference id.
    pub fn reference_id(&self) -> &str {
        match self {
            CheckoutRequest::Session(s) => &s.session_id,
            CheckoutRequest::LineItems(l) => &l.client_reference_id,
        }
    }

    /// Classify a navigation target against the settlement URLs.
    ///
    /// Hosted checkout appends query parameters on the way back, so matching is by
    /// prefix. Success is checked first when both URLs share a prefix.
    pub fn navigation_outcome(&self, url: &str) -> CheckoutOutcome {
        if url.starts_with(self.success_url()) {
            CheckoutOutcome::Success
        } else if url.starts_with(self.cancel_url()) {
            CheckoutOutcome::Canceled
        } else {
            CheckoutOutcome::Pending
        }
    }
}
