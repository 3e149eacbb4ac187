use serde::{Deserialize, Serialize};

use crate::error::CheckoutHtmlError;
use crate::stripe::checkout_session::CheckoutRequest;

/// Element id the embedded script clears once `redirectToCheckout` settles.
pub const LOADING_ELEMENT_ID: &str = "sc-loading";
/// Element id the embedded script writes Stripe's error message into.
pub const ERROR_ELEMENT_ID: &str = "sc-error-message";
/// Fixed Stripe.js origin. External contract, never parameterized.
pub const STRIPE_JS_URL: &str = "https://js.stripe.com/v3";

/// Default loading slot: a centered animated ring carrying the `sc-loading` id.
pub const DEFAULT_HTML_CONTENT_LOADING: &str = r#"
    <div id="sc-loading" style="
      border: 4px solid rgba(255, 255, 255, 0.3);
      border-top: 4px solid #000;
      border-radius: 50%;
      width: 40px;
      height: 40px;
      animation: spin 1s linear infinite;
    "></div>

  <style>
    @keyframes spin {
      0% { transform: rotate(0deg); }
      100% { transform: rotate(360deg); }
    }
  </style>
"#;

/// Default error slot: an empty container carrying the `sc-error-message` id.
pub const DEFAULT_HTML_CONTENT_ERROR: &str = r#"<div id="sc-error-message"></div>"#;

/// Overrides for the customizable fragments of the generated document. Every field
/// defaults independently when unset, so a partially filled struct keeps the
/// defaults for the rest.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RedirectHtmlOptions {
    /// Markup for the loading indicator. Shows until `redirectToCheckout` settles;
    /// the script clears the element with id='sc-loading'.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content_loading: Option<String>,
    /// Markup for the error display. Stripe's message is set on the element with
    /// id='sc-error-message'.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content_error: Option<String>,
    /// Extra markup appended inside the HEAD, verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_content_head: Option<String>,
}

/// JSON-encode a value for splicing into an inline `<script>` body.
///
/// serde_json leaves `<`, `>` and `&` alone, which would let a string field
/// containing `</script>` terminate the script block. Those characters only occur
/// inside JSON string literals, so replacing them with `\uXXXX` escapes keeps the
/// splice valid JSON that parses back to the same value. U+2028/U+2029 get the same
/// treatment: legal in JSON strings, line terminators in JavaScript.
pub fn script_safe_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}

/// Build the self-contained HTML document that loads Stripe.js and sends the
/// rendering browser to hosted checkout.
///
/// `input` is serialized via [`script_safe_json`] and spliced into the inline
/// script as the `redirectToCheckout` argument. The three fragment overrides in
/// `options` land in the document verbatim; supplying safe markup (carrying the
/// `sc-loading` / `sc-error-message` ids where applicable) is on the caller.
///
/// No I/O happens here. Loading Stripe.js, the redirect itself and its error
/// handling all run later, inside the returned page.
pub fn checkout_redirect_html(
    stripe_public_key: &str,
    input: Option<&CheckoutRequest>,
    options: Option<&RedirectHtmlOptions>,
) -> Result<String, CheckoutHtmlError> {
    if stripe_public_key.is_empty() {
        return Err(CheckoutHtmlError::MissingPublicKey);
    }
    let input = input.ok_or(CheckoutHtmlError::MissingCheckoutInput)?;

    // Get options or defaults, field by field.
    let fallback = RedirectHtmlOptions::default();
    let opts = options.unwrap_or(&fallback);
    let html_content_loading = opts
        .html_content_loading
        .as_deref()
        .unwrap_or(DEFAULT_HTML_CONTENT_LOADING);
    let html_content_error = opts
        .html_content_error
        .as_deref()
        .unwrap_or(DEFAULT_HTML_CONTENT_ERROR);
    let html_content_head = opts.html_content_head.as_deref().unwrap_or("");

    let input_json = script_safe_json(input)?;

    Ok(format!(
        r#"
  <html>
    <head>
      <meta charset="utf-8">
      <meta name="viewport" content="width=device-width, initial-scale=1">
      <title>Stripe Checkout</title>
      <meta name="author" content="{package}">
      {html_content_head}
    </head>
    <body>
      <!-- Display loading content -->
      <div style="display:flex; justify-content:center;align-items:center; height:100%">
      {html_content_loading}
      </div>
      <!-- Display error content -->
      {html_content_error}
      <!-- Load Stripe.js -->
      <script src="{stripe_js_url}"></script>
      <!-- Checkout redirect script -->
      <script>
        (function initStripeAndRedirectToCheckout () {{
          const stripe = Stripe('{stripe_public_key}');
          window.onload = () => {{
            stripe.redirectToCheckout({input_json})
            .then((result) => {{
                // Remove loading html
                const loadingElement = document.getElementById('{loading_id}');
                if (loadingElement) {{
                  loadingElement.outerHTML = '';
                }}
                // If redirectToCheckout fails due to a browser or network
                // error, display the localized error message to the customer.
                if (result.error) {{
                  const displayError = document.getElementById('{error_id}');
                  if (displayError) {{
                    displayError.textContent = result.error.message;
                  }}
                }}
              }}).catch((err) => {{
                console.error('{package}: redirectToCheckout failed', err);
              }});
          }};
        }})();
      </script>
    </body>
  </html>
  "#,
        package = env!("CARGO_PKG_NAME"),
        html_content_head = html_content_head,
        html_content_loading = html_content_loading,
        html_content_error = html_content_error,
        stripe_js_url = STRIPE_JS_URL,
        stripe_public_key = stripe_public_key,
        input_json = input_json,
        loading_id = LOADING_ELEMENT_ID,
        error_id = ERROR_ELEMENT_ID,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stripe::checkout_session::SessionCheckout;

    #[test]
    fn default_fragments_carry_the_slot_ids() {
        assert!(DEFAULT_HTML_CONTENT_LOADING.contains(LOADING_ELEMENT_ID));
        assert!(DEFAULT_HTML_CONTENT_ERROR.contains(ERROR_ELEMENT_ID));
    }

    #[test]
    fn script_safe_json_escapes_script_breakout() {
        let request = CheckoutRequest::Session(SessionCheckout {
            session_id: "cs_123".to_string(),
            success_url: "https://shop.test/done?a=1&b=</script>".to_string(),
            cancel_url: "https://shop.test/cancel".to_string(),
            ..Default::default()
        });
        let json = script_safe_json(&request).unwrap();
        assert!(!json.contains("</script>"));
        assert!(!json.contains('&'));
        assert!(json.contains("\\u003c/script\\u003e"));
        // Still plain JSON with the same value underneath.
        let back: CheckoutRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn script_safe_json_escapes_js_line_terminators() {
        let json = script_safe_json(&"a\u{2028}b\u{2029}c").unwrap();
        assert_eq!(json, "\"a\\u2028b\\u2029c\"");
    }
}
