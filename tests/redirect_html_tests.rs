use justcheckoutstripe::{
    checkout_redirect_html, CheckoutHtmlError, CheckoutItem, CheckoutLineItem, CheckoutMode,
    CheckoutRequest, LineItemCheckout, RedirectHtmlOptions, SessionCheckout, StripeClient,
    DEFAULT_HTML_CONTENT_LOADING, STRIPE_JS_URL,
};
use pretty_assertions::assert_eq;
use serde_json::Value;

fn session_request() -> CheckoutRequest {
    CheckoutRequest::Session(SessionCheckout {
        session_id: "cs_abc".to_string(),
        success_url: "https://shop.test/done".to_string(),
        cancel_url: "https://shop.test/cancel".to_string(),
        ..Default::default()
    })
}

fn line_item_request() -> CheckoutRequest {
    CheckoutRequest::LineItems(LineItemCheckout {
        client_reference_id: "ref_1".to_string(),
        success_url: "https://shop.test/done".to_string(),
        cancel_url: "https://shop.test/cancel".to_string(),
        items: Some(vec![CheckoutItem {
            plan: "plan_G".to_string(),
            quantity: "2".to_string(),
        }]),
        line_items: Some(vec![CheckoutLineItem {
            price: 2000,
            quantity: 3,
        }]),
        mode: Some(CheckoutMode::Payment),
        ..Default::default()
    })
}

/// The JSON spliced as the `redirectToCheckout` argument. The argument is
/// followed directly by a newline, and serde_json never emits a raw newline,
/// so the first `)\n` closes the call.
fn spliced_json(html: &str) -> String {
    let marker = "redirectToCheckout(";
    let start = html.find(marker).expect("redirect call missing") + marker.len();
    let end = start + html[start..].find(")\n").expect("unterminated redirect call");
    html[start..end].to_string()
}

#[test]
fn session_request_produces_the_full_document() {
    let html = checkout_redirect_html("pk_test_123", Some(&session_request()), None).unwrap();

    assert!(html.contains("Stripe('pk_test_123')"));
    assert!(html.contains(r#""sessionId":"cs_abc""#));
    assert!(html.contains(r#"id="sc-loading""#));
    assert!(html.contains(r#"id="sc-error-message""#));
    assert!(html.contains(STRIPE_JS_URL));
    assert!(html.contains("<title>Stripe Checkout</title>"));
}

#[test]
fn empty_public_key_is_rejected() {
    let err = checkout_redirect_html("", Some(&session_request()), None).unwrap_err();
    assert!(matches!(err, CheckoutHtmlError::MissingPublicKey));
    assert_eq!(err.to_string(), "Must provide Stripe public key.");
}

#[test]
fn missing_input_is_rejected() {
    let err = checkout_redirect_html("pk_test_123", None, None).unwrap_err();
    assert!(matches!(err, CheckoutHtmlError::MissingCheckoutInput));
    assert_eq!(
        err.to_string(),
        "Must provide redirectToCheckout function input."
    );
}

#[test]
fn slot_elements_appear_exactly_once() {
    let html = checkout_redirect_html("pk_test_123", Some(&session_request()), None).unwrap();
    assert_eq!(html.matches(r#"id="sc-loading""#).count(), 1);
    assert_eq!(html.matches(r#"id="sc-error-message""#).count(), 1);
}

#[test]
fn omitted_options_fall_back_to_the_default_fragments() {
    let html = checkout_redirect_html("pk_test_123", Some(&session_request()), None).unwrap();
    assert!(html.contains(DEFAULT_HTML_CONTENT_LOADING));
    assert!(html.contains(r#"<div id="sc-error-message"></div>"#));
}

#[test]
fn custom_loading_fragment_replaces_the_default() {
    let options = RedirectHtmlOptions {
        html_content_loading: Some(r#"<p id="sc-loading">hold on</p>"#.to_string()),
        ..Default::default()
    };
    let html =
        checkout_redirect_html("pk_test_123", Some(&session_request()), Some(&options)).unwrap();

    assert!(html.contains(r#"<p id="sc-loading">hold on</p>"#));
    assert!(!html.contains(DEFAULT_HTML_CONTENT_LOADING));
    assert_eq!(html.matches(r#"id="sc-loading""#).count(), 1);
}

#[test]
fn options_merge_field_by_field() {
    let options = RedirectHtmlOptions {
        html_content_error: Some(r#"<span id="sc-error-message"></span>"#.to_string()),
        ..Default::default()
    };
    let html =
        checkout_redirect_html("pk_test_123", Some(&session_request()), Some(&options)).unwrap();

    assert!(html.contains(r#"<span id="sc-error-message"></span>"#));
    // The untouched fields keep their defaults.
    assert!(html.contains(DEFAULT_HTML_CONTENT_LOADING));
    assert!(!html.contains(r#"<div id="sc-error-message"></div>"#));
}

#[test]
fn head_fragment_lands_inside_the_head() {
    let options = RedirectHtmlOptions {
        html_content_head: Some(r#"<link rel="x">"#.to_string()),
        ..Default::default()
    };
    let html =
        checkout_redirect_html("pk_test_123", Some(&session_request()), Some(&options)).unwrap();

    let head_open = html.find("<head>").unwrap();
    let head_close = html.find("</head>").unwrap();
    let link = html.find(r#"<link rel="x">"#).unwrap();
    assert!(head_open < link);
    assert!(link < head_close);
}

#[test]
fn spliced_argument_parses_back_to_the_input() {
    let request = session_request();
    let html = checkout_redirect_html("pk_test_123", Some(&request), None).unwrap();

    let parsed: Value = serde_json::from_str(&spliced_json(&html)).unwrap();
    assert_eq!(parsed, serde_json::to_value(&request).unwrap());
}

#[test]
fn line_item_request_serializes_with_wire_names() {
    let html = checkout_redirect_html("pk_test_123", Some(&line_item_request()), None).unwrap();

    assert!(html.contains(r#""clientReferenceId":"ref_1""#));
    assert!(html.contains(r#""items":[{"plan":"plan_G","quantity":"2"}]"#));
    assert!(html.contains(r#""lineItems":[{"price":2000,"quantity":3}]"#));
    assert!(html.contains(r#""mode":"payment""#));

    let parsed: Value = serde_json::from_str(&spliced_json(&html)).unwrap();
    assert_eq!(parsed, serde_json::to_value(line_item_request()).unwrap());
}

#[test]
fn hostile_url_cannot_break_out_of_the_script_block() {
    let request = CheckoutRequest::Session(SessionCheckout {
        session_id: "cs_abc".to_string(),
        success_url: "https://shop.test/done</script><script>alert(1)</script>".to_string(),
        cancel_url: "https://shop.test/cancel".to_string(),
        ..Default::default()
    });
    let html = checkout_redirect_html("pk_test_123", Some(&request), None).unwrap();

    // Only the document's own two script blocks close; the payload stays inert.
    assert_eq!(html.matches("</script>").count(), 2);
    assert!(!html.contains("<script>alert(1)</script>"));

    let parsed: Value = serde_json::from_str(&spliced_json(&html)).unwrap();
    assert_eq!(parsed, serde_json::to_value(&request).unwrap());
}

#[test]
fn client_key_flows_into_the_document() {
    let client = StripeClient::from_key("pk_test_x");
    let html = client
        .checkout_redirect_html(&session_request(), None)
        .unwrap();
    assert!(html.contains("Stripe('pk_test_x')"));
}
