#[tokio::test]
async fn test_env_load_and_client() {
    std::env::set_var("STRIPE_PUBLISHABLE_KEY", "pk_test_env_123");
    let client = justcheckoutstripe::StripeClient::new();
    assert!(client.publishable_key.starts_with("pk_"));
}
