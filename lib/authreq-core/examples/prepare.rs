use authreq_core::{Account, AuthenticatedRequest, PrepareRequest, authorization_header_value};
use http::Method;
use url::Url;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().pretty().init();

    // Token endpoint response, as returned at the end of an OAuth2 flow
    let response = serde_json::json!({
        "access_token": "2YotnFZFEjr1zCsicMWpAA",
        "token_type": "bearer",
        "expires_in": 3600,
    });
    let account = Account::try_from(response)?;

    // Token in the URL, with the parameter name the provider expects
    let request = AuthenticatedRequest::new(
        Method::GET,
        Url::parse("https://api.example.com/me/feed")?,
        [("limit", "25")],
        account.clone(),
    )
    .with_access_token_parameter_name("oauth_token");
    let built = request.build_request()?;
    // The query carries the token, keep it out of the logs
    tracing::info!(
        method = %built.method(),
        host = built.url().host_str(),
        path = built.url().path(),
        "authenticated request ready"
    );

    // Token in the Authorization header
    let (name, value) = authorization_header_value(Some(&account))?;
    tracing::info!(header = %name, sensitive = value.is_sensitive(), "bearer header ready");

    Ok(())
}
