//! Common test utilities for the HTTP flow tests

#![allow(dead_code, unused_macros)]

use std::collections::HashSet;
use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::web;
use async_trait::async_trait;
use secrets_portal::config::{AppConfig, IdentityProvider};
use secrets_portal::core::AppContext;
use secrets_portal::domain::dto::oauth::OAuthCallbackQuery;
use secrets_portal::domain::models::oauth::ExternalIdentity;
use secrets_portal::errors::AppError;
use secrets_portal::repositories::sessions::InMemorySessionBackend;
use secrets_portal::repositories::users::InMemoryUserDirectory;
use secrets_portal::services::auth::IdentityBroker;

/// Broker that asserts the callback `code` as the external id
///
/// A callback carrying `error` fails the way a declining provider would.
#[derive(Default)]
pub struct StubBroker {
    disabled: HashSet<IdentityProvider>,
}

impl StubBroker {
    pub fn with_disabled(provider: IdentityProvider) -> Self {
        Self { disabled: HashSet::from([provider]) }
    }

    fn check_enabled(&self, provider: IdentityProvider) -> Result<(), AppError> {
        if self.disabled.contains(&provider) {
            return Err(AppError::BrokerFailure(format!("{} disabled", provider)));
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityBroker for StubBroker {
    fn authorization_url(&self, provider: IdentityProvider, state: &str) -> Result<String, AppError> {
        self.check_enabled(provider)?;
        Ok(format!("https://idp.test/{}/authorize?state={}", provider, state))
    }

    async fn complete(&self, provider: IdentityProvider, callback: &OAuthCallbackQuery) -> Result<ExternalIdentity, AppError> {
        self.check_enabled(provider)?;
        if let Some(error) = &callback.error {
            return Err(AppError::BrokerFailure(error.clone()));
        }
        let code = callback
            .code
            .clone()
            .ok_or_else(|| AppError::BrokerFailure("missing code".to_string()))?;
        Ok(ExternalIdentity::new(provider, code))
    }
}

/// In-memory stores plus the context built on top of them
pub struct TestHarness {
    pub directory: Arc<InMemoryUserDirectory>,
    pub sessions: Arc<InMemorySessionBackend>,
    pub context: web::Data<AppContext>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_broker(StubBroker::default())
    }

    pub fn with_broker(broker: StubBroker) -> Self {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let sessions = Arc::new(InMemorySessionBackend::new());
        let context = web::Data::new(AppContext::new(
            test_config(),
            directory.clone(),
            sessions.clone(),
            Arc::new(broker),
        ));

        Self { directory, sessions, context }
    }
}

pub fn test_config() -> AppConfig {
    let lookup = |key: &str| match key {
        "ENVIRONMENT" => Some("test".to_string()),
        "SESSION_SECRET" => Some("integration-test-secret-of-sufficient-length".to_string()),
        "SESSION_COOKIE_SECURE" => Some("false".to_string()),
        _ => None,
    };
    AppConfig::from_lookup(&lookup).expect("test config")
}

/// Builds the app with the session middleware and every route
macro_rules! test_app {
    ($harness:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($harness.context.clone())
                .wrap(secrets_portal::middlewares::SessionMiddleware)
                .configure(secrets_portal::routes::configure_all_routes),
        )
        .await
    };
}

/// Runs `/auth/{provider}` then its callback with `code`, returning the callback response
macro_rules! login {
    ($app:expr, $provider:expr, $code:expr) => {{
        let start = actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get()
                .uri(&format!("/auth/{}", $provider))
                .to_request(),
        )
        .await;
        let state_cookie = common::cookie(&start, "oauth_state").expect("state cookie");
        let state = common::state_param(&common::location(&start));

        actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::get()
                .uri(&format!("/auth/{}/secrets?code={}&state={}", $provider, $code, state))
                .cookie(state_cookie)
                .to_request(),
        )
        .await
    }};
}

pub fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

pub fn cookie<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name)
        .map(|c| c.into_owned())
}

pub fn state_param(location: &str) -> String {
    location
        .split_once("state=")
        .map(|(_, state)| state.to_string())
        .unwrap_or_default()
}
