use std::sync::Arc;

use auth::JwtHandler;
use board_service::config::TokenStrategyKind;
use board_service::domain::token::OpaqueTokenAuthenticator;
use board_service::domain::token::SignedTokenAuthenticator;
use board_service::domain::user::service::AuthService;
use board_service::inbound::http::router::create_router;
use board_service::outbound::store::InMemoryUserStore;
use board_service::user::ports::TokenAuthenticator;
use chrono::Duration;

const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application with the default (signed) token strategy
    pub async fn spawn() -> Self {
        Self::spawn_with(TokenStrategyKind::Signed).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with(strategy: TokenStrategyKind) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let user_store = Arc::new(InMemoryUserStore::new());

        let token_authenticator: Arc<dyn TokenAuthenticator> = match strategy {
            TokenStrategyKind::Signed => Arc::new(
                SignedTokenAuthenticator::new(user_store.clone(), TEST_SECRET, Duration::hours(2))
                    .expect("Failed to create signed token authenticator"),
            ),
            TokenStrategyKind::Opaque => {
                Arc::new(OpaqueTokenAuthenticator::new(user_store.clone()))
            }
        };

        let auth_service = Arc::new(AuthService::new(user_store, token_authenticator.clone()));

        let router = create_router(auth_service, token_authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        let jwt_handler = JwtHandler::new(TEST_SECRET).expect("Failed to create JWT handler");

        Self {
            address,
            api_client: reqwest::Client::builder()
                .build()
                .expect("Failed to create reqwest client"),
            jwt_handler,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }
}
