//! Sign-in, registration and sign-out.

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;

use crate::api::{call, ActionResult, ApiClient, ApiRequest};
use crate::models::Session;

/// Payload of a successful login or registration.
#[derive(Deserialize)]
struct AuthPayload {
    user_id: String,
    email: String,
    token: String,
}

pub struct AuthActions<C> {
    client: Arc<C>,
    session: Option<Session>,
}

impl<C: ApiClient> AuthActions<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    pub async fn login(&mut self, email: &str, password: &SecretString) -> ActionResult<Session> {
        let request = ApiRequest::post(
            "/api/v1/auth/login",
            json!({ "email": email, "password": password.expose_secret() }),
        );
        self.authenticate(request).await
    }

    pub async fn register(
        &mut self,
        email: &str,
        password: &SecretString,
    ) -> ActionResult<Session> {
        let request = ApiRequest::post(
            "/api/v1/auth/register",
            json!({ "email": email, "password": password.expose_secret() }),
        );
        self.authenticate(request).await
    }

    /// Signs out. Local credentials are dropped even if the server call fails.
    pub async fn logout(&mut self) -> ActionResult<()> {
        let result = if self.client.has_token() {
            call(
                &*self.client,
                ApiRequest::post("/api/v1/auth/logout", json!({})).authenticated(),
            )
            .await
        } else {
            ActionResult {
                success: true,
                message: None,
                data: None,
            }
        };

        self.client.set_token(None);
        self.session = None;
        result
    }

    async fn authenticate(&mut self, request: ApiRequest) -> ActionResult<Session> {
        let result: ActionResult<AuthPayload> =
            call(&*self.client, request).await.require_data();

        let ActionResult {
            success,
            message,
            data,
        } = result;

        match data {
            Some(payload) if success => {
                self.client
                    .set_token(Some(SecretString::new(payload.token.into())));
                let session = Session {
                    user_id: payload.user_id,
                    email: payload.email,
                };
                self.session = Some(session.clone());

                #[cfg(feature = "tracing")]
                tracing::info!(user_id = %session.user_id, "signed in");

                ActionResult {
                    success,
                    message,
                    data: Some(session),
                }
            }
            _ => ActionResult {
                success: false,
                message,
                data: None,
            },
        }
    }
}
