//! Per-resource façades over [`ApiClient`].
//!
//! Each façade binds catalog entries to the generic request function and
//! carries the caller's bearer token. Nothing here adds behavior of its own.

use serde::Serialize;

use crate::catalog::{AuthAction, AuthRealm, DeviceKind, Endpoint, ListParams, Resource};
use crate::client::{ApiClient, ApiResponse, RequestBody};
use crate::error::ClientError;

/// Entry point bundling a client with an optional bearer token.
#[derive(Debug, Clone)]
pub struct Api {
    client: ApiClient,
    token: Option<String>,
}

impl Api {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            token: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn resource(&self, resource: Resource) -> ResourceService<'_> {
        ResourceService { api: self, resource }
    }

    pub fn users(&self) -> ResourceService<'_> {
        self.resource(Resource::Users)
    }

    pub fn users_implementation(&self) -> ResourceService<'_> {
        self.resource(Resource::UsersImplementation)
    }

    pub fn end_devices(&self) -> ResourceService<'_> {
        self.resource(Resource::EndDevice)
    }

    pub fn gateways(&self) -> ResourceService<'_> {
        self.resource(Resource::Gateway)
    }

    pub fn clients(&self) -> ResourceService<'_> {
        self.resource(Resource::Clients)
    }

    pub fn orders(&self) -> ResourceService<'_> {
        self.resource(Resource::Orders)
    }

    pub fn colors(&self) -> ColorsService<'_> {
        ColorsService {
            inner: self.resource(Resource::Colors),
        }
    }

    pub fn telemetry(&self, kind: DeviceKind) -> TelemetryService<'_> {
        TelemetryService { api: self, kind }
    }

    pub fn reports(&self) -> ReportsService<'_> {
        ReportsService { api: self }
    }

    pub fn auth(&self, realm: AuthRealm) -> AuthService<'_> {
        AuthService { api: self, realm }
    }

    async fn send(&self, endpoint: Endpoint<'_>, body: RequestBody) -> Result<ApiResponse, ClientError> {
        self.client.call(&endpoint, self.token.as_deref(), body).await
    }

    async fn send_anonymous(
        &self,
        endpoint: Endpoint<'_>,
        body: RequestBody,
    ) -> Result<ApiResponse, ClientError> {
        self.client.call(&endpoint, None, body).await
    }
}

/// List/get/create/update/delete for one resource kind.
#[derive(Debug, Clone, Copy)]
pub struct ResourceService<'a> {
    api: &'a Api,
    resource: Resource,
}

impl ResourceService<'_> {
    pub async fn list(&self, limit: Option<u32>) -> Result<ApiResponse, ClientError> {
        let params = ListParams {
            limit,
            category: None,
        };
        self.api
            .send(Endpoint::List(self.resource, params), RequestBody::Empty)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.api
            .send(Endpoint::Get(self.resource, id), RequestBody::Empty)
            .await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<ApiResponse, ClientError> {
        self.api
            .send(Endpoint::Create(self.resource), RequestBody::json(data)?)
            .await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.api
            .send(Endpoint::Update(self.resource, id), RequestBody::json(data)?)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.api
            .send(Endpoint::Delete(self.resource, id), RequestBody::Empty)
            .await
    }
}

/// Color master data: category-filtered listing plus CRUD.
#[derive(Debug, Clone, Copy)]
pub struct ColorsService<'a> {
    inner: ResourceService<'a>,
}

impl ColorsService<'_> {
    pub async fn list(&self, category: Option<&str>) -> Result<ApiResponse, ClientError> {
        let params = ListParams {
            limit: None,
            category,
        };
        self.inner
            .api
            .send(Endpoint::List(Resource::Colors, params), RequestBody::Empty)
            .await
    }

    pub async fn get(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.inner.get(id).await
    }

    pub async fn create<T: Serialize + ?Sized>(&self, data: &T) -> Result<ApiResponse, ClientError> {
        self.inner.create(data).await
    }

    pub async fn update<T: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.inner.update(id, data).await
    }

    pub async fn delete(&self, id: &str) -> Result<ApiResponse, ClientError> {
        self.inner.delete(id).await
    }

    pub async fn seed_defaults(&self) -> Result<ApiResponse, ClientError> {
        self.inner
            .api
            .send(Endpoint::SeedDefaultColors, RequestBody::Empty)
            .await
    }
}

/// Telemetry feed of an end device or gateway.
#[derive(Debug, Clone, Copy)]
pub struct TelemetryService<'a> {
    api: &'a Api,
    kind: DeviceKind,
}

impl TelemetryService<'_> {
    pub async fn list(&self, device_id: &str) -> Result<ApiResponse, ClientError> {
        self.api
            .send(Endpoint::ListTelemetry(self.kind, device_id), RequestBody::Empty)
            .await
    }

    pub async fn record<T: Serialize + ?Sized>(
        &self,
        device_id: &str,
        reading: &T,
    ) -> Result<ApiResponse, ClientError> {
        self.api
            .send(
                Endpoint::CreateTelemetry(self.kind, device_id),
                RequestBody::json(reading)?,
            )
            .await
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ReportsService<'a> {
    api: &'a Api,
}

impl ReportsService<'_> {
    pub async fn dashboard(&self) -> Result<ApiResponse, ClientError> {
        self.api.send(Endpoint::Dashboard, RequestBody::Empty).await
    }

    pub async fn export(&self, kind: &str) -> Result<ApiResponse, ClientError> {
        self.api.send(Endpoint::Export(kind), RequestBody::Empty).await
    }
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct PasswordReset<'a> {
    token: &'a str,
    new_password: &'a str,
}

/// Authentication calls. Everything except `me` and `logout` is anonymous.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
    api: &'a Api,
    realm: AuthRealm,
}

impl AuthService<'_> {
    pub async fn login(&self, username: &str, password: &str) -> Result<ApiResponse, ClientError> {
        let body = RequestBody::json(&Credentials { username, password })?;
        self.api
            .send_anonymous(Endpoint::Auth(self.realm, AuthAction::Login), body)
            .await
    }

    pub async fn logout(&self) -> Result<ApiResponse, ClientError> {
        self.api
            .send(Endpoint::Auth(self.realm, AuthAction::Logout), RequestBody::Empty)
            .await
    }

    /// Register an account; `data` carries username, email, password and profile fields.
    pub async fn register<T: Serialize + ?Sized>(&self, data: &T) -> Result<ApiResponse, ClientError> {
        self.api
            .send_anonymous(
                Endpoint::Auth(self.realm, AuthAction::Register),
                RequestBody::json(data)?,
            )
            .await
    }

    pub async fn me(&self) -> Result<ApiResponse, ClientError> {
        self.api
            .send(Endpoint::Auth(self.realm, AuthAction::Me), RequestBody::Empty)
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<ApiResponse, ClientError> {
        let body = RequestBody::json(&serde_json::json!({ "email": email }))?;
        self.api
            .send_anonymous(Endpoint::Auth(self.realm, AuthAction::ForgotPassword), body)
            .await
    }

    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<ApiResponse, ClientError> {
        let body = RequestBody::json(&PasswordReset {
            token: reset_token,
            new_password,
        })?;
        self.api
            .send_anonymous(Endpoint::Auth(self.realm, AuthAction::ResetPassword), body)
            .await
    }
}
