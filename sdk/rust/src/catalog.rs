//! Backend endpoint catalog.
//!
//! # Responsibilities
//! - Name every backend operation the consoles call
//! - Render the backend-relative path (with query) for each operation
//! - Pair each operation with its HTTP method
//!
//! # Design Decisions
//! - The catalog is an exhaustive `match`; an unknown resource/operation pair
//!   does not type-check instead of failing at runtime
//! - Pure: no I/O, no allocation beyond the rendered path
//! - Omitted (or zero) list limits fall back to [`DEFAULT_LIST_LIMIT`]

use url::form_urlencoded;

use crate::client::HttpMethod;

/// Row limit substituted when a list call does not name one.
pub const DEFAULT_LIST_LIMIT: u32 = 10_000;

/// Resource kinds exposed through the generic CRUD endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    UsersImplementation,
    EndDevice,
    Gateway,
    Clients,
    Orders,
    Colors,
}

impl Resource {
    /// All resource kinds, in catalog order.
    pub const ALL: [Resource; 7] = [
        Resource::Users,
        Resource::UsersImplementation,
        Resource::EndDevice,
        Resource::Gateway,
        Resource::Clients,
        Resource::Orders,
        Resource::Colors,
    ];

    /// Path root of the resource, without slashes.
    pub fn root(self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::UsersImplementation => "users_implementation",
            Resource::EndDevice => "end_device",
            Resource::Gateway => "gateway",
            Resource::Clients => "clients",
            Resource::Orders => "orders",
            Resource::Colors => "master/colors",
        }
    }
}

/// Device kinds that carry a telemetry feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    EndDevice,
    Gateway,
}

impl DeviceKind {
    fn root(self) -> &'static str {
        match self {
            DeviceKind::EndDevice => Resource::EndDevice.root(),
            DeviceKind::Gateway => Resource::Gateway.root(),
        }
    }
}

/// Authentication realm. The sales console authenticates against `/auth`,
/// the implementation console against `/auth_implementation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AuthRealm {
    #[default]
    Standard,
    Implementation,
}

impl AuthRealm {
    fn root(self) -> &'static str {
        match self {
            AuthRealm::Standard => "auth",
            AuthRealm::Implementation => "auth_implementation",
        }
    }
}

/// Authentication operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthAction {
    Login,
    Logout,
    Register,
    Me,
    ForgotPassword,
    ResetPassword,
}

impl AuthAction {
    fn segment(self) -> &'static str {
        match self {
            AuthAction::Login => "login",
            AuthAction::Logout => "logout",
            AuthAction::Register => "register",
            AuthAction::Me => "me",
            AuthAction::ForgotPassword => "forgot-password",
            AuthAction::ResetPassword => "reset-password",
        }
    }
}

/// Parameters of a list operation.
///
/// Paged resources honour `limit`; the colors listing is filtered by
/// `category` and always restricted to active entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListParams<'a> {
    pub limit: Option<u32>,
    pub category: Option<&'a str>,
}

impl<'a> ListParams<'a> {
    pub fn limit(limit: u32) -> Self {
        Self {
            limit: Some(limit),
            category: None,
        }
    }

    pub fn category(category: &'a str) -> Self {
        Self {
            limit: None,
            category: Some(category),
        }
    }

    fn effective_limit(&self) -> u32 {
        self.limit.filter(|l| *l > 0).unwrap_or(DEFAULT_LIST_LIMIT)
    }
}

/// A single backend operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    Auth(AuthRealm, AuthAction),
    List(Resource, ListParams<'a>),
    Get(Resource, &'a str),
    Create(Resource),
    Update(Resource, &'a str),
    Delete(Resource, &'a str),
    SeedDefaultColors,
    ListTelemetry(DeviceKind, &'a str),
    CreateTelemetry(DeviceKind, &'a str),
    Dashboard,
    Export(&'a str),
}

impl Endpoint<'_> {
    /// HTTP method the backend expects for this operation.
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::Auth(_, AuthAction::Me)
            | Endpoint::List(..)
            | Endpoint::Get(..)
            | Endpoint::ListTelemetry(..)
            | Endpoint::Dashboard
            | Endpoint::Export(_) => HttpMethod::Get,
            Endpoint::Auth(..)
            | Endpoint::Create(_)
            | Endpoint::SeedDefaultColors
            | Endpoint::CreateTelemetry(..) => HttpMethod::Post,
            Endpoint::Update(..) => HttpMethod::Put,
            Endpoint::Delete(..) => HttpMethod::Delete,
        }
    }

    /// Backend-relative path, including any query string.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Auth(realm, action) => format!("/{}/{}", realm.root(), action.segment()),
            Endpoint::List(Resource::Colors, params) => match params.category {
                Some(category) => format!(
                    "/{}/?category={}&is_active=true",
                    Resource::Colors.root(),
                    encode_component(category)
                ),
                None => format!("/{}/?is_active=true", Resource::Colors.root()),
            },
            Endpoint::List(resource, params) => {
                format!("/{}/?limit={}", resource.root(), params.effective_limit())
            }
            Endpoint::Get(resource, id)
            | Endpoint::Update(resource, id)
            | Endpoint::Delete(resource, id) => format!("/{}/{}", resource.root(), id),
            Endpoint::Create(resource) => format!("/{}", resource.root()),
            Endpoint::SeedDefaultColors => "/master/seed-defaults".to_string(),
            Endpoint::ListTelemetry(kind, id) | Endpoint::CreateTelemetry(kind, id) => {
                format!("/{}/{}/telemetry", kind.root(), id)
            }
            Endpoint::Dashboard => "/reports/dashboard".to_string(),
            Endpoint::Export(kind) => format!("/reports/export/{}", encode_component(kind)),
        }
    }
}

fn encode_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_substitutes_default_limit() {
        let path = Endpoint::List(Resource::EndDevice, ListParams::default()).path();
        assert_eq!(path, "/end_device/?limit=10000");
    }

    #[test]
    fn list_zero_limit_falls_back_to_default() {
        let path = Endpoint::List(Resource::Orders, ListParams::limit(0)).path();
        assert_eq!(path, "/orders/?limit=10000");
    }

    #[test]
    fn list_uses_explicit_limit() {
        let path = Endpoint::List(Resource::Gateway, ListParams::limit(25)).path();
        assert_eq!(path, "/gateway/?limit=25");
    }

    #[test]
    fn item_paths() {
        assert_eq!(Endpoint::Get(Resource::Users, "7").path(), "/users/7");
        assert_eq!(
            Endpoint::Update(Resource::UsersImplementation, "3").path(),
            "/users_implementation/3"
        );
        assert_eq!(Endpoint::Delete(Resource::Clients, "9").path(), "/clients/9");
        assert_eq!(Endpoint::Create(Resource::Orders).path(), "/orders");
    }

    #[test]
    fn colors_listing_is_filtered_not_paged() {
        assert_eq!(
            Endpoint::List(Resource::Colors, ListParams::default()).path(),
            "/master/colors/?is_active=true"
        );
        assert_eq!(
            Endpoint::List(Resource::Colors, ListParams::category("fabric dye")).path(),
            "/master/colors/?category=fabric+dye&is_active=true"
        );
        assert_eq!(
            Endpoint::List(Resource::Colors, ListParams::limit(5)).path(),
            "/master/colors/?is_active=true"
        );
    }

    #[test]
    fn colors_item_and_seed_paths() {
        assert_eq!(Endpoint::Get(Resource::Colors, "4").path(), "/master/colors/4");
        assert_eq!(Endpoint::SeedDefaultColors.path(), "/master/seed-defaults");
        assert_eq!(Endpoint::SeedDefaultColors.method(), HttpMethod::Post);
    }

    #[test]
    fn auth_realms() {
        assert_eq!(
            Endpoint::Auth(AuthRealm::Standard, AuthAction::Login).path(),
            "/auth/login"
        );
        assert_eq!(
            Endpoint::Auth(AuthRealm::Implementation, AuthAction::ForgotPassword).path(),
            "/auth_implementation/forgot-password"
        );
        assert_eq!(
            Endpoint::Auth(AuthRealm::Standard, AuthAction::Me).method(),
            HttpMethod::Get
        );
        assert_eq!(
            Endpoint::Auth(AuthRealm::Standard, AuthAction::Logout).method(),
            HttpMethod::Post
        );
    }

    #[test]
    fn telemetry_and_reports() {
        assert_eq!(
            Endpoint::ListTelemetry(DeviceKind::Gateway, "G-2025-0001").path(),
            "/gateway/G-2025-0001/telemetry"
        );
        assert_eq!(
            Endpoint::CreateTelemetry(DeviceKind::EndDevice, "12").method(),
            HttpMethod::Post
        );
        assert_eq!(Endpoint::Dashboard.path(), "/reports/dashboard");
        assert_eq!(Endpoint::Export("orders").path(), "/reports/export/orders");
    }

    #[test]
    fn crud_methods() {
        for resource in Resource::ALL {
            assert_eq!(Endpoint::List(resource, ListParams::default()).method(), HttpMethod::Get);
            assert_eq!(Endpoint::Create(resource).method(), HttpMethod::Post);
            assert_eq!(Endpoint::Update(resource, "1").method(), HttpMethod::Put);
            assert_eq!(Endpoint::Delete(resource, "1").method(), HttpMethod::Delete);
        }
    }
}
