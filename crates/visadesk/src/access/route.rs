use serde::Serialize;

use super::role::Role;

pub const LOGIN_PATH: &str = "/login";
pub const ROOT_PATH: &str = "/";

/// Views reachable inside the admin route group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum AdminView {
    Dashboard,
    Applications,
    ApplicationDetail(String),
    Clients,
    ClientDetail(String),
    AddClient,
    ClientDetails,
    Brokers,
    BrokerDetail(String),
    Finance,
    Settings,
    /// Anything else under the admin catch-all; renders a not-found view.
    Unmatched(String),
}

/// Views reachable inside the client route group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", content = "id", rename_all = "snake_case")]
pub enum ClientView {
    Dashboard,
    ApplicationDetail(String),
    Settings,
    Unmatched(String),
}

/// Who may reach a route before any view-specific checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    SignedIn,
    Roles(&'static [Role]),
}

/// The routing surface exposed to the embedding shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "group", rename_all = "snake_case")]
pub enum AppRoute {
    Login,
    Root,
    Admin { view: AdminView },
    Client { view: ClientView },
}

impl AppRoute {
    pub fn admin(view: AdminView) -> Self {
        Self::Admin { view }
    }

    pub fn client(view: ClientView) -> Self {
        Self::Client { view }
    }

    /// Parse a browser path. Static segments match case-insensitively, ids keep their
    /// casing, and query strings, fragments and trailing slashes are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let lowered: Vec<String> = segments.iter().map(|s| s.to_ascii_lowercase()).collect();
        let keys: Vec<&str> = lowered.iter().map(String::as_str).collect();

        match keys.as_slice() {
            [] => Self::Root,
            ["login"] => Self::Login,
            ["client", rest @ ..] => Self::client(match rest {
                [] => ClientView::Dashboard,
                ["applications", _] => ClientView::ApplicationDetail(segments[2].to_string()),
                ["settings"] => ClientView::Settings,
                _ => ClientView::Unmatched(canonical(&segments)),
            }),
            ["dashboard"] => Self::admin(AdminView::Dashboard),
            ["applications"] => Self::admin(AdminView::Applications),
            ["applicationdetails", _] => {
                Self::admin(AdminView::ApplicationDetail(segments[1].to_string()))
            }
            ["clients"] => Self::admin(AdminView::Clients),
            ["clients", _] => Self::admin(AdminView::ClientDetail(segments[1].to_string())),
            ["add-client"] => Self::admin(AdminView::AddClient),
            ["client-details"] => Self::admin(AdminView::ClientDetails),
            ["brokers"] => Self::admin(AdminView::Brokers),
            ["brokers", _] => Self::admin(AdminView::BrokerDetail(segments[1].to_string())),
            ["finance"] => Self::admin(AdminView::Finance),
            ["settings"] => Self::admin(AdminView::Settings),
            _ => Self::admin(AdminView::Unmatched(canonical(&segments))),
        }
    }

    pub fn access(&self) -> RouteAccess {
        match self {
            Self::Login => RouteAccess::Public,
            Self::Root => RouteAccess::SignedIn,
            Self::Admin { .. } => RouteAccess::Roles(&[Role::Admin]),
            Self::Client { .. } => RouteAccess::Roles(&[Role::Client]),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Self::Login => LOGIN_PATH.to_string(),
            Self::Root => ROOT_PATH.to_string(),
            Self::Admin { view } => match view {
                AdminView::Dashboard => "/dashboard".to_string(),
                AdminView::Applications => "/applications".to_string(),
                AdminView::ApplicationDetail(id) => format!("/ApplicationDetails/{id}"),
                AdminView::Clients => "/clients".to_string(),
                AdminView::ClientDetail(id) => format!("/clients/{id}"),
                AdminView::AddClient => "/add-client".to_string(),
                AdminView::ClientDetails => "/client-details".to_string(),
                AdminView::Brokers => "/brokers".to_string(),
                AdminView::BrokerDetail(id) => format!("/brokers/{id}"),
                AdminView::Finance => "/finance".to_string(),
                AdminView::Settings => "/Settings".to_string(),
                AdminView::Unmatched(path) => path.clone(),
            },
            Self::Client { view } => match view {
                ClientView::Dashboard => "/client".to_string(),
                ClientView::ApplicationDetail(id) => format!("/client/applications/{id}"),
                ClientView::Settings => "/client/settings".to_string(),
                ClientView::Unmatched(path) => path.clone(),
            },
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Admin {
                view: AdminView::Unmatched(_)
            } | Self::Client {
                view: ClientView::Unmatched(_)
            }
        )
    }
}

fn canonical(segments: &[&str]) -> String {
    format!("/{}", segments.join("/"))
}
