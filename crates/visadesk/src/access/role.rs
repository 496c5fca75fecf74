use serde::{Deserialize, Serialize};

/// Coarse access class deciding which route group a session may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    /// Case-insensitive parse of a stored role value.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Self::Admin),
            "client" => Some(Self::Client),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }

    /// Landing path for the role's route group.
    pub const fn home(self) -> &'static str {
        match self {
            Self::Admin => "/dashboard",
            Self::Client => "/client",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_stored_casing_variants() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse(" Client "), Some(Role::Client));
        assert_eq!(Role::parse("broker"), None);
        assert_eq!(Role::parse(""), None);
    }

    #[test]
    fn homes_point_at_role_dashboards() {
        assert_eq!(Role::Admin.home(), "/dashboard");
        assert_eq!(Role::Client.home(), "/client");
    }
}
