use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use visadesk::access::Role;
use visadesk::config::{DataConfig, SessionConfig};
use visadesk::dashboard::DashboardError;
use visadesk::error::AppError;
use visadesk::portal::LocalPortal;
use visadesk::records::SeedData;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_portal(
    data: &DataConfig,
    session: &SessionConfig,
    seed: &SeedData,
) -> Result<Arc<LocalPortal>, AppError> {
    let portal = LocalPortal::local(data, seed).map_err(DashboardError::from)?;
    Ok(Arc::new(portal.with_session_ttl(session.ttl)))
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, String> {
    Role::parse(raw).ok_or_else(|| format!("unknown role '{raw}' (expected admin or client)"))
}

pub(crate) fn parse_amount(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ',' | '$' | ' ')).collect();
    cleaned
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as an amount ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use visadesk::config::DataSource;

    #[test]
    fn parse_role_is_case_insensitive() {
        assert_eq!(parse_role("Admin"), Ok(Role::Admin));
        assert!(parse_role("broker").is_err());
    }

    #[test]
    fn parse_amount_strips_currency_formatting() {
        assert_eq!(parse_amount("$12,450"), Ok(12450.0));
        assert!(parse_amount("twelve").is_err());
    }

    #[test]
    fn build_portal_seeds_accounts_and_records() {
        let data = DataConfig {
            source: DataSource::Store,
            seed_accounts: true,
        };
        let portal =
            build_portal(&data, &SessionConfig::default(), &SeedData::demo()).expect("portal");
        let (_, session) = portal
            .login("admin@visadesk.test", "admin-pass")
            .expect("admin login");
        assert_eq!(session.role, Some(Role::Admin));
        assert_eq!(portal.dashboard().brokers().len(), 5);
    }

    #[test]
    fn accounts_can_be_left_unseeded() {
        let data = DataConfig {
            source: DataSource::Seeded,
            seed_accounts: false,
        };
        let portal =
            build_portal(&data, &SessionConfig::default(), &SeedData::demo()).expect("portal");
        assert!(portal.login("admin@visadesk.test", "admin-pass").is_err());
    }

    #[test]
    fn build_portal_applies_session_ttl() {
        let data = DataConfig {
            source: DataSource::Seeded,
            seed_accounts: true,
        };
        let session = SessionConfig {
            ttl: std::time::Duration::from_secs(15 * 60),
        };
        let portal = build_portal(&data, &session, &SeedData::demo()).expect("portal");
        assert_eq!(portal.sessions().ttl(), session.ttl);
    }
}
