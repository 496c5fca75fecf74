use serde::Deserialize;

use crate::progress::ApplicationStatus;
use crate::records::{ApplicationRecord, ClientRecord, PaymentRecord, PaymentState};

/// Query parameters of the applications list. Missing, blank and `All …` values
/// mean no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApplicationFilter {
    pub search: Option<String>,
    pub status: Option<String>,
    pub payment: Option<String>,
    pub process: Option<String>,
    pub country: Option<String>,
}

impl ApplicationFilter {
    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        if let Some(search) = constraint(&self.search) {
            let needle = search.to_lowercase();
            let hit = [&record.id.0, &record.client_id.0, &record.client_name]
                .into_iter()
                .any(|field| field.to_lowercase().contains(&needle));
            if !hit {
                return false;
            }
        }

        if let Some(status) = constraint(&self.status) {
            if ApplicationStatus::parse(status) != ApplicationStatus::parse(&record.status) {
                return false;
            }
        }

        [
            (&self.payment, &record.payment_status),
            (&self.process, &record.process_status),
            (&self.country, &record.country),
        ]
        .into_iter()
        .all(|(wanted, actual)| match constraint(wanted) {
            Some(wanted) => wanted.eq_ignore_ascii_case(actual.trim()),
            None => true,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientFilter {
    pub search: Option<String>,
}

impl ClientFilter {
    /// Case-insensitive match on id, name or email.
    pub fn matches(&self, record: &ClientRecord) -> bool {
        let Some(search) = constraint(&self.search) else {
            return true;
        };
        let needle = search.to_lowercase();
        [&record.id.0, &record.name, &record.email]
            .into_iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentFilter {
    #[default]
    All,
    Pending,
}

impl PaymentFilter {
    pub fn keeps(self, payment: &PaymentRecord) -> bool {
        match self {
            Self::All => true,
            Self::Pending => payment.status == PaymentState::Pending,
        }
    }
}

fn constraint(value: &Option<String>) -> Option<&str> {
    let value = value.as_deref()?.trim();
    let unconstrained = value.is_empty()
        || value
            .get(..4)
            .is_some_and(|head| head.eq_ignore_ascii_case("all "))
        || value.eq_ignore_ascii_case("all");
    (!unconstrained).then_some(value)
}
