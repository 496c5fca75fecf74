use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::backend::IdentityId;

/// Identifier wrapper for visa applications (`APP-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for clients (`ROC-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub String);

/// Identifier wrapper for brokers (`ROB-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BrokerId(pub String);

/// A client's application as persisted by the document store.
///
/// `status` stays free-form so values written by other tools survive a round trip;
/// the progress model folds it into the closed status vocabulary on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub owner_identity: IdentityId,
    pub client_id: ClientId,
    pub client_name: String,
    pub document_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(default)]
    pub process_status: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub paid_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl Record for ApplicationRecord {
    const COLLECTION: &'static str = "applications";
    const ID_PREFIX: &'static str = "APP";

    fn id(&self) -> &str {
        &self.id.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRecord {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub contact: String,
    #[serde(default)]
    pub address: String,
    pub broker: String,
    #[serde(default)]
    pub status: String,
}

impl Record for ClientRecord {
    const COLLECTION: &'static str = "clients";
    const ID_PREFIX: &'static str = "ROC";

    fn id(&self) -> &str {
        &self.id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrokerStatus {
    Active,
    Hold,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerRecord {
    pub id: BrokerId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub performance: String,
    pub status: BrokerStatus,
}

impl Record for BrokerRecord {
    const COLLECTION: &'static str = "brokers";
    const ID_PREFIX: &'static str = "ROB";

    fn id(&self) -> &str {
        &self.id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Completed,
    Pending,
    Overdue,
}

/// Incoming client payment shown on the finance page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    pub client_name: String,
    pub reference: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub status: PaymentState,
}

impl Record for PaymentRecord {
    const COLLECTION: &'static str = "payments";
    const ID_PREFIX: &'static str = "PAY";

    fn id(&self) -> &str {
        &self.id
    }
}
