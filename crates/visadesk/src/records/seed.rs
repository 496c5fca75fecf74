//! Demo data set mirroring the portal's sample brokers, clients, applications and
//! payments, plus one admin and one client account.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use super::domain::{
    ApplicationId, ApplicationRecord, BrokerId, BrokerRecord, BrokerStatus, ClientId,
    ClientRecord, PaymentRecord, PaymentState,
};
use crate::access::Role;
use crate::backend::IdentityId;

/// Account created at startup when seeding is enabled.
#[derive(Debug, Clone)]
pub struct SeedAccount {
    pub identity: IdentityId,
    pub email: &'static str,
    pub password: &'static str,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct SeedData {
    pub accounts: Vec<SeedAccount>,
    pub brokers: Vec<BrokerRecord>,
    pub clients: Vec<ClientRecord>,
    pub applications: Vec<ApplicationRecord>,
    pub payments: Vec<PaymentRecord>,
}

pub const DEMO_ADMIN_IDENTITY: &str = "seed-admin";
pub const DEMO_CLIENT_IDENTITY: &str = "seed-client-john";

impl SeedData {
    pub fn demo() -> Self {
        Self {
            accounts: accounts(),
            brokers: brokers(),
            clients: clients(),
            applications: applications(),
            payments: payments(),
        }
    }
}

fn accounts() -> Vec<SeedAccount> {
    vec![
        SeedAccount {
            identity: IdentityId(DEMO_ADMIN_IDENTITY.to_string()),
            email: "admin@visadesk.test",
            password: "admin-pass",
            role: Role::Admin,
        },
        SeedAccount {
            identity: IdentityId(DEMO_CLIENT_IDENTITY.to_string()),
            email: "john@example.com",
            password: "client-pass",
            role: Role::Client,
        },
    ]
}

fn brokers() -> Vec<BrokerRecord> {
    [
        ("ROB-001", "Agent A", "Sri Lanka", "STAGE 2", BrokerStatus::Active),
        ("ROB-002", "Agent K", "USA", "STAGE 1", BrokerStatus::Hold),
        ("ROB-003", "Agent Z", "Australia", "STAGE 2", BrokerStatus::Active),
        ("ROB-004", "Agent M", "Germany", "STAGE 3", BrokerStatus::Hold),
        ("ROB-005", "Agent X", "Japan", "STAGE 2", BrokerStatus::Active),
    ]
    .into_iter()
    .map(|(id, name, location, performance, status)| BrokerRecord {
        id: BrokerId(id.to_string()),
        name: name.to_string(),
        email: format!(
            "{}@example.com",
            name.trim_start_matches("Agent ").to_ascii_lowercase()
        ),
        location: location.to_string(),
        performance: performance.to_string(),
        status,
    })
    .collect()
}

fn client(id: &str, name: &str, email: &str, broker: &str, status: &str) -> ClientRecord {
    ClientRecord {
        id: ClientId(id.to_string()),
        name: name.to_string(),
        email: email.to_string(),
        contact: "+94 77 000 0000".to_string(),
        address: "Colombo, Sri Lanka".to_string(),
        broker: broker.to_string(),
        status: status.to_string(),
    }
}

fn clients() -> Vec<ClientRecord> {
    vec![
        client("ROC-001", "John Doe", "john@example.com", "Agent K", "Doc Processing"),
        client("ROC-002", "Jane Silva", "jane@example.com", "Agent K", "Registration"),
        client("ROC-003", "Kamal Perera", "kamal@test.lk", "Agent K", "Completed"),
        client("ROC-004", "Sarah Smith", "sarah@example.com", "Agent A", "Return Docs"),
        client("ROC-005", "Michael Brown", "michael@example.com", "Agent A", "Completed"),
        client("ROC-006", "Emily Davis", "emily@example.com", "Agent Z", "Doc Processing"),
    ]
}

struct ApplicationSeed {
    id: &'static str,
    owner: &'static str,
    client_id: &'static str,
    client_name: &'static str,
    document_name: &'static str,
    status: &'static str,
    payment_status: &'static str,
    process_status: &'static str,
    country: &'static str,
    total_amount: Option<f64>,
    paid_amount: Option<f64>,
    created_on: (i32, u32, u32),
}

fn applications() -> Vec<ApplicationRecord> {
    [
        ApplicationSeed {
            id: "APP-001",
            owner: "seed-client-kamal",
            client_id: "ROC-003",
            client_name: "Kamal Perera",
            document_name: "Work Visa Application.pdf",
            status: "Approved",
            payment_status: "Completed",
            process_status: "Completed",
            country: "UAE",
            total_amount: Some(2500.0),
            paid_amount: Some(2500.0),
            created_on: (2025, 11, 3),
        },
        ApplicationSeed {
            id: "APP-002",
            owner: DEMO_CLIENT_IDENTITY,
            client_id: "ROC-001",
            client_name: "John Doe",
            document_name: "Residency Permit.pdf",
            status: "Processing",
            payment_status: "Partial",
            process_status: "In Progress",
            country: "Qatar",
            total_amount: Some(3200.0),
            paid_amount: Some(1800.0),
            created_on: (2025, 11, 18),
        },
        ApplicationSeed {
            id: "APP-003",
            owner: "seed-client-sarah",
            client_id: "ROC-004",
            client_name: "Sarah Smith",
            document_name: "Medical Report.pdf",
            status: "Submitted",
            payment_status: "Pending",
            process_status: "Not Started",
            country: "Saudi Arabia",
            total_amount: Some(1800.0),
            paid_amount: Some(0.0),
            created_on: (2025, 11, 25),
        },
        ApplicationSeed {
            id: "APP-004",
            owner: "seed-client-michael",
            client_id: "ROC-005",
            client_name: "Michael Brown",
            document_name: "Police Clearance.pdf",
            status: "Rejected",
            payment_status: "Not Set",
            process_status: "Cancelled",
            country: "Kuwait",
            total_amount: None,
            paid_amount: None,
            created_on: (2025, 11, 28),
        },
        ApplicationSeed {
            id: "APP-005",
            owner: "seed-client-emily",
            client_id: "ROC-006",
            client_name: "Emily Davis",
            document_name: "Employment Contract.pdf",
            status: "Draft",
            payment_status: "Pending",
            process_status: "Not Started",
            country: "UAE",
            total_amount: Some(4950.0),
            paid_amount: Some(3900.0),
            created_on: (2025, 12, 1),
        },
    ]
    .into_iter()
    .map(|seed| ApplicationRecord {
        id: ApplicationId(seed.id.to_string()),
        owner_identity: IdentityId(seed.owner.to_string()),
        client_id: ClientId(seed.client_id.to_string()),
        client_name: seed.client_name.to_string(),
        document_name: seed.document_name.to_string(),
        status: seed.status.to_string(),
        payment_status: seed.payment_status.to_string(),
        process_status: seed.process_status.to_string(),
        country: seed.country.to_string(),
        currency: "USD".to_string(),
        total_amount: seed.total_amount,
        paid_amount: seed.paid_amount,
        created_at: timestamp(seed.created_on),
    })
    .collect()
}

fn payments() -> Vec<PaymentRecord> {
    [
        ("PAY-001", "John Doe", "RAC401", (2025, 12, 2), 2500.0, PaymentState::Completed),
        ("PAY-002", "Robert Kim", "NAP000", (2025, 12, 1), 1800.0, PaymentState::Pending),
        ("PAY-003", "Sarah Johnson", "RMB500", (2025, 11, 30), 3200.0, PaymentState::Overdue),
        ("PAY-004", "Michael Jordan", "BAL023", (2025, 11, 28), 4500.0, PaymentState::Completed),
        ("PAY-005", "Emma Clark", "TEC789", (2025, 11, 25), 1200.0, PaymentState::Pending),
    ]
    .into_iter()
    .map(|(id, name, reference, (year, month, day), amount, status)| PaymentRecord {
        id: id.to_string(),
        client_name: name.to_string(),
        reference: reference.to_string(),
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN),
        amount,
        status,
    })
    .collect()
}

fn timestamp((year, month, day): (i32, u32, u32)) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
