use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use super::filter::{ApplicationFilter, ClientFilter, PaymentFilter};
use super::views::{
    ApplicationDetailView, ApplicationListView, ApplicationRow, ApplicationStats,
    BrokerDetailView, BrokerStats, ClientDetailView, ClientListView, ClientRow, ClientStats,
    DashboardOverview, DetailView, FinanceSummary, StageCount,
};
use crate::backend::{DocumentStore, IdentityId};
use crate::progress::{ApplicationProgress, Stage};
use crate::records::{
    next_sequential_id, ApplicationRecord, BrokerId, BrokerRecord, BrokerStatus, ClientId,
    ClientRecord, InMemoryRepository, PaymentRecord, Record, RecordRepository, RepositoryError,
    SeedData, StoreRepository,
};

const RECENT_APPLICATIONS: usize = 5;

/// The four repositories behind the portal pages.
#[derive(Clone)]
pub struct Repositories {
    pub applications: Arc<dyn RecordRepository<ApplicationRecord>>,
    pub clients: Arc<dyn RecordRepository<ClientRecord>>,
    pub brokers: Arc<dyn RecordRepository<BrokerRecord>>,
    pub payments: Arc<dyn RecordRepository<PaymentRecord>>,
}

impl Repositories {
    /// Local repositories pre-filled with `seed`.
    pub fn in_memory(seed: &SeedData) -> Self {
        Self {
            applications: Arc::new(InMemoryRepository::seeded(seed.applications.clone())),
            clients: Arc::new(InMemoryRepository::seeded(seed.clients.clone())),
            brokers: Arc::new(InMemoryRepository::seeded(seed.brokers.clone())),
            payments: Arc::new(InMemoryRepository::seeded(seed.payments.clone())),
        }
    }

    pub fn store_backed<S: DocumentStore + 'static>(store: Arc<S>) -> Self {
        Self {
            applications: Arc::new(StoreRepository::<ApplicationRecord, S>::new(store.clone())),
            clients: Arc::new(StoreRepository::<ClientRecord, S>::new(store.clone())),
            brokers: Arc::new(StoreRepository::<BrokerRecord, S>::new(store.clone())),
            payments: Arc::new(StoreRepository::<PaymentRecord, S>::new(store)),
        }
    }
}

/// Fields collected by the add-client form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NewClient {
    pub name: String,
    pub contact: String,
    pub address: String,
    pub email: String,
    pub broker: String,
}

/// Fields of the broker add/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrokerDraft {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub performance: String,
    #[serde(default = "default_broker_status")]
    pub status: BrokerStatus,
}

fn default_broker_status() -> BrokerStatus {
    BrokerStatus::Active
}

/// Read and write operations behind the admin and client pages.
pub struct DashboardService {
    repositories: Repositories,
    // Serialises id allocation so two creations never pick the same next id.
    allocation: Mutex<()>,
}

impl DashboardService {
    pub fn new(repositories: Repositories) -> Self {
        Self {
            repositories,
            allocation: Mutex::new(()),
        }
    }

    pub fn overview(&self) -> DashboardOverview {
        let applications = list_or_empty(self.repositories.applications.as_ref());
        let clients = list_or_empty(self.repositories.clients.as_ref());
        let brokers = list_or_empty(self.repositories.brokers.as_ref());

        let rows: Vec<ApplicationRow> = applications
            .iter()
            .cloned()
            .map(ApplicationRow::from)
            .collect();
        let stage_breakdown = Stage::ordered()
            .into_iter()
            .map(|stage| StageCount {
                stage,
                label: stage.label(),
                applications: rows.iter().filter(|row| row.current_stage == stage).count(),
            })
            .collect();

        let mut recent = rows;
        recent.sort_by(|a, b| b.application.created_at.cmp(&a.application.created_at));
        recent.truncate(RECENT_APPLICATIONS);

        DashboardOverview {
            applications: ApplicationStats::from_records(&applications),
            clients: ClientStats::from_records(&clients),
            brokers: BrokerStats::from_records(&brokers),
            stage_breakdown,
            recent_applications: recent,
        }
    }

    pub fn applications(&self, filter: &ApplicationFilter) -> ApplicationListView {
        let records = list_or_empty(self.repositories.applications.as_ref());
        application_list(records.into_iter().filter(|record| filter.matches(record)))
    }

    pub fn application_detail(
        &self,
        id: &str,
    ) -> Result<DetailView<ApplicationDetailView>, DashboardError> {
        let view = match self.repositories.applications.fetch(id)? {
            Some(record) => DetailView::Found(ApplicationDetailView::from(record)),
            None => DetailView::not_found("/applications"),
        };
        Ok(view)
    }

    /// Applications owned by `identity`, for the client dashboard.
    pub fn client_applications(&self, identity: &IdentityId) -> ApplicationListView {
        let owner = Value::String(identity.0.clone());
        let records = self
            .repositories
            .applications
            .find_by("ownerIdentity", &owner)
            .unwrap_or_else(|error| {
                warn!(%error, %identity, "client applications fetch failed; showing empty list");
                Vec::new()
            });
        application_list(records)
    }

    /// An application owned by someone else is reported exactly like a missing one.
    pub fn client_application_detail(
        &self,
        identity: &IdentityId,
        id: &str,
    ) -> Result<DetailView<ApplicationDetailView>, DashboardError> {
        let view = match self.repositories.applications.fetch(id)? {
            Some(record) if record.owner_identity == *identity => {
                DetailView::Found(ApplicationDetailView::from(record))
            }
            Some(_) => {
                info!(%identity, application = id, "application outside client scope");
                DetailView::not_found("/client")
            }
            None => DetailView::not_found("/client"),
        };
        Ok(view)
    }

    pub fn clients(&self, filter: &ClientFilter) -> ClientListView {
        let records = list_or_empty(self.repositories.clients.as_ref());
        ClientListView {
            stats: ClientStats::from_records(&records),
            clients: records
                .into_iter()
                .filter(|record| filter.matches(record))
                .map(ClientRow::from)
                .collect(),
        }
    }

    pub fn client_detail(&self, id: &str) -> Result<DetailView<ClientDetailView>, DashboardError> {
        let Some(client) = self.repositories.clients.fetch(id)? else {
            return Ok(DetailView::not_found("/clients"));
        };

        let applications = self
            .repositories
            .applications
            .find_by("clientId", &Value::String(client.id.0.clone()))?;
        let stats = ApplicationStats::from_records(&applications);
        let progress = ApplicationProgress::derive(
            Some(&client.status),
            Some(stats.total_value),
            Some(stats.collected),
        );

        Ok(DetailView::Found(ClientDetailView {
            client,
            progress,
            applications: applications.into_iter().map(ApplicationRow::from).collect(),
        }))
    }

    /// Validate the add-client form and store the client under the next `ROC-nnn` id.
    pub fn create_client(&self, draft: NewClient) -> Result<ClientRecord, DashboardError> {
        let missing: Vec<&'static str> = [
            ("name", &draft.name),
            ("contact", &draft.contact),
            ("address", &draft.address),
            ("email", &draft.email),
            ("broker", &draft.broker),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields { fields: missing }.into());
        }

        let _allocation = self.allocation.lock().expect("allocation mutex poisoned");
        let existing = self.repositories.clients.list()?;
        let id = next_sequential_id(
            ClientRecord::ID_PREFIX,
            existing.iter().map(Record::id),
        );

        let record = ClientRecord {
            id: ClientId(id),
            name: draft.name.trim().to_string(),
            email: draft.email.trim().to_string(),
            contact: draft.contact.trim().to_string(),
            address: draft.address.trim().to_string(),
            broker: draft.broker.trim().to_string(),
            status: "Registration".to_string(),
        };
        let stored = self.repositories.clients.insert(record)?;
        info!(client = %stored.id.0, "client registered");
        Ok(stored)
    }

    pub fn brokers(&self) -> Vec<BrokerRecord> {
        list_or_empty(self.repositories.brokers.as_ref())
    }

    pub fn broker_detail(&self, id: &str) -> Result<DetailView<BrokerDetailView>, DashboardError> {
        let Some(broker) = self.repositories.brokers.fetch(id)? else {
            return Ok(DetailView::not_found("/brokers"));
        };
        let clients = self
            .repositories
            .clients
            .find_by("broker", &Value::String(broker.name.clone()))?;
        Ok(DetailView::Found(BrokerDetailView { broker, clients }))
    }

    pub fn create_broker(&self, draft: BrokerDraft) -> Result<BrokerRecord, DashboardError> {
        validate_broker(&draft)?;

        let _allocation = self.allocation.lock().expect("allocation mutex poisoned");
        let existing = self.repositories.brokers.list()?;
        let id = next_sequential_id(
            BrokerRecord::ID_PREFIX,
            existing.iter().map(Record::id),
        );
        let stored = self
            .repositories
            .brokers
            .insert(broker_from_draft(BrokerId(id), draft))?;
        info!(broker = %stored.id.0, "broker added");
        Ok(stored)
    }

    pub fn update_broker(
        &self,
        id: &str,
        draft: BrokerDraft,
    ) -> Result<DetailView<BrokerRecord>, DashboardError> {
        validate_broker(&draft)?;

        let record = broker_from_draft(BrokerId(id.to_string()), draft);
        match self.repositories.brokers.update(record.clone()) {
            Ok(()) => Ok(DetailView::Found(record)),
            Err(RepositoryError::NotFound) => Ok(DetailView::not_found("/brokers")),
            Err(error) => Err(error.into()),
        }
    }

    /// Returns `false` when no broker had that id.
    pub fn delete_broker(&self, id: &str) -> Result<bool, DashboardError> {
        match self.repositories.brokers.delete(id) {
            Ok(()) => {
                info!(broker = id, "broker removed");
                Ok(true)
            }
            Err(RepositoryError::NotFound) => Ok(false),
            Err(error) => Err(error.into()),
        }
    }

    pub fn finance(&self, filter: PaymentFilter) -> FinanceSummary {
        let payments = list_or_empty(self.repositories.payments.as_ref());
        FinanceSummary::build(payments, |payment| filter.keeps(payment))
    }
}

fn application_list(records: impl IntoIterator<Item = ApplicationRecord>) -> ApplicationListView {
    let records: Vec<ApplicationRecord> = records.into_iter().collect();
    ApplicationListView {
        stats: ApplicationStats::from_records(&records),
        applications: records.into_iter().map(ApplicationRow::from).collect(),
    }
}

fn list_or_empty<R: Record>(repository: &dyn RecordRepository<R>) -> Vec<R> {
    repository.list().unwrap_or_else(|error| {
        warn!(%error, collection = R::COLLECTION, "list fetch failed; showing empty list");
        Vec::new()
    })
}

fn validate_broker(draft: &BrokerDraft) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = [("name", &draft.name), ("email", &draft.email)]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::MissingFields { fields: missing })
    }
}

fn broker_from_draft(id: BrokerId, draft: BrokerDraft) -> BrokerRecord {
    BrokerRecord {
        id,
        name: draft.name.trim().to_string(),
        email: draft.email.trim().to_string(),
        location: draft.location.trim().to_string(),
        performance: draft.performance.trim().to_string(),
        status: draft.status,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all fields")]
    MissingFields { fields: Vec<&'static str> },
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
