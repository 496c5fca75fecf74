use serde::Serialize;

use crate::progress::{ApplicationProgress, ApplicationStatus, Stage};
use crate::records::{
    ApplicationRecord, BrokerRecord, BrokerStatus, ClientRecord, PaymentRecord, PaymentState,
};

/// A detail page either shows its record or a not-found state with a way back.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DetailView<T> {
    Found(T),
    NotFound { back_to: String },
}

impl<T> DetailView<T> {
    pub fn not_found(back_to: impl Into<String>) -> Self {
        Self::NotFound {
            back_to: back_to.into(),
        }
    }

    pub fn found(&self) -> Option<&T> {
        match self {
            Self::Found(view) => Some(view),
            Self::NotFound { .. } => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> DetailView<U> {
        match self {
            Self::Found(view) => DetailView::Found(f(view)),
            Self::NotFound { back_to } => DetailView::NotFound { back_to },
        }
    }
}

/// Shared by the admin and client detail pages so both render the same timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationDetailView {
    pub application: ApplicationRecord,
    pub progress: ApplicationProgress,
}

impl From<ApplicationRecord> for ApplicationDetailView {
    fn from(application: ApplicationRecord) -> Self {
        let progress = ApplicationProgress::derive(
            Some(&application.status),
            application.total_amount,
            application.paid_amount,
        );
        Self {
            application,
            progress,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRow {
    pub application: ApplicationRecord,
    pub current_stage: Stage,
    pub stage_label: &'static str,
    pub payment_percentage: u8,
}

impl From<ApplicationRecord> for ApplicationRow {
    fn from(application: ApplicationRecord) -> Self {
        let progress = ApplicationProgress::derive(
            Some(&application.status),
            application.total_amount,
            application.paid_amount,
        );
        Self {
            application,
            current_stage: progress.current_stage,
            stage_label: progress.current_stage.label(),
            payment_percentage: progress.payment_percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ApplicationStats {
    pub total: usize,
    pub approved: usize,
    pub processing: usize,
    pub total_value: f64,
    /// Paid amounts, each capped at its application's total.
    pub collected: f64,
}

impl ApplicationStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ApplicationRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match ApplicationStatus::parse(&record.status) {
                ApplicationStatus::Approved => stats.approved += 1,
                ApplicationStatus::Processing | ApplicationStatus::InProgress => {
                    stats.processing += 1
                }
                _ => {}
            }

            let total = record.total_amount.filter(|value| value.is_finite()).unwrap_or(0.0);
            let paid = record.paid_amount.filter(|value| value.is_finite()).unwrap_or(0.0);
            stats.total_value += total.max(0.0);
            stats.collected += paid.clamp(0.0, total.max(0.0));
            stats
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationListView {
    pub stats: ApplicationStats,
    pub applications: Vec<ApplicationRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClientStats {
    pub total: usize,
    pub completed: usize,
    pub return_docs: usize,
}

impl ClientStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ClientRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match ApplicationStatus::parse(&record.status) {
                ApplicationStatus::Completed => stats.completed += 1,
                ApplicationStatus::ReturnDocs => stats.return_docs += 1,
                _ => {}
            }
            stats
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientRow {
    pub client: ClientRecord,
    pub stage: Stage,
    pub stage_label: &'static str,
}

impl From<ClientRecord> for ClientRow {
    fn from(client: ClientRecord) -> Self {
        let stage = Stage::for_status(ApplicationStatus::parse(&client.status));
        Self {
            client,
            stage,
            stage_label: stage.label(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientListView {
    pub stats: ClientStats,
    pub clients: Vec<ClientRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientDetailView {
    pub client: ClientRecord,
    pub progress: ApplicationProgress,
    pub applications: Vec<ApplicationRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokerDetailView {
    pub broker: BrokerRecord,
    pub clients: Vec<ClientRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BrokerStats {
    pub total: usize,
    pub active: usize,
    pub hold: usize,
}

impl BrokerStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a BrokerRecord>) -> Self {
        records.into_iter().fold(Self::default(), |mut stats, record| {
            stats.total += 1;
            match record.status {
                BrokerStatus::Active => stats.active += 1,
                BrokerStatus::Hold => stats.hold += 1,
            }
            stats
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageCount {
    pub stage: Stage,
    pub label: &'static str,
    pub applications: usize,
}

/// Admin landing page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOverview {
    pub applications: ApplicationStats,
    pub clients: ClientStats,
    pub brokers: BrokerStats,
    pub stage_breakdown: Vec<StageCount>,
    pub recent_applications: Vec<ApplicationRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinanceSummary {
    pub total_payments: usize,
    pub completed_amount: f64,
    pub pending_amount: f64,
    pub overdue_amount: f64,
    pub payments: Vec<PaymentRecord>,
}

impl FinanceSummary {
    /// Totals cover every payment; `payments` holds only the rows the filter keeps.
    pub fn build(all: Vec<PaymentRecord>, keep: impl Fn(&PaymentRecord) -> bool) -> Self {
        let mut summary = Self {
            total_payments: all.len(),
            completed_amount: 0.0,
            pending_amount: 0.0,
            overdue_amount: 0.0,
            payments: Vec::new(),
        };

        for payment in all {
            match payment.status {
                PaymentState::Completed => summary.completed_amount += payment.amount,
                PaymentState::Pending => summary.pending_amount += payment.amount,
                PaymentState::Overdue => summary.overdue_amount += payment.amount,
            }
            if keep(&payment) {
                summary.payments.push(payment);
            }
        }

        summary
    }
}
