//! Admin and client page data assembled from the record repositories.

mod filter;
mod service;
mod views;

#[cfg(test)]
mod tests;

pub use filter::{ApplicationFilter, ClientFilter, PaymentFilter};
pub use service::{
    BrokerDraft, DashboardError, DashboardService, NewClient, Repositories, ValidationError,
};
pub use views::{
    ApplicationDetailView, ApplicationListView, ApplicationRow, ApplicationStats,
    BrokerDetailView, BrokerStats, ClientDetailView, ClientListView, ClientRow, ClientStats,
    DashboardOverview, DetailView, FinanceSummary, StageCount,
};
