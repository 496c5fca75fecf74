use serde::{Deserialize, Serialize};

/// Closed vocabulary of application statuses written by the portal and its importers.
///
/// Records keep the raw string so unknown values round-trip untouched; `parse` is
/// total and folds anything outside the vocabulary into `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    New,
    Draft,
    Pending,
    Registration,
    Submitted,
    Documents,
    DocProcessing,
    ReturnDocs,
    Review,
    Processing,
    InProgress,
    Approved,
    Completed,
    Rejected,
    Cancelled,
    Unknown,
}

impl ApplicationStatus {
    pub fn parse(raw: &str) -> Self {
        let normalized = raw
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ");

        match normalized.split_whitespace().collect::<Vec<_>>().join(" ").as_str() {
            "new" => Self::New,
            "draft" => Self::Draft,
            "pending" => Self::Pending,
            "registration" => Self::Registration,
            "submitted" => Self::Submitted,
            "documents" => Self::Documents,
            "doc processing" => Self::DocProcessing,
            "return docs" => Self::ReturnDocs,
            "review" | "under review" => Self::Review,
            "processing" => Self::Processing,
            "in progress" => Self::InProgress,
            "approved" => Self::Approved,
            "completed" | "complete" => Self::Completed,
            "rejected" => Self::Rejected,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    pub fn from_optional(raw: Option<&str>) -> Self {
        raw.map(Self::parse).unwrap_or(Self::Unknown)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Draft => "Draft",
            Self::Pending => "Pending",
            Self::Registration => "Registration",
            Self::Submitted => "Submitted",
            Self::Documents => "Documents",
            Self::DocProcessing => "Doc Processing",
            Self::ReturnDocs => "Return Docs",
            Self::Review => "Review",
            Self::Processing => "Processing",
            Self::InProgress => "In Progress",
            Self::Approved => "Approved",
            Self::Completed => "Completed",
            Self::Rejected => "Rejected",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }
}
