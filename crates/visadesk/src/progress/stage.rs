use serde::{Deserialize, Serialize};

use super::status::ApplicationStatus;

/// Fixed milestones every application moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Registration,
    Documents,
    Processing,
    Completion,
}

impl Stage {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Registration,
            Self::Documents,
            Self::Processing,
            Self::Completion,
        ]
    }

    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Registration => 1,
            Self::Documents => 2,
            Self::Processing => 3,
            Self::Completion => 4,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Registration => "Registration",
            Self::Documents => "Documents",
            Self::Processing => "Processing",
            Self::Completion => "Completion",
        }
    }

    /// Stage owning `status`. Unknown statuses stay in registration.
    pub const fn for_status(status: ApplicationStatus) -> Self {
        match status {
            ApplicationStatus::New
            | ApplicationStatus::Draft
            | ApplicationStatus::Pending
            | ApplicationStatus::Registration
            | ApplicationStatus::Unknown => Self::Registration,
            ApplicationStatus::Submitted
            | ApplicationStatus::Documents
            | ApplicationStatus::DocProcessing
            | ApplicationStatus::ReturnDocs
            | ApplicationStatus::Review => Self::Documents,
            ApplicationStatus::Processing | ApplicationStatus::InProgress => Self::Processing,
            ApplicationStatus::Approved
            | ApplicationStatus::Completed
            | ApplicationStatus::Rejected
            | ApplicationStatus::Cancelled => Self::Completion,
        }
    }
}

/// Display state of one stage relative to the application's current stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageState {
    Complete,
    Active,
    Pending,
}

impl StageState {
    pub fn relative_to(stage: Stage, current: Stage) -> Self {
        match stage.cmp(&current) {
            std::cmp::Ordering::Less => Self::Complete,
            std::cmp::Ordering::Equal => Self::Active,
            std::cmp::Ordering::Greater => Self::Pending,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Complete => "Completed",
            Self::Active => "In Progress",
            Self::Pending => "Not Started",
        }
    }
}
