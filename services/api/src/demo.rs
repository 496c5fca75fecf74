use crate::infra::{build_portal, parse_amount, parse_role};
use chrono::Local;
use clap::Args;
use serde::Serialize;
use visadesk::access::{navigate, Role, RouteDecision, Session};
use visadesk::backend::IdentityId;
use visadesk::config::{DataConfig, DataSource, SessionConfig};
use visadesk::dashboard::{ApplicationFilter, DetailView, PaymentFilter};
use visadesk::error::AppError;
use visadesk::progress::{ApplicationProgress, StageState};
use visadesk::records::seed::DEMO_CLIENT_IDENTITY;
use visadesk::records::SeedData;

#[derive(Args, Debug)]
pub(crate) struct NavigateArgs {
    /// Browser path to evaluate, e.g. /clients/ROC-001
    #[arg(long)]
    pub(crate) path: String,
    /// Role of the signed-in user. Without it the role counts as still loading.
    #[arg(long, value_parser = parse_role, conflicts_with = "anonymous")]
    pub(crate) role: Option<Role>,
    /// Evaluate for a visitor who is not signed in
    #[arg(long)]
    pub(crate) anonymous: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ProgressArgs {
    /// Application status as stored, e.g. "Doc Processing"
    #[arg(long)]
    pub(crate) status: String,
    /// Total amount due
    #[arg(long, value_parser = parse_amount)]
    pub(crate) total: Option<f64>,
    /// Amount paid so far
    #[arg(long, value_parser = parse_amount)]
    pub(crate) paid: Option<f64>,
}

#[derive(Debug, Serialize)]
struct NavigateReport<'a> {
    path: &'a str,
    session: &'a Session,
    decision: RouteDecision,
}

pub(crate) fn run_navigate(args: NavigateArgs) -> Result<(), AppError> {
    let session = cli_session(args.anonymous, args.role);
    let report = NavigateReport {
        path: &args.path,
        session: &session,
        decision: navigate(&args.path, &session),
    };
    println!("{}", to_pretty(&report));
    Ok(())
}

pub(crate) fn run_progress(args: ProgressArgs) -> Result<(), AppError> {
    let progress = ApplicationProgress::derive(Some(&args.status), args.total, args.paid);
    println!("Status: {} ({})", args.status, progress.status.label());
    render_timeline(&progress);
    Ok(())
}

pub(crate) fn run_demo() -> Result<(), AppError> {
    let seed = SeedData::demo();
    let data = DataConfig {
        source: DataSource::Seeded,
        seed_accounts: true,
    };
    let portal = build_portal(&data, &SessionConfig::default(), &seed)?;

    println!("Visa portal demo ({})", Local::now().date_naive());

    println!("\nRouting an anonymous visitor");
    for path in ["/", "/dashboard", "/client"] {
        let decision = navigate(path, &Session::anonymous());
        println!("- {path} -> {}", describe(&decision));
    }

    let Some(admin) = seed.accounts.iter().find(|account| account.role == Role::Admin) else {
        println!("No admin account in the seed data");
        return Ok(());
    };
    let (_, admin_session) = portal.login(admin.email, admin.password)?;
    println!("\nSigned in as {} ({})", admin.email, Role::Admin.as_str());
    for path in ["/", "/finance", "/client/settings", "/reports"] {
        let decision = navigate(path, &admin_session);
        println!("- {path} -> {}", describe(&decision));
    }

    let overview = portal.dashboard().overview();
    println!(
        "- {} applications | {} approved | {} processing | {:.0} of {:.0} collected",
        overview.applications.total,
        overview.applications.approved,
        overview.applications.processing,
        overview.applications.collected,
        overview.applications.total_value
    );
    println!(
        "- {} clients ({} completed, {} returning documents) | {} brokers ({} active)",
        overview.clients.total,
        overview.clients.completed,
        overview.clients.return_docs,
        overview.brokers.total,
        overview.brokers.active
    );
    println!("Stage breakdown:");
    for entry in &overview.stage_breakdown {
        println!("  - {}: {}", entry.label, entry.applications);
    }

    let processing = portal.dashboard().applications(&ApplicationFilter {
        status: Some("Processing".to_string()),
        ..ApplicationFilter::default()
    });
    println!("Applications in processing:");
    for row in &processing.applications {
        println!(
            "  - {} {} ({}%)",
            row.application.id.0, row.application.client_name, row.payment_percentage
        );
    }

    let finance = portal.dashboard().finance(PaymentFilter::Pending);
    println!(
        "Finance: {:.0} completed | {:.0} pending | {:.0} overdue | {} pending rows",
        finance.completed_amount,
        finance.pending_amount,
        finance.overdue_amount,
        finance.payments.len()
    );

    let Some(client) = seed.accounts.iter().find(|account| account.role == Role::Client) else {
        return Ok(());
    };
    let (_, client_session) = portal.login(client.email, client.password)?;
    println!("\nSigned in as {} ({})", client.email, Role::Client.as_str());
    for path in ["/", "/dashboard"] {
        let decision = navigate(path, &client_session);
        println!("- {path} -> {}", describe(&decision));
    }

    let owner = IdentityId(DEMO_CLIENT_IDENTITY.to_string());
    let own = portal.dashboard().client_applications(&owner);
    for row in &own.applications {
        let detail = portal
            .dashboard()
            .client_application_detail(&owner, &row.application.id.0)?;
        if let Some(view) = detail.found() {
            println!("Application {}", view.application.id.0);
            render_timeline(&view.progress);
        }
    }

    let foreign = portal
        .dashboard()
        .client_application_detail(&owner, "APP-001")?;
    if let DetailView::NotFound { back_to } = &foreign {
        println!("- APP-001 belongs to someone else -> not found, back to {back_to}");
    }

    Ok(())
}

fn cli_session(anonymous: bool, role: Option<Role>) -> Session {
    let identity = IdentityId("cli-user".to_string());
    match (anonymous, role) {
        (true, _) => Session::anonymous(),
        (false, Some(role)) => Session::authenticated(identity, role),
        (false, None) => Session::authenticating(identity),
    }
}

fn describe(decision: &RouteDecision) -> String {
    match decision {
        RouteDecision::Render { route } if route.is_not_found() => {
            "render (not found)".to_string()
        }
        RouteDecision::Render { route } => format!("render {}", route.path()),
        RouteDecision::Redirect { target } => format!("redirect {target}"),
        RouteDecision::Pending => "loading".to_string(),
    }
}

fn render_timeline(progress: &ApplicationProgress) {
    for entry in &progress.stages {
        let marker = match entry.state {
            StageState::Complete => "x",
            StageState::Active => ">",
            StageState::Pending => " ",
        };
        println!(
            "  [{marker}] {}. {} ({})",
            entry.ordinal, entry.label, entry.state_label
        );
    }
    println!("  Payment: {}%", progress.payment_percentage);
}

fn to_pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|err| format!("{{\"error\": \"{err}\"}}"))
}
