use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use super::Portal;
use crate::access::{
    evaluate, navigate, AdminView, AppRoute, ClientView, Role, RouteDecision, Session,
    SessionToken, LOGIN_PATH, ROOT_PATH,
};
use crate::backend::{DocumentStore, IdentityProvider};
use crate::dashboard::{
    ApplicationFilter, BrokerDraft, ClientFilter, DetailView, NewClient, PaymentFilter,
};
use crate::error::AppError;

type Shared<I, S> = State<Arc<Portal<I, S>>>;

/// JSON API over the portal. Every data route runs through the role guard first.
pub fn portal_router<I, S>(portal: Arc<Portal<I, S>>) -> Router
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    Router::new()
        .route("/api/v1/auth/login", post(login_handler::<I, S>))
        .route("/api/v1/auth/signup", post(signup_handler::<I, S>))
        .route("/api/v1/auth/logout", post(logout_handler::<I, S>))
        .route("/api/v1/session", get(session_handler::<I, S>))
        .route("/api/v1/navigate", get(navigate_handler::<I, S>))
        .route("/api/v1/admin/dashboard", get(overview_handler::<I, S>))
        .route(
            "/api/v1/admin/applications",
            get(applications_handler::<I, S>),
        )
        .route(
            "/api/v1/admin/applications/:id",
            get(application_handler::<I, S>),
        )
        .route(
            "/api/v1/admin/clients",
            get(clients_handler::<I, S>).post(create_client_handler::<I, S>),
        )
        .route("/api/v1/admin/clients/:id", get(client_handler::<I, S>))
        .route(
            "/api/v1/admin/brokers",
            get(brokers_handler::<I, S>).post(create_broker_handler::<I, S>),
        )
        .route(
            "/api/v1/admin/brokers/:id",
            get(broker_handler::<I, S>)
                .put(update_broker_handler::<I, S>)
                .delete(delete_broker_handler::<I, S>),
        )
        .route("/api/v1/admin/finance", get(finance_handler::<I, S>))
        .route(
            "/api/v1/client/applications",
            get(own_applications_handler::<I, S>),
        )
        .route(
            "/api/v1/client/applications/:id",
            get(own_application_handler::<I, S>),
        )
        .with_state(portal)
}

#[derive(Debug, Deserialize)]
pub(crate) struct Credentials {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct SessionGrant {
    token: SessionToken,
    session: Session,
    redirect: &'static str,
}

impl SessionGrant {
    fn new(token: SessionToken, session: Session) -> Self {
        let redirect = session.role.map(Role::home).unwrap_or(ROOT_PATH);
        Self {
            token,
            session,
            redirect,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct NavigateQuery {
    path: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FinanceQuery {
    filter: PaymentFilter,
}

pub(crate) async fn login_handler<I, S>(
    State(portal): Shared<I, S>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, AppError>
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let (token, session) = portal.login(&credentials.email, &credentials.password)?;
    Ok((StatusCode::OK, Json(SessionGrant::new(token, session))).into_response())
}

pub(crate) async fn signup_handler<I, S>(
    State(portal): Shared<I, S>,
    Json(credentials): Json<Credentials>,
) -> Result<Response, AppError>
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let (token, session) = portal.signup(&credentials.email, &credentials.password)?;
    Ok((StatusCode::CREATED, Json(SessionGrant::new(token, session))).into_response())
}

pub(crate) async fn logout_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
) -> Result<Response, AppError>
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let closed = match bearer_token(&headers) {
        Some(token) => portal.logout(&token)?,
        None => None,
    };
    Ok(match closed {
        Some(session) => (StatusCode::OK, Json(json!({ "session": session }))).into_response(),
        None => redirect_response(LOGIN_PATH),
    })
}

pub(crate) async fn session_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let session = current_session(&portal, &headers);
    Json(json!({ "session": session })).into_response()
}

/// Report what the guard decides for `path` without enforcing it.
pub(crate) async fn navigate_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Query(query): Query<NavigateQuery>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let session = current_session(&portal, &headers);
    let decision = navigate(&query.path, &session);
    Json(decision).into_response()
}

pub(crate) async fn overview_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::admin(AdminView::Dashboard), |_| {
        Ok(Json(portal.dashboard().overview()).into_response())
    })
}

pub(crate) async fn applications_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Query(filter): Query<ApplicationFilter>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::admin(AdminView::Applications), |_| {
        Ok(Json(portal.dashboard().applications(&filter)).into_response())
    })
}

pub(crate) async fn application_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let route = AppRoute::admin(AdminView::ApplicationDetail(id.clone()));
    guarded(&portal, &headers, route, |_| {
        Ok(detail_response(portal.dashboard().application_detail(&id)?))
    })
}

pub(crate) async fn clients_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Query(filter): Query<ClientFilter>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::admin(AdminView::Clients), |_| {
        Ok(Json(portal.dashboard().clients(&filter)).into_response())
    })
}

pub(crate) async fn create_client_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Json(draft): Json<NewClient>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::admin(AdminView::AddClient), |_| {
        let client = portal.dashboard().create_client(draft)?;
        Ok((StatusCode::CREATED, Json(client)).into_response())
    })
}

pub(crate) async fn client_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let route = AppRoute::admin(AdminView::ClientDetail(id.clone()));
    guarded(&portal, &headers, route, |_| {
        Ok(detail_response(portal.dashboard().client_detail(&id)?))
    })
}

pub(crate) async fn brokers_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::admin(AdminView::Brokers), |_| {
        Ok(Json(portal.dashboard().brokers()).into_response())
    })
}

pub(crate) async fn create_broker_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Json(draft): Json<BrokerDraft>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::admin(AdminView::Brokers), |_| {
        let broker = portal.dashboard().create_broker(draft)?;
        Ok((StatusCode::CREATED, Json(broker)).into_response())
    })
}

pub(crate) async fn broker_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let route = AppRoute::admin(AdminView::BrokerDetail(id.clone()));
    guarded(&portal, &headers, route, |_| {
        Ok(detail_response(portal.dashboard().broker_detail(&id)?))
    })
}

pub(crate) async fn update_broker_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(draft): Json<BrokerDraft>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let route = AppRoute::admin(AdminView::BrokerDetail(id.clone()));
    guarded(&portal, &headers, route, |_| {
        Ok(detail_response(portal.dashboard().update_broker(&id, draft)?))
    })
}

pub(crate) async fn delete_broker_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let route = AppRoute::admin(AdminView::BrokerDetail(id.clone()));
    guarded(&portal, &headers, route, |_| {
        if portal.dashboard().delete_broker(&id)? {
            Ok(StatusCode::NO_CONTENT.into_response())
        } else {
            Ok(detail_response(DetailView::<()>::not_found("/brokers")))
        }
    })
}

pub(crate) async fn finance_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Query(query): Query<FinanceQuery>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::admin(AdminView::Finance), |_| {
        Ok(Json(portal.dashboard().finance(query.filter)).into_response())
    })
}

pub(crate) async fn own_applications_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    guarded(&portal, &headers, AppRoute::client(ClientView::Dashboard), |session| {
        let Some(identity) = session.identity else {
            return Ok(redirect_response(LOGIN_PATH));
        };
        Ok(Json(portal.dashboard().client_applications(&identity)).into_response())
    })
}

pub(crate) async fn own_application_handler<I, S>(
    State(portal): Shared<I, S>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let route = AppRoute::client(ClientView::ApplicationDetail(id.clone()));
    guarded(&portal, &headers, route, |session| {
        let Some(identity) = session.identity else {
            return Ok(redirect_response(LOGIN_PATH));
        };
        let view = portal
            .dashboard()
            .client_application_detail(&identity, &id)?;
        Ok(detail_response(view))
    })
}

/// Run `render` only when the guard lets `route` render for the caller's session.
fn guarded<I, S>(
    portal: &Portal<I, S>,
    headers: &HeaderMap,
    route: AppRoute,
    render: impl FnOnce(Session) -> Result<Response, AppError>,
) -> Response
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    let session = current_session(portal, headers);
    let path = route.path();
    match evaluate(route, &session) {
        RouteDecision::Render { .. } => render(session).unwrap_or_else(IntoResponse::into_response),
        RouteDecision::Redirect { target } => {
            debug!(%path, %target, "request redirected by guard");
            redirect_response(&target)
        }
        RouteDecision::Pending => {
            debug!(%path, "request deferred until role resolves");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "state": "pending" })),
            )
                .into_response()
        }
    }
}

fn current_session<I, S>(portal: &Portal<I, S>, headers: &HeaderMap) -> Session
where
    I: IdentityProvider + 'static,
    S: DocumentStore + 'static,
{
    portal.session(bearer_token(headers).as_ref())
}

/// Login redirects mean "authenticate first" and map to 401; role mismatches to 403.
fn redirect_response(target: &str) -> Response {
    let status = if target == LOGIN_PATH {
        StatusCode::UNAUTHORIZED
    } else {
        StatusCode::FORBIDDEN
    };
    (status, Json(json!({ "redirect": target }))).into_response()
}

fn detail_response<T: Serialize>(view: DetailView<T>) -> Response {
    let status = if view.is_not_found() {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::OK
    };
    (status, Json(view)).into_response()
}

pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<SessionToken> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?.trim();
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    SessionToken::parse(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(value).expect("header"),
        );
        headers
    }

    #[test]
    fn bearer_token_accepts_any_scheme_casing() {
        let token = SessionToken::generate();
        assert_eq!(bearer_token(&headers(&format!("Bearer {token}"))), Some(token));
        assert_eq!(bearer_token(&headers(&format!("bearer {token}"))), Some(token));
    }

    #[test]
    fn bearer_token_rejects_other_schemes_and_garbage() {
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer not-a-uuid")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn redirects_split_into_unauthorized_and_forbidden() {
        assert_eq!(redirect_response("/login").status(), StatusCode::UNAUTHORIZED);
        assert_eq!(redirect_response("/client").status(), StatusCode::FORBIDDEN);
    }
}
