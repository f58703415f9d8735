//! Customer HTTP handlers.
//!
//! Every store call runs on a blocking worker with its own connection,
//! opened at the start of the call and dropped when the closure returns.

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use customer_core::{
    open_existing_db, CustomerDraft, CustomerId, CustomerService, RepoResult,
    SqliteCustomerRepository,
};
use log::error;
use serde::Deserialize;

use crate::envelope::{Reply, MSG_SUCCESS};
use crate::error::{ApiError, MSG_INVALID_ID, MSG_MISSING_ID};

pub const MSG_SERVER_UP: &str = "Server up and running";
const MSG_QUERY_ERROR: &str = "query error";
const MSG_INSERT_ERROR: &str = "insert database error";
const MSG_GET_ERROR: &str = "Error GetCustomerById";
const MSG_DELETE_ERROR: &str = "Error delete data";
const MSG_UPDATE_ERROR: &str = "Error UpdateCustomer";

/// Shared handler state: where the store lives, nothing else.
#[derive(Debug, Clone)]
pub struct AppState {
    db_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Arc::new(db_path.into()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    id: Option<String>,
}

/// `/`: any method answers that the server is up.
pub async fn root() -> Reply<()> {
    Reply::message(StatusCode::OK, MSG_SERVER_UP)
}

/// Any unrouted path.
pub async fn fallback() -> ApiError {
    ApiError::not_found()
}

/// `/customers`: GET lists, POST creates.
pub async fn customers(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method == Method::GET {
        let customers =
            with_customer_service(&state, MSG_QUERY_ERROR, |service| service.list_customers())
                .await?;
        return Ok(Reply::ok(customers).into_response());
    }

    if method == Method::POST {
        let draft = decode_draft(&body)?;
        with_customer_service(&state, MSG_INSERT_ERROR, move |service| {
            service.create_customer(&draft)
        })
        .await?;
        return Ok(Reply::message(StatusCode::CREATED, MSG_SUCCESS).into_response());
    }

    Err(ApiError::method_not_allowed())
}

/// `/customer?id=…`: GET reads, PUT replaces, DELETE removes.
pub async fn customer_by_id(
    State(state): State<AppState>,
    method: Method,
    query: Result<Query<IdQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Response, ApiError> {
    if method != Method::GET && method != Method::PUT && method != Method::DELETE {
        return Err(ApiError::method_not_allowed());
    }

    let id = parse_id(query)?;

    if method == Method::GET {
        let customer =
            with_customer_service(&state, MSG_GET_ERROR, move |service| service.get_customer(id))
                .await?
                .ok_or_else(ApiError::not_found)?;
        return Ok(Reply::ok(customer).into_response());
    }

    if method == Method::DELETE {
        with_customer_service(&state, MSG_DELETE_ERROR, move |service| {
            service.delete_customer(id)
        })
        .await?;
        return Ok(Reply::message(StatusCode::OK, MSG_SUCCESS).into_response());
    }

    let draft = decode_draft(&body)?;
    with_customer_service(&state, MSG_UPDATE_ERROR, move |service| {
        service.update_existing_customer(id, &draft)
    })
    .await?;
    Ok(Reply::message(StatusCode::OK, MSG_SUCCESS).into_response())
}

fn parse_id(query: Result<Query<IdQuery>, QueryRejection>) -> Result<CustomerId, ApiError> {
    let raw = match query {
        Ok(Query(IdQuery { id: Some(raw) })) => raw,
        Ok(Query(IdQuery { id: None })) => return Err(ApiError::bad_request(MSG_MISSING_ID)),
        Err(_) => return Err(ApiError::bad_request(MSG_INVALID_ID)),
    };

    raw.trim()
        .parse::<CustomerId>()
        .map_err(|_| ApiError::bad_request(MSG_INVALID_ID))
}

/// Decodes the first JSON value in `body`; bytes after it are ignored.
fn decode_draft(body: &[u8]) -> Result<CustomerDraft, ApiError> {
    serde_json::Deserializer::from_slice(body)
        .into_iter::<CustomerDraft>()
        .next()
        .unwrap_or_else(|| serde_json::from_slice(body))
        .map_err(|err| ApiError::malformed_body(&err))
}

/// Runs one use case against a freshly opened store connection.
async fn with_customer_service<T, F>(
    state: &AppState,
    store_message: &'static str,
    f: F,
) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&CustomerService<SqliteCustomerRepository<'_>>) -> RepoResult<T> + Send + 'static,
{
    let db_path = Arc::clone(&state.db_path);
    let outcome = tokio::task::spawn_blocking(move || -> RepoResult<T> {
        let conn = open_existing_db(db_path.as_path())?;
        let service = CustomerService::new(SqliteCustomerRepository::try_new(&conn)?);
        f(&service)
    })
    .await
    .map_err(|err| {
        error!("event=store_task module=http status=error error={err}");
        ApiError::internal(store_message)
    })?;

    outcome.map_err(|err| ApiError::from_repo(err, store_message))
}
