//! REST implementation of [`ApiPort`] over `gloo-net`.
//!
//! Endpoints follow the backend's naming:
//! `GET {base}/{resource}`, `POST {base}/{resource}/agregar_{action}`,
//! `PUT .../actualizar_{action}/{id}`, `DELETE .../eliminar_{action}/{id}`.

use crate::shared::api_utils::{api_base, join_url};
use crate::shared::list_controller::{ApiError, ApiPort};
use async_trait::async_trait;
use contracts::domain::common::{Entity, EntityId};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use web_sys::{AbortController, AbortSignal};

pub struct RestApi<T> {
    base: String,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for RestApi<T> {
    fn clone(&self) -> Self {
        Self {
            base: self.base.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Entity> Default for RestApi<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> RestApi<T> {
    /// Client against the resolved application API base
    pub fn new() -> Self {
        Self::with_base(api_base())
    }

    pub fn with_base(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            _entity: PhantomData,
        }
    }

    pub fn list_url(&self) -> String {
        join_url(&self.base, T::resource())
    }

    /// `None` for read-only resources
    pub fn create_url(&self) -> Option<String> {
        T::action_name().map(|action| format!("{}/agregar_{}", self.list_url(), action))
    }

    pub fn update_url(&self, id: EntityId) -> Option<String> {
        T::action_name().map(|action| format!("{}/actualizar_{}/{}", self.list_url(), action, id))
    }

    pub fn delete_url(&self, id: EntityId) -> Option<String> {
        T::action_name().map(|action| format!("{}/eliminar_{}/{}", self.list_url(), action, id))
    }

    fn read_only() -> ApiError {
        ApiError::Status {
            status: 405,
            message: format!("{} es de solo lectura", T::list_name()),
        }
    }
}

#[async_trait(?Send)]
impl<T: Entity> ApiPort<T> for RestApi<T> {
    async fn list(&self) -> Result<Vec<T>, ApiError> {
        fetch_list(&self.list_url()).await
    }

    async fn create(&self, body: &T) -> Result<T, ApiError> {
        let url = self.create_url().ok_or_else(Self::read_only)?;
        let saved = exchange(|signal| {
            Request::post(&url)
                .abort_signal(signal)
                .json(body)
                .map_err(serialize_error)
        })
        .await?;
        decode_saved(saved, body)
    }

    async fn update(&self, id: EntityId, body: &T) -> Result<T, ApiError> {
        let url = self.update_url(id).ok_or_else(Self::read_only)?;
        let saved = exchange(|signal| {
            Request::put(&url)
                .abort_signal(signal)
                .json(body)
                .map_err(serialize_error)
        })
        .await?;
        decode_saved(saved, body)
    }

    async fn delete(&self, id: EntityId) -> Result<(), ApiError> {
        let url = self.delete_url(id).ok_or_else(Self::read_only)?;
        exchange(|signal| Request::delete(&url).abort_signal(signal).build().map_err(network))
            .await
            .map(|_| ())
    }
}

/// GET a JSON array of any shape, e.g. the references offered by form selects
pub async fn fetch_list<R: DeserializeOwned>(url: &str) -> Result<Vec<R>, ApiError> {
    fetch_json(url).await
}

pub async fn fetch_json<R: DeserializeOwned>(url: &str) -> Result<R, ApiError> {
    let body = exchange(|signal| Request::get(url).abort_signal(signal).build().map_err(network)).await?;
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// GET `url?query` with the query serialized by `serde_qs`
pub async fn fetch_json_with<R, Q>(url: &str, query: &Q) -> Result<R, ApiError>
where
    R: DeserializeOwned,
    Q: Serialize,
{
    fetch_json(&query_url(url, query)?).await
}

pub fn query_url<Q: Serialize>(url: &str, query: &Q) -> Result<String, ApiError> {
    let query = serde_qs::to_string(query).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(with_query(url, &query))
}

fn with_query(url: &str, query: &str) -> String {
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{}?{}", url, query)
    }
}

/// Send one request and read its body.
///
/// The browser `fetch` is tied to this future: dropping it before the body
/// arrives (a superseded load, a disposed page) aborts the request.
async fn exchange(
    build: impl FnOnce(Option<&AbortSignal>) -> Result<Request, ApiError>,
) -> Result<String, ApiError> {
    let guard = AbortOnDrop::new(AbortController::new().ok());
    let signal = guard.signal();
    let request = build(signal.as_ref())?;
    let response = request.send().await.map_err(network)?;
    let body = checked_body(response).await;
    guard.finish();
    body
}

trait RequestAbort {
    fn signal(&self) -> Option<AbortSignal>;
    fn abort(&self);
}

impl RequestAbort for AbortController {
    fn signal(&self) -> Option<AbortSignal> {
        Some(AbortController::signal(self))
    }

    fn abort(&self) {
        AbortController::abort(self)
    }
}

/// Aborts the request when dropped before [`finish`](Self::finish)
struct AbortOnDrop<C: RequestAbort> {
    controller: Option<C>,
}

impl<C: RequestAbort> AbortOnDrop<C> {
    fn new(controller: Option<C>) -> Self {
        Self { controller }
    }

    fn signal(&self) -> Option<AbortSignal> {
        self.controller.as_ref().and_then(RequestAbort::signal)
    }

    fn finish(mut self) {
        self.controller = None;
    }
}

impl<C: RequestAbort> Drop for AbortOnDrop<C> {
    fn drop(&mut self) {
        if let Some(controller) = self.controller.take() {
            log::debug!("Aborting unfinished request");
            controller.abort();
        }
    }
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn serialize_error(e: gloo_net::Error) -> ApiError {
    ApiError::Decode(format!("Failed to serialize request: {}", e))
}

/// Body of a 2xx response, or the failure described by the error body
async fn checked_body(response: Response) -> Result<String, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let status_text = response.status_text();
    let body = response.text().await.unwrap_or_default();

    if ok {
        Ok(body)
    } else {
        Err(ApiError::Status {
            status,
            message: error_message(&body, &status_text),
        })
    }
}

/// Saved entity from a create/update answer; an empty body echoes `sent`
fn decode_saved<T: Entity>(body: String, sent: &T) -> Result<T, ApiError> {
    if body.trim().is_empty() {
        return Ok(sent.clone());
    }
    serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Human message of an error body: JSON `message`/`error`, else the raw
/// text, else the status line
pub fn error_message(body: &str, status_text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error", "mensaje"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str()) {
                if !text.trim().is_empty() {
                    return text.trim().to_string();
                }
            }
        }
    }
    let text = body.trim();
    if !text.is_empty() && !text.starts_with('{') {
        return text.to_string();
    }
    status_text.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_client::entity::Client;
    use contracts::domain::a009_audit_log::entity::AuditEntry;

    #[test]
    fn test_endpoints() {
        let api = RestApi::<Client>::with_base("http://localhost:8080/api/");
        assert_eq!(api.list_url(), "http://localhost:8080/api/clientes");
        assert_eq!(
            api.create_url().as_deref(),
            Some("http://localhost:8080/api/clientes/agregar_cliente")
        );
        assert_eq!(
            api.update_url(7).as_deref(),
            Some("http://localhost:8080/api/clientes/actualizar_cliente/7")
        );
        assert_eq!(
            api.delete_url(7).as_deref(),
            Some("http://localhost:8080/api/clientes/eliminar_cliente/7")
        );
    }

    #[test]
    fn test_read_only_has_no_mutation_endpoints() {
        let api = RestApi::<AuditEntry>::with_base("/api");
        assert_eq!(api.list_url(), "/api/auditoria");
        assert_eq!(api.create_url(), None);
        assert_eq!(api.delete_url(1), None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(r#"{"message":"El cliente tiene ventas"}"#, "Conflict"),
            "El cliente tiene ventas"
        );
        assert_eq!(error_message(r#"{"error":"Bad Request"}"#, "x"), "Bad Request");
        assert_eq!(error_message("Cliente no encontrado", "Not Found"), "Cliente no encontrado");
        assert_eq!(error_message("", "Internal Server Error"), "Internal Server Error");
        assert_eq!(error_message(r#"{"status":500}"#, "Internal Server Error"), "Internal Server Error");
    }

    #[derive(Clone, Default)]
    struct CountingAbort(std::rc::Rc<std::cell::Cell<usize>>);

    impl RequestAbort for CountingAbort {
        fn signal(&self) -> Option<AbortSignal> {
            None
        }

        fn abort(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn test_unfinished_request_is_aborted_on_drop() {
        let aborts = CountingAbort::default();
        drop(AbortOnDrop::new(Some(aborts.clone())));
        assert_eq!(aborts.0.get(), 1);

        AbortOnDrop::new(Some(aborts.clone())).finish();
        assert_eq!(aborts.0.get(), 1);
    }

    #[test]
    fn test_period_query_url() {
        use contracts::domain::a010_report::report::ReportPeriod;
        let period = ReportPeriod {
            from: "2024-02-14".into(),
            to: "2024-03-15".into(),
        };
        assert_eq!(
            query_url("/api/reportes/ventas", &period).unwrap(),
            "/api/reportes/ventas?fechaDesde=2024-02-14&fechaHasta=2024-03-15"
        );
    }

    #[test]
    fn test_query_string() {
        assert_eq!(with_query("/api/reportes/ventas", ""), "/api/reportes/ventas");
        assert_eq!(
            with_query("/api/reportes/ventas", "fechaDesde=2024-01-01"),
            "/api/reportes/ventas?fechaDesde=2024-01-01"
        );
    }

    #[test]
    fn test_empty_body_echoes_draft() {
        let draft = Client {
            full_name: "Ana Luna".into(),
            ..Default::default()
        };
        assert_eq!(decode_saved(String::new(), &draft).unwrap(), draft);

        let saved = decode_saved(r#"{"id":9,"nombreCompleto":"Ana Luna"}"#.to_string(), &draft).unwrap();
        assert_eq!(saved.id, Some(9));
    }
}
