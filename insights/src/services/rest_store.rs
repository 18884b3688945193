//! REST record store
//!
//! Talks to a PostgREST-style endpoint at `{base}/rest/v1/{table}`. Queries are
//! rendered into the filter dialect (`col=eq.value`, `col=like.*x*`,
//! `col=in.("a","b")`, `order=col.desc.nullslast`, `limit=n`) and failures are
//! classified into [`StoreError`] kinds so callers can decide what to retry.

use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use shared::{
    component_debug, CareerStatusEvent, Collection, Component, EducationOutcome, Filter, InclusionRating, ProfileId,
    ProfilePatch, ProfileRecord, RecordQuery, SortDirection, StoreError, StoreResult,
};

use crate::error::{InsightsError, InsightsResult};
use crate::traits::RecordStore;

/// Postgres error code for unique constraint violations
const UNIQUE_VIOLATION: &str = "23505";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone)]
pub struct RestRecordStore {
    base_url: String,
    api_key: String,
    client: Client,
}

impl RestRecordStore {
    pub fn new(base_url: &str, api_key: &str) -> InsightsResult<Self> {
        let base_url = base_url.trim_end_matches('/');
        if !base_url.starts_with("http") {
            return Err(InsightsError::config("store_url", base_url));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| InsightsError::config("http_client", e.to_string()))?;

        Ok(Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, collection: Collection) -> String {
        format!("{}/rest/v1/{}", self.base_url, collection.table())
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn select<T: DeserializeOwned>(&self, collection: Collection, query: &RecordQuery) -> StoreResult<Vec<T>> {
        let params = query_params(query);
        component_debug!(Component::Store, table = collection.table(), "🔎 GET {:?}", params);

        let request = self.authorized(self.client.get(self.endpoint(collection)).query(&params));
        let response = check_status(request.send().await.map_err(transport_error)?, collection.table()).await?;
        response.json::<Vec<T>>().await.map_err(transport_error)
    }
}

/// Render a query into PostgREST query-string pairs
pub fn query_params(query: &RecordQuery) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];

    for filter in &query.filters {
        let rendered = match filter {
            Filter::Eq { value, .. } => format!("eq.{}", value.render()),
            Filter::Contains { needle, .. } => format!("like.*{needle}*"),
            Filter::In { values, .. } => {
                let quoted: Vec<String> = values.iter().map(|v| format!("\"{}\"", v.render())).collect();
                format!("in.({})", quoted.join(","))
            }
        };
        params.push((filter.field().to_string(), rendered));
    }

    if let Some(order) = &query.order {
        let direction = match order.direction {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        };
        params.push(("order".to_string(), format!("{}.{direction}.nullslast", order.field)));
    }

    if let Some(limit) = query.limit {
        params.push(("limit".to_string(), limit.to_string()));
    }
    params
}

/// Map a non-success response onto a store error kind
async fn check_status(response: Response, conflict_key: &str) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(classify(status, &body, conflict_key))
}

fn classify(status: StatusCode, body: &str, conflict_key: &str) -> StoreError {
    let code = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("code").and_then(|c| c.as_str()).map(str::to_string));

    if status == StatusCode::CONFLICT || code.as_deref() == Some(UNIQUE_VIOLATION) {
        return StoreError::conflict(conflict_key);
    }

    let message = format!("{status}: {body}");
    if status == StatusCode::REQUEST_TIMEOUT || status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        StoreError::transient(message)
    } else {
        StoreError::permanent(message)
    }
}

fn transport_error(error: reqwest::Error) -> StoreError {
    if error.is_decode() {
        StoreError::permanent(format!("malformed response: {error}"))
    } else {
        StoreError::transient(error.to_string())
    }
}

/// Total from a `Content-Range` header such as `0-24/318` or `*/0`
fn parse_content_range(value: &str) -> Option<u64> {
    value.rsplit_once('/').and_then(|(_, total)| total.trim().parse().ok())
}

#[async_trait::async_trait]
impl RecordStore for RestRecordStore {
    async fn profiles(&self, query: RecordQuery) -> StoreResult<Vec<ProfileRecord>> {
        self.select(Collection::Profiles, &query).await
    }

    async fn ratings(&self, query: RecordQuery) -> StoreResult<Vec<InclusionRating>> {
        self.select(Collection::Ratings, &query).await
    }

    async fn status_history(&self, query: RecordQuery) -> StoreResult<Vec<CareerStatusEvent>> {
        self.select(Collection::StatusHistory, &query).await
    }

    async fn education_outcomes(&self) -> StoreResult<Vec<EducationOutcome>> {
        self.select(Collection::EducationOutcomes, &RecordQuery::new()).await
    }

    async fn count(&self, collection: Collection, query: RecordQuery) -> StoreResult<u64> {
        let request = self
            .authorized(self.client.head(self.endpoint(collection)).query(&query_params(&query)))
            .header("Prefer", "count=exact");
        let response = check_status(request.send().await.map_err(transport_error)?, collection.table()).await?;

        response
            .headers()
            .get(header::CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range)
            .ok_or_else(|| StoreError::permanent(format!("{collection}: missing Content-Range total")))
    }

    async fn insert_rating(&self, rating: InclusionRating) -> StoreResult<InclusionRating> {
        let request = self
            .authorized(self.client.post(self.endpoint(Collection::Ratings)))
            .header("Prefer", "return=representation")
            .json(&rating);
        let response = check_status(request.send().await.map_err(transport_error)?, "talent_id,company_id").await?;

        let mut rows: Vec<InclusionRating> = response.json().await.map_err(transport_error)?;
        Ok(rows.pop().unwrap_or(rating))
    }

    async fn update_profile(&self, id: ProfileId, patch: ProfilePatch) -> StoreResult<ProfileRecord> {
        let request = self
            .authorized(self.client.patch(self.endpoint(Collection::Profiles)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(&patch);
        let response = check_status(request.send().await.map_err(transport_error)?, "id").await?;

        let mut rows: Vec<ProfileRecord> = response.json().await.map_err(transport_error)?;
        rows.pop()
            .ok_or_else(|| StoreError::not_found(Collection::Profiles, id.to_string()))
    }
}
