//! The remote data gateway over HTTP.
//!
//! Pure pass-through I/O: requests go out exactly as the state machine
//! asked, responses come back as rows, and nothing is validated, cached,
//! or retried here. The remote service is the sole source of truth.

use odgrid_types::{
    FieldMap, FilterState, Gateway, GatewayError, Result, Row, RowId, SortState, query,
};
use serde::Deserialize;
use url::Url;

/// Collection responses arrive as `{ "value": [ ... ] }`.
#[derive(Debug, Deserialize)]
struct CollectionResponse {
    value: Vec<Row>,
}

pub(crate) fn parse_collection(body: &str) -> Result<Vec<Row>> {
    let response: CollectionResponse =
        serde_json::from_str(body).map_err(|e| GatewayError::Parse(e.to_string()))?;
    Ok(response.value)
}

/// HTTP implementation of the gateway against one OData-style service.
///
/// Collections live under `{base}/{Resource}`, single entities under
/// `{base}/{Resource}(id)` with string keys quoted.
#[derive(Debug, Clone)]
pub struct ODataGateway {
    http: reqwest::Client,
    base: Url,
}

impl ODataGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| GatewayError::Network(format!("invalid base url {}: {}", base_url, e)))?;
        Ok(ODataGateway {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn collection_url(&self, resource: &str) -> Result<Url> {
        self.join_segment(resource)
    }

    fn entity_url(&self, resource: &str, id: &RowId) -> Result<Url> {
        self.join_segment(&format!("{}({})", resource, id.to_key_literal()))
    }

    fn join_segment(&self, segment: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::Network(format!("base url {} cannot be a base", self.base)))?
            .push(segment);
        Ok(url)
    }

    async fn read_body(response: reqwest::Response) -> Result<String> {
        response
            .text()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))
    }

    /// Writes fail with the status and payload on any non-2xx response.
    async fn check_write(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = Self::read_body(response).await.unwrap_or_default();
        Err(GatewayError::RemoteWrite {
            status: status.as_u16(),
            body,
        })
    }

    /// Mutation responses are a bare entity; 204 No Content is tolerated
    /// by echoing just the written fields for the caller to merge.
    async fn parse_entity(response: reqwest::Response, written: &FieldMap) -> Result<Row> {
        let body = Self::read_body(response).await?;
        if body.trim().is_empty() {
            return Ok(Row::from_fields(written.clone()));
        }
        serde_json::from_str(&body).map_err(|e| GatewayError::Parse(e.to_string()))
    }
}

impl Gateway for ODataGateway {
    async fn list(
        &self,
        resource: &str,
        sort: &SortState,
        filter: &FilterState,
    ) -> Result<Vec<Row>> {
        let mut url = self.collection_url(resource)?;
        for (name, value) in query::to_query_params(sort, filter) {
            url.query_pairs_mut().append_pair(&name, &value);
        }

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Network(format!(
                "HTTP {} on GET {}",
                status.as_u16(),
                url
            )));
        }
        parse_collection(&Self::read_body(response).await?)
    }

    async fn create(&self, resource: &str, fields: &FieldMap) -> Result<Row> {
        let url = self.collection_url(resource)?;
        let response = self
            .http
            .post(url)
            .json(fields)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = Self::check_write(response).await?;
        Self::parse_entity(response, fields).await
    }

    async fn update(&self, resource: &str, id: &RowId, fields: &FieldMap) -> Result<Row> {
        let url = self.entity_url(resource, id)?;
        let response = self
            .http
            .patch(url)
            .json(fields)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        let response = Self::check_write(response).await?;
        Self::parse_entity(response, fields).await
    }

    async fn delete(&self, resource: &str, id: &RowId) -> Result<()> {
        let url = self.entity_url(resource, id)?;
        let response = self
            .http
            .delete(url)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        Self::check_write(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> ODataGateway {
        ODataGateway::new("https://services.example.test/v4/northwind.svc/").unwrap()
    }

    #[test]
    fn collection_url_appends_the_resource() {
        let url = gateway().collection_url("Orders").unwrap();
        assert_eq!(
            url.as_str(),
            "https://services.example.test/v4/northwind.svc/Orders"
        );
    }

    #[test]
    fn entity_url_renders_integer_and_string_keys() {
        let gw = gateway();
        let by_int = gw.entity_url("Orders", &RowId::Int(10248)).unwrap();
        assert!(by_int.as_str().ends_with("/Orders(10248)"));

        let by_str = gw
            .entity_url("Customers", &RowId::Str("ALFKI".into()))
            .unwrap();
        assert!(by_str.as_str().ends_with("/Customers('ALFKI')"));
    }

    #[test]
    fn list_url_carries_translated_sort_and_filter() {
        let gw = gateway();
        let mut sort = SortState::default();
        sort.toggle("OrderDate");
        sort.toggle("OrderDate"); // descending
        let mut filter = FilterState::default();
        filter.set("ShipCity", "London");

        let mut url = gw.collection_url("Orders").unwrap();
        for (name, value) in query::to_query_params(&sort, &filter) {
            url.query_pairs_mut().append_pair(&name, &value);
        }
        let query = url.query().unwrap();
        assert!(query.contains("%24orderby=OrderDate+desc"));
        assert!(query.contains("%24filter=ShipCity+eq+%27London%27"));
    }

    #[test]
    fn collection_bodies_unwrap_the_value_envelope() {
        let rows = parse_collection(
            r#"{ "value": [ { "OrderID": 10248, "ShipCity": "Reims" } ] }"#,
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id("OrderID"), Some(RowId::Int(10248)));
    }

    #[test]
    fn malformed_bodies_fail_with_parse() {
        let err = parse_collection(r#"[ { "OrderID": 1 } ]"#).unwrap_err();
        assert!(matches!(err, GatewayError::Parse(_)));
    }

    #[test]
    fn invalid_base_url_is_rejected_up_front() {
        assert!(ODataGateway::new("not a url").is_err());
    }
}
