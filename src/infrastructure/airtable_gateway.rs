use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};

use crate::{
    config::Config,
    domain::{
        gateway::TodoGateway,
        record::{to_payload, RecordPayload, Records, RemoteRecord},
        todo::{TodoFields, TodoId, TodoQuery},
    },
    error::GatewayError,
};

/// Gateway over the spreadsheet-as-database REST API. Every request carries the bearer token.
#[derive(Clone)]
pub struct AirtableGateway {
    client: Client,
    endpoint: Url,
    token: String,
}

impl AirtableGateway {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self { client, endpoint: config.endpoint()?, token: config.token.clone() })
    }

    pub fn endpoint(&self) -> &Url { &self.endpoint }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    async fn write_one(&self, builder: RequestBuilder, body: &Records<RecordPayload>) -> Result<RemoteRecord, GatewayError> {
        let response = self.authorized(builder).json(body).send().await?;
        let records: Records<RemoteRecord> = read_json(response).await?;
        records
            .records
            .into_iter()
            .next()
            .ok_or_else(|| GatewayError::Decode("response contained no records".into()))
    }
}

#[async_trait]
impl TodoGateway for AirtableGateway {
    async fn list(&self, query: &TodoQuery) -> Result<Vec<RemoteRecord>, GatewayError> {
        let mut params = vec![
            ("sort[0][field]", query.sort_field.as_str().to_string()),
            ("sort[0][direction]", query.sort_direction.as_str().to_string()),
        ];
        if let Some(formula) = query.filter_formula() {
            params.push(("filterByFormula", formula));
        }

        let mut all = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut request = self.authorized(self.client.get(self.endpoint.clone())).query(&params);
            if let Some(cursor) = &offset {
                request = request.query(&[("offset", cursor)]);
            }
            tracing::debug!(endpoint = %self.endpoint, offset = offset.as_deref(), "GET records");
            let page: Records<RemoteRecord> = read_json(request.send().await?).await?;
            all.extend(page.records);
            match page.offset {
                Some(next) => offset = Some(next),
                None => break,
            }
        }
        Ok(all)
    }

    async fn create(&self, fields: TodoFields) -> Result<RemoteRecord, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, "POST record");
        let body = Records::single(to_payload(None, fields));
        self.write_one(self.client.post(self.endpoint.clone()), &body).await
    }

    async fn update(&self, id: &TodoId, fields: TodoFields) -> Result<RemoteRecord, GatewayError> {
        tracing::debug!(endpoint = %self.endpoint, %id, "PATCH record");
        let body = Records::single(to_payload(Some(id), fields));
        self.write_one(self.client.patch(self.endpoint.clone()), &body).await
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let error = GatewayError::request_failed(status, &body);
        tracing::warn!(%status, %error, "remote store rejected request");
        return Err(error);
    }
    response.json::<T>().await.map_err(|e| GatewayError::Decode(e.to_string()))
}
