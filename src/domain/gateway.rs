use async_trait::async_trait;

use super::record::RemoteRecord;
use super::todo::{TodoFields, TodoId, TodoQuery};
use crate::error::GatewayError;

/// The only seam that talks to the remote record store. No retries are attempted here.
#[async_trait]
pub trait TodoGateway: Send + Sync + 'static {
    async fn list(&self, query: &TodoQuery) -> Result<Vec<RemoteRecord>, GatewayError>;
    async fn create(&self, fields: TodoFields) -> Result<RemoteRecord, GatewayError>;
    async fn update(&self, id: &TodoId, fields: TodoFields) -> Result<RemoteRecord, GatewayError>;
}
