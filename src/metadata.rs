//! Stream metadata lookup
//!
//! Resolves a stream id to its metadata record once, before querying. Not
//! part of the query engine's pagination or error-propagation machinery.

use crate::error::Result;
use crate::model::Stream;
use crate::transport::{Request, Transport};
use std::sync::Arc;

/// Read-only metadata service for a tenant namespace
pub struct MetadataService<T> {
    transport: Arc<T>,
    base_path: String,
}

impl<T: Transport> MetadataService<T> {
    /// Create a metadata service scoped to a tenant and namespace
    pub fn new(
        transport: Arc<T>,
        tenant_id: impl AsRef<str>,
        namespace_id: impl AsRef<str>,
    ) -> Self {
        Self {
            transport,
            base_path: format!(
                "api/v1/Tenants/{}/Namespaces/{}",
                tenant_id.as_ref(),
                namespace_id.as_ref()
            ),
        }
    }

    /// Resolve a stream id to its metadata record
    pub async fn get_stream(&self, stream_id: &str) -> Result<Stream> {
        tracing::debug!(stream_id, "Resolving stream");

        let request = Request::get(format!("{}/Streams/{}", self.base_path, stream_id));
        let response = self.transport.send(request).await?;
        response.json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::transport::MockTransport;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_stream_resolves_metadata() {
        let mock = MockTransport::new();
        mock.enqueue_json(json!({
            "Id": "pump-01",
            "Name": "pump-01",
            "TypeId": "TempestFloatType",
            "Description": "Simulated migrated stream"
        }));
        let service = MetadataService::new(Arc::new(mock), "tenant-1", "namespace-1");

        let stream = service.get_stream("pump-01").await.unwrap();

        assert_eq!(stream.id, "pump-01");
        assert_eq!(stream.type_id, "TempestFloatType");

        let sent = service.transport.requests();
        assert_eq!(
            sent[0].path,
            "api/v1/Tenants/tenant-1/Namespaces/namespace-1/Streams/pump-01"
        );
    }

    #[tokio::test]
    async fn test_unknown_stream_surfaces_not_found() {
        let mock = MockTransport::new();
        mock.enqueue_error(Error::NotFound("Store has no resource".to_string()));
        let service = MetadataService::new(Arc::new(mock), "tenant-1", "namespace-1");

        let result = service.get_stream("missing").await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
