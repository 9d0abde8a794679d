//! RemoteStore over a JSON document REST API
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list | `GET /collections/{c}/documents` -> `{"documents": [{"id", "fields"}]}` |
//! | get | `GET /collections/{c}/documents?limit=1` |
//! | create | `POST /collections/{c}/documents` with fields -> `{"id"}` |
//! | update | `PATCH /collections/{c}/documents/{id}` with fields (merge) |
//! | delete | `DELETE /collections/{c}/documents/{id}` |
//! | append_to_set | `POST /collections/{c}/documents/{id}/append` with `{"field", "value"}` (upserts) |

use crate::{ClientError, HttpClient};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use vitrina_core::store::Fields;
use vitrina_core::{Record, RemoteStore, StoreError, StoreResult};

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct Document {
    id: String,
    #[serde(default)]
    fields: Fields,
}

impl From<Document> for Record {
    fn from(doc: Document) -> Self {
        Record::new(doc.id, doc.fields)
    }
}

#[derive(Debug, Deserialize)]
struct Created {
    id: String,
}

#[derive(Debug, Serialize)]
struct AppendRequest<'a> {
    field: &'a str,
    value: &'a Value,
}

fn documents_path(collection: &str) -> String {
    format!("collections/{}/documents", urlencoding::encode(collection))
}

fn document_path(collection: &str, id: &str) -> String {
    format!(
        "{}/{}",
        documents_path(collection),
        urlencoding::encode(id)
    )
}

/// HTTP-backed document store
#[derive(Debug, Clone)]
pub struct HttpDocumentStore {
    http: HttpClient,
}

impl HttpDocumentStore {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    async fn fetch(&self, path: &str) -> StoreResult<Vec<Record>> {
        match self.http.get::<DocumentList>(path).await {
            Ok(list) => Ok(list.documents.into_iter().map(Record::from).collect()),
            // A collection nobody wrote to yet
            Err(ClientError::NotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Missing targets become `NotFound` with the document's identity
fn for_target(err: ClientError, collection: &str, id: &str) -> StoreError {
    match err {
        ClientError::NotFound(_) => StoreError::not_found(collection, id),
        other => other.into(),
    }
}

#[async_trait]
impl RemoteStore for HttpDocumentStore {
    async fn list(&self, collection: &str) -> StoreResult<Vec<Record>> {
        let records = self.fetch(&documents_path(collection)).await?;
        tracing::debug!(collection = %collection, count = records.len(), "GET documents");
        Ok(records)
    }

    async fn get(&self, collection: &str) -> StoreResult<Option<Record>> {
        let path = format!("{}?limit=1", documents_path(collection));
        Ok(self.fetch(&path).await?.into_iter().next())
    }

    async fn create(&self, collection: &str, fields: Fields) -> StoreResult<String> {
        let created: Created = self.http.post(&documents_path(collection), &fields).await?;
        tracing::debug!(collection = %collection, id = %created.id, "POST document");
        Ok(created.id)
    }

    async fn update(&self, collection: &str, id: &str, fields: Fields) -> StoreResult<()> {
        self.http
            .patch(&document_path(collection, id), &fields)
            .await
            .map_err(|e| for_target(e, collection, id))
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.http
            .delete(&document_path(collection, id))
            .await
            .map_err(|e| for_target(e, collection, id))
    }

    async fn append_to_set(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> StoreResult<()> {
        let path = format!("{}/append", document_path(collection, id));
        self.http
            .post_no_content(&path, &AppendRequest { field, value: &value })
            .await
            .map_err(StoreError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paths_encode_segments() {
        assert_eq!(documents_path("productos_bebidas"), "collections/productos_bebidas/documents");
        assert_eq!(
            document_path("p", "a b/c"),
            "collections/p/documents/a%20b%2Fc"
        );
    }

    #[test]
    fn test_document_list_tolerates_missing_fields() {
        let list: DocumentList = serde_json::from_value(json!({
            "documents": [
                {"id": "a", "fields": {"name": "Cola"}},
                {"id": "b"}
            ]
        }))
        .unwrap();
        let records: Vec<Record> = list.documents.into_iter().map(Record::from).collect();
        assert_eq!(records[0].fields["name"], json!("Cola"));
        assert!(records[1].fields.is_empty());

        let empty: DocumentList = serde_json::from_value(json!({})).unwrap();
        assert!(empty.documents.is_empty());
    }

    #[test]
    fn test_missing_target_maps_to_not_found() {
        let err = for_target(ClientError::NotFound("gone".into()), "p", "x");
        assert!(matches!(err, StoreError::NotFound { ref id, .. } if id == "x"));
        let err = for_target(ClientError::Unauthorized, "p", "x");
        assert!(matches!(err, StoreError::Unavailable(_)));
    }
}
