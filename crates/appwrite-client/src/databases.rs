// SPDX-FileCopyrightText: OpenTalk GmbH <mail@opentalk.eu>
//
// SPDX-License-Identifier: EUPL-1.2

use super::{query_params, Result};
use crate::{AppwriteClient, Query};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Generates a document id on the server side
pub const UNIQUE_ID: &str = "unique()";

/// A document with its system attributes
#[derive(Clone, Debug, Deserialize)]
pub struct Document<T> {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", default)]
    pub created_at: Option<String>,
    #[serde(flatten)]
    pub data: T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocument<'s, T> {
    document_id: &'s str,
    data: &'s T,
}

#[derive(Deserialize)]
#[serde(bound = "T: DeserializeOwned")]
struct DocumentList<T> {
    documents: Vec<Document<T>>,
}

impl AppwriteClient {
    /// Get a single document, returns `None` if it does not exist
    pub async fn get_document<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
    ) -> Result<Option<Document<T>>>
    where
        T: DeserializeOwned,
    {
        let url = self.url([
            "databases",
            database_id,
            "collections",
            collection_id,
            "documents",
            document_id,
        ])?;

        match self.send_authorized(move |c| c.get(url)).await {
            Ok(response) => Ok(Some(response.json().await?)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create a document, pass [`UNIQUE_ID`] to let the server pick the id
    pub async fn create_document<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        document_id: &str,
        data: &T,
    ) -> Result<Document<T>>
    where
        T: Serialize + DeserializeOwned,
    {
        let url = self.url(["databases", database_id, "collections", collection_id, "documents"])?;

        let body = CreateDocument { document_id, data };

        let response = self
            .send_authorized(move |c| c.post(url).json(&body))
            .await?;

        Ok(response.json().await?)
    }

    /// List documents of a collection, optionally filtered by queries
    pub async fn list_documents<T>(
        &self,
        database_id: &str,
        collection_id: &str,
        queries: &[Query],
    ) -> Result<Vec<Document<T>>>
    where
        T: DeserializeOwned,
    {
        let url = self.url(["databases", database_id, "collections", collection_id, "documents"])?;

        let params = query_params(queries);

        let response = self
            .send_authorized(move |c| c.get(url).query(&params))
            .await?;

        let list: DocumentList<T> = response.json().await?;

        Ok(list.documents)
    }
}
