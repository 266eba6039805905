use async_trait::async_trait;
use reqwest::{header, Client};

use crate::{
    application::services::ObjectStorage, domain::config::SupabaseSecrets,
    services::error::StorageError,
};

pub struct SupabaseStorage {
    client: Client,
    storage_url: String,
    api_key: String,
    bucket_name: String,
}

impl SupabaseStorage {
    pub fn new(secrets: SupabaseSecrets) -> Self {
        Self {
            client: Client::new(),
            storage_url: secrets.storage_url.trim_end_matches('/').to_string(),
            api_key: secrets.api_key,
            bucket_name: secrets.bucket_name,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!("{}/object/{}/{}", self.storage_url, self.bucket_name, key)
    }
}

#[async_trait]
impl ObjectStorage for SupabaseStorage {
    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let response = self
            .client
            .post(self.object_url(key))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("apikey", &self.api_key)
            // Overwrite on key collision is permitted.
            .header("x-upsert", "true")
            .header(header::CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(StorageError::from)?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::Unauthorized(error_text));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(StorageError::ProviderError(format!(
                "Upload failed: {}",
                error_text
            )));
        }

        Ok(key.to_string())
    }
}
