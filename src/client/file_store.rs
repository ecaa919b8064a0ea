use std::time::Duration;

use anyhow::Context;

use mime::Mime;

use reqwest::{header, Client};

use secrecy::Secret;

use url::Url;

use uuid::Uuid;

use crate::model::Role;

/// Client for the remote file store's object API. Uploaded attachments are
/// publicly resolvable under the store's `public` prefix.
#[derive(Debug)]
pub struct StorageClient {
    client: Client,
    api_base_url: Url,
    bucket: String,
    api_auth_token: Secret<String>,
}

impl StorageClient {
    pub fn new(
        api_base_url: Url,
        bucket: String,
        api_auth_token: Secret<String>,
        api_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(api_timeout)
            .build()
            .context("Failed to build http client")?;

        Ok(Self {
            client,
            api_base_url,
            bucket,
            api_auth_token,
        })
    }

    /// Upload a blob under the given object name and return its public URL
    #[tracing::instrument(name = "Upload attachment", skip(self, bytes))]
    pub async fn upload(
        &self,
        object_name: &str,
        content_type: &Mime,
        bytes: Vec<u8>,
    ) -> anyhow::Result<String> {
        use secrecy::ExposeSecret;

        let url = self.object_url(object_name)?;

        self.client
            .post(url)
            .bearer_auth(self.api_auth_token.expose_secret())
            .header(header::CONTENT_TYPE, content_type.as_ref())
            .body(bytes)
            .send()
            .await?
            .error_for_status()?;

        Ok(self.public_url(object_name)?.to_string())
    }

    /// Best-effort removal of an uploaded object
    #[tracing::instrument(name = "Delete attachment", skip(self))]
    pub async fn delete(&self, object_name: &str) -> anyhow::Result<()> {
        use secrecy::ExposeSecret;

        let url = self.object_url(object_name)?;

        self.client
            .delete(url)
            .bearer_auth(self.api_auth_token.expose_secret())
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    fn object_url(&self, object_name: &str) -> anyhow::Result<Url> {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/object/{}/{}", base, self.bucket, object_name))
            .context("Failed to create object URL")
    }

    fn public_url(&self, object_name: &str) -> anyhow::Result<Url> {
        let base = self.api_base_url.as_str().trim_end_matches('/');
        Url::parse(&format!(
            "{}/object/public/{}/{}",
            base, self.bucket, object_name
        ))
        .context("Failed to create public object URL")
    }
}

/// Object name for an uploaded attachment: role, a fresh id for uniqueness,
/// and the extension matching the validated content type
pub fn attachment_object_name(role: Role, extension: &str) -> String {
    format!("{}_{}.{}", role, Uuid::new_v4(), extension)
}
