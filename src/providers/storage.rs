//! ADLS Gen2 probe client
//!
//! Hierarchical-namespace operations used by the permission diagnostics:
//! filesystem exists/create, directory create, small file upload
//! (create + append + flush), and recursive ACL updates. Auth is an AAD
//! bearer token for https://storage.azure.com/.default; the account key
//! in the connection string is never used to sign requests.

use std::time::Duration;
use tracing::{debug, info};

use crate::models::config::ConnectionString;
use crate::models::errors::{ProbeError, ProbeResult};
use crate::models::types::AccessToken;
use crate::utils::constants::{DEFAULT_HTTP_TIMEOUT_SECS, STORAGE_API_VERSION, USER_AGENT};

pub struct DataLakeClient {
    /// https://{account}.dfs.{suffix}
    account_url: String,
    filesystem: String,
    token: AccessToken,
    client: reqwest::Client,
}

impl DataLakeClient {
    pub fn new(
        connection: &ConnectionString,
        filesystem: &str,
        token: AccessToken,
    ) -> ProbeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            account_url: connection.dfs_endpoint(),
            filesystem: filesystem.to_string(),
            token,
            client,
        })
    }

    fn fs_url(&self) -> String {
        format!("{}/{}", self.account_url, self.filesystem)
    }

    fn path_url(&self, path: &str) -> String {
        format!("{}/{}", self.fs_url(), path.trim_matches('/'))
    }

    fn headers(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.bearer_auth(&self.token.token)
            .header("x-ms-version", STORAGE_API_VERSION)
    }

    /// Whether the filesystem (container) exists
    pub async fn filesystem_exists(&self) -> ProbeResult<bool> {
        let response = self
            .headers(self.client.head(self.fs_url()))
            .query(&[("resource", "filesystem")])
            .send()
            .await?;

        let status = response.status();
        match status.as_u16() {
            200..=299 => Ok(true),
            404 => Ok(false),
            code => Err(ProbeError::from_status(code, "")),
        }
    }

    pub async fn create_filesystem(&self) -> ProbeResult<()> {
        let response = self
            .headers(self.client.put(self.fs_url()))
            .query(&[("resource", "filesystem")])
            .send()
            .await?;
        self.expect_success(response).await?;
        info!("📁 Filesystem '{}' created", self.filesystem);
        Ok(())
    }

    /// Create a directory; succeeds when it already exists
    pub async fn create_directory(&self, path: &str) -> ProbeResult<()> {
        let response = self
            .headers(self.client.put(self.path_url(path)))
            .query(&[("resource", "directory")])
            .send()
            .await?;
        self.expect_success(response).await?;
        debug!("directory '{}' ready", path);
        Ok(())
    }

    /// Upload a small file: create, append at position 0, flush
    pub async fn upload_file(&self, path: &str, data: &[u8]) -> ProbeResult<()> {
        let url = self.path_url(path);

        let response = self
            .headers(self.client.put(&url))
            .query(&[("resource", "file")])
            .send()
            .await?;
        self.expect_success(response).await?;

        let response = self
            .headers(self.client.patch(&url))
            .query(&[("action", "append"), ("position", "0")])
            .body(data.to_vec())
            .send()
            .await?;
        self.expect_success(response).await?;

        let position = data.len().to_string();
        let response = self
            .headers(self.client.patch(&url))
            .query(&[("action", "flush"), ("position", position.as_str())])
            .send()
            .await?;
        self.expect_success(response).await?;

        info!("📄 Uploaded {} ({} bytes)", path, data.len());
        Ok(())
    }

    /// Recursively merge an ACL entry (e.g. `group:{id}:rwx`) into a
    /// directory tree. Single service-side call; recursion is the
    /// service's, not ours.
    pub async fn update_acl_recursive(&self, path: &str, acl_entry: &str) -> ProbeResult<()> {
        let url = if path == "/" || path.is_empty() {
            self.fs_url()
        } else {
            self.path_url(path)
        };
        let response = self
            .headers(self.client.patch(url))
            .query(&[("action", "setAccessControlRecursive"), ("mode", "modify")])
            .header("x-ms-acl", acl_entry)
            .send()
            .await?;
        self.expect_success(response).await?;
        info!("🔐 ACL '{}' applied under '{}'", acl_entry, path);
        Ok(())
    }

    async fn expect_success(&self, response: reqwest::Response) -> ProbeResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ProbeError::from_status(status.as_u16(), &body))
    }
}

/// Fetch sample content for the upload probes (plain GET, no auth)
pub async fn fetch_sample(url: &str) -> ProbeResult<Vec<u8>> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
        .build()?;
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ProbeError::from_status(status.as_u16(), ""));
    }
    Ok(response.bytes().await?.to_vec())
}
