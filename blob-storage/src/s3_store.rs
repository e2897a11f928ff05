use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::config::{Builder, Region};
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use crate::store::{BlobStore, Container, StoreError, StoreResult};

/// How to reach the object store.
#[derive(Debug, Clone, Default)]
pub struct S3Options {
    /// Explicit endpoint, e.g. `http://minio:9000`. Wins over `region`.
    pub endpoint_url: Option<String>,
    /// Region of the namespace's S3-compatibility endpoint.
    pub region: Option<String>,
}

/// Oracle Cloud exposes each object storage namespace through an S3-compatible endpoint.
pub fn oci_compat_endpoint(namespace: &str, region: &str) -> String {
    format!("https://{}.compat.objectstorage.{}.oraclecloud.com", namespace, region)
}

/// Picks the endpoint override for `container`, or `None` to use the SDK default.
pub fn endpoint_for(container: &Container, options: &S3Options) -> Option<String> {
    if let Some(url) = &options.endpoint_url {
        return Some(url.clone());
    }
    options
        .region
        .as_deref()
        .map(|region| oci_compat_endpoint(&container.namespace, region))
}

/// Creates an S3 client for `container`. Credentials come from the default provider chain.
pub async fn create_s3_client(container: &Container, options: &S3Options) -> S3Client {
    let region_provider = RegionProviderChain::first_try(options.region.clone().map(Region::new))
        .or_default_provider()
        .or_else("us-east-1");
    let base_config = aws_config::defaults(BehaviorVersion::latest())
        .region(region_provider)
        .load()
        .await;

    let mut builder = Builder::from(&base_config);
    if let Some(endpoint) = endpoint_for(container, options) {
        tracing::info!("using object storage endpoint {}", endpoint);
        // Path-style addressing, MinIO and the OCI compatibility API both need it.
        builder = builder.endpoint_url(endpoint).force_path_style(true);
    }
    S3Client::from_conf(builder.build())
}

/// A `BlobStore` backed by an S3-compatible object store. Blob keys are object names.
#[derive(Clone, Debug)]
pub struct S3BlobStore {
    client: S3Client,
    container: Container,
}

impl S3BlobStore {
    pub fn new(client: S3Client, container: Container) -> Self {
        Self { client, container }
    }

    pub async fn connect(container: Container, options: &S3Options) -> Self {
        let client = create_s3_client(&container, options).await;
        Self::new(client, container)
    }
}

fn is_missing_object(err: &SdkError<GetObjectError, HttpResponse>) -> bool {
    if err.as_service_error().is_some_and(GetObjectError::is_no_such_key) {
        return true;
    }
    err.raw_response().is_some_and(|resp| resp.status().as_u16() == 404)
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, data: &[u8]) -> StoreResult<()> {
        self.client
            .put_object()
            .bucket(&self.container.bucket)
            .key(key)
            .body(ByteStream::from(data.to_vec()))
            .send()
            .await
            .map_err(StoreError::backend)?;
        Ok(())
    }

    async fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        let resp = match self.client
            .get_object()
            .bucket(&self.container.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) if is_missing_object(&e) => return Err(StoreError::NotFound(key.to_string())),
            Err(e) => return Err(StoreError::backend(e)),
        };
        let data = resp.body.collect().await.map_err(StoreError::backend)?;
        Ok(data.into_bytes().to_vec())
    }
}
