//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from bkt-core.

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;

use bkt_core::{Error, ListResult, ObjectInfo, ObjectStore, PutResult, Result, StoreConfig};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    endpoint: Option<String>,
    region: String,
    path_style: bool,
}

impl S3Client {
    /// Create a new S3 client from resolved store settings
    ///
    /// Static credentials are used when present; otherwise the SDK's
    /// default provider chain decides.
    pub async fn new(config: &StoreConfig) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(creds) = &config.credentials {
            tracing::debug!(access_key = %creds.access_key, "using static credentials from environment");
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                creds.access_key.clone(),
                creds.secret_key.clone(),
                creds.session_token.clone(),
                None, // expiry
                "bkt-env-credentials",
            ));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.path_style)
            .build();

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            endpoint: config.endpoint.clone(),
            region: config.region.clone(),
            path_style: config.path_style,
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, bucket: &str) -> Result<ListResult> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("list {bucket}")))?;

        let items = response
            .contents()
            .iter()
            .filter_map(|object| {
                let mut info = ObjectInfo::new(object.key()?);
                info.size_bytes = object.size();
                info.etag = object.e_tag().map(|etag| etag.trim_matches('"').to_string());
                Some(info)
            })
            .collect();

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
        })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<String>,
    ) -> Result<PutResult> {
        let size_bytes = data.len() as u64;
        let location = object_location(
            self.endpoint.as_deref(),
            &self.region,
            self.path_style,
            bucket,
            key,
        )?;

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(data))
            .set_content_type(content_type)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("put {bucket}/{key}")))?;

        Ok(PutResult {
            key: key.to_string(),
            location,
            size_bytes,
        })
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, &format!("delete {bucket}/{key}")))?;

        Ok(())
    }
}

/// Convert an SDK failure into the core error taxonomy
fn map_sdk_error<E, R>(err: SdkError<E, R>, context: &str) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let code = err.code().map(str::to_string);
    let detail = match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(&err).to_string(),
    };

    classify(code.as_deref(), format!("{context}: {detail}"))
}

/// Map an S3 error code to an error variant
fn classify(code: Option<&str>, message: String) -> Error {
    match code {
        Some(
            "AccessDenied" | "InvalidAccessKeyId" | "SignatureDoesNotMatch" | "ExpiredToken"
            | "InvalidToken",
        ) => Error::Auth(message),
        Some("NoSuchKey" | "NoSuchBucket" | "NotFound") => Error::NotFound(message),
        Some("OperationAborted" | "PreconditionFailed" | "ConditionalRequestConflict") => {
            Error::Conflict(message)
        }
        _ => Error::Network(message),
    }
}

/// Build the address an uploaded object is reachable at
///
/// Custom endpoints honour path-style addressing; AWS itself always gets the
/// virtual-hosted regional form. Endpoints addressed by IP, or whose host
/// cannot take a bucket label, fall back to path-style.
pub fn object_location(
    endpoint: Option<&str>,
    region: &str,
    path_style: bool,
    bucket: &str,
    key: &str,
) -> Result<String> {
    let mut bucket_in_path = false;
    let mut url = match endpoint {
        Some(endpoint) => {
            let mut url = url::Url::parse(endpoint)?;
            let virtual_host = match url.host() {
                Some(url::Host::Domain(host)) if !path_style => Some(format!("{bucket}.{host}")),
                _ => None,
            };
            bucket_in_path = match virtual_host {
                Some(host) => url.set_host(Some(&host)).is_err(),
                None => true,
            };
            url
        }
        None => url::Url::parse(&format!("https://{bucket}.s3.{region}.amazonaws.com"))?,
    };

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| {
                Error::Config(format!(
                    "Endpoint cannot carry a path: {}",
                    endpoint.unwrap_or_default()
                ))
            })?;
        segments.pop_if_empty();
        if bucket_in_path {
            segments.push(bucket);
        }
        segments.extend(key.split('/'));
    }

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_aws_virtual_host() {
        let location =
            object_location(None, "eu-west-1", false, "photos", "2024/cat.jpg").unwrap();
        assert_eq!(
            location,
            "https://photos.s3.eu-west-1.amazonaws.com/2024/cat.jpg"
        );
    }

    #[test]
    fn test_location_custom_endpoint_path_style() {
        let location = object_location(
            Some("http://localhost:9000"),
            "us-east-1",
            true,
            "photos",
            "a/b.txt",
        )
        .unwrap();
        assert_eq!(location, "http://localhost:9000/photos/a/b.txt");
    }

    #[test]
    fn test_location_custom_endpoint_virtual_host() {
        let location = object_location(
            Some("https://storage.example.com"),
            "us-east-1",
            false,
            "photos",
            "b.txt",
        )
        .unwrap();
        assert_eq!(location, "https://photos.storage.example.com/b.txt");
    }

    #[test]
    fn test_location_ip_endpoint_uses_path_style() {
        let location = object_location(
            Some("http://127.0.0.1:9000"),
            "us-east-1",
            false,
            "photos",
            "a.txt",
        )
        .unwrap();
        assert_eq!(location, "http://127.0.0.1:9000/photos/a.txt");

        let location =
            object_location(Some("http://[::1]:9000"), "us-east-1", false, "photos", "a.txt")
                .unwrap();
        assert_eq!(location, "http://[::1]:9000/photos/a.txt");
    }

    #[test]
    fn test_location_escapes_key() {
        let location = object_location(None, "us-east-1", false, "b", "my file.txt").unwrap();
        assert_eq!(location, "https://b.s3.us-east-1.amazonaws.com/my%20file.txt");
    }

    #[test]
    fn test_classify_codes() {
        assert!(matches!(
            classify(Some("AccessDenied"), "x".into()),
            Error::Auth(_)
        ));
        assert!(matches!(
            classify(Some("InvalidAccessKeyId"), "x".into()),
            Error::Auth(_)
        ));
        assert!(matches!(
            classify(Some("NoSuchBucket"), "x".into()),
            Error::NotFound(_)
        ));
        assert!(matches!(
            classify(Some("OperationAborted"), "x".into()),
            Error::Conflict(_)
        ));
        assert!(matches!(
            classify(Some("SlowDown"), "x".into()),
            Error::Network(_)
        ));
        assert!(matches!(classify(None, "x".into()), Error::Network(_)));
    }

    #[tokio::test]
    async fn test_client_builds_from_config() {
        let config = StoreConfig {
            bucket: "photos".into(),
            endpoint: Some("http://localhost:9000".into()),
            region: "us-east-1".into(),
            path_style: true,
            credentials: Some(bkt_core::Credentials {
                access_key: "minioadmin".into(),
                secret_key: "minioadmin".into(),
                session_token: None,
            }),
        };

        let client = S3Client::new(&config).await.unwrap();
        assert!(client.path_style);
        assert_eq!(client.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(
            client.inner().config().region().map(|r| r.to_string()),
            Some("us-east-1".to_string())
        );
    }
}
