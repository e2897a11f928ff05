use std::path::PathBuf;
use blob_store::s3_store::S3Options;
use blob_store::{Container, MAX_PASTE_SIZE};
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    /// S3-compatible object storage.
    S3,
    /// Files in a local directory.
    Local,
    /// Process memory, lost on exit.
    Memory,
}

/// What to do with an upload body longer than the size limit.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OversizePolicy {
    /// Keep the first `max_size` bytes and store those.
    Truncate,
    /// Refuse the upload with 413.
    Reject,
}

#[derive(Clone, Copy, Debug)]
pub struct UploadLimits {
    pub max_size: usize,
    pub oversize: OversizePolicy,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self { max_size: MAX_PASTE_SIZE, oversize: OversizePolicy::Truncate }
    }
}

#[derive(Parser, Debug)]
#[clap(version, about = "Content-addressed paste server")]
pub struct Args {
    /// Object storage namespace.
    #[clap(long, env = "NAMESPACE")]
    pub(crate) namespace: String,
    /// Bucket holding every paste.
    #[clap(long, env = "BUCKET")]
    pub(crate) bucket: String,
    #[clap(long, env = "HTTP_ADDR", default_value = "0.0.0.0:8080")]
    pub(crate) http_addr: String,
    #[clap(long, env = "PASTE_STORE", value_enum, default_value_t = StoreKind::S3)]
    pub(crate) store: StoreKind,
    /// Explicit S3 endpoint, e.g. a MinIO server.
    #[clap(long, env = "S3_ENDPOINT_URL")]
    pub(crate) endpoint_url: Option<String>,
    /// Region of the namespace's S3-compatibility endpoint.
    #[clap(long, env = "OCI_REGION")]
    pub(crate) region: Option<String>,
    #[clap(long, env = "PASTE_DATA_DIR", default_value = "pastes")]
    pub(crate) data_dir: PathBuf,
    #[clap(long, env = "PASTE_OVERSIZE", value_enum, default_value_t = OversizePolicy::Truncate)]
    pub(crate) oversize: OversizePolicy,
}

impl Args {
    pub fn container(&self) -> Container {
        Container::new(&self.namespace, &self.bucket)
    }

    pub fn s3_options(&self) -> S3Options {
        S3Options {
            endpoint_url: self.endpoint_url.clone(),
            region: self.region.clone(),
        }
    }

    pub fn upload_limits(&self) -> UploadLimits {
        UploadLimits { max_size: MAX_PASTE_SIZE, oversize: self.oversize }
    }
}

/// Parses `argv` the way `Args::parse` does, minus the environment fallbacks,
/// so results don't depend on the calling shell.
#[cfg(test)]
pub(crate) fn parse_args_without_env<I, T>(argv: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    use clap::{CommandFactory, FromArgMatches};

    let matches = Args::command()
        .mut_args(|arg| arg.env(None::<&'static str>))
        .try_get_matches_from(argv)?;
    Args::from_arg_matches(&matches)
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;
    use clap::CommandFactory;
    use super::*;

    #[test]
    fn test_defaults() {
        let args = parse_args_without_env(["paste-server", "--namespace", "ns", "--bucket", "pastes"]).unwrap();
        assert_eq!(args.container(), Container::new("ns", "pastes"));
        assert_eq!(args.http_addr, "0.0.0.0:8080");
        assert_eq!(args.store, StoreKind::S3);
        assert_eq!(args.data_dir, PathBuf::from("pastes"));
        assert_eq!(args.endpoint_url, None);
        assert_eq!(args.region, None);
        assert_eq!(args.upload_limits().max_size, 16 * 1024);
        assert_eq!(args.upload_limits().oversize, OversizePolicy::Truncate);
    }

    #[test]
    fn test_overrides() {
        let args = parse_args_without_env([
            "paste-server",
            "--namespace", "ns",
            "--bucket", "pastes",
            "--store", "local",
            "--data-dir", "/tmp/pastes",
            "--oversize", "reject",
            "--endpoint-url", "http://minio:9000",
        ]).unwrap();
        assert_eq!(args.store, StoreKind::Local);
        assert_eq!(args.data_dir, PathBuf::from("/tmp/pastes"));
        assert_eq!(args.oversize, OversizePolicy::Reject);
        assert_eq!(args.s3_options().endpoint_url.as_deref(), Some("http://minio:9000"));
    }

    #[test]
    fn test_missing_container_is_fatal() {
        assert!(parse_args_without_env(["paste-server", "--namespace", "ns"]).is_err());
        assert!(parse_args_without_env(["paste-server", "--bucket", "pastes"]).is_err());
    }

    #[test]
    fn test_env_fallbacks() {
        let cmd = Args::command();
        let env_of = |id: &str| {
            cmd.get_arguments()
                .find(|arg| arg.get_id() == id)
                .and_then(|arg| arg.get_env())
                .map(OsStr::to_os_string)
        };
        assert_eq!(env_of("namespace").as_deref(), Some(OsStr::new("NAMESPACE")));
        assert_eq!(env_of("bucket").as_deref(), Some(OsStr::new("BUCKET")));
        assert_eq!(env_of("store").as_deref(), Some(OsStr::new("PASTE_STORE")));
        assert_eq!(env_of("oversize").as_deref(), Some(OsStr::new("PASTE_OVERSIZE")));
    }
}
