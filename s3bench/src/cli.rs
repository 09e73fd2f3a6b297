use argh::FromArgs;

/// Benchmark upload and download latency of an S3-compatible object store.
#[derive(Debug, FromArgs)]
pub struct Args {
    /// the S3 endpoint, such as `s3.example.com` or `http://localhost:9000`
    #[argh(option)]
    pub endpoint: Option<String>,

    /// access key of the S3 account (or through $S3_ACCESS_KEY)
    #[argh(option)]
    pub access_key: Option<String>,

    /// secret key of the S3 account (or through $S3_SECRET_KEY)
    #[argh(option)]
    pub secret_key: Option<String>,

    /// name of the bucket to write trial objects to
    #[argh(option)]
    pub bucket_name: Option<String>,

    /// size of the random file to generate and upload (MB)
    #[argh(option, default = "10")]
    pub file_size: u64,

    /// amount of uploads-downloads
    #[argh(option, default = "10")]
    pub trials: usize,

    /// region used for request signing
    #[argh(option, default = "String::from(\"us-east-1\")")]
    pub region: String,

    /// use virtual-hosted-style bucket addressing instead of path-style
    #[argh(switch)]
    pub virtual_hosted: bool,

    /// prefix of the object keys written by the trials
    #[argh(option, default = "String::from(\"file-\")")]
    pub key_prefix: String,

    /// delete all trial objects once the benchmark has finished
    #[argh(switch)]
    pub cleanup: bool,

    /// print the report as JSON
    #[argh(switch)]
    pub json: bool,
}
