use std::{path::PathBuf, time::Duration};

use argh::FromArgs;
use imgfx_io::store::DEFAULT_JPEG_QUALITY;

/// Download an image, apply named filters and save the results.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// address to listen on
    #[argh(option, default = "String::from(\"0.0.0.0\")")]
    pub host: String,

    /// HTTP port to listen on
    #[argh(option, default = "8000")]
    pub port: u16,

    /// directory the *_images folders are created in, defaults to the working directory
    #[argh(option)]
    pub output_dir: Option<PathBuf>,

    /// quality of the saved JPEG files, from 1 to 100
    #[argh(option, default = "DEFAULT_JPEG_QUALITY")]
    pub jpeg_quality: u8,

    /// timeout in seconds for downloading the source image, none by default
    #[argh(option)]
    pub timeout_secs: Option<u64>,
}

/// Runtime configuration of the service.
#[derive(Debug, Clone, PartialEq)]
pub struct ServeConfig {
    /// Address to listen on.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Root of the output directories, the working directory if `None`.
    pub output_dir: Option<PathBuf>,
    /// Quality of the saved JPEG files.
    pub jpeg_quality: u8,
    /// Timeout for downloading the source image.
    pub timeout: Option<Duration>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            output_dir: None,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            timeout: None,
        }
    }
}

impl From<Args> for ServeConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            output_dir: args.output_dir,
            jpeg_quality: args.jpeg_quality.clamp(1, 100),
            timeout: args.timeout_secs.map(Duration::from_secs),
        }
    }
}

impl ServeConfig {
    /// The `host:port` address to bind.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
