use std::path::PathBuf;

use tracing::warn;

const DEFAULT_PORT: u16 = 8080;

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub base_dir: PathBuf,
    pub uploads_dir: PathBuf,
}

impl Config {
    pub fn load() -> Self {
        Self::from_args(std::env::args().skip(1))
    }

    /// Builds a config from CLI arguments. The only argument is an optional
    /// listening port, which must be an integer above 1024; anything else
    /// falls back to the default port with a diagnostic.
    pub fn from_args(mut args: impl Iterator<Item = String>) -> Self {
        let port = match args.next() {
            Some(raw) => match raw.parse::<u16>() {
                Ok(p) if p > 1024 => p,
                Ok(p) => {
                    warn!("Port {} is not above 1024, using default {}", p, DEFAULT_PORT);
                    DEFAULT_PORT
                }
                Err(_) => {
                    warn!("Invalid port {:?}, using default {}", raw, DEFAULT_PORT);
                    DEFAULT_PORT
                }
            },
            None => DEFAULT_PORT,
        };

        Self {
            port,
            base_dir: PathBuf::from("."),
            uploads_dir: PathBuf::from("./uploads"),
        }
    }
}
