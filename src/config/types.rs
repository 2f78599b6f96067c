//! The configuration structs used to build the AppConfig, and their impls.
use std::{net::SocketAddr, path::PathBuf, time::Duration};

use secrecy::SecretString;
use serde::Deserialize;
use strum_macros::AsRefStr;

use crate::config::ConfigError;

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub contact_config: ContactConfig,
    pub download_config: DownloadConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
    /// Origins allowed to call the API from a browser, e.g. where the landing page is hosted.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// The mailing-list API the contacts are forwarded to.
#[derive(Deserialize, Clone, Debug)]
pub struct ContactConfig {
    pub url: String,
    pub auth_token: SecretString,
    /// Lists every new contact gets added to.
    #[serde(default)]
    pub list_ids: Vec<u64>,
    pub timeout_millis: u64,
}

/// The file handed out in exchange for a contact.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DownloadConfig {
    pub dir: PathBuf,
    pub file_name: String,
    pub display_name: String,
    pub file_size: String,
    pub content_type: String,
}

// ###################################
// ->   IMPLs
// ###################################
impl NetConfig {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.app_port))
    }
}

impl ContactConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

impl DownloadConfig {
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Where the backend serves the file, relative to the landing page.
    pub fn file_url(&self) -> String {
        format!("files/{}", self.file_name)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################
