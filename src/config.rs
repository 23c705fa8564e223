use std::{
    net::{Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
};

use figment::{
    Figment,
    providers::{Env, Format, Json},
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::error::{BoardError, ConfigSnafu};

pub const DEFAULT_PORT: u16 = 5555;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BoardCfg {
    /// Address the HTTP listener binds to
    pub bind: SocketAddr,
    /// Indent JSON responses instead of emitting them on one line
    pub pretty_json: bool,
    /// Fallback tracing filter, used when `RUST_LOG` is unset
    pub log_filter: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl Default for BoardCfg {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            pretty_json: true,
            log_filter: "info".to_string(),
            path: PathBuf::new(),
        }
    }
}

impl BoardCfg {
    /// Reads the JSON file at `path` and layers `MESSAGE_BOARD_*` variables
    /// on top. A missing file yields the defaults.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        Ok(Self {
            path: path.as_ref().to_owned(),
            ..Figment::new()
                .merge(Json::file(path))
                .merge(Env::prefixed("MESSAGE_BOARD_"))
                .extract_lossy()
                .context(ConfigSnafu)?
        })
    }
}
