use crate::{DatabaseError, ErrorKind, Result};
use std::env;
use url::Url;

/// Per connection options.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionOptions {
    /// Client character set, for example `utf8`.
    pub charset: Option<String>,
}

/// Everything needed to open a connection.
///
/// For file based providers (sqlite) `database` is the path of the database
/// file (or `:memory:`) and the network fields are ignored.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub database: String,
    pub options: ConnectionOptions,
}

fn config_error(message: String) -> anyhow::Error {
    let error = DatabaseError::new(ErrorKind::Config, message);
    log::error!("{}", error);
    error.into()
}

impl ConnectionConfig {
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        database: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            database: database.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    /// Configuration of a file (or `:memory:`) database.
    pub fn file(path: impl Into<String>) -> Self {
        Self {
            database: path.into(),
            ..Default::default()
        }
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.options.charset = Some(charset.into());
        self
    }

    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` and
    /// `DB_CHARSET`. `DB_HOST` is mandatory.
    pub fn from_env() -> Result<Self> {
        let Ok(host) = env::var("DB_HOST") else {
            return Err(config_error(
                "Environment variable `DB_HOST` is not set".into(),
            ));
        };
        let var = |name: &str| env::var(name).unwrap_or_default();
        let port = match env::var("DB_PORT") {
            Ok(port) => Some(port.trim().parse::<u16>().map_err(|_| {
                config_error(format!("Environment variable `DB_PORT` is not a port: `{}`", port))
            })?),
            Err(..) => None,
        };
        Ok(Self {
            host,
            port,
            user: var("DB_USER"),
            password: var("DB_PASSWORD"),
            database: var("DB_NAME"),
            options: ConnectionOptions {
                charset: env::var("DB_CHARSET").ok().filter(|v| !v.is_empty()),
            },
        })
    }

    /// Connection url for `provider`, `<provider>://...`.
    pub fn to_url(&self, provider: &str) -> Result<String> {
        if let Some(charset) = &self.options.charset {
            if charset.is_empty()
                || !charset
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
            {
                return Err(config_error(format!("Invalid charset `{}`", charset)));
            }
        }
        let mut url = if provider == "sqlite" {
            if self.database.is_empty() {
                return Err(config_error(
                    "The sqlite provider needs the database file path".into(),
                ));
            }
            format!(
                "sqlite://{}",
                urlencoding::encode(&self.database)
                    .replace("%2F", "/")
                    .replace("%3A", ":")
            )
        } else {
            if self.host.is_empty() {
                return Err(config_error(format!(
                    "The {} provider needs a host",
                    provider
                )));
            }
            let mut url = Url::parse(&format!("{}://{}", provider, self.host)).map_err(|e| {
                config_error(format!("Invalid host `{}`: {}", self.host, e))
            })?;
            let invalid = |_| config_error(format!("Cannot build a {} url", provider));
            if !self.user.is_empty() {
                url.set_username(&urlencoding::encode(&self.user))
                    .map_err(invalid)?;
            }
            if !self.password.is_empty() {
                url.set_password(Some(&urlencoding::encode(&self.password)))
                    .map_err(invalid)?;
            }
            if self.port.is_some() {
                url.set_port(self.port).map_err(invalid)?;
            }
            url.set_path(&format!("/{}", urlencoding::encode(&self.database)));
            url.into()
        };
        if let Some(charset) = &self.options.charset {
            url.push_str("?charset=");
            url.push_str(charset);
        }
        Ok(url)
    }
}
