//! src/proxy.rs
//! ============================================================================
//! # Reverse-proxy config generator
//!
//! Renders an nginx `server` block that fronts a remote site on a local port
//! and rewrites absolute links in its responses to relative ones, so a link
//! in the directory can point at `http://localhost:<port>` instead of the
//! upstream host.

use std::path::{Path, PathBuf};

use tracing::info;
use url::Url;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProxySpec {
    name: String,
    port: u16,
    target_url: String,
    /// `host[:port]` of the upstream.
    target_host: String,
    /// `scheme://host[:port]` of the upstream.
    target_base: String,
}

impl ProxySpec {
    pub fn new(name: &str, url: &str, port: u16) -> AppResult<Self> {
        validate_name(name)?;

        let parsed = Url::parse(url).map_err(|e| AppError::invalid_url(url, e.to_string()))?;
        let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(|| {
            AppError::invalid_url(url, "include a scheme (http/https) and a hostname")
        })?;

        let target_host = match parsed.port() {
            Some(p) => format!("{host}:{p}"),
            None => host.to_string(),
        };
        let target_base = format!("{}://{target_host}", parsed.scheme());

        Ok(Self {
            name: name.to_string(),
            port,
            target_url: url.to_string(),
            target_host,
            target_base,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn file_name(&self) -> String {
        format!("{}.conf", self.name)
    }

    pub fn render(&self) -> String {
        let Self {
            name,
            port,
            target_url,
            target_host,
            target_base,
        } = self;

        format!(
            r#"server {{
    listen {port};

    # Per-service logs
    access_log /var/log/nginx/{name}-proxy-access.log;
    error_log /var/log/nginx/{name}-proxy-error.log;

    location / {{
        # Upstream
        proxy_pass {target_url};

        # Proxy headers
        proxy_set_header Host {target_host};
        proxy_set_header X-Real-IP $remote_addr;
        proxy_set_header X-Forwarded-For $proxy_add_x_forwarded_for;
        proxy_set_header X-Forwarded-Proto $scheme;
        proxy_set_header Accept-Encoding ""; # uncompressed upstream bodies for sub_filter

        # Rewrite absolute links to relative ones
        sub_filter '{target_base}' '';
        sub_filter '//{target_host}' '';
        sub_filter_once off;
        sub_filter_types text/html text/css application/javascript;

        # Rewrite 3xx Location headers
        proxy_redirect {target_base}/ /;
    }}
}}"#
        )
    }

    /// Writes `<name>.conf` into `dir`, creating the directory when missing.
    pub fn write_to(&self, dir: &Path) -> AppResult<PathBuf> {
        if !dir.exists() {
            info!(dir = %dir.display(), "Creating proxy config output directory");
            std::fs::create_dir_all(dir).map_err(|e| AppError::output_io(dir, e))?;
        }

        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render()).map_err(|e| AppError::output_io(&path, e))?;
        info!(path = %path.display(), name = %self.name, "Proxy config written");
        Ok(path)
    }
}

fn validate_name(name: &str) -> AppResult<()> {
    if name.is_empty() {
        return Err(AppError::invalid_input("name", "must not be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::invalid_input(
            "name",
            "use only ASCII letters, digits, '-' and '_'",
        ));
    }
    Ok(())
}
