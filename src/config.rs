use std::env;
use std::path::PathBuf;
use std::time::Duration;

use dotenvy::dotenv;

use crate::error::{Error, Result};

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;
const DEFAULT_LOG_DIR: &str = "logs";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the school REST backend, without a trailing slash.
    pub api_base_url: String,
    pub api_token: Option<String>,
    /// Signed-in student, used when a student reviews their own quiz.
    pub student_id: Option<String>,
    pub http_timeout: Duration,
    pub log_dir: PathBuf,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_api_url(None)
    }

    /// Like [`Config::from_env`], with `api_url` taking the place of
    /// `SCHOOL_API_URL` when given.
    pub fn from_env_with_api_url(api_url: Option<&str>) -> Result<Self> {
        dotenv().ok();
        Self::from_lookup(api_url_override(|name| env::var(name).ok(), api_url))
    }

    /// Build a config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = get_var(&lookup, "SCHOOL_API_URL")?;
        let http_timeout_secs = match lookup("SCHOOL_HTTP_TIMEOUT_SECS") {
            Some(raw) => parse_var("SCHOOL_HTTP_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url),
            api_token: lookup("SCHOOL_API_TOKEN").filter(|t| !t.trim().is_empty()),
            student_id: lookup("SCHOOL_STUDENT_ID").filter(|s| !s.trim().is_empty()),
            http_timeout: Duration::from_secs(http_timeout_secs),
            log_dir: lookup("SCHOOL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
            log_filter: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

}

fn api_url_override<'a, F>(
    lookup: F,
    api_url: Option<&'a str>,
) -> impl Fn(&str) -> Option<String> + 'a
where
    F: Fn(&str) -> Option<String> + 'a,
{
    move |name| match (name, api_url) {
        ("SCHOOL_API_URL", Some(url)) => Some(url.to_string()),
        _ => lookup(name),
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn get_var<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("Missing environment variable: {}", name)))
}

fn parse_var<T>(name: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_apply() {
        let config = Config::from_lookup(lookup_from(&[("SCHOOL_API_URL", "http://school.test/api/")]))
            .unwrap();

        assert_eq!(config.api_base_url, "http://school.test/api");
        assert_eq!(config.http_timeout, Duration::from_secs(15));
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_filter, "info");
        assert!(config.api_token.is_none());
        assert!(config.student_id.is_none());
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("SCHOOL_API_URL")));
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let err = Config::from_lookup(lookup_from(&[
            ("SCHOOL_API_URL", "http://school.test"),
            ("SCHOOL_HTTP_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("SCHOOL_HTTP_TIMEOUT_SECS")));
    }

    #[test]
    fn test_api_url_override_without_env_url() {
        let lookup = api_url_override(lookup_from(&[]), Some("http://cli.test/api/"));
        let config = Config::from_lookup(lookup).unwrap();
        assert_eq!(config.api_base_url, "http://cli.test/api");
    }

    #[test]
    fn test_api_url_override_beats_env_url() {
        let env = lookup_from(&[
            ("SCHOOL_API_URL", "http://env.test"),
            ("SCHOOL_STUDENT_ID", "s-3"),
        ]);
        let config =
            Config::from_lookup(api_url_override(env, Some("http://cli.test"))).unwrap();
        assert_eq!(config.api_base_url, "http://cli.test");
        assert_eq!(config.student_id.as_deref(), Some("s-3"));

        let env = lookup_from(&[("SCHOOL_API_URL", "http://env.test")]);
        let config = Config::from_lookup(api_url_override(env, None)).unwrap();
        assert_eq!(config.api_base_url, "http://env.test");
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let config = Config::from_lookup(lookup_from(&[
            ("SCHOOL_API_URL", "http://school.test"),
            ("SCHOOL_API_TOKEN", "  "),
            ("SCHOOL_STUDENT_ID", "s-12"),
        ]))
        .unwrap();
        assert!(config.api_token.is_none());
        assert_eq!(config.student_id.as_deref(), Some("s-12"));
    }
}
