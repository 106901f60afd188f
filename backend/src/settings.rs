//! Process settings read from the environment.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use mockable::Env;

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const PORT_ENV: &str = "PORT";
const BIND_HOST_ENV: &str = "BIND_HOST";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Settings required to start the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
}

/// Startup configuration errors. Each one is fatal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// A required variable is unset or blank.
    #[error("missing required environment variable: {name}")]
    MissingEnv {
        /// Variable name.
        name: &'static str,
    },
    /// A variable is present but unparseable.
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        /// Variable name.
        name: &'static str,
        /// Raw value as read.
        value: String,
        /// Accepted forms.
        expected: &'static str,
    },
}

impl AppSettings {
    /// Read `DATABASE_URL`, `PORT` (default 3000) and `BIND_HOST` (default
    /// `0.0.0.0`).
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::MissingEnv`] when `DATABASE_URL` is unset or
    /// blank, and [`SettingsError::InvalidEnv`] when `PORT` or `BIND_HOST`
    /// does not parse.
    ///
    /// # Examples
    /// ```
    /// use mockable::MockEnv;
    /// use quill::settings::AppSettings;
    ///
    /// let mut env = MockEnv::new();
    /// env.expect_string().returning(|name| match name {
    ///     "DATABASE_URL" => Some("postgres://localhost/blog".to_owned()),
    ///     _ => None,
    /// });
    ///
    /// let settings = AppSettings::from_env(&env).expect("settings");
    /// assert_eq!(settings.bind_addr.port(), 3000);
    /// ```
    pub fn from_env<E: Env>(env: &E) -> Result<Self, SettingsError> {
        let database_url = env
            .string(DATABASE_URL_ENV)
            .filter(|value| !value.trim().is_empty())
            .ok_or(SettingsError::MissingEnv {
                name: DATABASE_URL_ENV,
            })?;

        let port = match env.string(PORT_ENV) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: PORT_ENV,
                    value,
                    expected: "a TCP port number",
                })?,
            None => DEFAULT_PORT,
        };

        let host = match env.string(BIND_HOST_ENV) {
            Some(value) => value
                .trim()
                .parse::<IpAddr>()
                .map_err(|_| SettingsError::InvalidEnv {
                    name: BIND_HOST_ENV,
                    value,
                    expected: "an IP address",
                })?,
            None => DEFAULT_HOST,
        };

        Ok(Self {
            database_url,
            bind_addr: SocketAddr::new(host, port),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use mockable::MockEnv;
    use rstest::rstest;

    use super::*;

    fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_apply() {
        let env = mock_env(&[(DATABASE_URL_ENV, "postgres://db/blog")]);
        let settings = AppSettings::from_env(&env).expect("settings");

        assert_eq!(settings.database_url, "postgres://db/blog");
        assert_eq!(
            settings.bind_addr,
            SocketAddr::new(DEFAULT_HOST, DEFAULT_PORT)
        );
    }

    #[rstest]
    fn overrides_host_and_port() {
        let env = mock_env(&[
            (DATABASE_URL_ENV, "postgres://db/blog"),
            (PORT_ENV, "8080"),
            (BIND_HOST_ENV, "127.0.0.1"),
        ]);
        let settings = AppSettings::from_env(&env).expect("settings");
        assert_eq!(settings.bind_addr.to_string(), "127.0.0.1:8080");
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(DATABASE_URL_ENV, "   ")])]
    fn database_url_is_required(#[case] vars: &[(&str, &str)]) {
        let env = mock_env(vars);
        assert_eq!(
            AppSettings::from_env(&env),
            Err(SettingsError::MissingEnv {
                name: DATABASE_URL_ENV
            })
        );
    }

    #[rstest]
    #[case(PORT_ENV, "http")]
    #[case(PORT_ENV, "70000")]
    #[case(BIND_HOST_ENV, "localhost:80")]
    fn invalid_values_are_rejected(#[case] name: &'static str, #[case] value: &str) {
        let env = mock_env(&[(DATABASE_URL_ENV, "postgres://db/blog"), (name, value)]);
        assert!(matches!(
            AppSettings::from_env(&env),
            Err(SettingsError::InvalidEnv { name: got, .. }) if got == name
        ));
    }
}
