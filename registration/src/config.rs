use clap::Parser;
use reqwest::Url;
use std::path::PathBuf;

/// A TUI for registering new users
#[derive(Debug, Parser)]
#[clap(version)]
pub struct Config {
    /// Where to send registrations. We POST directly to this address.
    #[clap(long, env)]
    pub api_uri: Url,

    /// Where "enter the system" takes you after a successful registration
    #[clap(long, env)]
    pub web_uri: Url,

    /// Where should we write logs?
    #[clap(long, env)]
    log_dir: Option<PathBuf>,

    /// Also show results as desktop notifications
    #[clap(long, env)]
    pub desktop_notifications: bool,
}

impl Config {
    /// Get either the configured or a default log directory. If no data
    /// directory can be found (e.g. because `$HOME` is unset) we will use the
    /// current directory.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .or_else(|| {
                directories::ProjectDirs::from("", "", "registration")
                    .map(|dirs| dirs.data_local_dir().join("logs"))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_addresses() {
        let config = Config::try_parse_from([
            "registration",
            "--api-uri",
            "https://api.empresa.com/users/register",
            "--web-uri",
            "https://app.empresa.com",
            "--log-dir",
            "/tmp/registration",
        ])
        .unwrap();

        assert_eq!(config.api_uri.path(), "/users/register");
        assert_eq!(config.web_uri.host_str(), Some("app.empresa.com"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/registration"));
        assert!(!config.desktop_notifications);
    }

    #[test]
    fn rejects_bad_addresses() {
        let result = Config::try_parse_from([
            "registration",
            "--api-uri",
            "not a url",
            "--web-uri",
            "https://app.empresa.com",
        ]);

        assert!(result.is_err());
    }
}
