use std::path::PathBuf;

use color_eyre::eyre::{Context, Result, eyre};
use url::Url;

/// Connection settings for the Navidrome server, as given on the command line
/// or through the environment.
#[derive(Debug, Clone, clap::Args)]
pub struct NavidromeArgs {
    /// Navidrome base URL, e.g. http://localhost:4533
    #[arg(long, env = "NAVI_URL", global = true)]
    pub navi_url: Option<String>,

    /// Navidrome username
    #[arg(long, env = "NAVI_USER", global = true)]
    pub navi_user: Option<String>,

    /// Navidrome password
    #[arg(long, env = "NAVI_PASS", global = true, hide_env_values = true)]
    pub navi_pass: Option<String>,
}

/// Validated Navidrome settings. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct NavidromeConfig {
    pub base_url: Url,
    pub user: String,
    pub password: String,
}

impl NavidromeConfig {
    pub fn from_args(args: NavidromeArgs) -> Result<Self> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let url = non_empty(args.navi_url);
        let user = non_empty(args.navi_user);
        let password = non_empty(args.navi_pass);

        let (Some(url), Some(user), Some(password)) = (url.clone(), user.clone(), password.clone())
        else {
            let missing: Vec<&str> = [
                ("NAVI_URL", url.is_none()),
                ("NAVI_USER", user.is_none()),
                ("NAVI_PASS", password.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect();
            return Err(eyre!(
                "Missing Navidrome settings: {}. Set them in the environment or pass them as flags",
                missing.join(", ")
            ));
        };

        let url = url.trim().trim_end_matches('/');
        let base_url =
            Url::parse(url).wrap_err_with(|| format!("Invalid NAVI_URL: {}", url))?;

        Ok(Self {
            base_url,
            user,
            password,
        })
    }

    /// Base URL as configured, without a trailing slash.
    pub fn server_url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }
}

/// Resolves the directory holding the web frontend.
///
/// Defaults to `web` next to the executable, then `./web` for runs from the
/// project root.
pub fn resolve_web_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }

    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("web")));
    match beside_exe {
        Some(dir) if dir.is_dir() => dir,
        _ => PathBuf::from("web"),
    }
}
