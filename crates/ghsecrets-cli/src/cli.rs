//! CLI structure and argument definitions.

use clap::Parser;
use ghsecrets_core::Inputs;

#[derive(Parser, Debug, Default)]
#[command(name = "ghsecrets")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Encrypt and upload a GitHub Actions secret", long_about = None)]
pub struct Cli {
    /// Secret name
    #[arg(long, env = "INPUT_NAME")]
    pub name: Option<String>,

    /// Secret value (may be empty)
    #[arg(long, env = "INPUT_VALUE", hide_env_values = true, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Repository owner
    #[arg(long, env = "INPUT_OWNER")]
    pub owner: Option<String>,

    /// Repository name, or owner/repo
    #[arg(long, env = "INPUT_REPOSITORY")]
    pub repository: Option<String>,

    /// Token with permission to write secrets
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Organization: `true` for the owner, or an organization login
    #[arg(long, env = "INPUT_ORG")]
    pub org: Option<String>,

    /// Organization secret visibility: all, private or selected
    #[arg(long, env = "INPUT_VISIBILITY")]
    pub visibility: Option<String>,

    /// Repository ids for `selected` visibility
    #[arg(long, env = "INPUT_SELECTED_REPOSITORY_IDS")]
    pub selected_repository_ids: Option<String>,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    /// Log format: pretty, compact or json
    #[arg(long, env = "INPUT_LOG_FORMAT")]
    pub log_format: Option<String>,

    /// Enable debug output
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// Inputs given on the command line.
    pub fn inputs(&self) -> Inputs {
        Inputs {
            name: self.name.clone(),
            value: self.value.clone(),
            owner: self.owner.clone(),
            repository: self.repository.clone(),
            token: self.token.clone(),
            org: self.org.clone(),
            visibility: self.visibility.clone(),
            selected_repository_ids: self.selected_repository_ids.clone(),
            api_url: self.api_url.clone(),
            github_repository: None,
            log_format: self.log_format.clone(),
            debug: self.debug.then_some(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_map_to_inputs() {
        let cli = Cli::try_parse_from([
            "ghsecrets",
            "--name",
            "API_KEY",
            "--value",
            "-starts-with-dash",
            "--repository",
            "acme/widgets",
            "--token",
            "t0ken",
            "--org",
            "true",
            "--visibility",
            "selected",
            "--selected-repository-ids",
            "111,222",
            "--debug",
        ])
        .unwrap();

        let inputs = cli.inputs();
        assert_eq!(inputs.name.as_deref(), Some("API_KEY"));
        assert_eq!(inputs.value.as_deref(), Some("-starts-with-dash"));
        assert_eq!(inputs.repository.as_deref(), Some("acme/widgets"));
        assert_eq!(inputs.org.as_deref(), Some("true"));
        assert_eq!(inputs.selected_repository_ids.as_deref(), Some("111,222"));
        assert_eq!(inputs.debug, Some(true));
        assert!(inputs.github_repository.is_none());
    }

    #[test]
    fn test_unset_debug_does_not_override() {
        let inputs = Cli::default().inputs();
        assert!(inputs.debug.is_none());

        let base = Inputs { debug: Some(true), ..Default::default() };
        assert_eq!(base.overlay(inputs).debug, Some(true));
    }
}
