//! Config file handling: YAML loading, validation, and scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use webfuzz::RunConfig;

pub const DEFAULT_CONFIG_FILE: &str = "webfuzz.yaml";

/// A starting configuration with every section shown.
const TEMPLATE: &str = r##"# webfuzz configuration
baseUrl: "http://localhost:3000"

# Trials per check.
numRuns: 50

# Per-action timeout in milliseconds.
timeout: 5000

paths:
  include:
    - "/"
  exclude: []
    # - "/admin/**"
    # - "/logout"

# Forms to fuzz and rapid-click.
forms: []
  # - path: "/contact"
  #   selector: "#contact-form"
  #   submit: "#contact-form button[type=submit]"

# Extra rapid-click targets.
buttons: []
  # - path: "/vote"
  #   selector: "#vote-up"

checks:
  noServerError: true
  formFuzzing: true
  queryParamFuzzing: true
  historyNavigation: true
  rapidClick: true
  reloadStateRestore: false

checkOptions:
  rapidClick:
    maxClicks: 10
"##;

/// Load and validate a config file, or fall back to defaults when the
/// default file is simply absent.
pub fn load(path: &Path, explicit: bool) -> Result<RunConfig> {
    if !path.exists() {
        if explicit {
            bail!("config file not found: {}", path.display());
        }
        return Ok(RunConfig::default());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config: RunConfig = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    validated(config)
}

/// Reject a config with problems, listing every one of them.
pub fn validated(config: RunConfig) -> Result<RunConfig> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(config)
    } else {
        bail!("invalid configuration:\n  - {}", errors.join("\n  - "));
    }
}

/// Write the starter config. Refuses to clobber an existing file.
pub fn init(path: &Path) -> Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    fs::write(path, TEMPLATE).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
