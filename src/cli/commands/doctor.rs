//! Doctor command - verify configuration, the embedding store, and Ollama.

use crate::cli::Output;
use crate::config::Settings;
use crate::store::EmbeddingStore;
use console::style;
use std::time::Duration;

/// Timeout for the Ollama reachability probe.
const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings) -> anyhow::Result<()> {
    Output::header("Svar Doctor");
    println!();
    println!("Checking configuration and services...\n");

    let mut checks = Vec::new();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file();
    config_check.print();
    checks.push(config_check);

    println!();

    println!("{}", style("Embedding Store").bold());
    let store_check = check_store(settings);
    store_check.print();
    checks.push(store_check);

    println!();

    println!("{}", style("Ollama").bold());
    let ollama_check = check_ollama(settings).await;
    ollama_check.print();
    checks.push(ollama_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Svar.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Svar is ready to use.");
    }

    Ok(())
}

/// Check if the config file exists.
fn check_config_file() -> CheckResult {
    let config_path = Settings::default_config_path();
    if config_path.exists() {
        CheckResult::ok("Config file", &format!("{}", config_path.display()))
    } else {
        CheckResult::warning(
            "Config file",
            "using defaults",
            "Create one with: svar config show > config.toml",
        )
    }
}

/// Check that the embedding store loads and report its shape.
fn check_store(settings: &Settings) -> CheckResult {
    let path = settings.store_path();
    match EmbeddingStore::load(&path) {
        Ok(store) => CheckResult::ok(
            "Embedding store",
            &format!(
                "{} ({} chunks, {} dimensions)",
                path.display(),
                store.len(),
                store.dimensions()
            ),
        ),
        Err(e) => CheckResult::error(
            "Embedding store",
            &format!("{}", e),
            "The store is produced by the external indexing pipeline; check [store] path",
        ),
    }
}

/// Probe the Ollama base URL with a short timeout.
async fn check_ollama(settings: &Settings) -> CheckResult {
    let base_url = &settings.ollama.base_url;

    let client = match reqwest::Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            return CheckResult::error(
                "Ollama",
                &format!("failed to build probe client: {}", e),
                "This is a local environment problem, not an Ollama one",
            )
        }
    };

    match client.get(base_url).send().await {
        Ok(response) if response.status().is_success() => CheckResult::ok(
            "Ollama",
            &format!("reachable at {}", base_url),
        ),
        Ok(response) => CheckResult::warning(
            "Ollama",
            &format!("{} answered with status {}", base_url, response.status()),
            "Check that the URL points at an Ollama instance",
        ),
        Err(e) => CheckResult::error(
            "Ollama",
            &format!("not reachable at {}: {}", base_url, e),
            "Start it with: ollama serve",
        ),
    }
}
