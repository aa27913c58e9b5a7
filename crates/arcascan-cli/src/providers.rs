//! `arcascan providers` — list the supported providers.

use anyhow::Result;
use colored::Colorize;

use arcascan_core::config::{load_config, Config};
use arcascan_providers::PROVIDERS;

/// One line per provider: id, name, resolved model and endpoint.
fn provider_lines(config: &Config) -> Vec<String> {
    PROVIDERS
        .iter()
        .map(|spec| {
            let settings = spec.resolve(config.providers.get(spec.kind));
            format!(
                "{:<8} {:<10} {:<28} {}",
                spec.kind.as_str(),
                spec.display_name,
                settings.model,
                settings.api_base
            )
        })
        .collect()
}

/// Run the providers command.
pub fn run() -> Result<()> {
    let config = load_config(None);

    println!();
    println!("{}", "🎯 Provedores de IA".cyan().bold());
    println!();
    for (line, spec) in provider_lines(&config).iter().zip(PROVIDERS) {
        let default = if spec.kind == config.defaults.provider {
            " (padrão)".green().to_string()
        } else {
            String::new()
        };
        println!("  {line}{default}");
        println!(
            "  {:<8} {}",
            "",
            format!("chave: {} · env: {}", spec.key_url, spec.env_key).dimmed()
        );
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcascan_core::types::ProviderKind;

    #[test]
    fn lists_all_three_in_order() {
        let lines = provider_lines(&Config::default());
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("claude"));
        assert!(lines[1].starts_with("gpt"));
        assert!(lines[2].starts_with("gemini"));
    }

    #[test]
    fn shows_configured_model() {
        let mut config = Config::default();
        config.providers.get_mut(ProviderKind::Gpt).model = Some("gpt-4o".into());
        let lines = provider_lines(&config);
        assert!(lines[1].contains("gpt-4o"));
        assert!(lines[1].contains("https://api.openai.com/v1"));
    }
}
