//! Issue tokens command

use colored::Colorize;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;
use crate::services::TrackingService;

pub fn issue_tokens(
    service: &TrackingService,
    config: &StaticConfig,
    identities: &[String],
) -> Result<(), CliError> {
    let batch = service.issue_many(identities);
    let base = config
        .tracking
        .public_base_url
        .as_deref()
        .map(|url| url.trim_end_matches('/'));

    for link in &batch.issued {
        let shown = match base {
            Some(base) => format!("{}{}/{}", base, config.routes.tracking_prefix, link.token),
            None => link.token.clone(),
        };
        println!(
            "{} {} -> {}",
            "✓".bold().green(),
            link.identity.as_str().cyan(),
            shown.blue().underline()
        );
    }

    for failure in &batch.failed {
        println!(
            "{} {} {}",
            "✗".bold().red(),
            failure.input.yellow(),
            format!("({})", failure.error).dimmed()
        );
    }

    if batch.issued.is_empty() {
        return Err(CliError::CommandError(
            "No valid identities were provided".to_string(),
        ));
    }
    Ok(())
}
