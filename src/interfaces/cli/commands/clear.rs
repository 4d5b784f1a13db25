//! Clear ledger command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::TrackingService;

pub async fn clear_ledger(service: &TrackingService, confirmed: bool) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::CommandError(
            "Refusing to clear the ledger without --yes".to_string(),
        ));
    }

    let removed = service
        .clear_all()
        .await
        .map_err(|e| CliError::StorageError(format!("Failed to clear ledger: {}", e)))?;

    println!(
        "{} Deleted {} records",
        "✓".bold().green(),
        removed.to_string().yellow()
    );
    Ok(())
}
