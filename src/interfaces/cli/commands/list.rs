//! List ledger records command

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::TrackingService;

pub async fn list_records(service: &TrackingService, json: bool) -> Result<(), CliError> {
    let records = service
        .list_all()
        .await
        .map_err(|e| CliError::StorageError(format!("Failed to load records: {}", e)))?;

    if json {
        let output = serde_json::to_string_pretty(&records)
            .map_err(|e| CliError::CommandError(format!("Failed to serialize records: {}", e)))?;
        println!("{}", output);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} No visits recorded", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Ledger records:".bold().green());
    println!();
    for record in &records {
        let mut info_parts = vec![
            record.identity.cyan().to_string(),
            format!("(visits: {})", record.visit_count())
                .dimmed()
                .cyan()
                .to_string(),
            format!(
                "(first seen: {})",
                record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            )
            .dimmed()
            .to_string(),
        ];

        if let Some(last) = record.last_visit() {
            let mut last_info = format!(
                "last: {}",
                last.occurred_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            if let Some(ip) = &last.source_address {
                last_info.push_str(&format!(" from {}", ip));
            }
            info_parts.push(format!("({})", last_info).dimmed().yellow().to_string());
        }

        println!("  {}", info_parts.join(" "));
    }
    println!();
    println!(
        "{} Total {} records",
        "ℹ".bold().blue(),
        records.len().to_string().green()
    );
    Ok(())
}
