//! Generate config command

use std::path::Path;

use colored::Colorize;

use crate::config::StaticConfig;
use crate::interfaces::cli::CliError;

/// Generate example configuration file, or print it when no path is given
pub fn generate_config(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let sample = StaticConfig::generate_sample_config();

    let Some(path) = output_path else {
        println!("{}", sample);
        return Ok(());
    };

    if Path::new(&path).exists() && !force {
        return Err(CliError::CommandError(format!(
            "{} already exists, use --force to overwrite",
            path
        )));
    }

    println!(
        "{} {}",
        "Generating configuration file...".yellow(),
        path.blue()
    );

    std::fs::write(&path, sample).map_err(|e| {
        CliError::CommandError(format!("Unable to write configuration file: {}", e))
    })?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {} {}",
        "Set tracking.secret_key before starting the service".yellow(),
        "🔧".blue()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path_str = path.to_string_lossy().to_string();

        generate_config(Some(path_str.clone()), false).unwrap();
        assert!(path.exists());
        assert!(generate_config(Some(path_str.clone()), false).is_err());
        generate_config(Some(path_str), true).unwrap();
    }
}
