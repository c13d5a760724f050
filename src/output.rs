use clap::ValueEnum;
use colored::Colorize;

use crate::bootstrap::BootstrapReport;
use crate::error::Result;
use crate::migrations::{MigrationEvent, MigrationStep};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

/// Print one migration event. JSON mode writes one object per line.
pub fn print_event(event: &MigrationEvent, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(event)?),
        Format::Pretty => match event {
            MigrationEvent::Progress {
                step,
                total,
                description,
            } => println!("{} {}", format!("[{step}/{total}]").cyan().bold(), description),
            MigrationEvent::Success { warnings } => {
                for warning in warnings {
                    println!(
                        "{} {} ({}): {}",
                        "warn".yellow(),
                        warning.path.display(),
                        warning.step,
                        warning.reason
                    );
                }
                println!("{}", "migration complete".green().bold());
            }
            MigrationEvent::Failure { message } => {
                println!("{} {}", "migration failed:".red().bold(), message)
            }
        },
        Format::Minimal => match event {
            MigrationEvent::Progress { step, total, .. } => println!("{step}/{total}"),
            MigrationEvent::Success { warnings } => println!("ok {}", warnings.len()),
            MigrationEvent::Failure { message } => println!("failed {message}"),
        },
    }
    Ok(())
}

pub fn print_steps(version: &str, steps: &[&'static MigrationStep], format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let steps: Vec<_> = steps
                .iter()
                .enumerate()
                .map(|(index, step)| {
                    serde_json::json!({
                        "step": index + 1,
                        "id": step.id,
                        "description": step.description,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::json!({ "version": version, "steps": steps })
            );
        }
        Format::Pretty => {
            if steps.is_empty() {
                println!("{version}: nothing to migrate");
            }
            for (index, step) in steps.iter().enumerate() {
                println!("{:>2}. {} ({})", index + 1, step.description, step.id.dimmed());
            }
        }
        Format::Minimal => {
            for step in steps {
                println!("{}", step.id);
            }
        }
    }
    Ok(())
}

pub fn print_bootstrap(report: &BootstrapReport, format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string(report)?),
        Format::Pretty => {
            if let Some(ref version) = report.kept_studio_version {
                println!("  kept studio version {version}");
            }
            println!("  text files updated: {}", report.text_files_updated);
            println!("  maps stamped: {}", report.maps_stamped);
            for warning in &report.warnings {
                println!("{} {}: {}", "warn".yellow(), warning.path.display(), warning.reason);
            }
            println!("{}", "project configured".green().bold());
        }
        Format::Minimal => println!(
            "{} {} {}",
            report.text_files_updated,
            report.maps_stamped,
            report.warnings.len()
        ),
    }
    Ok(())
}
