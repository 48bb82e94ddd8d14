//! Transaction export command

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cashminder_core::export::export_transactions;
use cashminder_core::{Database, ExportFormat, Ledger};

pub fn cmd_export(
    ledger: &Ledger<Database>,
    format: ExportFormat,
    output: Option<&Path>,
) -> Result<()> {
    let transactions = ledger.transactions()?;
    let categories = ledger.categories()?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let count = export_transactions(&mut writer, format, &transactions, &categories)
                .context("Failed to export transactions")?;
            writer.flush()?;
            println!("✅ Exported {} transactions to {}", count, path.display());
        }
        None => {
            let stdout = io::stdout();
            export_transactions(stdout.lock(), format, &transactions, &categories)
                .context("Failed to export transactions")?;
            if format == ExportFormat::Json {
                println!();
            }
        }
    }

    Ok(())
}
