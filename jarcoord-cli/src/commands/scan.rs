//! Scan command - recover coordinates without installing anything.

use std::path::PathBuf;

use jarcoord::resolver::BatchItem;
use serde_json::{json, Value};
use tracing::info;

use super::common::{recovery_failure_line, recovery_line};
use crate::error::CliError;
use crate::runner::CliRunner;

/// Arguments for the scan command.
pub struct ScanArgs {
    pub paths: Vec<PathBuf>,
    pub json: bool,
    pub jobs: Option<usize>,
}

/// Run the scan command.
pub fn run(args: ScanArgs) -> Result<(), CliError> {
    let runner = CliRunner::new()?;
    runner.log_startup("scan");

    let discovery = runner.discover(&args.paths)?;
    let resolver = runner.resolver();
    let items = runner.recover_all(&resolver, &discovery.archives, args.jobs)?;

    if args.json {
        let report = json_report(&items);
        let text = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Config(format!("failed to render JSON: {}", e)))?;
        println!("{}", text);
    } else {
        for item in &items {
            match &item.result {
                Ok(recovery) => println!("{}", recovery_line(recovery)),
                Err(e) => eprintln!("{}", recovery_failure_line(e)),
            }
        }
    }

    let failed = items.iter().filter(|item| item.result.is_err()).count();
    info!(total = items.len(), failed, "Scan finished");

    if failed > 0 {
        return Err(CliError::Incomplete {
            failed,
            total: items.len(),
        });
    }
    Ok(())
}

/// One JSON object per archive, failures carrying an `error` message.
fn json_report(items: &[BatchItem]) -> Value {
    let entries = items
        .iter()
        .map(|item| match &item.result {
            Ok(recovery) => serde_json::to_value(recovery).unwrap_or_else(|e| {
                json!({ "path": item.path.display().to_string(), "error": e.to_string() })
            }),
            Err(e) => json!({ "path": item.path.display().to_string(), "error": e.to_string() }),
        })
        .collect();
    Value::Array(entries)
}
