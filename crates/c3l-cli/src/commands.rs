use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::json;

use c3l_core::{merge, Linearization, LinearizerConfig};
use c3l_hierarchy::{Hierarchy, HierarchyFile};
use c3l_types::ClassName;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Linearize(args) => println!("{}", cmd_linearize(&cli, args)?),
        Command::Check(args) => {
            let report = cmd_check(&cli, args)?;
            println!("{}", report.output);
            if report.failed > 0 {
                bail!("{} of {} classes have no consistent linearization", report.failed, report.total);
            }
        }
        Command::Merge(args) => println!("{}", cmd_merge(&cli, args)?),
        Command::Common(args) => println!("{}", cmd_common(&cli, args)?),
        Command::Show(args) => println!("{}", cmd_show(&cli, args)?),
    }
    Ok(())
}

fn load(cli: &Cli, path: &Path) -> anyhow::Result<(Hierarchy, LinearizerConfig)> {
    let file = HierarchyFile::load(path)
        .with_context(|| format!("failed to load hierarchy from {}", path.display()))?;
    let hierarchy = file
        .build()
        .with_context(|| format!("invalid hierarchy in {}", path.display()))?;
    Ok((hierarchy, cli.linearizer_config(&file.config)))
}

fn names(order: &[ClassName]) -> Vec<&str> {
    order.iter().map(ClassName::as_str).collect()
}

fn render_order(order: &Linearization<ClassName>) -> String {
    let rest = names(order.ancestors());
    if rest.is_empty() {
        return order.node().as_str().bold().to_string();
    }
    format!("{}, {}", order.node().as_str().bold(), rest.join(", "))
}

fn cmd_linearize(cli: &Cli, args: &LinearizeArgs) -> anyhow::Result<String> {
    let (hierarchy, config) = load(cli, &args.file)?;
    let order = hierarchy.linearize_with(&args.class, &config)?;
    Ok(match cli.format {
        OutputFormat::Text => render_order(&order),
        OutputFormat::Json => json!({
            "class": args.class,
            "linearization": names(order.as_slice()),
        })
        .to_string(),
    })
}

struct CheckReport {
    output: String,
    failed: usize,
    total: usize,
}

fn cmd_check(cli: &Cli, args: &CheckArgs) -> anyhow::Result<CheckReport> {
    let (hierarchy, config) = load(cli, &args.file)?;
    let results = hierarchy.linearize_all(&config);
    let total = results.len();
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();

    let output = match cli.format {
        OutputFormat::Text => {
            let width = results.iter().map(|(n, _)| n.as_str().len()).max().unwrap_or(0);
            let mut lines: Vec<String> = results
                .iter()
                .map(|(name, result)| match result {
                    Ok(order) => format!(
                        "{} {:width$}  {}",
                        "✓".green(),
                        name.as_str(),
                        names(order.as_slice()).join(", ")
                    ),
                    Err(err) => format!("{} {:width$}  {}", "✗".red(), name.as_str(), err.to_string().red()),
                })
                .collect();
            let summary = format!("{total} classes, {failed} failed");
            lines.push(if failed == 0 { summary.green().to_string() } else { summary.red().bold().to_string() });
            lines.join("\n")
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = results
                .iter()
                .map(|(name, result)| match result {
                    Ok(order) => json!({
                        "class": name.as_str(),
                        "ok": true,
                        "linearization": names(order.as_slice()),
                    }),
                    Err(err) => json!({
                        "class": name.as_str(),
                        "ok": false,
                        "error": err.to_string(),
                    }),
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };

    Ok(CheckReport { output, failed, total })
}

fn parse_sequence(raw: &str) -> anyhow::Result<Vec<ClassName>> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| ClassName::new(item).with_context(|| format!("bad sequence {raw:?}")))
        .collect()
}

fn cmd_merge(cli: &Cli, args: &MergeArgs) -> anyhow::Result<String> {
    let sequences = args
        .sequences
        .iter()
        .map(|raw| parse_sequence(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let merged = merge(&sequences)?;
    Ok(match cli.format {
        OutputFormat::Text => names(&merged).join(", "),
        OutputFormat::Json => json!(names(&merged)).to_string(),
    })
}

fn cmd_common(cli: &Cli, args: &CommonArgs) -> anyhow::Result<String> {
    let (hierarchy, config) = load(cli, &args.file)?;
    let common = hierarchy.common_ancestor_with(&args.a, &args.b, &config)?;
    Ok(match cli.format {
        OutputFormat::Text => match common {
            Some(name) => name.as_str().bold().to_string(),
            None => format!("{} and {} share no ancestor", args.a.yellow(), args.b.yellow()),
        },
        OutputFormat::Json => json!({
            "a": args.a,
            "b": args.b,
            "common": common.as_ref().map(ClassName::as_str),
        })
        .to_string(),
    })
}

fn cmd_show(cli: &Cli, args: &ShowArgs) -> anyhow::Result<String> {
    let (hierarchy, _) = load(cli, &args.file)?;
    Ok(match cli.format {
        OutputFormat::Text => {
            let mut lines = Vec::with_capacity(hierarchy.len());
            for class in hierarchy.classes() {
                let mut line = class.summary().bold().to_string();
                if let Some(description) = &class.metadata.description {
                    line.push_str(&format!("  {}", description.dimmed()));
                }
                if !class.metadata.tags.is_empty() {
                    line.push_str(&format!("  [{}]", class.metadata.tags.join(", ").cyan()));
                }
                lines.push(line);
            }
            if lines.is_empty() {
                "No classes declared.".to_string()
            } else {
                lines.join("\n")
            }
        }
        OutputFormat::Json => {
            let classes: Vec<_> = hierarchy.classes().collect();
            serde_json::to_string_pretty(&classes)?
        }
    })
}
