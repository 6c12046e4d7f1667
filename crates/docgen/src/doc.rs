use std::io::{self, Write};

use camino::Utf8PathBuf;
use colored::Colorize;
use common::paths::display_relative;
use doc_engine::{DocExtractor, DocgenConfig, DocsData, DocsError};

use crate::Options;

fn fail(error: &DocsError) -> ! {
    eprintln!("{} {error}", "Error:".red().bold());
    std::process::exit(1);
}

pub async fn generate_docs(opts: &Options) {
    let root = &opts.root;
    let mut config = DocgenConfig::load(root).unwrap_or_else(|e| fail(&e));
    if let Some(strategy) = opts.strategy {
        config.strategy = strategy;
    }

    let output = opts.out.clone().unwrap_or_else(|| config.output.clone());
    let output: Utf8PathBuf = if output.is_absolute() {
        output
    } else {
        root.join(output)
    };

    let extractor = DocExtractor::new(root.clone(), config);
    let data = extractor.extract().await.unwrap_or_else(|e| fail(&e));

    if opts.stdout {
        match data.to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(e) => fail(&DocsError::json(output, e)),
        }
    } else {
        data.write(&output).unwrap_or_else(|e| fail(&e));
        println!(
            "{} {} entries to {}",
            "Wrote".green().bold(),
            data.len(),
            display_relative(root, &output)
        );
    }

    // Keep stdout pure JSON when it carries the artifact.
    let printed = if opts.stdout {
        report(&mut io::stderr().lock(), opts, &data)
    } else {
        report(&mut io::stdout().lock(), opts, &data)
    };
    if let Err(e) = printed {
        tracing::warn!(error = %e, "failed to print report");
    }
}

fn report(out: &mut impl Write, opts: &Options, data: &DocsData) -> io::Result<()> {
    if opts.summary {
        print_doc_summary(out, data)?;
    }
    if let Some(query) = &opts.search {
        print_search(out, data, query)?;
    }
    out.flush()
}

const SUMMARY_PREVIEW: usize = 10;

pub fn print_doc_summary(out: &mut impl Write, data: &DocsData) -> io::Result<()> {
    let info = &data.package_info;
    let title = if info.name.is_empty() {
        "Documentation".to_string()
    } else {
        format!("{} {} documentation", info.name, info.version)
    };
    writeln!(out, "{}", title.trim().bold())?;
    writeln!(out, "{}", "=".repeat(title.trim().chars().count()))?;
    writeln!(
        out,
        "Functions: {}  Constants: {}  Types: {}",
        data.functions.len(),
        data.constants.len(),
        data.types.len()
    )?;
    writeln!(out)?;

    for (category, entries) in data.by_category() {
        writeln!(out, "{} ({}):", category.cyan().bold(), entries.len())?;
        for (kind, name) in entries.iter().take(SUMMARY_PREVIEW) {
            writeln!(out, "  {:<5} {name}", kind.as_str().dimmed())?;
        }
        if entries.len() > SUMMARY_PREVIEW {
            writeln!(out, "  ... and {} more", entries.len() - SUMMARY_PREVIEW)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_search(out: &mut impl Write, data: &DocsData, query: &str) -> io::Result<()> {
    let hits = data.search(query);
    if hits.is_empty() {
        return writeln!(out, "No entries match `{query}`");
    }
    writeln!(out, "{} entries match `{query}`:", hits.len())?;
    for hit in hits {
        writeln!(
            out,
            "  {:<8} {} ({})",
            hit.kind.display_name().dimmed(),
            hit.name.bold(),
            hit.category
        )?;
    }
    Ok(())
}
