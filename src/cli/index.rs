use clap::Args;

use crate::catalog::builder::BuildStats;
use crate::catalog::index::SynonymyIndex;
use crate::cli::{OutputFormat, ReferenceArgs};

#[derive(Args, Debug)]
pub struct IndexArgs {
    #[command(flatten)]
    pub reference: ReferenceArgs,

    /// Also print every name mapping and every genus with its names
    #[arg(long)]
    pub dump: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: IndexArgs) -> anyhow::Result<()> {
    let index = args.reference.load()?;
    let stats = index.stats();

    match args.format {
        OutputFormat::Text => print_text(&index, stats, args.dump),
        OutputFormat::Json => {
            let mut output = serde_json::json!({
                "wcvp": args.reference.wcvp.display().to_string(),
                "lowercase": args.reference.lower,
                "stats": stats,
            });
            if args.dump {
                let entries: serde_json::Map<String, serde_json::Value> = index
                    .entries()
                    .map(|(key, accepted)| (key.to_string(), accepted.into()))
                    .collect();
                let genera: serde_json::Map<String, serde_json::Value> = index
                    .genera()
                    .map(|genus| {
                        let names = index.genus_names(genus).unwrap_or_default();
                        (genus.to_string(), serde_json::json!(names))
                    })
                    .collect();
                output["entries"] = entries.into();
                output["genera"] = genera.into();
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Tsv => {
            if args.dump {
                println!("key\taccepted");
                for (key, accepted) in index.entries() {
                    println!("{key}\t{accepted}");
                }
            } else {
                println!("statistic\tvalue");
                for (label, value) in stat_rows(stats) {
                    println!("{label}\t{value}");
                }
            }
        }
    }

    Ok(())
}

fn print_text(index: &SynonymyIndex, stats: &BuildStats, dump: bool) {
    println!("WCVP index\n");
    for (label, value) in stat_rows(stats) {
        println!("{label:<16} {value}");
    }

    if dump {
        println!("\nNames:");
        for (key, accepted) in index.entries() {
            println!("'{key}' => '{accepted}'");
        }
        println!("\nGenera:");
        for genus in index.genera() {
            let names = index.genus_names(genus).unwrap_or_default();
            println!("{genus} => {}", names.join("|"));
        }
    }
}

fn stat_rows(stats: &BuildStats) -> [(&'static str, usize); 8] {
    [
        ("rows_read", stats.rows_read),
        ("rows_stored", stats.rows_stored),
        ("rows_ignored", stats.rows_ignored),
        ("rows_skipped", stats.rows_skipped),
        ("keys_inserted", stats.keys_inserted),
        ("ambiguous_keys", stats.ambiguous_keys),
        ("usable_keys", stats.usable_keys),
        ("genera", stats.genera),
    ]
}
