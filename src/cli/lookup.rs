use clap::Args;
use serde::Serialize;

use crate::cli::{MatchArgs, OutputFormat, ReferenceArgs};
use crate::matching::engine::{MatchMethod, Resolution, ResolutionEngine};

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Scientific names to resolve
    #[arg(required = true, value_name = "NAME")]
    pub names: Vec<String>,

    #[command(flatten)]
    pub reference: ReferenceArgs,

    #[command(flatten)]
    pub matching: MatchArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// One looked-up name, resolved or not
#[derive(Debug, Serialize)]
struct LookupEntry<'a> {
    query: &'a str,
    resolved: bool,
    accepted: Option<&'a str>,
    token: Option<&'a str>,
    method: Option<MatchMethod>,
    algorithm: Option<String>,
}

impl<'a> LookupEntry<'a> {
    fn resolved(resolution: &'a Resolution) -> Self {
        Self {
            query: &resolution.query,
            resolved: true,
            accepted: Some(&resolution.accepted),
            token: Some(&resolution.token),
            method: Some(resolution.method),
            algorithm: Some(resolution.method.to_string()),
        }
    }

    fn unresolved(query: &'a str) -> Self {
        Self {
            query,
            resolved: false,
            accepted: None,
            token: None,
            method: None,
            algorithm: None,
        }
    }
}

pub fn run(args: LookupArgs) -> anyhow::Result<()> {
    let index = args.reference.load()?;
    let engine = ResolutionEngine::with_matcher(&index, args.matching.matcher());

    let resolutions: Vec<Result<Resolution, &str>> = args
        .names
        .iter()
        .map(|name| engine.resolve(name).ok_or(name.as_str()))
        .collect();
    let entries: Vec<LookupEntry> = resolutions
        .iter()
        .map(|outcome| match outcome {
            Ok(resolution) => LookupEntry::resolved(resolution),
            Err(name) => LookupEntry::unresolved(name),
        })
        .collect();

    match args.format {
        OutputFormat::Text => {
            for entry in &entries {
                match (entry.accepted, &entry.algorithm) {
                    (Some(accepted), Some(algorithm)) => {
                        println!("{} => {} [{}]", entry.query, accepted, algorithm);
                    }
                    _ => println!("{} => (unresolved)", entry.query),
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Tsv => {
            println!("query\taccepted\ttoken\talgorithm");
            for entry in &entries {
                println!(
                    "{}\t{}\t{}\t{}",
                    entry.query,
                    entry.accepted.unwrap_or_default(),
                    entry.token.unwrap_or_default(),
                    entry.algorithm.as_deref().unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
