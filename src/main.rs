//! seqspec CLI entry point
//!
//! Locates library elements inside reads and prints them in the layout a
//! downstream tool expects.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::info;
use seqspec::core::{filter_index_no_overlap, index_assay, load_spec, IndexSelector};
use seqspec::formats::{format_index, IndexFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// Downstream tool (CLI enum)
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum ToolArg {
    #[value(name = "chromap")]
    Chromap,
    #[value(name = "kb")]
    Kb,
    /// kb with only the longest feature
    #[value(name = "kb-single")]
    KbSingle,
    /// Offsets of elements relative to linkers
    #[value(name = "relative")]
    Relative,
    /// Requires --subregion-type
    #[value(name = "seqkit")]
    Seqkit,
    #[value(name = "simpleaf")]
    Simpleaf,
    /// Extraction config and linker tags
    #[value(name = "splitcode")]
    Splitcode,
    #[value(name = "starsolo")]
    Starsolo,
    #[default]
    #[value(name = "tab")]
    Tab,
    #[value(name = "zumis")]
    Zumis,
}

impl From<ToolArg> for IndexFormat {
    fn from(arg: ToolArg) -> Self {
        match arg {
            ToolArg::Chromap => IndexFormat::Chromap,
            ToolArg::Kb => IndexFormat::Kb,
            ToolArg::KbSingle => IndexFormat::KbSingle,
            ToolArg::Relative => IndexFormat::Relative,
            ToolArg::Seqkit => IndexFormat::Seqkit,
            ToolArg::Simpleaf => IndexFormat::Simpleaf,
            ToolArg::Splitcode => IndexFormat::Splitcode,
            ToolArg::Starsolo => IndexFormat::Starsolo,
            ToolArg::Tab => IndexFormat::Tab,
            ToolArg::Zumis => IndexFormat::Zumis,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum SelectorArg {
    /// IDs are read ids
    #[default]
    #[value(name = "read")]
    Read,
    /// IDs are region ids
    #[value(name = "region")]
    Region,
    /// IDs are fastq file names
    #[value(name = "file")]
    File,
}

impl From<SelectorArg> for IndexSelector {
    fn from(arg: SelectorArg) -> Self {
        match arg {
            SelectorArg::Read => IndexSelector::Read,
            SelectorArg::Region => IndexSelector::Region,
            SelectorArg::File => IndexSelector::File,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FindArg {
    #[value(name = "region")]
    Region,
    #[value(name = "region-type")]
    RegionType,
}

#[derive(Parser)]
#[command(name = "seqspec")]
#[command(about = "Locate library elements inside sequencing reads")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Identify the position of elements in a spec for use in downstream tools
    Index {
        /// Sequencing specification yaml file (optionally .gz / .bz2)
        yaml: PathBuf,
        /// Modality
        #[arg(short = 'm', long)]
        modality: String,
        /// Comma-separated IDs (default: everything the selector covers)
        #[arg(short = 'i', long, value_delimiter = ',')]
        ids: Vec<String>,
        /// Tool
        #[arg(short = 't', long, default_value = "tab")]
        tool: ToolArg,
        /// Selector for IDs
        #[arg(short = 's', long, default_value = "read")]
        selector: SelectorArg,
        /// Return 3'->5' region order (region selector)
        #[arg(long)]
        rev: bool,
        /// Drop regions already claimed by an earlier read
        #[arg(long = "no-overlap")]
        no_overlap: bool,
        /// Region type to extract (seqkit)
        #[arg(long = "subregion-type")]
        subregion_type: Option<String>,
        /// Output file (optional, stdout if not specified)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },
    /// Find regions of a modality by id or type
    Find {
        /// Sequencing specification yaml file (optionally .gz / .bz2)
        yaml: PathBuf,
        /// Modality
        #[arg(short = 'm', long)]
        modality: String,
        /// What the ID refers to
        #[arg(short = 's', long, default_value = "region")]
        selector: FindArg,
        /// Region id or region type
        #[arg(short = 'i', long)]
        id: String,
    },
}

fn write_output(result: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => fs::write(path, format!("{}\n", result))
            .with_context(|| format!("Failed to write output: {:?}", path)),
        None => {
            println!("{}", result);
            Ok(())
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Index { yaml, modality, ids, tool, selector, rev, no_overlap, subregion_type, output } => {
            let spec = load_spec(&yaml).with_context(|| format!("Failed to load spec: {:?}", yaml))?;
            let mut indices = index_assay(&spec, &modality, &ids, selector.into(), rev)?;
            if no_overlap {
                indices = filter_index_no_overlap(indices);
            }
            let format: IndexFormat = tool.into();
            info!("indexing {} entr(ies) of {} as {}", indices.len(), modality, format);
            let result = format_index(&indices, format, subregion_type.as_deref())?;
            write_output(&result, output.as_deref())?;
        }

        Commands::Find { yaml, modality, selector, id } => {
            let spec = load_spec(&yaml).with_context(|| format!("Failed to load spec: {:?}", yaml))?;
            let root = spec.get_libspec(&modality)?;
            let regions = match selector {
                FindArg::Region => root.get_region_by_id(&id),
                FindArg::RegionType => root.get_region_by_region_type(&id),
            };
            let lines: Vec<String> = regions
                .iter()
                .map(|r| {
                    format!(
                        "{}\t{}\t{}\t{}\t{}\t{}",
                        r.region_id, r.region_type, r.name, r.sequence_type, r.min_len, r.max_len
                    )
                })
                .collect();
            write_output(&lines.join("\n"), None)?;
        }
    }

    Ok(())
}
