//! edgetab CLI
//!
//! # Usage
//!
//! ```bash
//! # Lift node1/label/node2 using the label rows of the input itself
//! edgetab lift edges.tsv -o lifted.tsv
//!
//! # Lift node2 from a separate label file, dropping empty columns
//! edgetab lift edges.tsv --label-file labels.tsv --columns-to-lift node2 --suppress-empty-columns
//!
//! # Streaming merge over presorted files
//! edgetab lift sorted.tsv --label-file sorted-labels.tsv --columns-to-lift node1 \
//!     --input-file-is-presorted --label-file-is-presorted
//!
//! # Options from YAML, overridden per flag
//! edgetab lift edges.tsv --config lift.yaml --lift-suffix ";name" -v
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use edgetab_io::{RowSource, TsvReader, TsvWriter};
use edgetab_lift::{LiftConfig, LiftProcessor, Result, Validatable};
use tracing::info;

#[derive(Parser)]
#[command(name = "edgetab")]
#[command(about = "Tools for tab-separated edge files", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lift labels of referenced nodes into new columns
    Lift(LiftArgs),
}

#[derive(Args)]
struct LiftArgs {
    /// Input file ("-" for stdin)
    #[arg(default_value = "-")]
    input: String,

    /// Output file ("-" for stdout)
    #[arg(short, long, default_value = "-")]
    output: String,

    /// Separate file holding the label-defining rows
    #[arg(long)]
    label_file: Option<String>,

    /// YAML configuration (schema v1); flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the resolved options as JSON to stderr
    #[arg(long)]
    show_options: bool,

    /// Column selecting the input rows to lift into
    #[arg(long)]
    input_select_column: Option<String>,

    /// Value the input select column must hold
    #[arg(long)]
    input_select_value: Option<String>,

    /// Columns whose values are looked up (default: node1,label,node2)
    #[arg(long, action = ArgAction::Append, value_delimiter = ',')]
    columns_to_lift: Option<Vec<String>>,

    /// Output column names, by position in the lift list
    #[arg(long, action = ArgAction::Append, value_delimiter = ',')]
    columns_to_write: Option<Vec<String>>,

    /// Suffix forming default output column names
    #[arg(long)]
    lift_suffix: Option<String>,

    /// Written into the input select column of lifted rows
    #[arg(long)]
    update_select_value: Option<String>,

    /// Column marking label-defining rows
    #[arg(long)]
    label_select_column: Option<String>,

    /// Value marking label-defining rows
    #[arg(long)]
    label_select_value: Option<String>,

    /// Treat every label source row as label-defining
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    disable_label_select: Option<bool>,

    /// Key column of the label source
    #[arg(long)]
    label_match_column: Option<String>,

    /// Value column of the label source
    #[arg(long)]
    label_value_column: Option<String>,

    /// Drop label-defining rows from the output
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    remove_label_records: Option<bool>,

    /// Merge duplicate labels as a sorted unique list
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    suppress_duplicate_labels: Option<bool>,

    /// Drop lifted columns that would be blank everywhere
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    suppress_empty_columns: Option<bool>,

    /// Succeed even when no labels are found
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    ok_if_no_labels: Option<bool>,

    /// Read the input first and load only the labels it needs
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    prefilter_labels: Option<bool>,

    /// Input is sorted on the lift column
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    input_file_is_presorted: Option<bool>,

    /// Label file is sorted on the match column
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    label_file_is_presorted: Option<bool>,
}

impl LiftArgs {
    /// YAML (or defaults) first, then every flag given on the command line
    fn resolve_config(&self) -> Result<LiftConfig> {
        let mut config = match &self.config {
            Some(path) => LiftConfig::from_yaml(path)?,
            None => LiftConfig::default(),
        };

        override_opt(&mut config.input_select_column, &self.input_select_column);
        override_opt(&mut config.input_select_value, &self.input_select_value);
        override_opt(&mut config.update_select_value, &self.update_select_value);
        override_opt(&mut config.label_select_column, &self.label_select_column);
        override_opt(&mut config.label_match_column, &self.label_match_column);
        override_opt(&mut config.label_value_column, &self.label_value_column);

        if let Some(names) = &self.columns_to_lift {
            config.columns_to_lift = names.clone();
        }
        if let Some(names) = &self.columns_to_write {
            config.columns_to_write = names.clone();
        }
        if let Some(suffix) = &self.lift_suffix {
            config.lift_suffix = suffix.clone();
        }
        if let Some(value) = &self.label_select_value {
            config.label_select_value = value.clone();
        }

        let flags = [
            (&mut config.disable_label_select, self.disable_label_select),
            (&mut config.remove_label_records, self.remove_label_records),
            (&mut config.suppress_duplicate_labels, self.suppress_duplicate_labels),
            (&mut config.suppress_empty_columns, self.suppress_empty_columns),
            (&mut config.ok_if_no_labels, self.ok_if_no_labels),
            (&mut config.prefilter_labels, self.prefilter_labels),
            (&mut config.input_file_is_presorted, self.input_file_is_presorted),
            (&mut config.label_file_is_presorted, self.label_file_is_presorted),
        ];
        for (field, value) in flags {
            if let Some(value) = value {
                *field = value;
            }
        }

        config.validate()?;
        Ok(config)
    }
}

fn override_opt(field: &mut Option<String>, value: &Option<String>) {
    if value.is_some() {
        field.clone_from(value);
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .init();
}

fn run_lift(args: &LiftArgs) -> Result<()> {
    let config = args.resolve_config()?;
    if args.show_options {
        eprintln!("{}", config.to_json_pretty()?);
    }

    let processor = LiftProcessor::new(&config)?;

    // Labels are opened before the input so a missing label file fails
    // before stdin is touched.
    let mut labels = args.label_file.as_ref().map(TsvReader::open).transpose()?;
    let mut input = TsvReader::open(&args.input)?;
    info!(input = input.origin(), output = %args.output, "lifting");

    let output = args.output.clone();
    processor.process(
        &mut input,
        labels.as_mut().map(|labels| labels as &mut dyn RowSource),
        move |columns| TsvWriter::create(columns, output),
    )?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match &cli.command {
        Commands::Lift(args) => run_lift(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lift_args(argv: &[&str]) -> LiftArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Commands::Lift(args) => args,
        }
    }

    #[test]
    fn test_column_list_does_not_swallow_input() {
        let args = lift_args(&["edgetab", "lift", "--columns-to-lift", "node1", "input.tsv"]);
        assert_eq!(args.columns_to_lift, Some(vec!["node1".to_string()]));
        assert_eq!(args.input, "input.tsv");
    }

    #[test]
    fn test_column_lists_split_on_commas_and_repeat() {
        let args = lift_args(&[
            "edgetab",
            "lift",
            "--columns-to-lift",
            "node1,node2",
            "--columns-to-lift",
            "label",
            "--columns-to-write",
            "a,b,c",
        ]);
        assert_eq!(
            args.columns_to_lift,
            Some(vec!["node1".to_string(), "node2".to_string(), "label".to_string()])
        );
        assert_eq!(args.columns_to_write.map(|names| names.len()), Some(3));
        assert_eq!(args.input, "-");
    }
}
