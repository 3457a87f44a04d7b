use crate::dataset::args::InputArgs;
use crate::output::args::OutputArgs;
use clap::Parser;

// Top-level CLI parser. Sub-sections are flattened from sub-Args structs.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    author,
    version,
    about = "Flag rows whose Material Number repeats in a CSV or Excel sheet"
)]
pub struct Args {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub actions: ActionArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    #[arg(
        short = 'c',
        long,
        value_name = "FILE",
        help = "Settings file (toml/yaml/json); flags override its values"
    )]
    pub config: Option<String>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ActionArgs {
    #[arg(short = 'a', long, help = "Show the grouped table with duplicates highlighted")]
    pub analyse: bool,

    #[arg(
        short = 'r',
        long,
        help = "Write <name>_analysed_<timestamp>.csv with an is_duplicate column"
    )]
    pub analysis_record: bool,

    #[arg(
        short = 'd',
        long,
        help = "Write <name>_duplicates_<timestamp>.csv with only the duplicated rows"
    )]
    pub duplicate_record: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Analyse,
    AnalysisRecord,
    DuplicateRecord,
}

impl ActionArgs {
    /// Requested actions in a fixed order; analyse when none is given.
    pub fn selected(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(3);
        if self.analyse {
            actions.push(Action::Analyse);
        }
        if self.analysis_record {
            actions.push(Action::AnalysisRecord);
        }
        if self.duplicate_record {
            actions.push(Action::DuplicateRecord);
        }
        if actions.is_empty() {
            actions.push(Action::Analyse);
        }
        actions
    }
}
