use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct OutputArgs {
    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Output directory for generated records [default: .]"
    )]
    pub out: Option<String>,

    #[arg(long, help = "Leave the row label column out of generated records")]
    pub no_index: bool,

    #[arg(
        long,
        value_name = "#RRGGBB",
        help = "Background colour for duplicate rows [default: #F09A88]"
    )]
    pub highlight: Option<String>,

    #[arg(long, help = "Show detailed scan statistics")]
    pub stats: bool,

    #[arg(short, long, help = "Only print warnings and errors")]
    pub quiet: bool,

    #[arg(long, conflicts_with = "quiet", help = "Enable debug logging")]
    pub verbose: bool,
}
