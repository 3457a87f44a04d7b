use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    #[arg(value_name = "FILE", help = "Spreadsheet to analyse (.csv, .xlsx, .xls, .ods)")]
    pub file: Option<String>,

    #[arg(
        short = 'k',
        long,
        value_name = "NAME",
        help = "Key column used to detect duplicates [default: Material Number]"
    )]
    pub key: Option<String>,

    #[arg(
        long,
        value_name = "NAME",
        help = "Worksheet to read from a workbook (defaults to the first sheet)"
    )]
    pub sheet: Option<String>,

    #[arg(
        long,
        value_name = "CHAR",
        help = "Field delimiter for delimited text files [default: ,]"
    )]
    pub delimiter: Option<char>,
}
