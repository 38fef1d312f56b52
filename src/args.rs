use clap::Parser;

/// A voter registration and ballot casting server.
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// (file path, optional) A JSON file with the settings of the server. The options passed on the
    /// command line take precedence over the content of this file.
    #[clap(short, long, value_parser)]
    pub config: Option<String>,

    /// (address, default 127.0.0.1:5000) The address the server listens on.
    #[clap(short, long, value_parser)]
    pub bind: Option<String>,

    /// (file path, optional) The roll of voters to register at startup. If not provided, the
    /// built-in roll is used.
    #[clap(short, long, value_parser)]
    pub input: Option<String>,

    /// (default json) The type of the roll: json or csv.
    #[clap(long, value_parser)]
    pub input_type: Option<String>,

    /// (voter id, repeatable) The voters to promote to candidates at startup. This replaces the
    /// candidates listed in the roll.
    #[clap(long, value_parser)]
    pub candidates: Option<Vec<u32>>,

    /// If passed as an argument, no voter is registered at startup.
    #[clap(long, takes_value = false)]
    pub empty: bool,

    // Other arguments
    /// If passed as an argument, will turn on verbose logging to the standard output.
    #[clap(long, takes_value = false)]
    pub verbose: bool,
}
