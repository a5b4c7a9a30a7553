use azname::ResourceKind;
use clap::{Args, Parser, Subcommand};
use indoc::indoc;
use std::path::PathBuf;

const LONG_ABOUT: &str = indoc! {"
    Validates cloud resource names.

    A rule-set document binds each resource kind to a regular expression, to a template of
    hyphen-separated tokens such as '{NameCode}{Workload}{Environment}{Instance}', or to
    nothing at all. Template tokens refer to reusable fields defined in the same document;
    '{NameCode}' stands for the kind's short code (e.g. 'st' for StorageAccount).

    Independently of the rule set, every kind has fixed length and character-class limits,
    which the 'chars' command checks on their own.

    Examples:
        azname check storage-account stpayroll001 st-payroll
        azname --rules ./naming.json check ResourceGroup -f names.txt
        cat names.txt | azname chars WindowsVM
        azname template '{NameCode}{Workload}{Instance?}'
"};

#[derive(Parser, Debug)]
#[command(version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// Path to a JSON rule-set document; the built-in rule set is used when omitted
    #[arg(short, long, global = true, value_name = "JSON")]
    pub rules: Option<PathBuf>,

    /// Path to a JSON character-class table; the built-in table is used when omitted
    #[arg(long, global = true, value_name = "JSON")]
    pub char_table: Option<PathBuf>,

    /// Flush output after every line even when stdout is not a terminal
    #[arg(long, global = true)]
    pub line_buffered: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check names against the rule set
    Check(NamesArgs),
    /// Check names against the length and character-class table only
    Chars(NamesArgs),
    /// List the sample names declared in the rule set
    Samples(SamplesArgs),
    /// Check every declared sample against its own rule
    SelfTest,
    /// Parse a name template and print its tokens
    Template(TemplateArgs),
    /// Print completions for a given shell to stdout
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct NamesArgs {
    /// The resource kind to check against, e.g. StorageAccount or storage-account
    pub kind: ResourceKind,

    /// Names to check; read from --file or standard input when omitted
    pub names: Vec<String>,

    /// Files listing one name per line; lines starting with '#' are comments
    #[arg(short, long)]
    pub file: Vec<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SamplesArgs {
    /// Only list samples for this resource kind
    #[arg(short, long)]
    pub kind: Option<ResourceKind>,

    /// Print the samples as a JSON array
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// A template such as '{NameCode}{Workload}{Instance?}'
    pub template: String,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The name of the shell to generate completions for
    pub shell: clap_complete::Shell,
}
