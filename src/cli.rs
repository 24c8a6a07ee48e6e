use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Parser)]
#[command(name = "inno")]
#[command(about = "Form and inspect InnoSistemas project teams", version)]
#[command(after_help = "EXAMPLES:
    inno login --email ana@udea.edu.co    Log in and store the token
    inno students --search ruiz           Find classmates
    inno team create -n \"Team X\" -m 4 -m 9  Create a team with two classmates
    inno team create -i                   Pick classmates interactively
    inno team status                      Show your current team")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show detailed error information and debug logs
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in with your institutional account
    #[command(after_help = "EXAMPLES:
    inno login --email ana@udea.edu.co
    inno login -e ana@udea.edu.co -p secret")]
    Login(LoginArgs),
    /// Forget the stored token
    Logout,
    /// Show who the stored token belongs to
    Whoami,
    /// Create a new account
    #[command(after_help = "EXAMPLES:
    inno register --name \"Ana Ruiz\" --document 1020304050 \\
        --email ana@udea.edu.co --password secret --role-id 2 --course-id 3")]
    Register(RegisterArgs),
    /// List classmates available for a team
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    inno students
    inno students --search udea"
    )]
    Students {
        /// Case-insensitive filter on name or email
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Manage your team
    #[command(after_help = "EXAMPLES:
    inno team status
    inno team create -n \"Team X\" -m 4 -m 9
    inno team create --interactive")]
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Show your team (alias for 'team status')
    Teams,
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    inno completions bash > ~/.bash_completion.d/inno
    inno completions zsh > ~/.zfunc/_inno")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// Show your current team, if any
    #[command(alias = "s")]
    Status,
    /// Create a team with up to the configured number of classmates
    #[command(alias = "c")]
    Create(TeamCreateArgs),
}

#[derive(Args)]
pub struct LoginArgs {
    /// Institutional email
    #[arg(long, short)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(long, short)]
    pub password: Option<String>,
}

#[derive(Args)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Identity document number
    #[arg(long)]
    pub document: String,

    /// Institutional email
    #[arg(long)]
    pub email: String,

    /// Password
    #[arg(long)]
    pub password: String,

    /// Role id (e.g., 2)
    #[arg(long)]
    pub role_id: u32,

    /// Course id (e.g., 3)
    #[arg(long)]
    pub course_id: u32,
}

#[derive(Args)]
pub struct TeamCreateArgs {
    /// Team name
    #[arg(long, short)]
    pub name: Option<String>,

    /// Classmate id to include (repeatable)
    #[arg(long = "member", short = 'm')]
    pub members: Vec<i64>,

    /// Pick classmates from the roster interactively
    #[arg(long, short)]
    pub interactive: bool,
}
