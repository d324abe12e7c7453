use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::types::{Priority, Status};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(about = "A terminal client for the taskboard issue tracker", version)]
#[command(after_help = "EXAMPLES:
    taskboard login                      Log in and store the token
    taskboard project select 3           Make project 3 the default board
    taskboard board                      Render the kanban board
    taskboard issue create -t \"Title\"    Create an issue in the selected project
    taskboard issue move 12 done         Move issue 12 to the Done column")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Output as JSON for scripting (same as --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Show the full error cause chain
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account and log in
    #[command(after_help = "EXAMPLES:
    taskboard signup
    taskboard signup --email alice@example.com")]
    Signup(AuthArgs),
    /// Log in and store the bearer token
    #[command(after_help = "EXAMPLES:
    taskboard login
    taskboard login --email alice@example.com")]
    Login(AuthArgs),
    /// Remove the stored credential
    Logout,
    /// Show the current session
    Whoami,
    /// Manage projects
    #[command(after_help = "EXAMPLES:
    taskboard project list
    taskboard project create -t \"Backend\" -d \"API work\"
    taskboard project select 3
    taskboard project delete 3 --yes")]
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
    /// List projects (alias for 'project list')
    Projects,
    /// Manage issues
    #[command(after_help = "EXAMPLES:
    taskboard issue list --status todo
    taskboard issue create -t \"Fix login\" --priority high
    taskboard issue update 12 --assignee alice
    taskboard issue move 12 in-progress
    taskboard issue delete 12 --yes")]
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// List issues (alias for 'issue list')
    #[command(after_help = "EXAMPLES:
    taskboard issues
    taskboard issues --project 3 --status done")]
    Issues(IssueListArgs),
    /// Render the kanban board for a project
    #[command(after_help = "EXAMPLES:
    taskboard board
    taskboard board --project 3")]
    Board(BoardArgs),
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    taskboard completions bash > ~/.bash_completion.d/taskboard
    taskboard completions zsh > ~/.zfunc/_taskboard
    taskboard completions fish > ~/.config/fish/completions/taskboard.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    #[command(after_help = "EXAMPLES:
    taskboard init")]
    Init,
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List projects
    List,
    /// Create a new project
    #[command(after_help = "EXAMPLES:
    taskboard project create -t \"Backend\"
    taskboard project create -t \"Backend\" -d \"API and storage work\"")]
    Create(ProjectCreateArgs),
    /// Show project details
    Show {
        /// Project id
        id: i64,
    },
    /// Make a project the default for issue commands
    Select {
        /// Project id
        id: i64,
    },
    /// Delete a project and all of its issues
    Delete {
        /// Project id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// List issues
    #[command(after_help = "EXAMPLES:
    taskboard issue list
    taskboard issue list --project 3 --status in-progress")]
    List(IssueListArgs),
    /// Show issue details
    Show {
        /// Issue id
        id: i64,

        /// Project id (defaults to the selected project)
        #[arg(long)]
        project: Option<i64>,
    },
    /// Create a new issue
    #[command(after_help = "EXAMPLES:
    taskboard issue create -t \"Fix login bug\"
    taskboard issue create -t \"Ship beta\" --status in-progress --priority high --assignee alice")]
    Create(IssueCreateArgs),
    /// Update an existing issue
    #[command(after_help = "EXAMPLES:
    taskboard issue update 12 --title \"Fix login timeout\"
    taskboard issue update 12 --priority low --assignee alice
    taskboard issue update 12 --clear-assignee")]
    Update(IssueUpdateArgs),
    /// Move an issue to another board column
    #[command(after_help = "EXAMPLES:
    taskboard issue move 12 in-progress
    taskboard issue move 12 done")]
    Move(IssueMoveArgs),
    /// Delete an issue
    Delete {
        /// Issue id
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,

        /// Project id (defaults to the selected project)
        #[arg(long)]
        project: Option<i64>,
    },
}

#[derive(Args)]
pub struct AuthArgs {
    /// Account email (prompted if omitted)
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct ProjectCreateArgs {
    /// Project title
    #[arg(long, short)]
    pub title: String,

    /// Project description
    #[arg(long, short)]
    pub description: Option<String>,
}

#[derive(Args, Clone)]
pub struct IssueListArgs {
    /// Project id (defaults to the selected project)
    #[arg(long)]
    pub project: Option<i64>,

    /// Filter by board column
    #[arg(long, value_enum)]
    pub status: Option<Status>,
}

#[derive(Args)]
pub struct IssueCreateArgs {
    /// Issue title
    #[arg(long, short)]
    pub title: String,

    /// Issue description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Starting board column
    #[arg(long, value_enum, default_value_t = Status::Todo)]
    pub status: Status,

    /// Priority
    #[arg(long, value_enum, default_value_t = Priority::Medium)]
    pub priority: Priority,

    /// Assignee name
    #[arg(long)]
    pub assignee: Option<String>,

    /// Project id (defaults to the selected project)
    #[arg(long)]
    pub project: Option<i64>,
}

#[derive(Args)]
pub struct IssueUpdateArgs {
    /// Issue id
    pub id: i64,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New description
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// New board column
    #[arg(long, value_enum)]
    pub status: Option<Status>,

    /// New priority
    #[arg(long, value_enum)]
    pub priority: Option<Priority>,

    /// New assignee
    #[arg(long, conflicts_with = "clear_assignee")]
    pub assignee: Option<String>,

    /// Remove the assignee
    #[arg(long)]
    pub clear_assignee: bool,

    /// Project id (defaults to the selected project)
    #[arg(long)]
    pub project: Option<i64>,
}

#[derive(Args)]
pub struct IssueMoveArgs {
    /// Issue id
    pub id: i64,

    /// Target board column
    #[arg(value_enum)]
    pub status: Status,

    /// Project id (defaults to the selected project)
    #[arg(long)]
    pub project: Option<i64>,
}

#[derive(Args)]
pub struct BoardArgs {
    /// Project id (defaults to the selected project)
    #[arg(long)]
    pub project: Option<i64>,
}
