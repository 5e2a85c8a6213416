use clap::{Parser, Subcommand};

/// Command-line interface definition for rollcall
/// QR-gated weekly attendance check-in over SQLite
#[derive(Parser)]
#[command(
    name = "rollcall",
    version = env!("CARGO_PKG_VERSION"),
    about = "Record QR-gated weekly attendance: deterministic status and late-fee tiers, exactly one record per member and week",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show attendance store statistics")]
        info: bool,
    },

    /// Print rows from the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Check a member in with a scanned token
    Checkin {
        /// Scanned token value
        #[arg(long = "token", help = "Scanned token value")]
        token: String,

        /// Attendance category the member is checking in for
        #[arg(long = "category", help = "Attendance category (e.g. general, officers)")]
        category: String,

        /// Authenticated member id
        #[arg(long = "member", help = "Member id")]
        member: String,

        /// Override the check-in instant (RFC3339), for testing
        #[arg(long = "at", hide = true)]
        at: Option<String>,

        /// Emit the outcome as JSON instead of human-readable text
        #[arg(long = "json", help = "Emit the check-in outcome as JSON")]
        json: bool,
    },

    /// List recorded attendance
    List {
        #[arg(long = "cycle", help = "Filter by cycle date (YYYY-MM-DD)")]
        cycle: Option<String>,

        #[arg(long = "category", help = "Filter by category")]
        category: Option<String>,
    },

    /// Manage the token store (seeding and inspection)
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Manage the role directory
    Role {
        #[command(subcommand)]
        action: RoleAction,
    },
}

#[derive(Subcommand)]
pub enum TokenAction {
    /// Add or refresh a token
    Add {
        /// Token value as displayed by the QR generator
        token: String,

        #[arg(long = "category", help = "Category the token authorizes")]
        category: String,

        #[arg(long = "expires", help = "Expiry instant (RFC3339)")]
        expires: String,
    },

    /// List stored tokens
    List,
}

#[derive(Subcommand)]
pub enum RoleAction {
    /// Grant a role to a member
    Grant {
        /// Member id
        member: String,

        /// Role name (free-form, e.g. leader, secretary)
        role: String,
    },

    /// List a member's roles
    List {
        /// Member id
        member: String,
    },
}
