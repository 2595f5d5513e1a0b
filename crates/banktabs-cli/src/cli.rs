use banktabs_domain::{Direction, ItemId};
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "bank-tabs")]
#[command(about = "Group bank items into tabs and filter the bank view", long_about = None)]
#[command(version, arg_required_else_help = false)]
pub struct Cli {
    /// Path to the tab state file (or set BANK_TABS_FILE env var)
    #[arg(long, value_name = "FILE", env = "BANK_TABS_FILE", global = true)]
    pub file: Option<String>,

    /// Path to an inventory snapshot (or set BANK_TABS_INVENTORY env var)
    #[arg(long, value_name = "FILE", env = "BANK_TABS_INVENTORY", global = true)]
    pub inventory: Option<String>,

    /// Path to config.toml, overriding the per-user location
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Group operations
    Group(GroupCommand),
    /// Item operations
    Item(ItemCommand),
    /// Show the decision for every bank slot
    View {
        /// Group to filter by instead of the selected one
        #[arg(long)]
        group: Option<String>,
    },
    /// Open the terminal interface (the default)
    Tui,
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
pub struct GroupCommand {
    #[command(subcommand)]
    pub action: GroupAction,
}

#[derive(Subcommand)]
pub enum GroupAction {
    /// Create an empty group
    Add {
        #[arg(long)]
        name: String,
    },
    /// Delete a group
    Remove {
        #[arg(long)]
        name: String,
    },
    /// Remove the group if it exists, otherwise create it
    Toggle {
        #[arg(long)]
        name: String,
    },
    /// List groups in display order
    List,
    /// Move a group one place in the display order
    Reorder {
        #[arg(long)]
        name: String,
        #[arg(long, value_enum)]
        direction: MoveDirection,
    },
    /// Make a group the selected one
    Select {
        #[arg(long)]
        name: String,
    },
    /// Record the column width of a group
    Width {
        #[arg(long)]
        name: String,
        #[arg(long)]
        width: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Left,
    Right,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Left => Direction::Left,
            MoveDirection::Right => Direction::Right,
        }
    }
}

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub action: ItemAction,
}

#[derive(Subcommand)]
pub enum ItemAction {
    /// Assign an item to a group, as if dropped onto its tab
    Assign {
        #[arg(long)]
        group: String,
        #[arg(long)]
        item: ItemId,
    },
}
