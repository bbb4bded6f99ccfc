use clap::{Parser, Subcommand};
use wit::areas::repository::Repository;
use wit::commands::porcelain::init::init;

#[derive(Parser)]
#[command(
    name = "wit",
    version,
    about = "A tiny snapshot-based version control tool"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty repository in the current directory
    Init,
    /// Stage a file or directory
    Add {
        /// Path to stage, resolved from the current directory
        path: String,
    },
    /// Record the staging area as a new commit
    Commit {
        /// Message stored in the commit record
        message: String,
    },
    /// Show staged, unstaged and untracked files
    Status,
    /// Unstage a file or directory
    Remove {
        /// Path to unstage, resolved from the current directory
        path: String,
    },
    /// Switch to a branch or commit
    Checkout {
        /// Branch name or full commit id
        target: String,
    },
    /// Create a branch at the current HEAD
    Branch {
        /// Name of the new branch
        name: String,
    },
    /// Fold a branch into the current HEAD
    Merge {
        /// Name of the branch to merge
        branch: String,
    },
    /// Print the commit history as Graphviz DOT
    Graph,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let current_dir = std::env::current_dir()?;
    let writer = Box::new(std::io::stdout());

    if let Commands::Init = cli.command {
        return init(&current_dir, writer);
    }

    let mut repository = Repository::discover(&current_dir, writer)?;

    match cli.command {
        Commands::Init => unreachable!("handled before discovery"),
        Commands::Add { path } => repository.add(&path).await,
        Commands::Commit { message } => repository.commit(&message).await,
        Commands::Status => repository.status().await,
        Commands::Remove { path } => repository.remove(&path).await,
        Commands::Checkout { target } => repository.checkout(&target).await,
        Commands::Branch { name } => repository.branch(&name).await,
        Commands::Merge { branch } => repository.merge(&branch).await,
        Commands::Graph => repository.graph().await,
    }
}
