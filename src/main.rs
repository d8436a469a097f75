use anyhow::Result;
use clap::{Parser, Subcommand};
use grit::areas::repository::Repository;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "grit",
    version = "0.1.0",
    about = "A minimal content-addressable object store and commit graph",
    long_about = "Grit is a small reimplementation of git's plumbing layer: \
    hash-addressed object storage, reference resolution and linear history \
    traversal. It is a learning project, not a git replacement.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "Create the repository layout (object database, references, HEAD, config) \
        in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "cat-file",
        about = "Print the payload of an object",
        long_about = "Resolve a name (id, branch, tag or HEAD) to an object and print its \
        payload bytes verbatim."
    )]
    CatFile {
        #[arg(index = 1, help = "The object to print")]
        object: String,
    },
    #[command(
        name = "hash-object",
        about = "Compute a blob id and optionally write it to the object database"
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1, help = "The file to hash")]
        file: String,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree object")]
    LsTree {
        #[arg(index = 1, help = "The tree object to list")]
        object: String,
    },
    #[command(
        name = "commit-tree",
        about = "Create a commit object from an existing tree"
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree object the commit snapshots")]
        tree: String,
        #[arg(short, long, help = "A parent commit (repeatable)")]
        parent: Vec<String>,
        #[arg(short, long, help = "The commit message")]
        message: Option<String>,
    },
    #[command(name = "log", about = "Show commit history")]
    Log {
        #[arg(index = 1, help = "Commit to start at (default: HEAD)")]
        revision: Option<String>,
    },
    #[command(name = "show-ref", about = "List references with their resolved ids")]
    ShowRef,
    #[command(name = "update-ref", about = "Write a reference to an object id")]
    UpdateRef {
        #[arg(index = 1, help = "The reference to write (bare names land under refs/heads/)")]
        name: String,
        #[arg(index = 2, help = "The id (or resolvable name) to point it at")]
        value: String,
    },
}

fn open_repository() -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Ok(Repository::discover(&pwd, Box::new(std::io::stdout()))?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => path.clone(),
                None => std::env::current_dir()?,
            };

            Repository::init(&path, Box::new(std::io::stdout()))?
        }
        Commands::CatFile { object } => open_repository()?.cat_file(object)?,
        Commands::HashObject { write, file } => open_repository()?.hash_object(file, *write)?,
        Commands::LsTree { object } => open_repository()?.ls_tree(object)?,
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => open_repository()?.commit_tree(tree, parent, message.as_deref().unwrap_or(""))?,
        Commands::Log { revision } => {
            open_repository()?.log(revision.as_deref().unwrap_or("HEAD"))?
        }
        Commands::ShowRef => open_repository()?.show_ref()?,
        Commands::UpdateRef { name, value } => open_repository()?.update_ref(name, value)?,
    }

    Ok(())
}
