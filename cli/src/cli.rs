// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use std::error::Error;
use std::io;
use std::path::PathBuf;

use clap::Parser;
use things_cloud::HeadIndex;
use things_cloud_core::{Clock, Destination, RecordId, Things};

use crate::config::parse_config;
use crate::todo_formatter::TodoFormatter;

#[derive(Parser)]
#[command(name = "things")]
#[command(about = "A Things Cloud to-do client", long_about = None)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand)]
pub enum Commands {
    /// Show the server head index
    Offset,

    /// Create a new to-do
    Add(AddArgs),

    /// List the to-dos in the local table
    List,

    /// Pull remote history into the local table
    Refresh,

    /// Mark a to-do as complete
    Complete {
        /// The 22-character record id
        id: String,
    },

    /// Cancel a to-do
    Cancel {
        /// The 22-character record id
        id: String,
    },

    /// Move a to-do to the trash
    Trash {
        /// The 22-character record id
        id: String,
    },

    /// Restore a to-do from the trash
    Restore {
        /// The 22-character record id
        id: String,
    },
}

#[derive(clap::Args)]
pub struct AddArgs {
    /// Title of the new to-do
    pub title: String,

    /// Schedule it for today
    #[arg(long, conflicts_with_all = ["evening", "someday"])]
    pub today: bool,

    /// Schedule it for this evening
    #[arg(long, conflicts_with = "someday")]
    pub evening: bool,

    /// Put it on the someday list
    #[arg(long)]
    pub someday: bool,

    /// Attach a note
    #[arg(long)]
    pub notes: Option<String>,
}

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = parse_config(cli.config).await?;
    let mut things = Things::new(config.cloud, Clock::system())?;
    if let Some(offset) = config.offset {
        things.seek(HeadIndex::new(offset));
    }

    match cli.command {
        Commands::Offset => {
            things.refresh().await?;
            println!("{}", things.head());
        }
        Commands::Add(args) => add(&mut things, args).await?,
        Commands::List => {
            things.refresh().await?;
            list(&things)?;
        }
        Commands::Refresh => {
            let summary = things.refresh().await?;
            println!(
                "head {}: {} created, {} edited, {} deleted, {} skipped",
                things.head(),
                summary.created,
                summary.edited,
                summary.deleted,
                summary.skipped.len(),
            );
        }
        Commands::Complete { id } => {
            let id = parse_id(&id)?;
            things.refresh().await?;
            things.modify(&id, |todo| todo.complete()).await?;
            println!("completed {id}");
        }
        Commands::Cancel { id } => {
            let id = parse_id(&id)?;
            things.refresh().await?;
            things.modify(&id, |todo| todo.cancel()).await?;
            println!("cancelled {id}");
        }
        Commands::Trash { id } => {
            let id = parse_id(&id)?;
            things.refresh().await?;
            things.modify(&id, |todo| todo.delete()).await?;
            println!("trashed {id}");
        }
        Commands::Restore { id } => {
            let id = parse_id(&id)?;
            things.refresh().await?;
            things.modify(&id, |todo| todo.restore()).await?;
            println!("restored {id}");
        }
    }

    Ok(())
}

async fn add(things: &mut Things, args: AddArgs) -> Result<(), Box<dyn Error>> {
    let mut todo = things.new_todo();
    todo.set_title(args.title);
    if args.evening {
        todo.evening();
    } else if args.today {
        todo.today();
    } else if args.someday {
        todo.set_destination(Destination::Someday)?;
    }
    if let Some(notes) = args.notes {
        todo.set_note(notes);
    }

    let id = things.create(todo).await?;
    println!("created {id} at index {}", things.head());
    Ok(())
}

fn list(things: &Things) -> Result<(), Box<dyn Error>> {
    let mut todos: Vec<_> = things.todos().collect();
    todos.sort_by_key(|todo| todo.order_index());

    let formatter = TodoFormatter::new();
    formatter.write(&mut io::stdout(), &todos)?;
    Ok(())
}

fn parse_id(id: &str) -> Result<RecordId, Box<dyn Error>> {
    Ok(id.parse()?)
}
