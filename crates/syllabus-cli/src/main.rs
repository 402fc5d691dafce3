use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use syllabus_core::{Actor, ContentBinding, ContentKind, Role, init_role_grants};

mod commands;
mod utils;
use commands::{
    cmd_add_blob, cmd_add_module, cmd_add_text, cmd_attach, cmd_courses, cmd_delete_content,
    cmd_delete_course, cmd_delete_item, cmd_delete_module, cmd_init, cmd_new_course, cmd_schema,
    cmd_seed, cmd_set_active, cmd_show,
};

/// syllabus command-line interface.
#[derive(Parser, Debug)]
#[command(name = "syllabus", author, version, about)]
struct Cli {
    /// Id of the acting user, recorded as owner of new rows.
    #[arg(long, global = true, default_value = "local")]
    user: String,
    /// Role of the acting user.
    #[arg(long, global = true, default_value = "instructor")]
    role: Role,
    /// Log store activity at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Initialize syllabus.json with defaults.
    Init,
    /// Load every fixture snapshot into the database.
    Seed {
        /// Fixture directory (defaults to the configured one).
        #[arg(long)]
        dir: Option<PathBuf>,
    },
    /// List active courses.
    Courses {
        /// Include inactive courses.
        #[arg(long)]
        all: bool,
    },
    /// Show a course outline.
    Show {
        slug: String,
        /// Print the outline as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Create a course.
    NewCourse {
        title: String,
        #[arg(long)]
        slug: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Append a module to a course.
    AddModule {
        /// Course slug.
        course: String,
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Force an explicit order instead of appending.
        #[arg(long)]
        order: Option<i32>,
    },
    /// Create text content.
    AddText {
        title: String,
        /// Body text; read from --file when omitted.
        #[arg(long)]
        body: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Upload a file, image or video into the blob store.
    AddBlob {
        kind: ContentKind,
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
        /// Media type; guessed from the extension when omitted.
        #[arg(long)]
        media_type: Option<String>,
        /// Alternative text (images).
        #[arg(long)]
        alt: Option<String>,
        /// Duration in seconds (videos).
        #[arg(long)]
        duration: Option<u32>,
    },
    /// Bind content (e.g. `image#3`) into a module.
    Attach {
        module: i32,
        content: ContentBinding,
        /// Force an explicit order instead of appending.
        #[arg(long)]
        order: Option<i32>,
    },
    /// Make a course visible in active listings again.
    Activate { slug: String },
    /// Hide a course from active listings without deleting anything.
    Deactivate { slug: String },
    /// Delete a course with its modules and items.
    DeleteCourse { slug: String },
    /// Delete a module with its items.
    DeleteModule { id: i32 },
    /// Remove one item from its module.
    DeleteItem { id: i32 },
    /// Delete content and unbind it from every module.
    DeleteContent { content: ContentBinding },
    /// Print the JSON schema of fixture snapshots.
    Schema {
        /// Write to a file instead of stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    utils::init_tracing(cli.verbose);
    init_role_grants();
    let actor = Actor::new(cli.user, cli.role);

    match cli.command {
        Commands::Init => cmd_init(),
        Commands::Seed { dir } => cmd_seed(&actor, dir).await,
        Commands::Courses { all } => cmd_courses(&actor, all).await,
        Commands::Show { slug, json } => cmd_show(&actor, &slug, json).await,
        Commands::NewCourse {
            title,
            slug,
            description,
        } => cmd_new_course(&actor, title, slug, description).await,
        Commands::AddModule {
            course,
            title,
            description,
            order,
        } => cmd_add_module(&actor, &course, title, description, order).await,
        Commands::AddText { title, body, file } => cmd_add_text(&actor, title, body, file).await,
        Commands::AddBlob {
            kind,
            path,
            title,
            media_type,
            alt,
            duration,
        } => cmd_add_blob(&actor, kind, path, title, media_type, alt, duration).await,
        Commands::Attach {
            module,
            content,
            order,
        } => cmd_attach(&actor, module, content, order).await,
        Commands::Activate { slug } => cmd_set_active(&actor, &slug, true).await,
        Commands::Deactivate { slug } => cmd_set_active(&actor, &slug, false).await,
        Commands::DeleteCourse { slug } => cmd_delete_course(&actor, &slug).await,
        Commands::DeleteModule { id } => cmd_delete_module(&actor, id).await,
        Commands::DeleteItem { id } => cmd_delete_item(&actor, id).await,
        Commands::DeleteContent { content } => cmd_delete_content(&actor, content).await,
        Commands::Schema { out } => cmd_schema(out),
    }
}
