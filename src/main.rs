use anyhow::Result;
use clap::{Parser, Subcommand};
use recipebox::cli;
use recipebox_recipe::Unit;

/// recipebox - recipe sharing and shopping lists
#[derive(Parser)]
#[command(name = "recipebox")]
#[command(about = "Recipe sharing backend with printable shopping lists", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Drop database if exists and recreate with migrations
    Reset,
    /// Manage the ingredient catalog
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// Manage recipe tags
    Tag {
        #[command(subcommand)]
        command: TagCommands,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum IngredientCommands {
    Add {
        #[arg(long)]
        name: String,

        /// gram or kilogram
        #[arg(long, default_value = "gram")]
        unit: Unit,
    },
}

#[derive(Subcommand)]
enum TagCommands {
    Add {
        #[arg(long)]
        name: String,

        /// Hex color such as #E26C2D
        #[arg(long)]
        color: String,

        #[arg(long)]
        slug: String,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    SetRole {
        #[arg(long)]
        email: String,

        #[arg(long, value_enum)]
        role: cli::Role,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = recipebox::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    recipebox::observability::init_observability(&config.observability.log_level)?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Migrate => recipebox::migrate::migrate(&config).await,
        Commands::Reset => recipebox::migrate::reset(&config).await,
        Commands::Ingredient {
            command: IngredientCommands::Add { name, unit },
        } => cli::add_ingredient(config, name, unit).await,
        Commands::Tag {
            command: TagCommands::Add { name, color, slug },
        } => cli::add_tag(config, name, color, slug).await,
        Commands::User {
            command: UserCommands::SetRole { email, role },
        } => cli::set_role(config, email, role).await,
    }
}
