mod cli;
mod telemetry;

use std::path::Path;

use anyhow::Context;
use clap::Parser;
use reel_core::{InMemoryRepository, MovieRepository, ReadMovieRepository};
use reel_loader::import;
use reel_storage::{MongoRepository, MOVIES_COLLECTION};
use tracing::info;

use crate::cli::{Command, MongoArgs, CLI};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();
    telemetry::init(config.log_format);

    match config.command.unwrap_or_default() {
        Command::Import {
            input,
            dry_run: true,
        } => {
            let repository = InMemoryRepository::new();
            let count = import_from(&repository, input.as_deref()).await?;
            info!(count, "dry run: movie batch is valid");
        }
        Command::Import {
            input,
            dry_run: false,
        } => {
            let repository = connect(&config.mongo).await?;
            let count = import_from(&repository, input.as_deref()).await?;
            info!(count, collection = MOVIES_COLLECTION, "imported movies");
        }
        Command::Get { id } => {
            let repository = connect(&config.mongo).await?;
            let movie = repository
                .get_movie(&id)
                .await
                .with_context(|| format!("cannot get movie '{id}'"))?;
            println!("{}", serde_json::to_string_pretty(&movie)?);
        }
    }

    Ok(())
}

async fn connect(mongo: &MongoArgs) -> anyhow::Result<MongoRepository> {
    let uri = mongo
        .mongodb_uri
        .as_deref()
        .context("mongodb uri is required (--mongodb-uri or MONGODB_URI)")?;
    let database = mongo
        .mongodb_db
        .as_deref()
        .context("mongodb database is required (--mongodb-db or MONGODB_DB)")?;

    info!(database, "connecting to MongoDB");
    MongoRepository::connect(uri, database)
        .await
        .context("cannot connect to MongoDB")
}

async fn import_from<R: MovieRepository>(
    repository: &R,
    input: Option<&Path>,
) -> anyhow::Result<usize> {
    let count = match input {
        Some(path) => {
            let file = tokio::fs::File::open(path)
                .await
                .with_context(|| format!("cannot open {}", path.display()))?;
            import(repository, file).await
        }
        None => import(repository, tokio::io::stdin()).await,
    }
    .context("cannot import movies")?;

    Ok(count)
}
