use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AddOutcome, CommentListController, CommentsApi, DeleteOutcome, HttpCommentsApi, ImportOutcome,
    LoadOutcome, Surfaces,
};
use shared::{domain::CommentId, protocol::CommentUpdate};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::{load_settings, Settings};
use terminal::{OutputFormat, PresetForm, StdinConfirm, TerminalTable, TerminalToast};

#[derive(Parser, Debug)]
#[command(name = "moderator", about = "Review the comment moderation list")]
struct Args {
    /// Config file; defaults to ./moderator.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List comments, optionally only those of one type.
    List {
        #[arg(long = "type")]
        comment_type: Option<String>,
    },
    /// Add a comment and list everything afterwards.
    Add {
        #[arg(long = "type")]
        comment_type: String,
        #[arg(long)]
        text: String,
        #[arg(long)]
        severity: Option<String>,
    },
    /// Delete a comment after confirmation and list everything afterwards.
    Delete {
        id: CommentId,
        #[arg(long, short)]
        yes: bool,
    },
    /// Print one comment as JSON.
    Show { id: CommentId },
    /// Change the text, type or severity of a comment.
    Edit {
        id: CommentId,
        #[arg(long)]
        text: Option<String>,
        #[arg(long = "type")]
        comment_type: Option<String>,
        #[arg(long)]
        severity: Option<String>,
    },
    /// Print the comment types currently stored by the backend.
    Types,
    /// Replace all comments with the backend's comments.csv and list them.
    Import {
        #[arg(long, short)]
        yes: bool,
    },
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn controller(
    api: Arc<HttpCommentsApi>,
    settings: &Settings,
    format: OutputFormat,
    form: PresetForm,
    assume_yes: bool,
) -> CommentListController {
    CommentListController::with_toast_duration(
        api,
        Surfaces {
            table: Arc::new(TerminalTable::new(format)),
            toast: Arc::new(TerminalToast),
            add_form: Arc::new(form),
            confirm: Arc::new(StdinConfirm::new(assume_yes)),
        },
        settings.toast_duration(),
    )
}

fn exit_code(succeeded: bool) -> ExitCode {
    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    init_tracing(&settings);
    info!(server_url = %settings.server_url, "moderator starting");

    let api = Arc::new(
        HttpCommentsApi::new(&settings.server_url)
            .with_context(|| format!("cannot use server url '{}'", settings.server_url))?,
    );
    let format = args.format;

    let code = match args.command {
        Command::List { comment_type } => {
            let controller = controller(api, &settings, format, PresetForm::default(), false);
            let outcome = controller.load_comments(comment_type.as_deref()).await;
            exit_code(outcome != LoadOutcome::Failed)
        }
        Command::Add {
            comment_type,
            text,
            severity,
        } => {
            let form = PresetForm::new(comment_type, text, severity);
            let controller = controller(api, &settings, format, form, false);
            exit_code(controller.add_comment().await == AddOutcome::Added)
        }
        Command::Delete { id, yes } => {
            let controller = controller(api, &settings, format, PresetForm::default(), yes);
            exit_code(controller.delete_comment(&id).await != DeleteOutcome::Failed)
        }
        Command::Show { id } => {
            let comment = api
                .get_comment(&id)
                .await
                .with_context(|| format!("failed to fetch comment {id}"))?;
            println!("{}", serde_json::to_string_pretty(&comment)?);
            ExitCode::SUCCESS
        }
        Command::Edit {
            id,
            text,
            comment_type,
            severity,
        } => {
            let update = CommentUpdate {
                comment: text,
                comment_type,
                severity,
            };
            let comment = api
                .update_comment(&id, &update)
                .await
                .with_context(|| format!("failed to update comment {id}"))?;
            println!("{}", serde_json::to_string_pretty(&comment)?);
            ExitCode::SUCCESS
        }
        Command::Types => {
            let types = api
                .list_types()
                .await
                .context("failed to list comment types")?;
            for comment_type in types {
                println!("{comment_type}");
            }
            ExitCode::SUCCESS
        }
        Command::Import { yes } => {
            let controller = controller(api, &settings, format, PresetForm::default(), yes);
            exit_code(controller.import_comments().await != ImportOutcome::Failed)
        }
    };

    Ok(code)
}
