mod client;
mod session;
#[cfg(test)]
mod test_support;

use std::io::{self, Read};
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::BackendClient;
use serde::Serialize;
use session::{AnalyzeSession, BioSession, OpenerSession, ReplySession};
use tracing::info;
use url::Url;
use wingman_shared::{Direction, Platform, Tone, Vibe};

#[derive(Parser)]
#[command(name = "wingman", version, about = "Replies, openers, bios and chat reads")]
struct Cli {
    /// Base URL of the wingman server
    #[arg(long, env = "WINGMAN_SERVER_URL", default_value = "http://127.0.0.1:5000")]
    server: Url,

    /// Print the raw JSON response instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Three replies to a message you received
    Reply {
        message: String,
        /// smooth, playful, calm or savage
        #[arg(long, default_value = "smooth")]
        tone: Tone,
        /// Adjust the reply at this index (0-based) after generating
        #[arg(long, requires = "direction")]
        adjust: Option<usize>,
        /// bolder or safer
        #[arg(long)]
        direction: Option<Direction>,
    },
    /// Make one reply bolder or safer
    Adjust {
        reply: String,
        #[arg(long)]
        direction: Direction,
    },
    /// Read a chat transcript. Use `-` to read it from stdin.
    Analyze { chat: String },
    /// Opening lines for a platform (instagram, whatsapp, dating, inperson)
    Opener {
        #[arg(long)]
        platform: Platform,
    },
    /// Profile bios from your hobbies and/or vibe
    Bio {
        #[arg(long, default_value = "")]
        hobbies: String,
        #[arg(long)]
        vibe: Option<Vibe>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    dotenv::dotenv().ok();

    // Log to a file so stdout only carries results
    let log_file = std::fs::File::create("wingman-cli.log").ok();
    if let Some(file) = log_file {
        tracing_subscriber::fmt()
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    let cli = Cli::parse();
    info!("Using server {}", cli.server);
    let client = BackendClient::new(cli.server.clone());

    let shown = match cli.command {
        Command::Reply {
            message,
            tone,
            adjust,
            direction,
        } => {
            let mut session = ReplySession::new(message, tone);
            if !session.can_generate() {
                return Ok(ExitCode::FAILURE);
            }
            let mut ok = session.generate(&client).await;
            if let (true, Some(index), Some(direction)) = (ok, adjust, direction) {
                ok = session.adjust(&client, index, direction).await;
            }
            ok && show_replies(session.replies(), cli.json)?
        }
        Command::Adjust { reply, direction } => {
            let mut session = ReplySession::with_replies(vec![reply]);
            session.adjust(&client, 0, direction).await
                && show(&session.replies()[0], cli.json, |reply| reply.clone())?
        }
        Command::Analyze { chat } => {
            let chat = if chat == "-" { read_stdin()? } else { chat };
            let mut session = AnalyzeSession {
                chat,
                ..AnalyzeSession::default()
            };
            match session.run(&client).await {
                Some(analysis) => show(analysis, cli.json, |a| {
                    format!(
                        "Interest: {}/10\nInvesting more: {}\nDry: {}\n\n{}\n\nNext move: {}",
                        a.interest_level,
                        a.investing_more,
                        if a.is_dry { "yes" } else { "no" },
                        a.analysis,
                        a.suggestion
                    )
                })?,
                None => false,
            }
        }
        Command::Opener { platform } => {
            let mut session = OpenerSession {
                platform: Some(platform),
                ..OpenerSession::default()
            };
            match session.run(&client).await {
                Some(openers) => show(openers, cli.json, |o| {
                    format!("Safe:  {}\nFunny: {}\nBold:  {}", o.safe, o.funny, o.bold)
                })?,
                None => false,
            }
        }
        Command::Bio { hobbies, vibe } => {
            let mut session = BioSession {
                hobbies,
                vibe,
                ..BioSession::default()
            };
            match session.run(&client).await {
                Some(bios) => show(bios, cli.json, |b| {
                    format!(
                        "Attractive:\n{}\n\nConfident:\n{}\n\nFunny:\n{}",
                        b.attractive, b.confident, b.funny
                    )
                })?,
                None => false,
            }
        }
    };

    Ok(if shown {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn show<T: Serialize>(value: &T, json: bool, render: impl FnOnce(&T) -> String) -> Result<bool> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", render(value));
    }
    Ok(true)
}

fn show_replies(replies: &[String], json: bool) -> Result<bool> {
    show(&replies, json, |replies| {
        replies
            .iter()
            .enumerate()
            .map(|(i, reply)| format!("[{i}] {reply}"))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn read_stdin() -> Result<String> {
    let mut chat = String::new();
    io::stdin()
        .read_to_string(&mut chat)
        .context("Failed to read chat from stdin")?;
    Ok(chat)
}
