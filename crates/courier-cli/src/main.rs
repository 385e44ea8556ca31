mod client;
mod output;

use std::path::PathBuf;

use anyhow::{Context, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use clap::{ArgGroup, Args, Parser, Subcommand};

use courier_types::api::SendImageRequest;

use crate::client::ApiClient;
use crate::output::ChatOrder;

/// wat — a command-line tool for a courier messaging gateway
#[derive(Parser, Debug)]
#[command(name = "wat", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the gateway
    #[arg(long, global = true, env = "COURIER_URL", default_value = "http://127.0.0.1:3000")]
    url: String,

    /// API token (takes precedence over --token-file)
    #[arg(long, global = true, env = "COURIER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// File holding the API token
    #[arg(long, global = true, value_name = "FILE", default_value = "api.token")]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// list all chats
    Chats(ChatsCmd),

    /// send a text message
    Message(MessageCmd),

    /// show recent messages of a chat
    Messages(MessagesCmd),

    /// send an image
    Image(ImageCmd),
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("ordering")
        .args(["reverse_chronological_order", "alphabetical_order", "chronological_order"])
        .multiple(false)
))]
struct ChatsCmd {
    /// how many chats to print
    #[arg(short, long)]
    limit: Option<usize>,

    /// chronological order
    #[arg(short, long)]
    chronological_order: bool,

    /// reverse chronological order (default)
    #[arg(short, long)]
    reverse_chronological_order: bool,

    /// alphabetical order
    #[arg(short, long)]
    alphabetical_order: bool,
}

impl ChatsCmd {
    fn order(&self) -> ChatOrder {
        if self.chronological_order {
            ChatOrder::Chronological
        } else if self.alphabetical_order {
            ChatOrder::Alphabetical
        } else {
            ChatOrder::ReverseChronological
        }
    }
}

#[derive(Args, Debug)]
struct MessageCmd {
    /// number or chat id of the receiver
    to: String,
    /// text message
    message: String,
}

#[derive(Args, Debug)]
struct MessagesCmd {
    /// number or chat id
    chat: String,
    /// how many messages to fetch (server default: 10)
    #[arg(short, long)]
    limit: Option<u32>,
}

#[derive(Args, Debug)]
struct ImageCmd {
    /// number or chat id of the receiver
    to: String,
    /// image file to send
    file: PathBuf,
    /// caption shown under the image
    #[arg(short, long)]
    caption: Option<String>,
    /// content type (guessed from the file extension when omitted)
    #[arg(short, long)]
    mimetype: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose { "wat=debug" } else { "wat=warn" })
        .with_writer(std::io::stderr)
        .init();

    let token = match cli.token.clone() {
        Some(token) => token,
        None => std::fs::read_to_string(&cli.token_file)
            .with_context(|| format!("cannot read token file {}", cli.token_file.display()))?
            .trim()
            .to_string(),
    };
    let client = ApiClient::new(&cli.url, token)?;

    match cli.command {
        Commands::Chats(cmd) => handle_chats(&client, &cmd).await?,
        Commands::Message(cmd) => {
            let sent = client.send_text(&cmd.to, &cmd.message).await?;
            println!("Sent to {}", sent.to);
        }
        Commands::Messages(cmd) => {
            for message in client.messages(&cmd.chat, cmd.limit).await? {
                println!("{}", output::message_line(&message));
            }
        }
        Commands::Image(cmd) => handle_image(&client, cmd).await?,
    }

    Ok(())
}

async fn handle_chats(client: &ApiClient, cmd: &ChatsCmd) -> Result<()> {
    let mut chats = client.chats().await?;
    output::order_chats(&mut chats, cmd.order());
    let limit = cmd.limit.unwrap_or(chats.len());
    for chat in chats.iter().take(limit) {
        println!("{}", output::chat_line(chat));
    }
    Ok(())
}

async fn handle_image(client: &ApiClient, cmd: ImageCmd) -> Result<()> {
    let bytes = tokio::fs::read(&cmd.file)
        .await
        .with_context(|| format!("cannot read {}", cmd.file.display()))?;
    let mimetype = cmd
        .mimetype
        .unwrap_or_else(|| output::guess_image_mimetype(&cmd.file).to_string());

    let sent = client
        .send_image(&SendImageRequest {
            number: Some(cmd.to),
            base64: Some(B64.encode(&bytes)),
            caption: cmd.caption,
            mimetype: Some(mimetype),
        })
        .await?;
    println!("Image sent to {}", sent.to);
    Ok(())
}
