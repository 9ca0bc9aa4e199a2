use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use uuid::Uuid;

const RATE_LIMIT_MESSAGE: &str =
    "The AI service is currently rate-limited. Please wait a few seconds and try again; free models have usage caps.";
const FALLBACK_DETAIL: &str = "Request failed";

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {detail}")]
    Server { status: u16, detail: String },
    #[error("stdin: {0}")]
    Io(#[from] io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "folio-cli", about = "Terminal client for the portfolio chat and contact API")]
struct Cli {
    #[arg(long, env = "FOLIO_BASE_URL", default_value = "http://127.0.0.1:8000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ask the resume assistant. Starts an interactive session when no
    /// message is given.
    Chat { message: Option<String> },
    /// Send a contact form submission.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// Print the resume JSON.
    Resume,
    /// Check the API health endpoint.
    Ping,
}

struct Api {
    http: reqwest::Client,
    base_url: String,
}

impl Api {
    fn new(base_url: &str) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.trim_end_matches('/').to_owned() }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, CliError> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }

    async fn get(&self, path: &str) -> Result<Value, CliError> {
        let response = self.http.get(self.url(path)).send().await?;
        read_json(response).await
    }

    /// One attempt; no retries on any failure.
    async fn chat(&self, session_id: &str, message: &str) -> Result<String, CliError> {
        let reply = self
            .post("/api/chat", &json!({ "message": message, "session_id": session_id }))
            .await?;
        reply
            .get("response")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or(CliError::MissingField("response"))
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, CliError> {
    let status = response.status();
    let text = response.text().await?;
    if !status.is_success() {
        return Err(CliError::Server { status: status.as_u16(), detail: detail_of(&text) });
    }
    Ok(serde_json::from_str(&text)?)
}

/// `detail` from an error body, or a generic message when absent.
fn detail_of(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_owned))
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| FALLBACK_DETAIL.to_owned())
}

fn is_rate_limit(text: &str) -> bool {
    text.contains("429") || text.to_lowercase().contains("rate")
}

/// What the chat user sees when a message fails.
fn user_facing(err: &CliError) -> String {
    let text = match err {
        CliError::Server { detail, .. } => detail.clone(),
        other => other.to_string(),
    };
    if is_rate_limit(&text) {
        RATE_LIMIT_MESSAGE.to_owned()
    } else {
        format!(
            "Something went wrong: {text}. Make sure the backend server is running and your OpenRouter API key is set."
        )
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let api = Api::new(&cli.base_url);

    match cli.command {
        Command::Chat { message: Some(message) } => run_chat_once(&api, &message).await,
        Command::Chat { message: None } => run_chat_repl(&api).await,
        Command::Contact { name, email, message } => run_contact(&api, &name, &email, &message).await,
        Command::Resume => {
            let resume = api.get("/api/resume").await?;
            println!("{}", serde_json::to_string_pretty(&resume)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Ping => {
            let health = api.get("/api/health").await?;
            println!("{}", health.get("status").and_then(Value::as_str).unwrap_or("unknown"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_chat_once(api: &Api, message: &str) -> Result<ExitCode, CliError> {
    let session_id = Uuid::new_v4().to_string();
    match api.chat(&session_id, message.trim()).await {
        Ok(reply) => {
            println!("{reply}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{}", user_facing(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn run_chat_repl(api: &Api) -> Result<ExitCode, CliError> {
    let session_id = Uuid::new_v4().to_string();
    eprintln!("session {session_id}; Ctrl-D to quit");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        match api.chat(&session_id, message).await {
            Ok(reply) => println!("{reply}\n"),
            Err(e) => println!("{}\n", user_facing(&e)),
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn run_contact(api: &Api, name: &str, email: &str, message: &str) -> Result<ExitCode, CliError> {
    let body = json!({ "name": name, "email": email, "message": message });
    match api.post("/api/contact", &body).await {
        Ok(_) => {
            println!("sent");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("error");
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
