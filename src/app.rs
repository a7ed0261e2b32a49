//! Application state and the outer command loop.
//!
//! `App` owns the chat backend, the LLM client and the prompting context,
//! and drives the session flow: dialog navigator -> chat mode REPL ->
//! message pager. Each full-screen session returns a signal and the loop
//! here decides what happens next (explicit `match`, no re-entrant
//! recursion), so load-older round trips keep the stack flat and the
//! terminal is always released before any network fetch runs.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::chat::{ChatStore, DialogEntry, MessageList};
use crate::commands::{self, ChatCommand, ParseOutcome};
use crate::llm::{prompt, ContextStore, OllamaClient};
use crate::ui::{navigator, pager, NavSignal, PagerSignal};

/// Messages fetched when a chat is first opened.
const INITIAL_BATCH: usize = 10;
/// Messages fetched per load-older round trip.
const OLDER_BATCH: usize = 100;

/// What the chat-mode loop should do after a command.
enum ChatFlow {
    Continue,
    Back,
}

pub struct App<C: ChatStore> {
    chat: C,
    llm: OllamaClient,
    context: ContextStore,
}

impl<C: ChatStore> App<C> {
    pub fn new(chat: C, llm: OllamaClient) -> Self {
        Self { chat, llm, context: ContextStore::new() }
    }

    /// Top-level loop: navigate dialogs until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let dialogs = self.chat.fetch_dialogs().await.context("failed to list dialogs")?;
            match navigator::run_navigator(&dialogs)? {
                NavSignal::Quit => {
                    println!("Exiting...");
                    return Ok(());
                }
                NavSignal::Back => continue,
                NavSignal::Selected(dialog) => {
                    info!(dialog = %dialog.name, "entering chat mode");
                    self.chat_mode(dialog).await?;
                }
            }
        }
    }

    /// Line-oriented command loop for one chat. Commands come from the
    /// prompt or from the pager's command line; both go through the same
    /// dispatcher.
    async fn chat_mode(&mut self, dialog: DialogEntry) -> Result<()> {
        println!("\nYou are now in chat mode with: {}", dialog.name);
        print!("{}", commands::help_text());

        // A command the pager emitted, handled before reading stdin again.
        let mut pending: Option<String> = None;

        loop {
            let line = match pending.take() {
                Some(cmd) => cmd,
                None => match read_line(&format!("{}> ", dialog.name))? {
                    Some(line) => line,
                    None => return Ok(()), // stdin closed
                },
            };
            if line.trim().is_empty() {
                continue;
            }

            match commands::parse(&line) {
                ParseOutcome::Command(ChatCommand::Back) => {
                    println!("Returning to chat selection...");
                    return Ok(());
                }
                ParseOutcome::Command(ChatCommand::View) => {
                    // The pager may hand back another command to dispatch.
                    pending = self.view_messages(&dialog).await?;
                }
                ParseOutcome::Command(cmd) => match self.handle_command(&dialog, cmd).await? {
                    ChatFlow::Continue => {}
                    ChatFlow::Back => return Ok(()),
                },
                ParseOutcome::Usage(usage) => println!("{usage}"),
                ParseOutcome::Unknown => {
                    println!("Unknown command. Type /help for a list of commands.");
                }
            }
        }
    }

    /// The pager round-trip loop: run a viewing session, and on `LoadOlder`
    /// fetch history and re-enter with the scroll position shifted by the
    /// number of prepended messages. Returns a command to dispatch at chat
    /// level, if the user entered one inside the pager.
    async fn view_messages(&mut self, dialog: &DialogEntry) -> Result<Option<String>> {
        let initial = self
            .chat
            .fetch_recent(dialog.id, INITIAL_BATCH)
            .await
            .context("failed to fetch recent messages")?;
        let mut list = MessageList::from_batch(initial)?;
        let mut resume: Option<usize> = None;

        loop {
            let signal = pager::run_pager(&list, &dialog.name, resume)?;
            // The terminal session is torn down here; safe to await fetches.
            match signal {
                PagerSignal::Quit => return Ok(None),
                PagerSignal::Command(cmd) => return Ok(Some(cmd)),
                PagerSignal::LoadOlder { resume_offset } => {
                    let Some(oldest) = list.oldest_id() else {
                        resume = Some(resume_offset);
                        continue;
                    };
                    let older = self
                        .chat
                        .fetch_before(dialog.id, oldest, OLDER_BATCH)
                        .await
                        .context("failed to fetch older messages")?;
                    if older.is_empty() {
                        // No more history; resume viewing unchanged.
                        debug!(dialog = %dialog.name, "no older messages");
                        resume = Some(resume_offset);
                    } else {
                        let added = list.prepend_batch(older)?;
                        info!(added, oldest_id = ?list.oldest_id(), "loaded older messages");
                        resume = Some(resume_offset + added);
                    }
                }
            }
        }
    }

    async fn handle_command(&mut self, dialog: &DialogEntry, cmd: ChatCommand) -> Result<ChatFlow> {
        match cmd {
            // Routed in chat_mode before this dispatcher is reached.
            ChatCommand::View => {}
            ChatCommand::Back => return Ok(ChatFlow::Back),

            ChatCommand::Help => print!("{}", commands::help_text()),

            ChatCommand::Read(n) => {
                let messages = self.chat.fetch_recent(dialog.id, n).await?;
                if messages.is_empty() {
                    println!("No messages found.");
                }
                for msg in &messages {
                    println!("{}", msg.transcript_line());
                }
            }

            ChatCommand::Summarize(n) => {
                println!("\nFetching and summarizing last {n} messages...");
                let messages = self.chat.fetch_recent(dialog.id, n).await?;
                if messages.is_empty() {
                    println!("No messages found to summarize.");
                    return Ok(ChatFlow::Continue);
                }
                let transcript: Vec<String> =
                    messages.iter().map(|m| format!("{}: {}", m.sender, m.text)).collect();
                let request = prompt::build_summary_prompt(&transcript.join("\n"));
                println!("\nSummary of conversation:");
                println!("{}", "-".repeat(40));
                self.stream_answer(&request).await;
                println!("{}", "-".repeat(40));
            }

            ChatCommand::Add(n) => {
                println!("\nFetching last {n} messages to add to context...");
                let messages = self.chat.fetch_recent(dialog.id, n).await?;
                if messages.is_empty() {
                    println!("No messages found to add to context.");
                } else {
                    let added = self.context.add_messages(&messages);
                    println!(
                        "Added {added} messages to context. Total context size: {} messages",
                        self.context.len()
                    );
                }
            }

            ChatCommand::Show => println!("{}", self.context.display()),

            ChatCommand::Clear => {
                let dropped = self.context.clear();
                println!("Cleared {dropped} messages from context");
            }

            ChatCommand::Prompt => {
                let Some(question) = read_line("Enter your prompt:\n")? else {
                    return Ok(ChatFlow::Continue);
                };
                if question.trim().is_empty() {
                    return Ok(ChatFlow::Continue);
                }
                let request =
                    prompt::build_context_prompt(&self.context.prompt_block(), question.trim());
                println!("\nProcessing prompt with context...");
                println!("{}", "-".repeat(40));
                self.stream_answer(&request).await;
                println!("{}", "-".repeat(40));
            }

            ChatCommand::Send => {
                let Some(text) = read_line("Enter the message to send:\n")? else {
                    return Ok(ChatFlow::Continue);
                };
                let text = text.trim().to_string();
                if text.is_empty() {
                    println!("Nothing to send.");
                    return Ok(ChatFlow::Continue);
                }
                let Some(confirm) = read_line("Send this message? (y/n): ")? else {
                    return Ok(ChatFlow::Continue);
                };
                if confirm.trim().eq_ignore_ascii_case("y") {
                    self.chat.send_message(dialog.id, &text).await?;
                    println!("Message sent!");
                } else {
                    println!("Message not sent.");
                }
            }
        }
        Ok(ChatFlow::Continue)
    }

    /// Stream a model answer to stdout, fragment by fragment. Endpoint
    /// failures are reported inline; nothing here is fatal.
    async fn stream_answer(&self, request: &str) {
        let result = self
            .llm
            .generate_streamed(request, |fragment| {
                print!("{fragment}");
                std::io::stdout().flush().ok();
            })
            .await;
        println!();
        if let Err(e) = result {
            warn!(error = %e, "LLM request failed");
            println!("Error talking to the model: {e:#}");
        }
    }
}

/// Prompt on stdout and read one line from stdin. `None` on EOF.
fn read_line(prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush().context("failed to flush stdout")?;
    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
