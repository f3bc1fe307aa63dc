//! Interactive board session.
//!
//! A line-oriented REPL over the workflow engine. Engine operations that
//! block on a dialog (password prompts, delete confirmations) are driven
//! through [`drive`], which runs the operation concurrently with a pump
//! that renders the active dialog request and feeds the typed answer back
//! into the service.

use std::future::Future;

use anyhow::{Context, Result};
use askboard_core::{BoardError, Capability, Inquiry, InquiryBoard, InquiryDraft};
use askboard_dialog::{DialogKind, DialogOptions, DialogRequest, DialogService};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

/// Interactive session state: the engine, the dialog channel and the
/// capability toggle the user controls.
pub struct Repl {
    board: InquiryBoard,
    dialogs: DialogService,
    capability: Capability,
    input: Lines<BufReader<Stdin>>,
}

impl Repl {
    pub fn new(board: InquiryBoard, dialogs: DialogService) -> Self {
        Self {
            board,
            dialogs,
            capability: Capability::default(),
            input: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Run the session until `quit` or end of input.
    pub async fn run(mut self) -> Result<()> {
        if let Err(e) = self.board.refresh().await {
            println!("  Could not load inquiries: {e}");
        }
        self.print_list();
        print_help();

        loop {
            let Some(line) = self.input.next_line().await? else {
                break;
            };
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }

            let (command, rest) = line.split_once(' ').unwrap_or((line.as_str(), ""));
            match command {
                "quit" | "exit" => break,
                "help" => print_help(),
                "list" => {
                    if let Err(e) = self.board.refresh().await {
                        println!("  Could not refresh: {e}");
                    }
                    self.print_list();
                }
                "operator" => {
                    self.capability = self.capability.toggled();
                    if self.capability.is_operator() {
                        println!("  Operator mode ON (local toggle, no credential check)");
                    } else {
                        println!("  Operator mode OFF");
                    }
                }
                "read" => self.cmd_read(rest).await?,
                "new" => self.cmd_new().await?,
                "reply" => self.cmd_reply(rest).await?,
                "clear" => self.cmd_clear(rest).await?,
                "delete" => self.cmd_delete(rest).await?,
                _ => println!("  Unknown command. Try 'help'."),
            }
        }

        Ok(())
    }

    // ── commands ─────────────────────────────────────────────────────

    async fn cmd_read(&mut self, rest: &str) -> Result<()> {
        let Some(id) = self.resolve_index(rest) else {
            return Ok(());
        };

        let fut = self.board.open(self.capability, &id);
        match drive(&self.dialogs, &mut self.input, fut).await? {
            Ok(inquiry) => print_detail(&inquiry, self.capability),
            Err(BoardError::AccessDenied) => {
                let fut = self
                    .dialogs
                    .alert("The password does not match.", DialogOptions::default());
                drive(&self.dialogs, &mut self.input, fut).await??;
            }
            Err(e) => println!("  Error: {e}"),
        }
        Ok(())
    }

    async fn cmd_new(&mut self) -> Result<()> {
        println!("  Title:");
        let title = self.read_line().await?;
        println!("  Author:");
        let author = self.read_line().await?;
        println!("  Password (used for deletion; empty for none):");
        let password = self.read_line().await?;
        println!("  Content:");
        let content = self.read_line().await?;
        println!("  Secret inquiry? [y/N]:");
        let is_secret = matches!(
            self.read_line().await?.trim().to_lowercase().as_str(),
            "y" | "yes"
        );

        let draft = InquiryDraft {
            title,
            content,
            author,
            password,
            is_secret,
        };

        match self.board.compose(draft).await {
            Ok(inquiry) => {
                println!("  Posted \"{}\". It is waiting for an answer.", inquiry.title);
                self.print_list();
            }
            Err(e) => println!("  Could not post: {e}"),
        }
        Ok(())
    }

    async fn cmd_reply(&mut self, rest: &str) -> Result<()> {
        let (index, text) = rest.split_once(' ').unwrap_or((rest, ""));
        let Some(id) = self.resolve_index(index) else {
            return Ok(());
        };
        if text.trim().is_empty() {
            println!("  Usage: reply <n> <answer text>");
            return Ok(());
        }

        match self.board.reply(self.capability, &id, text).await {
            Ok(inquiry) => print_detail(&inquiry, self.capability),
            Err(e) => println!("  Error: {e}"),
        }
        Ok(())
    }

    async fn cmd_clear(&mut self, rest: &str) -> Result<()> {
        let Some(id) = self.resolve_index(rest) else {
            return Ok(());
        };

        let fut = self.board.clear_reply(self.capability, &id);
        match drive(&self.dialogs, &mut self.input, fut).await? {
            Ok(Some(inquiry)) => print_detail(&inquiry, self.capability),
            Ok(None) => println!("  Kept the reply."),
            Err(e) => println!("  Error: {e}"),
        }
        Ok(())
    }

    async fn cmd_delete(&mut self, rest: &str) -> Result<()> {
        let Some(id) = self.resolve_index(rest) else {
            return Ok(());
        };

        let fut = self.board.delete(self.capability, &id);
        match drive(&self.dialogs, &mut self.input, fut).await? {
            Ok(true) => {
                println!("  Deleted.");
                self.print_list();
            }
            Ok(false) => println!("  Kept the inquiry."),
            Err(BoardError::AccessDenied) => {
                let fut = self
                    .dialogs
                    .alert("The password does not match.", DialogOptions::default());
                drive(&self.dialogs, &mut self.input, fut).await??;
            }
            Err(e) => println!("  Error: {e}"),
        }
        Ok(())
    }

    // ── helpers ──────────────────────────────────────────────────────

    /// Map a 1-based list index to the inquiry id, printing a usage hint
    /// when the argument is missing or out of range.
    fn resolve_index(&self, arg: &str) -> Option<String> {
        let Ok(index) = arg.trim().parse::<usize>() else {
            println!("  Give the inquiry number from 'list'.");
            return None;
        };
        let inquiries = self.board.inquiries();
        if index == 0 || index > inquiries.len() {
            println!("  No inquiry #{index}; the list has {} entries.", inquiries.len());
            return None;
        }
        Some(inquiries[index - 1].id.clone())
    }

    async fn read_line(&mut self) -> Result<String> {
        self.input
            .next_line()
            .await?
            .context("input closed")
    }

    fn print_list(&self) {
        let entries = self.board.entries(self.capability);
        if entries.is_empty() {
            println!();
            println!("  No inquiries yet. Use 'new' to post the first one.");
            println!();
            return;
        }

        println!();
        println!("  Inquiries ({}):", entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let lock = if entry.is_secret { " *" } else { "  " };
            println!(
                "  {:>3}. [{:>8}]{} {} — {} ({})",
                i + 1,
                entry.status,
                lock,
                entry.title,
                entry.author,
                entry.created_at.format("%Y-%m-%d"),
            );
        }
        println!();
    }
}

/// Render a full inquiry detail. The stored password is shown only in
/// operator mode.
fn print_detail(inquiry: &Inquiry, capability: Capability) {
    println!();
    let lock = if inquiry.is_secret { " (secret)" } else { "" };
    println!("  {}{}", inquiry.title, lock);
    println!(
        "  by {} on {} — {}",
        inquiry.author,
        inquiry.created_at.format("%Y-%m-%d %H:%M"),
        inquiry.status,
    );
    println!();
    println!("  {}", inquiry.content);
    println!();
    match &inquiry.reply {
        Some(reply) => println!("  Staff answer: {reply}"),
        None => println!("  No answer yet."),
    }
    if capability.is_operator() {
        println!("  [operator] stored password: {}", inquiry.password);
    }
    println!();
}

fn print_help() {
    println!("  Commands:");
    println!("    list          - refresh and show all inquiries");
    println!("    read <n>      - open an inquiry (secret ones ask for the password)");
    println!("    new           - post a new inquiry");
    println!("    reply <n> <t> - answer an inquiry (operator)");
    println!("    clear <n>     - retract an answer (operator)");
    println!("    delete <n>    - delete an inquiry");
    println!("    operator      - toggle operator mode");
    println!("    help / quit");
    println!();
}

// ---------------------------------------------------------------------------
// Dialog pump
// ---------------------------------------------------------------------------

/// Run `fut` while answering dialog requests from the terminal.
///
/// The engine suspends inside `fut` whenever it asks a question; this
/// pump picks the request up off the watch channel, renders it, reads the
/// answer from stdin and resolves the slot so `fut` can continue.
async fn drive<T>(
    dialogs: &DialogService,
    input: &mut Lines<BufReader<Stdin>>,
    fut: impl Future<Output = T>,
) -> Result<T> {
    tokio::pin!(fut);
    let mut requests = dialogs.subscribe();

    loop {
        let pending = requests.borrow_and_update().clone();
        if let Some(request) = pending {
            answer_request(dialogs, input, &request).await?;
            continue;
        }

        tokio::select! {
            result = &mut fut => return Ok(result),
            changed = requests.changed() => {
                changed.context("dialog service closed")?;
            }
        }
    }
}

/// Render one dialog request and resolve it from terminal input.
async fn answer_request(
    dialogs: &DialogService,
    input: &mut Lines<BufReader<Stdin>>,
    request: &DialogRequest,
) -> Result<()> {
    println!();
    println!("  ┌ {}", request.title);
    println!("  │ {}", request.message);

    match request.kind {
        DialogKind::Alert => {
            println!("  └ [{}] press Enter", request.confirm_label);
            let _ = input.next_line().await?;
            dialogs.accept(None).await?;
        }
        DialogKind::Confirm => {
            let cancel = request.cancel_label.as_deref().unwrap_or("No");
            println!(
                "  └ {} = y, {} = anything else",
                request.confirm_label, cancel
            );
            let line = input.next_line().await?.context("input closed")?;
            if matches!(line.trim().to_lowercase().as_str(), "y" | "yes") {
                dialogs.accept(None).await?;
            } else {
                dialogs.cancel().await?;
            }
        }
        DialogKind::Prompt => {
            let hint = if request.secret_input {
                " (input is visible in this terminal)"
            } else {
                ""
            };
            println!("  └ type the answer{hint}; an empty line cancels");
            let line = input.next_line().await?.context("input closed")?;
            if line.is_empty() {
                dialogs.cancel().await?;
            } else {
                dialogs.accept(Some(line)).await?;
            }
        }
    }
    Ok(())
}
