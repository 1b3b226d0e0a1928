//! Line-driven interactive session.
//!
//! A single task owns the [`AnalysisSession`]. It reads commands from an
//! input stream, spawns each analysis ticket on the runtime and applies
//! completions as they come back, re-rendering after every change.
//!
//! Commands:
//!   <text>   set the search text and list suggestions
//!   :N       select suggestion N (1-based)
//!   :r       retry after an error
//!   :h       help
//!   :q       quit
//!
//! On end of input the loop waits for in-flight calls before returning.

use crate::session::{AnalysisCompletion, AnalysisSession, AnalysisTicket, SessionState};
use crate::view;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::debug;

const HELP: &str = "Nhập tên tỉnh thành để tìm kiếm. :N chọn gợi ý thứ N, :r thử lại, :h trợ giúp, :q thoát.";
const NO_MATCH: &str = "Không tìm thấy tỉnh thành phù hợp.";
const NOTHING_TO_RETRY: &str = "Không có yêu cầu nào để thử lại.";

/// A parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Select(usize),
    Retry,
    Help,
    Quit,
}

impl Command {
    /// Parse one line of input. Unknown `:` commands fall back to help.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix(':') else {
            return Command::Query(trimmed.to_string());
        };
        match rest {
            "q" | "quit" => Command::Quit,
            "r" | "retry" => Command::Retry,
            "h" | "help" => Command::Help,
            n => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Command::Select(n - 1),
                _ => Command::Help,
            },
        }
    }
}

pub struct Repl<W> {
    session: AnalysisSession,
    out: W,
    completions_tx: mpsc::UnboundedSender<AnalysisCompletion>,
    completions_rx: mpsc::UnboundedReceiver<AnalysisCompletion>,
    in_flight: usize,
}

impl<W: AsyncWrite + Unpin> Repl<W> {
    pub fn new(session: AnalysisSession, out: W) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            session,
            out,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    /// Run until `:q` or end of input, returning the final state
    pub async fn run<R: AsyncBufRead + Unpin>(
        mut self,
        input: R,
    ) -> std::io::Result<(SessionState, W)> {
        let mut lines = input.lines();
        let mut input_open = true;

        self.write(&view::render_header()).await?;
        self.write(&view::render_state(self.session.state())).await?;

        loop {
            if !input_open && self.in_flight == 0 {
                break;
            }

            tokio::select! {
                line = lines.next_line(), if input_open => match line? {
                    Some(line) => {
                        if !self.handle(Command::parse(&line)).await? {
                            break;
                        }
                    }
                    None => {
                        debug!(in_flight = self.in_flight, "input closed");
                        input_open = false;
                    }
                },
                Some(completion) = self.completions_rx.recv() => {
                    self.in_flight -= 1;
                    if self.session.complete(completion) {
                        self.write(&view::render_state(self.session.state())).await?;
                    }
                }
            }
        }

        self.out.flush().await?;
        Ok((self.session.state().clone(), self.out))
    }

    /// Returns `false` to stop the loop
    async fn handle(&mut self, command: Command) -> std::io::Result<bool> {
        match command {
            Command::Quit => return Ok(false),
            Command::Help => self.write(HELP).await?,
            Command::Query(text) => {
                self.session.set_query(text);
                let listing = {
                    let suggestions = self.session.suggestions();
                    if suggestions.is_empty() {
                        (!self.session.query().is_empty() && self.session.selected().is_none())
                            .then(|| NO_MATCH.to_string())
                    } else {
                        Some(view::render_suggestions(&suggestions))
                    }
                };
                if let Some(listing) = listing {
                    self.write(&listing).await?;
                }
            }
            Command::Select(position) => match self.session.select_suggestion(position) {
                Some(ticket) => self.start(ticket).await?,
                None => self.write(NO_MATCH).await?,
            },
            Command::Retry => match self.session.retry() {
                Some(ticket) => self.start(ticket).await?,
                None => self.write(NOTHING_TO_RETRY).await?,
            },
        }
        Ok(true)
    }

    async fn start(&mut self, ticket: AnalysisTicket) -> std::io::Result<()> {
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let completion = ticket.run().await;
            // Receiver gone means the loop already quit
            let _ = tx.send(completion);
        });
        self.write(&view::render_state(self.session.state())).await
    }

    async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n\n").await
    }
}
