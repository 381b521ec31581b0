//! Line-oriented terminal front end.
//!
//! Reads commands, calls the controller, and prints state rendered from
//! snapshots. It never touches controller state directly.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::controller::{InteractionController, Outcome};

pub mod command;
pub mod render;

pub use command::{parse, Command, HELP};
pub use render::render;

const PROMPT: &str = "cinegraph> ";

/// Whether the session should keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

pub struct Session<W> {
    controller: InteractionController,
    out: W,
}

impl<W: AsyncWrite + Unpin> Session<W> {
    pub fn new(controller: InteractionController, out: W) -> Self {
        Self { controller, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Runs until `quit` or end of input
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> anyhow::Result<()> {
        let mut lines = input.lines();

        self.write(&format!("{}\n", HELP)).await?;
        self.write(PROMPT).await?;

        while let Some(line) = lines.next_line().await? {
            if self.handle_line(&line).await? == Flow::Stop {
                break;
            }
            self.write(PROMPT).await?;
        }

        Ok(())
    }

    pub async fn handle_line(&mut self, line: &str) -> anyhow::Result<Flow> {
        match parse(line) {
            Ok(command) => self.execute(command).await,
            Err(e) => {
                self.write(&format!("{}\n", e)).await?;
                Ok(Flow::Continue)
            }
        }
    }

    pub async fn execute(&mut self, command: Command) -> anyhow::Result<Flow> {
        match command {
            Command::Empty => return Ok(Flow::Continue),
            Command::Quit => return Ok(Flow::Stop),
            Command::Help => {
                self.write(&format!("{}\n", HELP)).await?;
                return Ok(Flow::Continue);
            }
            Command::Show => {}
            Command::Search(query) => {
                self.controller.set_query(&query).await;
                if self.controller.submit_search().await == Outcome::Skipped {
                    self.write("Type a movie name to search.\n").await?;
                    return Ok(Flow::Continue);
                }
                let snapshot = self.controller.snapshot().await;
                if snapshot.error.is_none() && snapshot.search_results.is_empty() {
                    self.write("No movies found.\n").await?;
                }
            }
            Command::Pick(position) => {
                let results = self.controller.snapshot().await.search_results;
                match position.checked_sub(1).and_then(|i| results.get(i)) {
                    Some(movie) => self.controller.select_movie(movie.id).await,
                    None => {
                        self.write(&format!("No search result #{}.\n", position)).await?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            Command::EnterId(id) => self.controller.enter_movie_id(id).await,
            Command::Recommend(id) => {
                if id.is_some() {
                    self.controller.enter_movie_id(id).await;
                }
                if self.controller.recommend().await == Outcome::Skipped {
                    self.write("Pick a search result or enter a movie id first.\n")
                        .await?;
                    return Ok(Flow::Continue);
                }
                let snapshot = self.controller.snapshot().await;
                if snapshot.error.is_none() && snapshot.recommendations.is_empty() {
                    self.write("No recommendations for this movie.\n").await?;
                }
            }
        }

        let snapshot = self.controller.snapshot().await;
        self.write(&render(&snapshot)).await?;
        Ok(Flow::Continue)
    }

    async fn write(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await
    }
}
