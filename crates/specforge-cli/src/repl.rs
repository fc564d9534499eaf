use std::io::Write;

use anyhow::Result;
use specforge_chat::{
    Action, ActionsService, ChatState, Event, PendingExchange, PipelineError, SpecClientBox,
};
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tokio::sync::mpsc;

use crate::commands::help_text;
use crate::commands::SlashCommand;
use crate::render::render_message;
use crate::render::render_session;
use crate::render::render_status;

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive chat loop state: the conversation plus how much of it is on screen.
pub struct Repl {
    state: ChatState,
    action_tx: mpsc::UnboundedSender<Action>,
    printed: usize,
}

impl Repl {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Repl {
        return Repl {
            state: ChatState::new(),
            action_tx,
            printed: 0,
        };
    }

    fn dispatch(
        &mut self,
        admitted: Result<Option<PendingExchange>, PipelineError>,
        out: &mut impl Write,
    ) -> Result<()> {
        match admitted {
            Ok(Some(pending)) => {
                self.action_tx.send(Action::SpecRequest(pending))?;
                writeln!(out, "Generating specification...")?;
            }
            Ok(None) => {
                writeln!(out, "Nothing to retry.")?;
            }
            Err(PipelineError::ConcurrencyRejection) => {
                log::debug!("ignoring input while a request is in flight");
            }
            Err(err) => {
                log::debug!("input rejected: {err}");
            }
        }
        self.printed = self.state.messages().len();

        return Ok(());
    }

    pub fn handle_input(&mut self, input: &str, out: &mut impl Write) -> Result<Flow> {
        let Some(command) = SlashCommand::parse(input) else {
            let admitted = self.state.begin_send(input).map(Some);
            self.dispatch(admitted, out)?;
            return Ok(Flow::Continue);
        };

        match command {
            SlashCommand::Quit => return Ok(Flow::Quit),
            SlashCommand::Help => writeln!(out, "{}", help_text())?,
            SlashCommand::Session => writeln!(out, "{}", render_session(self.state.session()))?,
            SlashCommand::Clear => {
                self.state.clear();
                self.printed = 0;
                writeln!(out, "Conversation cleared.")?;
            }
            SlashCommand::Retry => {
                let admitted = self.state.begin_retry();
                self.dispatch(admitted, out)?;
            }
        }

        return Ok(Flow::Continue);
    }

    pub fn handle_event(&mut self, event: Event, out: &mut impl Write) -> Result<()> {
        let Event::SpecResponse(completed) = event;
        let message_id = completed.message_id.clone();
        if !self.state.complete(completed) {
            return Ok(());
        }

        let messages = self.state.messages();
        if let Some(status) = messages
            .iter()
            .find(|msg| msg.id == message_id)
            .and_then(render_status)
        {
            writeln!(out, "{status}")?;
        }
        for message in &messages[self.printed.min(messages.len())..] {
            writeln!(out, "\n{}\n", render_message(message))?;
        }
        self.printed = messages.len();

        return Ok(());
    }
}

pub async fn start(spec_client: SpecClientBox) -> Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();

    tokio::spawn(async move {
        if let Err(err) = ActionsService::start(spec_client, event_tx, &mut action_rx).await {
            log::error!("actions service stopped: {err:?}");
        }
    });

    let mut repl = Repl::new(action_tx);
    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    writeln!(stdout, "{}\n", help_text())?;
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if repl.handle_input(&line, &mut stdout)? == Flow::Quit {
                    break;
                }
            }
            Some(event) = event_rx.recv() => {
                writeln!(stdout)?;
                repl.handle_event(event, &mut stdout)?;
            }
        }
    }

    return Ok(());
}
