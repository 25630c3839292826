//! Interactive terminal search page.
//!
//! The page redraws whenever a key is handled or the session publishes a new
//! snapshot, so responses landing while the user is idle show up at once.

mod app;
mod ui;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use logseek_core::SearchSessionHandle;
use ratatui::DefaultTerminal;

use self::app::{Action, App};

/// Runs the page on the current terminal until the user quits.
///
/// # Errors
/// - Terminal I/O failed or the session stopped underneath the page
pub async fn run(handle: SearchSessionHandle) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &handle).await;
    ratatui::restore();
    result
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    handle: &SearchSessionHandle,
) -> anyhow::Result<()> {
    let mut app = App::new();
    let mut events = EventStream::new();
    let mut snapshots = handle.subscribe();

    loop {
        let view = handle.render();
        terminal.draw(|frame| ui::draw(frame, &app, &view))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) => match app.handle_key(key) {
                    Some(Action::SetQuery(text)) => handle.set_query(text).await?,
                    Some(Action::Submit) => {
                        handle.submit_search().await?;
                    }
                    Some(Action::Quit) => break,
                    None => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            changed = snapshots.changed() => {
                if changed.is_err() {
                    tracing::debug!("Session closed, leaving search page");
                    break;
                }
            }
        }
    }

    Ok(())
}
