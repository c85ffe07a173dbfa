//! Headless `--agent` mode: a blocking loop that reads one JSON
//! [`GameAction`] per stdin line and answers each with one JSON line.
//!
//! ## Protocol
//!
//! Every non-empty input line is queued as an agent action and one fixed
//! tick is run. The reply is the serialized [`ActionResult`], or
//! `{"parse_error": "..."}` when the line is not a valid action. An input line
//! of `quit` ends the session.

use std::io::{BufRead, Write};

use bevy::prelude::*;
use serde::Serialize;

use simulation::game_actions::{
    ActionError, ActionQueue, ActionResult, ActionResultLog, ActionSource, GameAction,
};
use simulation::sign_window::SignUi;
use simulation::TickCounter;

#[derive(Serialize)]
#[serde(untagged)]
enum AgentReply {
    Result(ActionResult),
    ParseError { parse_error: String },
}

pub fn run_agent_mode() {
    let mut app = crate::headless_app(SignUi::default());
    app.add_plugins(simulation::SimulationPlugin);
    // Startup systems and resource initialisation.
    app.update();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut stdout = stdout.lock();

    eprintln!("themepark agent mode ready, one GameAction JSON per line");

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("stdin read error: {e}");
                break;
            }
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "quit" {
            break;
        }

        let reply = match serde_json::from_str::<GameAction>(line) {
            Ok(action) => AgentReply::Result(apply(&mut app, action)),
            Err(e) => AgentReply::ParseError {
                parse_error: e.to_string(),
            },
        };

        match serde_json::to_string(&reply) {
            Ok(json) => {
                let _ = writeln!(stdout, "{json}");
                let _ = stdout.flush();
            }
            Err(e) => eprintln!("failed to encode reply: {e}"),
        }
    }

    let dropped = app
        .world_mut()
        .resource_mut::<ActionQueue>()
        .cancel_from(ActionSource::Agent);
    let tally = app.world().resource::<ActionResultLog>().tally(ActionSource::Agent);
    eprintln!(
        "themepark agent mode shutting down: {} applied, {} rejected, net cost {}, {} dropped",
        tally.applied, tally.rejected, tally.net_cost, dropped
    );
}

/// Queue `action`, run one fixed tick and return what the executor logged.
fn apply(app: &mut App, action: GameAction) -> ActionResult {
    let tick = app
        .world()
        .get_resource::<TickCounter>()
        .map(|t| t.0)
        .unwrap_or(0);
    app.world_mut()
        .resource_mut::<ActionQueue>()
        .push(tick, ActionSource::Agent, action);

    app.world_mut().run_schedule(FixedUpdate);

    // The executor logs exactly one entry per drained action.
    app.world()
        .get_resource::<ActionResultLog>()
        .and_then(|log| log.last_result().cloned())
        .unwrap_or(ActionResult::Error(ActionError::Disallowed))
}
