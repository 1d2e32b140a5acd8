//! Line-oriented interactive session.
//!
//! Each input line is one user event: navigation, a checkbox toggle or a slider move. Events are
//! applied in order and each one yields a freshly rendered scene.
use std::str::FromStr;

use crate::{
    foundation::{
        core::Year,
        error::{SceneError, SceneResult},
    },
    render::page::RenderedScene,
    scene::{controller::SceneController, registry::SceneKind},
};

pub const HELP: &str = "\
commands:
  next | n            next scene (wraps to the first)
  prev | p            previous scene
  replay | r          back to the first scene
  goto <scene>        overall, comparison or interactive
  toggle <series>     flip a series checkbox (interactive scene)
  year <yyyy>         move the year slider (interactive scene)
  show                re-render the current scene
  help                this text
  quit | q            leave";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Next,
    Prev,
    Replay,
    Goto(SceneKind),
    Toggle(String),
    Year(Year),
    Show,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = SceneError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let head = parts
            .next()
            .ok_or_else(|| SceneError::validation("empty command"))?
            .to_ascii_lowercase();
        let rest = parts.collect::<Vec<_>>().join(" ");
        let need_arg = |what: &str| required(&rest, &head, what);

        let cmd = match head.as_str() {
            "next" | "n" => Self::Next,
            "prev" | "p" | "previous" => Self::Prev,
            "replay" | "r" => Self::Replay,
            "goto" => Self::Goto(need_arg("scene id")?.parse()?),
            "toggle" => Self::Toggle(need_arg("series name")?),
            "year" => {
                let raw = need_arg("year")?;
                let y = raw.parse::<i32>().map_err(|_| {
                    SceneError::validation(format!("\"{raw}\" is not a year"))
                })?;
                Self::Year(Year(y))
            }
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            other => {
                return Err(SceneError::validation(format!(
                    "unknown command \"{other}\" (try \"help\")"
                )));
            }
        };
        Ok(cmd)
    }
}

fn required(arg: &str, head: &str, what: &str) -> SceneResult<String> {
    if arg.is_empty() {
        Err(SceneError::validation(format!("\"{head}\" needs a {what}")))
    } else {
        Ok(arg.to_string())
    }
}

/// What happened after one command.
#[derive(Debug)]
pub enum Outcome {
    /// The page must be replaced with this scene.
    Rendered(Box<RenderedScene>),
    /// Nothing changed (e.g. "prev" on the first scene).
    Unchanged,
    Help,
    Quit,
}

/// Apply one command to the controller.
pub fn execute(ctl: &mut SceneController, cmd: &Command) -> SceneResult<Outcome> {
    let shown = match cmd {
        Command::Next => ctl.advance()?,
        Command::Prev => match ctl.retreat()? {
            Some(shown) => shown,
            None => return Ok(Outcome::Unchanged),
        },
        Command::Replay => ctl.replay()?,
        Command::Goto(kind) => ctl.jump_to(*kind)?,
        Command::Toggle(key) => ctl.toggle_series(key)?,
        Command::Year(y) => ctl.set_year_bound(*y)?,
        Command::Show => ctl.render()?,
        Command::Help => return Ok(Outcome::Help),
        Command::Quit => return Ok(Outcome::Quit),
    };
    Ok(Outcome::Rendered(Box::new(shown)))
}
