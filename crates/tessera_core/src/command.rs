//! Operator commands
//!
//! Hosts with typed controls build [`EngineCommand`] values directly. Hosts
//! that only have strings (a console, a script, a URL fragment) go through
//! [`FromStr`]:
//!
//! ```text
//! toggle:<axis>            toggle:rx, toggle:cameraRz, toggle:rw
//! reset
//! set:<param>=<value>      set:fov=75, set:cameraZ=12
//! orientation:on|off
//! touch:on|off
//! permission:grant|deny
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tessera_input::{AxisId, AxisParseError, OrientationState};

use crate::projection::ProjectionParam;

/// Every command the engine understands
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EngineCommand {
    ToggleAxis(AxisId),
    ResetAll,
    SetParameter(ProjectionParam, f32),
    SetOrientationEnabled(bool),
    SetTouchEnabled(bool),
    /// The user's answer to a pending orientation permission prompt
    ResolvePermission(bool),
}

/// What a command changed
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum CommandOutcome {
    AxisToggled { axis: AxisId, enabled: bool },
    Reset,
    /// Target stored after range limiting
    ParameterTarget { param: ProjectionParam, value: f32 },
    Orientation(OrientationState),
    TouchEnabled(bool),
    /// Unparseable string command; nothing changed
    Ignored,
}

/// Why a string command was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum CommandParseError {
    /// Verb not recognised
    UnknownCommand(String),
    UnknownAxis(AxisParseError),
    UnknownParameter(String),
    /// Argument missing or not understood
    InvalidArgument { command: String, argument: String },
}

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandParseError::UnknownCommand(s) => write!(f, "unknown command '{}'", s),
            CommandParseError::UnknownAxis(e) => write!(f, "{}", e),
            CommandParseError::UnknownParameter(s) => write!(f, "unknown parameter '{}'", s),
            CommandParseError::InvalidArgument { command, argument } => {
                write!(f, "invalid argument '{}' for '{}'", argument, command)
            }
        }
    }
}

impl std::error::Error for CommandParseError {}

impl From<AxisParseError> for CommandParseError {
    fn from(e: AxisParseError) -> Self {
        CommandParseError::UnknownAxis(e)
    }
}

fn parse_switch(command: &str, arg: &str, on: &str, off: &str) -> Result<bool, CommandParseError> {
    if arg == on {
        Ok(true)
    } else if arg == off {
        Ok(false)
    } else {
        Err(CommandParseError::InvalidArgument {
            command: command.to_string(),
            argument: arg.to_string(),
        })
    }
}

impl FromStr for EngineCommand {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (verb, arg) = s.split_once(':').unwrap_or((s, ""));
        let arg = arg.trim();

        match verb {
            "toggle" => Ok(EngineCommand::ToggleAxis(arg.parse()?)),
            "reset" => Ok(EngineCommand::ResetAll),
            "set" => {
                let invalid = || CommandParseError::InvalidArgument {
                    command: verb.to_string(),
                    argument: arg.to_string(),
                };
                let (name, value) = arg.split_once('=').ok_or_else(invalid)?;
                let param = name
                    .trim()
                    .parse()
                    .map_err(CommandParseError::UnknownParameter)?;
                let value: f32 = value.trim().parse().map_err(|_| invalid())?;
                if !value.is_finite() {
                    return Err(invalid());
                }
                Ok(EngineCommand::SetParameter(param, value))
            }
            "orientation" => Ok(EngineCommand::SetOrientationEnabled(parse_switch(verb, arg, "on", "off")?)),
            "touch" => Ok(EngineCommand::SetTouchEnabled(parse_switch(verb, arg, "on", "off")?)),
            "permission" => Ok(EngineCommand::ResolvePermission(parse_switch(verb, arg, "grant", "deny")?)),
            other => Err(CommandParseError::UnknownCommand(other.to_string())),
        }
    }
}
