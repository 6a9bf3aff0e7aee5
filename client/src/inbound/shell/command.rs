//! Parsing of shell input lines.
//!
//! Auth commands accept missing arguments and pass them on blank, the way an
//! empty form field would be submitted; validation is the router's job.

use std::str::FromStr;

use thiserror::Error;

use crate::domain::{CandidateTab, UserRole};

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `start`: open the sign-in forms.
    Start,
    /// `back`: return to the landing page.
    Back,
    /// `switch`: toggle between login and registration.
    Switch,
    /// `login <email> <password>`.
    Login {
        /// Typed address, blank if omitted.
        email: String,
        /// Typed password, blank if omitted.
        password: String,
    },
    /// `register <email> [role]`.
    Register {
        /// Typed address, if any.
        email: Option<String>,
        /// Requested role, if any.
        role: Option<UserRole>,
    },
    /// `logout`.
    Logout,
    /// `tab projects|submissions`.
    Tab(CandidateTab),
    /// `challenge <id>`: start a listed project.
    Challenge(u64),
    /// `help`.
    Help,
    /// `quit`, or end of input.
    Quit,
}

/// Reasons an input line is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Blank line.
    #[error("type a command, or `help` for a list")]
    Empty,
    /// First word is not a command.
    #[error("unknown command `{name}`; type `help` for a list")]
    Unknown {
        /// The word that was typed.
        name: String,
    },
    /// A required argument was left out.
    #[error("`{command}` needs {argument}")]
    MissingArgument {
        /// Command being parsed.
        command: &'static str,
        /// What was expected.
        argument: &'static str,
    },
    /// An argument could not be interpreted.
    #[error("`{command}` does not understand `{value}`")]
    InvalidArgument {
        /// Command being parsed.
        command: &'static str,
        /// The offending word.
        value: String,
    },
    /// Trailing words after the last argument.
    #[error("`{command}` takes no more than {max} argument(s)")]
    TooManyArguments {
        /// Command being parsed.
        command: &'static str,
        /// Arguments the command accepts.
        max: usize,
    },
}

/// Usage text for `help`.
pub const HELP: &str = "\
commands:
  start                              show the sign-in forms
  back                               return to the landing page
  switch                             toggle between login and registration
  login <email> <password>           sign in
  register <email> [candidate|company]
                                     create an account
  logout                             sign out
  tab projects|submissions           switch candidate dashboard tab
  challenge <id>                     start a listed challenge
  help                               show this list
  quit                               leave";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();
        match name.to_ascii_lowercase().as_str() {
            "start" => bare("start", &args, Self::Start),
            "back" => bare("back", &args, Self::Back),
            "switch" => bare("switch", &args, Self::Switch),
            "logout" => bare("logout", &args, Self::Logout),
            "help" => bare("help", &args, Self::Help),
            "quit" | "exit" => bare("quit", &args, Self::Quit),
            "login" => {
                at_most("login", &args, 2)?;
                let mut args = args.into_iter();
                Ok(Self::Login {
                    email: args.next().unwrap_or_default().to_owned(),
                    password: args.next().unwrap_or_default().to_owned(),
                })
            }
            "register" => {
                at_most("register", &args, 2)?;
                let mut args = args.into_iter();
                let email = args.next().map(str::to_owned);
                let role = args
                    .next()
                    .map(|value| {
                        value.parse().map_err(|_| CommandError::InvalidArgument {
                            command: "register",
                            value: value.to_owned(),
                        })
                    })
                    .transpose()?;
                Ok(Self::Register { email, role })
            }
            "tab" => {
                at_most("tab", &args, 1)?;
                match args.first().copied() {
                    Some("projects") => Ok(Self::Tab(CandidateTab::Projects)),
                    Some("submissions") => Ok(Self::Tab(CandidateTab::Submissions)),
                    Some(value) => Err(CommandError::InvalidArgument {
                        command: "tab",
                        value: value.to_owned(),
                    }),
                    None => Err(CommandError::MissingArgument {
                        command: "tab",
                        argument: "`projects` or `submissions`",
                    }),
                }
            }
            "challenge" => {
                at_most("challenge", &args, 1)?;
                let value = args.first().ok_or(CommandError::MissingArgument {
                    command: "challenge",
                    argument: "a project id",
                })?;
                value
                    .parse()
                    .map(Self::Challenge)
                    .map_err(|_| CommandError::InvalidArgument {
                        command: "challenge",
                        value: (*value).to_owned(),
                    })
            }
            _ => Err(CommandError::Unknown {
                name: name.to_owned(),
            }),
        }
    }
}

fn at_most(command: &'static str, args: &[&str], max: usize) -> Result<(), CommandError> {
    if args.len() > max {
        return Err(CommandError::TooManyArguments { command, max });
    }
    Ok(())
}

fn bare(command: &'static str, args: &[&str], parsed: Command) -> Result<Command, CommandError> {
    at_most(command, args, 0).map(|()| parsed)
}
