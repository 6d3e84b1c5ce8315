//! Extracts the tool call, if any, from an assistant reply.
//!
//! The protocol is line based: a reply requests a tool with a line of the exact
//! form `Action: <name>: <argument>`. The name is limited to ASCII letters,
//! digits and underscores and the argument is the rest of that one line, taken
//! verbatim. Arguments cannot span lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ACTION_LINE: Regex = Regex::new(r"^Action: ([A-Za-z0-9_]+): (.*)$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub name: String,
    pub argument: String,
}

impl Action {
    pub fn new<N: Into<String>, A: Into<String>>(name: N, argument: A) -> Self {
        Self {
            name: name.into(),
            argument: argument.into(),
        }
    }
}

/// Returns the first `Action:` line in `text`, or `None` when the reply is a
/// final answer.
pub fn parse_action(text: &str) -> Option<Action> {
    text.lines().find_map(|line| {
        ACTION_LINE
            .captures(line)
            .map(|captures| Action::new(&captures[1], &captures[2]))
    })
}
