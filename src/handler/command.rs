//! Command-line parsing
//!
//! Unmatched input parses to `None` and is ignored by the caller.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::ScreenName;

static DRAFT_COMMAND: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([ox])(\d+)$").ok());

/// A parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `1`-`5`
    Screen(ScreenName),
    /// `q`, `quit`
    Quit,
    /// `P`
    Profile,
    /// `D`
    Drafts,
    /// `n`: new post, or message input on the messages screen
    New,
    /// `l`: like the focused post
    Like,
    /// `rt`: repost the focused post
    Repost,
    /// `c`: open comments for the focused post
    Comments,
    /// `u`: view the focused post's author
    ViewAuthor,
    /// `m`: message the focused author or viewed user
    Message,
    /// `o<N>`: open draft, 0-based storage index
    OpenDraft(usize),
    /// `x<N>`: delete draft, 0-based storage index
    DeleteDraft(usize),
}

/// Parse a committed command line (with or without its `:`/`/` prefix)
pub fn parse_command(input: &str) -> Option<Command> {
    let trimmed = input.trim();
    let body = trimmed
        .strip_prefix(':')
        .or_else(|| trimmed.strip_prefix('/'))
        .unwrap_or(trimmed)
        .trim();

    // A single plain digit; `+1` and `01` are not screen numbers
    if let [digit @ b'0'..=b'9'] = body.as_bytes() {
        return ScreenName::from_number(u32::from(digit - b'0')).map(Command::Screen);
    }

    match body {
        "q" | "quit" => return Some(Command::Quit),
        "P" | "p" => return Some(Command::Profile),
        "D" | "d" => return Some(Command::Drafts),
        "n" => return Some(Command::New),
        "l" => return Some(Command::Like),
        "rt" => return Some(Command::Repost),
        "c" => return Some(Command::Comments),
        "u" => return Some(Command::ViewAuthor),
        "m" => return Some(Command::Message),
        _ => {}
    }

    let caps = DRAFT_COMMAND.as_ref()?.captures(body)?;
    // 1-indexed for the user, 0-indexed in storage
    let index = caps[2].parse::<usize>().ok()?.checked_sub(1)?;
    match &caps[1] {
        "o" => Some(Command::OpenDraft(index)),
        "x" => Some(Command::DeleteDraft(index)),
        _ => None,
    }
}
