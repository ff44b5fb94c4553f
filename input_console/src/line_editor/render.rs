// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Pure functions that turn a prompt and the input line into the bytes that repaint the
//! prompt line. Nothing here touches the terminal, and nothing is cached between calls.
//!
//! The cursor is assumed to be on the prompt line. Every string produced here starts
//! with `\r` followed by [`CLEAR_TO_END_OF_LINE`], so whatever was on that line before is
//! gone by the time the new text is painted.

use std::collections::HashSet;

use crate::{CARRIAGE_RETURN, CLEAR_TO_END_OF_LINE, SgrCode};

/// Anything that can answer "is this the name of a registered command?". Used to pick
/// the color of the first word of the input.
pub trait CommandNames {
    fn contains_command(&self, name: &str) -> bool;
}

impl CommandNames for [&str] {
    fn contains_command(&self, name: &str) -> bool { self.iter().any(|it| *it == name) }
}

impl CommandNames for HashSet<String> {
    fn contains_command(&self, name: &str) -> bool { self.contains(name) }
}

/// Colorize the first word of `buffer`: bright green if it is a command, bright red if
/// it isn't.
///
/// Words are split on `' '` and empty words are dropped, so runs of spaces between words
/// are painted as a single space. A single trailing space is kept, so the user sees the
/// space they just typed.
#[must_use]
pub fn colorize_input_line<N>(buffer: &str, names: &N) -> String
where
    N: CommandNames + ?Sized,
{
    let mut tokens = buffer.split(' ').filter(|it| !it.is_empty());

    let Some(first) = tokens.next() else {
        return buffer.to_string();
    };

    let color = if names.contains_command(first) {
        SgrCode::FgBrightGreen
    } else {
        SgrCode::FgBrightRed
    };

    let mut acc = format!("{color}{first}{}", SgrCode::Reset);

    let rest = tokens.collect::<Vec<_>>();
    if !rest.is_empty() {
        acc.push(' ');
        acc.push_str(&rest.join(" "));
    }

    if buffer.ends_with(' ') {
        acc.push(' ');
    }

    acc
}

/// `prefix` followed by the colorized input line.
#[must_use]
pub fn render<N>(prefix: &str, buffer: &str, names: &N) -> String
where
    N: CommandNames + ?Sized,
{
    format!("{prefix}{}", colorize_input_line(buffer, names))
}

/// Prefix that repaints the prompt line in place.
#[must_use]
pub fn prompt_line_prefix(prompt: &str) -> String {
    format!("{CARRIAGE_RETURN}{CLEAR_TO_END_OF_LINE}{prompt}")
}

/// Prefix that replaces the prompt line with `message`, then paints the prompt on the
/// next line.
///
/// Trailing `\n` of `message` are dropped and exactly one is written. In raw mode `\n`
/// does not return the carriage, so the ones inside `message` are written as `\r\n`.
#[must_use]
pub fn output_line_prefix(message: &str, prompt: &str) -> String {
    let body = message.trim_end_matches('\n').replace('\n', "\r\n");
    format!("{CARRIAGE_RETURN}{CLEAR_TO_END_OF_LINE}{body}\n{CARRIAGE_RETURN}{prompt}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const PREFIX: &str = "\r\x1b[K> ";
    const GREEN_FOO: &str = "\x1b[92mfoo\x1b[0m";
    const RED_FOO: &str = "\x1b[91mfoo\x1b[0m";

    fn no_names() -> HashSet<String> { HashSet::new() }

    #[test]
    fn test_empty_buffer_renders_prefix_only() {
        assert_eq!(render(PREFIX, "", &no_names()), PREFIX);
        assert_eq!(render(PREFIX, "", &["foo"][..]), PREFIX);
    }

    #[test]
    fn test_all_spaces_renders_raw_buffer() {
        assert_eq!(render(PREFIX, "   ", &["foo"][..]), format!("{PREFIX}   "));
    }

    #[test]
    fn test_known_command_is_green() {
        let it = render(PREFIX, "foo", &["foo"][..]);
        assert_eq!(it, format!("{PREFIX}{GREEN_FOO}"));
        assert!(!it.contains("\x1b[91m"));
    }

    #[test]
    fn test_unknown_command_is_red() {
        let it = render(PREFIX, "foo", &no_names());
        assert_eq!(it, format!("{PREFIX}{RED_FOO}"));
        assert!(!it.contains("\x1b[92m"));
    }

    #[test]
    fn test_exact_match_only() {
        let it = render(PREFIX, "fo", &["foo"][..]);
        assert!(it.contains("\x1b[91mfo\x1b[0m"));
    }

    #[test]
    fn test_trailing_space_is_kept_once() {
        assert_eq!(
            render(PREFIX, "foo ", &no_names()),
            format!("{PREFIX}{RED_FOO} ")
        );
        assert_eq!(
            render(PREFIX, "foo   ", &no_names()),
            format!("{PREFIX}{RED_FOO} ")
        );
    }

    #[test]
    fn test_remaining_words_are_plain_and_collapsed() {
        assert_eq!(
            render(PREFIX, "foo 1 2", &["foo"][..]),
            format!("{PREFIX}{GREEN_FOO} 1 2")
        );
        assert_eq!(
            render(PREFIX, "  foo   1  2 ", &["foo"][..]),
            format!("{PREFIX}{GREEN_FOO} 1 2 ")
        );
    }

    #[test]
    fn test_hash_set_names() {
        let names = HashSet::from(["foo".to_string()]);
        assert_eq!(colorize_input_line("foo", &names), GREEN_FOO);
    }

    #[test]
    fn test_prompt_line_prefix() {
        assert_eq!(prompt_line_prefix("> "), PREFIX);
    }

    #[test]
    fn test_output_line_prefix() {
        assert_eq!(output_line_prefix("hello", "> "), "\r\x1b[Khello\n\r> ");
        assert_eq!(output_line_prefix("hello\n\n", "> "), "\r\x1b[Khello\n\r> ");
        assert_eq!(output_line_prefix("a\nb", "$ "), "\r\x1b[Ka\r\nb\n\r$ ");
        assert_eq!(output_line_prefix("", "> "), "\r\x1b[K\n\r> ");
    }
}
