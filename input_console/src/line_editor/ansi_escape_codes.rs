// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The handful of escape sequences that the console writes. More info:
//! - <https://notes.burke.libbey.me/ansi-escape-codes/>
//! - <https://en.wikipedia.org/wiki/ANSI_escape_code>

use std::fmt::{Display, Formatter, Result};

const CSI: &str = "\x1b[";
const SGR: &str = "m";

/// Erase from the cursor to the end of the line.
pub const CLEAR_TO_END_OF_LINE: &str = "\x1b[K";
/// Move the cursor one column to the right.
pub const CURSOR_FORWARD: &str = "\x1b[C";
pub const BACKSPACE: &str = "\x08";
pub const CARRIAGE_RETURN: &str = "\r";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SgrCode {
    Reset,
    FgBrightRed,
    FgBrightGreen,
}

impl SgrCode {
    fn as_param(self) -> &'static str {
        match self {
            SgrCode::Reset => "0",
            SgrCode::FgBrightRed => "91",
            SgrCode::FgBrightGreen => "92",
        }
    }
}

impl Display for SgrCode {
    /// SGR: set graphics mode command.
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{CSI}{}{SGR}", self.as_param())
    }
}
