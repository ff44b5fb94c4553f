// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The panic hook is global to the process, so it is tested in its own test binary.

use std::panic;

use pretty_assertions::assert_eq;
use r3bl_input_console::{InputConsole, Key, KeySource, MockRawMode, install_panic_hook};
use r3bl_test_fixtures::{StdoutMock, gen_input_stream};

#[tokio::test]
async fn test_handler_panic_is_printed_above_prompt() {
    let mut keys = "boom"
        .chars()
        .map(|ch| Ok(Key::Char(ch)))
        .collect::<Vec<_>>();
    keys.push(Ok(Key::Enter));
    keys.push(Ok(Key::CtrlC));

    let stdout_mock = StdoutMock::new();
    let mut console = InputConsole::new(
        stdout_mock.clone(),
        KeySource::new(gen_input_stream(keys), MockRawMode::default()),
    );
    console.register_command("boom", |_: &[String]| -> miette::Result<()> {
        panic!("kaboom")
    });
    install_panic_hook(&console.clone_writer());

    console.listen("> ").wait().await.unwrap();
    drop(panic::take_hook());

    let output = stdout_mock.get_copy_of_buffer_as_string();
    assert_eq!(stdout_mock.count_occurrences("\r\x1b[KPanicked at "), 1);
    assert_eq!(stdout_mock.count_occurrences("panic_hook_tests.rs:"), 1);

    // The hook prints first, then the failure is reported by the read loop.
    let hook_index = output.find("Panicked at ").unwrap();
    let hook_line = output[hook_index..].split("\n\r").next().unwrap();
    assert!(hook_line.ends_with(": kaboom"));
    let report_index = output
        .find("\r\x1b[KFailed to run command 'boom': kaboom\n\r> ")
        .unwrap();
    assert!(hook_index < report_index);
}
