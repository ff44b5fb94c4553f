// Copyright (c) 2024-2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::{pin::Pin, time::Duration};

use async_stream::stream;
use futures_core::Stream;

/// Same shape as the input stream that the console read loop is generic over, so the
/// output of these generators can be handed straight to a key source.
pub type PinnedInputStream<T> = Pin<Box<dyn Stream<Item = T> + Send>>;

/// Yields every item in `generator_vec`, in order, then ends the stream.
pub fn gen_input_stream<T>(generator_vec: Vec<T>) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            yield item;
        }
    };
    Box::pin(it)
}

/// Like [`gen_input_stream`], but sleeps for `delay` before yielding each item. Use this
/// to give other tasks (eg: concurrent writers) a chance to run between key events.
pub fn gen_input_stream_with_delay<T>(
    generator_vec: Vec<T>,
    delay: Duration,
) -> PinnedInputStream<T>
where
    T: Send + Sync + 'static,
{
    let it = stream! {
        for item in generator_vec {
            tokio::time::sleep(delay).await;
            yield item;
        }
    };
    Box::pin(it)
}
