//! Producer/consumer hand-off through a `filemem:` locator.
//!
//! Demonstrates:
//!   1. Creating a buffer and rendering its locator
//!   2. Writing through `std::io::Write`, crossing the initial capacity
//!   3. Reading the bytes back through `std::io::Read`
//!   4. Releasing the buffer and seeing its locator go dead
//!
//! Run with:
//!   cargo run -p filemem --example roundtrip

use std::io::{Read, Write};

use filemem::prelude::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut arena = BufferArena::new(ArenaConfig::default())?;
    let handle = arena.create()?;
    let locator = Locator::for_handle(handle).with_extension("raw").to_string();
    let protocol = FileMemProtocol::new();
    println!("buffer locator: {locator}");

    let mut out = protocol.open(&arena, &locator, AccessFlags::WRITE)?;
    for i in 0..20u8 {
        out.write_all(&[i; 5_000])?;
    }
    out.close();
    println!(
        "wrote {} bytes, capacity {}",
        arena.length(handle)?,
        arena.capacity(handle)?
    );

    let mut input = protocol.open(&arena, &locator, AccessFlags::READ)?;
    let mut back = Vec::new();
    input.read_to_end(&mut back)?;
    input.close();
    println!("read back {} bytes", back.len());
    assert!(back.chunks(5_000).enumerate().all(|(i, c)| c.iter().all(|&b| b == i as u8)));

    arena.release(handle)?;
    match protocol.open(&arena, &locator, AccessFlags::READ) {
        Err(e) => println!("after release: {e}"),
        Ok(_) => unreachable!("released handle must not resolve"),
    }
    Ok(())
}
