use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use tracing_test::traced_test;

use aurora_bif::error::Result;
use aurora_bif::{BifArchive, Key};

fn store_bytes() -> Vec<u8> {
    let mut input = Vec::new();

    // Header (20)
    input.extend_from_slice(b"BIFFV1  ");
    input.extend_from_slice(&2u32.to_le_bytes());
    input.extend_from_slice(&0u32.to_le_bytes());
    input.extend_from_slice(&20u32.to_le_bytes());

    // Variable table (32)
    input.extend_from_slice(&0u32.to_le_bytes());
    input.extend_from_slice(&52u32.to_le_bytes());
    input.extend_from_slice(&11u32.to_le_bytes());
    input.extend_from_slice(&10u32.to_le_bytes());

    input.extend_from_slice(&1u32.to_le_bytes());
    input.extend_from_slice(&64u32.to_le_bytes());
    input.extend_from_slice(&11u32.to_le_bytes());
    input.extend_from_slice(&10u32.to_le_bytes());

    // Payloads
    input.extend_from_slice(b"Hello World");
    input.push(0);
    input.extend_from_slice(b"World Hello");

    input
}

fn catalog() -> Result<Key> {
    let mut key = Key::new(104, 201);
    let archive = key.add_bif("data\\test.bif", store_bytes().len() as u32, 1);
    key.add_resource("hello", 10, archive, 0)?;
    Ok(key)
}

#[traced_test]
#[test]
fn attach_resolves_matching_names_only() -> Result<()> {
    // Round-trip the catalog through its own format first.
    let key = Key::read(Cursor::new(catalog()?.to_bytes()?))?;

    let mut bif = BifArchive::new(Cursor::new(store_bytes()))?;
    let resolved = bif.attach_key(&key, "test.bif")?;
    assert_eq!(resolved, 1);

    // The cataloged entry got its name; the other stays nameless and is
    // still readable.
    assert_eq!(bif.name_for_index(0), Some("hello"));
    assert_eq!(bif.name_for_index(1), None);

    let mut buffer = Vec::new();
    let mut named = bif.by_index(0)?;
    assert_eq!(named.name(), Some("hello"));
    named.read_to_end(&mut buffer)?;
    assert_eq!(buffer, b"Hello World");
    buffer.clear();

    let mut nameless = bif.by_index(1)?;
    assert_eq!(nameless.name(), None);
    nameless.read_to_end(&mut buffer)?;
    assert_eq!(buffer, b"World Hello");

    Ok(())
}

#[traced_test]
#[test]
fn attach_unknown_archive_is_an_error() -> Result<()> {
    let key = catalog()?;
    let mut bif = BifArchive::new(Cursor::new(store_bytes()))?;

    assert!(bif.attach_key(&key, "other.bif").is_err());

    Ok(())
}

#[traced_test]
#[test]
fn catalog_lookup_agrees_with_store_contents() -> Result<()> {
    let key = catalog()?;
    let (archive, local) = key.lookup("hello", 10)?;
    assert_eq!(archive, 0);

    let mut bif = BifArchive::new(Cursor::new(store_bytes()))?;
    let mut resource = bif.by_index(local as usize)?;

    let mut buffer = Vec::new();
    resource.read_to_end(&mut buffer)?;
    assert_eq!(buffer, b"Hello World");

    Ok(())
}

#[traced_test]
#[test]
fn rebuild_after_attach_is_size_stable() -> Result<()> {
    let original = store_bytes();
    let key = catalog()?;

    let mut bif = BifArchive::new(Cursor::new(original.clone()))?;
    bif.attach_key(&key, "test.bif")?;

    let mut rebuilt = Vec::new();
    bif.rebuild(&mut rebuilt)?;

    assert_eq!(rebuilt.len(), original.len());
    assert_eq!(rebuilt, original);

    Ok(())
}
