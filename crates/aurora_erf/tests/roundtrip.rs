use std::io::Cursor;

use pretty_assertions::assert_eq;
use tracing_test::traced_test;

use aurora_erf::error::Result;
use aurora_erf::{Erf, ErfOptions};

fn build_container() -> Result<Erf> {
    let mut erf = Erf::new(
        ErfOptions::builder()
            .file_type(*b"MOD ")
            .build_year(104)
            .build_day(201)
            .build(),
    );
    erf.add_description(0, "A test module");
    erf.add("module", b"IFO V3.2\x00\x00\x00\x00".to_vec())?;
    erf.add_typed("script", 2009, b"void main() {}".to_vec())?;
    Ok(erf)
}

#[traced_test]
#[test]
fn round_trip_preserves_entries() -> Result<()> {
    let erf = build_container()?;

    let parsed = Erf::read(Cursor::new(erf.to_bytes()?))?;
    assert_eq!(parsed, erf);

    assert_eq!(parsed.by_name("module")?.res_type(), 2014);
    assert_eq!(parsed.by_name("script")?.data(), b"void main() {}");

    Ok(())
}

#[traced_test]
#[test]
fn round_trip_is_size_stable() -> Result<()> {
    let original = build_container()?.to_bytes()?;

    let rebuilt = Erf::read(Cursor::new(original.clone()))?.to_bytes()?;
    assert_eq!(rebuilt.len(), original.len());
    assert_eq!(rebuilt, original);

    Ok(())
}

#[traced_test]
#[test]
fn append_leaves_existing_payloads_unchanged() -> Result<()> {
    let mut erf = build_container()?;
    let before: Vec<Vec<u8>> = erf.resources().iter().map(|r| r.data().to_vec()).collect();

    erf.add_typed("appended", 10, b"fresh data".to_vec())?;

    let parsed = Erf::read(Cursor::new(erf.to_bytes()?))?;
    assert_eq!(parsed.len(), before.len() + 1);
    for (index, data) in before.iter().enumerate() {
        assert_eq!(parsed.by_index(index)?.data(), data.as_slice());
    }
    assert_eq!(parsed.by_index(before.len())?.data(), b"fresh data");

    Ok(())
}

#[traced_test]
#[test]
fn remove_then_round_trip() -> Result<()> {
    let mut erf = build_container()?;
    let removed = erf.remove(0)?;
    assert_eq!(removed.name(), "module");

    let parsed = Erf::read(Cursor::new(erf.to_bytes()?))?;
    assert_eq!(parsed.len(), 1);
    assert_eq!(parsed.by_index(0)?.name(), "script");
    assert!(parsed.by_name("module").is_err());

    Ok(())
}
