//! Decode a fixture camera document, apply it to the in-memory reference
//! host, then export it back and print the result.

use anyhow::Result;

use heanim_host::{export_camera_xml, import_bytes, MemoryHost};

fn main() -> Result<()> {
    let xml = heanim_test_fixtures::animations::xml("camera-basic")?;

    let mut host = MemoryHost::new(60, 16.0 / 9.0);
    import_bytes(xml.as_bytes(), &mut host)?;

    let bytes = export_camera_xml(&host)?;
    println!("{}", String::from_utf8(bytes)?);
    Ok(())
}
