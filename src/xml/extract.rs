use std::collections::{BTreeMap, HashMap};

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::core::SzamlazzError;

/// Extract the text content at each requested dotted element path
/// (e.g. `"xmlszamlavalasz.pdf"`). Paths with no text content are absent
/// from the returned mapping.
pub fn extract_by_paths(
    xml: &str,
    paths: &[&str],
) -> Result<HashMap<String, String>, SzamlazzError> {
    let mut out = HashMap::new();
    visit_text(xml, |path, text| {
        if paths.contains(&path) {
            out.entry(path.to_string())
                .or_insert_with(String::new)
                .push_str(text);
        }
    })?;
    Ok(out)
}

/// Flatten a whole document into a dotted-path → text mapping. Repeated
/// elements at the same path have their text concatenated.
pub fn flatten(xml: &str) -> Result<BTreeMap<String, String>, SzamlazzError> {
    let mut out = BTreeMap::new();
    visit_text(xml, |path, text| {
        out.entry(path.to_string())
            .or_insert_with(String::new)
            .push_str(text);
    })?;
    Ok(out)
}

fn visit_text(xml: &str, mut f: impl FnMut(&str, &str)) -> Result<(), SzamlazzError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut path: Vec<String> = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = std::str::from_utf8(e.name().as_ref())
                    .unwrap_or("")
                    .to_string();
                path.push(name);
            }
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| SzamlazzError::parse(format!("XML text error: {e}")))?;
                if !text.is_empty() {
                    f(&path.join("."), &text);
                }
            }
            Ok(Event::CData(ref e)) => {
                let text = String::from_utf8_lossy(e);
                if !text.is_empty() {
                    f(&path.join("."), &text);
                }
            }
            Ok(Event::End(_)) => {
                path.pop();
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(SzamlazzError::parse(format!("XML parse error: {e}")));
            }
            _ => {}
        }
    }
    Ok(())
}
