//! XML persistence for the record store.
//!
//! The backing file is a small XML document:
//!
//! ```xml
//! <root>
//!   <module name="Osc">
//!     <port name="out" type="audio" dir="out" dest_mod="Mixer" dest_port="in1"/>
//!   </module>
//!   <module name="Mixer">
//!     <port name="in1" type="audio" dir="in" dest_mod="" dest_port=""/>
//!   </module>
//! </root>
//! ```
//!
//! Every port attribute is always written, empty or not, and decoding treats
//! a missing attribute as empty. Modules and ports are rebuilt through the
//! store's find-or-create lookups in document order, so the reloaded store
//! iterates exactly like the saved one.

use std::{
    fs,
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use log::{debug, info, trace, warn};
use quick_xml::{
    Reader, Writer,
    events::{BytesEnd, BytesStart, Event},
};
use tempfile::NamedTempFile;
use thiserror::Error;

use portlink_core::{Direction, PortRef, Store, field};

const ROOT_TAG: &str = "root";
const MODULE_TAG: &str = "module";
const PORT_TAG: &str = "port";

const ATTR_NAME: &str = "name";
const ATTR_TYPE: &str = "type";
const ATTR_DIR: &str = "dir";
const ATTR_DEST_MODULE: &str = "dest_mod";
const ATTR_DEST_PORT: &str = "dest_port";

/// Errors raised while reading or writing the backing file.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read `{}`: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("cannot write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("malformed backing file `{}`: {source}", path.display())]
    Malformed { path: PathBuf, source: Box<Error> },

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("not a store document: {0}")]
    Structure(String),

    #[error("I/O error while encoding: {0}")]
    Io(#[from] io::Error),

    #[error("encoded document is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Loads the store saved at `path`.
///
/// A missing file is not an error and yields an empty store.
///
/// # Errors
///
/// Returns [`Error::Read`] if the file exists but cannot be read, and
/// [`Error::Malformed`] if it is not a well-formed store document.
pub fn load(path: &Path) -> Result<Store, Error> {
    let xml = match fs::read_to_string(path) {
        Ok(xml) => xml,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = path.display().to_string(); "Backing file not found, starting empty");
            return Ok(Store::new());
        }
        Err(source) => {
            return Err(Error::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let store = from_xml(&xml).map_err(|err| match err {
        Error::Xml(_) | Error::Structure(_) => Error::Malformed {
            path: path.to_path_buf(),
            source: Box::new(err),
        },
        other => other,
    })?;

    debug!(path = path.display().to_string(), modules = store.len(); "Loaded store");
    Ok(store)
}

/// Saves `store` to `path`, replacing the previous contents.
///
/// The document is written to a temporary file next to `path` and then
/// moved over it, so an interrupted save leaves the old file intact.
///
/// # Errors
///
/// Returns [`Error::Write`] if the temporary file cannot be created, written
/// or moved into place.
pub fn save(store: &Store, path: &Path) -> Result<(), Error> {
    let xml = to_xml(store)?;
    let write_error = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    file.write_all(xml.as_bytes()).map_err(write_error)?;

    if let Ok(metadata) = fs::metadata(path) {
        if let Err(err) = file.as_file().set_permissions(metadata.permissions()) {
            debug!(err:% = err; "Could not copy permissions of the previous backing file");
        }
    }

    file.persist(path).map_err(|err| write_error(err.error))?;

    debug!(path = path.display().to_string(), modules = store.len(); "Saved store");
    Ok(())
}

/// Encodes `store` as an XML document.
pub fn to_xml(store: &Store) -> Result<String, Error> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer.write_event(Event::Start(BytesStart::new(ROOT_TAG)))?;
    for module in store.modules() {
        let mut element = BytesStart::new(MODULE_TAG);
        element.push_attribute((ATTR_NAME, module.name()));
        writer.write_event(Event::Start(element))?;

        for port in module.ports() {
            let destination = port.destination();
            let mut element = BytesStart::new(PORT_TAG);
            element.push_attribute((ATTR_NAME, port.name()));
            element.push_attribute((ATTR_TYPE, port.type_name()));
            element.push_attribute((ATTR_DIR, port.direction().as_str()));
            element.push_attribute((ATTR_DEST_MODULE, destination.map_or("", PortRef::module)));
            element.push_attribute((ATTR_DEST_PORT, destination.map_or("", PortRef::port)));
            writer.write_event(Event::Empty(element))?;
        }

        writer.write_event(Event::End(BytesEnd::new(MODULE_TAG)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(ROOT_TAG)))?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(String::from_utf8(bytes)?)
}

/// Decodes an XML document into a store.
///
/// Decoding is lenient about content: unknown elements and attributes are
/// ignored, a `<port>` outside a `<module>` or without a name is skipped,
/// and an unrecognized `dir` reads as `none`. Names and types are bounded to
/// [`MAX_FIELD_LEN`](portlink_core::field::MAX_FIELD_LEN) characters.
///
/// # Errors
///
/// Returns [`Error::Xml`] if the document is not well-formed, and
/// [`Error::Structure`] if it is not a single `<root>` element: text outside
/// of it, a different top-level element, or elements left open at the end.
pub fn from_xml(xml: &str) -> Result<Store, Error> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text_start = true;
    reader.config_mut().trim_text_end = true;

    let mut store = Store::new();
    let mut open = OpenElements::default();
    let mut current_module: Option<String> = None;

    loop {
        let event = reader.read_event()?;
        open.track(&event)?;

        match event {
            Event::Start(element) if element.name().as_ref() == MODULE_TAG.as_bytes() => {
                current_module = decode_module(&mut store, &element)?;
            }
            Event::Empty(element) if element.name().as_ref() == MODULE_TAG.as_bytes() => {
                decode_module(&mut store, &element)?;
                current_module = None;
            }
            Event::End(element) if element.name().as_ref() == MODULE_TAG.as_bytes() => {
                current_module = None;
            }
            Event::Start(element) | Event::Empty(element)
                if element.name().as_ref() == PORT_TAG.as_bytes() =>
            {
                match current_module.as_deref() {
                    Some(module) => decode_port(&mut store, module, &element)?,
                    None => warn!("Port element outside of a module, skipping"),
                }
            }
            Event::Eof => break,
            event => trace!(event:? = event; "Ignoring XML event"),
        }
    }

    Ok(store)
}

/// Element nesting of the document read so far.
#[derive(Debug, Default)]
struct OpenElements {
    stack: Vec<String>,
    seen_root: bool,
}

impl OpenElements {
    /// Checks `event` against the expected document shape and records it.
    fn track(&mut self, event: &Event<'_>) -> Result<(), Error> {
        match event {
            Event::Start(element) | Event::Empty(element) if self.stack.is_empty() => {
                if element.name().as_ref() != ROOT_TAG.as_bytes() {
                    return Err(Error::Structure(format!(
                        "expected `<{ROOT_TAG}>`, found `<{}>`",
                        element_name(element)
                    )));
                }
                if self.seen_root {
                    return Err(Error::Structure(format!(
                        "more than one `<{ROOT_TAG}>` element"
                    )));
                }
                self.seen_root = true;
            }
            Event::Text(text)
                if self.stack.is_empty() && !text.iter().all(u8::is_ascii_whitespace) =>
            {
                return Err(Error::Structure(format!(
                    "text outside of `<{ROOT_TAG}>`"
                )));
            }
            Event::Eof => {
                if let Some(name) = self.stack.last() {
                    return Err(Error::Structure(format!("`<{name}>` is never closed")));
                }
                if !self.seen_root {
                    return Err(Error::Structure(format!("missing `<{ROOT_TAG}>` element")));
                }
            }
            _ => {}
        }

        match event {
            Event::Start(element) => self.stack.push(element_name(element)),
            Event::End(_) => {
                self.stack.pop();
            }
            _ => {}
        }
        Ok(())
    }
}

fn element_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.name().as_ref()).into_owned()
}

/// Attribute values of a `<module>` or `<port>` element.
#[derive(Debug, Default)]
struct Attributes {
    name: String,
    type_name: String,
    direction: String,
    dest_module: String,
    dest_port: String,
}

impl Attributes {
    fn from_element(element: &BytesStart<'_>) -> Result<Self, Error> {
        let mut attributes = Self::default();

        for attribute in element.attributes() {
            let attribute = attribute.map_err(|err| Error::Xml(err.into()))?;
            let value = attribute
                .unescape_value()
                .map_err(|err| Error::Xml(err.into()))?
                .into_owned();

            match attribute.key.as_ref() {
                key if key == ATTR_NAME.as_bytes() => attributes.name = value,
                key if key == ATTR_TYPE.as_bytes() => attributes.type_name = value,
                key if key == ATTR_DIR.as_bytes() => attributes.direction = value,
                key if key == ATTR_DEST_MODULE.as_bytes() => attributes.dest_module = value,
                key if key == ATTR_DEST_PORT.as_bytes() => attributes.dest_port = value,
                key => debug!(key:? = String::from_utf8_lossy(key); "Ignoring unknown attribute"),
            }
        }

        Ok(attributes)
    }
}

/// Creates the module an element names and returns its name.
fn decode_module(store: &mut Store, element: &BytesStart<'_>) -> Result<Option<String>, Error> {
    let attributes = Attributes::from_element(element)?;
    let name = field::bounded("module", &attributes.name);

    if store.find_or_create_module(&name, true).is_none() {
        warn!("Module element without a name, skipping its ports");
        return Ok(None);
    }
    Ok(Some(name))
}

/// Creates or updates the port an element describes on `module`.
fn decode_port(store: &mut Store, module: &str, element: &BytesStart<'_>) -> Result<(), Error> {
    let attributes = Attributes::from_element(element)?;
    let name = field::bounded("port", &attributes.name);

    let Some(port) = store.find_or_create_port(module, &name, true) else {
        warn!(module = module; "Port element without a name, skipping");
        return Ok(());
    };

    let direction = if attributes.direction.is_empty() {
        Direction::None
    } else {
        attributes.direction.parse().unwrap_or_else(|err| {
            warn!(module = module, port = name, err:% = err; "Treating port direction as `none`");
            Direction::None
        })
    };

    port.restore(
        field::bounded("type", &attributes.type_name),
        direction,
        PortRef::new(
            field::bounded("destination module", &attributes.dest_module),
            field::bounded("destination port", &attributes.dest_port),
        ),
    );
    Ok(())
}
