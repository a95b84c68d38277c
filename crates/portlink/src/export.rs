//! Diagram export.
//!
//! [`export_diagram`] writes the store as a Graphviz DOT file and then hands
//! it to an optional [`Renderer`] for conversion into an image.

mod dot;

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::{info, warn};
use thiserror::Error;

use portlink_core::Store;

use crate::{config::AppConfig, render::Renderer};

pub use dot::Dot;

/// Errors raised while exporting a diagram.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot write `{}`: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Files produced by [`export_diagram`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    /// The DOT file that was written.
    pub dot: PathBuf,
    /// The rendered image, if a renderer ran successfully.
    pub image: Option<PathBuf>,
}

/// Writes the DOT export of `store` and renders it if a renderer is given.
///
/// Paths and styling come from `config`. Rendering is best-effort: a failing
/// renderer is logged and reported through [`Exported::image`] being `None`.
///
/// # Errors
///
/// Returns [`Error::Write`] if the DOT file cannot be written.
pub fn export_diagram(
    store: &Store,
    config: &AppConfig,
    renderer: Option<&dyn Renderer>,
) -> Result<Exported, Error> {
    let dot_path = config.paths().dot();
    write_dot(store, config, dot_path)?;
    info!(path:? = dot_path, modules = store.len(); "Wrote DOT export");

    let image = renderer.and_then(|renderer| {
        let image_path = config.paths().image();
        match renderer.render(dot_path, image_path) {
            Ok(()) => Some(image_path.to_path_buf()),
            Err(err) => {
                warn!(err:% = err; "Rendering failed, DOT file kept");
                None
            }
        }
    });

    Ok(Exported {
        dot: dot_path.to_path_buf(),
        image,
    })
}

fn write_dot(store: &Store, config: &AppConfig, path: &Path) -> Result<(), Error> {
    let text = Dot::new(store, config.style()).to_string();
    fs::write(path, text).map_err(|source| Error::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::{config::PathsConfig, editor::LinkEditor, render};

    /// Records calls and optionally fails.
    struct FakeRenderer {
        fail: bool,
        calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl FakeRenderer {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                calls: RefCell::new(Vec::new()),
            }
        }
    }

    impl Renderer for FakeRenderer {
        fn render(&self, dot: &Path, output: &Path) -> Result<(), render::Error> {
            self.calls
                .borrow_mut()
                .push((dot.to_path_buf(), output.to_path_buf()));
            if self.fail {
                return Err(render::Error::Spawn {
                    command: "fake".to_owned(),
                    source: io::Error::new(io::ErrorKind::NotFound, "fake"),
                });
            }
            Ok(())
        }
    }

    fn config_in(dir: &Path) -> AppConfig {
        let mut config = AppConfig::default();
        *config.paths_mut() = PathsConfig::new(
            dir.join("links_data.xml"),
            dir.join("graph.dot"),
            dir.join("graph.svg"),
        );
        config
    }

    fn sample_store() -> Store {
        let mut store = Store::new();
        LinkEditor::new(&mut store).add("A::o", "B::i").unwrap();
        store
    }

    #[test]
    fn test_writes_dot_without_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let exported = export_diagram(&sample_store(), &config, None).unwrap();

        assert_eq!(exported.dot, dir.path().join("graph.dot"));
        assert_eq!(exported.image, None);
        let text = fs::read_to_string(&exported.dot).unwrap();
        assert!(text.contains(r#""A":"o":e -> "B":"i":w;"#));
    }

    #[test]
    fn test_renderer_receives_configured_paths() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let renderer = FakeRenderer::new(false);

        let exported = export_diagram(&sample_store(), &config, Some(&renderer)).unwrap();

        assert_eq!(exported.image, Some(dir.path().join("graph.svg")));
        assert_eq!(
            renderer.calls.borrow().as_slice(),
            &[(dir.path().join("graph.dot"), dir.path().join("graph.svg"))]
        );
    }

    #[test]
    fn test_failing_renderer_keeps_dot_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let renderer = FakeRenderer::new(true);

        let exported = export_diagram(&sample_store(), &config, Some(&renderer)).unwrap();

        assert_eq!(exported.image, None);
        assert!(exported.dot.exists());
    }

    #[test]
    fn test_unwritable_dot_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config
            .paths_mut()
            .set_dot(dir.path().join("missing").join("graph.dot"));

        let err = export_diagram(&sample_store(), &config, None).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }
}
