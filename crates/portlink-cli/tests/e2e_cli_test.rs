use std::{
    fs,
    path::{Path, PathBuf},
};

use clap::Parser;
use tempfile::{TempDir, tempdir};

use portlink_cli::{Args, run_with_output};

/// A scratch directory with a config file that keeps every path inside it
/// and disables the external renderer.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempdir().expect("Failed to create temp directory");
        let config = dir.path().join("config.toml");
        let content = format!(
            "[paths]\nstore = {:?}\ndot = {:?}\nimage = {:?}\n\n[render]\nenabled = false\n",
            dir.path().join("links_data.xml"),
            dir.path().join("graph.dot"),
            dir.path().join("graph.svg"),
        );
        fs::write(&config, content).expect("Failed to write config");
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn store(&self) -> PathBuf {
        self.path("links_data.xml")
    }

    /// Runs the CLI with `argv` and returns (stdout, stderr).
    fn run(&self, argv: &[&str]) -> (String, String) {
        let args = self.parse(argv);
        let mut out = Vec::new();
        let mut err = Vec::new();
        run_with_output(&args, &mut out, &mut err).expect("Run should succeed");
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn parse(&self, argv: &[&str]) -> Args {
        let config = self.config.to_string_lossy().to_string();
        let full: Vec<&str> = ["portlink", "--config", config.as_str(), "--log-level", "off"]
            .into_iter()
            .chain(argv.iter().copied())
            .collect();
        Args::try_parse_from(full).expect("Arguments should parse")
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn e2e_add_list_remove() {
    let ws = Workspace::new();

    let (out, err) = ws.run(&["add", "Osc::out:audio", "Mixer::in1"]);
    assert_eq!(out, "Linked: [Osc::out:audio] -> [Mixer::in1:audio]\n");
    assert!(err.is_empty());

    let xml = read(&ws.store());
    assert!(xml.contains(
        r#"<port name="out" type="audio" dir="out" dest_mod="Mixer" dest_port="in1"/>"#
    ));

    let (out, _) = ws.run(&["list", "Osc"]);
    assert!(out.starts_with("Module: Osc\n"));
    assert!(out.contains("out             | audio      | out   | Mixer::in1\n"));

    let (out, _) = ws.run(&["remove", "Osc::out", "Mixer::in1"]);
    assert_eq!(out, "Link removed.\n");

    let (out, _) = ws.run(&["list", "Mixer"]);
    assert!(out.contains("in1             | audio      | in    | --\n"));
    let (out, _) = ws.run(&["list", "Osc"]);
    assert!(out.contains("out             | audio      | none  | --\n"));
}

#[test]
fn e2e_destination_port_is_inherited() {
    let ws = Workspace::new();

    let (out, _) = ws.run(&["add", "A::p1", "B"]);
    assert_eq!(
        out,
        "Info: destination port not specified, using 'p1'\nLinked: [A::p1:unknown] -> [B::p1:unknown]\n"
    );
}

#[test]
fn e2e_failed_commands_leave_store_unchanged() {
    let ws = Workspace::new();
    ws.run(&["add", "A::o", "B::i"]);
    let before = read(&ws.store());

    let (out, err) = ws.run(&["add", "::o", "B::i"]);
    assert!(out.is_empty());
    assert!(err.contains("E002"), "unexpected report: {err}");

    let (out, err) = ws.run(&["add", "A", "B::i"]);
    assert!(out.is_empty());
    assert!(err.contains("E100"), "unexpected report: {err}");

    let (_, err) = ws.run(&["remove", "A::o", "C::i"]);
    assert!(err.contains("not found"), "unexpected report: {err}");

    let (_, err) = ws.run(&["list", "Nope"]);
    assert_eq!(err, "Module `Nope` not found.\n");

    assert_eq!(read(&ws.store()), before);
}

#[test]
fn e2e_missing_arguments_print_usage() {
    let ws = Workspace::new();

    let (out, err) = ws.run(&["add", "A::o"]);
    assert!(out.is_empty());
    assert!(err.contains("`add` is missing required arguments"));
    assert!(err.contains("Usage:"));

    let (_, err) = ws.run(&["list"]);
    assert!(err.contains("`list` is missing required arguments"));

    // The store is still written back, empty
    assert!(read(&ws.store()).starts_with("<root>"));
}

#[test]
fn e2e_no_subcommand_prints_help_only() {
    let ws = Workspace::new();

    let (out, _) = ws.run(&[]);
    assert!(out.contains("Usage:"));
    assert!(!ws.store().exists());
}

#[test]
fn e2e_draw() {
    let ws = Workspace::new();
    ws.run(&["add", "Osc::out:audio", "Mixer::in1"]);

    let (out, _) = ws.run(&["draw"]);
    assert_eq!(
        out,
        "\n--- System Diagram ---\n[Osc]\n  <- (OUT) out (audio) -> [Mixer::in1]\n[Mixer]\n  -> (IN)  in1 (audio)\n"
    );
}

#[test]
fn e2e_dot_without_renderer() {
    let ws = Workspace::new();
    ws.run(&["add", "Osc::out:audio", "Mixer::in1"]);

    let dot_path = ws.path("custom.dot");
    let dot_arg = dot_path.to_string_lossy().to_string();
    let (out, err) = ws.run(&["dot", "--output", dot_arg.as_str(), "--no-render"]);

    assert_eq!(out, format!("Wrote {}\n", dot_path.display()));
    assert!(err.is_empty());
    assert!(read(&dot_path).contains(r#""Osc":"out":e -> "Mixer":"in1":w;"#));
    assert!(!ws.path("graph.svg").exists());
}

#[test]
fn e2e_failing_renderer_is_not_fatal() {
    let ws = Workspace::new();
    let config = format!(
        "[paths]\nstore = {:?}\ndot = {:?}\nimage = {:?}\n\n[render]\ncommand = \"portlink-no-such-renderer\"\n",
        ws.store(),
        ws.path("graph.dot"),
        ws.path("graph.svg"),
    );
    fs::write(&ws.config, config).unwrap();

    let (out, err) = ws.run(&["dot"]);

    assert!(out.starts_with("Wrote "));
    assert!(err.contains("Rendering with `portlink-no-such-renderer` failed"));
    assert!(ws.path("graph.dot").exists());
}

#[test]
fn e2e_store_option_overrides_config() {
    let ws = Workspace::new();
    let other = ws.path("other.xml");
    let other_arg = other.to_string_lossy().to_string();

    ws.run(&["--store", other_arg.as_str(), "add", "A::o", "B::i"]);

    assert!(read(&other).contains(r#"<module name="A">"#));
    assert!(!ws.store().exists());
}

#[test]
fn e2e_malformed_store_is_fatal_and_kept() {
    let ws = Workspace::new();
    fs::write(ws.store(), "<root><module name=\"A\"></root>").unwrap();

    let args = ws.parse(&["add", "A::o", "B::i"]);
    let result = run_with_output(&args, &mut Vec::new(), &mut Vec::new());

    assert!(result.is_err());
    assert_eq!(read(&ws.store()), "<root><module name=\"A\"></root>");
}

#[test]
fn e2e_unreadable_store_is_never_overwritten() {
    let truncated = concat!(
        r#"<root><module name="A">"#,
        r#"<port name="o" type="t" dir="out" dest_mod="B" dest_port="i"/>"#,
        r#"</module><module name="B">"#,
    );

    for content in ["this is not xml", truncated] {
        let ws = Workspace::new();
        fs::write(ws.store(), content).unwrap();

        for argv in [&["draw"][..], &["add", "A::x", "B::y"][..]] {
            let args = ws.parse(argv);
            let result = run_with_output(&args, &mut Vec::new(), &mut Vec::new());

            assert!(result.is_err(), "`{content}` should not load");
            assert_eq!(read(&ws.store()), content);
        }
    }
}

#[test]
fn e2e_missing_config_is_fatal() {
    let ws = Workspace::new();
    let missing = ws.path("absent.toml").to_string_lossy().to_string();
    let args = Args::try_parse_from(["portlink", "--config", missing.as_str(), "draw"]).unwrap();

    assert!(run_with_output(&args, &mut Vec::new(), &mut Vec::new()).is_err());
}
