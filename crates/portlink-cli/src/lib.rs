//! CLI logic for the Portlink wiring tool.
//!
//! A run loads the backing file, executes one subcommand against it, and
//! saves the backing file again. Subcommand failures such as an unparsable
//! reference or a missing link are reported and leave the store untouched;
//! only failures to load the configuration, read or write the backing file,
//! or write output are returned as errors.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Command};

use std::io::{self, Write};

use clap::CommandFactory;
use log::{debug, info};

use portlink::{
    PortlinkError, Session,
    render::{GraphvizRenderer, Renderer},
    view::{TextDiagram, module_table},
};

use error_adapter::{plain_handler, render_reports};

/// Run the Portlink CLI application
///
/// Command output goes to standard output and reports of failed commands to
/// standard error.
///
/// # Errors
///
/// Returns `PortlinkError` for:
/// - Configuration loading errors
/// - Backing file read, parse or write errors
/// - DOT export write errors
pub fn run(args: &Args) -> Result<(), PortlinkError> {
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_with_output(args, &mut stdout.lock(), &mut stderr.lock())
}

/// Run the application, writing command output to `out` and reports of
/// failed commands to `err`.
///
/// # Errors
///
/// See [`run`].
pub fn run_with_output(
    args: &Args,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), PortlinkError> {
    let Some(command) = &args.command else {
        writeln!(out, "{}", Args::command().render_help())?;
        return Ok(());
    };

    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(store) = &args.store {
        app_config.paths_mut().set_store(store);
    }
    if let Command::Dot { output, no_render } = command {
        if let Some(output) = output {
            app_config.paths_mut().set_dot(output);
        }
        if *no_render {
            app_config.render_mut().set_enabled(false);
        }
    }

    let mut session = Session::open(app_config)?;

    info!(command = command.name(); "Running command");
    let mut console = Console { out, err };
    match command {
        Command::Add {
            source: Some(source),
            destination: Some(destination),
        } => add(&mut session, &mut console, source, destination)?,
        Command::Remove {
            source: Some(source),
            destination: Some(destination),
        } => remove(&mut session, &mut console, source, destination)?,
        Command::List {
            module: Some(module),
        } => list(&session, &mut console, module)?,
        Command::Draw => write!(console.out, "{}", TextDiagram::new(session.store()))?,
        Command::Dot { .. } => dot(&session, &mut console)?,
        Command::Add { .. } | Command::Remove { .. } | Command::List { .. } => {
            console.usage(command)?
        }
    }

    session.save()?;
    debug!(path:? = session.config().paths().store(); "Store saved");

    Ok(())
}

/// Output streams of one run.
struct Console<'a> {
    out: &'a mut dyn Write,
    err: &'a mut dyn Write,
}

impl Console<'_> {
    /// Reports a command failure that leaves the store unchanged.
    fn report(&mut self, error: PortlinkError) -> io::Result<()> {
        debug!(err:? = error; "Command failed");
        write!(self.err, "{}", render_reports(&plain_handler(), &error))
    }

    /// Prints the usage of a subcommand that was given too few arguments.
    fn usage(&mut self, command: &Command) -> io::Result<()> {
        writeln!(
            self.err,
            "error: `{}` is missing required arguments",
            command.name()
        )?;

        let mut cli = Args::command();
        cli.build();
        match cli.find_subcommand_mut(command.name()) {
            Some(subcommand) => writeln!(self.err, "{}", subcommand.render_usage()),
            None => Ok(()),
        }
    }
}

fn add(
    session: &mut Session,
    console: &mut Console<'_>,
    source: &str,
    destination: &str,
) -> io::Result<()> {
    match session.editor().add(source, destination) {
        Ok(linked) => {
            if linked.inherited_port {
                writeln!(
                    console.out,
                    "Info: destination port not specified, using '{}'",
                    linked.destination.port()
                )?;
            }
            writeln!(
                console.out,
                "Linked: [{}] -> [{}]",
                linked.source, linked.destination
            )
        }
        Err(error) => console.report(error.into()),
    }
}

fn remove(
    session: &mut Session,
    console: &mut Console<'_>,
    source: &str,
    destination: &str,
) -> io::Result<()> {
    match session.editor().remove(source, destination) {
        Ok(_) => writeln!(console.out, "Link removed."),
        Err(error) => console.report(error.into()),
    }
}

fn list(session: &Session, console: &mut Console<'_>, module: &str) -> io::Result<()> {
    match module_table(session.store(), module) {
        Some(table) => write!(console.out, "{table}"),
        None => writeln!(console.err, "Module `{module}` not found."),
    }
}

fn dot(session: &Session, console: &mut Console<'_>) -> Result<(), PortlinkError> {
    let render = session.config().render();
    let renderer = render
        .enabled()
        .then(|| GraphvizRenderer::from_config(render));

    let exported = session.export_diagram(renderer.as_ref().map(|r| r as &dyn Renderer))?;

    writeln!(console.out, "Wrote {}", exported.dot.display())?;
    match exported.image {
        Some(image) => writeln!(console.out, "Generated {} successfully.", image.display())?,
        None if renderer.is_some() => writeln!(
            console.err,
            "Rendering with `{}` failed; {} is up to date.",
            render.command(),
            exported.dot.display()
        )?,
        None => {}
    }
    Ok(())
}
