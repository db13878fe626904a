// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidelink and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Sidelink CLI entrypoint.
//!
//! By default this opens the interactive TUI. `--print` writes the side-by-side view with its
//! connectors to stdout, `--html` writes a standalone page and `--save` writes the loaded
//! comparison as JSON.

use std::error::Error;
use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use sidelink::format::{load_comparison, load_document, parse_blocks, save_comparison, MarkupReader};
use sidelink::layout::{layout_columns, ColumnsLayout, LayoutOptions, Unmounted, Viewport};
use sidelink::model::{AnnotatedDocument, ComparisonSource, DocumentId};
use sidelink::render::{render_html_page, render_side_by_side_text};
use sidelink::tui::{self, TuiOptions};
use sidelink::ui::ViewMode;
use sidelink::view::{ComparisonController, FrameQueue};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

const DEFAULT_PRINT_WIDTH: usize = 100;
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::WARN;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <left> <right> [--print | --html <out> | --save <out>] [--width <cols>] [--no-connectors] [--mode <mode>]\n  {program} --page <file> [--left <id>] [--right <id>] [...]\n  {program} --comparison <file.json> [...]\n  {program} --demo [...]\n\n<left>/<right> are `.json` documents or HTML fragments with highlighted spans.\n--page reads two sections of a static page (ids default to merit and distinction).\n--mode picks the TUI's starting view: analysis (default) or side-by-side.\n--width sets the --print canvas width (default {DEFAULT_PRINT_WIDTH}).\n\nSIDELINK_LOG sets the log level (default warn). In the TUI, logs only go to SIDELINK_LOG_FILE."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum Output {
    #[default]
    Tui,
    Print,
    Html(String),
    Save(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
enum Input {
    #[default]
    Demo,
    Documents(String, String),
    Page {
        path: String,
        left: Option<String>,
        right: Option<String>,
    },
    Comparison(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    input: Input,
    output: Output,
    width: Option<usize>,
    no_connectors: bool,
    mode: Option<ViewMode>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();
    let mut demo = false;
    let mut page = None;
    let mut comparison = None;
    let mut left_key = None;
    let mut right_key = None;
    let mut documents = Vec::new();
    let mut output = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if demo {
                    return Err(());
                }
                demo = true;
            }
            "--page" => {
                if page.is_some() {
                    return Err(());
                }
                page = Some(args.next().ok_or(())?);
            }
            "--comparison" => {
                if comparison.is_some() {
                    return Err(());
                }
                comparison = Some(args.next().ok_or(())?);
            }
            "--left" => {
                if left_key.is_some() {
                    return Err(());
                }
                left_key = Some(args.next().ok_or(())?);
            }
            "--right" => {
                if right_key.is_some() {
                    return Err(());
                }
                right_key = Some(args.next().ok_or(())?);
            }
            "--print" => {
                if output.is_some() {
                    return Err(());
                }
                output = Some(Output::Print);
            }
            "--html" => {
                if output.is_some() {
                    return Err(());
                }
                output = Some(Output::Html(args.next().ok_or(())?));
            }
            "--save" => {
                if output.is_some() {
                    return Err(());
                }
                output = Some(Output::Save(args.next().ok_or(())?));
            }
            "--width" => {
                if options.width.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let width: usize = raw.parse().map_err(|_| ())?;
                if width == 0 {
                    return Err(());
                }
                options.width = Some(width);
            }
            "--no-connectors" => {
                if options.no_connectors {
                    return Err(());
                }
                options.no_connectors = true;
            }
            "--mode" => {
                if options.mode.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                options.mode = Some(raw.parse().map_err(|_| ())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if documents.len() == 2 {
                    return Err(());
                }
                documents.push(arg);
            }
        }
    }

    let sources = usize::from(demo)
        + usize::from(page.is_some())
        + usize::from(comparison.is_some())
        + usize::from(!documents.is_empty());
    if sources > 1 {
        return Err(());
    }
    if page.is_none() && (left_key.is_some() || right_key.is_some()) {
        return Err(());
    }

    options.input = if let Some(path) = page {
        Input::Page {
            path,
            left: left_key,
            right: right_key,
        }
    } else if let Some(path) = comparison {
        Input::Comparison(path)
    } else if documents.is_empty() {
        Input::Demo
    } else {
        let mut documents = documents.into_iter();
        let (Some(left), Some(right)) = (documents.next(), documents.next()) else {
            return Err(());
        };
        Input::Documents(left, right)
    };

    options.output = output.unwrap_or_default();
    if options.mode.is_some() && options.output != Output::Tui {
        return Err(());
    }
    if options.width.is_some() && options.output != Output::Print {
        return Err(());
    }

    Ok(options)
}

fn init_logging(output: &Output) -> Result<(), Box<dyn Error>> {
    let level = match std::env::var("SIDELINK_LOG") {
        Ok(raw) => raw.parse::<LevelFilter>()?,
        Err(_) => DEFAULT_LOG_LEVEL,
    };

    // The TUI owns the terminal, so it only logs to a file.
    match (output, std::env::var_os("SIDELINK_LOG_FILE")) {
        (_, Some(path)) => {
            let file = File::create(&path)?;
            tracing_subscriber::fmt()
                .with_target(false)
                .with_ansi(false)
                .with_max_level(level)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| err.to_string())?;
        }
        (Output::Tui, None) => {}
        (_, None) => {
            tracing_subscriber::fmt()
                .with_target(false)
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| err.to_string())?;
        }
    }
    Ok(())
}

fn load_input(input: &Input) -> Result<ComparisonSource, Box<dyn Error>> {
    let source = match input {
        Input::Demo => tui::demo_comparison()?,
        Input::Comparison(path) => load_comparison(Path::new(path))?,
        Input::Page { path, left, right } => {
            let page = fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?;
            let reader = MarkupReader::new()?;
            reader.extract_comparison(
                &page,
                left.as_deref().unwrap_or(tui::DEMO_LEFT),
                right.as_deref().unwrap_or(tui::DEMO_RIGHT),
            )?
        }
        Input::Documents(left, right) => {
            ComparisonSource::new(load_side(Path::new(left))?, load_side(Path::new(right))?)
        }
    };
    info!(
        left = %source.left.id(),
        right = %source.right.id(),
        "comparison ready"
    );
    Ok(source)
}

/// A `.json` document, or an HTML fragment named after its file stem.
fn load_side(path: &Path) -> Result<AnnotatedDocument, Box<dyn Error>> {
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        return Ok(load_document(path)?);
    }

    let fragment =
        fs::read_to_string(path).map_err(|err| format!("{}: {err}", path.display()))?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| format!("{}: file name is not valid UTF-8", path.display()))?;
    let id = DocumentId::new(stem).map_err(|err| format!("{}: {err}", path.display()))?;
    let blocks = parse_blocks(&fragment).map_err(|err| format!("{}: {err}", path.display()))?;
    debug!(id = %id, blocks = blocks.len(), "parsed fragment");
    Ok(AnnotatedDocument::new(id, blocks))
}

/// Runs the side-by-side pipeline once: rebuild, lay out, then draw what was deferred.
fn side_by_side(
    source: ComparisonSource,
    connectors: bool,
    options: LayoutOptions,
) -> (ComparisonController, Option<ColumnsLayout>) {
    let mut controller = ComparisonController::new(Some(source), FrameQueue::new());
    controller.on_connectors_toggle(connectors, &Unmounted);
    controller.on_mode_change(ViewMode::SideBySide);

    let layout = controller.rows().map(|rows| {
        let viewport = Viewport::new(options.total_width(), usize::MAX);
        layout_columns(rows, options, viewport)
    });
    if let Some(layout) = &layout {
        controller.after_layout(layout);
    }
    (controller, layout)
}

fn print(source: ComparisonSource, connectors: bool, width: usize) -> Result<(), Box<dyn Error>> {
    let options = LayoutOptions::default().fit_width(width);
    let (controller, layout) = side_by_side(source, connectors, options);
    let Some(layout) = layout else {
        return Ok(());
    };
    let text = render_side_by_side_text(&layout, controller.overlay())?;
    println!("{text}");
    Ok(())
}

fn write_html(source: ComparisonSource, connectors: bool, out: &str) -> Result<(), Box<dyn Error>> {
    let titles = (source.left.label().to_owned(), source.right.label().to_owned());
    let (controller, layout) = side_by_side(source, connectors, LayoutOptions::html());
    let (Some(rows), Some(layout)) = (controller.rows(), layout.as_ref()) else {
        return Ok(());
    };
    let page = render_html_page(rows, layout, controller.overlay(), (&titles.0, &titles.1));
    fs::write(out, page).map_err(|err| format!("{out}: {err}"))?;
    info!(path = out, connectors = controller.overlay().len(), "wrote html page");
    Ok(())
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "sidelink".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        init_logging(&options.output)?;
        let source = load_input(&options.input)?;
        let connectors = !options.no_connectors;

        match options.output {
            Output::Tui => tui::run(
                Some(source),
                TuiOptions {
                    mode: options.mode.unwrap_or_default(),
                    connectors,
                    ..TuiOptions::default()
                },
            ),
            Output::Print => print(source, connectors, options.width.unwrap_or(DEFAULT_PRINT_WIDTH)),
            Output::Html(out) => write_html(source, connectors, &out),
            Output::Save(out) => Ok(save_comparison(Path::new(&out), &source)?),
        }
    })();

    if let Err(err) = result {
        eprintln!("sidelink: {err}");
        std::process::exit(1);
    }
}
