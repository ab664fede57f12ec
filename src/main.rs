// SPDX-License-Identifier: MIT
//
// prism: render styled text to the terminal.
//
// The binary wires the three crates together:
//
//   prism-term     → terminal profile, color math, SGR encoding
//   prism-text     → styled text trees and the renderer
//   prism-gradient → color gradients over colors and over text
//
// With no text arguments it prints a handful of samples. Otherwise the
// arguments are joined into one line, optionally run through a text
// gradient, and rendered:
//
//   prism [--color <level>] [--strict] [--space <rgb|hsv|oklch>]
//         [--gradient <color,color,...[,phase]>] [TEXT...]
//
// Logging goes to stderr when PRISM_LOG is set to a level (error, warn,
// info, debug, trace).

use std::env;
use std::error::Error;
use std::io::{self, Write};
use std::process;

use log::{LevelFilter, Log, Metadata, Record};

use prism_gradient::{Gradient, GradientSpace, HsvLerp, RgbLerp, TextGradient};
use prism_term::{ColorLevel, NamedColor, Profile, Rgb};
use prism_text::{Decorations, Renderer, Style, TextNode};

// ─── Logging ────────────────────────────────────────────────────────────────

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let Some(level) = env::var("PRISM_LOG")
        .ok()
        .and_then(|v| v.trim().parse::<LevelFilter>().ok())
    else {
        return;
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq)]
struct Options {
    color: Option<ColorLevel>,
    strict: bool,
    space: GradientSpace,
    gradient: Option<Vec<String>>,
    text: Vec<String>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Options, String> {
    let mut opts = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--color" => {
                let value = args.next().ok_or("--color needs a level")?;
                let level = ColorLevel::parse(&value)
                    .ok_or_else(|| format!("unknown color level `{value}`"))?;
                opts.color = Some(level);
            }
            "--strict" => opts.strict = true,
            "--space" => {
                let value = args.next().ok_or("--space needs a color space")?;
                opts.space = GradientSpace::parse(&value)
                    .ok_or_else(|| format!("unknown color space `{value}`"))?;
            }
            "--gradient" => {
                let value = args.next().ok_or("--gradient needs a color list")?;
                opts.gradient = Some(value.split(',').map(str::to_owned).collect());
            }
            "--" => {
                opts.text.extend(args.by_ref());
            }
            flag if flag.starts_with("--") => return Err(format!("unknown option `{flag}`")),
            _ => opts.text.push(arg),
        }
    }
    Ok(opts)
}

fn profile_for(opts: &Options) -> Profile {
    let mut profile = Profile::detect();
    if let Some(level) = opts.color {
        profile = profile.with_color_level(level);
    }
    if opts.strict {
        profile = profile.strict();
    }
    profile
}

// ─── Samples ────────────────────────────────────────────────────────────────

/// One "A" per step of the gradient, each in its own color.
fn swatch_row(colors: impl IntoIterator<Item = Rgb>) -> TextNode {
    TextNode::new().children_from(
        colors
            .into_iter()
            .map(|rgb| TextNode::styled("A", Style::new().color(rgb))),
    )
}

fn samples() -> Result<Vec<(&'static str, TextNode)>, Box<dyn Error>> {
    let teal = Rgb::hex("#25f9d2").ok_or("bad sample color")?;
    let styled = TextNode::styled("test", Style::new().color(teal).bold().italic());

    let red_to_aqua = Gradient::new(NamedColor::Red.rgb(), NamedColor::Aqua.rgb());
    let rgb_row = swatch_row(&red_to_aqua.generator(10, RgbLerp));

    let start = Rgb::hex("#06302a").ok_or("bad sample color")?;
    let end = Rgb::hex("#ed582a").ok_or("bad sample color")?;
    let teal_to_orange = Gradient::new(start, end);
    let hsv_row = swatch_row(&teal_to_orange.generator(10, HsvLerp));

    let nested = TextNode::styled("warning: ", Style::new().color(NamedColor::Gold).bold())
        .child(TextNode::styled("disk ", Style::new().without(Decorations::BOLD)))
        .child(TextNode::styled("almost full", Style::new().color(NamedColor::Red).underlined()));

    let rainbow = TextGradient::parse(&["red", "gold", "green", "aqua", "blue", "light_purple"])?
        .apply(&TextNode::text("prism renders gradients across graphemes"));

    Ok(vec![
        ("styled", styled),
        ("rgb steps", rgb_row),
        ("hsv steps", hsv_row),
        ("nested", nested),
        ("text gradient", rainbow),
    ])
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn run(opts: &Options) -> Result<(), Box<dyn Error>> {
    let renderer = Renderer::new(profile_for(opts));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if opts.text.is_empty() && opts.gradient.is_none() {
        for (label, node) in samples()? {
            writeln!(out, "{label:>14}  {}", renderer.render(&node)?)?;
        }
        return Ok(());
    }

    let mut node = TextNode::text(opts.text.join(" "));
    if let Some(args) = &opts.gradient {
        node = TextGradient::parse(args)?.with_space(opts.space).apply(&node);
    }
    writeln!(out, "{}", renderer.render(&node)?)?;
    out.flush()?;
    Ok(())
}

fn main() {
    init_logging();

    let opts = parse_args(env::args().skip(1)).unwrap_or_else(|e| {
        eprintln!("prism: {e}");
        process::exit(2);
    });

    if let Err(e) = run(&opts) {
        eprintln!("prism: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
