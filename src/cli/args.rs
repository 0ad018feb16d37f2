//! Command-line surface
//!
//! `-d` and `-r` overwrite each other: whichever appears last decides the
//! mode. Flags clap does not know are reported and dropped before parsing so
//! a stray option never stops a scheduled docs run. As with `getopts`, an
//! option's value is taken verbatim even when it starts with `-`, and the
//! first operand ends option parsing.

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

use crate::boundary::PublishWarning;
use crate::domain::DocRequest;

#[derive(Parser, Debug, Clone, PartialEq)]
#[command(
    name = "publish-docs",
    about = "Build Zephyr documentation and publish it to the docs bucket",
    version,
    args_override_self = true
)]
pub struct Args {
    #[arg(
        short = 'd',
        overrides_with = "release",
        help = "Build daily docs from the development tip (publishes to latest)"
    )]
    pub daily: bool,

    #[arg(
        short = 'r',
        value_name = "RELEASE",
        overrides_with = "daily",
        allow_hyphen_values = true,
        value_parser = NonEmptyStringValueParser::new(),
        help = "Build release docs from the v<RELEASE>-branch release branch"
    )]
    pub release: Option<String>,

    #[arg(
        short,
        long,
        allow_hyphen_values = true,
        help = "Custom configuration file path"
    )]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print the checkout, build and sync steps without running them")]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Args {
    /// The mode and release this invocation asks for. Daily when no mode
    /// flag was given.
    pub fn request(&self) -> DocRequest {
        match self.release {
            Some(ref release) => DocRequest::release(release.clone()),
            None => DocRequest::daily(),
        }
    }
}

/// Short flags taking no value
const SHORT_FLAGS: &[char] = &['d', 'v', 'h', 'V'];
/// Short flags taking a value, attached (`-r1.14`) or as the next argument
const SHORT_OPTIONS: &[char] = &['r', 'c'];
const LONG_FLAGS: &[&str] = &["dry-run", "verbose", "help", "version"];
const LONG_OPTIONS: &[&str] = &["config"];

/// Split the raw argument list into what clap should see and warnings for
/// arguments nobody understands.
///
/// The first element is the program name and is always kept. Short flag
/// clusters are filtered character by character, so `-dx` keeps `-d` and
/// reports `-x`. Option parsing stops at `--` or at the first operand (`-`
/// included); everything from there on is dropped and reported. Arguments
/// that are not valid UTF-8 are passed through for clap to reject.
pub fn screen_args<I, T>(args: I) -> (Vec<OsString>, Vec<PublishWarning>)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut iter = args.into_iter().map(|arg| -> OsString { arg.into() });
    let mut kept: Vec<OsString> = iter.next().into_iter().collect();
    let mut warnings = Vec::new();

    while let Some(raw) = iter.next() {
        let Some(arg) = raw.to_str().map(str::to_owned) else {
            if raw.to_string_lossy().starts_with('-') {
                kept.push(raw);
                continue;
            }
            warnings.extend(ignored(std::iter::once(raw).chain(iter.by_ref())));
            break;
        };

        if arg == "--" {
            warnings.extend(ignored(iter.by_ref()));
            break;
        }

        if arg == "-" || !arg.starts_with('-') {
            warnings.extend(ignored(std::iter::once(raw).chain(iter.by_ref())));
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline_value) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };

            if LONG_FLAGS.contains(&name) {
                kept.push(raw);
            } else if LONG_OPTIONS.contains(&name) {
                kept.push(raw);
                if !inline_value {
                    kept.extend(iter.next());
                }
            } else {
                warnings.push(PublishWarning::UnrecognizedFlag { flag: arg });
            }
            continue;
        }

        let cluster = &arg[1..];
        let mut known = String::new();
        let mut wants_value = false;

        for (i, c) in cluster.char_indices() {
            if SHORT_FLAGS.contains(&c) {
                known.push(c);
            } else if SHORT_OPTIONS.contains(&c) {
                let rest = &cluster[i..];
                known.push_str(rest);
                wants_value = rest.len() == c.len_utf8();
                break;
            } else {
                warnings.push(PublishWarning::UnrecognizedFlag {
                    flag: format!("-{}", c),
                });
            }
        }

        if !known.is_empty() {
            kept.push(format!("-{}", known).into());
            if wants_value {
                kept.extend(iter.next());
            }
        }
    }

    (kept, warnings)
}

fn ignored<I>(rest: I) -> Option<PublishWarning>
where
    I: Iterator<Item = OsString>,
{
    let args: Vec<String> = rest
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    if args.is_empty() {
        None
    } else {
        Some(PublishWarning::IgnoredArguments { args })
    }
}
