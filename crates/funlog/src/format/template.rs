//! Line templates
//!
//! A template such as
//! `{time:YYYY-MM-DD HH:mm:ss.SSS} |<lvl>{level:8}</>| {message}` is compiled
//! once when a sink is registered and rendered for every record the sink
//! accepts. Compilation rejects unknown fields, bad width specs, unknown color
//! tags and unbalanced tags, so a sink can never fail to render.

use super::style::Markup;
use super::time::TimeFormat;
use crate::record::Record;
use crate::{Error, Result};
use nu_ansi_term::Style;
use std::fmt::Write;
use std::time::Duration;

/// Plain line layout used by file sinks
pub const DEFAULT_FORMAT: &str = "{time:YYYY-MM-DD HH:mm:ss.SSS} |{level:8}| \
     {name} : {module}:{line:4} | {extra[module_name]} | - {message}";

/// Colorized layout used by the console sink
pub const DEFAULT_FORMAT_COLOR: &str = "{time:YYYY-MM-DD HH:mm:ss.SSS} |<lvl>{level:8}</>| \
     {name} : {module}:{line:4} | <cyan>{extra[module_name]}</> | - <lvl>{message}</>";

#[derive(Debug, Clone)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Field(FieldKind, Spec),
    Open(Markup),
    Close,
}

#[derive(Debug, Clone)]
enum FieldKind {
    Time(TimeFormat),
    Level,
    Name,
    Module,
    File,
    Line,
    Message,
    Thread,
    Process,
    Elapsed,
    Extra(String),
}

impl FieldKind {
    fn is_numeric(&self) -> bool {
        matches!(self, Self::Line | Self::Process)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
    Center,
}

#[derive(Debug, Clone, Copy, Default)]
struct Spec {
    align: Option<Align>,
    width: usize,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        Parser::new(source).parse()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Render one record, with or without ANSI color codes
    pub fn render(&self, record: &Record, colorize: bool) -> String {
        let mut out = String::with_capacity(self.source.len() + record.message.len() + 32);
        let mut styles: Vec<Style> = Vec::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(kind, spec) => render_field(&mut out, kind, *spec, record),
                Segment::Open(markup) => {
                    let style = markup.resolve(record.level);
                    if colorize {
                        let _ = write!(out, "{}", style.prefix());
                    }
                    styles.push(style);
                }
                Segment::Close => {
                    let closed = styles.pop();
                    if colorize {
                        if let Some(style) = closed {
                            let _ = write!(out, "{}", style.suffix());
                        }
                        // Reset cleared everything; restore the enclosing styles
                        for style in &styles {
                            let _ = write!(out, "{}", style.prefix());
                        }
                    }
                }
            }
        }

        out
    }
}

fn render_field(out: &mut String, kind: &FieldKind, spec: Spec, record: &Record) {
    let mut value = String::new();
    match kind {
        FieldKind::Time(format) => format.render(&record.time, &mut value),
        FieldKind::Level => value.push_str(record.level.as_str()),
        FieldKind::Name => value.push_str(&record.name),
        FieldKind::Module => value.push_str(record.module()),
        FieldKind::File => value.push_str(record.file_name()),
        FieldKind::Line => {
            if let Some(line) = record.line {
                let _ = write!(value, "{}", line);
            }
        }
        FieldKind::Message => value.push_str(&record.message),
        FieldKind::Thread => value.push_str(&record.thread),
        FieldKind::Process => {
            let _ = write!(value, "{}", record.process);
        }
        FieldKind::Elapsed => format_elapsed(&mut value, record.elapsed),
        FieldKind::Extra(key) => {
            if let Some(extra) = record.extra.get(key) {
                value.push_str(extra);
            }
        }
    }

    let align = spec.align.unwrap_or(if kind.is_numeric() {
        Align::Right
    } else {
        Align::Left
    });
    let width = spec.width;
    let _ = match align {
        Align::Left => write!(out, "{:<width$}", value),
        Align::Right => write!(out, "{:>width$}", value),
        Align::Center => write!(out, "{:^width$}", value),
    };
}

/// `H:MM:SS.ffffff`
fn format_elapsed(out: &mut String, elapsed: Duration) {
    let secs = elapsed.as_secs();
    let _ = write!(
        out,
        "{}:{:02}:{:02}.{:06}",
        secs / 3600,
        (secs / 60) % 60,
        secs % 60,
        elapsed.subsec_micros()
    );
}

struct Parser<'a> {
    source: &'a str,
    rest: &'a str,
    literal: String,
    segments: Vec<Segment>,
    open_tags: Vec<&'a str>,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            rest: source,
            literal: String::new(),
            segments: Vec::new(),
            open_tags: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Template> {
        while let Some(c) = self.rest.chars().next() {
            match c {
                '{' if self.rest.starts_with("{{") => self.take_literal(2, '{'),
                '}' if self.rest.starts_with("}}") => self.take_literal(2, '}'),
                '\\' if self.rest.starts_with("\\<") => self.take_literal(2, '<'),
                '{' => self.parse_field()?,
                '}' => return Err(Error::format(self.source, "single '}' is not allowed")),
                '<' => self.parse_tag()?,
                _ => self.take_literal(c.len_utf8(), c),
            }
        }

        if let Some(tag) = self.open_tags.last() {
            return Err(Error::format(
                self.source,
                format!("tag <{}> is never closed", tag),
            ));
        }

        self.flush_literal();
        Ok(Template {
            source: self.source.to_string(),
            segments: self.segments,
        })
    }

    fn take_literal(&mut self, consumed: usize, c: char) {
        self.literal.push(c);
        self.rest = &self.rest[consumed..];
    }

    fn flush_literal(&mut self) {
        if !self.literal.is_empty() {
            self.segments
                .push(Segment::Literal(std::mem::take(&mut self.literal)));
        }
    }

    fn parse_field(&mut self) -> Result<()> {
        let rest = self.rest;
        let end = rest
            .find('}')
            .ok_or_else(|| Error::format(self.source, "unterminated '{'"))?;
        let body = &rest[1..end];
        self.rest = &rest[end + 1..];

        let (name, spec) = match body.split_once(':') {
            Some((name, spec)) => (name, Some(spec)),
            None => (body, None),
        };

        let kind = match name {
            "time" => {
                let format = match spec {
                    Some(pattern) => {
                        TimeFormat::parse(pattern).map_err(|e| Error::format(self.source, e))?
                    }
                    None => TimeFormat::default(),
                };
                self.flush_literal();
                self.segments
                    .push(Segment::Field(FieldKind::Time(format), Spec::default()));
                return Ok(());
            }
            "level" => FieldKind::Level,
            "name" => FieldKind::Name,
            "module" => FieldKind::Module,
            "file" => FieldKind::File,
            "line" => FieldKind::Line,
            "message" => FieldKind::Message,
            "thread" => FieldKind::Thread,
            "process" => FieldKind::Process,
            "elapsed" => FieldKind::Elapsed,
            other => match other
                .strip_prefix("extra[")
                .and_then(|k| k.strip_suffix(']'))
            {
                Some(key) if !key.is_empty() => FieldKind::Extra(key.to_string()),
                _ => {
                    return Err(Error::format(
                        self.source,
                        format!("unknown field {{{}}}", other),
                    ))
                }
            },
        };

        let spec = match spec {
            Some(spec) => parse_spec(spec).ok_or_else(|| {
                Error::format(self.source, format!("invalid format spec {:?}", spec))
            })?,
            None => Spec::default(),
        };

        self.flush_literal();
        self.segments.push(Segment::Field(kind, spec));
        Ok(())
    }

    fn parse_tag(&mut self) -> Result<()> {
        let rest = self.rest;
        let end = rest
            .find('>')
            .ok_or_else(|| Error::format(self.source, "unterminated '<'"))?;
        let tag = &rest[1..end];
        self.rest = &rest[end + 1..];

        if let Some(closing) = tag.strip_prefix('/') {
            let open = self.open_tags.pop().ok_or_else(|| {
                Error::format(self.source, format!("closing tag <{}> has no opening tag", tag))
            })?;
            if !closing.is_empty() && closing != open {
                return Err(Error::format(
                    self.source,
                    format!("closing tag </{}> does not match <{}>", closing, open),
                ));
            }
            self.flush_literal();
            self.segments.push(Segment::Close);
            return Ok(());
        }

        let markup = Markup::parse(tag)
            .ok_or_else(|| Error::format(self.source, format!("unknown color tag <{}>", tag)))?;
        self.open_tags.push(tag);
        self.flush_literal();
        self.segments.push(Segment::Open(markup));
        Ok(())
    }
}

/// `[<>^]?width`
fn parse_spec(spec: &str) -> Option<Spec> {
    let (align, width) = match spec.chars().next() {
        Some('<') => (Some(Align::Left), &spec[1..]),
        Some('>') => (Some(Align::Right), &spec[1..]),
        Some('^') => (Some(Align::Center), &spec[1..]),
        _ => (None, spec),
    };
    let width = if width.is_empty() {
        0
    } else {
        width.parse().ok()?
    };
    Some(Spec { align, width })
}
