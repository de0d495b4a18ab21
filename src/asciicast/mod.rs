//! asciicast v3 files
//!
//! Reference: https://docs.asciinema.org/manual/asciicast/v3/
//!
//! Animations are exported as recordings that any asciicast player can
//! show. Only the parts of the format the exporter produces are modeled:
//! output and marker events with times relative to the previous event.

mod export;

use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub use export::export_playlist;

/// First line of a recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Header {
    pub version: u8,
    pub term: TermInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Header {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            version: FORMAT_VERSION,
            term: TermInfo { cols, rows },
            title: None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TermInfo {
    pub cols: u32,
    pub rows: u32,
}

const FORMAT_VERSION: u8 = 3;

/// Kinds of events written by the exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    /// Bytes written to the terminal.
    Output,
    /// Named position in the recording.
    Marker,
}

impl EventType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "o" => Some(Self::Output),
            "m" => Some(Self::Marker),
            _ => None,
        }
    }

    pub fn to_code(self) -> &'static str {
        match self {
            Self::Output => "o",
            Self::Marker => "m",
        }
    }
}

/// One `[interval, code, data]` line.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// Seconds since the previous event.
    pub time: f64,
    pub event_type: EventType,
    pub data: String,
}

impl Event {
    pub fn new(time: f64, event_type: EventType, data: impl Into<String>) -> Self {
        Self {
            time,
            event_type,
            data: data.into(),
        }
    }

    pub fn output(time: f64, data: impl Into<String>) -> Self {
        Self::new(time, EventType::Output, data)
    }

    pub fn marker(time: f64, label: impl Into<String>) -> Self {
        Self::new(time, EventType::Marker, label)
    }

    pub fn is_output(&self) -> bool {
        self.event_type == EventType::Output
    }

    pub fn is_marker(&self) -> bool {
        self.event_type == EventType::Marker
    }

    pub fn from_json(line: &str) -> Result<Self> {
        let (time, code, data): (f64, String, String) =
            serde_json::from_str(line).context("Event must be a [time, code, data] array")?;
        match EventType::from_code(&code) {
            Some(event_type) => Ok(Self::new(time, event_type, data)),
            None => bail!("Unknown event type '{code}'"),
        }
    }

    /// JSON line with the interval rounded to milliseconds.
    pub fn to_json(&self) -> Result<String> {
        let data = serde_json::to_string(&self.data)?;
        Ok(format!(
            "[{}, \"{}\", {}]",
            format_time(self.time),
            self.event_type.to_code(),
            data
        ))
    }
}

/// Seconds as `s.mmm`.
fn format_time(seconds: f64) -> String {
    let millis = (seconds.max(0.0) * 1000.0).round() as u64;
    format!("{}.{:03}", millis / 1000, millis % 1000)
}

/// A header plus its events.
#[derive(Debug, Clone)]
pub struct AsciicastFile {
    pub header: Header,
    pub events: Vec<Event>,
}

impl AsciicastFile {
    pub fn new(header: Header) -> Self {
        Self {
            header,
            events: Vec::new(),
        }
    }

    pub fn parse_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lines = reader.lines().enumerate();

        let header_line = match lines.next() {
            Some((_, line)) => line.context("Failed to read header")?,
            None => bail!("Recording is empty"),
        };
        let header: Header = serde_json::from_str(&header_line).context("Invalid header")?;
        if header.version != FORMAT_VERSION {
            bail!(
                "Only asciicast v{FORMAT_VERSION} is supported (got version {})",
                header.version
            );
        }

        let mut cast = Self::new(header);
        for (idx, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event = Event::from_json(&line).with_context(|| format!("Line {}", idx + 1))?;
            cast.events.push(event);
        }
        Ok(cast)
    }

    pub fn parse_str(content: &str) -> Result<Self> {
        Self::parse_reader(BufReader::new(content.as_bytes()))
    }

    /// Write to `path`, creating parent directories.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
        }
        let mut out = BufWriter::new(
            fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        );
        self.write_to(&mut out)?;
        out.flush()?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        writeln!(writer, "{}", serde_json::to_string(&self.header)?)?;
        for event in &self.events {
            writeln!(writer, "{}", event.to_json()?)?;
        }
        Ok(())
    }

    pub fn to_string(&self) -> Result<String> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    pub fn markers(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_marker()).collect()
    }

    pub fn outputs(&self) -> Vec<&Event> {
        self.events.iter().filter(|e| e.is_output()).collect()
    }

    /// Length of the recording in seconds.
    pub fn duration(&self) -> f64 {
        self.events.iter().map(|e| e.time).sum()
    }
}
