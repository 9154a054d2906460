//! JSONL signal log
//!
//! One JSON object per line, appended to a file. A write failure disables the log for the
//! rest of the session; the game keeps running.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::core::Signal;

#[derive(Serialize)]
struct Record<'a> {
    frame: u64,
    #[serde(flatten)]
    signal: &'a Signal,
}

pub struct SignalLog {
    writer: Option<BufWriter<File>>,
    buf: Vec<u8>,
    written: u64,
}

impl SignalLog {
    /// Open (or create) `path` for appending
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening signal log {}", path.display()))?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            buf: Vec::with_capacity(256),
            written: 0,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    /// Number of records written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Append every signal as its own line, tagged with the frame number
    pub fn record(&mut self, frame: u64, signals: &[Signal]) {
        for signal in signals {
            if let Err(e) = self.write_one(frame, signal) {
                eprintln!("[Engine] signal log disabled: {:#}", e);
                self.writer = None;
                return;
            }
        }
    }

    fn write_one(&mut self, frame: u64, signal: &Signal) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &Record { frame, signal })
            .context("serialising signal")?;
        self.buf.push(b'\n');
        writer.write_all(&self.buf).context("writing signal log")?;
        self.written += 1;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush().context("flushing signal log")?;
        }
        Ok(())
    }
}

impl Drop for SignalLog {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}
