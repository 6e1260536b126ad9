//! Health Events
//!
//! Per-tick buffer of agent state transitions plus an append-only JSONL
//! event log.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// What happened to an agent during a tick or command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthEventKind {
    /// Contracted via proximity to an infected agent
    Infected,
    /// Quarantine timer ran out
    QuarantineEnded,
    /// Mask timer ran out
    ProtectionExpired,
    /// Masked by the mask-all command
    Masked,
    /// Isolated by the quarantine-all command
    Quarantined,
    /// Forced infected by the seed command
    Seeded,
}

/// A single recorded transition, tagged with the agent's cell
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthEvent {
    pub tick: u64,
    pub kind: HealthEventKind,
    pub x: i32,
    pub y: i32,
}

/// Resource: events generated since the last drain
#[derive(Resource, Debug, Default)]
pub struct TickEvents {
    pub events: Vec<HealthEvent>,
}

impl TickEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: HealthEvent) {
        self.events.push(event);
    }

    pub fn drain(&mut self) -> Vec<HealthEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, kind: HealthEventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

/// Errors at the event-log file boundary
#[derive(Debug, Error)]
pub enum EventLogError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Append-only JSONL event log
pub struct EventLog {
    writer: Option<BufWriter<File>>,
    written: u64,
}

impl EventLog {
    /// Create a log writing to the specified path
    pub fn new(path: impl AsRef<Path>) -> Result<Self, EventLogError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            written: 0,
        })
    }

    /// Create a log that discards events (for testing and headless runs
    /// without a log path)
    pub fn null() -> Self {
        Self {
            writer: None,
            written: 0,
        }
    }

    /// Log a batch of events, one JSON object per line
    pub fn log_batch(&mut self, events: &[HealthEvent]) -> Result<(), EventLogError> {
        for event in events {
            self.written += 1;
            if let Some(ref mut writer) = self.writer {
                let json = serde_json::to_string(event)?;
                writeln!(writer, "{}", json)?;
            }
        }
        Ok(())
    }

    /// Events handed to the log so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flush the buffer to disk
    pub fn flush(&mut self) -> Result<(), EventLogError> {
        if let Some(ref mut writer) = self.writer {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            tracing::warn!("failed to flush event log: {}", e);
        }
    }
}
