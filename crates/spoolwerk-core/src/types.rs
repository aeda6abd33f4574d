// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Spoolwerk print devices.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::SpoolError;

/// Opaque identifier for a client machine requesting a connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(String);

impl ClientId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ClientId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ClientId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The declared variant of a print device.
///
/// Dispatch always branches on this tag, never on the concrete device type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeviceKind {
    /// Shared network printer: many clients, queued asynchronous jobs.
    Network,
    /// Point-to-point USB printer: one client, synchronous printing.
    Usb,
}

impl DeviceKind {
    /// Type tag as accepted by [`FromStr`].
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Network => "NETWORK",
            Self::Usb => "USB",
        }
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for DeviceKind {
    type Err = SpoolError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_uppercase().as_str() {
            "NETWORK" => Ok(Self::Network),
            "USB" => Ok(Self::Usb),
            _ => Err(SpoolError::UnsupportedType(tag.to_string())),
        }
    }
}

/// Unique identifier for a submitted job.  Used for event correlation only;
/// ordering is decided by queue position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub Uuid);

impl JobId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A document submitted for printing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub document: String,
    /// SHA-256 hash of the document text, carried on every event for the job.
    pub document_hash: String,
    pub submitted_at: DateTime<Utc>,
}

impl Job {
    /// A fresh job with a new id, stamped with the submission time.
    pub fn new(document: impl Into<String>) -> Self {
        let document = document.into();
        let document_hash = hex::encode(Sha256::digest(document.as_bytes()));
        Self {
            id: JobId::new(),
            document,
            document_hash,
            submitted_at: Utc::now(),
        }
    }

    /// Close out the job: it started at `started_at` and finishes now.
    pub fn into_receipt(
        self,
        device: DeviceKind,
        client: Option<ClientId>,
        started_at: DateTime<Utc>,
    ) -> JobReceipt {
        JobReceipt {
            job_id: self.id,
            device,
            document: self.document,
            document_hash: self.document_hash,
            client,
            submitted_at: self.submitted_at,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Proof that a job ran to completion on a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReceipt {
    pub job_id: JobId,
    pub device: DeviceKind,
    pub document: String,
    /// SHA-256 hash of the document text.
    pub document_hash: String,
    /// Client holding the link while the job printed (USB only).
    pub client: Option<ClientId>,
    pub submitted_at: DateTime<Utc>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Operation a device was asked to perform, as reported on rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Connect,
    Disconnect,
    Print,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connect => "connect",
            Self::Disconnect => "disconnect",
            Self::Print => "print",
        })
    }
}

/// Externally visible lifecycle events.  Because network submission never
/// blocks, these are the only signal of a device's internal progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceEvent {
    /// A client attached to the device.
    Connected {
        device: DeviceKind,
        client: ClientId,
    },
    /// A client detached.  `None` when a network disconnect named no client.
    Disconnected {
        device: DeviceKind,
        client: Option<ClientId>,
    },
    /// A network job was appended to the queue.
    Queued {
        device: DeviceKind,
        job_id: JobId,
        document: String,
        document_hash: String,
        /// Jobs pending in the queue after this push, this one included.
        depth: usize,
    },
    /// A job began its simulated print.
    PrintStarted {
        device: DeviceKind,
        job_id: JobId,
        document: String,
        document_hash: String,
        client: Option<ClientId>,
    },
    /// A job finished printing.
    PrintFinished {
        device: DeviceKind,
        job_id: JobId,
        document: String,
        document_hash: String,
        client: Option<ClientId>,
    },
    /// An operation failed; device state is unchanged.
    Rejected {
        device: DeviceKind,
        operation: Operation,
        reason: String,
    },
}

impl DeviceEvent {
    /// The device that emitted this event.
    pub fn device(&self) -> DeviceKind {
        match self {
            Self::Connected { device, .. }
            | Self::Disconnected { device, .. }
            | Self::Queued { device, .. }
            | Self::PrintStarted { device, .. }
            | Self::PrintFinished { device, .. }
            | Self::Rejected { device, .. } => *device,
        }
    }
}
