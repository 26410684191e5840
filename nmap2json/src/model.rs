//! Typed Nmap scan record, serialized to JSON with serde.
//!
//! Field names follow the JSON shape of the classic Go nmap libraries so
//! converted scans stay compatible with existing ingest pipelines. Epoch
//! timestamps stay numeric; the mapping layer indexes them as dates.

use std::path::PathBuf;

use serde::Serialize;

/// A complete parsed scan report, the root record of a conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct NmapRun {
    pub scanner: String,
    pub args: String,
    /// Scan start, epoch seconds.
    pub start: i64,
    #[serde(rename = "startstr")]
    pub start_str: String,
    pub version: String,
    #[serde(rename = "xmloutputversion")]
    pub xml_output_version: String,
    #[serde(rename = "scaninfo")]
    pub scan_info: ScanInfo,
    pub verbose: Verbose,
    pub debugging: Debugging,
    pub hosts: Vec<Host>,
    #[serde(rename = "runstats")]
    pub run_stats: RunStats,
    /// Path the scan was loaded from. Local bookkeeping, never serialized.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ScanInfo {
    #[serde(rename = "type")]
    pub scan_type: String,
    pub protocol: String,
    #[serde(rename = "numservices")]
    pub num_services: i64,
    pub services: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Verbose {
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Debugging {
    pub level: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Host {
    /// Host scan start, epoch seconds.
    #[serde(rename = "starttime")]
    pub start_time: i64,
    /// Host scan end, epoch seconds.
    #[serde(rename = "endtime")]
    pub end_time: i64,
    pub comment: String,
    pub status: Status,
    pub addresses: Vec<Address>,
    pub hostnames: Vec<Hostname>,
    pub ports: Vec<Port>,
    pub times: Times,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Status {
    pub state: String,
    pub reason: String,
    #[serde(rename = "reason_ttl")]
    pub reason_ttl: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Address {
    pub addr: String,
    #[serde(rename = "addrtype")]
    pub addr_type: String,
    pub vendor: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Hostname {
    pub name: String,
    #[serde(rename = "type")]
    pub hostname_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Port {
    pub protocol: String,
    #[serde(rename = "portid")]
    pub port_id: i64,
    pub state: PortState,
    pub service: Service,
    pub scripts: Vec<Script>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct PortState {
    pub state: String,
    pub reason: String,
    #[serde(rename = "reason_ttl")]
    pub reason_ttl: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Service {
    pub name: String,
    pub product: String,
    pub version: String,
    #[serde(rename = "extrainfo")]
    pub extra_info: String,
    pub method: String,
    pub conf: i64,
    #[serde(rename = "cpe")]
    pub cpes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Script {
    pub id: String,
    pub output: String,
}

/// Round-trip timing estimates for one host, microseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Times {
    pub srtt: i64,
    pub rttvar: i64,
    pub to: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct RunStats {
    pub finished: Finished,
    pub hosts: HostStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Finished {
    /// Scan end, epoch seconds.
    pub time: i64,
    #[serde(rename = "timestr")]
    pub time_str: String,
    pub elapsed: f64,
    pub summary: String,
    pub exit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct HostStats {
    pub up: i64,
    pub down: i64,
    pub total: i64,
}
