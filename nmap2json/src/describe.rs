//! [`Record`] implementations for the scan model.
//!
//! Descriptors must agree with the serde attributes in [`crate::model`]:
//! same field order, same renames, same skips. The tests at the bottom
//! compare each descriptor list against the keys serde actually emits.

use record_mapping_core::{FieldDescriptor, Record, ScalarKind};

use crate::model::{
    Address, Debugging, Finished, Host, HostStats, Hostname, NmapRun, Port, PortState, RunStats,
    ScanInfo, Script, Service, Status, Times, Verbose,
};

impl Record for NmapRun {
    const NAME: &'static str = "nmaprun";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("scanner", ScalarKind::String),
            FieldDescriptor::scalar("args", ScalarKind::String),
            FieldDescriptor::scalar("start", ScalarKind::DateTime),
            FieldDescriptor::scalar("start_str", ScalarKind::String).renamed("startstr"),
            FieldDescriptor::scalar("version", ScalarKind::String),
            FieldDescriptor::scalar("xml_output_version", ScalarKind::String)
                .renamed("xmloutputversion"),
            FieldDescriptor::record::<ScanInfo>("scan_info").renamed("scaninfo"),
            FieldDescriptor::record::<Verbose>("verbose"),
            FieldDescriptor::record::<Debugging>("debugging"),
            FieldDescriptor::record_array::<Host>("hosts"),
            FieldDescriptor::record::<RunStats>("run_stats").renamed("runstats"),
            FieldDescriptor::scalar("source", ScalarKind::String).skipped(),
        ]
    }
}

impl Record for ScanInfo {
    const NAME: &'static str = "scaninfo";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("scan_type", ScalarKind::String).renamed("type"),
            FieldDescriptor::scalar("protocol", ScalarKind::String),
            FieldDescriptor::scalar("num_services", ScalarKind::Integer).renamed("numservices"),
            FieldDescriptor::scalar("services", ScalarKind::String),
        ]
    }
}

impl Record for Verbose {
    const NAME: &'static str = "verbose";

    fn fields() -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::scalar("level", ScalarKind::Integer)]
    }
}

impl Record for Debugging {
    const NAME: &'static str = "debugging";

    fn fields() -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::scalar("level", ScalarKind::Integer)]
    }
}

impl Record for Host {
    const NAME: &'static str = "host";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("start_time", ScalarKind::DateTime).renamed("starttime"),
            FieldDescriptor::scalar("end_time", ScalarKind::DateTime).renamed("endtime"),
            FieldDescriptor::scalar("comment", ScalarKind::String),
            FieldDescriptor::record::<Status>("status"),
            FieldDescriptor::record_array::<Address>("addresses"),
            FieldDescriptor::record_array::<Hostname>("hostnames"),
            FieldDescriptor::record_array::<Port>("ports"),
            FieldDescriptor::record::<Times>("times"),
        ]
    }
}

impl Record for Status {
    const NAME: &'static str = "status";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("state", ScalarKind::String),
            FieldDescriptor::scalar("reason", ScalarKind::String),
            FieldDescriptor::scalar("reason_ttl", ScalarKind::Integer),
        ]
    }
}

impl Record for Address {
    const NAME: &'static str = "address";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("addr", ScalarKind::String),
            FieldDescriptor::scalar("addr_type", ScalarKind::String).renamed("addrtype"),
            FieldDescriptor::scalar("vendor", ScalarKind::String),
        ]
    }
}

impl Record for Hostname {
    const NAME: &'static str = "hostname";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("name", ScalarKind::String),
            FieldDescriptor::scalar("hostname_type", ScalarKind::String).renamed("type"),
        ]
    }
}

impl Record for Port {
    const NAME: &'static str = "port";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("protocol", ScalarKind::String),
            FieldDescriptor::scalar("port_id", ScalarKind::Integer).renamed("portid"),
            FieldDescriptor::record::<PortState>("state"),
            FieldDescriptor::record::<Service>("service"),
            FieldDescriptor::record_array::<Script>("scripts"),
        ]
    }
}

impl Record for PortState {
    const NAME: &'static str = "state";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("state", ScalarKind::String),
            FieldDescriptor::scalar("reason", ScalarKind::String),
            FieldDescriptor::scalar("reason_ttl", ScalarKind::Integer),
        ]
    }
}

impl Record for Service {
    const NAME: &'static str = "service";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("name", ScalarKind::String),
            FieldDescriptor::scalar("product", ScalarKind::String),
            FieldDescriptor::scalar("version", ScalarKind::String),
            FieldDescriptor::scalar("extra_info", ScalarKind::String).renamed("extrainfo"),
            FieldDescriptor::scalar("method", ScalarKind::String),
            FieldDescriptor::scalar("conf", ScalarKind::Integer),
            FieldDescriptor::scalar_array("cpes", ScalarKind::String).renamed("cpe"),
        ]
    }
}

impl Record for Script {
    const NAME: &'static str = "script";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("id", ScalarKind::String),
            FieldDescriptor::scalar("output", ScalarKind::String),
        ]
    }
}

impl Record for Times {
    const NAME: &'static str = "times";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("srtt", ScalarKind::Integer),
            FieldDescriptor::scalar("rttvar", ScalarKind::Integer),
            FieldDescriptor::scalar("to", ScalarKind::Integer),
        ]
    }
}

impl Record for RunStats {
    const NAME: &'static str = "runstats";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::record::<Finished>("finished"),
            FieldDescriptor::record::<HostStats>("hosts"),
        ]
    }
}

impl Record for Finished {
    const NAME: &'static str = "finished";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("time", ScalarKind::DateTime),
            FieldDescriptor::scalar("time_str", ScalarKind::String).renamed("timestr"),
            FieldDescriptor::scalar("elapsed", ScalarKind::Float),
            FieldDescriptor::scalar("summary", ScalarKind::String),
            FieldDescriptor::scalar("exit", ScalarKind::String),
        ]
    }
}

impl Record for HostStats {
    const NAME: &'static str = "hosts";

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::scalar("up", ScalarKind::Integer),
            FieldDescriptor::scalar("down", ScalarKind::Integer),
            FieldDescriptor::scalar("total", ScalarKind::Integer),
        ]
    }
}
