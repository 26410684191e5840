//! Build the typed scan record from a parsed XML element tree.
//!
//! The loader is deliberately lenient: missing optional elements and
//! attributes default to empty values so partial or older reports still
//! convert. Only a wrong root element, malformed XML, or an unparseable
//! numeric attribute fail.

use std::path::Path;

use thiserror::Error;

use crate::model::{
    Address, Debugging, Finished, Host, HostStats, Hostname, NmapRun, Port, PortState, RunStats,
    ScanInfo, Script, Service, Status, Times, Verbose,
};
use crate::xml::{self, Element, XmlError};

/// Errors that can occur while loading a scan report.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not valid XML.
    #[error(transparent)]
    Xml(#[from] XmlError),
    /// The root element is not `<nmaprun>`.
    #[error("not an Nmap report: root element is <{found}>, expected <nmaprun>")]
    NotNmapRun { found: String },
    /// A numeric attribute holds a non-numeric value.
    #[error("invalid numeric attribute `{attribute}`: {value:?}")]
    InvalidNumber { attribute: String, value: String },
}

/// Parse an Nmap XML report file into an [`NmapRun`] record.
pub fn parse_scan_file(path: &Path) -> Result<NmapRun, ParseError> {
    let root = xml::parse_file(path)?;
    parse_scan(&root, Some(path))
}

/// Build an [`NmapRun`] from an already-parsed element tree.
pub fn parse_scan(root: &Element, source: Option<&Path>) -> Result<NmapRun, ParseError> {
    if root.name != "nmaprun" {
        return Err(ParseError::NotNmapRun {
            found: root.name.clone(),
        });
    }

    Ok(NmapRun {
        scanner: attr_string(root, "scanner"),
        args: attr_string(root, "args"),
        start: attr_i64(root, "start")?,
        start_str: attr_string(root, "startstr"),
        version: attr_string(root, "version"),
        xml_output_version: attr_string(root, "xmloutputversion"),
        scan_info: root
            .child("scaninfo")
            .map(parse_scan_info)
            .transpose()?
            .unwrap_or_default(),
        verbose: Verbose {
            level: child_level(root, "verbose")?,
        },
        debugging: Debugging {
            level: child_level(root, "debugging")?,
        },
        hosts: root
            .children_named("host")
            .map(parse_host)
            .collect::<Result<_, _>>()?,
        run_stats: root
            .child("runstats")
            .map(parse_run_stats)
            .transpose()?
            .unwrap_or_default(),
        source: source.map(Path::to_path_buf),
    })
}

fn parse_scan_info(element: &Element) -> Result<ScanInfo, ParseError> {
    Ok(ScanInfo {
        scan_type: attr_string(element, "type"),
        protocol: attr_string(element, "protocol"),
        num_services: attr_i64(element, "numservices")?,
        services: attr_string(element, "services"),
    })
}

fn parse_host(element: &Element) -> Result<Host, ParseError> {
    let ports = element
        .child("ports")
        .map(|ports| {
            ports
                .children_named("port")
                .map(parse_port)
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?
        .unwrap_or_default();

    Ok(Host {
        start_time: attr_i64(element, "starttime")?,
        end_time: attr_i64(element, "endtime")?,
        comment: attr_string(element, "comment"),
        status: element
            .child("status")
            .map(parse_status)
            .transpose()?
            .unwrap_or_default(),
        addresses: element
            .children_named("address")
            .map(parse_address)
            .collect(),
        hostnames: element
            .child("hostnames")
            .map(|hostnames| hostnames.children_named("hostname").map(parse_hostname).collect())
            .unwrap_or_default(),
        ports,
        times: element
            .child("times")
            .map(parse_times)
            .transpose()?
            .unwrap_or_default(),
    })
}

fn parse_status(element: &Element) -> Result<Status, ParseError> {
    Ok(Status {
        state: attr_string(element, "state"),
        reason: attr_string(element, "reason"),
        reason_ttl: attr_i64(element, "reason_ttl")?,
    })
}

fn parse_address(element: &Element) -> Address {
    Address {
        addr: attr_string(element, "addr"),
        addr_type: attr_string(element, "addrtype"),
        vendor: attr_string(element, "vendor"),
    }
}

fn parse_hostname(element: &Element) -> Hostname {
    Hostname {
        name: attr_string(element, "name"),
        hostname_type: attr_string(element, "type"),
    }
}

fn parse_port(element: &Element) -> Result<Port, ParseError> {
    Ok(Port {
        protocol: attr_string(element, "protocol"),
        port_id: attr_i64(element, "portid")?,
        state: element
            .child("state")
            .map(parse_port_state)
            .transpose()?
            .unwrap_or_default(),
        service: element
            .child("service")
            .map(parse_service)
            .transpose()?
            .unwrap_or_default(),
        scripts: element.children_named("script").map(parse_script).collect(),
    })
}

fn parse_port_state(element: &Element) -> Result<PortState, ParseError> {
    Ok(PortState {
        state: attr_string(element, "state"),
        reason: attr_string(element, "reason"),
        reason_ttl: attr_i64(element, "reason_ttl")?,
    })
}

fn parse_service(element: &Element) -> Result<Service, ParseError> {
    Ok(Service {
        name: attr_string(element, "name"),
        product: attr_string(element, "product"),
        version: attr_string(element, "version"),
        extra_info: attr_string(element, "extrainfo"),
        method: attr_string(element, "method"),
        conf: attr_i64(element, "conf")?,
        cpes: element
            .children_named("cpe")
            .filter_map(|cpe| cpe.text().map(str::to_string))
            .collect(),
    })
}

fn parse_script(element: &Element) -> Script {
    // Script output lives in the `output` attribute; NSE sometimes carries
    // the same content as element text instead.
    let output = element
        .attr("output")
        .map(str::to_string)
        .or_else(|| element.text().map(str::to_string))
        .unwrap_or_default();
    Script {
        id: attr_string(element, "id"),
        output,
    }
}

fn parse_times(element: &Element) -> Result<Times, ParseError> {
    Ok(Times {
        srtt: attr_i64(element, "srtt")?,
        rttvar: attr_i64(element, "rttvar")?,
        to: attr_i64(element, "to")?,
    })
}

fn parse_run_stats(element: &Element) -> Result<RunStats, ParseError> {
    Ok(RunStats {
        finished: element
            .child("finished")
            .map(parse_finished)
            .transpose()?
            .unwrap_or_default(),
        hosts: element
            .child("hosts")
            .map(parse_host_stats)
            .transpose()?
            .unwrap_or_default(),
    })
}

fn parse_finished(element: &Element) -> Result<Finished, ParseError> {
    Ok(Finished {
        time: attr_i64(element, "time")?,
        time_str: attr_string(element, "timestr"),
        elapsed: attr_f64(element, "elapsed")?,
        summary: attr_string(element, "summary"),
        exit: attr_string(element, "exit"),
    })
}

fn parse_host_stats(element: &Element) -> Result<HostStats, ParseError> {
    Ok(HostStats {
        up: attr_i64(element, "up")?,
        down: attr_i64(element, "down")?,
        total: attr_i64(element, "total")?,
    })
}

fn child_level(element: &Element, name: &str) -> Result<i64, ParseError> {
    element.child(name).map_or(Ok(0), |child| attr_i64(child, "level"))
}

fn attr_string(element: &Element, name: &str) -> String {
    element.attr(name).unwrap_or_default().to_string()
}

fn attr_i64(element: &Element, name: &str) -> Result<i64, ParseError> {
    match element.attr(name) {
        None => Ok(0),
        Some(value) => value.parse().map_err(|_| ParseError::InvalidNumber {
            attribute: name.to_string(),
            value: value.to_string(),
        }),
    }
}

fn attr_f64(element: &Element, name: &str) -> Result<f64, ParseError> {
    match element.attr(name) {
        None => Ok(0.0),
        Some(value) => value.parse().map_err(|_| ParseError::InvalidNumber {
            attribute: name.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{parse_scan, ParseError};
    use crate::xml::parse;

    const SAMPLE: &[u8] = br#"<nmaprun scanner="nmap" args="nmap -sV 10.0.0.1" start="1712000000" startstr="Mon Apr  1 2024" version="7.94" xmloutputversion="1.05">
<scaninfo type="syn" protocol="tcp" numservices="1000" services="1-1000"/>
<verbose level="1"/>
<debugging level="0"/>
<host starttime="1712000001" endtime="1712000042">
  <status state="up" reason="arp-response" reason_ttl="0"/>
  <address addr="10.0.0.1" addrtype="ipv4"/>
  <address addr="AA:BB:CC:DD:EE:FF" addrtype="mac" vendor="Acme"/>
  <hostnames><hostname name="gw.lan" type="PTR"/></hostnames>
  <ports>
    <port protocol="tcp" portid="22">
      <state state="open" reason="syn-ack" reason_ttl="64"/>
      <service name="ssh" product="OpenSSH" version="9.6" method="probed" conf="10">
        <cpe>cpe:/a:openbsd:openssh:9.6</cpe>
      </service>
      <script id="ssh-hostkey" output="2048 aa:bb (RSA)"/>
    </port>
    <port protocol="tcp" portid="80">
      <state state="closed" reason="reset" reason_ttl="64"/>
    </port>
  </ports>
  <times srtt="251" rttvar="112" to="100000"/>
</host>
<runstats>
  <finished time="1712000042" timestr="Mon Apr  1 2024" elapsed="42.17" summary="1 host up" exit="success"/>
  <hosts up="1" down="0" total="1"/>
</runstats>
</nmaprun>"#;

    #[test]
    fn parses_a_full_report() {
        let root = parse(SAMPLE).expect("parse xml");
        let run = parse_scan(&root, None).expect("parse scan");

        assert_eq!(run.scanner, "nmap");
        assert_eq!(run.start, 1_712_000_000);
        assert_eq!(run.scan_info.scan_type, "syn");
        assert_eq!(run.scan_info.num_services, 1000);
        assert_eq!(run.verbose.level, 1);
        assert_eq!(run.hosts.len(), 1);

        let host = &run.hosts[0];
        assert_eq!(host.status.state, "up");
        assert_eq!(host.addresses.len(), 2);
        assert_eq!(host.addresses[1].vendor, "Acme");
        assert_eq!(host.hostnames[0].name, "gw.lan");
        assert_eq!(host.ports.len(), 2);
        assert_eq!(host.ports[0].port_id, 22);
        assert_eq!(host.ports[0].service.cpes, ["cpe:/a:openbsd:openssh:9.6"]);
        assert_eq!(host.ports[0].scripts[0].id, "ssh-hostkey");
        assert_eq!(host.ports[1].state.state, "closed");
        assert_eq!(host.times.srtt, 251);

        assert_eq!(run.run_stats.finished.elapsed, 42.17);
        assert_eq!(run.run_stats.hosts.up, 1);
    }

    #[test]
    fn missing_sections_default_to_empty_values() {
        let root = parse(br#"<nmaprun scanner="nmap"/>"#).expect("parse xml");
        let run = parse_scan(&root, None).expect("parse scan");
        assert_eq!(run.scanner, "nmap");
        assert_eq!(run.hosts.len(), 0);
        assert_eq!(run.scan_info.num_services, 0);
        assert_eq!(run.run_stats.hosts.total, 0);
    }

    #[test]
    fn rejects_non_nmap_roots() {
        let root = parse(b"<report/>").expect("parse xml");
        let err = parse_scan(&root, None).expect_err("wrong root must fail");
        assert!(matches!(err, ParseError::NotNmapRun { found } if found == "report"));
    }

    #[test]
    fn rejects_non_numeric_attributes() {
        let root = parse(br#"<nmaprun start="soon"/>"#).expect("parse xml");
        let err = parse_scan(&root, None).expect_err("bad number must fail");
        assert!(
            matches!(err, ParseError::InvalidNumber { ref attribute, .. } if attribute == "start")
        );
    }

    #[test]
    fn records_the_source_path() {
        let root = parse(br#"<nmaprun/>"#).expect("parse xml");
        let run = parse_scan(&root, Some(std::path::Path::new("scan.xml"))).expect("parse scan");
        assert_eq!(run.source.as_deref(), Some(std::path::Path::new("scan.xml")));
    }
}
