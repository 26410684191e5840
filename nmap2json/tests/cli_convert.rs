use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

const SAMPLE_SCAN: &str = r#"<nmaprun scanner="nmap" args="nmap -sV 10.0.0.1" start="1712000000" version="7.94" xmloutputversion="1.05">
<scaninfo type="syn" protocol="tcp" numservices="1000" services="1-1000"/>
<host starttime="1712000001" endtime="1712000042">
  <status state="up" reason="arp-response" reason_ttl="0"/>
  <address addr="10.0.0.1" addrtype="ipv4"/>
  <ports>
    <port protocol="tcp" portid="22">
      <state state="open" reason="syn-ack" reason_ttl="64"/>
      <service name="ssh" product="OpenSSH" conf="10"><cpe>cpe:/a:openbsd:openssh:9.6</cpe></service>
    </port>
  </ports>
</host>
<runstats>
  <finished time="1712000042" timestr="Mon Apr  1 2024" elapsed="42.17" summary="1 host up" exit="success"/>
  <hosts up="1" down="0" total="1"/>
</runstats>
</nmaprun>"#;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("nmap2json"))
}

fn write_sample(dir: &Path, name: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, SAMPLE_SCAN).expect("write sample scan");
    path
}

#[test]
fn convert_writes_json_next_to_outdir() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path(), "scan.xml");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--outdir")
        .arg(dir.path())
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("scan.json")).expect("read output");
    let value: serde_json::Value = serde_json::from_str(&output).expect("valid json");
    assert_eq!(value["scanner"], "nmap");
    assert_eq!(value["start"], 1_712_000_000_i64);
    assert_eq!(value["hosts"][0]["addresses"][0]["addr"], "10.0.0.1");
    assert_eq!(value["hosts"][0]["ports"][0]["portid"], 22);
    assert_eq!(value["runstats"]["hosts"]["up"], 1);
    assert!(value.get("source").is_none(), "source must not serialize");
}

#[test]
fn convert_pretty_prints_when_requested() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path(), "scan.xml");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--outdir")
        .arg(dir.path())
        .arg("--pretty")
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("scan.json")).expect("read output");
    assert!(output.contains("\n  \"scanner\""), "{output}");
}

#[test]
fn convert_continues_past_a_bad_input_and_reports_failure() {
    let dir = tempdir().expect("tempdir");
    let bad = dir.path().join("bad.xml");
    fs::write(&bad, "<wrong-root/>").expect("write bad input");
    let good = write_sample(dir.path(), "good.xml");

    cmd()
        .arg("convert")
        .arg(&bad)
        .arg(&good)
        .arg("--outdir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("expected <nmaprun>"))
        .stderr(predicate::str::contains("1 of 2 inputs failed"));

    assert!(
        dir.path().join("good.json").exists(),
        "good input must still convert"
    );
    assert!(
        !dir.path().join("bad.json").exists(),
        "failed input must not produce output"
    );
}

#[test]
fn convert_refuses_to_overwrite_its_own_input() {
    let dir = tempdir().expect("tempdir");
    // A .json input converting into the same directory would write onto itself.
    let input = write_sample(dir.path(), "scan.json");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--outdir")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to overwrite"));

    let untouched = fs::read_to_string(&input).expect("read input back");
    assert_eq!(untouched, SAMPLE_SCAN, "input must be untouched");
}

#[test]
fn convert_can_emit_the_mapping_alongside_outputs() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path(), "scan.xml");
    let mapping_path = dir.path().join("mapping.json");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--outdir")
        .arg(dir.path())
        .arg("--mapping-out")
        .arg(&mapping_path)
        .assert()
        .success();

    let mapping = fs::read_to_string(&mapping_path).expect("read mapping");
    let value: serde_json::Value = serde_json::from_str(&mapping).expect("valid json");
    assert!(value["nmaprun"]["properties"]["hosts"].is_object());
}

#[test]
fn convert_creates_the_output_directory() {
    let dir = tempdir().expect("tempdir");
    let input = write_sample(dir.path(), "scan.xml");
    let outdir = dir.path().join("out").join("json");

    cmd()
        .arg("convert")
        .arg(&input)
        .arg("--outdir")
        .arg(&outdir)
        .assert()
        .success();

    assert!(outdir.join("scan.json").exists());
}
