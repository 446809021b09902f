use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    let mut c = Command::new(assert_cmd::cargo_bin!("qpx"));
    c.env_remove("QPX_API_KEY").env_remove("QPX_ENDPOINT");
    c
}

fn fixture_path() -> String {
    format!(
        "{}/tests/fixtures/search_response.json",
        env!("CARGO_MANIFEST_DIR")
    )
}

#[test]
fn top_level_help() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Search QPX Express flight fares from the terminal",
        ))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("mcp"))
        .stdout(predicate::str::contains("Examples:"));
}

#[test]
fn top_level_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(format!(
            "qpx {}",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn search_help_lists_options() {
    cmd()
        .args(["search", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-f, --from <IATA>"))
        .stdout(predicate::str::contains("-t, --to <IATA>"))
        .stdout(predicate::str::contains("-d, --date <YYYY-MM-DD>"))
        .stdout(predicate::str::contains("--leg"))
        .stdout(predicate::str::contains("--return-date"))
        .stdout(predicate::str::contains("--cabin <CLASS>"))
        .stdout(predicate::str::contains("--max-stops <N>"))
        .stdout(predicate::str::contains("--max-connection <MINUTES>"))
        .stdout(predicate::str::contains("--carriers <AA,DL,...>"))
        .stdout(predicate::str::contains("--max-price <PRICE>"))
        .stdout(predicate::str::contains("--sale-country <CC>"))
        .stdout(predicate::str::contains("--refundable"))
        .stdout(predicate::str::contains("--api-key <KEY>"))
        .stdout(predicate::str::contains("--endpoint <URL>"))
        .stdout(predicate::str::contains("--timeout <SECS>"))
        .stdout(predicate::str::contains("--request"))
        .stdout(predicate::str::contains("Round-trip:"))
        .stdout(predicate::str::contains("Multi-city:"));
}

#[test]
fn request_flag_prints_body_without_key() {
    cmd()
        .args([
            "search", "-f", "jfk", "-t", "lax", "-d", "2026-04-01", "--max-stops", "0",
            "--cabin", "business", "--request",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"request\""))
        .stdout(predicate::str::contains("\"origin\": \"JFK\""))
        .stdout(predicate::str::contains("\"maxStops\": 0"))
        .stdout(predicate::str::contains("\"preferredCabin\": \"BUSINESS\""))
        .stdout(predicate::str::contains("\"adultCount\": 1"));
}

#[test]
fn return_date_adds_reverse_slice() {
    cmd()
        .args([
            "search", "-f", "SFO", "-t", "NRT", "-d", "2026-05-01", "--return-date",
            "2026-05-15", "--request",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"origin\": \"NRT\""))
        .stdout(predicate::str::contains("\"date\": \"2026-05-15\""));
}

#[test]
fn missing_api_key_exits_2() {
    cmd()
        .args(["search", "-f", "JFK", "-t", "LAX", "-d", "2026-04-01"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("QPX_API_KEY"));
}

#[test]
fn missing_api_key_json_error() {
    cmd()
        .args(["search", "-f", "JFK", "-t", "LAX", "-d", "2026-04-01", "--json"])
        .assert()
        .code(2)
        .stdout(predicate::str::contains("\"kind\":\"missing_api_key\""));
}

#[test]
fn missing_from_is_validation_error() {
    cmd()
        .args(["search", "-t", "LAX", "-d", "2026-04-01", "--request"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--from is required"));
}

#[test]
fn bad_leg_is_validation_error() {
    cmd()
        .args(["search", "--leg", "2026-03-01 LAX", "--request"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--leg must be"));
}

#[test]
fn bad_cabin_is_validation_error() {
    cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "-d", "2026-04-01", "--cabin", "cargo",
            "--request",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid cabin"));
}

#[test]
fn unreachable_endpoint_is_network_error() {
    cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "-d", "2026-04-01", "--api-key", "k",
            "--endpoint", "http://127.0.0.1:1/v1/trips/search", "--timeout", "5",
        ])
        .assert()
        .code(3);
}

#[test]
fn malformed_endpoint_is_reported_as_endpoint_error() {
    cmd()
        .args([
            "search", "-f", "JFK", "-t", "LAX", "-d", "2026-04-01", "--api-key", "k",
            "--endpoint", "not a url",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--endpoint"))
        .stderr(predicate::str::contains("proxy").not());
}

#[test]
fn decode_renders_fixture_table() {
    cmd()
        .args(["decode", &fixture_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Request Vd3kQ0wlhXyJ6Hs1x0KXGN"))
        .stdout(predicate::str::contains("2 passenger(s)"))
        .stdout(predicate::str::contains("UA1141"))
        .stdout(predicate::str::contains("$612.20"));
}

#[test]
fn decode_json_output() {
    cmd()
        .args(["decode", &fixture_path(), "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"requestId\":\"Vd3kQ0wlhXyJ6Hs1x0KXGN\""))
        .stdout(predicate::str::contains("\"code\":\"EWR\""));
}

#[test]
fn decode_garbage_exits_6() {
    let dir = std::env::temp_dir().join(format!("qpx-cli-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("garbage.json");
    std::fs::write(&path, "this is not json").unwrap();

    cmd()
        .args(["decode", path.to_str().unwrap()])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("failed to decode"));
}

#[test]
fn decode_missing_file_is_validation_error() {
    cmd()
        .args(["decode", "/definitely/not/here.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot read"));
}
