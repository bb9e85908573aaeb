use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `lgsh` with an isolated config file and no ambient settings
fn lgsh(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("lgsh").unwrap();
    cmd.env("LG_CONFIG", dir.path().join("config.toml"))
        .env_remove("LG_ROUTER")
        .env_remove("LG_DOH_URL")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

#[test]
fn help_flag_describes_the_tool() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Looking glass shell"))
        .stdout(predicate::str::contains("--router"));
}

#[test]
fn help_line_prints_grammar_without_a_router() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .arg("?")
        .assert()
        .success()
        .stdout(predicate::str::contains("show bgp <target>"));
}

#[test]
fn invalid_line_fails_without_network() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .args(["--router", "tyo1", "ping", "192.0.2.0/24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tyo1 > ping 192.0.2.0/24"))
        .stderr(predicate::str::contains("not valid"));
}

#[test]
fn invalid_line_as_json() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .args(["-r", "tyo1", "-o", "json", "nslookup", "AS64500"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(r#""isError":true"#))
        .stdout(predicate::str::contains(r#""result":"not valid""#));
}

#[test]
fn router_comes_from_environment() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .env("LG_ROUTER", "osa2")
        .args(["whois", "not_a_host!"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("osa2 > "));
}

#[test]
fn unknown_default_command_is_rejected() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .args(["--command", "dig", "192.0.2.1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not valid"));
}

#[test]
fn config_set_then_show() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .args(["config", "set", "router", "tyo1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("router set to tyo1"));

    lgsh(&dir)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tyo1"));

    // the saved router is used for command lines
    lgsh(&dir)
        .args(["traceroute", "192.0.2.0/24"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("tyo1 > traceroute 192.0.2.0/24"));
}

#[test]
fn config_path_honors_override() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn routers_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        "[routers.tyo1]\nname = \"Tokyo 1\"\ndescription = \"Tokyo, JP\"\n",
    )
    .unwrap();

    lgsh(&dir)
        .arg("routers")
        .assert()
        .success()
        .stdout(predicate::str::contains("tyo1"))
        .stdout(predicate::str::contains("Tokyo 1"));
}

#[test]
fn shell_reads_lines_from_stdin() {
    let dir = TempDir::new().unwrap();
    lgsh(&dir)
        .args(["--router", "tyo1"])
        .write_stdin("help\nping 192.0.2.0/24\nclear\nexit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Commands:"))
        .stderr(predicate::str::contains("not valid"));
}
