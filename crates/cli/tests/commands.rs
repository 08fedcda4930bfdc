//! End-to-end runs of the `rocket` binary against a temporary data directory.
//!
//! None of these reach the network: the identity service is only contacted
//! when a token is stored, and no command here installs the browser.

use std::path::Path;
use std::process::{Command, Output};

use serde_json::Value;
use tempfile::TempDir;

fn rocket(data_dir: &Path, args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_rocket"))
		.args(args)
		.arg("--data-dir")
		.arg(data_dir)
		.args(["--api-url", "http://127.0.0.1:9/", "--no-input"])
		.env_remove("ROCKET_DATA_DIR")
		.env_remove("ROCKET_API_URL")
		.env_remove("ROCKET_BROWSER_VERSION")
		.env_remove("RUST_LOG")
		.output()
		.expect("failed to run rocket")
}

fn json_stdout(output: &Output) -> Value {
	serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn paths_reports_layout_without_creating_it() {
	let tmp = TempDir::new().unwrap();
	let data_dir = tmp.path().join("app");

	let output = rocket(&data_dir, &["paths", "--system", "Linux", "-f", "json"]);
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

	let json = json_stdout(&output);
	assert_eq!(json["ok"], true);
	assert_eq!(json["command"], "paths");
	assert_eq!(json["data"]["platform"], "linux");
	let browser = json["data"]["browserExecutable"].as_str().unwrap();
	assert!(browser.ends_with("selenium-browser/chrome"), "{browser}");
	assert!(!data_dir.exists());
}

#[test]
fn paths_text_output() {
	let tmp = TempDir::new().unwrap();

	let output = rocket(tmp.path(), &["paths", "--system", "Darwin"]);
	assert!(output.status.success());

	let stdout = String::from_utf8(output.stdout).unwrap();
	assert!(stdout.starts_with("Paths for Darwin"));
	assert!(stdout.contains("Google Chrome for Testing.app"));
	assert!(stdout.contains("config.env"));
}

#[test]
fn unsupported_platform_exits_with_error() {
	let tmp = TempDir::new().unwrap();
	let data_dir = tmp.path().join("app");

	let output = rocket(&data_dir, &["init", "--system", "Plan9", "-f", "json"]);
	assert_eq!(output.status.code(), Some(1));

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Error [UNSUPPORTED_PLATFORM]"), "{stderr}");

	let json = json_stdout(&output);
	assert_eq!(json["ok"], false);
	assert_eq!(json["command"], "init");
	assert_eq!(json["error"]["code"], "UNSUPPORTED_PLATFORM");
	assert!(!data_dir.exists());
}

#[test]
fn init_without_input_aborts_at_login() {
	let tmp = TempDir::new().unwrap();

	let output = rocket(tmp.path(), &["--system", "Linux"]);
	assert_eq!(output.status.code(), Some(1));

	let stderr = String::from_utf8_lossy(&output.stderr);
	assert!(stderr.contains("Error [AUTH_ABORTED]"), "{stderr}");
	assert!(stderr.contains("waiting for login"), "{stderr}");
	assert!(tmp.path().join("selenium-browser").is_dir());
	assert!(tmp.path().join("config.env").is_file());
}

#[test]
fn logout_removes_stored_token() {
	let tmp = TempDir::new().unwrap();
	let config = tmp.path().join("config.env");
	std::fs::write(&config, "# kept\naccess_token=TOKEN123\n").unwrap();

	let output = rocket(tmp.path(), &["logout", "--system", "Linux", "-f", "json"]);
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	assert_eq!(json_stdout(&output)["data"]["removed"], true);
	assert_eq!(std::fs::read_to_string(&config).unwrap(), "# kept\n");

	let output = rocket(tmp.path(), &["logout", "--system", "Linux", "-f", "json"]);
	assert!(output.status.success());
	assert_eq!(json_stdout(&output)["data"]["removed"], false);
}

#[test]
fn status_without_token_is_offline() {
	let tmp = TempDir::new().unwrap();

	let output = rocket(tmp.path(), &["status", "--system", "Windows", "-f", "json"]);
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

	let data = &json_stdout(&output)["data"];
	assert_eq!(data["hasToken"], false);
	assert_eq!(data["authenticated"], false);
	assert_eq!(data["browserInstalled"], false);
	assert!(data["paths"]["driverExecutable"].as_str().unwrap().ends_with("chromedriver.exe"));
}
