#![allow(missing_docs)]

use std::process::{Command, Output};

use onecast_testkit::fixture_path;
use serde_json::Value;

#[test]
fn cast_each_prints_agent_array() {
	let fixture = fixture_path("agents_list.json").display().to_string();
	let page = run_json(&["cast", &fixture, "--schema", "WithCount"]);
	assert_eq!(page["count"], 2);

	let output = run(&["cast", "-", "--schema", "Agent", "--each", "--compact"], Some(&page["data"].to_string()));
	assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
	let agents: Value = serde_json::from_slice(&output.stdout).expect("stdout should be valid json");

	assert_eq!(agents.as_array().map(Vec::len), Some(2));
	assert_eq!(agents[0]["steps"][0]["gpt"]["llm"]["model"], "gpt-4o");
	assert!(agents[1].get("unexpected").is_none());
}

#[test]
fn cast_with_custom_catalog_applies_defaults_and_nesting() {
	let catalog = fixture_path("acme_catalog.json").display().to_string();
	let order = fixture_path("acme_order.json").display().to_string();
	let json = run_json(&["cast", &order, "--schema", "IOrder", "--catalog", &catalog]);

	assert_eq!(json["id"], "o-77");
	assert_eq!(json["status"], "open");
	assert_eq!(json["lines"].as_array().map(Vec::len), Some(2));
	assert_eq!(json["lines"][1]["price"], 20);
	assert_eq!(json["customer"]["email"], "ada@example.com");
	assert!(json.get("notes").is_none());
	assert!(json.get("discount").is_none());
}

#[test]
fn cast_rejects_unknown_schema() {
	let fixture = fixture_path("agents_list.json").display().to_string();
	let output = run(&["cast", &fixture, "--schema", "Nope"], None);

	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).contains("schema not found: Nope"));
}

#[test]
fn schema_json_describes_properties() {
	let json = run_json(&["schema", "--schema", "Message", "--json"]);

	assert_eq!(json["name"], "One.Types.Message");
	let files = json["properties"]
		.as_array()
		.and_then(|items| items.iter().find(|item| item["name"] == "files"))
		.expect("files property listed");
	assert_eq!(files["kind"], "custom");
	assert_eq!(files["target"], "One.Types.MessageFileContent");
}

#[test]
fn resolve_prints_qualified_name() {
	let output = run(&["resolve", "Agent"], None);
	assert!(output.status.success());
	assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "One.Types.Agent");

	let missing = run(&["resolve", "One.Agent"], None);
	assert!(!missing.status.success());
}

fn run_json(args: &[&str]) -> Value {
	let output = run(args, None);
	assert!(
		output.status.success(),
		"onecast command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

fn run(args: &[&str], stdin: Option<&str>) -> Output {
	use std::io::Write;
	use std::process::Stdio;

	let mut child = Command::new(env!("CARGO_BIN_EXE_onecast"))
		.args(args)
		.stdin(Stdio::piped())
		.stdout(Stdio::piped())
		.stderr(Stdio::piped())
		.spawn()
		.expect("command executes");
	{
		let mut pipe = child.stdin.take().expect("stdin is piped");
		if let Some(text) = stdin {
			pipe.write_all(text.as_bytes()).expect("stdin accepts input");
		}
	}
	child.wait_with_output().expect("command completes")
}
