use onecast_testkit::fixture_json;
use serde_json::json;

use super::one_catalog;
use crate::cast::{Caster, TypeKind, Value};

#[test]
fn one_catalog_builds_with_every_custom_reference_resolved() {
	let catalog = one_catalog().expect("built-in catalog builds");
	assert!(catalog.len() >= 15);

	for (_, schema) in catalog.iter() {
		assert!(schema.name.starts_with("One.Types."), "{} is namespaced", schema.name);
		for property in &schema.properties {
			assert_ne!(
				property.descriptor.kind,
				TypeKind::Union,
				"{}.{} should not be ambiguous",
				schema.name,
				property.name
			);
			if property.descriptor.custom_type_name.is_some() {
				assert_eq!(property.descriptor.kind, TypeKind::Custom, "{}.{} resolves", schema.name, property.name);
			}
		}
	}
}

#[test]
fn chat_with_messages_inherits_chat() {
	let catalog = one_catalog().expect("built-in catalog builds");
	let schema = catalog.schema_by_name("ChatWithMessages").expect("schema exists");
	assert_eq!(schema.parent, catalog.resolve("Chat"));
	assert!(schema.property("label").is_some());
	assert!(schema.property("messages").is_some_and(|item| item.descriptor.is_collection));
}

#[test]
fn agents_list_fixture_casts_nested_steps() {
	let catalog = one_catalog().expect("built-in catalog builds");
	let caster = Caster::new(&catalog);
	let response = fixture_json("agents_list.json");

	let page = caster.cast(&response, "WithCount");
	assert_eq!(page.get("count"), Some(&Value::Raw(json!(2))));

	let agents = caster.cast_each(&response["data"], "Agent");
	assert_eq!(agents.len(), 2);

	let first = &agents[0];
	assert_eq!(first.get("name").and_then(Value::as_str), Some("Research Assistant"));
	let steps = first.get("steps").and_then(Value::as_list).expect("steps list");
	assert_eq!(steps.len(), 2);

	let search = steps[0].as_instance().expect("step instance");
	let gpt = search.get("gpt").and_then(Value::as_instance).expect("expanded gpt");
	let llm = gpt.get("llm").and_then(Value::as_instance).expect("expanded llm");
	assert_eq!(llm.get("model").and_then(Value::as_str), Some("gpt-4o"));

	let datasources = search.get("datasources").and_then(Value::as_list).expect("datasources list");
	assert_eq!(datasources[0], Value::Raw(json!("ds-1")));
	assert_eq!(
		datasources[1].as_instance().and_then(|item| item.get("status")).and_then(Value::as_str),
		Some("ready")
	);

	let summarize = steps[1].as_instance().expect("step instance");
	assert_eq!(summarize.get("gpt"), Some(&Value::Raw(json!("gpt-2"))));
	assert!(summarize.get("prompt").is_some_and(Value::is_unset));

	let tags = first.get("tags").and_then(Value::as_list).expect("tags list");
	assert_eq!(tags[0], Value::Raw(json!("research")));
	assert_eq!(tags[1].as_instance().map(|item| &*item.schema), Some("One.Types.Tag"));

	let empty = &agents[1];
	assert_eq!(empty.get("steps").and_then(Value::as_list).map(<[Value]>::len), Some(0));
	assert!(empty.get("unexpected").is_none());
}

#[test]
fn chat_fixture_casts_messages_and_keeps_references_opaque() {
	let catalog = one_catalog().expect("built-in catalog builds");
	let caster = Caster::new(&catalog);
	let response = fixture_json("chat_with_messages.json");

	let chat = caster.cast(&response, "ChatWithMessages");
	assert_eq!(chat.get("agent"), Some(&Value::Raw(json!("ag-1"))));
	assert_eq!(chat.get("outputFormat"), Some(&Value::Raw(json!("MARKDOWN"))));

	let messages = chat.get("messages").and_then(Value::as_list).expect("messages list");
	let assistant = messages
		.iter()
		.filter_map(Value::as_instance)
		.find(|item| item.get("role").and_then(Value::as_str) == Some("assistant"))
		.expect("assistant message present");

	assert_eq!(assistant.get("chat"), Some(&Value::Raw(json!("chat-1"))));
	assert_eq!(
		assistant.get("references"),
		Some(&Value::Raw(json!([{ "source": "q3.xlsx", "page": 1 }])))
	);
	let pad = assistant.get("scratchPad").and_then(Value::as_list).expect("scratch pad list");
	assert_eq!(pad[0].as_instance().map(|item| &*item.schema), Some("One.Types.MessageScratchPad"));

	let again = caster.cast(&chat.to_json(), "One.Types.ChatWithMessages");
	assert_eq!(again, chat);
}
