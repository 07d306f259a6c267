//! A scripted MCP session over in-memory pipes
use chrono::NaiveDate;
use dailypod::*;
use serde_json::{json, Value};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn run_session(
    server: DailyPodServer,
    requests: &[Value],
    raw: &[&str],
) -> (DailyPodServer, Vec<Value>) {
    let mut input = String::new();
    for request in requests {
        input.push_str(&request.to_string());
        input.push('\n');
    }
    for line in raw {
        input.push_str(line);
        input.push('\n');
    }

    let mut output: Vec<u8> = Vec::new();
    let mut mcp = McpServer::new(server);
    mcp.serve(input.as_bytes(), &mut output).await.unwrap();

    let responses = String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    (mcp.into_inner(), responses)
}

fn tool_call(id: u64, name: &str, arguments: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "tools/call",
        "params": { "name": name, "arguments": arguments }
    })
}

fn text_of(response: &Value) -> &str {
    response["result"]["content"][0]["text"].as_str().unwrap()
}

#[tokio::test]
async fn test_scripted_session() {
    let today = date(2024, 3, 15);
    let storage = SqliteStorage::open_in_memory().unwrap();
    let habit = Habit::new(
        "Drink water".to_string(),
        None,
        DEFAULT_COLOR.to_string(),
        DEFAULT_ICON.to_string(),
        TargetFrequency::Daily,
        1,
    )
    .unwrap();
    storage.create_habit(&habit).unwrap();
    let server = DailyPodServer::with_storage(storage).with_today(today);
    let habit_id = habit.id.to_string();

    let requests = vec![
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "initialize",
            "params": {
                "protocolVersion": "2024-11-05",
                "clientInfo": { "name": "test-client", "version": "0.1" }
            }
        }),
        json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        json!({ "jsonrpc": "2.0", "id": 2, "method": "tools/list" }),
        tool_call(3, "habit_toggle", json!({ "habit_id": habit_id, "date": "2024-03-14" })),
        tool_call(4, "habit_toggle", json!({ "habit_id": habit_id })),
        tool_call(5, "habit_stats", json!({ "habit_id": habit_id })),
        json!({ "jsonrpc": "2.0", "id": 6, "method": "habits/explode" }),
        tool_call(7, "habit_toggle", json!({ "habit_id": habit_id, "date": "15/03/2024" })),
    ];
    let (server, responses) = run_session(server, &requests, &["{not json"]).await;

    // The notification gets no response line
    assert_eq!(responses.len(), 8);

    let init = &responses[0];
    assert_eq!(init["id"], json!(1));
    assert_eq!(init["result"]["protocolVersion"], json!("2024-11-05"));
    assert!(init["result"]["capabilities"]["tools"].is_object());

    let tools = responses[1]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 8);
    assert!(tools.iter().any(|tool| tool["name"] == json!("habit_toggle")));
    assert!(tools.iter().all(|tool| tool["inputSchema"]["type"] == json!("object")));

    assert_eq!(responses[2]["result"]["isError"], json!(false));
    assert!(text_of(&responses[2]).contains("2024-03-14"));
    assert_eq!(responses[3]["result"]["isError"], json!(false));
    assert!(text_of(&responses[3]).contains("Drink water"));

    let stats = text_of(&responses[4]);
    assert!(stats.contains("Current streak: 2 days"));
    assert!(stats.contains("Best: 2 days"));

    assert_eq!(responses[5]["id"], json!(6));
    assert_eq!(responses[5]["error"]["code"], json!(-32601));

    assert_eq!(responses[6]["result"]["isError"], json!(true));

    assert_eq!(responses[7]["id"], Value::Null);
    assert_eq!(responses[7]["error"]["code"], json!(-32700));

    // The malformed toggle did not touch storage
    let history = server.storage().get_completion_history(&habit.id).unwrap();
    assert_eq!(history.len(), 2);
    assert!(history.iter().all(|record| record.completed));
}

#[tokio::test]
async fn test_habit_lifecycle_through_tools() {
    let today = date(2024, 3, 15);
    let storage = SqliteStorage::open_in_memory().unwrap();
    let server = DailyPodServer::with_storage(storage).with_today(today);

    let requests = vec![tool_call(1, "habit_create", json!({ "name": "Stretch" }))];
    let (server, responses) = run_session(server, &requests, &[]).await;
    assert_eq!(responses[0]["result"]["isError"], json!(false));

    let habits = server.storage().list_habits().unwrap();
    assert_eq!(habits.len(), 1);
    assert_eq!(habits[0].color, DEFAULT_COLOR);
    let habit_id = habits[0].id.to_string();

    let requests = vec![
        tool_call(2, "habit_toggle", json!({ "habit_id": habit_id })),
        tool_call(3, "habit_overview", json!({})),
        tool_call(4, "habit_delete", json!({ "habit_id": habit_id })),
        tool_call(5, "habit_list", json!({})),
        tool_call(6, "habit_nonexistent", json!({})),
    ];
    let (server, responses) = run_session(server, &requests, &[]).await;

    assert_eq!(responses.len(), 5);
    assert!(responses.iter().take(4).all(|r| r["result"]["isError"] == json!(false)));
    assert!(text_of(&responses[4]).contains("Unknown tool"));
    assert_eq!(responses[4]["result"]["isError"], json!(true));

    assert!(server.storage().list_habits().unwrap().is_empty());
    assert!(server.storage().get_records_for_date(today).unwrap().is_empty());
}
