use dish_ingest::{
    JsonLinesSource, MessageHandler, MetricsNode, Outcome, Source, TracingDiagnostics,
};
use dish_normalize::NormalizeOptions;
use domain::Message;
use serde_json::{Value, json};
use std::io::Cursor;
use std::sync::Arc;

fn payload_node(output_property: &str) -> MetricsNode {
    MetricsNode::new(
        NormalizeOptions::default(),
        output_property,
        Arc::new(TracingDiagnostics),
    )
}

async fn run_lines(input: &str) -> Vec<Value> {
    run_bytes(input.as_bytes().to_vec(), Arc::new(payload_node("payload"))).await
}

async fn run_bytes(input: Vec<u8>, handler: Arc<dyn MessageHandler>) -> Vec<Value> {
    let source = JsonLinesSource::new(Cursor::new(input), Vec::new());
    source.run(handler).await.expect("run");
    let output = String::from_utf8(source.into_writer()).expect("utf8");
    output
        .lines()
        .map(|line| serde_json::from_str(line).expect("json line"))
        .collect()
}

#[tokio::test]
async fn forwards_only_accepted_messages() {
    let input = [
        json!({ "payload": { "status": { "eth_speed_mbps": 1000 } }, "_msgid": "a" }).to_string(),
        String::new(),
        json!({ "payload": "not json", "_msgid": "b" }).to_string(),
        "garbage line".to_string(),
        json!({ "payload": { "no_status": true }, "_msgid": "c" }).to_string(),
        json!({ "payload": { "status": { "mobility_class": "STATIONARY" } }, "_msgid": "d" })
            .to_string(),
    ]
    .join("\n");

    let output = run_lines(&input).await;
    assert_eq!(output.len(), 2);
    assert_eq!(output[0]["_msgid"], json!("a"));
    assert_eq!(output[0]["payload"]["eth_speed_mbps"], json!(1000));
    assert_eq!(output[1]["_msgid"], json!("d"));
    assert_eq!(output[1]["payload"]["mobility_class"], json!("STATIONARY"));
}

#[tokio::test]
async fn empty_input_writes_nothing() {
    let source = JsonLinesSource::new(Cursor::new(Vec::new()), Vec::new());
    let node = MetricsNode::new(
        NormalizeOptions::default(),
        "payload",
        Arc::new(TracingDiagnostics),
    );
    source.run(Arc::new(node)).await.expect("run");
    assert!(source.into_writer().is_empty());
}

#[tokio::test]
async fn non_utf8_line_is_skipped() {
    let mut input = json!({ "payload": { "status": {} }, "_msgid": "a" })
        .to_string()
        .into_bytes();
    input.extend_from_slice(b"\n\xff\xfe garbage\n");
    input.extend(
        json!({ "payload": { "status": {} }, "_msgid": "b" })
            .to_string()
            .into_bytes(),
    );

    let output = run_bytes(input, Arc::new(payload_node("payload"))).await;
    let ids: Vec<&Value> = output.iter().map(|message| &message["_msgid"]).collect();
    assert_eq!(ids, vec![&json!("a"), &json!("b")]);
}

/// `_msgid` 为 "bad" 的消息交给输出路径非法的节点处理。
struct SplitHandler {
    good: MetricsNode,
    bad: MetricsNode,
}

impl MessageHandler for SplitHandler {
    fn handle(&self, message: Message) -> Outcome {
        if message.message_id() == Some("bad") {
            self.bad.handle(message)
        } else {
            self.good.handle(message)
        }
    }
}

#[tokio::test]
async fn fatal_outcome_does_not_stop_stream() {
    let handler = SplitHandler {
        good: payload_node("payload"),
        bad: payload_node("a..b"),
    };
    let input = [
        json!({ "payload": { "status": {} }, "_msgid": "bad" }).to_string(),
        json!({ "payload": { "status": {} }, "_msgid": "ok" }).to_string(),
    ]
    .join("\n");

    let output = run_bytes(input.into_bytes(), Arc::new(handler)).await;
    assert_eq!(output.len(), 1);
    assert_eq!(output[0]["_msgid"], json!("ok"));
}
