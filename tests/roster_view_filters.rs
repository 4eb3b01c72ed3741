use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rosterd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rosterd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

/// Roster from the original fixture: two active students, one inactive.
/// Sarah's fields deliberately contain no letter "e".
fn seed_sample(stdin: &mut ChildStdin, reader: &mut BufReader<ChildStdout>) {
    let sample = [
        ("Sarah Johnson", "sarah.j@mail.com", "Biology", "active"),
        ("Michael Chen", "michael.c@mail.com", "Math", "active"),
        ("Emily Rodriguez", "emily.r@mail.com", "Business", "inactive"),
    ];
    for (i, (name, email, course, status)) in sample.iter().enumerate() {
        let resp = request(
            stdin,
            reader,
            &format!("seed{}", i),
            "students.create",
            json!({ "name": name, "email": email, "course": course, "status": status }),
        );
        assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(true));
    }
}

fn visible_names(resp: &serde_json::Value) -> Vec<String> {
    resp["result"]["students"]
        .as_array()
        .expect("students array")
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn empty_search_and_all_status_returns_the_whole_roster_in_order() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    seed_sample(&mut stdin, &mut reader);

    let resp = request(&mut stdin, &mut reader, "v1", "view.get", json!({}));
    assert_eq!(
        visible_names(&resp),
        ["Sarah Johnson", "Michael Chen", "Emily Rodriguez"]
    );
    assert_eq!(resp["result"]["searchTerm"], "");
    assert_eq!(resp["result"]["statusFilter"], "all");

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn search_is_case_insensitive() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    seed_sample(&mut stdin, &mut reader);

    let upper = request(
        &mut stdin,
        &mut reader,
        "s1",
        "view.search",
        json!({ "term": "SARAH" }),
    );
    let lower = request(
        &mut stdin,
        &mut reader,
        "s2",
        "view.search",
        json!({ "term": "sarah" }),
    );
    assert_eq!(visible_names(&upper), ["Sarah Johnson"]);
    assert_eq!(visible_names(&upper), visible_names(&lower));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn search_matches_email_and_course_too() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    seed_sample(&mut stdin, &mut reader);

    let by_email = request(
        &mut stdin,
        &mut reader,
        "s1",
        "view.search",
        json!({ "term": "michael.c@" }),
    );
    assert_eq!(visible_names(&by_email), ["Michael Chen"]);

    let by_course = request(
        &mut stdin,
        &mut reader,
        "s2",
        "view.search",
        json!({ "term": "busine" }),
    );
    assert_eq!(visible_names(&by_course), ["Emily Rodriguez"]);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn search_and_status_filters_combine_as_logical_and() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    seed_sample(&mut stdin, &mut reader);

    // "e" matches Michael and Emily but none of Sarah's fields; Emily is then
    // excluded by the status axis.
    let _ = request(
        &mut stdin,
        &mut reader,
        "s1",
        "view.search",
        json!({ "term": "e" }),
    );
    let resp = request(
        &mut stdin,
        &mut reader,
        "s2",
        "view.statusFilter",
        json!({ "status": "active" }),
    );
    assert_eq!(visible_names(&resp), ["Michael Chen"]);

    // Dropping the search term keeps the status restriction alone.
    let resp = request(
        &mut stdin,
        &mut reader,
        "s3",
        "view.search",
        json!({ "term": "" }),
    );
    assert_eq!(visible_names(&resp), ["Sarah Johnson", "Michael Chen"]);

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn unknown_status_filter_is_rejected() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let resp = request(
        &mut stdin,
        &mut reader,
        "s1",
        "view.statusFilter",
        json!({ "status": "expelled" }),
    );
    assert_eq!(resp.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        resp["error"]["code"].as_str(),
        Some("bad_params"),
        "unknown status must not silently widen or narrow the view"
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn stats_report_total_active_and_a_grade_counts() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();
    seed_sample(&mut stdin, &mut reader);

    let resp = request(&mut stdin, &mut reader, "st1", "stats.get", json!({}));
    assert_eq!(resp["result"]["stats"]["total"], 3);
    assert_eq!(resp["result"]["stats"]["active"], 2);
    // Seeded drafts default to grade A.
    assert_eq!(resp["result"]["stats"]["aGrade"], 3);

    // Stats track the live roster, not the filtered view.
    let _ = request(
        &mut stdin,
        &mut reader,
        "s1",
        "view.search",
        json!({ "term": "sarah" }),
    );
    let resp = request(&mut stdin, &mut reader, "st2", "stats.get", json!({}));
    assert_eq!(resp["result"]["stats"]["total"], 3);

    drop(stdin);
    let _ = child.wait();
}
