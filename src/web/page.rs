use serde_json::json;

use crate::notices;

const INDEX_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>__TITLE__</title>
<style>
body { font-family: Roboto, sans-serif; max-width: 760px; margin: 40px auto; padding: 0 16px; }
.main-title { text-align: center; }
.subheader { color: #758694; text-align: center; }
.input-section { margin: 20px 0; }
.input-section label { display: block; margin-top: 12px; }
.input-section input { width: 100%; padding: 6px; }
.notice { padding: 10px; margin: 12px 0; border-radius: 4px; }
.notice.info { background: #e8f0fe; }
.notice.success { background: #e6f4ea; }
.notice.warning { background: #fef7e0; }
.notice.error { background: #fce8e6; }
#article { white-space: pre-wrap; font-family: inherit; }
</style>
</head>
<body>
<h1 class="main-title">__TITLE__</h1>
<h2 class="subheader">__SUBTITLE__</h2>
<form id="form" class="input-section">
  <label for="topic">Enter the topic:</label>
  <input id="topic" name="topic" placeholder="e.g., Artificial Intelligence">
  <label for="limit">Enter the word limit in words:</label>
  <input id="limit" name="limit" placeholder="e.g., 500">
  <h6>__NOTE__</h6>
  <button id="submit" type="submit">Submit</button>
  <button id="cancel" type="button" hidden>Cancel</button>
</form>
<div id="notice" class="notice" hidden></div>
<pre id="article"></pre>
<script>
const NOTICES = __NOTICES__;
const form = document.getElementById("form");
const submit = document.getElementById("submit");
const cancel = document.getElementById("cancel");
const notice = document.getElementById("notice");
const article = document.getElementById("article");
let current = null;

function show(kind, message) {
  notice.className = "notice " + kind;
  notice.textContent = message;
  notice.hidden = false;
}

function setRunning(running) {
  submit.disabled = running;
  cancel.hidden = !running;
}

async function poll(id) {
  const response = await fetch("/api/articles/" + id);
  if (!response.ok) { throw new Error("status " + response.status); }
  const job = await response.json();
  if (job.status === "running") {
    setTimeout(() => poll(id).catch(fail), 1000);
    return;
  }
  current = null;
  setRunning(false);
  if (job.status === "succeeded") {
    show("success", job.message);
    article.textContent = job.article;
  } else if (job.status === "cancelled") {
    show("warning", job.message);
  } else {
    show("error", job.message);
  }
}

function fail() {
  current = null;
  setRunning(false);
  show("error", NOTICES.error);
}

form.addEventListener("submit", async (event) => {
  event.preventDefault();
  article.textContent = "";
  const topic = document.getElementById("topic").value;
  const limit = document.getElementById("limit").value;
  if (!topic.trim()) { show("warning", NOTICES.emptyTopic); return; }
  try {
    const response = await fetch("/api/articles", {
      method: "POST",
      headers: { "Content-Type": "application/json" },
      body: JSON.stringify({ topic, limit }),
    });
    const body = await response.json();
    if (body.status === "warning") { show("warning", body.message); return; }
    if (!response.ok) { throw new Error("status " + response.status); }
    current = body.id;
    setRunning(true);
    show("info", NOTICES.inProgress);
    await poll(current);
  } catch (e) {
    fail();
  }
});

cancel.addEventListener("click", async () => {
  if (current) { await fetch("/api/articles/" + current, { method: "DELETE" }); }
});
</script>
</body>
</html>
"#;

/// Render the single page with the fixed notices filled in
pub fn render_index() -> String {
    let notices = json!({
        "emptyTopic": notices::EMPTY_TOPIC_WARNING,
        "inProgress": notices::IN_PROGRESS,
        "error": notices::GENERIC_ERROR,
    });

    INDEX_TEMPLATE
        .replace("__TITLE__", notices::TITLE)
        .replace("__SUBTITLE__", notices::SUBTITLE)
        .replace("__NOTE__", notices::WORD_LIMIT_NOTE)
        .replace("__NOTICES__", &notices.to_string())
}
