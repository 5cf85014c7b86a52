//! Wish wall HTML page.

use crate::{
  app::AppState,
  store::{DEFAULT_RECENT_LIMIT, MAX_WISH_LENGTH},
  util::html_escape,
};
use axum::response::Html;
use tracing::error;

pub async fn ui_index(axum::extract::State(state): axum::extract::State<AppState>) -> Html<String> {
  // The page still renders without a list; the script retries via the API.
  let recent = match state.store.list_recent(DEFAULT_RECENT_LIMIT).await {
    Ok(rows) => rows,
    Err(e) => {
      error!("ui_index error: {e}");
      Vec::new()
    }
  };

  let mut items = String::new();
  for w in recent.iter() {
    items.push_str(&format!(
      "<li data-id=\"{id}\">{text} <time>{when}</time></li>",
      id = w.id,
      text = html_escape(&w.text),
      when = w.created_at.format("%Y-%m-%d %H:%M UTC"),
    ));
  }
  let template = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>wish wall</title>
  <style>
    body { font-family: system-ui, sans-serif; margin: 2rem; background: #0b1026; color: #f4f1de; }
    h1 { margin: 0 0 1rem 0; }
    form { display: flex; gap: .5rem; margin-bottom: 1.5rem; }
    input { flex: 1; padding: .5rem; }
    ul { list-style: none; padding: 0; }
    li { padding: .35rem 0; border-bottom: 1px solid #2a3160; }
    time { color: #8f96c2; font-size: .8rem; margin-left: .5rem; }
    #error { color: #ff8a80; min-height: 1.2rem; }
  </style>
</head>
<body>
  <h1>Make a wish</h1>
  <form id="wish-form">
    <input id="wish-input" maxlength="{MAX}" placeholder="Up to {MAX} characters" autocomplete="off" />
    <button type="submit">Send</button>
  </form>
  <div id="error"></div>
  <h2>Recent</h2>
  <ul id="recent">{ITEMS}</ul>
  <h2>Drifting by</h2>
  <ul id="random"></ul>
  <button id="more">More</button>
  <script>
    const seen = new Set();
    const item = (w) => {
      seen.add(w.id);
      const li = document.createElement('li');
      li.dataset.id = w.id;
      li.textContent = w.text;
      return li;
    };
    async function loadSeed() {
      const res = await fetch('/api/wishes/seed');
      const data = await res.json();
      const recent = document.getElementById('recent');
      recent.replaceChildren(...data.recent.map(item));
      document.getElementById('random').replaceChildren(...data.random.map(item));
    }
    async function loadMore() {
      const res = await fetch('/api/wishes/random?limit=10&exclude_ids=' + [...seen].join(','));
      const data = await res.json();
      const list = document.getElementById('random');
      data.forEach((w) => list.appendChild(item(w)));
    }
    document.getElementById('wish-form').addEventListener('submit', async (ev) => {
      ev.preventDefault();
      const input = document.getElementById('wish-input');
      const res = await fetch('/api/wishes', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ text: input.value }),
      });
      const body = await res.json();
      const err = document.getElementById('error');
      if (!res.ok) { err.textContent = body.error; return; }
      err.textContent = '';
      input.value = '';
      document.getElementById('recent').prepend(item(body));
    });
    document.getElementById('more').addEventListener('click', loadMore);
    loadSeed();
  </script>
</body>
</html>"#;
  let page = template
    .replace("{MAX}", &MAX_WISH_LENGTH.to_string())
    .replace("{ITEMS}", &items);
  Html(page)
}
