//! HTML rendering for the three pages the server produces.

use duel_core::{item::Pair, snapshot::RankingSnapshot};

/// Escape text for interpolation into HTML element content or a quoted
/// attribute.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

fn layout(title: &str, body: &str) -> String {
  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{ font-family: Georgia, serif; max-width: 48rem; margin: 2rem auto; padding: 0 1rem; }}
        .pair {{ display: flex; gap: 1rem; }}
        .choice {{ flex: 1; padding: 1.5rem; border: 1px solid #ccc; border-radius: 6px;
                   color: inherit; text-decoration: none; }}
        .choice:hover {{ background: #f4f4f4; }}
    </style>
</head>
<body>
{body}
</body>
</html>
"#,
    title = escape(title),
  )
}

/// The comparison page: each item links to a vote in its favour.
pub fn index(pair: &Pair) -> String {
  let (a, b) = (&pair.first, &pair.second);
  let body = format!(
    r#"<h1>Which quote do you prefer?</h1>
<div class="pair">
    <a class="choice" href="/vote/{a_id}/{b_id}">{a_text}</a>
    <a class="choice" href="/vote/{b_id}/{a_id}">{b_text}</a>
</div>
<p><a href="/sessions">Saved sessions</a></p>"#,
    a_id = a.id,
    b_id = b.id,
    a_text = escape(&a.text),
    b_text = escape(&b.text),
  );
  layout("Which quote do you prefer?", &body)
}

pub fn sessions(snapshots: &[RankingSnapshot]) -> String {
  let body = if snapshots.is_empty() {
    "<h1>Saved sessions</h1>\n<p>No sessions saved yet.</p>".to_string()
  } else {
    let rows: String = snapshots
      .iter()
      .map(|s| {
        format!(
          "    <li><a href=\"/session/{id}\">Session {id}</a> <time datetime=\"{iso}\">{shown}</time></li>\n",
          id = s.id,
          iso = s.created_at.to_rfc3339(),
          shown = s.created_at.format("%Y-%m-%d %H:%M UTC"),
        )
      })
      .collect();
    format!("<h1>Saved sessions</h1>\n<ul>\n{rows}</ul>")
  };
  layout("Saved sessions", &format!("{body}\n<p><a href=\"/\">Back to voting</a></p>"))
}

/// The raw snapshot text, preformatted.
pub fn session(snapshot: &RankingSnapshot) -> String {
  format!("<pre>{}</pre>", escape(&snapshot.content))
}
