//! Embedded HTML/CSS/JS frontend for the chat demo.
//!
//! The entire page is compiled into the binary as a string constant.
//! No external assets, no build tools, no CDN dependencies.

/// The complete single-page chat UI.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>NLI — Natural Language Insights</title>
<style>
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

.app {
  max-width: 860px;
  margin: 0 auto;
  padding: 24px;
  display: flex;
  flex-direction: column;
  height: 100vh;
}

header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h1 { font-size: 20px; font-weight: 600; }
header h1 .logo { color: var(--accent); font-family: var(--mono); }
header .subtitle { color: var(--text-muted); font-size: 13px; }

.role-picker { display: flex; align-items: center; gap: 8px; font-size: 13px; }
.role-picker select {
  background: var(--surface);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 6px 10px;
}

#chat {
  flex: 1;
  overflow-y: auto;
  padding: 16px 0;
  display: flex;
  flex-direction: column;
  gap: 12px;
}

.msg { display: flex; gap: 10px; max-width: 92%; }
.msg .avatar {
  width: 32px; height: 32px;
  border-radius: 50%;
  background: var(--surface);
  border: 1px solid var(--border);
  display: flex; align-items: center; justify-content: center;
  font-size: 15px;
  flex-shrink: 0;
}
.msg .body {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 10px 14px;
  min-width: 0;
}
.msg.user { align-self: flex-end; flex-direction: row-reverse; }
.msg.user .body { background: #1f3044; }
.msg .time { color: var(--text-muted); font-size: 11px; margin-top: 6px; }

.typing span {
  display: inline-block;
  width: 6px; height: 6px;
  margin-right: 3px;
  border-radius: 50%;
  background: var(--text-muted);
  animation: blink 1.2s infinite;
}
.typing span:nth-child(2) { animation-delay: .2s; }
.typing span:nth-child(3) { animation-delay: .4s; }
@keyframes blink { 0%, 80%, 100% { opacity: .25; } 40% { opacity: 1; } }

.chart img { width: 100%; max-width: 560px; border-radius: var(--radius); margin: 10px 0; }

.tabs { display: flex; gap: 4px; margin: 10px 0 0; border-bottom: 1px solid var(--border); }
.tab {
  padding: 6px 12px;
  cursor: pointer;
  color: var(--text-muted);
  border-bottom: 2px solid transparent;
  font-size: 13px;
}
.tab.active { color: var(--accent); border-bottom-color: var(--accent); }
.pane { display: none; padding-top: 10px; }
.pane.active { display: block; }

.pane ul { padding-left: 18px; }
.pane li { margin: 3px 0; }
.role-insight {
  margin-top: 10px;
  padding: 8px 10px;
  border-left: 3px solid var(--accent);
  color: var(--text-muted);
}

table { border-collapse: collapse; width: 100%; font-size: 13px; }
th, td { text-align: left; padding: 5px 10px; border-bottom: 1px solid var(--border); }
th { color: var(--text-muted); font-weight: 500; }
td.num, th.num { text-align: right; font-family: var(--mono); }

pre.sql {
  font-family: var(--mono);
  font-size: 12px;
  background: var(--bg);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 10px;
  overflow-x: auto;
  white-space: pre-wrap;
}
.sql-source { color: var(--text-muted); font-size: 11px; margin-top: 4px; }

.composer { border-top: 1px solid var(--border); padding-top: 14px; }
.composer .row { display: flex; gap: 8px; }
.composer textarea {
  flex: 1;
  background: var(--surface);
  color: var(--text);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 10px 12px;
  resize: none;
  font-family: var(--font);
  font-size: 14px;
  height: 44px;
}
.composer button {
  background: var(--accent);
  color: #04111f;
  border: none;
  border-radius: var(--radius);
  padding: 0 18px;
  font-weight: 600;
  cursor: pointer;
}
.composer button:disabled { opacity: .5; cursor: default; }

.examples { display: flex; flex-wrap: wrap; gap: 6px; margin-top: 10px; }
.example {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: 14px;
  padding: 4px 12px;
  font-size: 12px;
  color: var(--text-muted);
  cursor: pointer;
}
.example:hover { color: var(--accent); border-color: var(--accent); }
</style>
</head>
<body>
<div class="app">
  <header>
    <div>
      <h1><span class="logo">nli</span> Natural Language Insights</h1>
      <div class="subtitle">Ask a question about the demo sales data</div>
    </div>
    <div class="role-picker">
      <label for="role">Role</label>
      <select id="role"></select>
    </div>
  </header>

  <div id="chat"></div>

  <div class="composer">
    <div class="row">
      <textarea id="question" placeholder="e.g. What are the sales by region?"></textarea>
      <button id="send">Ask</button>
    </div>
    <div class="examples" id="examples"></div>
  </div>
</div>

<script>
const chat = document.getElementById('chat');
const questionInput = document.getElementById('question');
const sendButton = document.getElementById('send');
const roleSelect = document.getElementById('role');
const examplesBox = document.getElementById('examples');

let msgCounter = 0;

function addMessage(sender, node) {
  const id = 'msg-' + (++msgCounter);
  const msg = document.createElement('div');
  msg.className = 'msg ' + sender;
  msg.id = id;

  const avatar = document.createElement('div');
  avatar.className = 'avatar';
  avatar.textContent = sender === 'user' ? '🧑' : '🤖';

  const body = document.createElement('div');
  body.className = 'body';
  body.appendChild(node);

  msg.appendChild(avatar);
  msg.appendChild(body);
  chat.appendChild(msg);
  chat.scrollTop = chat.scrollHeight;
  return id;
}

function textNode(text, withTime) {
  const wrap = document.createElement('div');
  const p = document.createElement('p');
  p.textContent = text;
  wrap.appendChild(p);
  if (withTime) {
    const t = document.createElement('div');
    t.className = 'time';
    t.textContent = new Date().toLocaleTimeString([], { hour: '2-digit', minute: '2-digit' });
    wrap.appendChild(t);
  }
  return wrap;
}

function typingNode() {
  const wrap = document.createElement('div');
  wrap.className = 'typing';
  for (let i = 0; i < 3; i++) wrap.appendChild(document.createElement('span'));
  return wrap;
}

function answerNode(a) {
  const wrap = document.createElement('div');

  const narrative = document.createElement('p');
  narrative.textContent = a.narrative;
  wrap.appendChild(narrative);

  const chart = document.createElement('div');
  chart.className = 'chart';
  const img = document.createElement('img');
  img.src = a.chart.url;
  img.alt = a.chart.kind + ' chart of the data';
  chart.appendChild(img);
  wrap.appendChild(chart);

  // Tabs: Insights | Data | SQL
  const tabs = document.createElement('div');
  tabs.className = 'tabs';
  const panes = {};
  for (const name of ['Insights', 'Data', 'SQL']) {
    const tab = document.createElement('div');
    tab.className = 'tab';
    tab.textContent = name;
    tab.dataset.tab = name;
    tabs.appendChild(tab);

    const pane = document.createElement('div');
    pane.className = 'pane';
    panes[name] = { tab, pane };

    tab.addEventListener('click', () => {
      for (const p of Object.values(panes)) {
        p.tab.classList.remove('active');
        p.pane.classList.remove('active');
      }
      tab.classList.add('active');
      pane.classList.add('active');
    });
  }
  wrap.appendChild(tabs);

  // Insights pane: key points + role insight
  const ul = document.createElement('ul');
  for (const point of a.key_points) {
    const li = document.createElement('li');
    li.textContent = point;
    ul.appendChild(li);
  }
  panes['Insights'].pane.appendChild(ul);
  if (a.role_insight) {
    const ri = document.createElement('div');
    ri.className = 'role-insight';
    ri.textContent = a.role_insight;
    panes['Insights'].pane.appendChild(ri);
  }

  // Data pane: table pre-formatted by the server
  const table = document.createElement('table');
  const thead = document.createElement('thead');
  const headRow = document.createElement('tr');
  a.display_table.headers.forEach((h, i) => {
    const th = document.createElement('th');
    th.textContent = h;
    if (typeof a.table.rows[0][i] === 'number') th.className = 'num';
    headRow.appendChild(th);
  });
  thead.appendChild(headRow);
  table.appendChild(thead);
  const tbody = document.createElement('tbody');
  a.display_table.rows.forEach((row, r) => {
    const tr = document.createElement('tr');
    row.forEach((cell, i) => {
      const td = document.createElement('td');
      td.textContent = cell;
      if (typeof a.table.rows[r][i] === 'number') td.className = 'num';
      tr.appendChild(td);
    });
    tbody.appendChild(tr);
  });
  table.appendChild(tbody);
  panes['Data'].pane.appendChild(table);

  // SQL pane
  const pre = document.createElement('pre');
  pre.className = 'sql';
  pre.textContent = a.sql;
  panes['SQL'].pane.appendChild(pre);
  const src = document.createElement('div');
  src.className = 'sql-source';
  src.textContent = 'source: ' + a.sql_source + ' — display only, never executed';
  panes['SQL'].pane.appendChild(src);

  panes['Insights'].tab.classList.add('active');
  panes['Insights'].pane.classList.add('active');

  const t = document.createElement('div');
  t.className = 'time';
  t.textContent = new Date().toLocaleTimeString([], { hour: '2-digit', minute: '2-digit' });
  wrap.appendChild(t);

  return wrap;
}

async function ask() {
  const question = questionInput.value.trim();
  if (!question) return;

  addMessage('user', textNode(question, true));
  questionInput.value = '';
  sendButton.disabled = true;

  const typingId = addMessage('ai', typingNode());

  try {
    const resp = await fetch('/api/ask', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ question, role: roleSelect.value }),
    });
    const data = await resp.json();
    document.getElementById(typingId).remove();
    if (!resp.ok) {
      addMessage('ai', textNode('Sorry, something went wrong: ' + (data.error || resp.status), true));
    } else {
      addMessage('ai', answerNode(data));
    }
  } catch (err) {
    document.getElementById(typingId).remove();
    addMessage('ai', textNode('Request failed: ' + err, true));
  } finally {
    sendButton.disabled = false;
    chat.scrollTop = chat.scrollHeight;
  }
}

sendButton.addEventListener('click', ask);
questionInput.addEventListener('keypress', (e) => {
  if (e.key === 'Enter' && !e.shiftKey) {
    e.preventDefault();
    ask();
  }
});

async function init() {
  try {
    const resp = await fetch('/api/examples');
    const data = await resp.json();

    for (const role of data.roles) {
      const opt = document.createElement('option');
      opt.value = role;
      opt.textContent = role;
      if (role === 'Analyst') opt.selected = true;
      roleSelect.appendChild(opt);
    }

    for (const ex of data.examples) {
      const chip = document.createElement('div');
      chip.className = 'example';
      chip.textContent = ex.question;
      chip.addEventListener('click', () => {
        questionInput.value = ex.question;
        ask();
      });
      examplesBox.appendChild(chip);
    }
  } catch (err) {
    // The page still works without examples.
  }

  addMessage('ai', textNode(
    "Hi! I'm the NLI demo assistant. Ask me about sales by region, top products, " +
    'regional comparisons, or category distribution.', true));
}

init();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frontend_wires_the_api_endpoints() {
        assert!(INDEX_HTML.contains("/api/ask"));
        assert!(INDEX_HTML.contains("/api/examples"));
    }

    #[test]
    fn frontend_has_role_picker_and_tabs() {
        assert!(INDEX_HTML.contains("id=\"role\""));
        for tab in ["Insights", "Data", "SQL"] {
            assert!(INDEX_HTML.contains(tab), "missing tab {tab}");
        }
    }
}
