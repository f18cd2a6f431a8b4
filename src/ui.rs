use crate::dashboard::{mood_emoji, mood_label};
use crate::models::DashboardResponse;

pub fn render_index(dashboard: &DashboardResponse) -> String {
    let weekly_cells: String = dashboard
        .weekly_activity
        .iter()
        .map(|logged| {
            if *logged {
                r#"<span class="cell on" title="Logged"></span>"#
            } else {
                r#"<span class="cell" title="No entry"></span>"#
            }
        })
        .collect();

    let mood_options: String = (1..=5)
        .rev()
        .map(|mood| {
            format!(
                r#"<label class="mood"><input type="radio" name="mood" value="{mood}" required /><span>{} {}</span></label>"#,
                mood_emoji(mood),
                mood_label(mood)
            )
        })
        .collect();

    let today_status = match &dashboard.today_entry {
        Some(entry) => format!(
            r#"<section class="card done"><h3>Today's entry is complete!</h3><p>Mood: {} | Urges: {}/10</p>{}</section>"#,
            mood_emoji(entry.mood),
            entry.urges,
            if entry.notes.is_empty() {
                String::new()
            } else {
                format!("<p class=\"notes\">{}</p>", escape_html(&entry.notes))
            }
        ),
        None => String::new(),
    };

    let achievement = match &dashboard.achievement_title {
        Some(title) => format!(
            r#"<section class="card achievement"><h3>Achievement unlocked!</h3><p>{title}</p></section>"#
        ),
        None => String::new(),
    };

    let emergency = if dashboard.show_emergency_panel {
        EMERGENCY_HTML
    } else {
        ""
    };

    let submit_label = if dashboard.today_entry.is_some() {
        "Update today's entry"
    } else {
        "Save entry"
    };

    INDEX_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{HEADLINE}}", &dashboard.messages.headline)
        .replace("{{MOTIVATION}}", &dashboard.messages.motivation)
        .replace("{{STREAK}}", &dashboard.current_streak.to_string())
        .replace("{{TOTAL}}", &dashboard.total_days.to_string())
        .replace("{{LONGEST}}", &dashboard.longest_streak.to_string())
        .replace("{{PROGRESS}}", &format!("{:.2}", dashboard.streak_progress_percent))
        .replace("{{STREAK_HINT}}", &dashboard.messages.streak_hint)
        .replace("{{WEEKLY_COUNT}}", &dashboard.weekly_count.to_string())
        .replace("{{WEEKLY_CELLS}}", &weekly_cells)
        .replace("{{WEEKLY_HINT}}", &dashboard.messages.weekly_hint)
        .replace("{{MOOD_EMOJI}}", &dashboard.average_mood_emoji)
        .replace("{{MOOD_HINT}}", &dashboard.messages.mood_hint)
        .replace("{{MOOD_OPTIONS}}", &mood_options)
        .replace("{{SUBMIT_LABEL}}", submit_label)
        .replace("{{ACHIEVEMENT}}", &achievement)
        .replace("{{EMERGENCY}}", emergency)
        .replace("{{DATE}}", &dashboard.today.to_string())
        // last, so note text is never scanned for placeholders
        .replace("{{TODAY_STATUS}}", &today_status)
}

pub fn render_diary(error: Option<&str>) -> String {
    let banner = match error {
        Some(message) => format!(r#"<p class="status error">{}</p>"#, escape_html(message)),
        None => String::new(),
    };
    DIARY_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{ERROR}}", &banner)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const STYLE: &str = r#"
  <style>
    :root {
      --bg: #fff7ed;
      --ink: #1f2937;
      --muted: #6b7280;
      --accent: #f97316;
      --good: #22c55e;
      --alert: #dc2626;
      --card: #ffffff;
    }
    * { box-sizing: border-box; }
    body {
      margin: 0;
      background: linear-gradient(135deg, #fff7ed, #fffbeb 60%, #fefce8);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px 16px 64px;
    }
    main { width: min(900px, 100%); margin: 0 auto; display: grid; gap: 20px; }
    nav { display: flex; gap: 16px; }
    nav a { color: var(--accent); font-weight: 600; text-decoration: none; }
    .hero {
      background: linear-gradient(135deg, #fb923c, #fbbf24);
      color: white;
      border-radius: 24px;
      padding: 28px;
    }
    .hero h2 { margin: 0 0 8px; font-size: 2rem; }
    .pills { display: flex; gap: 12px; flex-wrap: wrap; }
    .pill { background: rgba(255, 255, 255, 0.2); border-radius: 16px; padding: 10px 18px; }
    .pill strong { display: block; font-size: 1.8rem; }
    .grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 16px; }
    .card { background: var(--card); border-radius: 18px; padding: 18px; box-shadow: 0 8px 24px rgba(0, 0, 0, 0.06); }
    .card h3 { margin: 0 0 8px; }
    .big { font-size: 2.2rem; font-weight: 700; color: var(--accent); }
    .bar { height: 8px; background: #f3f4f6; border-radius: 8px; overflow: hidden; }
    .bar span { display: block; height: 100%; background: var(--accent); }
    .week { display: flex; gap: 4px; margin: 8px 0; }
    .cell { flex: 1; height: 28px; border-radius: 6px; background: #f3f4f6; }
    .cell.on { background: var(--good); }
    .muted { color: var(--muted); }
    .done { border: 2px solid var(--good); }
    .achievement { background: linear-gradient(135deg, #a855f7, #ec4899); color: white; }
    .emergency { border: 2px solid var(--alert); background: #fef2f2; }
    .moods { display: flex; gap: 8px; flex-wrap: wrap; }
    .mood span { display: inline-block; padding: 8px 12px; border: 2px solid #e5e7eb; border-radius: 12px; cursor: pointer; }
    .mood input { display: none; }
    .mood input:checked + span { border-color: var(--accent); background: #fff7ed; }
    form { display: grid; gap: 12px; }
    textarea, input[type=range] { width: 100%; }
    textarea { border: 1px solid #d1d5db; border-radius: 12px; padding: 10px; font: inherit; }
    button { border: 0; border-radius: 12px; padding: 12px 18px; background: var(--accent); color: white; font-weight: 600; cursor: pointer; }
    .tabs { display: flex; gap: 8px; }
    .tab { background: #f3f4f6; color: var(--ink); }
    .tab.active { background: var(--accent); color: white; }
    .status.error { color: var(--alert); font-weight: 600; }
  </style>
"#;

const EMERGENCY_HTML: &str = r#"
    <section class="card emergency" id="emergency">
      <h3>Having a hard moment?</h3>
      <p>You are facing intense urges. Remember: this is temporary and you are stronger than you think.</p>
      <p class="muted">Try a breathing exercise or a healthy distraction for the next ten minutes.</p>
    </section>
"#;

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Reboot</title>
  {{STYLE}}
</head>
<body>
  <main>
    <nav>
      <a href="/">Home</a>
      <a href="/diary">Diary</a>
      <a href="/diary#symptoms">Symptoms</a>
      <a href="#progress">Progress</a>
      <a href="#progress" data-open="weekly">Summary</a>
    </nav>

    <section class="hero">
      <h2>{{HEADLINE}}</h2>
      <p>{{MOTIVATION}}</p>
      <div class="pills">
        <div class="pill"><strong>{{STREAK}}</strong>clean days</div>
        <div class="pill"><strong>{{TOTAL}}</strong>total entries</div>
        <div class="pill"><strong>{{LONGEST}}</strong>personal best</div>
      </div>
    </section>

    {{TODAY_STATUS}}

    <section class="card">
      <h3>How was your day?</h3>
      <form method="post" action="/entry">
        <div class="moods">{{MOOD_OPTIONS}}</div>
        <label>Urge level today: <output id="urge-value">0</output>/10
          <input type="range" name="urges" min="0" max="10" value="0"
                 oninput="document.getElementById('urge-value').textContent = this.value" />
        </label>
        <textarea name="notes" rows="3" placeholder="How was your day? What did you learn?"></textarea>
        <button type="submit">{{SUBMIT_LABEL}}</button>
      </form>
    </section>

    <section class="grid">
      <div class="card">
        <h3>Current streak</h3>
        <div class="big">{{STREAK}} days</div>
        <div class="bar"><span style="width: {{PROGRESS}}%"></span></div>
        <p class="muted">{{STREAK_HINT}}</p>
      </div>
      <div class="card">
        <h3>Weekly activity</h3>
        <div class="big">{{WEEKLY_COUNT}}/7</div>
        <div class="week">{{WEEKLY_CELLS}}</div>
        <p class="muted">{{WEEKLY_HINT}}</p>
      </div>
      <div class="card">
        <h3>Average mood</h3>
        <div class="big">{{MOOD_EMOJI}}</div>
        <p class="muted">{{MOOD_HINT}}</p>
      </div>
    </section>

    {{ACHIEVEMENT}}
    {{EMERGENCY}}

    <section class="card" id="progress">
      <div class="tabs" role="tablist">
        <button class="tab active" type="button" data-tab="daily">Last 7 days</button>
        <button class="tab" type="button" data-tab="weekly">Weekly summary</button>
      </div>
      <svg id="chart" viewBox="0 0 600 220" role="img" aria-label="Progress chart"></svg>
      <p class="muted" id="chart-caption"></p>
    </section>

    <p class="muted">Entries are kept per calendar day ({{DATE}}, server time).</p>
  </main>

  <script>
    const chartEl = document.getElementById('chart');
    const captionEl = document.getElementById('chart-caption');
    const tabs = Array.from(document.querySelectorAll('.tab'));
    let summary = null;
    let activeTab = 'daily';

    const drawBars = (points, max, color) => {
      const width = 600 / points.length;
      chartEl.innerHTML = points.map((point, i) => {
        const value = point.value ?? 0;
        const height = max > 0 ? (value / max) * 180 : 0;
        return `<rect x="${i * width + 8}" y="${190 - height}" width="${width - 16}" height="${height}" rx="6" fill="${color}"></rect>` +
          `<text x="${i * width + width / 2}" y="212" font-size="11" text-anchor="middle">${point.label}</text>`;
      }).join('');
    };

    const render = () => {
      if (!summary) {
        return;
      }
      if (activeTab === 'weekly') {
        drawBars(summary.weekly.map((week) => ({ label: week.week, value: week.avg_mood })), 5, '#a855f7');
        const high = summary.weekly.reduce((sum, week) => sum + week.high_urge_days, 0);
        captionEl.textContent = `Average mood per week. High-urge days in the last 8 weeks: ${high}.`;
      } else {
        drawBars(summary.last_7_days.map((day) => ({ label: day.date.slice(5), value: day.mood })), 5, '#f97316');
        const logged = summary.last_7_days.filter((day) => day.logged).length;
        captionEl.textContent = `Mood per day. ${logged} of the last 7 days logged.`;
      }
    };

    const setActiveTab = (tab) => {
      activeTab = tab;
      tabs.forEach((button) => button.classList.toggle('active', button.dataset.tab === tab));
      render();
    };

    tabs.forEach((button) => button.addEventListener('click', () => setActiveTab(button.dataset.tab)));
    document.querySelectorAll('[data-open]').forEach((link) => {
      link.addEventListener('click', () => setActiveTab(link.dataset.open));
    });

    fetch('/api/summary')
      .then((res) => res.ok ? res.json() : Promise.reject(new Error('Unable to load summary')))
      .then((data) => { summary = data; render(); })
      .catch((err) => { captionEl.textContent = err.message; });
  </script>
</body>
</html>
"##;

const DIARY_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Reboot - Diary</title>
  {{STYLE}}
</head>
<body>
  <main>
    <nav>
      <a href="/">Home</a>
      <a href="/diary">Diary</a>
    </nav>
    <section class="card">
      <h2>Daily diary</h2>
      {{ERROR}}
      <form method="post" action="/diary">
        <label>Feelings
          <textarea name="feelings" rows="4" placeholder="Describe how you felt today..."></textarea>
        </label>
        <label>Triggers
          <textarea name="triggers" rows="3" placeholder="Which triggers did you face?"></textarea>
        </label>
        <label id="symptoms">Symptoms
          <textarea name="symptoms" rows="3" placeholder="Which symptoms did you notice?"></textarea>
        </label>
        <label><input type="checkbox" name="relapse" /> Was there a relapse today?</label>
        <button type="submit">Save entry</button>
      </form>
    </section>
  </main>
</body>
</html>
"#;
