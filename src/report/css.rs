//! Embedded CSS for the HTML report.

/// Inline stylesheet for [`super::html::render_html`].
pub const REPORT_CSS: &str = r"
* { box-sizing: border-box; }
body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  background: #0f1115;
  color: #e6e6e6;
  margin: 0;
  padding: 2rem;
}
.container { max-width: 960px; margin: 0 auto; }
header h1 { font-weight: 600; }
.score-card {
  background: #161a21;
  border-radius: 8px;
  padding: 1.5rem;
  margin-bottom: 2rem;
  display: flex;
  align-items: center;
  gap: 2rem;
}
.score { font-size: 3rem; font-weight: 700; }
.score.high { color: #4caf50; }
.score.medium { color: #ffc107; }
.score.low { color: #f44336; }
.stats { display: grid; grid-template-columns: repeat(2, auto); gap: 0.25rem 1.5rem; }
.accordion { display: flex; flex-direction: column; gap: 0.5rem; }
.entry {
  background: #161a21;
  border-radius: 6px;
  border-left: 4px solid #444;
  overflow: hidden;
}
.entry.killed { border-left-color: #4caf50; }
.entry.survived { border-left-color: #f44336; }
.entry.timeout { border-left-color: #ffc107; }
.entry.error { border-left-color: #888; }
.entry-header {
  padding: 0.75rem 1rem;
  display: flex;
  justify-content: space-between;
  cursor: pointer;
}
.entry-body { display: none; padding: 0 1rem 1rem; font-family: monospace; }
.entry.expanded .entry-body { display: block; }
.entry-code { display: flex; gap: 0.5rem; align-items: center; }
.original { color: #f44336; }
.mutated { color: #4caf50; }
";
