//! The preview document. One template, three layout branches, shared CSS.

use askama::Template;

use crate::preview::theme::Theme;
use crate::preview::view::ResumeView;

/// Askama template for the preview / print document.
#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{{ title }}</title>
<style>
  @page { size: A4; margin: 0; }
  * { box-sizing: border-box; }
  body { margin: 0; background: #f3f4f6; color: #1f2937; }
  #resume-document {
    font-family: {{ theme.font_stack|safe }};
    font-size: {{ theme.base_px }}px;
    line-height: {{ theme.line_height }};
    background: #ffffff;
    max-width: 816px;
    min-height: 1056px;
    margin: 0 auto;
  }
  #resume-document h1 { font-size: {{ theme.h1_px }}px; color: {{ theme.accent|safe }}; margin: 0 0 8px; }
  #resume-document h2 { font-size: {{ theme.h2_px }}px; color: {{ theme.accent|safe }}; text-transform: uppercase; letter-spacing: 0.12em; margin: 0 0 12px; }
  #resume-document h3 { font-size: {{ theme.h3_px }}px; margin: 0; }
  #resume-document ul { margin: 4px 0 0; padding-left: 20px; }
  #resume-document a { color: {{ theme.accent|safe }}; text-decoration: none; }
  .section { margin-bottom: {{ theme.section_gap_rem }}rem; }
  .entry { margin-bottom: 16px; }
  .entry, .keep { break-inside: avoid; page-break-inside: avoid; }
  .row { display: flex; justify-content: space-between; align-items: baseline; gap: 16px; }
  .muted { color: #6b7280; font-size: 0.9em; }
  .role { color: {{ theme.accent|safe }}; }
  .contacts { display: flex; flex-wrap: wrap; gap: 4px 16px; color: #4b5563; }
  .layout-standard { padding: 48px; }
  .layout-standard header { border-bottom: 1px solid #e5e7eb; padding-bottom: 24px; margin-bottom: 32px; }
  .layout-standard h2 { border-bottom: 2px solid {{ theme.accent|safe }}; padding-bottom: 4px; }
  .skill-row { display: grid; grid-template-columns: 140px 1fr; gap: 16px; }
  .layout-sidebar { display: grid; grid-template-columns: 280px 1fr; min-height: 1056px; }
  .layout-sidebar aside { background: #f9fafb; border-right: 1px solid #f3f4f6; padding: 32px; }
  .layout-sidebar main { padding: 40px; }
  .layout-sidebar aside h2 { font-size: 0.75em; border-bottom: 1px solid {{ theme.accent|safe }}; padding-bottom: 8px; }
  .layout-sidebar main h2 { display: inline-block; border-bottom: 2px solid {{ theme.accent|safe }}; padding-bottom: 8px; }
  .label { display: block; font-weight: 700; font-size: 0.75em; text-transform: uppercase; color: #000000; }
  .layout-minimal { padding: 56px 64px; }
  .layout-minimal h1 { color: #111827; }
  .layout-minimal h2 { font-size: {{ theme.h3_px }}px; color: #111827; letter-spacing: 0.2em; }
  @media print {
    body { background: #ffffff; }
    #resume-document { max-width: none; min-height: 0; box-shadow: none; }
    .layout-sidebar { min-height: 0; }
  }
</style>
</head>
<body>
<div id="resume-document" class="layout-{{ theme.layout }}">
{% if theme.layout == "sidebar" %}
  <aside>
    <div class="section">
      <h1>{{ resume.full_name }}</h1>
      {% for c in resume.contacts %}
      <p><span class="label">{{ c.label }}</span>{% if c.href.is_empty() %}{{ c.value }}{% else %}<a href="{{ c.href }}">{{ c.value }}</a>{% endif %}</p>
      {% endfor %}
    </div>
    {% if !resume.skills.is_empty() %}
    <div class="section keep">
      <h2>Skills</h2>
      {% for s in resume.skills %}
      <div class="entry"><strong>{{ s.category }}</strong><div class="muted">{{ s.items }}</div></div>
      {% endfor %}
    </div>
    {% endif %}
    {% if !resume.certifications.is_empty() %}
    <div class="section keep">
      <h2>Certifications</h2>
      <ul>{% for cert in resume.certifications %}<li>{{ cert }}</li>{% endfor %}</ul>
    </div>
    {% endif %}
    {% if !resume.education.is_empty() %}
    <div class="section keep">
      <h2>Education</h2>
      {% for e in resume.education %}
      <div class="entry">
        <strong>{{ e.institution }}</strong>
        <div><em>{{ e.degree }}</em></div>
        {% if !e.dates.is_empty() %}<div class="muted">{{ e.dates }}</div>{% endif %}
      </div>
      {% endfor %}
    </div>
    {% endif %}
  </aside>
  <main>
    {% if !resume.summary.is_empty() %}
    <section class="section keep">
      <h2>Profile</h2>
      <p>{{ resume.summary }}</p>
    </section>
    {% endif %}
    {% if !resume.experience.is_empty() %}
    <section class="section">
      <h2>Professional Experience</h2>
      {% for x in resume.experience %}
      <div class="entry">
        <div class="row"><h3 class="role">{{ x.position }}</h3><span class="muted">{{ x.dates }}</span></div>
        <div>{{ x.company }}</div>
        <ul>{% for b in x.bullets %}<li>{{ b }}</li>{% endfor %}</ul>
      </div>
      {% endfor %}
    </section>
    {% endif %}
    {% if !resume.projects.is_empty() %}
    <section class="section">
      <h2>Projects</h2>
      {% for p in resume.projects %}
      <div class="entry">
        <div class="row"><h3>{{ p.name }}</h3>{% if !p.href.is_empty() %}<a class="muted" href="{{ p.href }}">{{ p.link }}</a>{% endif %}</div>
        <p>{{ p.description }}</p>
      </div>
      {% endfor %}
    </section>
    {% endif %}
    {% if !resume.awards.is_empty() %}
    <section class="section keep">
      <h2>Honors &amp; Awards</h2>
      <ul>{% for a in resume.awards %}<li>{{ a }}</li>{% endfor %}</ul>
    </section>
    {% endif %}
  </main>
{% else %}
  <header>
    <h1>{{ resume.full_name }}</h1>
    <div class="contacts">
      {% for c in resume.contacts %}{% if c.href.is_empty() %}<span>{{ c.value }}</span>{% else %}<a href="{{ c.href }}">{{ c.value }}</a>{% endif %}{% endfor %}
    </div>
  </header>
  {% if !resume.summary.is_empty() %}
  <section class="section keep">
    <h2>{% if theme.layout == "minimal" %}Summary{% else %}Professional Summary{% endif %}</h2>
    <p>{{ resume.summary }}</p>
  </section>
  {% endif %}
  {% if !resume.experience.is_empty() %}
  <section class="section">
    <h2>Experience</h2>
    {% for x in resume.experience %}
    <div class="entry">
      <div class="row"><h3 class="role">{{ x.position }}</h3><span class="muted">{{ x.dates }}</span></div>
      <div class="row"><strong>{{ x.company }}</strong><span class="muted">{{ x.location }}</span></div>
      <ul>{% for b in x.bullets %}<li>{{ b }}</li>{% endfor %}</ul>
    </div>
    {% endfor %}
  </section>
  {% endif %}
  {% if !resume.education.is_empty() %}
  <section class="section">
    <h2>Education</h2>
    {% for e in resume.education %}
    <div class="entry">
      <div class="row"><h3>{{ e.institution }}</h3><span class="muted">{{ e.dates }}</span></div>
      <div class="row"><em>{{ e.degree }}</em><span class="muted">{{ e.location }}</span></div>
      {% if !e.description.is_empty() %}<p>{{ e.description }}</p>{% endif %}
    </div>
    {% endfor %}
  </section>
  {% endif %}
  {% if !resume.skills.is_empty() %}
  <section class="section keep">
    <h2>Skills</h2>
    {% for s in resume.skills %}
    <div class="skill-row entry"><strong class="role">{{ s.category }}:</strong><span>{{ s.items }}</span></div>
    {% endfor %}
  </section>
  {% endif %}
  {% if !resume.projects.is_empty() %}
  <section class="section">
    <h2>Projects</h2>
    {% for p in resume.projects %}
    <div class="entry">
      <div class="row"><h3>{{ p.name }}</h3>{% if !p.href.is_empty() %}<a class="muted" href="{{ p.href }}">{{ p.link }}</a>{% endif %}</div>
      <p>{{ p.description }}</p>
    </div>
    {% endfor %}
  </section>
  {% endif %}
  {% if !resume.certifications.is_empty() %}
  <section class="section keep">
    <h2>Certifications</h2>
    <ul>{% for cert in resume.certifications %}<li>{{ cert }}</li>{% endfor %}</ul>
  </section>
  {% endif %}
  {% if !resume.awards.is_empty() %}
  <section class="section keep">
    <h2>Awards</h2>
    <ul>{% for a in resume.awards %}<li>{{ a }}</li>{% endfor %}</ul>
  </section>
  {% endif %}
{% endif %}
</div>
{% if auto_print %}
<script>window.addEventListener("load", function () { window.print(); });</script>
{% endif %}
</body>
</html>
"#,
    ext = "html"
)]
pub struct PreviewPage<'a> {
    pub title: &'a str,
    pub theme: &'a Theme,
    pub resume: &'a ResumeView,
    pub auto_print: bool,
}
