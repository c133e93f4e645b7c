//! Server-rendered landing page.
//!
//! Everything here is static markup except the calculator section, which is
//! filled from a [`LandingPageContext`]. The page works without JavaScript
//! (sliders submit a GET form); the inline script upgrades it to live updates
//! over `/ws` when available.

use crate::format::{format_currency, format_number};
use core_types::{CalculatorInputs, DerivedMetrics, InputField};
use std::fmt::Write;

pub const PRODUCT_NAME: &str = "Maalgah AI";
pub const TAGLINE: &str = "AI calling agents for dental clinics";

/// Practice-management systems shown as integration badges. Labels only.
pub const INTEGRATIONS: [&str; 5] = [
    "Dentrix",
    "Eaglesoft",
    "Open Dental",
    "Curve Dental",
    "Denticon",
];

const FEATURES: [(&str, &str); 3] = [
    (
        "Answers every call",
        "Picks up after-hours and overflow calls in seconds, day or night.",
    ),
    (
        "Qualifies patients",
        "Collects the reason for the visit, insurance details and preferred times.",
    ),
    (
        "Books appointments",
        "Writes confirmed appointments straight into your practice management software.",
    ),
];

/// Everything the page needs from the calculator.
#[derive(Debug, Clone)]
pub struct LandingPageContext {
    pub inputs: CalculatorInputs,
    pub metrics: DerivedMetrics,
    /// Shown in the footer copyright line.
    pub year: i32,
}

/// Renders the full HTML document.
pub fn render_landing_page(ctx: &LandingPageContext) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(html, "<title>{} | {}</title>", PRODUCT_NAME, escape(TAGLINE));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    render_header(&mut html);
    html.push_str("<main>\n");
    render_hero(&mut html);
    render_features(&mut html);
    render_calculator(&mut html, ctx);
    render_integrations(&mut html);
    render_contact(&mut html);
    html.push_str("</main>\n");
    render_footer(&mut html, ctx.year);

    html.push_str(LIVE_SCRIPT);
    html.push_str("</body>\n</html>\n");
    html
}

fn render_header(html: &mut String) {
    let _ = write!(
        html,
        r##"<header class="container header">
  <div class="brand">
    <div class="logo">M</div>
    <div><h1>{name}</h1><p class="muted small">{tagline}</p></div>
  </div>
  <nav>
    <a href="#features">Features</a>
    <a href="#calculator">Calculator</a>
    <a href="#integrations">Integrations</a>
    <a href="#contact" class="button">Book demo</a>
  </nav>
</header>
"##,
        name = PRODUCT_NAME,
        tagline = escape(TAGLINE),
    );
}

fn render_hero(html: &mut String) {
    html.push_str(
        r##"<section class="container hero">
  <div>
    <h2>Turn missed calls into dental appointments, automatically</h2>
    <p class="muted">Maalgah's AI calling agent answers after-hours &amp; missed calls, qualifies patients,
      and books appointments directly into your practice management software, so you can focus on
      patients while revenue grows.</p>
    <div class="actions">
      <a href="#calculator" class="button">Try calculator</a>
      <a href="#contact" class="button ghost">Watch demo</a>
    </div>
  </div>
  <div class="card conversation">
    <div class="row"><div><div class="muted small">Maalgah AI &bull; Virtual receptionist</div>
      <strong>Appointment confirmed</strong></div><div class="muted small">2:14 PM</div></div>
    <div class="bubble">
      <p>Hi, this is Maalgah. I can book you with Dr. Khan. What day works best?</p>
      <p class="muted small">Patient: I need next Tuesday</p>
    </div>
  </div>
</section>
"##,
    );
}

fn render_features(html: &mut String) {
    html.push_str("<section id=\"features\" class=\"container grid3\">\n");
    for (title, body) in FEATURES {
        let _ = writeln!(
            html,
            "  <div class=\"card\"><h3>{}</h3><p class=\"muted\">{}</p></div>",
            escape(title),
            escape(body)
        );
    }
    html.push_str("</section>\n");
}

fn render_calculator(html: &mut String, ctx: &LandingPageContext) {
    html.push_str(
        r##"<section id="calculator" class="container card">
  <h4>Revenue &amp; missed-calls calculator</h4>
  <p class="muted small">Drag sliders to model your clinic. Results update live.</p>
  <form method="get" action="/#calculator" id="calculator-form">
"##,
    );

    for field in InputField::ALL {
        render_slider(html, field, ctx.inputs.get(field));
    }

    html.push_str(
        "    <noscript><button type=\"submit\" class=\"button\">Recalculate</button></noscript>\n",
    );
    html.push_str("  </form>\n  <div class=\"stats\">\n");

    let m = &ctx.metrics;
    render_stat(
        html,
        "afterHoursCalls",
        "After-hours calls/day",
        &format_number(m.after_hours_calls),
        false,
    );
    render_stat(
        html,
        "aiAnswered",
        "AI answered/day",
        &format_number(m.ai_answered),
        false,
    );
    render_stat(
        html,
        "additionalAppointmentsDaily",
        "Extra appts/day",
        &format_number(m.additional_appointments_daily),
        false,
    );
    render_stat(
        html,
        "additionalAppointmentsMonthly",
        "Extra appts/month",
        &format_number(m.additional_appointments_monthly),
        false,
    );
    render_stat(
        html,
        "monthlyRevenueIncrease",
        "Extra revenue / month",
        &format_currency(m.monthly_revenue_increase),
        true,
    );
    html.push_str("  </div>\n</section>\n");
}

fn render_slider(html: &mut String, field: InputField, value: rust_decimal::Decimal) {
    let value = value.normalize();
    let _ = write!(
        html,
        r#"    <label class="slider">
      <span class="row"><span>{label}</span><span class="muted"><output data-field="{name}">{value}</output>{suffix}</span></span>
      <input type="range" name="{name}" min="{min}" max="{max}" step="1" value="{value}">
    </label>
"#,
        label = escape(field.label()),
        name = field.as_str(),
        value = value,
        suffix = escape(field.suffix()),
        min = field.min(),
        max = field.max(),
    );
}

fn render_stat(html: &mut String, key: &str, title: &str, value: &str, highlight: bool) {
    let class = if highlight { "stat highlight" } else { "stat" };
    let _ = writeln!(
        html,
        "    <div class=\"{class}\"><div class=\"muted small\">{}</div><div class=\"value\" data-metric=\"{key}\">{}</div></div>",
        escape(title),
        escape(value),
    );
}

fn render_integrations(html: &mut String) {
    html.push_str(
        "<section id=\"integrations\" class=\"container\">\n  <h4>Works with your practice software</h4>\n  <div class=\"badges\">\n",
    );
    for name in INTEGRATIONS {
        let _ = writeln!(html, "    <span class=\"badge\">{}</span>", escape(name));
    }
    html.push_str("  </div>\n</section>\n");
}

fn render_contact(html: &mut String) {
    html.push_str(
        r##"<section id="contact" class="container card cta">
  <h4>Ready to stop missing calls?</h4>
  <p class="muted">See Maalgah answer, qualify and book a patient in under two minutes.</p>
  <a href="mailto:hello@maalgah.ai?subject=Demo" class="button">Book demo</a>
</section>
"##,
    );
}

fn render_footer(html: &mut String, year: i32) {
    let _ = writeln!(
        html,
        "<footer><div class=\"container muted small\">&copy; {year} Maalgah &mdash; {}</div></footer>",
        escape(TAGLINE)
    );
}

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

const STYLE: &str = r#"<style>
  body { margin: 0; background: #111827; color: #f3f4f6; font-family: system-ui, sans-serif; }
  a { color: inherit; }
  .container { max-width: 72rem; margin: 0 auto; padding: 2rem 1.5rem; }
  .header, .row { display: flex; align-items: center; justify-content: space-between; gap: 1rem; }
  .brand { display: flex; align-items: center; gap: .75rem; }
  .brand h1 { font-size: 1.25rem; margin: 0; }
  .logo { width: 2.5rem; height: 2.5rem; border-radius: 1rem; display: grid; place-items: center;
    font-weight: 700; background: linear-gradient(135deg, #6366f1, #ec4899); }
  nav { display: flex; gap: 1.5rem; font-size: .875rem; }
  .muted { color: #9ca3af; }
  .small { font-size: .75rem; margin: 0; }
  .button { display: inline-block; background: #4f46e5; padding: .6rem 1.2rem; border-radius: .5rem;
    text-decoration: none; font-weight: 600; border: 0; color: #fff; }
  .button.ghost { background: transparent; border: 1px solid #374151; }
  .hero { display: grid; grid-template-columns: repeat(auto-fit, minmax(20rem, 1fr)); gap: 2rem; align-items: center; }
  .hero h2 { font-size: 2.25rem; line-height: 1.2; }
  .actions { display: flex; gap: .75rem; }
  .card { background: #1f2937; border-radius: 1rem; padding: 1.5rem; }
  .bubble { background: rgba(0,0,0,.3); border-radius: .5rem; padding: 1rem; margin-top: 1rem; }
  .grid3 { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 1.5rem; }
  .slider { display: block; margin: 1.25rem 0; font-size: .875rem; }
  .slider input { width: 100%; accent-color: #6366f1; }
  .stats { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 1rem; margin-top: 1.5rem; }
  .stat { background: #111827; border-radius: .5rem; padding: 1rem; }
  .stat.highlight { background: linear-gradient(135deg, rgba(67,56,202,.4), rgba(190,24,93,.2)); }
  .stat .value { font-size: 1.25rem; font-weight: 600; margin-top: .5rem; }
  .badges { display: flex; flex-wrap: wrap; gap: .75rem; }
  .badge { border: 1px solid #374151; border-radius: 999px; padding: .4rem 1rem; font-size: .875rem; }
  .cta { text-align: center; }
  footer { border-top: 1px solid #1f2937; margin-top: 3rem; }
</style>
"#;

const LIVE_SCRIPT: &str = r#"<script>
(() => {
  const form = document.getElementById("calculator-form");
  if (!form || !("WebSocket" in window)) return;
  const scheme = location.protocol === "https:" ? "wss" : "ws";
  // Start the session on the inputs this page was rendered with.
  const query = new URLSearchParams(new FormData(form));
  const socket = new WebSocket(`${scheme}://${location.host}/ws?${query}`);
  const fmt = (n) => Number(n).toLocaleString("en-US", { maximumFractionDigits: 2 });
  const setMetric = (key, text) => {
    const el = document.querySelector(`[data-metric="${key}"]`);
    if (el) el.textContent = text;
  };
  const showMetrics = (metrics) => {
    for (const key of ["afterHoursCalls", "aiAnswered", "additionalAppointmentsDaily", "additionalAppointmentsMonthly"]) {
      setMetric(key, fmt(metrics[key]));
    }
  };
  socket.addEventListener("open", () => {
    socket.send(JSON.stringify({ type: "SetInputs", payload: Object.fromEntries(
      [...form.querySelectorAll("input[type=range]")].map((i) => [i.name, Number(i.value)])) }));
  });
  socket.addEventListener("message", (event) => {
    const msg = JSON.parse(event.data);
    if (msg.type === "Metrics" || msg.type === "Connected") showMetrics(msg.payload.metrics);
    if (msg.type === "RevenueFrame") setMetric("monthlyRevenueIncrease", "$" + fmt(msg.payload.value));
  });
  form.addEventListener("input", (event) => {
    const input = event.target;
    const out = form.querySelector(`output[data-field="${input.name}"]`);
    if (out) out.textContent = input.value;
    if (socket.readyState === WebSocket.OPEN) {
      socket.send(JSON.stringify({ type: "SetField", payload: { field: input.name, value: Number(input.value) } }));
    }
  });
  form.addEventListener("submit", (event) => event.preventDefault());
})();
</script>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use calculator::derive;

    fn render_default() -> String {
        let inputs = CalculatorInputs::default();
        render_landing_page(&LandingPageContext {
            inputs,
            metrics: derive(&inputs),
            year: 2026,
        })
    }

    #[test]
    fn renders_every_slider_with_its_domain() {
        let html = render_default();
        assert!(html.contains(r#"name="dailyCalls" min="0" max="300" step="1" value="60""#));
        assert!(html.contains(r#"name="avgValue" min="10" max="1000" step="1" value="120""#));
        assert!(html.contains("Conversion rate (calls → appointment)"));
    }

    #[test]
    fn renders_the_derived_metrics() {
        let html = render_default();
        assert!(html.contains(r#"data-metric="afterHoursCalls">18<"#));
        assert!(html.contains(r#"data-metric="aiAnswered">14<"#));
        assert!(html.contains(r#"data-metric="additionalAppointmentsDaily">1.15<"#));
        assert!(html.contains(r#"data-metric="additionalAppointmentsMonthly">25.3<"#));
        assert!(html.contains(r#"data-metric="monthlyRevenueIncrease">$3,041.28<"#));
    }

    #[test]
    fn renders_static_sections() {
        let html = render_default();
        let anchors = [
            "id=\"features\"",
            "id=\"calculator\"",
            "id=\"integrations\"",
            "id=\"contact\"",
        ];
        for anchor in anchors {
            assert!(html.contains(anchor), "missing {anchor}");
        }
        for name in INTEGRATIONS {
            assert!(html.contains(name));
        }
        assert!(html.contains("&copy; 2026 Maalgah"));
    }

    #[test]
    fn live_script_opens_the_socket_on_the_form_inputs() {
        let html = render_default();
        assert!(html.contains("new URLSearchParams(new FormData(form))"));
        assert!(html.contains("/ws?${query}"));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
