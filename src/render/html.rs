//! HTML fragments for the disease lookup page.
//!
//! Every string that comes from the catalog or from the user is passed
//! through [`escape_html`] before it reaches markup, attribute values
//! included.

use std::fmt::Write;

use crate::catalog::store::DiseaseCatalog;
use crate::core::disease::DiseaseRecord;
use crate::matching::{MatchError, MatchResult};

const INDEX_TEMPLATE: &str = include_str!("../web/templates/index.html");

/// Escape text for use in HTML element content and quoted attribute values
#[must_use]
pub fn escape_html(s: &str) -> String {
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

fn escaped_list(items: &[String]) -> String {
    items
        .iter()
        .map(|s| escape_html(s))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One block per ranked disease
#[must_use]
pub fn render_results_html(results: &[MatchResult]) -> String {
    let mut out = String::new();
    for m in results {
        let _ = write!(
            out,
            "<div class=\"result-item\">\
             <h4>{}</h4>\
             <div class=\"match-percentage\">{}% Match</div>\
             <p class=\"matched\">Matched: {}</p>",
            escape_html(&m.disease_name),
            m.match_percent,
            escaped_list(&m.matched_symptoms),
        );
        if !m.unmatched_symptoms.is_empty() {
            let _ = write!(
                out,
                "<p class=\"other\">Other symptoms: {}</p>",
                escaped_list(&m.unmatched_symptoms)
            );
        }
        out.push_str("</div>");
    }
    out
}

/// The prompt or fallback shown instead of a result list
#[must_use]
pub fn render_match_error_html(err: MatchError) -> String {
    let emoji = match err {
        MatchError::NoSelection => "⚠",
        MatchError::NoMatch => "🤔",
    };
    format!(
        "<div class=\"no-results\"><div class=\"emoji\">{emoji}</div>{}</div>",
        escape_html(&err.to_string())
    )
}

/// Render either outcome of a diagnosis
#[must_use]
pub fn render_diagnosis_html(outcome: &Result<Vec<MatchResult>, MatchError>) -> String {
    match outcome {
        Ok(results) => render_results_html(results),
        Err(err) => render_match_error_html(*err),
    }
}

/// Name, summary, symptoms and recommendations for one disease
#[must_use]
pub fn render_disease_details_html(disease: &DiseaseRecord) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<h3>{}</h3><p class=\"summary\">{}</p>",
        escape_html(&disease.name),
        escape_html(&disease.summary)
    );
    if let Some(latin) = &disease.scientific_name {
        let _ = write!(out, "<p class=\"latin\"><em>{}</em></p>", escape_html(latin));
    }
    if !disease.plants.is_empty() {
        let _ = write!(
            out,
            "<p class=\"plants\">Affects: {}</p>",
            escaped_list(&disease.plants)
        );
    }
    if let Some(severity) = disease.severity {
        let _ = write!(
            out,
            "<p class=\"severity\">Severity: {}</p>",
            escape_html(&severity.to_string())
        );
    }

    out.push_str("<h4>Common symptoms</h4><ul class=\"symptom-list\">");
    for s in &disease.symptoms {
        let _ = write!(out, "<li>{}</li>", escape_html(s));
    }
    out.push_str("</ul><h4>Recommendations</h4><ul>");
    for a in &disease.advice {
        let _ = write!(out, "<li>{}</li>", escape_html(a));
    }
    out.push_str("</ul>");

    if !disease.prevention.is_empty() {
        out.push_str("<h4>Prevention</h4><ul>");
        for p in &disease.prevention {
            let _ = write!(out, "<li>{}</li>", escape_html(p));
        }
        out.push_str("</ul>");
    }
    out
}

/// One clickable card per disease
#[must_use]
pub fn render_disease_grid_html(catalog: &DiseaseCatalog) -> String {
    let mut out = String::new();
    for (i, d) in catalog.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        let _ = write!(
            out,
            "<div class=\"disease-card{active}\" data-id=\"{}\">{}</div>",
            escape_html(d.id.as_str()),
            escape_html(&d.name)
        );
    }
    out
}

/// One checkbox per symptom in the catalog's sorted union
#[must_use]
pub fn render_symptom_checkboxes_html(catalog: &DiseaseCatalog) -> String {
    let mut out = String::new();
    for (idx, symptom) in catalog.symptom_union().into_iter().enumerate() {
        let escaped = escape_html(symptom);
        let _ = write!(
            out,
            "<div class=\"symptom-checkbox\">\
             <input type=\"checkbox\" id=\"symp_{idx}\" value=\"{escaped}\">\
             <label for=\"symp_{idx}\">{escaped}</label></div>"
        );
    }
    out
}

/// The full lookup page, with the first disease's details pre-rendered
#[must_use]
pub fn render_index_page(catalog: &DiseaseCatalog) -> String {
    let details = catalog
        .iter()
        .next()
        .map(render_disease_details_html)
        .unwrap_or_default();

    fill_template(
        INDEX_TEMPLATE,
        &[
            ("disease_grid", render_disease_grid_html(catalog).as_str()),
            ("disease_details", details.as_str()),
            (
                "symptom_checkboxes",
                render_symptom_checkboxes_html(catalog).as_str(),
            ),
        ],
    )
}

/// Substitute `{{name}}` placeholders in one pass over the template.
///
/// Inserted values are never rescanned, so catalog text that looks like a
/// placeholder stays literal. Unknown placeholders are left as they are.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            rest = &rest[open..];
            break;
        };

        let name = &after[..close];
        match values.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }

    out.push_str(rest);
    out
}
