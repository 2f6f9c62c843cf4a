use crate::error::AppError;
use crate::models::LeetCodeStats;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Languages listed on the card.
const TOP_LANGUAGE_COUNT: usize = 3;
const LANGUAGE_START_Y: u32 = 80;
const LANGUAGE_STEP_Y: u32 = 30;

const LANGUAGE_PLACEHOLDER: &str = "dynamic_change";

/// Value for a `{{ key }}` placeholder, or `None` if the key is unknown.
fn placeholder_value(key: &str, stats: &LeetCodeStats) -> Option<String> {
    let counter = match key {
        "stats.total_solved" => stats.total_solved,
        "stats.total_questions" => stats.total_questions,
        "stats.globalrank" | "stats.global_rank" => stats.global_rank,
        "stats.easy_solved" => stats.easy_solved,
        "stats.easy_total" => stats.easy_total,
        "stats.medium_solved" => stats.medium_solved,
        "stats.medium_total" => stats.medium_total,
        "stats.hard_solved" => stats.hard_solved,
        "stats.hard_total" => stats.hard_total,
        LANGUAGE_PLACEHOLDER => return Some(language_fragment(stats)),
        _ => return None,
    };
    Some(counter.to_string())
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// SVG `<text>` pairs for the most used languages, one row per language.
pub fn language_fragment(stats: &LeetCodeStats) -> String {
    stats
        .top_languages(TOP_LANGUAGE_COUNT)
        .iter()
        .zip((0u32..).map(|i| LANGUAGE_START_Y + i * LANGUAGE_STEP_Y))
        .map(|(lang, y)| {
            format!(
                "\n<text x=\"390\" y=\"{y}\" font-family=\"Arial, sans-serif\" font-size=\"20\" fill=\"#ffffff\">{}</text>\n<text x=\"550\" y=\"{y}\" font-family=\"Arial, sans-serif\" font-size=\"14\" fill=\"#ffffff\">{}</text>\n",
                escape_xml(&lang.name),
                lang.solved,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replace every `{{ key }}` in `template` with its value.
///
/// Unknown keys render as nothing. An unterminated `{{` is copied as is.
pub fn render_template(template: &str, stats: &LeetCodeStats) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        output.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            output.push_str(&rest[start..]);
            return output;
        };

        let key = after_open[..end].trim();
        match placeholder_value(key, stats) {
            Some(value) => output.push_str(&value),
            None => warn!(placeholder = key, "unknown template placeholder"),
        }
        rest = &after_open[end + 2..];
    }

    output.push_str(rest);
    output
}

/// Render the template file into the output file, replacing its contents.
pub fn render_file(
    template_path: &Path,
    output_path: &Path,
    stats: &LeetCodeStats,
) -> Result<String, AppError> {
    let template = fs::read_to_string(template_path)?;
    let rendered = render_template(&template, stats);

    if rendered.trim().is_empty() {
        warn!(template = %template_path.display(), "rendered SVG is empty, check the template");
    }

    fs::write(output_path, &rendered)?;
    info!(output = %output_path.display(), bytes = rendered.len(), "wrote SVG");
    Ok(rendered)
}
