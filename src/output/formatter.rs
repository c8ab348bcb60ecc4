//! Output formatters: console, JSON, Markdown and HTML renderings of a report

use crate::config::OutputFormat;
use crate::error::{Result, ResumeAnalyzerError};
use crate::output::report::AnalysisReport;
use crate::output::view::{format_section_name, keyword_chips, AnalysisView, ScoreTier};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured output
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
    detailed: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .badge { display: inline-block; padding: 4px 12px; border-radius: 12px; font-weight: bold; color: white; }
        .tier-excellent { background: #22c55e; }
        .tier-good { background: #3b82f6; }
        .tier-average { background: #eab308; color: #000; }
        .tier-poor { background: #ef4444; }
        .bar { background: #e5e7eb; border-radius: 6px; height: 10px; }
        .bar > div { height: 10px; border-radius: 6px; }
        .chip { display: inline-block; padding: 2px 10px; margin: 2px; border-radius: 10px; background: #e9ecef; }
        .chip.missing { background: #fee2e2; }
        .section { margin: 25px 0; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <h1>Resume Analysis Report</h1>
        <p>Generated: {{ generated_at }}</p>

        <div class="section">
            <h2>Overall Score</h2>
            <p><strong>{{ overall_score }}/100</strong> <span class="badge {{ overall_class }}">{{ overall_label }}</span></p>
        </div>

        <div class="section">
            <h2>Keyword Match</h2>
            <p>{{ keyword_percentage }}% <span class="badge {{ keyword_class }}">{{ keyword_label }}</span></p>
            <div class="bar"><div class="{{ keyword_class }}" style="width: {{ keyword_percentage }}%"></div></div>
            <p>Matched:
            {% for keyword in matched %}<span class="chip">{{ keyword }}</span>{% endfor %}
            {% if matched.is_empty() %}<em>None</em>{% endif %}</p>
            <p>Missing:
            {% for keyword in missing %}<span class="chip missing">{{ keyword }}</span>{% endfor %}
            {% if missing.is_empty() %}<em>None</em>{% endif %}</p>
        </div>

        <div class="section">
            <h2>Strengths</h2>
            <ul>{% for item in strengths %}<li>{{ item }}</li>{% endfor %}</ul>
        </div>

        <div class="section">
            <h2>Section Analysis</h2>
            {% for section in sections %}
            <details>
                <summary>{{ section.name }} <span class="badge {{ section.class }}">{{ section.score }}/100</span></summary>
                {% if section.feedback.is_empty() %}
                <p><em>No specific feedback for this section.</em></p>
                {% else %}
                <ul>{% for item in section.feedback %}<li>{{ item }}</li>{% endfor %}</ul>
                {% endif %}
            </details>
            {% endfor %}
        </div>

        <div class="section">
            <h2>Improvements</h2>
            <ul>{% for item in improvements %}<li>{{ item }}</li>{% endfor %}</ul>
        </div>

        {% if has_job_description %}
        <div class="section">
            <h2>Job Description</h2>
            <blockquote>{{ job_description }}</blockquote>
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>Generated by Resume Analyzer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Processing time:</strong> {{ processing_time }}ms</p>
        </div>
    </div>
</body>
</html>"#,
    ext = "html"
)]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    overall_score: u8,
    overall_class: &'static str,
    overall_label: &'static str,
    keyword_percentage: u8,
    keyword_class: &'static str,
    keyword_label: &'static str,
    matched: Vec<String>,
    missing: Vec<String>,
    strengths: Vec<String>,
    sections: Vec<HtmlSection>,
    improvements: Vec<String>,
    has_job_description: bool,
    job_description: String,
    version: String,
    resume_file: String,
    processing_time: u64,
}

#[derive(Debug, Clone)]
struct HtmlSection {
    name: String,
    score: u8,
    class: &'static str,
    feedback: Vec<String>,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: u8) -> String {
        let tier = ScoreTier::from_score(score);
        if self.use_colors {
            format!("[{}]", tier.label().color(tier.color()).bold())
        } else {
            format!("[{}]", tier.label())
        }
    }

    fn format_bar(&self, percentage: u8) -> String {
        const WIDTH: usize = 20;
        let filled = (percentage.min(100) as usize * WIDTH) / 100;
        let bar = format!("{}{}", "█".repeat(filled), "░".repeat(WIDTH - filled));
        self.colorize(&bar, ScoreTier::from_score(percentage).color())
    }

    fn format_chips(&self, keywords: &[String], color: Color) -> String {
        if keywords.is_empty() {
            return self.colorize("None", Color::BrightBlack);
        }
        let (shown, hidden) = keyword_chips(keywords);
        let mut line = shown
            .iter()
            .map(|k| self.colorize(k, color))
            .collect::<Vec<_>>()
            .join(", ");
        if hidden > 0 {
            line.push_str(&format!(" +{} more", hidden));
        }
        line
    }

    /// Render the panel the store state calls for: a loading note, the
    /// empty-state prompt, or the full report.
    pub fn format_view(&self, view: &AnalysisView<'_>, report: Option<&AnalysisReport>) -> Result<String> {
        match (view, report) {
            (AnalysisView::Loading, _) => Ok(format!(
                "{}\n",
                self.colorize("Analyzing your resume...", Color::Cyan)
            )),
            (AnalysisView::Results(_), Some(report)) => self.format_report(report),
            _ => Ok("No analysis yet. Upload your resume and optionally a job description to get detailed feedback.\n".to_string()),
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Resume: {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.resume_file
        ));

        output.push_str(&self.format_header("Overall Score", 2));
        output.push_str(&format!(
            "{}/100 {}\n",
            analysis.overall_score,
            self.format_score_badge(analysis.overall_score)
        ));

        output.push_str(&self.format_header("🎯 Keyword Match", 2));
        let keyword_match = &analysis.keyword_match;
        output.push_str(&format!(
            "{} {}% {}\n",
            self.format_bar(keyword_match.percentage),
            keyword_match.percentage,
            self.format_score_badge(keyword_match.percentage)
        ));
        output.push_str(&format!(
            "  Matched: {}\n",
            self.format_chips(&keyword_match.matched, Color::Green)
        ));
        output.push_str(&format!(
            "  Missing: {}\n",
            self.format_chips(&keyword_match.missing, Color::Red)
        ));

        if !analysis.strengths.is_empty() {
            output.push_str(&self.format_header("✅ Key Strengths", 3));
            for strength in &analysis.strengths {
                output.push_str(&format!("  • {}\n", self.colorize(strength, Color::Green)));
            }
        }

        output.push_str(&self.format_header("📋 Section Analysis", 2));
        for (section, score) in &analysis.section_scores {
            output.push_str(&format!(
                "{} {}/100 {}\n",
                format_section_name(section),
                score,
                self.format_score_badge(*score)
            ));
            if self.detailed {
                let feedback = analysis.suggestions_for(section);
                if feedback.is_empty() {
                    output.push_str(&format!(
                        "  {}\n",
                        self.colorize("No specific feedback for this section.", Color::BrightBlack)
                    ));
                }
                for item in feedback {
                    output.push_str(&format!("  - {}\n", item));
                }
            }
        }

        if !analysis.improvements.is_empty() {
            output.push_str(&self.format_header("🚀 Improvement Suggestions", 3));
            for improvement in &analysis.improvements {
                output.push_str(&format!("  • {}\n", self.colorize(improvement, Color::Yellow)));
            }
        }

        if let Some(job) = &report.job_description {
            if self.detailed {
                output.push_str(&self.format_header("💼 Job Description", 3));
                output.push_str(&format!("{}\n", job.trim()));
            }
        }

        output.push_str(&format!(
            "\n{} Generated by Resume Analyzer v{} | Processing time: {}ms\n",
            self.colorize("ℹ️", Color::Blue),
            report.metadata.analyzer_version,
            report.metadata.processing_time_ms
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool, detailed: bool) -> Self {
        Self {
            include_metadata,
            detailed,
        }
    }

    fn feedback_list(feedback: &[String]) -> String {
        if feedback.is_empty() {
            return "_No specific feedback for this section._\n\n".to_string();
        }
        let mut list: String = feedback.iter().map(|item| format!("- {}\n", item)).collect();
        list.push('\n');
        list
    }

    fn keyword_line(keywords: &[String]) -> String {
        if keywords.is_empty() {
            "_None_".to_string()
        } else {
            format!("`{}`", keywords.join("`, `"))
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let analysis = &report.analysis;
        let mut output = String::from("# 📊 Resume Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Resume:** {} | **Generated:** {}\n\n",
                report.metadata.resume_file,
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
        }

        output.push_str("## Overall Score\n\n");
        output.push_str(&format!(
            "**{}/100** {}\n\n",
            analysis.overall_score,
            ScoreTier::from_score(analysis.overall_score).markdown_badge()
        ));

        let keyword_match = &analysis.keyword_match;
        output.push_str("## Keyword Match\n\n");
        output.push_str(&format!(
            "**{}%** {}\n\n",
            keyword_match.percentage,
            ScoreTier::from_score(keyword_match.percentage).markdown_badge()
        ));
        output.push_str(&format!("- **Matched:** {}\n", Self::keyword_line(&keyword_match.matched)));
        output.push_str(&format!("- **Missing:** {}\n\n", Self::keyword_line(&keyword_match.missing)));

        if !analysis.strengths.is_empty() {
            output.push_str("## ✅ Strengths\n\n");
            for strength in &analysis.strengths {
                output.push_str(&format!("- {}\n", strength));
            }
            output.push('\n');
        }

        output.push_str("## Section Analysis\n\n");
        output.push_str("| Section | Score | Rating |\n|---|---|---|\n");
        for (section, score) in &analysis.section_scores {
            output.push_str(&format!(
                "| {} | {}/100 | {} |\n",
                format_section_name(section),
                score,
                ScoreTier::from_score(*score).markdown_badge()
            ));
        }
        output.push('\n');

        // Collapsed sections fold into <details>, which GitHub-flavored
        // Markdown renders closed.
        for section in analysis.section_scores.keys() {
            let name = format_section_name(section);
            let feedback = Self::feedback_list(analysis.suggestions_for(section));
            if self.detailed {
                output.push_str(&format!("### {}\n\n{}", name, feedback));
            } else {
                output.push_str(&format!(
                    "<details>\n<summary>{}</summary>\n\n{}</details>\n\n",
                    name, feedback
                ));
            }
        }

        if !analysis.improvements.is_empty() {
            output.push_str("## 🚀 Improvements\n\n");
            for (i, improvement) in analysis.improvements.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, improvement));
            }
            output.push('\n');
        }

        if let Some(job) = &report.job_description {
            output.push_str("## 💼 Job Description\n\n");
            for line in job.trim().lines() {
                output.push_str(&format!("> {}\n", line));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str(&format!(
                "---\n_Generated by Resume Analyzer v{} in {}ms_\n",
                report.metadata.analyzer_version, report.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let analysis = &report.analysis;
        let overall_tier = ScoreTier::from_score(analysis.overall_score);
        let keyword_tier = ScoreTier::from_score(analysis.keyword_match.percentage);

        let sections = analysis
            .section_scores
            .iter()
            .map(|(name, score)| HtmlSection {
                name: format_section_name(name),
                score: *score,
                class: ScoreTier::from_score(*score).css_class(),
                feedback: analysis.suggestions_for(name).to_vec(),
            })
            .collect();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report
                .metadata
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            overall_score: analysis.overall_score,
            overall_class: overall_tier.css_class(),
            overall_label: overall_tier.label(),
            keyword_percentage: analysis.keyword_match.percentage,
            keyword_class: keyword_tier.css_class(),
            keyword_label: keyword_tier.label(),
            matched: analysis.keyword_match.matched.clone(),
            missing: analysis.keyword_match.missing.clone(),
            strengths: analysis.strengths.clone(),
            sections,
            improvements: analysis.improvements.clone(),
            has_job_description: report.job_description.is_some(),
            job_description: report.job_description.clone().unwrap_or_default(),
            version: report.metadata.analyzer_version.clone(),
            resume_file: report.metadata.resume_file.clone(),
            processing_time: report.metadata.processing_time_ms,
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeAnalyzerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata, detailed),
            html_formatter: HtmlFormatter::new(include_html_styles),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }

    pub fn console(&self) -> &ConsoleFormatter {
        &self.console_formatter
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}
