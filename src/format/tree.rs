//! Tree rendering for the listing output.
//!
//! Renders sprint buckets and status groups as an indented tree with
//! iconography. Everything is built into one string and printed once,
//! so a failure can never leave partial output behind.

use crate::config::status::StatusCategory;
use crate::format::{sprint_buckets, status_groups};
use crate::model::Issue;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Hard cap on issue summaries, in display columns.
const SUMMARY_WIDTH: usize = 45;
/// Subtask lines get a tighter cap.
const SUBTASK_SUMMARY_WIDTH: usize = 40;

const SPRINT_RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const LEGEND: &str =
    "범례: ✅ 완료 | 🔄 진행중 | ⬜ 할일 | 👀 리뷰 | ❌ DROP | 👤 담당자 | ← 상위티켓";

/// Status-group headers, in grouping precedence order.
const fn group_title(category: StatusCategory) -> &'static str {
    match category {
        StatusCategory::InProgress => "🔄 진행중",
        StatusCategory::InReview => "👀 리뷰",
        StatusCategory::Todo => "⬜ 해야 할 일",
        StatusCategory::Done => "✅ 완료",
        StatusCategory::Other => "📌 기타",
    }
}

/// Truncate to a display width, appending an ellipsis when cut.
#[must_use]
pub fn truncate_summary(text: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(text) <= max_width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if width + char_width > max_width {
            break;
        }
        out.push(c);
        width += char_width;
    }
    out.push_str("...");
    out
}

fn issue_lines(out: &mut String, issue: &Issue, base_url: &str, indent: &str, is_last: bool) {
    let prefix = if is_last { "└─" } else { "├─" };
    let child_prefix = if is_last { "   " } else { "│  " };

    let assignee = issue
        .assignee
        .as_deref()
        .filter(|name| *name != "Unknown")
        .map(|name| format!(" 👤 {name}"))
        .unwrap_or_default();

    let parent = issue
        .parent
        .as_ref()
        .map(|p| format!(" ← {}", p.key))
        .unwrap_or_default();

    let summary = truncate_summary(&issue.summary, SUMMARY_WIDTH);
    out.push_str(&format!(
        "{indent}{prefix} {}: {summary}{assignee}{parent}\n",
        issue.key
    ));
    out.push_str(&format!(
        "{indent}{child_prefix}  🔗 {base_url}/browse/{}\n",
        issue.key
    ));

    if let Some(subtasks) = &issue.subtasks {
        for (i, sub) in subtasks.iter().enumerate() {
            let sub_prefix = if i + 1 == subtasks.len() {
                "└─"
            } else {
                "├─"
            };
            let icon = StatusCategory::icon(&sub.status);
            let label = StatusCategory::short_label(&sub.status);
            let sub_summary = truncate_summary(&sub.summary, SUBTASK_SUMMARY_WIDTH);
            out.push_str(&format!(
                "{indent}{child_prefix}{sub_prefix} {icon} {}: {sub_summary} ({label})\n",
                sub.key
            ));
        }
    }
}

fn render_status_groups(out: &mut String, issues: &[&Issue], base_url: &str, indent: &str) {
    for (category, members) in status_groups(issues) {
        out.push_str(&format!(
            "{indent}{} ({}건)\n",
            group_title(category),
            members.len()
        ));
        for (i, issue) in members.iter().enumerate() {
            issue_lines(out, issue, base_url, indent, i + 1 == members.len());
        }
        out.push('\n');
    }
}

/// Render the full listing tree.
#[must_use]
pub fn render_tree(issues: &[Issue], base_url: &str, use_color: bool) -> String {
    let buckets = sprint_buckets(issues);
    let mut out = String::new();

    out.push_str(&format!("\n📋 티켓 목록 ({}건)\n\n", issues.len()));

    if buckets.len() <= 1 {
        // A single bucket renders its status groups directly.
        if let Some((_, members)) = buckets.first() {
            render_status_groups(&mut out, members, base_url, "");
        }
    } else {
        for (sprint_name, members) in &buckets {
            let header = format!("🏃 {sprint_name} ({}건)", members.len());
            let header = if use_color {
                header.bold().to_string()
            } else {
                header
            };
            out.push_str(SPRINT_RULE);
            out.push('\n');
            out.push_str(&header);
            out.push('\n');
            out.push_str(SPRINT_RULE);
            out.push_str("\n\n");
            render_status_groups(&mut out, members, base_url, "  ");
        }
    }

    out.push_str(LEGEND);
    out.push('\n');
    out
}
