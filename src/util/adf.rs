//! Atlassian Document Format to plain text.
//!
//! Descriptions and comments arrive as ADF trees. This flattens the
//! common node types; anything unrecognized contributes its text
//! content and nothing else.

use serde_json::Value;

/// Flatten an ADF document into readable plain text.
#[must_use]
pub fn adf_to_text(adf: &Value) -> String {
    let Some(blocks) = adf.get("content").and_then(Value::as_array) else {
        return String::new();
    };

    let mut out = String::new();
    for block in blocks {
        let text = collect_text(block);
        match block.get("type").and_then(Value::as_str) {
            Some("paragraph" | "heading") => {
                out.push_str(&text);
                out.push('\n');
            }
            Some(list_type @ ("bulletList" | "orderedList")) => {
                let items = block.get("content").and_then(Value::as_array);
                for (i, item) in items.into_iter().flatten().enumerate() {
                    if list_type == "orderedList" {
                        out.push_str(&format!("{}. ", i + 1));
                    } else {
                        out.push_str("- ");
                    }
                    out.push_str(&collect_text(item));
                    out.push('\n');
                }
            }
            Some("codeBlock") => {
                out.push_str("```\n");
                out.push_str(&text);
                out.push_str("\n```\n");
            }
            _ => out.push_str(&text),
        }
    }

    out.trim().to_string()
}

fn collect_text(node: &Value) -> String {
    if node.get("type").and_then(Value::as_str) == Some("text") {
        return node
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
    }
    if node.get("type").and_then(Value::as_str) == Some("hardBreak") {
        return "\n".to_string();
    }
    node.get("content")
        .and_then(Value::as_array)
        .map(|children| children.iter().map(collect_text).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paragraphs_and_hard_breaks() {
        let adf = json!({
            "type": "doc",
            "version": 1,
            "content": [
                { "type": "paragraph", "content": [
                    { "type": "text", "text": "first" },
                    { "type": "hardBreak" },
                    { "type": "text", "text": "second" }
                ]},
                { "type": "paragraph", "content": [
                    { "type": "text", "text": "third" }
                ]}
            ]
        });
        assert_eq!(adf_to_text(&adf), "first\nsecond\nthird");
    }

    #[test]
    fn test_lists_and_code_blocks() {
        let adf = json!({
            "content": [
                { "type": "bulletList", "content": [
                    { "type": "listItem", "content": [
                        { "type": "paragraph", "content": [{ "type": "text", "text": "one" }] }
                    ]},
                    { "type": "listItem", "content": [
                        { "type": "paragraph", "content": [{ "type": "text", "text": "two" }] }
                    ]}
                ]},
                { "type": "orderedList", "content": [
                    { "type": "listItem", "content": [
                        { "type": "paragraph", "content": [{ "type": "text", "text": "step" }] }
                    ]}
                ]},
                { "type": "codeBlock", "content": [{ "type": "text", "text": "let x = 1;" }] }
            ]
        });
        let text = adf_to_text(&adf);
        assert!(text.contains("- one\n- two"));
        assert!(text.contains("1. step"));
        assert!(text.contains("```\nlet x = 1;\n```"));
    }

    #[test]
    fn test_empty_or_missing_content() {
        assert_eq!(adf_to_text(&json!(null)), "");
        assert_eq!(adf_to_text(&json!({ "type": "doc" })), "");
    }
}
