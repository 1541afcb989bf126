//! Figma document fixtures and rendered content

use serde_json::{Value, json};

/// Token every fixture profile carries
pub const TEST_TOKEN: &str = "fig_integration";

/// File id every fixture profile targets
pub const TEST_FILE_ID: &str = "FILEINT";

/// Node id of the n-th icon
pub fn icon_id(n: usize) -> String {
    format!("1:{}", n)
}

/// `GET /files/{id}` body with a page `Icons` holding one leaf per name
///
/// Node ids follow list order (`1:0`, `1:1`, ...).
pub fn icons_file(names: &[&str]) -> Value {
    let children: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(n, name)| json!({ "id": icon_id(n), "name": name, "type": "COMPONENT" }))
        .collect();

    json!({
        "name": "Design System",
        "document": {
            "id": "0:0",
            "name": "Document",
            "children": [
                { "id": "0:1", "name": "Cover", "children": [] },
                { "id": "0:2", "name": "Icons", "children": children }
            ]
        }
    })
}

/// Names `icon-0` .. `icon-<count-1>`
pub fn numbered_names(count: usize) -> Vec<String> {
    (0..count).map(|n| format!("icon-{}", n)).collect()
}

/// Rendered content served for the n-th icon
pub fn svg_for(n: usize) -> String {
    format!("<svg id=\"icon-{}\"/>", n)
}
