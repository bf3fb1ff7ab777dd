use std::fmt::Write;

use super::PanelModel;

/// Escape text for element content and double-quoted attributes.
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

/// Render the panel as the HTML fragment injected next to the game view.
pub fn render_html(panel: &PanelModel) -> String {
    let mut html = String::from("<div class=\"farmrpg-ext-sidebar\">\n");

    for row in &panel.rows {
        let mut classes = String::from("farmrpg-ext-row");
        if let Some(class) = &row.class {
            classes.push(' ');
            classes.push_str(class);
        }
        let _ = write!(html, "  <div class=\"{}\"", escape(&classes));
        if let Some(click) = &row.click {
            let _ = write!(html, " data-click=\"{}\"", escape(click));
        }
        html.push_str(">\n");
        let _ = writeln!(
            html,
            "    <img class=\"farmrpg-ext-image\" src=\"{}\">",
            escape(&row.image)
        );
        let _ = writeln!(
            html,
            "    <span class=\"farmrpg-ext-title\">{}</span>",
            escape(&row.title)
        );
        match row.status {
            Some(status) => {
                let _ = writeln!(
                    html,
                    "    <span class=\"farmrpg-ext-value farmrpg-ext-{}\">{}</span>",
                    status.as_str(),
                    escape(&row.value)
                );
            }
            None => {
                let _ = writeln!(html, "    <span class=\"farmrpg-ext-value\">{}</span>", escape(&row.value));
            }
        }
        html.push_str("  </div>\n");
    }

    let crop_class = if panel.timer.is_ready() {
        "farmrpg-ext-crop farmrpg-ext-crop-done"
    } else {
        "farmrpg-ext-crop"
    };
    let _ = writeln!(
        html,
        "  <div class=\"{}\" data-click=\"farm\"><img src=\"{}\"><span>{}</span></div>",
        crop_class,
        escape(panel.timer.image()),
        escape(&panel.timer.label())
    );
    let _ = writeln!(
        html,
        "  <div class=\"farmrpg-ext-capacity\">Max {}</div>",
        panel.max_inventory
    );
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sidebar::{Countdown, CropTimer, PanelRow, RowStatus};

    fn row(title: &str, status: Option<RowStatus>) -> PanelRow {
        PanelRow {
            image: "/img/items/6143.PNG".to_string(),
            title: title.to_string(),
            value: "850".to_string(),
            status,
            class: None,
            click: Some(format!("item:{}", title)),
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn max_status_and_capacity_use_distinct_classes() {
        let panel = PanelModel {
            rows: vec![row("Board", Some(RowStatus::Max))],
            max_inventory: 850,
            timer: CropTimer::Empty,
        };
        let html = render_html(&panel);
        assert_eq!(html.matches("farmrpg-ext-max").count(), 1);
        assert!(html.contains("farmrpg-ext-value farmrpg-ext-max\">850<"));
    }

    #[test]
    fn ready_crop_is_marked_and_clickable() {
        let panel = PanelModel {
            rows: Vec::new(),
            max_inventory: 100,
            timer: CropTimer::Pending {
                image: "/img/items/8297.png".to_string(),
                countdown: Countdown::Ready,
            },
        };
        let html = render_html(&panel);
        assert!(html.contains(
            "<div class=\"farmrpg-ext-crop farmrpg-ext-crop-done\" data-click=\"farm\">"
        ));
        assert!(html.contains("<span>READY</span>"));

        let pending = PanelModel {
            timer: CropTimer::Pending {
                image: "/img/items/8297.png".to_string(),
                countdown: Countdown::Minutes(45),
            },
            ..panel
        };
        let html = render_html(&pending);
        assert!(html.contains("<div class=\"farmrpg-ext-crop\" data-click=\"farm\">"));
        assert!(html.contains("<span>45m</span>"));
    }

    #[test]
    fn rows_and_status_classes() {
        let panel = PanelModel {
            rows: vec![row("Wood", Some(RowStatus::Warning)), row("Fish & Chips", None)],
            max_inventory: 1000,
            timer: CropTimer::Empty,
        };
        let html = render_html(&panel);
        assert!(html.contains("farmrpg-ext-value farmrpg-ext-warning\">850<"));
        assert!(html.contains("data-click=\"item:Wood\""));
        assert!(html.contains("Fish &amp; Chips"));
        assert!(html.contains("<span>Empty</span>"));
        assert!(html.contains("<div class=\"farmrpg-ext-capacity\">Max 1000</div>"));
        assert!(!html.contains("farmrpg-ext-crop-done"));
        assert!(html.find("Wood").unwrap() < html.find("Fish").unwrap());
    }
}
