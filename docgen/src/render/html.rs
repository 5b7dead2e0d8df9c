//! HTML fragments of a namespace page
//!
//! Pages use a two-column table layout: the left cell holds links to every
//! namespace page, the right cell the entries of this namespace. Class names
//! refer to the linked stylesheet.

use std::fmt::Write;

const HOLDING_DIV_STYLE: &str = "width: 100%; display: table;";
const ROW_DIV_STYLE: &str = "display: table-row";
const LEFT_COLUMN_STYLE: &str = "width: 200px; display: table-cell;";
const RIGHT_COLUMN_STYLE: &str = "display: table-cell;";

const NAV_LINK_CLASS: &str = "navLinks";
const HEADER_CLASS: &str = "basicHead";
const CLASS_HEADING_CLASS: &str = "classHead C";
const CLASS_SUMMARY_CLASS: &str = "simplePara C";
const PARAGRAPH_CLASS: &str = "simplePara";
const PARAM_NAME_CLASS: &str = "ParamName";
const PARAM_DESC_CLASS: &str = "ParamDesc";
const KEYWORD_CLASS: &str = "keyword";

const CLASS_DECORATION_STYLE: &str = "padding-right:25%;color:rgb(40,255,120);";
const MEMBER_DECORATION_STYLE: &str = "padding-right:25%;color:rgb(133, 245, 215);font-weight:549";

const TAB: &str = "&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;&nbsp;";

pub fn page_start(out: &mut String, title: &str, site_title: &str, stylesheet: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html><html lang=\"en\"><head><title>{} | {}</title>\
         <link rel=\"stylesheet\" href=\"{}\"><meta charset=\"UTF-8\"></head>\
         <body><div class=\"header\" id=\"top\">{}</div>\n",
        title,
        site_title,
        stylesheet,
        site_title.to_uppercase()
    );
    let _ = writeln!(
        out,
        "<div style=\"{}\"><div style=\"{}\"><div style=\"{}\">",
        HOLDING_DIV_STYLE, ROW_DIV_STYLE, LEFT_COLUMN_STYLE
    );
}

pub fn nav_entry(out: &mut String, namespace: &str, file_name: &str) {
    let _ = writeln!(
        out,
        "<div class=\"{}\"><a href=\"{}\">{}</a></div><br>",
        NAV_LINK_CLASS, file_name, namespace
    );
}

/// Close the navigation cell and open the content cell
pub fn content_start(out: &mut String) {
    let _ = writeln!(out, "</div><br><br><div style=\"{}\">", RIGHT_COLUMN_STYLE);
}

pub fn page_end(out: &mut String) {
    out.push_str("</div></div></div></body></html>\n");
}

pub fn class_heading(out: &mut String, name: &str, summary: &str, decorations: Option<&str>) {
    if let Some(decorations) = decorations {
        let _ = write!(
            out,
            "<pre class=\"C\" style=\"{}\">{}</pre>",
            CLASS_DECORATION_STYLE, decorations
        );
    }
    let _ = writeln!(
        out,
        "<h1 class=\"{}\">{}</h1><br><p class=\"{}\">{}</p>",
        CLASS_HEADING_CLASS, name, CLASS_SUMMARY_CLASS, summary
    );
}

/// `name (params)` heading of a method, constructor or operator
pub fn function_heading(out: &mut String, name: &str, params: &str, decorations: Option<&str>) {
    member_decorations(out, decorations);
    let _ = writeln!(out, "<h1 class=\"{}\">{} ({})</h1>", HEADER_CLASS, name, params);
}

/// Plain title of a field or property
pub fn summary_title(out: &mut String, title: &str, decorations: Option<&str>) {
    member_decorations(out, decorations);
    let _ = writeln!(out, "<p class=\"{}\">{}</p>", HEADER_CLASS, title);
}

pub fn paragraph(out: &mut String, text: &str) {
    let _ = writeln!(out, "<p class=\"{}\">{}</p>", PARAGRAPH_CLASS, text);
}

/// `Summary:`-style label followed by its paragraph
pub fn keyword_block(out: &mut String, label: &str, text: &str) {
    keyword(out, label);
    paragraph(out, text);
}

pub fn keyword(out: &mut String, label: &str) {
    let _ = writeln!(out, "<p class=\"{}\">{}</p>", KEYWORD_CLASS, label);
}

pub fn param_entry(out: &mut String, name: &str, description: &str) {
    let _ = writeln!(
        out,
        "<p class=\"{}\">{}: </p><p class=\"{}\">{}{}</p>",
        PARAM_NAME_CLASS, name, PARAM_DESC_CLASS, TAB, description
    );
}

fn member_decorations(out: &mut String, decorations: Option<&str>) {
    if let Some(decorations) = decorations {
        let _ = write!(
            out,
            "<br><pre style=\"{}\">{}</pre>",
            MEMBER_DECORATION_STYLE, decorations
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_frame() {
        let mut out = String::new();
        page_start(&mut out, "Kinetic", "MW Unity Namespace", "CSS/site.css");
        nav_entry(&mut out, "Kinetic", "Kinetic.html");
        content_start(&mut out);
        page_end(&mut out);

        assert!(out.starts_with("<!DOCTYPE html>"));
        assert!(out.contains("<title>Kinetic | MW Unity Namespace</title>"));
        assert!(out.contains("href=\"CSS/site.css\""));
        assert!(out.contains(">MW UNITY NAMESPACE</div>"));
        assert!(out.contains("<a href=\"Kinetic.html\">Kinetic</a>"));
        assert!(out.ends_with("</body></html>\n"));
    }

    #[test]
    fn test_decorations_only_when_present() {
        let mut plain = String::new();
        function_heading(&mut plain, "Move", "float x", None);
        assert_eq!(plain, "<h1 class=\"basicHead\">Move (float x)</h1>\n");

        let mut decorated = String::new();
        class_heading(&mut decorated, "Body", "A body.", Some("[Serializable]"));
        assert!(decorated.starts_with("<pre class=\"C\""));
        assert!(decorated.contains("[Serializable]</pre><h1"));
    }

    #[test]
    fn test_param_entry() {
        let mut out = String::new();
        param_entry(&mut out, "force", "The force.");
        assert!(out.contains(">force: </p>"));
        assert!(out.contains(&format!("{}The force.", TAB)));
    }
}
