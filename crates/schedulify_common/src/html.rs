//! Minimal HTML helpers shared by the page handlers.

use axum::response::Html;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
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

/// Escapes text and turns line breaks into `<br>` tags.
pub fn escape_multiline(input: &str) -> String {
    input
        .split("\r\n")
        .flat_map(|chunk| chunk.split('\n'))
        .map(escape)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Wraps an already-rendered body in the site layout.
///
/// `title` is escaped, `body` is inserted as is.
pub fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="utf-8">
<title>{title} - Schedulify</title>
</head>
<body>
<header><a href="/">Schedulify</a></header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#39;y&#39;&lt;/script&gt;"
        );
        assert_eq!(escape("テスト予定1"), "テスト予定1");
    }

    #[test]
    fn multiline_keeps_each_line() {
        assert_eq!(
            escape_multiline("テストメモ1\r\nテストメモ2\n<b>"),
            "テストメモ1<br>テストメモ2<br>&lt;b&gt;"
        );
    }

    #[test]
    fn page_escapes_title_only() {
        let Html(html) = page("<t>", "<p>body</p>");
        assert!(html.contains("<title>&lt;t&gt; - Schedulify</title>"));
        assert!(html.contains("<p>body</p>"));
    }
}
