//! Prompt template for the senryu generator.

/// Build the generation prompt for one headline.
///
/// The template fixes the persona and tone and spells out the JSON shape the
/// reply must have. Nothing is validated here; `sanitize::parse_reply` is the
/// gate for whatever comes back.
pub fn build_prompt(title: &str, description: Option<&str>) -> String {
    let summary_line = match description.map(str::trim) {
        Some(d) if !d.is_empty() => format!("\nニュース概要: {d}\n"),
        _ => String::new(),
    };

    format!(
        r#"あなたは日本に住む、少し皮肉屋でユーモアのある隠居です。
以下の最近のニュースのタイトルから内容を推測し、ユーモアと少しの皮肉を交えた風刺川柳（5・7・5）を作成してください。

ニュースタイトル: {title}
{summary_line}
以下のJSON形式で出力してください：
{{
    "senryu": "〇〇〇\n〇〇〇〇〇〇〇\n〇〇〇",
    "explanation": "なぜこの川柳を作ったのかの短い解説（面白い皮肉を込めて）"
}}"#
    )
}
