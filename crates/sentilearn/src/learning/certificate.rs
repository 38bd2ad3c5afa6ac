use super::domain::Certificate;

/// Printable HTML page for an issued certificate.
pub fn render_certificate_html(certificate: &Certificate) -> String {
    let recipient = escape_html(&certificate.user_name);
    let course = escape_html(&certificate.course_name);
    let issued_on = certificate.issue_date.format("%B %-d, %Y");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Certificate of Completion</title>
    <style>
        body {{
            font-family: 'Georgia', serif;
            margin: 0;
            padding: 40px;
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
        }}
        .certificate {{
            background: white;
            padding: 60px;
            border-radius: 20px;
            text-align: center;
            max-width: 800px;
            border: 8px solid #f0f0f0;
        }}
        .header {{ color: #667eea; font-size: 48px; font-weight: bold; text-transform: uppercase; letter-spacing: 4px; }}
        .subtitle {{ color: #666; font-size: 24px; margin-bottom: 40px; }}
        .lead {{ font-size: 20px; color: #666; margin: 30px 0; }}
        .recipient {{ font-size: 36px; color: #333; margin: 30px 0; font-style: italic; }}
        .course {{ font-size: 28px; color: #667eea; font-weight: bold; margin: 30px 0; }}
        .details {{ font-size: 18px; color: #666; margin: 20px 0; }}
        .score {{ font-size: 24px; color: #28a745; font-weight: bold; margin: 20px 0; }}
        .date {{ font-size: 16px; color: #999; margin-top: 40px; }}
        .footer {{ margin-top: 50px; padding-top: 30px; border-top: 2px solid #eee; color: #666; font-size: 14px; }}
        @media print {{
            body {{ background: white; padding: 0; }}
            .certificate {{ border: 2px solid #333; }}
        }}
    </style>
</head>
<body>
    <div class="certificate">
        <div class="header">Certificate</div>
        <div class="subtitle">of Achievement</div>
        <div class="lead">This is to certify that</div>
        <div class="recipient">{recipient}</div>
        <div class="lead">has successfully completed</div>
        <div class="course">{course}</div>
        <div class="details">
            Successfully completed {modules} learning modules<br>
            and demonstrated proficiency in sentiment analysis concepts
        </div>
        <div class="score">Final Score: {score}%</div>
        <div class="date">Issued on {issued_on}</div>
        <div class="footer">
            <div>SentiLearn - Sentiment Analysis Education Platform</div>
            <div>Certificate ID: {id}</div>
        </div>
    </div>
    <script>
        window.onload = function () {{ setTimeout(function () {{ window.print(); }}, 1000); }};
    </script>
</body>
</html>
"#,
        modules = certificate.modules,
        score = certificate.score,
        id = escape_html(&certificate.id.0),
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
