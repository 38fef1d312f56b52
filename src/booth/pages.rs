// HTML rendering of the pages.

use voting_registry::{Candidate, VoteLogEntry};

/// Escapes the characters that are significant in HTML text and attribute values.
pub fn escape(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            '\'' => res.push_str("&#39;"),
            c => res.push(c),
        }
    }
    res
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><meta charset="utf-8"><title>{title}</title></head>
<body>
<h1>{title}</h1>
{body}
<p><a href="/">Home</a></p>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn status(message: Option<&str>) -> String {
    match message {
        Some(m) => format!("<p class=\"message\">{}</p>\n", escape(m)),
        None => String::new(),
    }
}

fn form(action: &str, fields: &[(&str, &str)]) -> String {
    let mut inputs = String::new();
    for (name, label) in fields {
        inputs.push_str(&format!(
            "<label>{label}: <input name=\"{name}\" required></label><br>\n",
            label = label,
            name = name
        ));
    }
    format!(
        "<form method=\"post\" action=\"{}\">\n{}<button type=\"submit\">Submit</button>\n</form>\n",
        action, inputs
    )
}

pub fn index() -> String {
    layout(
        "Voting System",
        r#"<ul>
<li><a href="/register_voter">Register a voter</a></li>
<li><a href="/register_candidate">Register a candidate</a></li>
<li><a href="/cast_vote">Cast a vote</a></li>
<li><a href="/results">Results</a></li>
<li><a href="/logs">Logs</a></li>
</ul>"#,
    )
}

pub fn register_voter(message: Option<&str>) -> String {
    let body = status(message)
        + &form(
            "/register_voter",
            &[("voter_id", "Voter ID"), ("name", "Name")],
        );
    layout("Register Voter", &body)
}

pub fn register_candidate(message: Option<&str>) -> String {
    let body = status(message)
        + &form(
            "/register_candidate",
            &[("candidate_id", "Voter ID"), ("name", "Name")],
        );
    layout("Register Candidate", &body)
}

pub fn cast_vote(message: Option<&str>, candidates: &[Candidate]) -> String {
    let mut body = status(message);
    body.push_str("<h2>Candidates</h2>\n<ul>\n");
    for c in candidates {
        body.push_str(&format!(
            "<li>{}: {}</li>\n",
            c.candidate_id,
            escape(&c.name)
        ));
    }
    body.push_str("</ul>\n");
    body.push_str(&form(
        "/cast_vote",
        &[("voter_id", "Voter ID"), ("candidate_id", "Candidate ID")],
    ));
    layout("Cast Vote", &body)
}

pub fn results(results: &[(String, u64)]) -> String {
    let mut body = String::from("<table>\n<tr><th>Candidate</th><th>Votes</th></tr>\n");
    for (name, votes) in results {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td></tr>\n",
            escape(name),
            votes
        ));
    }
    body.push_str("</table>\n");
    layout("Results", &body)
}

pub fn logs(logs: &[VoteLogEntry]) -> String {
    let mut body = String::from("<ol>\n");
    for entry in logs {
        body.push_str(&format!("<li>{}</li>\n", escape(&entry.to_string())));
    }
    body.push_str("</ol>\n");
    layout("Logs", &body)
}

pub fn error(message: &str) -> String {
    layout("Error", &status(Some(message)))
}
