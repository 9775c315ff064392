//! Server-rendered HTML pages.

use std::fmt::Write;

use crate::{
    analysis::{RankedCounts, TasteAnalysis},
    types::{TimeWindow, UserProfile},
    utils::escape_html,
};

const STYLE: &str = "body{font-family:system-ui,sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem;background:#121212;color:#eee}\
a{color:#1db954}input,button{font-size:1rem;padding:.5rem}button{background:#1db954;border:0;border-radius:4px;color:#000;cursor:pointer}\
table{border-collapse:collapse;width:100%}td,th{border-bottom:1px solid #333;padding:.3rem;text-align:left}\
.windows{display:grid;grid-template-columns:repeat(3,1fr);gap:1rem}.roast{white-space:pre-wrap;background:#1e1e1e;padding:1rem;border-radius:6px}\
.avatar{width:96px;height:96px;border-radius:50%}";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}\n</body>\n</html>\n",
        title = escape_html(title),
    )
}

pub fn entry_page() -> String {
    layout(
        "vibecheck",
        "<h1>vibecheck</h1>\n\
<p>Paste your Spotify profile link or user id and get your music taste roasted.</p>\n\
<form method=\"post\" action=\"/auth\">\n\
<input type=\"text\" name=\"user_id\" placeholder=\"https://open.spotify.com/user/...\" required>\n\
<button type=\"submit\">Check my vibe</button>\n\
</form>",
    )
}

pub struct ResultsView<'a> {
    pub profile: &'a UserProfile,
    pub requested_user_id: Option<&'a str>,
    pub analysis: &'a TasteAnalysis,
    pub commentary: &'a str,
}

pub fn results_page(view: &ResultsView<'_>) -> String {
    let mut body = String::new();

    body.push_str(&profile_section(view.profile, view.requested_user_id));

    let _ = write!(
        body,
        "<h2>The roast</h2>\n<div class=\"roast\">{}</div>\n",
        escape_html(view.commentary)
    );

    body.push_str("<h2>Top genres</h2>\n");
    body.push_str(&windows_section(|w| view.analysis.top_genres.get(&w)));

    body.push_str("<h2>Top artists</h2>\n");
    body.push_str(&windows_section(|w| view.analysis.top_artists.get(&w)));

    body.push_str(&popularity_section(view.analysis));
    body.push_str(&evolution_section(view.analysis));

    body.push_str("<p><a href=\"/logout\">Log out</a> · <a href=\"/\">Start over</a></p>");

    layout(&format!("vibecheck · {}", view.profile.name()), &body)
}

fn profile_section(profile: &UserProfile, requested: Option<&str>) -> String {
    let mut out = String::from("<section>\n");
    if let Some(image) = profile.images.first() {
        let _ = writeln!(
            out,
            "<img class=\"avatar\" src=\"{}\" alt=\"\">",
            escape_html(&image.url)
        );
    }
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(profile.name()));

    let mut facts = Vec::new();
    if let Some(followers) = &profile.followers {
        facts.push(format!("{} followers", followers.total));
    }
    if let Some(country) = &profile.country {
        facts.push(escape_html(country));
    }
    if let Some(product) = &profile.product {
        facts.push(escape_html(product));
    }
    if !facts.is_empty() {
        let _ = writeln!(out, "<p>{}</p>", facts.join(" · "));
    }

    if let Some(requested) = requested.filter(|r| *r != profile.id) {
        let _ = writeln!(
            out,
            "<p>You asked about <code>{}</code>, but Spotify signed you in as <code>{}</code>.</p>",
            escape_html(requested),
            escape_html(&profile.id)
        );
    }

    out.push_str("</section>\n");
    out
}

fn windows_section<'a>(ranking: impl Fn(TimeWindow) -> Option<&'a RankedCounts>) -> String {
    let mut out = String::from("<div class=\"windows\">\n");
    for window in TimeWindow::ALL {
        let _ = writeln!(out, "<div>\n<h3>{}</h3>\n<ol>", window.label());
        match ranking(window) {
            Some(ranked) if !ranked.is_empty() => {
                for (label, count) in ranked.iter() {
                    let _ = writeln!(out, "<li>{} ({})</li>", escape_html(label), count);
                }
            }
            _ => out.push_str("<li>nothing here</li>\n"),
        }
        out.push_str("</ol>\n</div>\n");
    }
    out.push_str("</div>\n");
    out
}

fn popularity_section(analysis: &TasteAnalysis) -> String {
    let mut out = String::from(
        "<h2>Popularity</h2>\n<table>\n<tr><th>Window</th><th>Average</th><th>Max</th><th>Min</th></tr>\n",
    );
    for window in TimeWindow::ALL {
        match analysis.popularity_stats.get(&window) {
            Some(stats) => {
                let _ = writeln!(
                    out,
                    "<tr><td>{}</td><td>{:.1}</td><td>{}</td><td>{}</td></tr>",
                    window.label(),
                    stats.average,
                    stats.max,
                    stats.min
                );
            }
            None => {
                let _ = writeln!(
                    out,
                    "<tr><td>{}</td><td colspan=\"3\">no tracks</td></tr>",
                    window.label()
                );
            }
        }
    }
    out.push_str("</table>\n");
    out
}

fn evolution_section(analysis: &TasteAnalysis) -> String {
    let mut out = String::from("<h2>Genre evolution</h2>\n<table>\n<tr><th>Genre</th>");
    for window in TimeWindow::ALL {
        let _ = write!(out, "<th>{}</th>", window.label());
    }
    out.push_str("</tr>\n");

    for (genre, counts) in &analysis.genre_evolution {
        let _ = write!(out, "<tr><td>{}</td>", escape_html(genre));
        for window in TimeWindow::ALL {
            let _ = write!(out, "<td>{}</td>", counts.get(&window).copied().unwrap_or(0));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</table>\n");
    out
}
