use crate::api::AppState;
use axum::{http::StatusCode, response::Html, routing::get, Router};
use chrono::Datelike;

pub const SITE_NAME: &str = "ReelSaver";

const NAV_LINKS: [(&str, &str); 5] = [
    ("/", "Home"),
    ("/how-to-use", "How to Use"),
    ("/about", "About"),
    ("/contact", "Contact"),
    ("/privacy-policy", "Privacy"),
];

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; background: #0b0b12; color: #e5e7eb; }
a { color: #f472b6; }
header, footer { padding: 1rem 2rem; background: #11111b; }
header nav a { margin-right: 1rem; text-decoration: none; }
main { max-width: 48rem; margin: 0 auto; padding: 2rem; }
.form-row { display: flex; gap: .5rem; }
.form-row input { flex: 1; padding: .8rem; border-radius: .6rem; border: 1px solid #374151; background: #111827; color: #fff; }
button { padding: .8rem 1.2rem; border: 0; border-radius: .6rem; background: linear-gradient(90deg, #9333ea, #ec4899, #fb923c); color: #fff; cursor: pointer; }
.error { color: #fca5a5; }
.hidden { display: none; }
"#;

const HOME_BODY: &str = r#"
<section>
  <h1>Download Instagram Reels, Posts &amp; IGTV</h1>
  <p>Paste a link, get the video. Free, fast, no registration.</p>
  <form id="download-form">
    <div class="form-row">
      <input id="url" type="text" placeholder="Paste Instagram URL here..." autocomplete="off">
      <button type="submit">Get Video</button>
    </div>
    <p><small>Reels &middot; Stories &middot; Posts &middot; IGTV</small></p>
  </form>
  <p id="error" class="error hidden"></p>
  <div id="result" class="hidden">
    <p>Ready to download!</p>
    <img id="thumb" alt="" width="240" class="hidden">
    <p><button id="save" type="button">Download</button></p>
    <p><a id="primary" target="_blank" rel="noopener noreferrer">Download via SnapInsta</a>
       &middot; <a id="alternative" target="_blank" rel="noopener noreferrer">Alternative Download</a></p>
  </div>
</section>
<section>
  <h2>Why ReelSaver</h2>
  <ul>
    <li><strong>Lightning Fast</strong>: download your favorite content in seconds, not minutes.</li>
    <li><strong>100% Free &amp; Safe</strong>: no registration, no hidden fees.</li>
    <li><strong>Works Everywhere</strong>: phone, tablet or computer.</li>
    <li><strong>No Limits</strong>: download as many videos as you want.</li>
  </ul>
  <h2>How it works</h2>
  <ol>
    <li>Copy the link to the Reel, Story or Post.</li>
    <li>Paste it into the field above.</li>
    <li>Click the download button and save the file.</li>
  </ol>
</section>
<script>
const form = document.getElementById('download-form');
const show = (id, on) => document.getElementById(id).classList.toggle('hidden', !on);
form.addEventListener('submit', async (e) => {
  e.preventDefault();
  show('error', false); show('result', false);
  const url = document.getElementById('url').value.trim();
  const links = await fetch('/api/links?url=' + encodeURIComponent(url));
  const linkBody = await links.json();
  if (!links.ok) {
    document.getElementById('error').textContent = linkBody.error;
    show('error', true);
    return;
  }
  document.getElementById('primary').href = linkBody.primary;
  document.getElementById('alternative').href = linkBody.alternative;
  const save = document.getElementById('save');
  save.classList.add('hidden');
  show('result', true);
  const res = await fetch('/api/instagram', {
    method: 'POST',
    headers: { 'Content-Type': 'application/json' },
    body: JSON.stringify({ url }),
  });
  const body = await res.json();
  if (!res.ok) {
    document.getElementById('error').textContent = body.error + (body.suggestion ? ' ' + body.suggestion : '');
    show('error', true);
    return;
  }
  if (body.data.thumbnailUrl) {
    document.getElementById('thumb').src = body.data.thumbnailUrl;
    show('thumb', true);
  }
  save.onclick = () => {
    window.location.href = '/api/instagram/download?url=' + encodeURIComponent(body.data.videoUrl)
      + '&filename=' + encodeURIComponent(body.data.filename);
  };
  save.classList.remove('hidden');
});
</script>
"#;

const HOW_TO_USE_BODY: &str = r#"
<h1>How to Use</h1>
<h2>Step 1: Find the Content</h2>
<p>Open Instagram and navigate to the Reel, Story, or Post you want to download.</p>
<h2>Step 2: Copy the URL</h2>
<p>Tap the share icon and choose <em>Copy link</em>. On desktop, copy the address from the browser bar.</p>
<h2>Step 3: Download</h2>
<p>Paste the URL on ReelSaver and click Download.</p>
<h2>Frequently asked questions</h2>
<h3>Does it work on iPhone &amp; Android?</h3>
<p>Yes. Any modern mobile browser works.</p>
<h3>Does it work on Windows &amp; Mac?</h3>
<p>Yes. Use any desktop browser.</p>
<h3>Can I download from private accounts?</h3>
<p>No. Only public content can be resolved.</p>
"#;

const ABOUT_BODY: &str = r#"
<h1>About ReelSaver</h1>
<p>ReelSaver is a free tool for saving Instagram Reels, Posts and IGTV videos for offline viewing.</p>
<h2>Privacy Focused</h2>
<p>We never store the links you paste or the media you download.</p>
<h2>Community Driven</h2>
<p>Feature ideas come from people who use the site every day.</p>
"#;

const CONTACT_BODY: &str = r#"
<h1>Contact</h1>
<p>Questions, bug reports or takedown requests are welcome.</p>
<h2>Response Time</h2>
<p>We usually answer within 24 to 48 hours.</p>
<h2>Send us a Message</h2>
<p>Email: <a href="mailto:support@reelsaver.app">support@reelsaver.app</a></p>
"#;

const PRIVACY_BODY: &str = r#"
<h1>Privacy Policy</h1>
<h2>1. Introduction</h2>
<p>This policy explains what information ReelSaver handles when you use the site.</p>
<h2>2. Information We Collect</h2>
<ul>
  <li>URLs you paste to download content (not stored)</li>
  <li>Basic analytics data (page views, device type)</li>
  <li>Information you provide via contact forms</li>
</ul>
<h2>3. What We Don't Collect</h2>
<ul>
  <li>We do NOT store your downloaded content</li>
  <li>We do NOT require account registration</li>
  <li>We do NOT collect personal identification information</li>
</ul>
<h2>4. Third-Party Services</h2>
<p>Links to third-party downloaders open their own sites, governed by their own policies.</p>
<h2>5. Changes to This Policy</h2>
<p>Updates are published on this page.</p>
"#;

const TERMS_BODY: &str = r#"
<h1>Terms of Service</h1>
<h2>1. Acceptance of Terms</h2>
<p>By using ReelSaver you agree to these terms.</p>
<h2>2. Description of Service</h2>
<p>ReelSaver resolves public Instagram links into direct media files.</p>
<h2>3. User Responsibilities</h2>
<ul>
  <li>Only download content you have permission to download</li>
  <li>Respect copyright and intellectual property rights</li>
  <li>Not use the service for any illegal purposes</li>
  <li>Comply with Instagram's Terms of Service</li>
</ul>
<h2>4. Disclaimer</h2>
<p>The service is provided as is. Instagram may change or block access at any time.</p>
<h2>5. Service Availability</h2>
<p>We do not guarantee that any particular post can be downloaded.</p>
"#;

const NOT_FOUND_BODY: &str = r#"
<h1>Page not found</h1>
<p>The page you are looking for does not exist. <a href="/">Back to the downloader</a>.</p>
"#;

/// 共用版面：頁首導覽 + 頁尾
pub fn render(title: &str, body: &str) -> Html<String> {
    let nav: String = NAV_LINKS
        .iter()
        .map(|(href, label)| format!(r#"<a href="{}">{}</a>"#, href, label))
        .collect();
    let year = chrono::Utc::now().year();

    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {site}</title>
<style>{style}</style>
</head>
<body>
<header><strong>{site}</strong> <nav>{nav}</nav></header>
<main>{body}</main>
<footer>
  <p>&copy; {year} {site}. Not affiliated with Instagram or Meta.</p>
  <p><a href="/privacy-policy">Privacy Policy</a> &middot; <a href="/terms-of-service">Terms of Service</a></p>
</footer>
</body>
</html>"#,
        title = title,
        site = SITE_NAME,
        style = STYLE,
        nav = nav,
        body = body,
        year = year,
    ))
}

pub async fn home() -> Html<String> {
    render("Free Instagram Downloader", HOME_BODY)
}

pub async fn how_to_use() -> Html<String> {
    render("How to Use", HOW_TO_USE_BODY)
}

pub async fn about() -> Html<String> {
    render("About", ABOUT_BODY)
}

pub async fn contact() -> Html<String> {
    render("Contact", CONTACT_BODY)
}

pub async fn privacy_policy() -> Html<String> {
    render("Privacy Policy", PRIVACY_BODY)
}

pub async fn terms_of_service() -> Html<String> {
    render("Terms of Service", TERMS_BODY)
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, render("Not Found", NOT_FOUND_BODY))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/how-to-use", get(how_to_use))
        .route("/about", get(about))
        .route("/contact", get(contact))
        .route("/privacy-policy", get(privacy_policy))
        .route("/terms-of-service", get(terms_of_service))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_wraps_body() {
        let Html(page) = render("About", "<p>hello</p>");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>About | ReelSaver</title>"));
        assert!(page.contains("<main><p>hello</p></main>"));
        assert!(page.contains(r#"<a href="/how-to-use">How to Use</a>"#));
        assert!(page.contains(&chrono::Utc::now().year().to_string()));
    }

    #[tokio::test]
    async fn test_home_contains_form() {
        let Html(page) = home().await;
        assert!(page.contains(r#"id="download-form""#));
        assert!(page.contains("/api/instagram"));
    }
}
