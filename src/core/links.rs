use crate::domain::model::DownloaderLinks;
use crate::domain::url_check;
use crate::utils::error::{FetchError, Result};
use url::{form_urlencoded, Url};

/// Builds the SnapInsta / FastDL hand-off links for a form submission.
pub fn downloader_links(input: &str, primary_base: &str, alternative_base: &str) -> Result<DownloaderLinks> {
    let url = url_check::check_form_url(input)?;

    Ok(DownloaderLinks {
        primary: with_url_param(primary_base, url)?,
        alternative: with_url_param(alternative_base, url)?,
    })
}

fn with_url_param(base: &str, value: &str) -> Result<String> {
    let base = Url::parse(base).map_err(|e| FetchError::InvalidConfigValueError {
        field: "downloaders".to_string(),
        value: base.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    Ok(format!("{}?url={}", base, encode_uri_component(value)))
}

/// Percent-encodes like the browser's `encodeURIComponent`:
/// space becomes `%20` and `!'()*~` stay literal.
pub fn encode_uri_component(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
        .replace("%7E", "~")
}
